//! Shared application state.

use std::sync::Arc;

use cotiza_core::QuotationEngine;
use cotiza_db::Database;

/// State handed to every handler.
///
/// ```text
/// AppState ─┬─ db          clients / services CRUD, status
///           └─ quotations  QuotationEngine<Database>
/// ```
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub quotations: Arc<QuotationEngine<Database>>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState {
            quotations: Arc::new(QuotationEngine::new(db.clone())),
            db,
        }
    }
}
