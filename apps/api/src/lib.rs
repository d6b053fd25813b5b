//! # Cotiza API
//!
//! HTTP server for quotations, clients and the service catalog.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cotiza API Routes                               │
//! │                                                                         │
//! │  ┌────────────────────┐  ┌────────────────┐  ┌────────────────────────┐│
//! │  │  Quotations        │  │  Clients       │  │  Services              ││
//! │  │                    │  │                │  │                        ││
//! │  │ /quotations        │  │ /api/clientes  │  │ /api/servicios         ││
//! │  │ /api/cotizaciones  │  │                │  │                        ││
//! │  │ • create / list    │  │ • CRUD         │  │ • CRUD                 ││
//! │  │ • get / update     │  │                │  │                        ││
//! │  │ • delete           │  │                │  │                        ││
//! │  └─────────┬──────────┘  └───────┬────────┘  └───────────┬────────────┘│
//! │            │                     │                       │             │
//! │            ▼                     ▼                       ▼             │
//! │  ┌──────────────────┐   ┌──────────────────────────────────────────┐  │
//! │  │ QuotationEngine  │──►│ Database (cotiza-db, SQLite)             │  │
//! │  └──────────────────┘   └──────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Middleware: TraceLayer (request spans) ─ CorsLayer (browser client)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables (see [`config::ApiConfig`]):
//! - `HOST`, `PORT` - bind address (default `0.0.0.0:4000`)
//! - `DATABASE_PATH` - SQLite file (default `./data/cotiza.db`)
//! - `DB_MAX_CONNECTIONS` - pool size (default 5)
//! - `CORS_ALLOW_ANY` - permissive CORS (default true)
//! - `RUST_LOG` - log filter

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use routes::{clients, quotations, services, status};

/// Quotation routes are mounted under both prefixes.
const QUOTATION_BASES: [&str; 2] = ["/quotations", "/api/cotizaciones"];

/// Builds the full application router.
pub fn build_router(state: AppState, cors_allow_any: bool) -> Router {
    let mut router: Router<AppState> = Router::new();

    for base in QUOTATION_BASES {
        router = router
            .route(
                base,
                get(quotations::list_quotations).post(quotations::create_quotation),
            )
            .route(
                &format!("{base}/{{id}}"),
                get(quotations::get_quotation)
                    .put(quotations::update_quotation)
                    .delete(quotations::delete_quotation),
            );
    }

    let router = router
        .route(
            "/api/clientes",
            get(clients::list_clients).post(clients::create_client),
        )
        .route(
            "/api/clientes/{id}",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        .route(
            "/api/servicios",
            get(services::list_services).post(services::create_service),
        )
        .route(
            "/api/servicios/{id}",
            get(services::get_service)
                .put(services::update_service)
                .delete(services::delete_service),
        )
        .route("/api/status", get(status::status))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if cors_allow_any {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
