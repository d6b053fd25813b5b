//! # Entity Store Contract
//!
//! The only collaborator of the pricing engine. `cotiza-db` implements it on
//! its `Database` handle; the engine tests implement it over a `HashMap`.
//!
//! ```text
//! ┌──────────────────────┐         ┌──────────────────────────────────┐
//! │  QuotationEngine     │         │  dyn QuotationStore              │
//! │                      │  reads  │  find_client / find_service      │
//! │  validate ─► price ──┼────────►│  find_quotation                  │
//! │           ─► persist │ writes  │  insert / replace / delete       │
//! │                      │────────►│  query_quotations (newest first) │
//! └──────────────────────┘         └──────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::types::{Client, Quotation, Service};
use crate::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Result type returned by every store operation.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Query Types
// =============================================================================

/// Filter of the quotation list. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuotationFilter {
    /// Compared verbatim against the stored client reference.
    pub client_id: Option<String>,
    /// Inclusive lower bound on the quotation timestamp.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the quotation timestamp.
    pub to: Option<DateTime<Utc>>,
}

/// One page of a list query. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Pagination {
    /// Builds a pagination, clamping `page` to at least 1 and `limit` to
    /// `1..=MAX_PAGE_SIZE`.
    pub fn new(page: u32, limit: u32) -> Self {
        Pagination {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of records to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

// =============================================================================
// Store Trait
// =============================================================================

/// What the pricing engine needs from persistent storage.
///
/// ## Contract
/// - Lookups return `Ok(None)` on a miss, never an error
/// - `insert_quotation` reports a duplicate token as `UniqueViolation`
/// - `replace_quotation` reports a missing record as `NotFound`
/// - `delete_quotation` succeeds whether or not the record exists
/// - `query_quotations` orders by quotation timestamp, newest first
/// - A quotation's header and items are written atomically
#[async_trait]
pub trait QuotationStore: Send + Sync {
    async fn find_client(&self, id: &str) -> StoreResult<Option<Client>>;

    async fn find_service(&self, id: &str) -> StoreResult<Option<Service>>;

    async fn find_quotation(&self, id: &str) -> StoreResult<Option<Quotation>>;

    async fn insert_quotation(&self, quotation: &Quotation) -> StoreResult<Quotation>;

    async fn replace_quotation(&self, id: &str, quotation: &Quotation)
        -> StoreResult<Quotation>;

    async fn delete_quotation(&self, id: &str) -> StoreResult<()>;

    async fn query_quotations(
        &self,
        filter: &QuotationFilter,
        pagination: Pagination,
    ) -> StoreResult<Vec<Quotation>>;
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_offset() {
        assert_eq!(Pagination::new(1, 50).offset(), 0);
        assert_eq!(Pagination::new(2, 1).offset(), 1);
        assert_eq!(Pagination::new(3, 20).offset(), 40);
    }

    #[test]
    fn test_pagination_clamps() {
        assert_eq!(Pagination::new(0, 0), Pagination { page: 1, limit: 1 });
        assert_eq!(Pagination::new(1, 10_000).limit, MAX_PAGE_SIZE);
        assert_eq!(Pagination::default(), Pagination { page: 1, limit: 50 });
    }
}
