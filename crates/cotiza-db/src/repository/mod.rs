//! # Repository Module
//!
//! Database repository implementations for Cotiza.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler / QuotationStore impl                                    │
//! │       │                                                                 │
//! │       │  db.clients().get_by_id(id)                                    │
//! │       ▼                                                                 │
//! │  ClientRepository / ServiceRepository                                  │
//! │  ├── list()            sorted by name                                  │
//! │  ├── get_by_id(id)                                                     │
//! │  ├── insert(new)                                                       │
//! │  ├── update(id, patch)                                                 │
//! │  └── delete(id)        idempotent                                      │
//! │                                                                         │
//! │  QuotationRepository                                                   │
//! │  ├── insert / replace  header + items in one transaction               │
//! │  ├── get_by_id / query newest first, items loaded in one IN query      │
//! │  └── delete            items cascade                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ClientRepository`](client::ClientRepository) - Client CRUD
//! - [`ServiceRepository`](service::ServiceRepository) - Service catalog CRUD
//! - [`QuotationRepository`](quotation::QuotationRepository) - Quotations and their items

use chrono::{DateTime, SecondsFormat, Utc};

pub mod client;
pub mod quotation;
pub mod service;

/// Formats a timestamp for storage.
///
/// Fixed-width RFC 3339 in UTC with nanoseconds, so stored values sort
/// lexicographically in time order and decode back to the same instant.
pub(crate) fn timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_sorts_lexicographically() {
        let early = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let later = early + chrono::Duration::nanoseconds(1);

        assert_eq!(timestamp(&early), "2024-01-01T00:00:00.000000000Z");
        assert!(timestamp(&early) < timestamp(&later));
    }
}
