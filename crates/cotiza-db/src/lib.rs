//! # cotiza-db: Database Layer for Cotiza
//!
//! This crate provides database access for Cotiza.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cotiza Data Flow                                 │
//! │                                                                         │
//! │  HTTP handler (POST /quotations)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  QuotationEngine (cotiza-core) ──► QuotationStore trait                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     cotiza-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ ClientRepo    │    │ 001_initial_ │  │   │
//! │  │   │ SqlitePool    │◄───│ ServiceRepo   │    │   schema.sql │  │   │
//! │  │   │ + store.rs    │    │ QuotationRepo │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │                     ./data/cotiza.db                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (client, service, quotation)
//! - `store` - `QuotationStore` implementation for [`Database`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cotiza_core::QuotationEngine;
//! use cotiza_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./data/cotiza.db")).await?;
//! let clients = db.clients().list().await?;
//!
//! let engine = QuotationEngine::new(db.clone());
//! let quotation = engine.create(request).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::client::ClientRepository;
pub use repository::quotation::QuotationRepository;
pub use repository::service::ServiceRepository;
