//! # cotiza-core: Pure Business Logic for Cotiza
//!
//! This crate is the **heart** of Cotiza. It contains the quotation pricing
//! rules as pure functions, plus the engine that applies them against an
//! abstract entity store.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cotiza Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front-end (browser)                          │   │
//! │  │    Clientes ──► Servicios ──► Cotizaciones                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP / JSON                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    cotiza-api (axum)                            │   │
//! │  │    POST /quotations, GET /quotations, PUT, DELETE               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cotiza-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │  Client   │  │   Money   │  │  round2   │  │   rules   │  │   │
//! │  │   │ Quotation │  │  TaxRate  │  │  totals   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────────────┐   ┌─────────────────────────────┐  │   │
//! │  │   │ engine                │──►│ store (QuotationStore trait)│  │   │
//! │  │   │ create/update/list/.. │   │ implemented by cotiza-db    │  │   │
//! │  │   └───────────────────────┘   └─────────────────────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    cotiza-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Client, Service, Quotation, LineItem, TaxRate)
//! - [`request`] - Inbound payloads and list query coercion
//! - [`money`] - Money type held in integer cents
//! - [`pricing`] - round2, line totals, quotation totals
//! - [`validation`] - Business rule validation
//! - [`store`] - The entity store contract consumed by the engine
//! - [`engine`] - The Quotation Pricing Engine
//! - [`error`] - Domain error types and the error taxonomy
//!
//! ## Example Usage
//!
//! ```rust
//! use cotiza_core::pricing::{line_total, QuotationTotals};
//! use cotiza_core::TAX_RATE;
//!
//! let items = [line_total(50.00, 2), line_total(20.00, 1)];
//! let totals = QuotationTotals::compute(items, TAX_RATE);
//!
//! assert_eq!(totals.sub_total.cents(), 12000); // $120.00
//! assert_eq!(totals.tax.cents(), 960);         // $9.60
//! assert_eq!(totals.total.cents(), 12960);     // $129.60
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod money;
pub mod pricing;
pub mod request;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use engine::QuotationEngine;
pub use error::{CoreError, CoreResult, ErrorKind, StoreError, ValidationError};
pub use money::Money;
pub use request::*;
pub use store::{Pagination, QuotationFilter, QuotationStore, StoreResult};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fixed tax rate applied to every quotation subtotal (8%).
pub const TAX_RATE: TaxRate = TaxRate::from_bps(800);

/// Prefix of the human-facing quotation token (`COT-…`).
pub const QUOTATION_CODE_PREFIX: &str = "COT";

/// Ceiling for a line total and for a quotation subtotal (one trillion).
///
/// Keeps every amount exactly representable in cents, in `i64` and in the
/// `f64` the wire format uses.
pub const MAX_QUOTATION_AMOUNT: f64 = 1_000_000_000_000.0;

/// Page number used when the list query omits or garbles `page`.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the list query omits or garbles `limit`.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page size a list query may request.
pub const MAX_PAGE_SIZE: u32 = 500;
