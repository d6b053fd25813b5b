//! # Domain Types
//!
//! Core domain types used throughout Cotiza.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Client       │   │    Service      │   │    Quotation        │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)          │   │
//! │  │  name           │   │  name           │   │  code (COT-…)       │   │
//! │  │  email, phone   │   │  base_price     │   │  client_id + name   │   │
//! │  │  registered_at  │   │  description    │   │  items: [LineItem]  │   │
//! │  └─────────────────┘   └─────────────────┘   │  sub_total/tax/total│   │
//! │                                              └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Names
//! The JSON field names (`_id`, `nombreCliente`, `precioUnitario`, ...) are
//! the ones the browser front-end was written against; the Rust names are
//! plain English.
//!
//! ## Snapshot Pattern
//! `Quotation.client_name` and `LineItem.service_name` are copied at the
//! moment the quotation is priced. Later edits to the client or service do
//! not flow back into existing quotations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so 800 bps = 8%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction (`800` → `0.08`).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Entity Kind
// =============================================================================

/// The stored entities, used to label NotFound errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    Client,
    Service,
    Quotation,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Client => "Client",
            EntityKind::Service => "Service",
            EntityKind::Quotation => "Quotation",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Client
// =============================================================================

/// A customer of the freelance business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier (UUID v4).
    #[serde(rename = "_id")]
    pub id: String,

    /// Display name, copied into quotations.
    #[serde(rename = "nombreCliente")]
    pub name: String,

    pub email: String,

    #[serde(rename = "telefono")]
    pub phone: String,

    /// Set by the server when the client is created.
    #[serde(rename = "fechaRegistro")]
    pub registered_at: DateTime<Utc>,
}

// =============================================================================
// Service
// =============================================================================

/// An entry of the service catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Unique identifier (UUID v4).
    #[serde(rename = "_id")]
    pub id: String,

    /// Display name, copied into quotation line items.
    #[serde(rename = "nombreServicio")]
    pub name: String,

    /// Reference price. Quotations carry their own unit price, so this is
    /// only a suggestion for the front-end.
    #[serde(rename = "precioBase")]
    pub base_price: f64,

    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// =============================================================================
// Line Item
// =============================================================================

/// One priced service entry of a quotation.
///
/// ## Invariant
/// `item_total == round2(unit_price × quantity)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "servicioId")]
    pub service_id: String,

    /// Service name at time of quotation (frozen).
    #[serde(rename = "nombreServicio")]
    pub service_name: String,

    /// Unit price as entered.
    #[serde(rename = "precioUnitario")]
    pub unit_price: f64,

    /// Whole number, at least 1.
    #[serde(rename = "cantidad")]
    pub quantity: i64,

    #[serde(rename = "totalItem")]
    pub item_total: Money,
}

// =============================================================================
// Quotation
// =============================================================================

/// A priced proposal bundling one or more services for a client.
///
/// ## Dual-Key Identity
/// - `id`: UUID v4, used in URLs and database relations
/// - `code`: `COT-…` token shown to humans, unique across the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "idCotizacion")]
    pub code: String,

    #[serde(rename = "clienteId")]
    pub client_id: String,

    /// Client name at time of quotation (frozen).
    #[serde(rename = "nombreCliente")]
    pub client_name: String,

    /// Creation time. Updates do not move it.
    #[serde(rename = "fechaCotizacion")]
    pub quoted_at: DateTime<Utc>,

    pub items: Vec<LineItem>,

    #[serde(rename = "subTotal")]
    pub sub_total: Money,

    #[serde(rename = "impuesto")]
    pub tax: Money,

    pub total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(800);
        assert_eq!(rate.bps(), 800);
        assert!((rate.fraction() - 0.08).abs() < f64::EPSILON);
        assert!((rate.percentage() - 8.0).abs() < 0.001);
    }

    #[test]
    fn test_quotation_wire_names() {
        let quotation = Quotation {
            id: "q-1".to_string(),
            code: "COT-1".to_string(),
            client_id: "c-1".to_string(),
            client_name: "ACME S.A.".to_string(),
            quoted_at: Utc::now(),
            items: vec![LineItem {
                service_id: "s-1".to_string(),
                service_name: "Soporte Remoto".to_string(),
                unit_price: 20.0,
                quantity: 1,
                item_total: Money::from_cents(2000),
            }],
            sub_total: Money::from_cents(2000),
            tax: Money::from_cents(160),
            total: Money::from_cents(2160),
        };

        let json = serde_json::to_value(&quotation).unwrap();
        assert_eq!(json["_id"], "q-1");
        assert_eq!(json["idCotizacion"], "COT-1");
        assert_eq!(json["nombreCliente"], "ACME S.A.");
        assert_eq!(json["subTotal"], 20.0);
        assert_eq!(json["impuesto"], 1.6);
        assert_eq!(json["total"], 21.6);
        assert_eq!(json["items"][0]["servicioId"], "s-1");
        assert_eq!(json["items"][0]["cantidad"], 1);
        assert_eq!(json["items"][0]["totalItem"], 20.0);
    }

    #[test]
    fn test_service_without_description_omits_field() {
        let service = Service {
            id: "s-1".to_string(),
            name: "Soporte Remoto".to_string(),
            base_price: 20.0,
            description: None,
        };
        let json = serde_json::to_value(&service).unwrap();
        assert!(json.get("descripcion").is_none());
        assert_eq!(json["precioBase"], 20.0);
    }
}
