//! # Request Types
//!
//! Inbound payloads, as the front-end sends them.
//!
//! ## Lenient Input
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Form fields reach us as whatever the browser put in the JSON:         │
//! │                                                                         │
//! │    "cantidad": 2        →  2.0                                          │
//! │    "cantidad": "2"      →  2.0                                          │
//! │    "cantidad": "dos"    →  NaN   ──► INVALID_VALUE in validation        │
//! │    (missing)            →  NaN   ──► INVALID_VALUE in validation        │
//! │    "clienteId": 123     →  "123" ──► INVALID_REFERENCE in validation    │
//! │                                                                         │
//! │  Deserialization never fails on a field value, so the caller always    │
//! │  gets the specific business error instead of a generic parse error.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use tracing::warn;

use crate::store::{Pagination, QuotationFilter};
use crate::types::{Client, Service};
use crate::validation::{
    validate_base_price, validate_client_name, validate_email, validate_phone,
    validate_service_name, ValidationResult,
};
use crate::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

// =============================================================================
// Quotation Payloads
// =============================================================================

/// One requested line of a quotation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LineItemRequest {
    #[serde(rename = "servicioId", default, deserialize_with = "de_reference")]
    pub service_id: String,

    #[serde(rename = "precioUnitario", default = "nan", deserialize_with = "de_numeric")]
    pub unit_price: f64,

    #[serde(rename = "cantidad", default = "nan", deserialize_with = "de_numeric")]
    pub quantity: f64,
}

impl LineItemRequest {
    pub fn new(service_id: impl Into<String>, unit_price: f64, quantity: f64) -> Self {
        LineItemRequest {
            service_id: service_id.into(),
            unit_price,
            quantity,
        }
    }
}

/// Body of `POST /quotations`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuotationRequest {
    #[serde(rename = "clienteId", default, deserialize_with = "de_reference")]
    pub client_id: String,

    #[serde(default)]
    pub items: Vec<LineItemRequest>,
}

/// Body of `PUT /quotations/{id}`.
///
/// An absent field keeps the stored value. `items` replaces the whole list
/// when present; there is no per-item merge.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QuotationPatch {
    #[serde(rename = "clienteId", default, deserialize_with = "de_optional_reference")]
    pub client_id: Option<String>,

    #[serde(default)]
    pub items: Option<Vec<LineItemRequest>>,
}

// =============================================================================
// List Query
// =============================================================================

/// Query string of `GET /quotations`, kept as raw strings.
///
/// Coercion never fails: garbled pagination falls back to the defaults and
/// unparseable dates are dropped from the filter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QuotationQuery {
    #[serde(rename = "clienteId")]
    pub client_id: Option<String>,
    pub desde: Option<String>,
    pub hasta: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl QuotationQuery {
    /// Splits the raw query into a store filter and a page.
    pub fn into_parts(self) -> (QuotationFilter, Pagination) {
        let filter = QuotationFilter {
            client_id: self.client_id.filter(|id| !id.is_empty()),
            from: self.desde.as_deref().and_then(|raw| date_bound("desde", raw)),
            to: self.hasta.as_deref().and_then(|raw| date_bound("hasta", raw)),
        };

        let page = positive_or(self.page.as_deref(), DEFAULT_PAGE);
        let limit = positive_or(self.limit.as_deref(), DEFAULT_PAGE_SIZE);

        (filter, Pagination::new(page, limit))
    }
}

/// Parses a positive integer, or returns `default` for anything else.
fn positive_or(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n >= 1)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(default)
}

fn date_bound(name: &str, raw: &str) -> Option<DateTime<Utc>> {
    if raw.trim().is_empty() {
        return None;
    }
    let parsed = parse_date_bound(raw);
    if parsed.is_none() {
        warn!(bound = name, value = raw, "Ignoring unparseable date bound");
    }
    parsed
}

/// Parses a list date bound: an RFC 3339 timestamp, or a `YYYY-MM-DD` date
/// meaning 00:00:00 UTC of that day.
///
/// ## Example
/// ```rust
/// use cotiza_core::request::parse_date_bound;
///
/// let day = parse_date_bound("2024-03-01").unwrap();
/// assert_eq!(day.to_rfc3339(), "2024-03-01T00:00:00+00:00");
///
/// assert!(parse_date_bound("2024-03-01T10:30:00-06:00").is_some());
/// assert!(parse_date_bound("yesterday").is_none());
/// ```
pub fn parse_date_bound(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight))
}

// =============================================================================
// Client Payloads
// =============================================================================

/// Body of `POST /api/clientes`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewClient {
    #[serde(rename = "nombreCliente", default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "telefono", default)]
    pub phone: String,
}

impl NewClient {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_client_name(&self.name)?;
        validate_email(&self.email)?;
        validate_phone(&self.phone)?;
        Ok(())
    }
}

/// Body of `PUT /api/clientes/{id}`. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ClientPatch {
    #[serde(rename = "nombreCliente")]
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
}

impl ClientPatch {
    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(name) = &self.name {
            validate_client_name(name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        Ok(())
    }

    /// Writes the present fields onto `client`.
    pub fn apply(self, client: &mut Client) {
        if let Some(name) = self.name {
            client.name = name.trim().to_string();
        }
        if let Some(email) = self.email {
            client.email = email.trim().to_string();
        }
        if let Some(phone) = self.phone {
            client.phone = phone.trim().to_string();
        }
    }
}

// =============================================================================
// Service Payloads
// =============================================================================

/// Body of `POST /api/servicios`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewService {
    #[serde(rename = "nombreServicio", default)]
    pub name: String,

    #[serde(rename = "precioBase", default = "nan", deserialize_with = "de_numeric")]
    pub base_price: f64,

    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
}

impl NewService {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_service_name(&self.name)?;
        validate_base_price(self.base_price)?;
        Ok(())
    }
}

/// Body of `PUT /api/servicios/{id}`. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServicePatch {
    #[serde(rename = "nombreServicio")]
    pub name: Option<String>,

    #[serde(rename = "precioBase", default, deserialize_with = "de_optional_numeric")]
    pub base_price: Option<f64>,

    #[serde(rename = "descripcion")]
    pub description: Option<String>,
}

impl ServicePatch {
    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(name) = &self.name {
            validate_service_name(name)?;
        }
        if let Some(price) = self.base_price {
            validate_base_price(price)?;
        }
        Ok(())
    }

    /// Writes the present fields onto `service`.
    pub fn apply(self, service: &mut Service) {
        if let Some(name) = self.name {
            service.name = name.trim().to_string();
        }
        if let Some(price) = self.base_price {
            service.base_price = price;
        }
        if let Some(description) = self.description {
            service.description = Some(description);
        }
    }
}

// =============================================================================
// Lenient Deserializers
// =============================================================================

fn nan() -> f64 {
    f64::NAN
}

/// Accepts a number or a numeric string. Anything else becomes NaN.
struct NumericVisitor;

impl<'de> Visitor<'de> for NumericVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        Ok(v.trim().parse::<f64>().unwrap_or(f64::NAN))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<f64, E> {
        Ok(f64::NAN)
    }

    fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
        Ok(f64::NAN)
    }

    fn visit_none<E: de::Error>(self) -> Result<f64, E> {
        Ok(f64::NAN)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<f64, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(f64::NAN)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<f64, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(f64::NAN)
    }
}

fn de_numeric<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    deserializer.deserialize_any(NumericVisitor)
}

fn de_optional_numeric<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    deserializer.deserialize_any(NumericVisitor).map(Some)
}

/// Accepts any scalar as an identifier string; validation rejects the
/// malformed ones with INVALID_REFERENCE.
struct ReferenceVisitor;

impl<'de> Visitor<'de> for ReferenceVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an identifier")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_unit<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<String, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(String::new())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<String, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(String::new())
    }
}

fn de_reference<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    deserializer.deserialize_any(ReferenceVisitor)
}

fn de_optional_reference<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    deserializer.deserialize_any(ReferenceVisitor).map(Some)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_accepts_numeric_strings() {
        let item: LineItemRequest = serde_json::from_str(
            r#"{"servicioId": "s-1", "precioUnitario": "12.5", "cantidad": "3"}"#,
        )
        .unwrap();
        assert_eq!(item.unit_price, 12.5);
        assert_eq!(item.quantity, 3.0);
    }

    #[test]
    fn test_line_item_garbage_becomes_nan() {
        let item: LineItemRequest =
            serde_json::from_str(r#"{"servicioId": "s-1", "precioUnitario": "abc", "cantidad": [1]}"#)
                .unwrap();
        assert!(item.unit_price.is_nan());
        assert!(item.quantity.is_nan());

        let item: LineItemRequest = serde_json::from_str(r#"{"servicioId": "s-1"}"#).unwrap();
        assert!(item.unit_price.is_nan());
        assert!(item.quantity.is_nan());
    }

    #[test]
    fn test_quotation_request_defaults() {
        let req: QuotationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.client_id, "");
        assert!(req.items.is_empty());

        let req: QuotationRequest = serde_json::from_str(r#"{"clienteId": 42}"#).unwrap();
        assert_eq!(req.client_id, "42");
    }

    #[test]
    fn test_patch_distinguishes_absent_fields() {
        let patch: QuotationPatch = serde_json::from_str("{}").unwrap();
        assert_eq!(patch, QuotationPatch::default());

        let patch: QuotationPatch =
            serde_json::from_str(r#"{"clienteId": "", "items": []}"#).unwrap();
        assert_eq!(patch.client_id.as_deref(), Some(""));
        assert_eq!(patch.items, Some(vec![]));
    }

    #[test]
    fn test_query_defaults() {
        let (filter, page) = QuotationQuery::default().into_parts();
        assert_eq!(filter, QuotationFilter::default());
        assert_eq!(page, Pagination { page: 1, limit: 50 });
    }

    #[test]
    fn test_query_garbled_pagination_falls_back() {
        let query = QuotationQuery {
            page: Some("abc".to_string()),
            limit: Some("-5".to_string()),
            ..Default::default()
        };
        let (_, page) = query.into_parts();
        assert_eq!(page, Pagination { page: 1, limit: 50 });

        let query = QuotationQuery {
            page: Some("3".to_string()),
            limit: Some("100000".to_string()),
            ..Default::default()
        };
        let (_, page) = query.into_parts();
        assert_eq!(page, Pagination { page: 3, limit: 500 });
    }

    #[test]
    fn test_query_date_bounds() {
        let query = QuotationQuery {
            client_id: Some("c-1".to_string()),
            desde: Some("2024-01-01".to_string()),
            hasta: Some("not a date".to_string()),
            ..Default::default()
        };
        let (filter, _) = query.into_parts();
        assert_eq!(filter.client_id.as_deref(), Some("c-1"));
        assert_eq!(filter.from, parse_date_bound("2024-01-01T00:00:00Z"));
        assert_eq!(filter.to, None);
    }

    #[test]
    fn test_empty_client_filter_is_ignored() {
        let query = QuotationQuery {
            client_id: Some(String::new()),
            ..Default::default()
        };
        let (filter, _) = query.into_parts();
        assert_eq!(filter.client_id, None);
    }

    #[test]
    fn test_new_client_validation() {
        let client = NewClient {
            name: "ACME S.A.".to_string(),
            email: "contacto@acme.com".to_string(),
            phone: "6000-0000".to_string(),
        };
        assert!(client.validate().is_ok());

        let client = NewClient {
            email: "not-an-email".to_string(),
            ..client
        };
        assert!(client.validate().is_err());
    }

    #[test]
    fn test_service_patch_apply() {
        let mut service = Service {
            id: "s-1".to_string(),
            name: "Soporte Remoto".to_string(),
            base_price: 20.0,
            description: None,
        };
        let patch: ServicePatch = serde_json::from_str(r#"{"precioBase": "25"}"#).unwrap();
        assert!(patch.validate().is_ok());
        patch.apply(&mut service);

        assert_eq!(service.base_price, 25.0);
        assert_eq!(service.name, "Soporte Remoto");
    }

    #[test]
    fn test_service_patch_rejects_negative_price() {
        let patch: ServicePatch = serde_json::from_str(r#"{"precioBase": -1}"#).unwrap();
        assert!(patch.validate().is_err());
    }
}
