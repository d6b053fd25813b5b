//! # Quotation Pricing Engine
//!
//! Turns a client reference plus requested line items into a priced,
//! validated and persisted [`Quotation`], or rejects with one specific error.
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create(clienteId, items)                                               │
//! │                                                                         │
//! │  1. clienteId malformed?         ──► INVALID_REFERENCE                  │
//! │  2. find_client(clienteId)       ──► NOT_FOUND (Client)                 │
//! │  3. items empty?                 ──► INVALID_VALUE                      │
//! │  4. for each item, in order:                                            │
//! │       servicioId malformed?      ──► INVALID_REFERENCE                  │
//! │       find_service(servicioId)   ──► NOT_FOUND (Service, id)            │
//! │       cantidad / precioUnitario  ──► INVALID_VALUE                      │
//! │       price line, snapshot name                                         │
//! │  5. subTotal / impuesto / total                                         │
//! │  6. insert_quotation             ──► UNIQUENESS_CONFLICT / INTERNAL     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every check happens before the single write, so a rejected request never
//! leaves anything behind.
//!
//! ## Update Flow
//! The quotation must exist (checked first). `clienteId` and `items` each
//! default to the stored value when absent, and then go through the exact
//! same validation and pricing as a create. Stored items are re-validated
//! and their service names re-resolved. The token and the quotation
//! timestamp never change.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::pricing::{line_total, QuotationTotals};
use crate::request::{LineItemRequest, QuotationPatch, QuotationRequest};
use crate::store::{Pagination, QuotationFilter, QuotationStore};
use crate::types::{Client, EntityKind, LineItem, Quotation, TaxRate};
use crate::validation::{
    validate_amount, validate_quantity, validate_reference, validate_unit_price,
};
use crate::{QUOTATION_CODE_PREFIX, TAX_RATE};

/// The quotation pricing engine, bound to an entity store.
pub struct QuotationEngine<S> {
    store: S,
    tax_rate: TaxRate,
}

impl<S: QuotationStore> QuotationEngine<S> {
    /// Creates an engine pricing at the standard [`TAX_RATE`].
    pub fn new(store: S) -> Self {
        QuotationEngine {
            store,
            tax_rate: TAX_RATE,
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Validates, prices and persists a new quotation.
    pub async fn create(&self, request: QuotationRequest) -> CoreResult<Quotation> {
        let client = self.resolve_client(&request.client_id).await?;
        let (items, totals) = self.price_items(&request.items).await?;

        let quotation = Quotation {
            id: Uuid::new_v4().to_string(),
            code: new_quotation_code(),
            client_id: client.id,
            client_name: client.name,
            quoted_at: Utc::now(),
            items,
            sub_total: totals.sub_total,
            tax: totals.tax,
            total: totals.total,
        };

        let saved = self.store.insert_quotation(&quotation).await?;

        info!(
            quotation_id = %saved.id,
            code = %saved.code,
            client_id = %saved.client_id,
            items = saved.items.len(),
            total = %saved.total,
            "Quotation created"
        );

        Ok(saved)
    }

    /// Re-validates and re-prices an existing quotation, replacing its
    /// client and items in place.
    pub async fn update(&self, id: &str, patch: QuotationPatch) -> CoreResult<Quotation> {
        let existing = self.get(id).await?;

        let client_id = patch
            .client_id
            .filter(|client_id| !client_id.is_empty())
            .unwrap_or_else(|| existing.client_id.clone());
        let requested = match patch.items {
            Some(items) => items,
            None => existing.items.iter().map(LineItemRequest::from).collect(),
        };

        let client = self.resolve_client(&client_id).await?;
        let (items, totals) = self.price_items(&requested).await?;

        let quotation = Quotation {
            client_id: client.id,
            client_name: client.name,
            items,
            sub_total: totals.sub_total,
            tax: totals.tax,
            total: totals.total,
            ..existing
        };

        let saved = self.store.replace_quotation(id, &quotation).await?;

        info!(
            quotation_id = %saved.id,
            code = %saved.code,
            items = saved.items.len(),
            total = %saved.total,
            "Quotation updated"
        );

        Ok(saved)
    }

    /// Fetches one quotation.
    pub async fn get(&self, id: &str) -> CoreResult<Quotation> {
        self.store
            .find_quotation(id)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::Quotation, id))
    }

    /// Lists quotations, newest first.
    pub async fn list(
        &self,
        filter: &QuotationFilter,
        pagination: Pagination,
    ) -> CoreResult<Vec<Quotation>> {
        let quotations = self.store.query_quotations(filter, pagination).await?;

        debug!(
            page = pagination.page,
            limit = pagination.limit,
            returned = quotations.len(),
            "Listed quotations"
        );

        Ok(quotations)
    }

    /// Deletes a quotation. Deleting a missing quotation succeeds.
    pub async fn delete(&self, id: &str) -> CoreResult<()> {
        self.store.delete_quotation(id).await?;
        info!(quotation_id = %id, "Quotation deleted");
        Ok(())
    }

    // =========================================================================
    // Validation + Pricing
    // =========================================================================

    async fn resolve_client(&self, client_id: &str) -> CoreResult<Client> {
        validate_reference("clienteId", client_id)?;

        self.store
            .find_client(client_id)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::Client, client_id))
    }

    async fn price_items(
        &self,
        requested: &[LineItemRequest],
    ) -> CoreResult<(Vec<LineItem>, QuotationTotals)> {
        if requested.is_empty() {
            return Err(ValidationError::Empty {
                field: "items".to_string(),
            }
            .into());
        }

        let mut items = Vec::with_capacity(requested.len());

        for request in requested {
            validate_reference("servicioId", &request.service_id)?;

            let service = self
                .store
                .find_service(&request.service_id)
                .await?
                .ok_or_else(|| CoreError::not_found(EntityKind::Service, &request.service_id))?;

            let quantity = validate_quantity(request.quantity)?;
            let unit_price = validate_unit_price(request.unit_price)?;
            validate_amount("totalItem", unit_price * quantity as f64)?;

            items.push(LineItem {
                service_id: service.id,
                service_name: service.name,
                unit_price,
                quantity,
                item_total: line_total(unit_price, quantity),
            });
        }

        validate_amount("subTotal", items.iter().map(|i| i.item_total.to_decimal()).sum())?;

        let totals = QuotationTotals::compute(items.iter().map(|i| i.item_total), self.tax_rate);
        Ok((items, totals))
    }
}

/// Generates a human-facing token: `COT-` plus 128 random bits in hex.
fn new_quotation_code() -> String {
    format!(
        "{}-{}",
        QUOTATION_CODE_PREFIX,
        Uuid::new_v4().simple().to_string().to_uppercase()
    )
}

/// A stored line item, requested again as-is.
impl From<&LineItem> for LineItemRequest {
    fn from(item: &LineItem) -> Self {
        LineItemRequest::new(item.service_id.clone(), item.unit_price, item.quantity as f64)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
