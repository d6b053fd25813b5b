//! # Quotation Repository
//!
//! Database operations for quotations and their line items.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quotations                          quotation_items                    │
//! │  ┌───────────────────────────┐       ┌──────────────────────────────┐   │
//! │  │ id (PK)                   │◄──────│ quotation_id  ON DELETE CASC │   │
//! │  │ code (UNIQUE)  COT-…      │   1:N │ position      0, 1, 2 …      │   │
//! │  │ client_id, client_name    │       │ service_id, service_name     │   │
//! │  │ quoted_at                 │       │ unit_price, quantity         │   │
//! │  │ sub_total/tax/total_cents │       │ item_total_cents             │   │
//! │  └───────────────────────────┘       └──────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Header and items are always written in one transaction, so a reader
//! never sees a quotation with half of its items.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};
use std::collections::HashMap;
use tracing::debug;

use super::timestamp;
use crate::error::{DbError, DbResult};
use cotiza_core::{EntityKind, LineItem, Money, Pagination, Quotation, QuotationFilter};

const SELECT_QUOTATIONS: &str = r#"
    SELECT id, code, client_id, client_name, quoted_at,
           sub_total_cents, tax_cents, total_cents
    FROM quotations
"#;

// =============================================================================
// Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct QuotationRow {
    id: String,
    code: String,
    client_id: String,
    client_name: String,
    quoted_at: DateTime<Utc>,
    sub_total_cents: i64,
    tax_cents: i64,
    total_cents: i64,
}

impl QuotationRow {
    fn into_quotation(self, items: Vec<LineItem>) -> Quotation {
        Quotation {
            id: self.id,
            code: self.code,
            client_id: self.client_id,
            client_name: self.client_name,
            quoted_at: self.quoted_at,
            items,
            sub_total: Money::from_cents(self.sub_total_cents),
            tax: Money::from_cents(self.tax_cents),
            total: Money::from_cents(self.total_cents),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LineItemRow {
    quotation_id: String,
    service_id: String,
    service_name: String,
    unit_price: f64,
    quantity: i64,
    item_total_cents: i64,
}

impl From<LineItemRow> for LineItem {
    fn from(row: LineItemRow) -> Self {
        LineItem {
            service_id: row.service_id,
            service_name: row.service_name,
            unit_price: row.unit_price,
            quantity: row.quantity,
            item_total: Money::from_cents(row.item_total_cents),
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for quotation database operations.
#[derive(Debug, Clone)]
pub struct QuotationRepository {
    pool: SqlitePool,
}

impl QuotationRepository {
    /// Creates a new QuotationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        QuotationRepository { pool }
    }

    /// Gets a quotation with its items.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Quotation>> {
        let row: Option<QuotationRow> =
            sqlx::query_as(&format!("{SELECT_QUOTATIONS} WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut items = self.load_items(&[row.id.clone()]).await?;
        let quotation_items = items.remove(&row.id).unwrap_or_default();
        Ok(Some(row.into_quotation(quotation_items)))
    }

    /// Inserts a fully priced quotation.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - the id or code already exists
    pub async fn insert(&self, quotation: &Quotation) -> DbResult<()> {
        debug!(id = %quotation.id, code = %quotation.code, "Inserting quotation");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO quotations (
                id, code, client_id, client_name, quoted_at,
                sub_total_cents, tax_cents, total_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&quotation.id)
        .bind(&quotation.code)
        .bind(&quotation.client_id)
        .bind(&quotation.client_name)
        .bind(timestamp(&quotation.quoted_at))
        .bind(quotation.sub_total.cents())
        .bind(quotation.tax.cents())
        .bind(quotation.total.cents())
        .execute(&mut *tx)
        .await?;

        insert_items(&mut tx, &quotation.id, &quotation.items).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Overwrites client, items and totals of an existing quotation.
    ///
    /// `code` and `quoted_at` are never rewritten.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - no quotation with this ID
    pub async fn replace(&self, id: &str, quotation: &Quotation) -> DbResult<()> {
        debug!(id = %id, items = quotation.items.len(), "Replacing quotation");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE quotations
            SET client_id = ?2,
                client_name = ?3,
                sub_total_cents = ?4,
                tax_cents = ?5,
                total_cents = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&quotation.client_id)
        .bind(&quotation.client_name)
        .bind(quotation.sub_total.cents())
        .bind(quotation.tax.cents())
        .bind(quotation.total.cents())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls it back
            return Err(DbError::not_found(EntityKind::Quotation, id));
        }

        sqlx::query("DELETE FROM quotation_items WHERE quotation_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        insert_items(&mut tx, id, &quotation.items).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Deletes a quotation and its items. Returns `true` if a row was removed.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM quotations WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(id = %id, deleted = result.rows_affected(), "Deleted quotation");
        Ok(result.rows_affected() > 0)
    }

    /// Lists quotations matching `filter`, newest first, one page at a time.
    ///
    /// ## Query Shape
    /// ```text
    /// SELECT … FROM quotations
    /// WHERE 1 = 1
    ///   [AND client_id = ?]        clienteId
    ///   [AND quoted_at >= ?]       desde
    ///   [AND quoted_at <= ?]       hasta
    /// ORDER BY quoted_at DESC
    /// LIMIT ? OFFSET ?
    ///
    /// then: SELECT … FROM quotation_items WHERE quotation_id IN (…)
    /// ```
    pub async fn query(
        &self,
        filter: &QuotationFilter,
        pagination: Pagination,
    ) -> DbResult<Vec<Quotation>> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_QUOTATIONS);
        builder.push(" WHERE 1 = 1");

        if let Some(client_id) = &filter.client_id {
            builder.push(" AND client_id = ").push_bind(client_id.clone());
        }
        if let Some(from) = &filter.from {
            builder.push(" AND quoted_at >= ").push_bind(timestamp(from));
        }
        if let Some(to) = &filter.to {
            builder.push(" AND quoted_at <= ").push_bind(timestamp(to));
        }

        builder
            .push(" ORDER BY quoted_at DESC, rowid DESC LIMIT ")
            .push_bind(i64::from(pagination.limit))
            .push(" OFFSET ")
            .push_bind(pagination.offset() as i64);

        let rows: Vec<QuotationRow> = builder.build_query_as().fetch_all(&self.pool).await?;

        debug!(
            count = rows.len(),
            page = pagination.page,
            limit = pagination.limit,
            "Queried quotations"
        );

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
        let mut items = self.load_items(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let quotation_items = items.remove(&row.id).unwrap_or_default();
                row.into_quotation(quotation_items)
            })
            .collect())
    }

    /// Counts all quotations.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quotations")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Loads the items of several quotations in one query, grouped by
    /// quotation and kept in position order.
    async fn load_items(&self, quotation_ids: &[String]) -> DbResult<HashMap<String, Vec<LineItem>>> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT quotation_id, service_id, service_name,
                   unit_price, quantity, item_total_cents
            FROM quotation_items
            WHERE quotation_id IN (
            "#,
        );

        let mut separated = builder.separated(", ");
        for id in quotation_ids {
            separated.push_bind(id.clone());
        }
        separated.push_unseparated(") ORDER BY quotation_id, position");

        let rows: Vec<LineItemRow> = builder.build_query_as().fetch_all(&self.pool).await?;

        let mut grouped: HashMap<String, Vec<LineItem>> = HashMap::new();
        for row in rows {
            grouped
                .entry(row.quotation_id.clone())
                .or_default()
                .push(LineItem::from(row));
        }

        Ok(grouped)
    }
}

/// Writes `items` under `quotation_id`, numbering positions from 0.
async fn insert_items(
    tx: &mut Transaction<'_, Sqlite>,
    quotation_id: &str,
    items: &[LineItem],
) -> DbResult<()> {
    for (position, item) in items.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO quotation_items (
                quotation_id, position, service_id, service_name,
                unit_price, quantity, item_total_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(quotation_id)
        .bind(position as i64)
        .bind(&item.service_id)
        .bind(&item.service_name)
        .bind(item.unit_price)
        .bind(item.quantity)
        .bind(item.item_total.cents())
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
