//! # Service Repository
//!
//! Database operations for the service catalog.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use cotiza_core::{EntityKind, NewService, Service, ServicePatch};

/// Row shape of the `services` table.
#[derive(Debug, sqlx::FromRow)]
struct ServiceRow {
    id: String,
    name: String,
    base_price: f64,
    description: Option<String>,
}

impl From<ServiceRow> for Service {
    fn from(row: ServiceRow) -> Self {
        Service {
            id: row.id,
            name: row.name,
            base_price: row.base_price,
            description: row.description,
        }
    }
}

/// Repository for service catalog operations.
#[derive(Debug, Clone)]
pub struct ServiceRepository {
    pool: SqlitePool,
}

impl ServiceRepository {
    /// Creates a new ServiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ServiceRepository { pool }
    }

    /// Lists the whole catalog sorted by name.
    pub async fn list(&self) -> DbResult<Vec<Service>> {
        let rows: Vec<ServiceRow> = sqlx::query_as(
            r#"
            SELECT id, name, base_price, description
            FROM services
            ORDER BY name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed services");
        Ok(rows.into_iter().map(Service::from).collect())
    }

    /// Gets a service by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Service>> {
        let row: Option<ServiceRow> = sqlx::query_as(
            r#"
            SELECT id, name, base_price, description
            FROM services
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Service::from))
    }

    /// Inserts a new service. The payload must already be validated.
    pub async fn insert(&self, new: &NewService) -> DbResult<Service> {
        let service = Service {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            base_price: new.base_price,
            description: new.description.clone(),
        };

        debug!(id = %service.id, name = %service.name, "Inserting service");

        sqlx::query(
            r#"
            INSERT INTO services (id, name, base_price, description)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&service.id)
        .bind(&service.name)
        .bind(service.base_price)
        .bind(&service.description)
        .execute(&self.pool)
        .await?;

        Ok(service)
    }

    /// Applies a partial update. The patch must already be validated.
    ///
    /// Existing quotations keep the name and price they were priced with.
    pub async fn update(&self, id: &str, patch: ServicePatch) -> DbResult<Service> {
        let mut service = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found(EntityKind::Service, id))?;

        patch.apply(&mut service);

        debug!(id = %id, "Updating service");

        let result = sqlx::query(
            r#"
            UPDATE services
            SET name = ?2, base_price = ?3, description = ?4
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&service.name)
        .bind(service.base_price)
        .bind(&service.description)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(EntityKind::Service, id));
        }

        Ok(service)
    }

    /// Deletes a service. Returns `true` if a row was removed.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM services WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(id = %id, deleted = result.rows_affected(), "Deleted service");
        Ok(result.rows_affected() > 0)
    }

    /// Counts the catalog.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM services")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Deletes the whole catalog. Used by the seed program.
    pub async fn delete_all(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM services")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
