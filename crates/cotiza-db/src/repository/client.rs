//! # Client Repository
//!
//! Database operations for clients.
//!
//! Quotations copy the client name when they are priced, so nothing here
//! touches the `quotations` table: renaming or deleting a client leaves
//! existing quotations as they were.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use super::timestamp;
use crate::error::{DbError, DbResult};
use cotiza_core::{Client, ClientPatch, EntityKind, NewClient};

/// Row shape of the `clients` table.
#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: String,
    name: String,
    email: String,
    phone: String,
    registered_at: DateTime<Utc>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            registered_at: row.registered_at,
        }
    }
}

/// Repository for client database operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ClientRepository { pool }
    }

    /// Lists all clients sorted by name.
    pub async fn list(&self) -> DbResult<Vec<Client>> {
        let rows: Vec<ClientRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, phone, registered_at
            FROM clients
            ORDER BY name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed clients");
        Ok(rows.into_iter().map(Client::from).collect())
    }

    /// Gets a client by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Client))` - Client found
    /// * `Ok(None)` - Client not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Client>> {
        let row: Option<ClientRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, phone, registered_at
            FROM clients
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Client::from))
    }

    /// Inserts a new client. The ID and registration time are generated here.
    ///
    /// The payload must already be validated.
    pub async fn insert(&self, new: &NewClient) -> DbResult<Client> {
        let client = Client {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            email: new.email.trim().to_string(),
            phone: new.phone.trim().to_string(),
            registered_at: Utc::now(),
        };

        debug!(id = %client.id, name = %client.name, "Inserting client");

        sqlx::query(
            r#"
            INSERT INTO clients (id, name, email, phone, registered_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&client.id)
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(timestamp(&client.registered_at))
        .execute(&self.pool)
        .await?;

        Ok(client)
    }

    /// Applies a partial update. The patch must already be validated.
    ///
    /// ## Returns
    /// * `Ok(Client)` - The updated client
    /// * `Err(DbError::NotFound)` - No client with this ID
    pub async fn update(&self, id: &str, patch: ClientPatch) -> DbResult<Client> {
        let mut client = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found(EntityKind::Client, id))?;

        patch.apply(&mut client);

        debug!(id = %id, "Updating client");

        let result = sqlx::query(
            r#"
            UPDATE clients
            SET name = ?2, email = ?3, phone = ?4
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.phone)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(EntityKind::Client, id));
        }

        Ok(client)
    }

    /// Deletes a client.
    ///
    /// ## Returns
    /// `true` if a row was removed. Deleting a missing client is not an error.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(id = %id, deleted = result.rows_affected(), "Deleted client");
        Ok(result.rows_affected() > 0)
    }

    /// Counts all clients.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Deletes every client. Used by the seed program.
    pub async fn delete_all(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM clients")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn new_client(name: &str) -> NewClient {
        NewClient {
            name: name.to_string(),
            email: "contacto@acme.com".to_string(),
            phone: "6000-0000".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = setup().await;
        let created = db.clients().insert(&new_client("  ACME S.A. ")).await.unwrap();

        assert_eq!(created.name, "ACME S.A.");

        let fetched = db.clients().get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let db = setup().await;
        assert!(db.clients().get_by_id("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let db = setup().await;
        db.clients().insert(&new_client("Zeta")).await.unwrap();
        db.clients().insert(&new_client("ACME S.A.")).await.unwrap();
        db.clients().insert(&new_client("Globex")).await.unwrap();

        let names: Vec<String> = db
            .clients()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["ACME S.A.", "Globex", "Zeta"]);
    }

    #[tokio::test]
    async fn test_update_patches_fields() {
        let db = setup().await;
        let created = db.clients().insert(&new_client("ACME S.A.")).await.unwrap();

        let patch = ClientPatch {
            phone: Some("6111-1111".to_string()),
            ..Default::default()
        };
        let updated = db.clients().update(&created.id, patch).await.unwrap();

        assert_eq!(updated.phone, "6111-1111");
        assert_eq!(updated.name, "ACME S.A.");
        assert_eq!(updated.registered_at, created.registered_at);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let db = setup().await;
        let err = db
            .clients()
            .update("missing", ClientPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let db = setup().await;
        let created = db.clients().insert(&new_client("ACME S.A.")).await.unwrap();

        assert!(db.clients().delete(&created.id).await.unwrap());
        assert!(!db.clients().delete(&created.id).await.unwrap());
        assert_eq!(db.clients().count().await.unwrap(), 0);
    }
}
