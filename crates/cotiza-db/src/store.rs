//! # QuotationStore Implementation
//!
//! Plugs the SQLite repositories into the pricing engine.
//!
//! ```text
//! QuotationEngine ──► dyn QuotationStore ──► Database
//!                                             ├── clients()     find_client
//!                                             ├── services()    find_service
//!                                             └── quotations()  find / insert / replace
//!                                                               delete / query
//! ```

use async_trait::async_trait;

use crate::pool::Database;
use cotiza_core::{
    Client, Pagination, Quotation, QuotationFilter, QuotationStore, Service, StoreResult,
};

#[async_trait]
impl QuotationStore for Database {
    async fn find_client(&self, id: &str) -> StoreResult<Option<Client>> {
        Ok(self.clients().get_by_id(id).await?)
    }

    async fn find_service(&self, id: &str) -> StoreResult<Option<Service>> {
        Ok(self.services().get_by_id(id).await?)
    }

    async fn find_quotation(&self, id: &str) -> StoreResult<Option<Quotation>> {
        Ok(self.quotations().get_by_id(id).await?)
    }

    async fn insert_quotation(&self, quotation: &Quotation) -> StoreResult<Quotation> {
        self.quotations().insert(quotation).await?;
        Ok(quotation.clone())
    }

    async fn replace_quotation(&self, id: &str, quotation: &Quotation) -> StoreResult<Quotation> {
        self.quotations().replace(id, quotation).await?;
        Ok(quotation.clone())
    }

    async fn delete_quotation(&self, id: &str) -> StoreResult<()> {
        self.quotations().delete(id).await?;
        Ok(())
    }

    async fn query_quotations(
        &self,
        filter: &QuotationFilter,
        pagination: Pagination,
    ) -> StoreResult<Vec<Quotation>> {
        Ok(self.quotations().query(filter, pagination).await?)
    }
}

// =============================================================================
// Engine Integration Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbConfig;
    use cotiza_core::{
        ErrorKind, LineItemRequest, Money, NewClient, NewService, QuotationEngine,
        QuotationPatch, QuotationRequest,
    };

    struct Fixture {
        engine: QuotationEngine<Database>,
        client_id: String,
        formateo_id: String,
        soporte_id: String,
    }

    async fn setup() -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let client = db
            .clients()
            .insert(&NewClient {
                name: "ACME S.A.".to_string(),
                email: "contacto@acme.com".to_string(),
                phone: "6000-0000".to_string(),
            })
            .await
            .unwrap();
        let formateo = db
            .services()
            .insert(&NewService {
                name: "Formateo e Instalación SO".to_string(),
                base_price: 50.0,
                description: None,
            })
            .await
            .unwrap();
        let soporte = db
            .services()
            .insert(&NewService {
                name: "Soporte Remoto".to_string(),
                base_price: 20.0,
                description: None,
            })
            .await
            .unwrap();

        Fixture {
            engine: QuotationEngine::new(db),
            client_id: client.id,
            formateo_id: formateo.id,
            soporte_id: soporte.id,
        }
    }

    fn reference_request(f: &Fixture) -> QuotationRequest {
        QuotationRequest {
            client_id: f.client_id.clone(),
            items: vec![
                LineItemRequest::new(f.formateo_id.clone(), 50.0, 2.0),
                LineItemRequest::new(f.soporte_id.clone(), 20.0, 1.0),
            ],
        }
    }

    #[tokio::test]
    async fn test_create_persists_priced_quotation() {
        let f = setup().await;
        let created = f.engine.create(reference_request(&f)).await.unwrap();

        let stored = f.engine.get(&created.id).await.unwrap();
        assert_eq!(stored, created);
        assert_eq!(stored.sub_total, Money::from_cents(12000));
        assert_eq!(stored.tax, Money::from_cents(960));
        assert_eq!(stored.total, Money::from_cents(12960));
        assert_eq!(stored.items[0].service_name, "Formateo e Instalación SO");
    }

    #[tokio::test]
    async fn test_rejected_create_writes_nothing() {
        let f = setup().await;
        let mut request = reference_request(&f);
        request.items[1].quantity = 0.0;

        let err = f.engine.create(request).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(f.engine.store().quotations().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_snapshot_survives_client_and_service_changes() {
        let f = setup().await;
        let created = f.engine.create(reference_request(&f)).await.unwrap();

        let db = f.engine.store();
        db.clients().delete(&f.client_id).await.unwrap();
        db.services().delete(&f.soporte_id).await.unwrap();

        let stored = f.engine.get(&created.id).await.unwrap();
        assert_eq!(stored.client_name, "ACME S.A.");
        assert_eq!(stored.items[1].service_name, "Soporte Remoto");

        // Re-pricing now fails because the client is gone
        let err = f
            .engine
            .update(&created.id, QuotationPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_without_items_matches_prior_totals() {
        let f = setup().await;
        let created = f.engine.create(reference_request(&f)).await.unwrap();

        let updated = f
            .engine
            .update(&created.id, QuotationPatch::default())
            .await
            .unwrap();
        assert_eq!(updated.total, created.total);

        let stored = f.engine.get(&created.id).await.unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_delete_missing_succeeds() {
        let f = setup().await;
        f.engine
            .delete("00000000-0000-4000-8000-000000000000")
            .await
            .unwrap();
    }
}
