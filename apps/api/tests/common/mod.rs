//! Shared helpers for the HTTP tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use cotiza_api::{build_router, AppState};
use cotiza_core::{NewClient, NewService};
use cotiza_db::{Database, DbConfig};

pub struct TestApp {
    pub router: Router,
    pub db: Database,
}

/// Router over a fresh in-memory database.
pub async fn spawn_app() -> TestApp {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    TestApp {
        router: build_router(AppState::new(db.clone()), true),
        db,
    }
}

/// Catalog used by the quotation tests.
pub struct Seeded {
    pub client_id: String,
    pub formateo_id: String,
    pub soporte_id: String,
}

pub async fn seed(db: &Database) -> Seeded {
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

    Seeded {
        client_id: client.id,
        formateo_id: formateo.id,
        soporte_id: soporte.id,
    }
}

impl TestApp {
    /// Sends a request and decodes the JSON response (`Null` if empty).
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = match body {
            Some(json) => Body::from(json.to_string()),
            None => Body::empty(),
        };
        self.send_raw(method, uri, body).await
    }

    pub async fn send_raw(&self, method: Method, uri: &str, body: Body) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }
}
