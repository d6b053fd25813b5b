//! HTTP tests for clients, services and the status route.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{seed, spawn_app};

#[tokio::test]
async fn test_client_crud() {
    let app = spawn_app().await;

    let (status, created) = app
        .post(
            "/api/clientes",
            json!({"nombreCliente": "  Zeta Ltda. ", "email": "info@zeta.com", "telefono": "555-0101"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["nombreCliente"], "Zeta Ltda.");
    assert!(created["fechaRegistro"].is_string());
    let id = created["_id"].as_str().unwrap().to_string();

    app.post(
        "/api/clientes",
        json!({"nombreCliente": "ACME S.A.", "email": "contacto@acme.com", "telefono": "6000-0000"}),
    )
    .await;

    let (status, listed) = app.get("/api/clientes").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["nombreCliente"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["ACME S.A.", "Zeta Ltda."]);

    let (status, updated) = app
        .put(&format!("/api/clientes/{id}"), json!({"telefono": "555-0199"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["telefono"], "555-0199");
    assert_eq!(updated["email"], "info@zeta.com");

    let (status, body) = app.delete(&format!("/api/clientes/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Cliente eliminado");

    let (status, err) = app.get(&format!("/api/clientes/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_client_validation() {
    let app = spawn_app().await;

    let (status, err) = app
        .post(
            "/api/clientes",
            json!({"nombreCliente": "ACME", "email": "no-es-correo", "telefono": "1"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], "INVALID_VALUE");
    assert!(err["error"].as_str().unwrap().contains("email"));

    let (status, _) = app
        .post("/api/clientes", json!({"email": "a@b.co", "telefono": "1"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_missing_client() {
    let app = spawn_app().await;

    let (status, err) = app
        .put(
            "/api/clientes/00000000-0000-4000-8000-000000000000",
            json!({"telefono": "1"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_service_crud() {
    let app = spawn_app().await;

    let (status, created) = app
        .post(
            "/api/servicios",
            json!({"nombreServicio": "Soporte Remoto", "precioBase": "20", "descripcion": "Soporte por hora vía remoto"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["precioBase"], json!(20.0));
    let id = created["_id"].as_str().unwrap().to_string();

    let (status, updated) = app
        .put(&format!("/api/servicios/{id}"), json!({"precioBase": 25}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["precioBase"], json!(25.0));
    assert_eq!(updated["descripcion"], "Soporte por hora vía remoto");

    let (status, fetched) = app.get(&format!("/api/servicios/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, updated);

    let (status, _) = app.delete(&format!("/api/servicios/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.delete(&format!("/api/servicios/{id}")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_negative_base_price_rejected() {
    let app = spawn_app().await;

    let (status, err) = app
        .post(
            "/api/servicios",
            json!({"nombreServicio": "Gratis", "precioBase": -5}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], "INVALID_VALUE");

    let (_, listed) = app.get("/api/servicios").await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_price_change_does_not_touch_existing_quotation() {
    let app = spawn_app().await;
    let s = seed(&app.db).await;

    let (_, q) = app
        .post(
            "/quotations",
            json!({
                "clienteId": s.client_id,
                "items": [{"servicioId": s.soporte_id, "precioUnitario": 20, "cantidad": 1}]
            }),
        )
        .await;

    app.put(
        &format!("/api/servicios/{}", s.soporte_id),
        json!({"nombreServicio": "Soporte Remoto Premium", "precioBase": 40}),
    )
    .await;

    let (_, fetched) = app
        .get(&format!("/quotations/{}", q["_id"].as_str().unwrap()))
        .await;
    assert_eq!(fetched["items"][0]["nombreServicio"], "Soporte Remoto");
    assert_eq!(fetched["total"], json!(21.6));
}

#[tokio::test]
async fn test_status_reports_healthy_database() {
    let app = spawn_app().await;

    let (status, body) = app.get("/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], json!(true));
    assert_eq!(body["migrations"]["total"], body["migrations"]["applied"]);
}
