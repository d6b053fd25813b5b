//! Service catalog routes (`/api/servicios`).

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use cotiza_core::{NewService, Service, ServicePatch};

use super::Deleted;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub async fn create_service(
    State(state): State<AppState>,
    payload: Result<Json<NewService>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Service>)> {
    let Json(new) = payload?;
    new.validate()?;

    let service = state.db.services().insert(&new).await?;
    info!(service_id = %service.id, name = %service.name, "Service created");
    Ok((StatusCode::CREATED, Json(service)))
}

pub async fn list_services(State(state): State<AppState>) -> ApiResult<Json<Vec<Service>>> {
    Ok(Json(state.db.services().list().await?))
}

pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Service>> {
    state
        .db
        .services()
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Service", &id))
}

/// Price changes apply to future quotations only.
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ServicePatch>, JsonRejection>,
) -> ApiResult<Json<Service>> {
    let Json(patch) = payload?;
    patch.validate()?;

    let service = state.db.services().update(&id, patch).await?;
    info!(service_id = %id, "Service updated");
    Ok(Json(service))
}

pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Deleted>> {
    if state.db.services().delete(&id).await? {
        info!(service_id = %id, "Service deleted");
    }
    Ok(Json(Deleted {
        message: "Servicio eliminado",
    }))
}
