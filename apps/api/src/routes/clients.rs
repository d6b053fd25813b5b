//! Client CRUD routes (`/api/clientes`).

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use cotiza_core::{Client, ClientPatch, NewClient};

use super::Deleted;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub async fn create_client(
    State(state): State<AppState>,
    payload: Result<Json<NewClient>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Client>)> {
    let Json(new) = payload?;
    new.validate()?;

    let client = state.db.clients().insert(&new).await?;
    info!(client_id = %client.id, "Client created");
    Ok((StatusCode::CREATED, Json(client)))
}

pub async fn list_clients(State(state): State<AppState>) -> ApiResult<Json<Vec<Client>>> {
    Ok(Json(state.db.clients().list().await?))
}

pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Client>> {
    state
        .db
        .clients()
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Client", &id))
}

pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ClientPatch>, JsonRejection>,
) -> ApiResult<Json<Client>> {
    let Json(patch) = payload?;
    patch.validate()?;

    let client = state.db.clients().update(&id, patch).await?;
    info!(client_id = %id, "Client updated");
    Ok(Json(client))
}

/// Existing quotations keep their snapshot of the client's name.
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Deleted>> {
    if state.db.clients().delete(&id).await? {
        info!(client_id = %id, "Client deleted");
    }
    Ok(Json(Deleted {
        message: "Cliente eliminado",
    }))
}
