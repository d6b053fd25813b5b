//! # Quotation Routes
//!
//! ```text
//! POST   {base}        create      → 201 Quotation
//! GET    {base}        list        → 200 [Quotation]  (?clienteId&desde&hasta&page&limit)
//! GET    {base}/{id}   get         → 200 Quotation
//! PUT    {base}/{id}   update      → 200 Quotation
//! DELETE {base}/{id}   delete      → 200 {"message": ...}
//! ```
//!
//! All pricing and validation lives in [`cotiza_core::QuotationEngine`].

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use cotiza_core::{Quotation, QuotationPatch, QuotationQuery, QuotationRequest};

use super::Deleted;
use crate::error::ApiResult;
use crate::state::AppState;

/// Creates a quotation.
pub async fn create_quotation(
    State(state): State<AppState>,
    payload: Result<Json<QuotationRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Quotation>)> {
    let Json(request) = payload?;
    let quotation = state.quotations.create(request).await?;
    Ok((StatusCode::CREATED, Json(quotation)))
}

/// Lists quotations, newest first.
pub async fn list_quotations(
    State(state): State<AppState>,
    query: Result<Query<QuotationQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Quotation>>> {
    let Query(query) = query?;
    let (filter, pagination) = query.into_parts();
    let quotations = state.quotations.list(&filter, pagination).await?;
    Ok(Json(quotations))
}

/// Gets one quotation.
pub async fn get_quotation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Quotation>> {
    Ok(Json(state.quotations.get(&id).await?))
}

/// Re-prices a quotation with a partial body.
pub async fn update_quotation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<QuotationPatch>, JsonRejection>,
) -> ApiResult<Json<Quotation>> {
    let Json(patch) = payload?;
    Ok(Json(state.quotations.update(&id, patch).await?))
}

/// Deletes a quotation. Missing ids succeed too.
pub async fn delete_quotation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Deleted>> {
    state.quotations.delete(&id).await?;
    Ok(Json(Deleted {
        message: "Cotización eliminada",
    }))
}
