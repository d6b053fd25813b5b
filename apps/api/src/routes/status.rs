//! Service and database health (`/api/status`).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use cotiza_db::migrations::migration_status;

use crate::error::ApiResult;
use crate::state::AppState;

/// Health report.
///
/// ```json
/// { "status": "ok", "database": true,
///   "migrations": { "total": 1, "applied": 1 }, "version": "0.1.0" }
/// ```
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub status: &'static str,
    pub database: bool,
    pub migrations: MigrationReport,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MigrationReport {
    pub total: usize,
    pub applied: usize,
}

/// Reports 503 when the database does not answer.
pub async fn status(State(state): State<AppState>) -> ApiResult<(StatusCode, Json<StatusReport>)> {
    let database = state.db.health_check().await;

    let (total, applied) = if database {
        migration_status(state.db.pool()).await?
    } else {
        (0, 0)
    };

    let (code, status) = if database && applied >= total {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    Ok((
        code,
        Json(StatusReport {
            status,
            database,
            migrations: MigrationReport { total, applied },
            version: env!("CARGO_PKG_VERSION"),
        }),
    ))
}
