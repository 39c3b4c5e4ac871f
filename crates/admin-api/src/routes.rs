//! Routes:
//! - POST /admin/ingestion/daily
//! - POST /admin/ingestion/{category}
//! - GET  /admin/ingestion/status
//! - GET  /admin/index/{id}
//! - GET  /health

use crate::{
    AppState,
    error::{AppError, Result},
};
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use engine_core::metrics::MetricsSnapshot;
use model::{
    execution::{
        report::{RunReport, RunStatus},
        stats::ReconciliationStats,
    },
    index::state::IndexedState,
    tender::category::{Category, UnknownCategory},
};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub running: bool,
    pub metrics: MetricsSnapshot,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/admin/ingestion/daily", post(run_daily))
        .route("/admin/ingestion/status", get(ingestion_status))
        .route("/admin/ingestion/{category}", post(ingest_category))
        .route("/admin/index/{id}", get(lookup_document))
        .route("/health", get(health))
        .with_state(state)
}

/// Stats are returned as-is; an error status maps to 500 with the same body.
async fn ingest_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<(StatusCode, Json<ReconciliationStats>)> {
    let category: Category = category
        .parse()
        .map_err(|e: UnknownCategory| AppError::BadRequest(e.to_string()))?;

    info!(category = %category, "Ingestion triggered");
    let stats = state.engine.sync_category(category).await;

    let status = if stats.is_error() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };
    Ok((status, Json(stats)))
}

async fn run_daily(State(state): State<AppState>) -> Result<(StatusCode, Json<RunReport>)> {
    let report = state.engine.run_sequence().await.map_err(|e| {
        warn!(error = %e, "Daily run not started");
        AppError::from(e)
    })?;

    let status = match report.status {
        RunStatus::Error => StatusCode::INTERNAL_SERVER_ERROR,
        RunStatus::Ok | RunStatus::PartialError => StatusCode::OK,
    };
    Ok((status, Json(report)))
}

async fn ingestion_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: state.engine.is_running(),
        metrics: state.engine.metrics(),
    })
}

async fn lookup_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<IndexedState>> {
    state
        .engine
        .lookup(&id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("tender {id} is not indexed")))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
