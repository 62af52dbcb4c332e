//! Health check endpoints

use axum::{extract::State, Json};
use std::collections::BTreeMap;
use tracing::debug;

use crate::{
    context::ProbeContext,
    models::{HealthCheckResult, HealthResponse, HealthStatus},
};

/// Health check endpoint
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Health status", body = HealthResponse))
))]
pub async fn health_check() -> Json<HealthResponse> {
    debug!("Health check requested");
    Json(HealthResponse::healthy())
}

/// Liveness probe endpoint
///
/// Answers as long as the runtime can schedule a handler.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/live",
    tag = "health",
    responses((status = 200, description = "Process is alive"))
))]
pub async fn liveness_check(State(ctx): State<ProbeContext>) -> Json<serde_json::Value> {
    let threads = ctx.snapshot.read_threads();

    Json(serde_json::json!({
        "status": "alive",
        "timestamp": chrono::Utc::now(),
        "threadCount": threads.thread_count,
    }))
}

/// Readiness probe endpoint
///
/// Always 200. A missing working directory degrades the status without
/// failing the probe, since only the file endpoints depend on it.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses((status = 200, description = "Readiness with per-dependency checks", body = HealthResponse))
))]
pub async fn readiness_check(State(ctx): State<ProbeContext>) -> Json<HealthResponse> {
    let mut checks = BTreeMap::new();

    let working_dir = ctx.files.working_dir().display().to_string();
    let check = if ctx.files.working_dir_exists().await {
        HealthCheckResult {
            status: HealthStatus::Healthy,
            message: format!("{} is available", working_dir),
        }
    } else {
        HealthCheckResult {
            status: HealthStatus::Degraded,
            message: format!("{} does not exist or is not a directory", working_dir),
        }
    };
    checks.insert("working_directory".to_string(), check);

    Json(HealthResponse::healthy().with_checks(checks))
}
