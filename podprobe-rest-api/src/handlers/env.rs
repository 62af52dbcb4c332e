//! Pod identity and process counters

use axum::{extract::State, Json};
use podprobe_core::{PodIdentity, ResourceStats, ThreadStats};

use crate::context::ProbeContext;

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/env/info",
    tag = "env",
    summary = "Get container and pod info",
    responses((status = 200, description = "Pod identity with a fresh run id"))
))]
pub async fn get_pod_info(State(ctx): State<ProbeContext>) -> Json<PodIdentity> {
    Json(ctx.snapshot.read_identity())
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/env/resources",
    tag = "env",
    summary = "Get process and memory metrics",
    responses((status = 200, description = "Memory, processor and resident set figures"))
))]
pub async fn get_resources(State(ctx): State<ProbeContext>) -> Json<ResourceStats> {
    Json(ctx.snapshot.read_resources())
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/env/threads",
    tag = "env",
    summary = "Get current thread count",
    responses((status = 200, description = "Live and peak thread counts"))
))]
pub async fn get_threads(State(ctx): State<ProbeContext>) -> Json<ThreadStats> {
    Json(ctx.snapshot.read_threads())
}
