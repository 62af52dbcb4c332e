//! Fault injection endpoints
//!
//! Acknowledgements are plain text. `crash` answers 500 on purpose and
//! `timeout` holds the request for the whole duration.

use axum::extract::{Query, State};

use crate::{
    context::ProbeContext,
    errors::{RestError, RestResult},
    models::{CpuQuery, MemoryQuery, ThreadsQuery, TimeoutQuery},
};

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/simulate/cpu",
    tag = "simulate",
    summary = "Simulate CPU load",
    params(("durationSeconds" = Option<i64>, Query, description = "Burn duration in seconds")),
    responses((status = 200, description = "Plain-text acknowledgement", body = String))
))]
pub async fn simulate_cpu(
    State(ctx): State<ProbeContext>,
    Query(query): Query<CpuQuery>,
) -> RestResult<String> {
    Ok(ctx.simulator.cpu(query.duration_seconds)?)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/simulate/memory",
    tag = "simulate",
    summary = "Simulate memory leak",
    params(("megabytes" = Option<i64>, Query, description = "Megabytes to allocate and retain")),
    responses((status = 200, description = "Plain-text acknowledgement", body = String))
))]
/// Allocation runs on the blocking pool since it completes before the response
pub async fn simulate_memory(
    State(ctx): State<ProbeContext>,
    Query(query): Query<MemoryQuery>,
) -> RestResult<String> {
    let simulator = ctx.simulator.clone();
    tokio::task::spawn_blocking(move || simulator.memory(query.megabytes))
        .await
        .map_err(|e| RestError::internal_error(e.to_string()))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/simulate/threads",
    tag = "simulate",
    summary = "Spawn multiple threads",
    params(("count" = Option<i64>, Query, description = "Number of parked threads")),
    responses(
        (status = 200, description = "Plain-text acknowledgement", body = String),
        (status = 500, description = "The OS refused to spawn a thread")
    )
))]
pub async fn simulate_threads(
    State(ctx): State<ProbeContext>,
    Query(query): Query<ThreadsQuery>,
) -> RestResult<String> {
    Ok(ctx.simulator.threads(query.count)?)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/simulate/crash",
    tag = "simulate",
    summary = "Force a simulated crash",
    responses((status = 500, description = "Always fails with SIMULATED_CRASH"))
))]
pub async fn simulate_crash(State(ctx): State<ProbeContext>) -> RestResult<String> {
    Ok(ctx.simulator.crash()?)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/simulate/exit",
    tag = "simulate",
    summary = "Exit the process to simulate a crash loop",
    responses((status = 200, description = "Acknowledged before the process exits", body = String))
))]
pub async fn simulate_exit(State(ctx): State<ProbeContext>) -> RestResult<String> {
    Ok(ctx.simulator.exit()?)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/simulate/timeout",
    tag = "simulate",
    summary = "Simulate a long request",
    params(("seconds" = Option<i64>, Query, description = "Seconds to hold the request")),
    responses((status = 200, description = "Sent after the full duration", body = String))
))]
pub async fn simulate_timeout(
    State(ctx): State<ProbeContext>,
    Query(query): Query<TimeoutQuery>,
) -> String {
    ctx.simulator.timeout(query.seconds).await
}
