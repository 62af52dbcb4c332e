//! Working directory listing and probe file writes
//!
//! Failures are part of the JSON body and always answer 200.

use axum::{extract::State, Json};
use podprobe_core::{DirectoryListing, ProbeWrite};

use crate::context::ProbeContext;

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/env/listfiles",
    tag = "env",
    summary = "List files in the working directory",
    responses((status = 200, description = "Sorted listing, or an {error, details} pair"))
))]
pub async fn list_files(State(ctx): State<ProbeContext>) -> Json<DirectoryListing> {
    Json(ctx.files.list_working_directory().await)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/env/writefiles",
    tag = "env",
    summary = "Write a timestamped probe file into the working directory",
    responses((status = 200, description = "Written file name, or an {error, details} pair"))
))]
pub async fn write_file(State(ctx): State<ProbeContext>) -> Json<ProbeWrite> {
    Json(ctx.files.write_probe_file().await)
}
