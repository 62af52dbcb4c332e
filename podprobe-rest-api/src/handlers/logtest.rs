//! Emit one line per severity so operators can check log routing

use axum::Json;
use podprobe_web::RequestId;
use tracing::{debug, error, info, trace, warn};

use crate::models::MessageResponse;

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/env/logtest",
    tag = "env",
    summary = "Generate sample log messages of various levels",
    responses((status = 200, description = "Log lines emitted", body = MessageResponse))
))]
/// Every line carries the request id so the batch can be found in aggregated logs
pub async fn log_test(request_id: RequestId) -> Json<MessageResponse> {
    trace!(%request_id, "This is a TRACE log message - very fine-grained");
    debug!(%request_id, "This is a DEBUG log message - useful for debugging");
    info!(%request_id, "This is an INFO log message - general operational info");
    warn!(%request_id, "This is a WARN log message - something unexpected but not broken");
    error!(%request_id, "This is an ERROR log message - something went wrong");

    // Raw stream writes, bypassing the subscriber
    println!("This is a direct stdout message ({})", request_id);
    eprintln!("This is a direct stderr message ({})", request_id);

    Json(MessageResponse {
        message: "Log messages emitted. Check application logs.".to_string(),
    })
}
