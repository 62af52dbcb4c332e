//! REST API specific error types and conversions

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use podprobe_core::SimulationError;
use podprobe_web::WebError;
use serde_json::json;
use thiserror::Error;

/// REST API specific error type
///
/// Operational failures of the cloud gateway and the filesystem probe are
/// reported in-band and never reach this type.
#[derive(Error, Debug)]
pub enum RestError {
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Web(#[from] WebError),
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

impl RestError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        RestError::Web(WebError::bad_request(message))
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        RestError::Web(WebError::internal(message))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::Simulation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::Web(web_err) => web_err.status_code(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RestError::Simulation(SimulationError::SimulatedCrash) => "SIMULATED_CRASH",
            RestError::Simulation(SimulationError::Spawn { .. }) => "SIMULATION_FAILED",
            RestError::Web(web_err) => web_err.error_code(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "status": status.as_u16()
            }
        });
        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_crash_is_server_error() {
        let err = RestError::from(SimulationError::SimulatedCrash);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "SIMULATED_CRASH");
        assert_eq!(err.to_string(), "Simulated crash");
    }

    #[test]
    fn test_bad_request_goes_through_web_error() {
        let err = RestError::bad_request("Missing required query parameter 'key'");
        assert!(matches!(err, RestError::Web(WebError::BadRequest { .. })));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "BAD_REQUEST");
        assert_eq!(
            err.to_string(),
            "Bad request: Missing required query parameter 'key'"
        );
    }

    #[test]
    fn test_internal_error_keeps_its_status() {
        let err = RestError::internal_error("task join failed");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }
}
