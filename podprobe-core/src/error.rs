//! Core error types

use crate::simulator::SimulationKind;
use thiserror::Error;

/// Failures raised by the stress simulator
///
/// These are the visible face of a requested fault, not conditions to recover from.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Simulated crash")]
    SimulatedCrash,

    #[error("{kind} simulation could not spawn a worker after starting {started} of {requested}: {source}")]
    Spawn {
        kind: SimulationKind,
        started: u64,
        requested: u64,
        #[source]
        source: std::io::Error,
    },
}

/// Failure of a single read-only cloud call
#[derive(Debug, Error)]
pub enum CloudError {
    #[error("{operation} failed: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },
}

impl CloudError {
    pub fn request(operation: &'static str, message: impl Into<String>) -> Self {
        CloudError::Request {
            operation,
            message: message.into(),
        }
    }

    /// Underlying message, without the operation prefix
    pub fn details(&self) -> &str {
        match self {
            CloudError::Request { message, .. } => message,
        }
    }
}

/// Failure writing a probe file
#[derive(Debug, Error)]
pub enum FilesystemError {
    #[error("File exists but is read-only")]
    ReadOnly(#[source] std::io::Error),

    #[error("I/O error occurred")]
    Io(#[source] std::io::Error),
}

impl FilesystemError {
    /// Short classification reported as `error`
    pub fn classification(&self) -> String {
        self.to_string()
    }

    /// Message of the underlying I/O error, reported as `details`
    pub fn details(&self) -> String {
        match self {
            FilesystemError::ReadOnly(source) | FilesystemError::Io(source) => source.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_error_details_drop_operation() {
        let err = CloudError::request("ListBuckets", "access denied");
        assert_eq!(err.details(), "access denied");
        assert_eq!(err.to_string(), "ListBuckets failed: access denied");
    }

    #[test]
    fn test_filesystem_error_classification() {
        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = FilesystemError::ReadOnly(denied);
        assert_eq!(err.classification(), "File exists but is read-only");
        assert_eq!(err.details(), "denied");
    }
}
