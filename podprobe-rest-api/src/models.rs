//! Request and response types that exist only at the HTTP boundary

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// `?durationSeconds=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuQuery {
    pub duration_seconds: Option<i64>,
}

/// `?megabytes=`
#[derive(Debug, Default, Deserialize)]
pub struct MemoryQuery {
    pub megabytes: Option<i64>,
}

/// `?count=`
#[derive(Debug, Default, Deserialize)]
pub struct ThreadsQuery {
    pub count: Option<i64>,
}

/// `?seconds=`
#[derive(Debug, Default, Deserialize)]
pub struct TimeoutQuery {
    pub seconds: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ObjectsQuery {
    #[serde(default)]
    pub prefix: String,
}

/// Both fields are required; they are optional here so a missing one becomes
/// a JSON error instead of a plain-text rejection
#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    pub bucket: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MessageResponse {
    pub message: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<BTreeMap<String, HealthCheckResult>>,
}

/// Individual health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct HealthCheckResult {
    pub status: HealthStatus,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            checks: None,
        }
    }

    /// Attach checks; any degraded check degrades the whole response
    pub fn with_checks(mut self, checks: BTreeMap<String, HealthCheckResult>) -> Self {
        let degraded = checks
            .values()
            .any(|check| check.status == HealthStatus::Degraded);
        self.status = if degraded { "degraded" } else { "healthy" }.to_string();
        self.checks = Some(checks);
        self
    }
}

/// `GET /` service descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ServiceDescriptor {
    pub name: String,
    pub version: String,
    pub api_prefix: String,
    pub endpoints: BTreeMap<String, Vec<String>>,
}
