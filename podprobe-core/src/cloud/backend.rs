//! Backend seam for the read-only cloud calls

use crate::error::CloudError;
use async_trait::async_trait;

/// Who the ambient credentials belong to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerIdentity {
    pub account: Option<String>,
    pub arn: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    pub key: String,
    pub size: i64,
    /// ISO-8601, when the service reports it
    pub last_modified: Option<String>,
}

/// First page of an object listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectPage {
    pub objects: Vec<ObjectSummary>,
    /// More objects exist beyond this page
    pub is_truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectBody {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Read-only cloud operations scoped to a region and ambient credentials.
///
/// Implementations make exactly one attempt per call and must not keep
/// clients alive between calls.
#[async_trait]
pub trait CloudBackend: Send + Sync {
    async fn caller_identity(&self, region: &str) -> Result<CallerIdentity, CloudError>;

    /// Every table name visible in `region`
    async fn list_tables(&self, region: &str) -> Result<Vec<String>, CloudError>;

    async fn list_buckets(&self, region: &str) -> Result<Vec<String>, CloudError>;

    /// First page only; no continuation
    async fn list_objects(
        &self,
        region: &str,
        bucket: &str,
        prefix: &str,
    ) -> Result<ObjectPage, CloudError>;

    async fn get_object(&self, region: &str, bucket: &str, key: &str)
        -> Result<ObjectBody, CloudError>;
}
