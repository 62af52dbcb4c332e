//! Read-only cloud calls with failure reported as data
//!
//! Every backend call goes through [`guarded`], which turns an error into a
//! [`ProbeFailure`] carrying a short classification plus the underlying
//! message. None of the gateway operations fail; callers always get a
//! serializable report.

use super::backend::{CallerIdentity, CloudBackend, ObjectSummary};
use super::context::{CloudContextResolver, InstanceIdentity};
use crate::error::CloudError;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tracing::{info, warn};

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const IDENTITY_UNAVAILABLE: &str = "Not running in AWS or credentials unavailable";
const TABLES_UNAVAILABLE: &str = "Unable to list DynamoDB tables";
const BUCKETS_UNAVAILABLE: &str = "Unable to list S3 buckets";
const OBJECTS_UNAVAILABLE: &str = "Unable to list objects in bucket";
const DOWNLOAD_UNAVAILABLE: &str = "Unable to download S3 object";

/// `{error, details}` payload of a failed call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeFailure {
    pub error: String,
    pub details: String,
}

/// Success payload XOR failure payload; both serialize flat into the parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Probed<T> {
    Found(T),
    Failed(ProbeFailure),
}

impl<T> Probed<T> {
    pub fn into_result(self) -> Result<T, ProbeFailure> {
        match self {
            Probed::Found(value) => Ok(value),
            Probed::Failed(failure) => Err(failure),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Probed::Failed(_))
    }

    fn map<U>(self, f: impl FnOnce(T) -> U) -> Probed<U> {
        match self {
            Probed::Found(value) => Probed::Found(f(value)),
            Probed::Failed(failure) => Probed::Failed(failure),
        }
    }
}

/// Run one backend call, converting any error into a classified failure
pub async fn guarded<T, F>(classification: &'static str, call: F) -> Probed<T>
where
    F: Future<Output = Result<T, CloudError>>,
{
    match call.await {
        Ok(value) => Probed::Found(value),
        Err(err) => {
            warn!("{}: {}", classification, err);
            Probed::Failed(ProbeFailure {
                error: classification.to_string(),
                details: err.details().to_string(),
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountIdentity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub instance: InstanceIdentity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityReport {
    pub region: String,
    #[serde(flatten)]
    pub outcome: Probed<AccountIdentity>,
}

/// Table names; the count is always derived from the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tables {
    tables: Vec<String>,
    table_count: usize,
}

impl Tables {
    pub fn new(tables: Vec<String>) -> Self {
        let table_count = tables.len();
        Self {
            tables,
            table_count,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.tables
    }

    pub fn count(&self) -> usize {
        self.table_count
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableListing {
    pub region: String,
    #[serde(flatten)]
    pub outcome: Probed<Tables>,
}

/// Bucket names; the count is always derived from the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Buckets {
    buckets: Vec<String>,
    bucket_count: usize,
}

impl Buckets {
    pub fn new(buckets: Vec<String>) -> Self {
        let bucket_count = buckets.len();
        Self {
            buckets,
            bucket_count,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.buckets
    }

    pub fn count(&self) -> usize {
        self.bucket_count
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketListing {
    pub region: String,
    #[serde(flatten)]
    pub outcome: Probed<Buckets>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectEntry {
    pub key: String,
    pub size: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

impl From<ObjectSummary> for ObjectEntry {
    fn from(summary: ObjectSummary) -> Self {
        Self {
            key: summary.key,
            size: summary.size,
            last_modified: summary.last_modified,
        }
    }
}

/// One page of objects. `object_count` is the page size, not the bucket total:
/// when `is_truncated` is set more objects exist and were not fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectEntries {
    objects: Vec<ObjectEntry>,
    object_count: usize,
    is_truncated: bool,
}

impl ObjectEntries {
    pub fn new(objects: Vec<ObjectEntry>, is_truncated: bool) -> Self {
        let object_count = objects.len();
        Self {
            objects,
            object_count,
            is_truncated,
        }
    }

    pub fn objects(&self) -> &[ObjectEntry] {
        &self.objects
    }

    pub fn count(&self) -> usize {
        self.object_count
    }

    pub fn is_truncated(&self) -> bool {
        self.is_truncated
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectListing {
    pub region: String,
    pub bucket: String,
    pub prefix: String,
    #[serde(flatten)]
    pub outcome: Probed<ObjectEntries>,
}

/// A downloaded object ready to be sent as an attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDownload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadFailure {
    pub error: String,
    pub details: String,
    pub bucket: String,
    pub key: String,
    pub region: String,
}

#[derive(Clone)]
pub struct CloudGateway {
    backend: Arc<dyn CloudBackend>,
    resolver: CloudContextResolver,
    identity_region: String,
}

impl CloudGateway {
    pub fn new(
        backend: Arc<dyn CloudBackend>,
        resolver: CloudContextResolver,
        identity_region: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            resolver,
            identity_region: identity_region.into(),
        }
    }

    pub fn resolver(&self) -> &CloudContextResolver {
        &self.resolver
    }

    /// Caller identity from the global identity endpoint, plus the resolved
    /// region and whatever instance identity is discoverable
    pub async fn identity(&self) -> IdentityReport {
        let region = self.resolver.resolve_region();
        let outcome = guarded(
            IDENTITY_UNAVAILABLE,
            self.backend.caller_identity(&self.identity_region),
        )
        .await
        .map(|caller: CallerIdentity| AccountIdentity {
            account: caller.account,
            arn: caller.arn,
            user_id: caller.user_id,
            instance: self.resolver.resolve_instance_identity(),
        });

        IdentityReport { region, outcome }
    }

    pub async fn list_tables(&self) -> TableListing {
        let region = self.resolver.resolve_region();
        let outcome = guarded(TABLES_UNAVAILABLE, self.backend.list_tables(&region))
            .await
            .map(Tables::new);

        if let Probed::Found(tables) = &outcome {
            info!(region = %region, count = tables.count(), "Listed tables");
        }
        TableListing { region, outcome }
    }

    pub async fn list_buckets(&self) -> BucketListing {
        let region = self.resolver.resolve_region();
        let outcome = guarded(BUCKETS_UNAVAILABLE, self.backend.list_buckets(&region))
            .await
            .map(Buckets::new);

        if let Probed::Found(buckets) = &outcome {
            info!(region = %region, count = buckets.count(), "Listed buckets");
        }
        BucketListing { region, outcome }
    }

    pub async fn list_objects(&self, bucket: &str, prefix: &str) -> ObjectListing {
        let region = self.resolver.resolve_region();
        let outcome = guarded(
            OBJECTS_UNAVAILABLE,
            self.backend.list_objects(&region, bucket, prefix),
        )
        .await
        .map(|page| {
            ObjectEntries::new(
                page.objects.into_iter().map(ObjectEntry::from).collect(),
                page.is_truncated,
            )
        });

        if let Probed::Found(entries) = &outcome {
            info!(
                region = %region,
                bucket,
                count = entries.count(),
                truncated = entries.is_truncated(),
                "Listed objects"
            );
        }

        ObjectListing {
            region,
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
            outcome,
        }
    }

    pub async fn download_object(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<ObjectDownload, DownloadFailure> {
        let region = self.resolver.resolve_region();
        let outcome = guarded(
            DOWNLOAD_UNAVAILABLE,
            self.backend.get_object(&region, bucket, key),
        )
        .await;

        match outcome.into_result() {
            Ok(body) => {
                let content_type = body
                    .content_type
                    .filter(|ct| !ct.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

                info!(region = %region, bucket, key, bytes = body.bytes.len(), "Downloaded object");
                Ok(ObjectDownload {
                    file_name: key.to_string(),
                    content_type,
                    bytes: body.bytes,
                })
            }
            Err(failure) => Err(DownloadFailure {
                error: failure.error,
                details: failure.details,
                bucket: bucket.to_string(),
                key: key.to_string(),
                region,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::backend::{ObjectBody, ObjectPage};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubBackend {
        fail: bool,
        regions: Mutex<Vec<String>>,
    }

    impl StubBackend {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn record(&self, region: &str) -> Result<(), CloudError> {
            self.regions.lock().unwrap().push(region.to_string());
            if self.fail {
                Err(CloudError::request("Stub", "no credentials in chain"))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl CloudBackend for StubBackend {
        async fn caller_identity(&self, region: &str) -> Result<CallerIdentity, CloudError> {
            self.record(region)?;
            Ok(CallerIdentity {
                account: Some("123456789012".to_string()),
                arn: Some("arn:aws:iam::123456789012:role/probe".to_string()),
                user_id: Some("AROAEXAMPLE".to_string()),
            })
        }

        async fn list_tables(&self, region: &str) -> Result<Vec<String>, CloudError> {
            self.record(region)?;
            Ok(vec!["orders".to_string(), "users".to_string()])
        }

        async fn list_buckets(&self, region: &str) -> Result<Vec<String>, CloudError> {
            self.record(region)?;
            Ok(vec!["logs".to_string()])
        }

        async fn list_objects(
            &self,
            region: &str,
            _bucket: &str,
            prefix: &str,
        ) -> Result<ObjectPage, CloudError> {
            self.record(region)?;
            Ok(ObjectPage {
                objects: vec![
                    ObjectSummary {
                        key: format!("{}a.txt", prefix),
                        size: 10,
                        last_modified: Some("2024-05-01T12:00:00Z".to_string()),
                    },
                    ObjectSummary {
                        key: format!("{}b.txt", prefix),
                        size: 20,
                        last_modified: None,
                    },
                ],
                is_truncated: true,
            })
        }

        async fn get_object(
            &self,
            region: &str,
            _bucket: &str,
            _key: &str,
        ) -> Result<ObjectBody, CloudError> {
            self.record(region)?;
            Ok(ObjectBody {
                bytes: b"hello".to_vec(),
                content_type: Some("  ".to_string()),
            })
        }
    }

    fn gateway(backend: Arc<StubBackend>, vars: &[(&str, &str)], metadata: &Path) -> CloudGateway {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let resolver = CloudContextResolver::new(Arc::new(map), metadata, "us-east-1");
        CloudGateway::new(backend, resolver, "aws-global")
    }

    #[tokio::test]
    async fn test_tables_listing_counts_names() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(StubBackend::default());
        let listing = gateway(backend.clone(), &[("AWS_REGION", "eu-west-1")], dir.path())
            .list_tables()
            .await;

        assert_eq!(listing.region, "eu-west-1");
        let tables = listing.outcome.clone().into_result().unwrap();
        assert_eq!(tables.count(), tables.names().len());
        assert_eq!(backend.regions.lock().unwrap().as_slice(), ["eu-west-1"]);

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["tableCount"], 2);
        assert_eq!(json["tables"][0], "orders");
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn test_failures_become_data() {
        let dir = tempfile::tempdir().unwrap();
        let gw = gateway(Arc::new(StubBackend::failing()), &[], dir.path());

        let json = serde_json::to_value(gw.list_buckets().await).unwrap();
        assert_eq!(json["region"], "us-east-1");
        assert_eq!(json["error"], "Unable to list S3 buckets");
        assert_eq!(json["details"], "no credentials in chain");
        assert!(json.get("buckets").is_none());
        assert!(json.get("bucketCount").is_none());

        let json = serde_json::to_value(gw.list_tables().await).unwrap();
        assert_eq!(json["error"], "Unable to list DynamoDB tables");
        assert!(json.get("tableCount").is_none());
    }

    #[tokio::test]
    async fn test_identity_uses_global_region_and_reports_resolved_one() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("instance-id"), "i-123\n").unwrap();
        let backend = Arc::new(StubBackend::default());

        let report = gateway(backend.clone(), &[("AWS_DEFAULT_REGION", "eu-west-1")], dir.path())
            .identity()
            .await;

        assert_eq!(backend.regions.lock().unwrap().as_slice(), ["aws-global"]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["region"], "eu-west-1");
        assert_eq!(json["account"], "123456789012");
        assert_eq!(json["userId"], "AROAEXAMPLE");
        assert_eq!(json["instanceId"], "i-123");
        assert!(json.get("instanceType").is_none());
    }

    #[tokio::test]
    async fn test_identity_failure_omits_account_fields() {
        let dir = tempfile::tempdir().unwrap();
        let report = gateway(Arc::new(StubBackend::failing()), &[], dir.path())
            .identity()
            .await;

        assert!(report.outcome.is_failed());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["error"], "Not running in AWS or credentials unavailable");
        assert!(json.get("account").is_none());
    }

    #[tokio::test]
    async fn test_truncated_listing_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let listing = gateway(Arc::new(StubBackend::default()), &[], dir.path())
            .list_objects("logs", "2024/")
            .await;

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["bucket"], "logs");
        assert_eq!(json["prefix"], "2024/");
        assert_eq!(json["isTruncated"], true);
        assert_eq!(json["objectCount"], 2);
        assert_eq!(json["objects"][0]["key"], "2024/a.txt");
        assert_eq!(json["objects"][0]["lastModified"], "2024-05-01T12:00:00Z");
        assert!(json["objects"][1].get("lastModified").is_none());
    }

    #[tokio::test]
    async fn test_download_defaults_blank_content_type() {
        let dir = tempfile::tempdir().unwrap();
        let download = gateway(Arc::new(StubBackend::default()), &[], dir.path())
            .download_object("logs", "reports/q1.csv")
            .await
            .unwrap();

        assert_eq!(download.content_type, DEFAULT_CONTENT_TYPE);
        assert_eq!(download.file_name, "reports/q1.csv");
        assert_eq!(download.bytes, b"hello");
    }

    #[tokio::test]
    async fn test_download_failure_payload() {
        let dir = tempfile::tempdir().unwrap();
        let failure = gateway(Arc::new(StubBackend::failing()), &[("AWS_REGION", "eu-north-1")], dir.path())
            .download_object("logs", "missing.bin")
            .await
            .unwrap_err();

        assert_eq!(failure.error, "Unable to download S3 object");
        assert_eq!(failure.bucket, "logs");
        assert_eq!(failure.key, "missing.bin");
        assert_eq!(failure.region, "eu-north-1");
    }
}
