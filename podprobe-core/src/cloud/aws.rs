//! [`CloudBackend`] over the AWS SDK
//!
//! Each call loads the default credential chain for the requested region,
//! builds a fresh service client and drops it when the call returns. Retries
//! are disabled so every failure surfaces on the first attempt.

use super::backend::{CallerIdentity, CloudBackend, ObjectBody, ObjectPage, ObjectSummary};
use crate::error::CloudError;
use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::DateTimeFormat;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct AwsBackend;

impl AwsBackend {
    pub fn new() -> Self {
        Self
    }

    async fn sdk_config(&self, region: &str) -> SdkConfig {
        debug!(region, "Loading AWS configuration");
        aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .retry_config(RetryConfig::disabled())
            .load()
            .await
    }
}

fn request_failed<E>(operation: &'static str, err: E) -> CloudError
where
    E: std::error::Error,
{
    CloudError::request(operation, DisplayErrorContext(&err).to_string())
}

#[async_trait]
impl CloudBackend for AwsBackend {
    async fn caller_identity(&self, region: &str) -> Result<CallerIdentity, CloudError> {
        let client = aws_sdk_sts::Client::new(&self.sdk_config(region).await);
        let output = client
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| request_failed("GetCallerIdentity", e))?;

        Ok(CallerIdentity {
            account: output.account().map(str::to_string),
            arn: output.arn().map(str::to_string),
            user_id: output.user_id().map(str::to_string),
        })
    }

    async fn list_tables(&self, region: &str) -> Result<Vec<String>, CloudError> {
        let client = aws_sdk_dynamodb::Client::new(&self.sdk_config(region).await);
        client
            .list_tables()
            .into_paginator()
            .items()
            .send()
            .try_collect()
            .await
            .map_err(|e| request_failed("ListTables", e))
    }

    async fn list_buckets(&self, region: &str) -> Result<Vec<String>, CloudError> {
        let client = aws_sdk_s3::Client::new(&self.sdk_config(region).await);
        let output = client
            .list_buckets()
            .send()
            .await
            .map_err(|e| request_failed("ListBuckets", e))?;

        Ok(output
            .buckets()
            .iter()
            .filter_map(|bucket| bucket.name().map(str::to_string))
            .collect())
    }

    async fn list_objects(
        &self,
        region: &str,
        bucket: &str,
        prefix: &str,
    ) -> Result<ObjectPage, CloudError> {
        let client = aws_sdk_s3::Client::new(&self.sdk_config(region).await);
        let output = client
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix)
            .send()
            .await
            .map_err(|e| request_failed("ListObjectsV2", e))?;

        let objects = output
            .contents()
            .iter()
            .map(|object| ObjectSummary {
                key: object.key().unwrap_or_default().to_string(),
                size: object.size().unwrap_or_default(),
                last_modified: object
                    .last_modified()
                    .and_then(|ts| ts.fmt(DateTimeFormat::DateTime).ok()),
            })
            .collect();

        Ok(ObjectPage {
            objects,
            is_truncated: output.is_truncated().unwrap_or(false),
        })
    }

    async fn get_object(
        &self,
        region: &str,
        bucket: &str,
        key: &str,
    ) -> Result<ObjectBody, CloudError> {
        let client = aws_sdk_s3::Client::new(&self.sdk_config(region).await);
        let output = client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| request_failed("GetObject", e))?;

        let content_type = output.content_type().map(str::to_string);
        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| request_failed("GetObject", e))?
            .into_bytes()
            .to_vec();

        Ok(ObjectBody {
            bytes,
            content_type,
        })
    }
}
