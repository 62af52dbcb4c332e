//! Read-only cloud endpoints
//!
//! Listings and identity always answer 200 with either the data or an
//! `{error, details}` pair. Only the download answers 500 on failure.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use http::{header, HeaderValue, StatusCode};
use podprobe_core::cloud::{BucketListing, IdentityReport, ObjectDownload, ObjectListing, TableListing};

use crate::{
    context::ProbeContext,
    errors::{RestError, RestResult},
    models::{DownloadQuery, ObjectsQuery},
};

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/aws/info",
    tag = "aws",
    summary = "Get account and region info",
    responses((status = 200, description = "Caller identity, or an {error, details} pair with the region"))
))]
pub async fn get_account_info(State(ctx): State<ProbeContext>) -> Json<IdentityReport> {
    Json(ctx.gateway.identity().await)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/aws/dynamodb/tables",
    tag = "aws",
    summary = "List DynamoDB tables visible to this pod",
    responses((status = 200, description = "Table names, or an {error, details} pair"))
))]
pub async fn list_tables(State(ctx): State<ProbeContext>) -> Json<TableListing> {
    Json(ctx.gateway.list_tables().await)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/aws/s3/buckets",
    tag = "aws",
    summary = "List S3 buckets visible to this pod",
    responses((status = 200, description = "Bucket names, or an {error, details} pair"))
))]
pub async fn list_buckets(State(ctx): State<ProbeContext>) -> Json<BucketListing> {
    Json(ctx.gateway.list_buckets().await)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/aws/s3/buckets/{bucket_name}/objects",
    tag = "aws",
    summary = "List objects in an S3 bucket",
    params(
        ("bucket_name" = String, Path, description = "Bucket to list"),
        ("prefix" = Option<String>, Query, description = "Key prefix, empty by default")
    ),
    responses((status = 200, description = "First page of objects, or an {error, details} pair"))
))]
pub async fn list_objects(
    State(ctx): State<ProbeContext>,
    Path(bucket_name): Path<String>,
    Query(query): Query<ObjectsQuery>,
) -> Json<ObjectListing> {
    Json(ctx.gateway.list_objects(&bucket_name, &query.prefix).await)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/aws/s3/download",
    tag = "aws",
    summary = "Download an S3 object by bucket and key",
    params(
        ("bucket" = String, Query, description = "Bucket name"),
        ("key" = String, Query, description = "Object key")
    ),
    responses(
        (status = 200, description = "Object bytes as an attachment"),
        (status = 400, description = "Missing bucket or key"),
        (status = 500, description = "Download failed; body carries {error, details, bucket, key, region}")
    )
))]
pub async fn download_object(
    State(ctx): State<ProbeContext>,
    Query(query): Query<DownloadQuery>,
) -> RestResult<Response> {
    let bucket = required(query.bucket, "bucket")?;
    let key = required(query.key, "key")?;

    let response = match ctx.gateway.download_object(&bucket, &key).await {
        Ok(download) => attachment(download),
        Err(failure) => (StatusCode::INTERNAL_SERVER_ERROR, Json(failure)).into_response(),
    };
    Ok(response)
}

fn required(value: Option<String>, name: &str) -> RestResult<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| RestError::bad_request(format!("Missing required query parameter '{}'", name)))
}

fn attachment(download: ObjectDownload) -> Response {
    let content_type = HeaderValue::from_str(&download.content_type)
        .unwrap_or(HeaderValue::from_static(podprobe_core::cloud::DEFAULT_CONTENT_TYPE));
    let disposition = format!(
        "attachment; filename=\"{}\"",
        download.file_name.replace('"', "\\\"")
    );

    let mut response = (StatusCode::OK, download.bytes).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, content_type);
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    response
}
