//! OpenAPI document for the probe endpoints

use utoipa::OpenApi;

use crate::{handlers, models};

/// Health routes and document metadata; mounted at the root
#[derive(OpenApi)]
#[openapi(
    info(
        title = "podprobe",
        description = "In-cluster diagnostics: introspect the pod environment, inject faults and exercise read-only cloud access."
    ),
    paths(
        handlers::health::health_check,
        handlers::health::liveness_check,
        handlers::health::readiness_check,
    ),
    components(schemas(
        models::HealthResponse,
        models::HealthCheckResult,
        models::HealthStatus,
        models::MessageResponse,
        models::ServiceDescriptor,
    )),
    tags(
        (name = "env", description = "Pod identity, process counters and working directory"),
        (name = "simulate", description = "Fault injection"),
        (name = "aws", description = "Read-only cloud calls"),
        (name = "health", description = "Liveness and readiness")
    )
)]
pub struct ApiDoc;

/// Probe routes, relative to the API prefix
#[derive(OpenApi)]
#[openapi(paths(
    handlers::env::get_pod_info,
    handlers::env::get_resources,
    handlers::env::get_threads,
    handlers::files::list_files,
    handlers::files::write_file,
    handlers::logtest::log_test,
    handlers::simulate::simulate_cpu,
    handlers::simulate::simulate_memory,
    handlers::simulate::simulate_threads,
    handlers::simulate::simulate_crash,
    handlers::simulate::simulate_exit,
    handlers::simulate::simulate_timeout,
    handlers::aws::get_account_info,
    handlers::aws::list_tables,
    handlers::aws::list_buckets,
    handlers::aws::list_objects,
    handlers::aws::download_object,
))]
struct ProbeApi;

/// Full document with probe paths placed under `api_prefix`
pub fn openapi_document(api_prefix: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();

    if api_prefix == "/" {
        doc.merge(ProbeApi::openapi());
        doc
    } else {
        doc.nest(api_prefix, ProbeApi::openapi())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_paths_follow_prefix() {
        let doc = openapi_document("/diag");

        assert!(doc.paths.paths.contains_key("/health"));
        assert!(doc.paths.paths.contains_key("/diag/env/info"));
        assert!(doc
            .paths
            .paths
            .contains_key("/diag/aws/s3/buckets/{bucket_name}/objects"));
        assert!(!doc.paths.paths.contains_key("/env/info"));
    }

    #[test]
    fn test_root_prefix_merges_paths() {
        let doc = openapi_document("/");
        assert!(doc.paths.paths.contains_key("/simulate/cpu"));
        assert!(doc.paths.paths.contains_key("/ready"));
    }

    #[test]
    fn test_operations_carry_summaries() {
        let doc = openapi_document("/api");
        let info = doc.paths.paths.get("/api/simulate/memory").unwrap();
        let post = info.post.as_ref().unwrap();
        assert_eq!(post.summary.as_deref(), Some("Simulate memory leak"));
    }
}
