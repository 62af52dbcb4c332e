//! Main application configuration and router setup

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use podprobe_config::{domains::server::CorsConfig as CorsSettings, ServerConfig};
use podprobe_web::middleware::{
    cors_layer_with_config, error_handler_middleware, handle_not_found, request_id_middleware,
    CorsConfig,
};
use std::collections::BTreeMap;
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::{context::ProbeContext, handlers, models::ServiceDescriptor};

/// Where the OpenAPI document is served, outside the API prefix
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Enable CORS middleware
    pub enable_cors: bool,
    /// CORS policy used when `enable_cors` is set
    pub cors: CorsConfig,
    /// Enable request ID tracking
    pub enable_request_id: bool,
    /// Enable request tracing
    pub enable_tracing: bool,
    /// API path prefix
    pub api_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            cors: CorsConfig::default(),
            enable_request_id: true,
            enable_tracing: true,
            api_prefix: "/api".to_string(),
        }
    }
}

impl From<&ServerConfig> for AppConfig {
    fn from(server: &ServerConfig) -> Self {
        Self {
            enable_cors: server.enable_cors,
            cors: cors_policy(&server.cors),
            enable_request_id: server.enable_request_id,
            enable_tracing: server.enable_tracing,
            api_prefix: server.api_prefix.clone(),
        }
    }
}

fn cors_policy(settings: &CorsSettings) -> CorsConfig {
    CorsConfig {
        allowed_origins: settings.allowed_origins.clone(),
        allowed_methods: settings.allowed_methods.clone(),
        allowed_headers: settings.allowed_headers.clone(),
        max_age: Some(Duration::from_secs(settings.max_age_seconds)),
        ..Default::default()
    }
}

/// Create the complete REST API application
pub fn create_rest_app(context: ProbeContext, config: AppConfig) -> Router {
    let descriptor = service_descriptor(&config.api_prefix);

    let app = Router::new()
        // Health endpoints (no prefix)
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/live", get(handlers::liveness_check));

    let app = if config.api_prefix == "/" {
        app.merge(create_api_router())
    } else {
        app.nest(&config.api_prefix, create_api_router())
    };

    #[cfg(feature = "openapi")]
    let app = {
        let document = crate::openapi::openapi_document(&config.api_prefix);
        app.route(
            OPENAPI_PATH,
            get(move || {
                let document = document.clone();
                async move { Json(document) }
            }),
        )
    };

    let mut app = app
        .route(
            "/",
            get(move || {
                let descriptor = descriptor.clone();
                async move { Json(descriptor) }
            }),
        )
        .fallback(handle_not_found)
        .with_state(context);

    // Add middleware layers (applied in reverse order)
    app = app.layer(middleware::from_fn(error_handler_middleware));

    if config.enable_tracing {
        app = app.layer(TraceLayer::new_for_http());
    }

    if config.enable_request_id {
        app = app.layer(middleware::from_fn(request_id_middleware));
    }

    if config.enable_cors {
        app = app.layer(cors_layer_with_config(config.cors));
    }

    app
}

/// Probe endpoints, mounted under the API prefix
fn create_api_router() -> Router<ProbeContext> {
    Router::new()
        // Environment snapshot
        .route("/env/info", get(handlers::get_pod_info))
        .route("/env/resources", get(handlers::get_resources))
        .route("/env/threads", get(handlers::get_threads))
        // Working directory
        .route("/env/listfiles", get(handlers::list_files))
        .route("/env/writefiles", post(handlers::write_file))
        .route("/env/logtest", get(handlers::log_test))
        // Fault injection
        .route("/simulate/cpu", post(handlers::simulate_cpu))
        .route("/simulate/memory", post(handlers::simulate_memory))
        .route("/simulate/threads", post(handlers::simulate_threads))
        .route("/simulate/crash", post(handlers::simulate_crash))
        .route("/simulate/exit", post(handlers::simulate_exit))
        .route("/simulate/timeout", get(handlers::simulate_timeout))
        // Cloud
        .route("/aws/info", get(handlers::get_account_info))
        .route("/aws/dynamodb/tables", get(handlers::list_tables))
        .route("/aws/s3/buckets", get(handlers::list_buckets))
        .route(
            "/aws/s3/buckets/{bucket_name}/objects",
            get(handlers::list_objects),
        )
        .route("/aws/s3/download", get(handlers::download_object))
}

fn service_descriptor(api_prefix: &str) -> ServiceDescriptor {
    let prefixed = |path: &str| format!("{}{}", api_prefix.trim_end_matches('/'), path);

    let mut endpoints = BTreeMap::new();
    endpoints.insert(
        "env".to_string(),
        ["/env/info", "/env/resources", "/env/threads", "/env/listfiles", "/env/writefiles", "/env/logtest"]
            .iter()
            .map(|p| prefixed(p))
            .collect(),
    );
    endpoints.insert(
        "simulate".to_string(),
        ["/simulate/cpu", "/simulate/memory", "/simulate/threads", "/simulate/crash", "/simulate/exit", "/simulate/timeout"]
            .iter()
            .map(|p| prefixed(p))
            .collect(),
    );
    endpoints.insert(
        "aws".to_string(),
        ["/aws/info", "/aws/dynamodb/tables", "/aws/s3/buckets", "/aws/s3/buckets/{bucket_name}/objects", "/aws/s3/download"]
            .iter()
            .map(|p| prefixed(p))
            .collect(),
    );
    endpoints.insert(
        "health".to_string(),
        vec!["/health".to_string(), "/live".to_string(), "/ready".to_string()],
    );
    if cfg!(feature = "openapi") {
        endpoints.insert("docs".to_string(), vec![OPENAPI_PATH.to_string()]);
    }

    ServiceDescriptor {
        name: "podprobe".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        api_prefix: api_prefix.to_string(),
        endpoints,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_paths_carry_prefix() {
        let descriptor = service_descriptor("/probe");
        assert!(descriptor.endpoints["env"].contains(&"/probe/env/info".to_string()));
        assert_eq!(descriptor.endpoints["health"][0], "/health");

        let root = service_descriptor("/");
        assert!(root.endpoints["aws"].contains(&"/aws/info".to_string()));
    }

    #[test]
    fn test_app_config_follows_server_config() {
        let server = ServerConfig {
            api_prefix: "/diag".to_string(),
            enable_cors: false,
            ..Default::default()
        };
        let config = AppConfig::from(&server);
        assert_eq!(config.api_prefix, "/diag");
        assert!(!config.enable_cors);
        assert!(config.enable_request_id);
    }

    #[test]
    fn test_cors_policy_follows_server_config() {
        let mut server = ServerConfig::default();
        server.cors.allowed_origins = vec!["https://ops.example".to_string()];
        server.cors.max_age_seconds = 60;

        let config = AppConfig::from(&server);

        assert_eq!(config.cors.allowed_origins, vec!["https://ops.example"]);
        assert_eq!(config.cors.max_age, Some(Duration::from_secs(60)));
        assert!(config
            .cors
            .expose_headers
            .contains(&"content-disposition".to_string()));
    }
}
