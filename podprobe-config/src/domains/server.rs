//! HTTP server configuration

use crate::error::ConfigResult;
use crate::validation::{
    validate_absolute, validate_enum_choice, validate_positive, validate_required_string,
    Validatable,
};
use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Prefix under which all probe endpoints are mounted
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Enable CORS middleware
    #[serde(default = "crate::domains::utils::default_true")]
    pub enable_cors: bool,

    /// Enable request ID tracking
    #[serde(default = "crate::domains::utils::default_true")]
    pub enable_request_id: bool,

    /// Enable request tracing
    #[serde(default = "crate::domains::utils::default_true")]
    pub enable_tracing: bool,

    /// Time allowed for in-flight requests to drain on shutdown
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_seconds: u64,

    /// CORS policy applied when `enable_cors` is set
    #[serde(default)]
    pub cors: CorsConfig,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any origin
    #[serde(default = "default_cors_origins")]
    pub allowed_origins: Vec<String>,

    /// Allowed methods
    #[serde(default = "default_cors_methods")]
    pub allowed_methods: Vec<String>,

    /// Allowed headers
    #[serde(default = "default_cors_headers")]
    pub allowed_headers: Vec<String>,

    /// Max age for preflight requests
    #[serde(default = "default_cors_max_age")]
    pub max_age_seconds: u64,
}

const CORS_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

impl ServerConfig {
    /// `bind_address:port` as a single string
    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            api_prefix: default_api_prefix(),
            enable_cors: true,
            enable_request_id: true,
            enable_tracing: true,
            shutdown_timeout_seconds: default_shutdown_timeout(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_cors_origins(),
            allowed_methods: default_cors_methods(),
            allowed_headers: default_cors_headers(),
            max_age_seconds: default_cors_max_age(),
        }
    }
}

impl Validatable for ServerConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.bind_address, "bind_address", self.domain_name())?;
        validate_positive(self.port, "port", self.domain_name())?;
        validate_absolute(&self.api_prefix, "api_prefix", self.domain_name())?;

        if self.api_prefix.len() > 1 && self.api_prefix.ends_with('/') {
            return Err(self.validation_error("api_prefix must not end with '/'"));
        }

        if self.cors.allowed_origins.is_empty() {
            return Err(self.validation_error("cors.allowed_origins cannot be empty"));
        }
        for method in &self.cors.allowed_methods {
            validate_enum_choice(method, CORS_METHODS, "cors.allowed_methods", self.domain_name())?;
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "server"
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_shutdown_timeout() -> u64 {
    30
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_cors_methods() -> Vec<String> {
    ["GET", "POST", "OPTIONS"].iter().map(|m| m.to_string()).collect()
}

fn default_cors_headers() -> Vec<String> {
    ["content-type", "accept", "x-request-id"]
        .iter()
        .map(|h| h.to_string())
        .collect()
}

fn default_cors_max_age() -> u64 {
    3600
}
