//! # Podprobe REST API
//!
//! HTTP surface of the diagnostic probe. Every request maps to exactly one
//! operation of `podprobe-core`:
//!
//! - **Environment**: pod identity, memory and thread counters, working directory files
//! - **Simulation**: CPU burn, memory retention, parked threads, crash, delayed exit, slow response
//! - **Cloud**: caller identity and read-only table, bucket and object calls
//!
//! Health, liveness and readiness endpoints sit outside the API prefix. With the
//! `openapi` feature the OpenAPI document is served at [`OPENAPI_PATH`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use podprobe_config::ProbeConfig;
//! use podprobe_core::AwsBackend;
//! use podprobe_rest_api::{create_rest_app, AppConfig, ProbeContext};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ProbeConfig::default();
//! let context = ProbeContext::from_config(&config, Arc::new(AwsBackend::new()));
//! let app = create_rest_app(context, AppConfig::from(&config.server));
//!
//! let listener = tokio::net::TcpListener::bind(config.server.socket_address()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod context;
pub mod errors;
pub mod handlers;
pub mod models;
#[cfg(feature = "openapi")]
pub mod openapi;

// Re-export commonly used types
pub use app::{create_rest_app, AppConfig, OPENAPI_PATH};
pub use context::ProbeContext;
pub use errors::{RestError, RestResult};
