//! # Podprobe Web Utilities
//!
//! Reusable axum middleware for the probe's HTTP surface: request IDs,
//! CORS and server-error logging, plus a JSON error type.
//!
//! ## Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use podprobe_web::middleware::{
//!     cors_layer_with_config, error_handler_middleware, request_id_middleware, CorsConfig,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> std::io::Result<()> {
//! let app: Router = Router::new()
//!     .route("/items", get(|| async { "items" }))
//!     .layer(middleware::from_fn(error_handler_middleware))
//!     .layer(middleware::from_fn(request_id_middleware))
//!     .layer(cors_layer_with_config(CorsConfig::default()));
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await
//! # }
//! ```

pub mod errors;
pub mod middleware;

// Re-export commonly used types and functions
pub use errors::WebError;
pub use middleware::{
    cors_layer_with_config, error_handler_middleware, handle_not_found, request_id_middleware, CorsConfig,
    RequestId, REQUEST_ID_HEADER,
};
