//! Structured logging infrastructure for podprobe
//!
//! Thin layer over `tracing-subscriber` that turns a [`LoggingConfig`] into a
//! global subscriber: an env filter, a console layer in the configured format
//! and an optional append-only file layer.

pub mod init;

pub use init::{build_env_filter, init_logging_from_config};
pub use podprobe_config::LoggingConfig;
