//! Domain-driven configuration management for podprobe
//!
//! Configuration is split by functional domain (server, logging, simulation,
//! cloud, filesystem). Every domain has safe defaults, can be loaded from YAML,
//! and accepts a small set of `PODPROBE_*` environment overrides.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

// Re-export domain configurations
pub use domains::{
    cloud::CloudConfig, filesystem::FilesystemConfig, logging::LoggingConfig,
    server::ServerConfig, simulation::SimulationConfig, ProbeConfig,
};
