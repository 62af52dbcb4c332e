//! Domain-specific configuration modules

pub mod cloud;
pub mod filesystem;
pub mod logging;
pub mod server;
pub mod simulation;
pub mod utils;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Main probe configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ProbeConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: server::ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: logging::LoggingConfig,

    /// Stress simulation defaults
    #[serde(default)]
    pub simulation: simulation::SimulationConfig,

    /// Cloud context resolution
    #[serde(default)]
    pub cloud: cloud::CloudConfig,

    /// Filesystem probe configuration
    #[serde(default)]
    pub filesystem: filesystem::FilesystemConfig,
}

impl ProbeConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.logging.validate()?;
        self.simulation.validate()?;
        self.cloud.validate()?;
        self.filesystem.validate()?;
        Ok(())
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let config = ProbeConfig::default();
        serde_yaml::to_string(&config)
            .unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ProbeConfig::default().validate_all().is_ok());
    }

    #[test]
    fn test_sample_round_trips() {
        let sample = ProbeConfig::generate_sample();
        let parsed: ProbeConfig = serde_yaml::from_str(&sample).unwrap();
        assert_eq!(parsed, ProbeConfig::default());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = r#"
server:
  port: 9090
filesystem:
  working_dir: /tmp/probe
"#;
        let config: ProbeConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.api_prefix, "/api");
        assert_eq!(config.filesystem.working_dir, "/tmp/probe");
        assert_eq!(config.simulation.thread_count, 50);
    }
}
