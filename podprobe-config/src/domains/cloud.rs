//! Cloud context resolution configuration

use crate::error::ConfigResult;
use crate::validation::{validate_required_string, Validatable};
use serde::{Deserialize, Serialize};

/// Cloud configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CloudConfig {
    /// Directory holding cloud-init `instance-id` / `instance-type` files
    pub metadata_dir: String,

    /// Region used when neither region environment variable is set
    pub fallback_region: String,

    /// Region the account-identity client is pinned to
    pub identity_region: String,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            metadata_dir: "/var/lib/cloud/data".to_string(),
            fallback_region: "us-east-1".to_string(),
            identity_region: "aws-global".to_string(),
        }
    }
}

impl Validatable for CloudConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.metadata_dir, "metadata_dir", self.domain_name())?;
        validate_required_string(&self.fallback_region, "fallback_region", self.domain_name())?;
        validate_required_string(&self.identity_region, "identity_region", self.domain_name())?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "cloud"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_defaults() {
        let config = CloudConfig::default();
        assert_eq!(config.fallback_region, "us-east-1");
        assert_eq!(config.metadata_dir, "/var/lib/cloud/data");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_fallback_region_rejected() {
        let config = CloudConfig {
            fallback_region: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
