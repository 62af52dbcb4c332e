//! Filesystem probe configuration

use crate::error::ConfigResult;
use crate::validation::{validate_required_string, Validatable};
use serde::{Deserialize, Serialize};

/// Filesystem configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilesystemConfig {
    /// Directory listed and written by the filesystem probe
    pub working_dir: String,
}

impl Default for FilesystemConfig {
    fn default() -> Self {
        Self {
            working_dir: "/workingdirectory".to_string(),
        }
    }
}

impl Validatable for FilesystemConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.working_dir, "working_dir", self.domain_name())
    }

    fn domain_name(&self) -> &'static str {
        "filesystem"
    }
}
