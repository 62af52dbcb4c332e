//! Environment variable lookup
//!
//! Components read well-known variables through [`VarSource`] so tests can
//! supply a map instead of mutating the process environment.

use std::collections::HashMap;

pub const POD_NAME: &str = "POD_NAME";
pub const POD_NAMESPACE: &str = "POD_NAMESPACE";
pub const NODE_NAME: &str = "NODE_NAME";
pub const AWS_REGION: &str = "AWS_REGION";
pub const AWS_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";
pub const EC2_INSTANCE_ID: &str = "EC2_INSTANCE_ID";
pub const EC2_INSTANCE_TYPE: &str = "EC2_INSTANCE_TYPE";

/// Source of environment-style key/value configuration
pub trait VarSource: Send + Sync {
    /// Raw value of `key`, if set
    fn raw(&self, key: &str) -> Option<String>;

    /// Trimmed value of `key`; unset and blank values are both `None`
    fn var(&self, key: &str) -> Option<String> {
        self.raw(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl VarSource for ProcessEnv {
    fn raw(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl VarSource for HashMap<String, String> {
    fn raw(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}
