//! Region and instance identity resolution
//!
//! Both are short ordered probe chains built from `Option::or_else`: later
//! sources are only consulted when every earlier one came up empty.

use crate::env::{VarSource, AWS_DEFAULT_REGION, AWS_REGION, EC2_INSTANCE_ID, EC2_INSTANCE_TYPE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

const INSTANCE_ID_FILE: &str = "instance-id";
const INSTANCE_TYPE_FILE: &str = "instance-type";

/// Best-effort instance identity. Unknown fields are omitted, never null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceIdentity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
}

/// Execution context for one request; rebuilt every time, never cached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudContext {
    pub region: String,
    #[serde(flatten)]
    pub instance: InstanceIdentity,
}

#[derive(Clone)]
pub struct CloudContextResolver {
    vars: Arc<dyn VarSource>,
    metadata_dir: PathBuf,
    fallback_region: String,
}

impl CloudContextResolver {
    pub fn new(
        vars: Arc<dyn VarSource>,
        metadata_dir: impl Into<PathBuf>,
        fallback_region: impl Into<String>,
    ) -> Self {
        Self {
            vars,
            metadata_dir: metadata_dir.into(),
            fallback_region: fallback_region.into(),
        }
    }

    /// `AWS_REGION`, then `AWS_DEFAULT_REGION`, then the fallback region
    pub fn resolve_region(&self) -> String {
        self.vars
            .var(AWS_REGION)
            .or_else(|| self.vars.var(AWS_DEFAULT_REGION))
            .unwrap_or_else(|| self.fallback_region.clone())
    }

    /// Each field independently: metadata file, then environment variable
    pub fn resolve_instance_identity(&self) -> InstanceIdentity {
        InstanceIdentity {
            instance_id: self
                .metadata(INSTANCE_ID_FILE)
                .or_else(|| self.vars.var(EC2_INSTANCE_ID)),
            instance_type: self
                .metadata(INSTANCE_TYPE_FILE)
                .or_else(|| self.vars.var(EC2_INSTANCE_TYPE)),
        }
    }

    pub fn resolve(&self) -> CloudContext {
        CloudContext {
            region: self.resolve_region(),
            instance: self.resolve_instance_identity(),
        }
    }

    fn metadata(&self, name: &str) -> Option<String> {
        read_first_line(&self.metadata_dir.join(name))
    }
}

fn read_first_line(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => content
            .lines()
            .next()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string),
        Err(e) => {
            debug!("Metadata file {} unavailable: {}", path.display(), e);
            None
        }
    }
}
