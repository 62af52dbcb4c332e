//! Stress simulation defaults
//!
//! Request parameters that are omitted fall back to these values. Nothing here
//! caps what a caller may ask for: upper bounds are never enforced so operators
//! can push a pod past its limits on purpose.

use crate::error::ConfigResult;
use crate::validation::{validate_positive, Validatable};
use serde::{Deserialize, Serialize};

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Default CPU burn duration
    pub cpu_duration_seconds: i64,

    /// Default number of 1MB buffers to retain
    pub memory_megabytes: i64,

    /// Default number of parked threads to spawn
    pub thread_count: i64,

    /// How long each parked thread sleeps before exiting
    pub thread_park_seconds: u64,

    /// Delay between acknowledging an exit request and terminating
    pub exit_delay_ms: u64,

    /// Process exit status used by the exit simulation
    pub exit_code: i32,

    /// Default blocking duration of the timeout simulation
    pub timeout_seconds: i64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cpu_duration_seconds: 30,
            memory_megabytes: 100,
            thread_count: 50,
            thread_park_seconds: 100,
            exit_delay_ms: 1000,
            exit_code: 1,
            timeout_seconds: 10,
        }
    }
}

impl Validatable for SimulationConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(self.thread_park_seconds, "thread_park_seconds", self.domain_name())?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "simulation"
    }
}
