//! Shared state for the REST handlers
//!
//! Every component is cheap to clone and holds no per-request state, so one
//! [`ProbeContext`] serves all handlers.

use podprobe_config::ProbeConfig;
use podprobe_core::{
    CloudBackend, CloudContextResolver, CloudGateway, EnvironmentSnapshot, FilesystemProbe,
    ProcessEnv, ProcessExit, StressSimulator, Terminator, VarSource,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct ProbeContext {
    pub snapshot: EnvironmentSnapshot,
    pub simulator: StressSimulator,
    pub gateway: CloudGateway,
    pub files: FilesystemProbe,
}

impl ProbeContext {
    pub fn new(
        snapshot: EnvironmentSnapshot,
        simulator: StressSimulator,
        gateway: CloudGateway,
        files: FilesystemProbe,
    ) -> Self {
        Self {
            snapshot,
            simulator,
            gateway,
            files,
        }
    }

    /// Production wiring: process environment and real process exit
    pub fn from_config(config: &ProbeConfig, backend: Arc<dyn CloudBackend>) -> Self {
        Self::with_sources(config, Arc::new(ProcessEnv), backend, Arc::new(ProcessExit))
    }

    pub fn with_sources(
        config: &ProbeConfig,
        vars: Arc<dyn VarSource>,
        backend: Arc<dyn CloudBackend>,
        terminator: Arc<dyn Terminator>,
    ) -> Self {
        let resolver = CloudContextResolver::new(
            Arc::clone(&vars),
            &config.cloud.metadata_dir,
            &config.cloud.fallback_region,
        );

        Self {
            snapshot: EnvironmentSnapshot::new(vars),
            simulator: StressSimulator::with_terminator(config.simulation.clone(), terminator),
            gateway: CloudGateway::new(backend, resolver, &config.cloud.identity_region),
            files: FilesystemProbe::new(&config.filesystem.working_dir),
        }
    }
}
