//! Core engine of the podprobe diagnostic service
//!
//! Each module backs one group of HTTP endpoints:
//!
//! - [`snapshot`]: process and pod identity, memory and thread counters
//! - [`simulator`]: fault injection (CPU burn, memory retention, parked threads,
//!   crash, delayed exit, slow responses)
//! - [`cloud`]: region / instance resolution and read-only cloud calls that
//!   report failure as data
//! - [`files`]: listing and writing probe files in the working directory
//!
//! Nothing here holds state across requests. Background work started by the
//! simulator is detached and cannot be cancelled.

pub mod cloud;
pub mod env;
pub mod error;
pub mod files;
pub mod simulator;
pub mod snapshot;

// Re-export commonly used types at the crate root
pub use cloud::{
    AwsBackend, CloudBackend, CloudContext, CloudContextResolver, CloudGateway, InstanceIdentity,
    Probed, ProbeFailure,
};
pub use env::{ProcessEnv, VarSource};
pub use error::{CloudError, FilesystemError, SimulationError};
pub use files::{DirectoryListing, FileList, FilesystemFailure, FilesystemProbe, ProbeWrite, WrittenFile};
pub use simulator::{ProcessExit, SimulationKind, StressSimulator, Terminator};
pub use snapshot::{EnvironmentSnapshot, PodIdentity, ResourceStats, ThreadStats};
