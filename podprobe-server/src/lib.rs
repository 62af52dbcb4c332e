//! Podprobe server
//!
//! Wires configuration, logging and the REST router into a listening server.

pub mod startup;

// Re-export main components
pub use startup::{shutdown_signal, Server};
