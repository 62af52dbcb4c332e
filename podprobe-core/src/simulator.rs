//! Fault injection
//!
//! Every simulation launches its effect and returns an acknowledgement. CPU
//! burners, parked threads and the exit timer are detached OS threads: no
//! handle is kept, nothing can cancel them, and repeated calls simply add more.
//! Operators recover by restarting the process.
//!
//! Parameters are never capped. Zero or negative values are accepted and do
//! nothing.

use crate::error::SimulationError;
use crate::snapshot::sample_thread_count;
use podprobe_config::SimulationConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Size of each retained buffer in the memory simulation
pub const MEGABYTE: usize = 1024 * 1024;

/// The fault a simulation induces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationKind {
    Cpu,
    Memory,
    Threads,
    Crash,
    Exit,
    Timeout,
}

impl fmt::Display for SimulationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            SimulationKind::Cpu => "cpu",
            SimulationKind::Memory => "memory",
            SimulationKind::Threads => "threads",
            SimulationKind::Crash => "crash",
            SimulationKind::Exit => "exit",
            SimulationKind::Timeout => "timeout",
        };
        f.write_str(kind)
    }
}

/// Ends the host process
pub trait Terminator: Send + Sync {
    fn terminate(&self, code: i32);
}

/// Terminates via [`std::process::exit`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn terminate(&self, code: i32) {
        std::process::exit(code);
    }
}

#[derive(Clone)]
pub struct StressSimulator {
    config: SimulationConfig,
    terminator: Arc<dyn Terminator>,
}

impl StressSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_terminator(config, Arc::new(ProcessExit))
    }

    pub fn with_terminator(config: SimulationConfig, terminator: Arc<dyn Terminator>) -> Self {
        Self { config, terminator }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Spin one detached thread on floating point work until the deadline
    pub fn cpu(&self, duration_seconds: Option<i64>) -> Result<String, SimulationError> {
        let seconds = duration_seconds.unwrap_or(self.config.cpu_duration_seconds);
        info!(kind = %SimulationKind::Cpu, seconds, "Starting CPU load");

        if let Some(duration) = positive_seconds(seconds) {
            thread::Builder::new()
                .name("probe-cpu".to_string())
                .spawn(move || burn_cpu(duration))
                .map_err(|source| SimulationError::Spawn {
                    kind: SimulationKind::Cpu,
                    started: 0,
                    requested: 1,
                    source,
                })?;
        }

        Ok(format!("CPU load started for {} seconds", seconds))
    }

    /// Allocate `megabytes` touched 1MB buffers and never free them
    pub fn memory(&self, megabytes: Option<i64>) -> String {
        let megabytes = megabytes.unwrap_or(self.config.memory_megabytes);
        let count = usize::try_from(megabytes).unwrap_or(0);

        let mut buffers: Vec<Vec<u8>> = Vec::new();
        for _ in 0..count {
            // Non-zero fill so every page is resident, not just reserved
            buffers.push(vec![0xA5; MEGABYTE]);
        }
        let retained = buffers.leak();

        info!(
            kind = %SimulationKind::Memory,
            megabytes,
            buffers = retained.len(),
            "Retained memory buffers"
        );
        format!("Allocated ~{}MB memory", megabytes)
    }

    /// Spawn `count` detached threads that sleep for the park interval
    pub fn threads(&self, count: Option<i64>) -> Result<String, SimulationError> {
        let count = count.unwrap_or(self.config.thread_count);
        let requested = u64::try_from(count).unwrap_or(0);
        let park = Duration::from_secs(self.config.thread_park_seconds);

        for started in 0..requested {
            let spawned = thread::Builder::new()
                .name(format!("probe-park-{}", started))
                .spawn(move || thread::sleep(park));

            if let Err(source) = spawned {
                error!(started, requested, "Thread simulation stopped: {}", source);
                sample_thread_count();
                return Err(SimulationError::Spawn {
                    kind: SimulationKind::Threads,
                    started,
                    requested,
                    source,
                });
            }
        }

        let live = sample_thread_count();
        info!(kind = %SimulationKind::Threads, count, live, "Parked threads started");
        Ok(format!("{} threads started", count))
    }

    /// Always fails
    pub fn crash(&self) -> Result<String, SimulationError> {
        error!(kind = %SimulationKind::Crash, "Simulated crash requested");
        Err(SimulationError::SimulatedCrash)
    }

    /// Schedule process termination after the configured delay and return at once
    pub fn exit(&self) -> Result<String, SimulationError> {
        let delay = Duration::from_millis(self.config.exit_delay_ms);
        let code = self.config.exit_code;
        let terminator = Arc::clone(&self.terminator);

        warn!(kind = %SimulationKind::Exit, code, delay_ms = self.config.exit_delay_ms, "Process exit scheduled");

        thread::Builder::new()
            .name("probe-exit".to_string())
            .spawn(move || {
                thread::sleep(delay);
                terminator.terminate(code);
            })
            .map_err(|source| SimulationError::Spawn {
                kind: SimulationKind::Exit,
                started: 0,
                requested: 1,
                source,
            })?;

        Ok(format!("App will exit in {}", describe_delay(delay)))
    }

    /// Hold the caller for the full duration
    pub async fn timeout(&self, seconds: Option<i64>) -> String {
        let seconds = seconds.unwrap_or(self.config.timeout_seconds);
        info!(kind = %SimulationKind::Timeout, seconds, "Holding request");

        if let Some(duration) = positive_seconds(seconds) {
            tokio::time::sleep(duration).await;
        }

        format!("Completed after {} seconds", seconds)
    }
}

fn positive_seconds(seconds: i64) -> Option<Duration> {
    u64::try_from(seconds)
        .ok()
        .filter(|s| *s > 0)
        .map(Duration::from_secs)
}

/// `None` when the deadline is past what `Instant` can represent
fn burn_deadline(duration: Duration) -> Option<Instant> {
    Instant::now().checked_add(duration)
}

/// Burns until the deadline, or until the process exits when there is none
fn burn_cpu(duration: Duration) {
    let deadline = burn_deadline(duration);
    let mut acc = 0.0_f64;
    while deadline.is_none_or(|deadline| Instant::now() < deadline) {
        acc += fastrand::f64().sqrt();
    }
    std::hint::black_box(acc);
}

fn describe_delay(delay: Duration) -> String {
    let millis = delay.as_millis();
    match millis {
        1000 => "1 second".to_string(),
        m if m % 1000 == 0 => format!("{} seconds", m / 1000),
        m => format!("{} ms", m),
    }
}
