//! Point-in-time view of the pod, the host memory and the process threads

use crate::env::{VarSource, NODE_NAME, POD_NAME, POD_NAMESPACE};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};
use uuid::Uuid;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Highest live thread count observed by this process
static PEAK_THREADS: AtomicUsize = AtomicUsize::new(0);

/// Pod identity as seen from inside the container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodIdentity {
    pub pod_name: String,
    pub namespace: String,
    pub node_name: String,
    /// Fresh for every call: identifies this probe invocation, not the machine
    pub instance_run_id: String,
}

/// Memory and processor counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStats {
    #[serde(rename = "memoryFreeMB")]
    pub memory_free_mb: u64,
    #[serde(rename = "memoryUsedMB")]
    pub memory_used_mb: u64,
    #[serde(rename = "memoryTotalMB")]
    pub memory_total_mb: u64,
    pub available_processors: usize,
    #[serde(rename = "processResidentMB")]
    pub process_resident_mb: u64,
}

/// Live and peak OS thread counts of this process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadStats {
    pub thread_count: usize,
    pub peak_thread_count: usize,
}

/// Reads identity and resource facts; every read is total
#[derive(Clone)]
pub struct EnvironmentSnapshot {
    vars: Arc<dyn VarSource>,
}

impl EnvironmentSnapshot {
    pub fn new(vars: Arc<dyn VarSource>) -> Self {
        Self { vars }
    }

    pub fn read_identity(&self) -> PodIdentity {
        PodIdentity {
            pod_name: self.var_or(POD_NAME, "unknown"),
            namespace: self.var_or(POD_NAMESPACE, "default"),
            node_name: self.var_or(NODE_NAME, "unknown"),
            instance_run_id: Uuid::new_v4().to_string(),
        }
    }

    /// Memory counters. Under a cgroup memory limit the cgroup view is used,
    /// since that is the budget the pod is actually held to.
    pub fn read_resources(&self) -> ResourceStats {
        let mut sys = System::new();
        sys.refresh_memory();

        let (total, free) = match sys.cgroup_limits() {
            Some(limits) => (limits.total_memory, limits.free_memory),
            None => (sys.total_memory(), sys.available_memory()),
        };

        let total_mb = total / BYTES_PER_MB;
        let free_mb = (free / BYTES_PER_MB).min(total_mb);

        ResourceStats {
            memory_free_mb: free_mb,
            memory_used_mb: total_mb - free_mb,
            memory_total_mb: total_mb,
            available_processors: available_processors(),
            process_resident_mb: process_resident_bytes(&mut sys) / BYTES_PER_MB,
        }
    }

    pub fn read_threads(&self) -> ThreadStats {
        let thread_count = sample_thread_count();
        ThreadStats {
            thread_count,
            peak_thread_count: PEAK_THREADS.load(Ordering::Relaxed).max(thread_count),
        }
    }

    fn var_or(&self, key: &str, default: &str) -> String {
        self.vars.var(key).unwrap_or_else(|| default.to_string())
    }
}

/// Count live threads of this process and fold the count into the peak
pub fn sample_thread_count() -> usize {
    let count = live_thread_count();
    PEAK_THREADS.fetch_max(count, Ordering::Relaxed);
    count
}

fn live_thread_count() -> usize {
    let Ok(pid) = sysinfo::get_current_pid() else {
        return 1;
    };

    let mut sys = System::new();
    sys.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        false,
        ProcessRefreshKind::everything(),
    );

    match sys.process(pid).and_then(|process| process.tasks()) {
        // The task set may or may not list the main thread itself
        Some(tasks) if tasks.contains(&pid) => tasks.len(),
        Some(tasks) => tasks.len() + 1,
        // No per-process task listing on this platform
        None => 1,
    }
}

fn process_resident_bytes(sys: &mut System) -> u64 {
    let Ok(pid) = sysinfo::get_current_pid() else {
        return 0;
    };

    sys.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        false,
        ProcessRefreshKind::nothing().with_memory(),
    );
    sys.process(pid).map(|process| process.memory()).unwrap_or(0)
}

fn available_processors() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
