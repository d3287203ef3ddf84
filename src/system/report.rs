//! Snapshot of all limits, for logging and for the reporting binary.

use serde::Serialize;
use tracing::info;

use super::cgroup::{CgroupLimits, NO_LIMIT};
use super::host;
use super::memory::working_set_size_from;
use super::paths::ProcPaths;

/// Limits and usage of the current process at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LimitsReport {
    /// Memory cgroup directory, if resolved
    pub memory_cgroup: Option<String>,
    /// CPU cgroup directory, if resolved
    pub cpu_cgroup: Option<String>,
    /// Restricted memory limit in bytes (None = no limit)
    pub memory_limit: Option<u64>,
    /// Whole CPUs allowed by the cfs quota (None = no quota)
    pub cpu_limit: Option<u32>,
    /// Resident set size in bytes
    pub working_set: Option<u64>,
    /// Logical CPUs of the host
    pub host_cpus: usize,
    /// Physical memory of the host in bytes
    pub host_memory: Option<u64>,
}

impl LimitsReport {
    /// Read every value once, using a single [`CgroupLimits`].
    pub fn collect(paths: &ProcPaths) -> Self {
        let cgroup = CgroupLimits::with_paths(paths);
        let memory_limit = cgroup.restricted_memory_limit();
        let working_set = host::page_size()
            .and_then(|page_size| working_set_size_from(&paths.statm, page_size));

        Self {
            memory_cgroup: cgroup.memory_dir().map(str::to_string),
            cpu_cgroup: cgroup.cpu_dir().map(str::to_string),
            memory_limit: (memory_limit != NO_LIMIT).then_some(memory_limit),
            cpu_limit: cgroup.cpu_limit(),
            working_set,
            host_cpus: host::cpu_count(),
            host_memory: host::physical_memory(),
        }
    }

    /// Worker count a pool should use.
    ///
    /// The cgroup CPU limit, capped at the host CPU count; the host CPU
    /// count when there is no quota. Never below 1.
    pub fn effective_cpus(&self) -> usize {
        let host = self.host_cpus.max(1);
        match self.cpu_limit {
            Some(limit) => (limit as usize).min(host),
            None => host,
        }
    }

    /// Memory limit in human-readable format.
    pub fn memory_limit_display(&self) -> String {
        match self.memory_limit {
            Some(bytes) => format_bytes(bytes),
            None => "unlimited".to_string(),
        }
    }

    /// Working set in human-readable format.
    pub fn working_set_display(&self) -> String {
        match self.working_set {
            Some(bytes) => format_bytes(bytes),
            None => "unknown".to_string(),
        }
    }

    /// CPU limit in human-readable format.
    pub fn cpu_limit_display(&self) -> String {
        match self.cpu_limit {
            Some(cpus) => format!("{} CPUs", cpus),
            None => "unlimited".to_string(),
        }
    }

    /// Print report summary to log.
    pub fn log_summary(&self) {
        info!("Resource limits:");
        info!("  Memory limit: {}", self.memory_limit_display());
        info!("  CPU limit: {}", self.cpu_limit_display());
        info!("  Working set: {}", self.working_set_display());
        info!(
            "  Effective CPUs: {} (host: {})",
            self.effective_cpus(),
            self.host_cpus
        );
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_073_741_824 {
        format!("{:.1} GiB", bytes as f64 / 1_073_741_824.0)
    } else if bytes >= 1_048_576 {
        format!("{:.1} MiB", bytes as f64 / 1_048_576.0)
    } else {
        format!("{} bytes", bytes)
    }
}
