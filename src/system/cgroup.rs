//! Cgroup v1 limit discovery for the current process.
//!
//! A [`CgroupLimits`] resolves the memory and cpu cgroup directories once,
//! when it is built, and reads control files under them on every query.
//! Nothing is shared between instances.

use tracing::{debug, trace};

use super::host;
use super::mountinfo::find_hierarchy_mount;
use super::paths::ProcPaths;
use super::proc_cgroup::find_cgroup_path;
use super::subsystem::Subsystem;
use super::value::{read_byte_count, read_signed};
use crate::error::{LimitError, Result};

/// Memory limit control file, relative to the memory cgroup directory.
pub const MEM_LIMIT_FILENAME: &str = "/memory.limit_in_bytes";
/// CFS quota control file, relative to the cpu cgroup directory.
pub const CFS_QUOTA_FILENAME: &str = "/cpu.cfs_quota_us";
/// CFS period control file, relative to the cpu cgroup directory.
pub const CFS_PERIOD_FILENAME: &str = "/cpu.cfs_period_us";

/// Reported by memory queries when nothing bounds the process.
pub const NO_LIMIT: u64 = 0;

/// Cgroup directories of the current process, resolved once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CgroupLimits {
    /// Memory cgroup directory (None = not resolvable)
    memory_dir: Option<String>,
    /// CPU cgroup directory (None = not resolvable)
    cpu_dir: Option<String>,
}

impl CgroupLimits {
    /// Resolve both directories from `/proc/self`.
    pub fn new() -> Self {
        Self::with_paths(&ProcPaths::default())
    }

    /// Resolve both directories from the given proc files.
    pub fn with_paths(paths: &ProcPaths) -> Self {
        let limits = Self {
            memory_dir: resolve_dir(paths, Subsystem::Memory),
            cpu_dir: resolve_dir(paths, Subsystem::Cpu),
        };
        debug!(
            memory_dir = ?limits.memory_dir,
            cpu_dir = ?limits.cpu_dir,
            "Resolved cgroup directories"
        );
        limits
    }

    /// Resolved memory cgroup directory.
    pub fn memory_dir(&self) -> Option<&str> {
        self.memory_dir.as_deref()
    }

    /// Resolved cpu cgroup directory.
    pub fn cpu_dir(&self) -> Option<&str> {
        self.cpu_dir.as_deref()
    }

    /// Memory limit of the memory cgroup, `None` if unknown.
    pub fn physical_memory_limit(&self) -> Option<u64> {
        match self.read_memory_limit() {
            Ok(limit) => Some(limit),
            Err(e) => {
                log_read_failure("cgroup memory limit", &e);
                None
            }
        }
    }

    /// Memory limit of the process: the smallest of the cgroup limit, the
    /// soft `RLIMIT_AS` and the physical memory size.
    ///
    /// Returns [`NO_LIMIT`] if none of them is known.
    pub fn restricted_memory_limit(&self) -> u64 {
        compose_memory_limit(
            self.physical_memory_limit(),
            host::address_space_limit(),
            host::physical_memory(),
        )
    }

    /// Number of whole CPUs the cfs quota entitles the process to.
    ///
    /// `None` if the quota or period is unknown, zero or negative
    /// (a quota of -1 means unlimited).
    pub fn cpu_limit(&self) -> Option<u32> {
        let quota = self.read_cpu_value(CFS_QUOTA_FILENAME);
        let period = self.read_cpu_value(CFS_PERIOD_FILENAME);

        match (quota, period) {
            (Ok(quota), Ok(period)) => {
                let cpus = cpu_count_from_quota(quota, period);
                trace!("cfs quota {} / period {} -> {:?} CPUs", quota, period, cpus);
                cpus
            }
            (Err(e), _) | (_, Err(e)) => {
                log_read_failure("cgroup CPU limit", &e);
                None
            }
        }
    }

    fn read_memory_limit(&self) -> Result<u64> {
        let dir = self.memory_dir.as_deref().ok_or(LimitError::Unavailable {
            subsystem: Subsystem::Memory.name(),
        })?;
        read_byte_count(&format!("{}{}", dir, MEM_LIMIT_FILENAME))
    }

    fn read_cpu_value(&self, filename: &str) -> Result<i64> {
        let dir = self.cpu_dir.as_deref().ok_or(LimitError::Unavailable {
            subsystem: Subsystem::Cpu.name(),
        })?;
        read_signed(&format!("{}{}", dir, filename))
    }
}

/// Missing directories and files are normal outside containers and only
/// show at trace level; unreadable or malformed content shows at debug.
fn log_read_failure(what: &str, e: &LimitError) {
    if e.is_not_applicable() {
        trace!("No {}: {}", what, e);
    } else {
        debug!("No {}: {}", what, e);
    }
}

/// Hierarchy mount point + relative cgroup path for `subsystem`.
///
/// The relative path already starts with `/`, so the two are concatenated
/// as they are.
fn resolve_dir(paths: &ProcPaths, subsystem: Subsystem) -> Option<String> {
    let mount = find_hierarchy_mount(&paths.mountinfo, subsystem)?;
    let relative = find_cgroup_path(&paths.cgroup, subsystem)?;
    Some(mount + &relative)
}

/// CPU count for a cfs quota and period.
///
/// Less than one full period rounds up to 1. More than `u32::MAX` CPUs is
/// clamped.
pub fn cpu_count_from_quota(quota: i64, period: i64) -> Option<u32> {
    if quota <= 0 || period <= 0 {
        return None;
    }

    if quota <= period {
        return Some(1);
    }

    Some(u32::try_from(quota / period).unwrap_or(u32::MAX))
}

/// Smallest of the known memory bounds, or [`NO_LIMIT`].
pub fn compose_memory_limit(
    cgroup: Option<u64>,
    address_space: Option<u64>,
    physical: Option<u64>,
) -> u64 {
    let limit = [cgroup, address_space, physical]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(u64::MAX);

    if limit == u64::MAX {
        NO_LIMIT
    } else {
        limit
    }
}

/// CPU limit of the current process from its cpu cgroup.
pub fn cpu_limit() -> Option<u32> {
    CgroupLimits::new().cpu_limit()
}
