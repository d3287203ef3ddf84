//! Cgroup v1 subsystems this crate reads limits for.

use std::fmt;

/// A cgroup v1 resource controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subsystem {
    /// Memory controller (`memory.limit_in_bytes`).
    Memory,
    /// CPU bandwidth controller (`cpu.cfs_quota_us`, `cpu.cfs_period_us`).
    Cpu,
}

impl Subsystem {
    /// Kernel name of the controller, as it appears in mount options
    /// and in `/proc/self/cgroup`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Cpu => "cpu",
        }
    }

    /// Check if a single comma-separated token names this controller.
    ///
    /// Exact match only: `cpuacct` and `cpuset` are not `cpu`.
    #[inline]
    pub fn matches(self, token: &str) -> bool {
        token == self.name()
    }

    /// Check if a comma-separated controller list contains this controller.
    pub fn is_listed_in(self, list: &str) -> bool {
        list.split(',').any(|token| self.matches(token))
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
