//! Locations of the proc files the queries read.

use std::path::{Path, PathBuf};

/// Mount table of the current process.
pub const PROC_MOUNTINFO: &str = "/proc/self/mountinfo";
/// Cgroup membership of the current process.
pub const PROC_CGROUP: &str = "/proc/self/cgroup";
/// Memory statistics of the current process, in pages.
pub const PROC_STATM: &str = "/proc/self/statm";

/// Set of proc files consulted by the limit queries.
///
/// The default points at `/proc/self`; tests and embedders can point it
/// anywhere else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcPaths {
    /// `mountinfo` listing (proc(5) format).
    pub mountinfo: PathBuf,
    /// `cgroup` membership listing (`id:subsystems:path` per line).
    pub cgroup: PathBuf,
    /// `statm` page counts.
    pub statm: PathBuf,
}

impl ProcPaths {
    /// Use `mountinfo`, `cgroup` and `statm` from a single directory,
    /// e.g. `/proc/1234`.
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            mountinfo: root.join("mountinfo"),
            cgroup: root.join("cgroup"),
            statm: root.join("statm"),
        }
    }
}

impl Default for ProcPaths {
    fn default() -> Self {
        Self {
            mountinfo: PathBuf::from(PROC_MOUNTINFO),
            cgroup: PathBuf::from(PROC_CGROUP),
            statm: PathBuf::from(PROC_STATM),
        }
    }
}
