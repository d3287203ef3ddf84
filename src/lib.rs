//! cgroup_limits - container-aware memory and CPU limits for Linux processes.
//!
//! Runtimes that size heaps or thread pools from `sysconf` and the CPU
//! count overshoot inside containers. This crate reads the cgroup v1
//! limits the container runtime placed on the current process.
//!
//! # Entry points
//!
//! - [`restricted_physical_memory_limit`] - bytes, or [`NO_LIMIT`]
//! - [`cpu_limit`] - whole CPUs allowed by the cfs quota, at least 1
//! - [`working_set_size`] - resident memory of the process in bytes
//!
//! Each call builds its own [`CgroupLimits`]; nothing is cached between
//! calls. Malformed or missing files mean "no limit", never a panic.
//!
//! # Example
//!
//! ```rust,ignore
//! use cgroup_limits::{cpu_limit, working_set_size};
//!
//! let workers = cpu_limit().map(|n| n as usize).unwrap_or_else(num_cpus::get);
//! println!("workers: {}, rss: {:?}", workers, working_set_size());
//! ```

/// Package version from Cargo.toml
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git commit hash (8 chars), empty outside a git checkout
pub const BUILD_VERSION: &str = env!("BUILD_VERSION");

/// Full version string: "0.1.0 (abc12345)"
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_VERSION"), ")");

pub mod config;
pub mod error;
pub mod logging;
pub mod system;

// Re-exports for convenience
pub use error::LimitError;
pub use system::{
    cpu_limit, restricted_physical_memory_limit, working_set_size, CgroupLimits, ProcPaths,
    NO_LIMIT,
};
