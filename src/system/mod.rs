//! Resource limit discovery for cgroup v1 containers.
//!
//! Finds the memory and CPU limits a container runtime put on the current
//! process, which `sysconf` and `num_cpus` don't see, and the process's
//! resident memory.
//!
//! # Pipeline
//!
//! 1. `mountinfo` → mount point of the hierarchy hosting a controller
//! 2. `/proc/self/cgroup` → path of the process inside that hierarchy
//! 3. mount point + path → cgroup directory, resolved once per [`CgroupLimits`]
//! 4. control files under the directory → limit values
//!
//! # Example
//!
//! ```rust,ignore
//! use cgroup_limits::system::{cpu_limit, restricted_physical_memory_limit, NO_LIMIT};
//!
//! let heap = restricted_physical_memory_limit();
//! if heap != NO_LIMIT {
//!     println!("heap budget: {} bytes", heap);
//! }
//! let workers = cpu_limit().unwrap_or(1);
//! ```

mod cgroup;
mod host;
mod lines;
mod memory;
mod mountinfo;
mod paths;
mod proc_cgroup;
mod report;
mod subsystem;
mod value;

pub use cgroup::{
    compose_memory_limit, cpu_count_from_quota, cpu_limit, CgroupLimits, CFS_PERIOD_FILENAME,
    CFS_QUOTA_FILENAME, MEM_LIMIT_FILENAME, NO_LIMIT,
};
pub use memory::{
    restricted_physical_memory_limit, restricted_physical_memory_limit_with, working_set_size,
    working_set_size_from,
};
pub use mountinfo::{find_hierarchy_mount, hierarchy_mount_from};
pub use paths::{ProcPaths, PROC_CGROUP, PROC_MOUNTINFO, PROC_STATM};
pub use proc_cgroup::{cgroup_path_from, find_cgroup_path};
pub use report::LimitsReport;
pub use subsystem::Subsystem;
pub use value::{read_byte_count, read_signed};
