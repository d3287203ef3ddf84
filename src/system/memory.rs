//! Process memory queries.
//!
//! The restricted limit combines the memory cgroup with host bounds. The
//! working set comes straight from `statm` and does not involve cgroups.

use std::path::Path;

use tracing::{debug, trace};

use super::cgroup::CgroupLimits;
use super::host;
use super::lines::read_first_line;
use super::paths::ProcPaths;
use crate::error::{LimitError, Result};

/// Memory limit of the current process in bytes.
///
/// Returns [`NO_LIMIT`](super::NO_LIMIT) when neither the cgroup, the
/// address space rlimit nor the physical memory size bound it.
pub fn restricted_physical_memory_limit() -> u64 {
    restricted_physical_memory_limit_with(&ProcPaths::default())
}

/// Same as [`restricted_physical_memory_limit`] with explicit proc files.
pub fn restricted_physical_memory_limit_with(paths: &ProcPaths) -> u64 {
    CgroupLimits::with_paths(paths).restricted_memory_limit()
}

/// Resident set size of the current process in bytes.
pub fn working_set_size() -> Option<u64> {
    let Some(page_size) = host::page_size() else {
        debug!("Page size unknown, cannot compute working set");
        return None;
    };
    working_set_size_from(Path::new(super::paths::PROC_STATM), page_size)
}

/// Resident set size from a `statm` file, for a given page size.
pub fn working_set_size_from(statm: &Path, page_size: u64) -> Option<u64> {
    match read_working_set(statm, page_size) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            debug!("No working set size: {}", e);
            None
        }
    }
}

fn read_working_set(statm: &Path, page_size: u64) -> Result<u64> {
    let line = read_first_line(statm)?;
    let path = statm.display();

    // size resident shared text lib data dt
    let resident = line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| LimitError::Parse {
            path: path.to_string(),
            message: "missing resident field".to_string(),
        })?;

    let pages: u64 = resident.parse().map_err(|e| LimitError::Parse {
        path: path.to_string(),
        message: format!("resident field {:?}: {}", resident, e),
    })?;

    trace!("{}: {} resident pages", path, pages);
    pages.checked_mul(page_size).ok_or(LimitError::Overflow {
        path: path.to_string(),
    })
}
