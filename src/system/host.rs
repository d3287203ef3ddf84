//! Host-level values used as a ceiling for cgroup limits.

use tracing::debug;

/// Size of a virtual memory page in bytes.
pub fn page_size() -> Option<u64> {
    sysconf(libc::_SC_PAGESIZE, "_SC_PAGESIZE")
}

/// Total physical memory in bytes (pages × page size).
pub fn physical_memory() -> Option<u64> {
    let pages = sysconf(libc::_SC_PHYS_PAGES, "_SC_PHYS_PAGES")?;
    let page_size = page_size()?;
    pages.checked_mul(page_size)
}

/// Soft `RLIMIT_AS` of the current process, `None` when unlimited.
pub fn address_space_limit() -> Option<u64> {
    let mut limit: libc::rlimit = unsafe { std::mem::zeroed() };

    if unsafe { libc::getrlimit(libc::RLIMIT_AS, &mut limit) } != 0 {
        debug!(
            "getrlimit(RLIMIT_AS) failed: {}",
            std::io::Error::last_os_error()
        );
        return None;
    }

    if limit.rlim_cur == libc::RLIM_INFINITY {
        None
    } else {
        Some(limit.rlim_cur as u64)
    }
}

/// Number of logical CPUs visible to the process.
pub fn cpu_count() -> usize {
    num_cpus::get()
}

fn sysconf(name: libc::c_int, label: &str) -> Option<u64> {
    let value = unsafe { libc::sysconf(name) };
    if value == -1 {
        debug!("sysconf({}) failed", label);
        return None;
    }
    u64::try_from(value).ok()
}
