//! Cgroup directory resolution

use std::fs;

use cgroup_limits::CgroupLimits;

use crate::helpers::{container, container_cgroup_file, FakeProc, CONTAINER_CGROUP};

#[test]
fn test_resolves_both_directories() {
    let (fake, memory, cpu) = container();
    let limits = CgroupLimits::with_paths(&fake.paths());

    assert_eq!(
        limits.memory_dir(),
        Some(format!("{}{}", memory.display(), CONTAINER_CGROUP).as_str())
    );
    assert_eq!(
        limits.cpu_dir(),
        Some(format!("{}{}", cpu.display(), CONTAINER_CGROUP).as_str())
    );
}

#[test]
fn test_cpuacct_only_hierarchy_is_not_cpu() {
    let mut fake = FakeProc::new();
    fake.mount("memory");
    fake.mount("cpuacct");
    fake.write_cgroup(&container_cgroup_file());

    let limits = CgroupLimits::with_paths(&fake.paths());
    assert!(limits.memory_dir().is_some());
    assert_eq!(limits.cpu_dir(), None);
}

#[test]
fn test_missing_cgroup_file() {
    let mut fake = FakeProc::new();
    fake.mount("memory");
    fake.mount("cpu");

    let limits = CgroupLimits::with_paths(&fake.paths());
    assert_eq!(limits.memory_dir(), None);
    assert_eq!(limits.cpu_dir(), None);
    assert_eq!(limits.physical_memory_limit(), None);
    assert_eq!(limits.cpu_limit(), None);
}

#[test]
fn test_malformed_mountinfo_before_hierarchy() {
    let mut fake = FakeProc::new();
    fake.push_mountinfo_line("this line has no separator");
    fake.mount("memory");
    fake.write_cgroup(&container_cgroup_file());

    let limits = CgroupLimits::with_paths(&fake.paths());
    assert_eq!(limits.memory_dir(), None);
}

#[test]
fn test_directories_are_resolved_once() {
    let (fake, memory, cpu) = container();
    fake.write_control(&memory, "memory.limit_in_bytes", "1073741824\n");
    fake.write_control(&cpu, "cpu.cfs_quota_us", "200000\n");
    fake.write_control(&cpu, "cpu.cfs_period_us", "100000\n");

    let limits = CgroupLimits::with_paths(&fake.paths());

    // Discovery inputs disappear; the cached directories still work.
    fake.remove_proc("mountinfo");
    fake.remove_proc("cgroup");

    assert_eq!(limits.physical_memory_limit(), Some(1_073_741_824));
    assert_eq!(limits.cpu_limit(), Some(2));

    // A fresh object sees nothing.
    let fresh = CgroupLimits::with_paths(&fake.paths());
    assert_eq!(fresh.memory_dir(), None);
}

#[test]
fn test_values_are_read_on_every_query() {
    let (fake, memory, _cpu) = container();
    fake.write_control(&memory, "memory.limit_in_bytes", "1g\n");

    let limits = CgroupLimits::with_paths(&fake.paths());
    assert_eq!(limits.physical_memory_limit(), Some(1_073_741_824));
    assert_eq!(limits.physical_memory_limit(), Some(1_073_741_824));

    fake.write_control(&memory, "memory.limit_in_bytes", "512m\n");
    assert_eq!(limits.physical_memory_limit(), Some(536_870_912));
}

#[test]
fn test_hierarchy_root_cgroup() {
    let mut fake = FakeProc::new();
    let memory = fake.mount("memory");
    fake.write_cgroup("9:memory:/\n");
    fs::write(memory.join("memory.limit_in_bytes"), "4096\n").unwrap();

    let limits = CgroupLimits::with_paths(&fake.paths());
    assert_eq!(
        limits.memory_dir(),
        Some(format!("{}/", memory.display()).as_str())
    );
    assert_eq!(limits.physical_memory_limit(), Some(4096));
}
