//! Memory limit and working set

use cgroup_limits::system::{
    compose_memory_limit, restricted_physical_memory_limit_with, working_set_size_from,
};
use cgroup_limits::{CgroupLimits, NO_LIMIT};

use crate::helpers::container;

const MIB: u64 = 1024 * 1024;

#[test]
fn test_unit_suffixes_in_control_file() {
    let (fake, memory, _cpu) = container();
    let limits = CgroupLimits::with_paths(&fake.paths());

    for (content, expected) in [
        ("1\n", 1),
        ("1k\n", 1024),
        ("1K\n", 1024),
        ("1m\n", MIB),
        ("1M\n", MIB),
        ("1g\n", 1024 * MIB),
        ("1G\n", 1024 * MIB),
    ] {
        fake.write_control(&memory, "memory.limit_in_bytes", content);
        assert_eq!(limits.physical_memory_limit(), Some(expected), "{:?}", content);
    }
}

#[test]
fn test_overflowing_limit_is_unknown() {
    let (fake, memory, _cpu) = container();
    fake.write_control(&memory, "memory.limit_in_bytes", "17179869184g\n");
    assert_eq!(
        CgroupLimits::with_paths(&fake.paths()).physical_memory_limit(),
        None
    );
}

#[test]
fn test_hex_limit_falls_back_to_host_bound() {
    // Same container without a memory.limit_in_bytes: only host bounds apply.
    let (bare, _memory, _cpu) = container();
    let host_bound = restricted_physical_memory_limit_with(&bare.paths());
    assert_ne!(host_bound, NO_LIMIT);

    let (fake, memory, _cpu) = container();
    fake.write_control(&memory, "memory.limit_in_bytes", "0x10\n");

    assert_eq!(
        CgroupLimits::with_paths(&fake.paths()).physical_memory_limit(),
        None
    );
    assert_eq!(restricted_physical_memory_limit_with(&fake.paths()), host_bound);
}

#[test]
fn test_restricted_limit_is_bounded_by_cgroup() {
    let (fake, memory, _cpu) = container();
    fake.write_control(&memory, "memory.limit_in_bytes", "256m\n");

    let limit = restricted_physical_memory_limit_with(&fake.paths());
    assert_ne!(limit, NO_LIMIT);
    assert!(limit <= 256 * MIB);
}

#[test]
fn test_restricted_limit_without_cgroup() {
    let (fake, _memory, _cpu) = container();
    fake.remove_proc("cgroup");

    let limit = restricted_physical_memory_limit_with(&fake.paths());
    // Falls back to host bounds; physical memory is always known on Linux.
    assert_ne!(limit, NO_LIMIT);
}

#[test]
fn test_composition() {
    let gib = 1024 * MIB;
    assert_eq!(compose_memory_limit(Some(2 * gib), None, Some(8 * gib)), 2 * gib);
    assert_eq!(compose_memory_limit(None, None, Some(4 * gib)), 4 * gib);
    assert_eq!(compose_memory_limit(None, None, None), NO_LIMIT);
}

#[test]
fn test_working_set_from_fake_statm() {
    let (fake, _memory, _cpu) = container();
    fake.write_statm("10240 2560 512 100 0 3000 0\n");

    let paths = fake.paths();
    assert_eq!(working_set_size_from(&paths.statm, 4096), Some(10 * MIB));

    fake.write_statm("10240\n");
    assert_eq!(working_set_size_from(&paths.statm, 4096), None);
}
