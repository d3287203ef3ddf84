//! Full report over a fake container

use cgroup_limits::system::LimitsReport;

use crate::helpers::{container, CONTAINER_CGROUP};

#[test]
fn test_report_over_container() {
    let (fake, memory, cpu) = container();
    fake.write_control(&memory, "memory.limit_in_bytes", "128m\n");
    fake.write_control(&cpu, "cpu.cfs_quota_us", "150000\n");
    fake.write_control(&cpu, "cpu.cfs_period_us", "100000\n");
    fake.write_statm("1000 250 10 1 0 100 0\n");

    let report = LimitsReport::collect(&fake.paths());

    assert!(report.memory_cgroup.as_deref().unwrap().ends_with(CONTAINER_CGROUP));
    assert_eq!(report.cpu_limit, Some(1));
    assert!(report.memory_limit.unwrap() <= 128 * 1024 * 1024);
    assert!(report.working_set.unwrap() >= 250);
    assert_eq!(report.effective_cpus(), 1);

    // Same file system, same answer.
    assert_eq!(report, LimitsReport::collect(&fake.paths()));
}

#[test]
fn test_report_serializes() {
    let (fake, _memory, _cpu) = container();
    let report = LimitsReport::collect(&fake.paths());

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["cpu_limit"].is_null());
    assert!(json["host_cpus"].as_u64().unwrap() >= 1);
}
