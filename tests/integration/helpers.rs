//! Test helpers: a fake `/proc/self` plus cgroup v1 hierarchies.

use std::fs;
use std::path::{Path, PathBuf};

use cgroup_limits::ProcPaths;
use tempfile::TempDir;

/// Relative cgroup path used by the fake container.
pub const CONTAINER_CGROUP: &str = "/docker/0123456789ab";

/// Fake proc directory and cgroup mounts under one temp directory.
pub struct FakeProc {
    dir: TempDir,
    mountinfo: Vec<String>,
}

#[allow(dead_code)]
impl FakeProc {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::create_dir(dir.path().join("proc")).expect("Failed to create proc dir");
        Self {
            dir,
            mountinfo: vec!["22 1 8:1 / / rw,relatime shared:1 - ext4 /dev/sda1 rw".to_string()],
        }
    }

    /// Mount a cgroup v1 hierarchy for `controllers` (e.g. "cpu,cpuacct").
    ///
    /// Returns the mount point.
    pub fn mount(&mut self, controllers: &str) -> PathBuf {
        let mount = self.dir.path().join("sys/fs/cgroup").join(controllers);
        fs::create_dir_all(&mount).expect("Failed to create mount point");

        let id = 30 + self.mountinfo.len();
        self.mountinfo.push(format!(
            "{id} 25 0:{id} / {} rw,nosuid,nodev,noexec,relatime shared:{id} - cgroup cgroup rw,{}",
            mount.display(),
            controllers
        ));
        self.write_proc("mountinfo", &(self.mountinfo.join("\n") + "\n"));
        mount
    }

    /// Add a raw line to mountinfo.
    pub fn push_mountinfo_line(&mut self, line: &str) {
        self.mountinfo.push(line.to_string());
        self.write_proc("mountinfo", &(self.mountinfo.join("\n") + "\n"));
    }

    /// Write `/proc/self/cgroup`.
    pub fn write_cgroup(&self, content: &str) {
        self.write_proc("cgroup", content);
    }

    /// Write `/proc/self/statm`.
    pub fn write_statm(&self, content: &str) {
        self.write_proc("statm", content);
    }

    /// Write a control file inside the container cgroup of a mount.
    pub fn write_control(&self, mount: &Path, file: &str, content: &str) {
        let dir = mount.join(CONTAINER_CGROUP.trim_start_matches('/'));
        fs::create_dir_all(&dir).expect("Failed to create cgroup dir");
        fs::write(dir.join(file), content).expect("Failed to write control file");
    }

    /// Remove a proc file.
    pub fn remove_proc(&self, name: &str) {
        fs::remove_file(self.dir.path().join("proc").join(name)).expect("Failed to remove");
    }

    pub fn paths(&self) -> ProcPaths {
        ProcPaths::with_root(self.dir.path().join("proc"))
    }

    fn write_proc(&self, name: &str, content: &str) {
        fs::write(self.dir.path().join("proc").join(name), content)
            .expect("Failed to write proc file");
    }
}

/// `/proc/self/cgroup` of a container in the usual hybrid layout.
pub fn container_cgroup_file() -> String {
    format!(
        "12:pids:{p}\n11:memory:{p}\n5:cpu,cpuacct:{p}\n4:cpuset:{p}\n1:name=systemd:{p}\n0::/\n",
        p = CONTAINER_CGROUP
    )
}

/// Fake container with memory and cpu hierarchies mounted.
///
/// Returns the fake and the memory and cpu mount points.
pub fn container() -> (FakeProc, PathBuf, PathBuf) {
    let mut fake = FakeProc::new();
    let memory = fake.mount("memory");
    let cpu = fake.mount("cpu,cpuacct");
    fake.write_cgroup(&container_cgroup_file());
    (fake, memory, cpu)
}
