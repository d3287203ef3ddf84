//! Cgroup hierarchy discovery from the mount table.
//!
//! `mountinfo` lines look like (see proc(5)):
//!
//! ```text
//! 36 35 98:0 /mnt1 /mnt2 rw,noatime master:1 - ext3 /dev/root rw,errors=continue
//! (1)(2)(3)   (4)   (5)      (6)      (7)   (8) (9)   (10)         (11)
//! ```
//!
//! Field (5) is the mount point, (7) is a variable number of optional
//! fields terminated by the standalone `-` (8), then filesystem type (9),
//! mount source (10) and super options (11). For a cgroup v1 hierarchy the
//! super options carry the controller names, e.g. `rw,cpu,cpuacct`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::ControlFlow;
use std::path::Path;

use tracing::{debug, trace};

use super::lines::scan_lines;
use super::subsystem::Subsystem;

/// Filesystem type prefix of cgroup hierarchy mounts.
const CGROUP_FS_PREFIX: &str = "cgroup";

/// Separator between per-mount and per-superblock fields.
const FIELD_SEPARATOR: &str = " - ";

/// The fields of one mount record this module cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MountRecord<'a> {
    /// Mount point; absent if the line is truncated before field (5).
    mount_point: Option<&'a str>,
    fs_type: &'a str,
    super_options: &'a str,
}

impl<'a> MountRecord<'a> {
    /// Split a line into a record. `None` if the separator or any of the
    /// three fields after it is missing.
    fn parse(line: &'a str) -> Option<Self> {
        let (head, tail) = line.split_once(FIELD_SEPARATOR)?;

        let mut after = tail.split_whitespace();
        let fs_type = after.next()?;
        let _source = after.next()?;
        let super_options = after.next()?;

        Some(Self {
            mount_point: head.split_whitespace().nth(4),
            fs_type,
            super_options,
        })
    }

    fn hosts(&self, subsystem: Subsystem) -> bool {
        self.fs_type.starts_with(CGROUP_FS_PREFIX) && subsystem.is_listed_in(self.super_options)
    }
}

/// Find the mount point of the hierarchy hosting `subsystem`.
///
/// Returns `None` if the file can't be read, no hierarchy hosts the
/// subsystem, or the listing is malformed.
pub fn find_hierarchy_mount(mountinfo: &Path, subsystem: Subsystem) -> Option<String> {
    let file = match File::open(mountinfo) {
        Ok(file) => file,
        Err(e) => {
            debug!("Cannot open {}: {}", mountinfo.display(), e);
            return None;
        }
    };

    match hierarchy_mount_from(BufReader::new(file), subsystem) {
        Ok(mount) => mount,
        Err(e) => {
            debug!("Cannot read {}: {}", mountinfo.display(), e);
            None
        }
    }
}

/// Scan a mount listing for the first cgroup hierarchy hosting `subsystem`.
///
/// The first malformed line ends the scan with `None`; a partially parsed
/// line is never reported as a match.
pub fn hierarchy_mount_from<R: BufRead>(
    reader: R,
    subsystem: Subsystem,
) -> std::io::Result<Option<String>> {
    scan_lines(reader, |line| {
        if line.trim().is_empty() {
            return ControlFlow::Continue(());
        }

        let Some(record) = MountRecord::parse(line) else {
            debug!("Malformed mountinfo line, giving up: {:?}", line);
            return ControlFlow::Break(None);
        };

        if !record.hosts(subsystem) {
            return ControlFlow::Continue(());
        }

        match record.mount_point {
            Some(mount) => {
                trace!("{} hierarchy mounted at {}", subsystem, mount);
                ControlFlow::Break(Some(mount.to_string()))
            }
            None => {
                debug!("mountinfo line for {} has no mount point: {:?}", subsystem, line);
                ControlFlow::Break(None)
            }
        }
    })
}
