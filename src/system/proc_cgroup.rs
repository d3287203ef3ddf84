//! Cgroup membership of the current process.
//!
//! Each line of `/proc/self/cgroup` is `hierarchy-id:controller-list:path`,
//! for example `4:cpu,cpuacct:/docker/abc`. The path is relative to the
//! mount point of that hierarchy.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::ControlFlow;
use std::path::Path;

use tracing::{debug, trace};

use super::lines::scan_lines;
use super::subsystem::Subsystem;

/// Split a membership line into its controller list and cgroup path.
///
/// `None` if the line doesn't have three colon-separated parts or the path
/// is empty. The path keeps any further colons it contains.
fn parse_membership(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.splitn(3, ':');
    let _id = parts.next()?;
    let controllers = parts.next()?;
    let path = parts.next()?.trim();
    if path.is_empty() {
        return None;
    }
    Some((controllers, path))
}

/// Find the cgroup path of the current process for `subsystem`.
///
/// Returns `None` if the file can't be read, the process isn't in a
/// hierarchy with that controller, or the listing is malformed.
pub fn find_cgroup_path(cgroup: &Path, subsystem: Subsystem) -> Option<String> {
    let file = match File::open(cgroup) {
        Ok(file) => file,
        Err(e) => {
            debug!("Cannot open {}: {}", cgroup.display(), e);
            return None;
        }
    };

    match cgroup_path_from(BufReader::new(file), subsystem) {
        Ok(path) => path,
        Err(e) => {
            debug!("Cannot read {}: {}", cgroup.display(), e);
            None
        }
    }
}

/// Scan a membership listing for the first line listing `subsystem`.
///
/// Later lines are not read once a match is found. An empty controller
/// list (the unified `0::/...` entry) is a valid line that matches nothing.
pub fn cgroup_path_from<R: BufRead>(
    reader: R,
    subsystem: Subsystem,
) -> std::io::Result<Option<String>> {
    scan_lines(reader, |line| {
        let Some((controllers, path)) = parse_membership(line) else {
            debug!("Malformed cgroup line, giving up: {:?}", line);
            return ControlFlow::Break(None);
        };

        if subsystem.is_listed_in(controllers) {
            trace!("{} cgroup path: {}", subsystem, path);
            ControlFlow::Break(Some(path.to_string()))
        } else {
            ControlFlow::Continue(())
        }
    })
}
