//! Proc file locations.

use std::path::PathBuf;

use super::parse::env_opt;
use super::ConfigError;
use crate::system::ProcPaths;

const MOUNTINFO_KEY: &str = "CGROUP_LIMITS_MOUNTINFO";
const CGROUP_KEY: &str = "CGROUP_LIMITS_CGROUP";
const STATM_KEY: &str = "CGROUP_LIMITS_STATM";

/// Load proc file paths from environment variables.
///
/// Each of `CGROUP_LIMITS_MOUNTINFO`, `CGROUP_LIMITS_CGROUP` and
/// `CGROUP_LIMITS_STATM` overrides one `/proc/self` file.
pub fn paths_from_env() -> Result<ProcPaths, ConfigError> {
    paths_from_lookup(env_opt)
}

/// Build proc file paths from a key lookup, starting from `/proc/self`.
pub(crate) fn paths_from_lookup<F>(lookup: F) -> Result<ProcPaths, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut paths = ProcPaths::default();
    for (key, slot) in [
        (MOUNTINFO_KEY, &mut paths.mountinfo),
        (CGROUP_KEY, &mut paths.cgroup),
        (STATM_KEY, &mut paths.statm),
    ] {
        if let Some(value) = lookup(key) {
            *slot = absolute_path(key, value)?;
        }
    }
    Ok(paths)
}

fn absolute_path(key: &str, value: String) -> Result<PathBuf, ConfigError> {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        Ok(path)
    } else {
        Err(ConfigError::Invalid {
            key: key.to_string(),
            message: format!("{} is not an absolute path", path.display()),
        })
    }
}
