//! Configuration for the reporting binary.
//!
//! All configuration comes from environment variables. The library queries
//! take no configuration; they read `/proc/self` unless given a
//! [`ProcPaths`](crate::system::ProcPaths).
//!
//! # Example
//!
//! ```rust,ignore
//! use cgroup_limits::config::Config;
//!
//! let config = Config::from_env()?;
//! println!("mountinfo: {}", config.paths.mountinfo.display());
//! ```

mod error;
mod logging;
mod parse;
mod procfs;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use procfs::paths_from_env;

use crate::system::ProcPaths;

/// Complete application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Proc files to read.
    pub paths: ProcPaths,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            paths: paths_from_env()?,
            logging: LoggingConfig::from_env()?,
        })
    }

    /// Print configuration summary to log.
    pub fn log_summary(&self) {
        use tracing::info;

        info!("Configuration loaded:");
        info!("  mountinfo: {}", self.paths.mountinfo.display());
        info!("  cgroup: {}", self.paths.cgroup.display());
        info!("  statm: {}", self.paths.statm.display());
        info!("  Log format: {}", self.logging.format);
    }
}
