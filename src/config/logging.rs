//! Logging configuration.

use std::fmt;
use std::str::FromStr;

use super::parse::{env_opt, env_or, parse_or};
use super::ConfigError;

/// Default filter when neither LOG_LEVEL nor RUST_LOG is set.
const DEFAULT_FILTER: &str = "cgroup_limits=info";

/// Output format of log lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable tracing output.
    Text,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "plain" => Ok(Self::Text),
            other => Err(format!("expected json or text, got '{}'", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// Logging configuration loaded from environment.
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Log level filter (from LOG_LEVEL or RUST_LOG).
    pub filter: String,
    /// Output format (from LOG_FORMAT).
    pub format: LogFormat,
    /// Service name for structured logging.
    pub service_name: String,
}

impl LoggingConfig {
    /// Load configuration from environment variables.
    ///
    /// Filter priority: LOG_LEVEL > RUST_LOG > default
    ///
    /// LOG_LEVEL accepts simple values: trace, debug, info, warn, error
    /// RUST_LOG accepts full tracing filter syntax: cgroup_limits=trace
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            filter: resolve_log_filter(env_opt("LOG_LEVEL"), env_opt("RUST_LOG")),
            format: parse_or("LOG_FORMAT", env_opt("LOG_FORMAT"), LogFormat::default())?,
            service_name: env_or("SERVICE_NAME", "cgroup_limits"),
        })
    }
}

/// Resolve the log filter from LOG_LEVEL and RUST_LOG values.
fn resolve_log_filter(log_level: Option<String>, rust_log: Option<String>) -> String {
    if let Some(level) = log_level {
        let level = level.to_lowercase();
        match level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {
                return format!("cgroup_limits={}", level);
            }
            _ => {
                // Logging isn't up yet
                eprintln!(
                    "Warning: Invalid LOG_LEVEL '{}', expected: trace, debug, info, warn, error",
                    level
                );
            }
        }
    }

    rust_log.unwrap_or_else(|| DEFAULT_FILTER.to_string())
}
