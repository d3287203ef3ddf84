//! Error types for limit reads.
//!
//! These never escape the public queries: every failure is turned into
//! the "no limit known" answer for the single value being computed.

use std::fmt;

/// Errors that can occur while reading a single limit value.
#[derive(Debug)]
pub enum LimitError {
    /// The cgroup directory for the subsystem could not be resolved.
    Unavailable {
        /// Subsystem name ("memory" or "cpu").
        subsystem: &'static str,
    },

    /// The file could not be opened or read.
    Io {
        path: String,
        error: std::io::Error,
    },

    /// The file exists but contains no line to parse.
    Empty { path: String },

    /// The content does not match the expected grammar.
    Parse { path: String, message: String },

    /// A scaled value does not fit the target integer width.
    Overflow { path: String },
}

impl LimitError {
    /// Check if this error means "nothing to read" rather than bad data.
    pub fn is_not_applicable(&self) -> bool {
        match self {
            LimitError::Unavailable { .. } => true,
            LimitError::Io { error, .. } => error.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

impl fmt::Display for LimitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitError::Unavailable { subsystem } => {
                write!(f, "no cgroup directory for subsystem '{}'", subsystem)
            }
            LimitError::Io { path, error } => write!(f, "failed to read '{}': {}", path, error),
            LimitError::Empty { path } => write!(f, "'{}' is empty", path),
            LimitError::Parse { path, message } => {
                write!(f, "failed to parse '{}': {}", path, message)
            }
            LimitError::Overflow { path } => write!(f, "value in '{}' overflows", path),
        }
    }
}

impl std::error::Error for LimitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LimitError::Io { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Result type alias for limit reads.
pub type Result<T> = std::result::Result<T, LimitError>;
