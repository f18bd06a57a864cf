use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A Python module the release needs but that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingDependency {
    pub name: String,
}

impl fmt::Display for MissingDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' package is not installed. Install it with: pip install {}",
            self.name, self.name
        )
    }
}

/// Unified error type for pyrelease operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not find {field} in {}", .path.display())]
    VersionNotFound { path: PathBuf, field: String },

    #[error("Version format error: {0}")]
    VersionFormat(String),

    #[error("Invalid release type: {0}. Must be one of: major, minor, patch")]
    InvalidKind(String),

    #[error("Missing dependencies: {}", format_missing(.0))]
    MissingDependencies(Vec<MissingDependency>),

    #[error("Failed to launch {tool}: {source}")]
    ToolLaunch {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed with exit code {}", format_code(.code))]
    ToolFailed { tool: String, code: Option<i32> },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_missing(deps: &[MissingDependency]) -> String {
    deps.iter()
        .map(|d| d.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "unknown".to_string(),
    }
}

/// Convenience type alias for Results in pyrelease
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version format error with context
    pub fn format(msg: impl Into<String>) -> Self {
        ReleaseError::VersionFormat(msg.into())
    }

    /// Process exit status for this error.
    ///
    /// A failing external tool hands its own status through; a tool killed by a
    /// signal has no status and maps to 1, as does every other error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseError::ToolFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}
