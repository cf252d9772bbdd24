//! Error types for dependency resolution
//!
//! Per-node failures are absorbed into node state or per-operation reports;
//! `DepsError` carries the detail for whichever item they concern.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the collaborators behind the graph engine
#[derive(Debug, Error)]
pub enum DepsError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse binary {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported binary format in {path:?}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl DepsError {
    /// Wrap an I/O error with the path it concerns
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        DepsError::Io {
            path: path.into(),
            source,
        }
    }

    /// Path the error is attached to, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            DepsError::Io { path, .. }
            | DepsError::Parse { path, .. }
            | DepsError::UnsupportedFormat { path, .. } => Some(path),
            DepsError::Config(_) => None,
        }
    }
}

impl From<toml::de::Error> for DepsError {
    fn from(e: toml::de::Error) -> Self {
        DepsError::Config(e.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DepsError>;
