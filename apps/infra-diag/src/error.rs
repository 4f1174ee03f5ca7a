//! Error types for directory traversal, agent configuration loading, and
//! per-file validation stages.
//!
//! Only `TraversalError` aborts a validation run. `StageError` values are
//! captured per file and folded into the report.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal failure while listing candidate files.
#[derive(Error, Debug)]
pub enum TraversalError {
    /// The validated root does not exist.
    #[error("config path not found: {}", path.display())]
    RootNotFound { path: PathBuf },

    /// A directory below (or at) the root could not be read.
    #[error("failed walking {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Failure loading the agent's own configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("agent config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed reading agent config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("agent config {} is not valid yaml: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Per-file failure at one of the three validation stages.
#[derive(Error, Debug)]
pub enum StageError {
    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),

    #[error("invalid yaml: {0}")]
    Syntax(#[source] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Schema(#[source] serde_yaml::Error),
}
