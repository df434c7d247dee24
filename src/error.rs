// ABOUTME: Application-wide error types for deployhelp.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::NameError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("malformed configuration {path}: {source}")]
    ConfigMalformed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid configuration {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("unknown task(s): {}", .0.join(", "))]
    UnknownTask(Vec<String>),

    #[error("unknown target(s): {}", .0.join(", "))]
    UnknownTarget(Vec<String>),

    #[error(
        "unknown task(s): {}; unknown target(s): {}",
        .tasks.join(", "),
        .targets.join(", ")
    )]
    UnknownNames {
        tasks: Vec<String>,
        targets: Vec<String>,
    },

    #[error("failed to read env file {path}: {reason}")]
    EnvFile { path: PathBuf, reason: String },

    #[error("invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("deployment cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
