//! Error types for the bootstrap layer.

use std::path::PathBuf;

use thiserror::Error;

use crate::version::Version;

/// Errors that can occur during process bootstrap.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The running tool is older than the declared minimum. Hard stop.
    #[error("version {required} required but {running} is running")]
    VersionMismatch {
        /// The caller-declared minimum.
        required: Version,
        /// The version of the running tool.
        running: Version,
    },

    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment problem (e.g. no home directory to place tool state in).
    #[error("configuration error: {0}")]
    Config(String),

    /// A project marker exists but does not parse.
    #[error("invalid project manifest at {path}: {source}")]
    Manifest {
        /// Path of the offending marker file.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// A setup collaborator failed while registering commands.
    #[error(transparent)]
    Dispatch(#[from] forgekit_dispatch::DispatchError),
}

/// Convenience alias for results with [`RuntimeError`].
pub type Result<T> = std::result::Result<T, RuntimeError>;
