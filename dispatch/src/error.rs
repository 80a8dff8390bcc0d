//! Dispatch-layer error types.
//!
//! Registration failures are programmer errors in the command-tree setup and
//! should never be reachable from a correctly authored tree; binding and
//! handler failures are the user-facing portion of the taxonomy. All of them
//! funnel through [`DispatchError`] so the top-level boundary handles the
//! whole evaluation pipeline in one place.

use thiserror::Error;

use forgekit_core::{BindError, ComposeError};

/// Failure raised by a command handler.
///
/// This is the broad "runtime error" surface the outermost boundary catches:
/// anything a command body can fail with, plus user-initiated cancellation.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command ran and reported a failure.
    #[error("{0}")]
    Failed(String),

    /// I/O performed by the command failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The user cancelled the command mid-flight.
    #[error("interrupted")]
    Interrupted,
}

/// Errors raised while building or evaluating the command tree.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// `register` was given a parent path that names no registered node.
    #[error("unknown parent command `{0}`")]
    UnknownParent(String),

    /// A sibling with the same name is already registered.
    #[error("command `{name}` already registered under `{parent}`")]
    DuplicateCommand {
        /// The colliding command name.
        name: String,
        /// The parent the collision occurred under.
        parent: String,
    },

    /// The alias collides with a sibling's name or alias.
    #[error("alias `{alias}` already taken under `{parent}`")]
    DuplicateAlias {
        /// The colliding alias.
        alias: String,
        /// The parent the collision occurred under.
        parent: String,
    },

    /// A command's composed mixins declare colliding flags.
    #[error(transparent)]
    Compose(#[from] ComposeError),

    /// User input failed to bind against the matched command's schema set.
    #[error(transparent)]
    Bind(#[from] BindError),

    /// The matched command's handler failed.
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Convenience alias for results with [`DispatchError`].
pub type Result<T> = std::result::Result<T, DispatchError>;
