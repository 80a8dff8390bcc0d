//! Logging-destination selection and sink initialization.
//!
//! Verbose runs log to the console: colorized, timestamped, debug level.
//! Every other run logs to a file — the per-project log when the cwd sits
//! beneath a recognized project root, the global per-user log otherwise.
//! The sink is process-wide state, installed once per run and reclaimed at
//! process exit; installing over an existing sink is a no-op so embedders
//! keep whatever they configured first.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::ChronoLocal;

use crate::error::Result;
use crate::paths::{global_log_file, project_log_file};
use crate::project::find_project_root;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Where log output goes for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Colorized, debug-level console output on stderr.
    Console,
    /// Info-level file target at the given path, truncated per run.
    File(PathBuf),
}

/// Chooses the logging destination for this run.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use forgekit_runtime::{LogTarget, select_target};
///
/// let target = select_target(true, Path::new("/anywhere")).unwrap();
/// assert_eq!(target, LogTarget::Console);
/// ```
pub fn select_target(verbose: bool, cwd: &Path) -> Result<LogTarget> {
    if verbose {
        return Ok(LogTarget::Console);
    }
    match find_project_root(cwd) {
        Some(root) => Ok(LogTarget::File(project_log_file(&root))),
        None => Ok(LogTarget::File(global_log_file()?)),
    }
}

/// Installs the process-wide log sink for the chosen target.
///
/// For file targets the destination directory is created first and the file
/// is truncated, so each run starts a fresh log. Errors are I/O only; a
/// sink installed earlier in the process is left in place.
pub fn init(target: &LogTarget) -> Result<()> {
    match target {
        LogTarget::Console => {
            let filter =
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into());
            let attempt = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(true)
                .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
                .with_writer(std::io::stderr)
                .try_init();
            if attempt.is_err() {
                tracing::debug!("log sink already installed, keeping it");
            }
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = fs::File::create(path)?;
            let filter =
                EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
            let attempt = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
                .with_writer(Mutex::new(file))
                .try_init();
            if attempt.is_err() {
                tracing::debug!(path = %path.display(), "log sink already installed, keeping it");
            }
        }
    }
    Ok(())
}
