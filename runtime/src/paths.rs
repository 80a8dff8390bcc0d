//! Tool constants and on-disk locations.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, RuntimeError};

/// Human-facing tool name, as printed by `version`.
pub const TOOL_NAME: &str = "ForgeKit";

/// Binary name, used when argv carries no program name.
pub const BIN_NAME: &str = "forgekit";

/// Marker file whose presence makes a directory a project root.
pub const PROJECT_MARKER: &str = "project.json";

/// Name of the tool state directory, both global and per-project.
pub const TOOL_DIR_NAME: &str = ".forgekit";

/// Log file name inside a tool state directory.
pub const LOG_FILE_NAME: &str = "forgekit.log";

/// Environment variable holding space-delimited default arguments spliced
/// ahead of the real argv.
pub const EXTRA_ARGS_ENV: &str = "FORGEKIT_EXTRA_ARGS";

/// The per-user global tool directory, `~/.forgekit`.
pub fn global_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(TOOL_DIR_NAME))
        .ok_or_else(|| RuntimeError::Config("no home directory found".to_string()))
}

/// The per-user global log file.
pub fn global_log_file() -> Result<PathBuf> {
    Ok(global_dir()?.join(LOG_FILE_NAME))
}

/// The log file for a project rooted at `root`.
pub fn project_log_file(root: &Path) -> PathBuf {
    root.join(TOOL_DIR_NAME).join(LOG_FILE_NAME)
}

/// Creates a directory and its ancestors if missing.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_log_file_lives_under_tool_dir() {
        let path = project_log_file(Path::new("/work/app"));
        assert_eq!(path, PathBuf::from("/work/app/.forgekit/forgekit.log"));
    }

    #[test]
    fn test_global_dir_is_under_home() {
        if let Ok(dir) = global_dir() {
            assert!(dir.ends_with(TOOL_DIR_NAME));
        }
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a/b/c");
        ensure_dir(&nested).unwrap();
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
