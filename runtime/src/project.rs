//! Project-context lookup.
//!
//! A directory is a project root when it contains the
//! [`PROJECT_MARKER`](crate::paths::PROJECT_MARKER) file. Detection walks
//! ancestor directories from a starting point (usually the cwd), so any
//! nesting depth inside a project still finds it. Only the marker's
//! identity fields are read here — the descriptor's build content belongs
//! to the collaborators that consume it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, RuntimeError};
use crate::paths::PROJECT_MARKER;

/// Identity fields of a project marker.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectManifest {
    /// Project identifier.
    pub id: String,
    /// Optional one-line description.
    #[serde(default)]
    pub description: String,
}

/// A recognized project: its root directory and identity.
#[derive(Debug, Clone)]
pub struct Project {
    /// Directory containing the marker file.
    pub root: PathBuf,
    /// Parsed identity fields.
    pub manifest: ProjectManifest,
}

/// Walks ancestors of `start` looking for a project marker.
///
/// Returns the closest ancestor (including `start` itself) containing one,
/// or `None` when the directory sits outside any project.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_MARKER).is_file())
        .map(Path::to_path_buf)
}

impl Project {
    /// Finds and loads the project containing `start`, if any.
    pub fn discover(start: &Path) -> Result<Option<Project>> {
        match find_project_root(start) {
            Some(root) => Ok(Some(Project::load(&root)?)),
            None => Ok(None),
        }
    }

    /// Loads the marker at a known project root.
    pub fn load(root: &Path) -> Result<Project> {
        let path = root.join(PROJECT_MARKER);
        let raw = fs::read_to_string(&path)?;
        let manifest =
            serde_json::from_str(&raw).map_err(|source| RuntimeError::Manifest { path, source })?;
        Ok(Project {
            root: root.to_path_buf(),
            manifest,
        })
    }
}
