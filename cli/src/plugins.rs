//! Plugin-discovery collaborator.
//!
//! Discovery is deliberately shallow: manifests under the project's
//! `plugins/` directory are surfaced as grouping commands so they show up
//! in usage output; running a plugin's actual behavior stays outside this
//! core. `--safemode` skips the scan entirely.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use forgekit_core::{ArgumentRecord, FlagSet};
use forgekit_dispatch::{CommandNode, CommandTree};
use forgekit_runtime::{Project, Result, RuntimeError, Setup};

const PLUGIN_DIR: &str = "plugins";
const PLUGIN_MANIFEST: &str = "plugin.json";

/// Flags the plugin concern contributes to the root composition.
pub fn flags() -> FlagSet {
    FlagSet::new("plugins").flag(None, "safemode", "Skip plugin discovery")
}

#[derive(Debug, Deserialize)]
struct PluginManifest {
    id: String,
    #[serde(default)]
    description: String,
}

/// The plugin-discovery setup collaborator.
pub struct PluginSetup;

impl Setup for PluginSetup {
    fn name(&self) -> &str {
        "plugins"
    }

    fn setup(&self, args: &ArgumentRecord, tree: &mut CommandTree) -> Result<()> {
        if args.flag("safemode") {
            tracing::info!("safemode requested, skipping plugin discovery");
            return Ok(());
        }
        let cwd = std::env::current_dir()?;
        let Some(project) = Project::discover(&cwd)? else {
            tracing::debug!("no project context, skipping plugin discovery");
            return Ok(());
        };
        let found = discover_into(&project.root, tree)?;
        tracing::info!(
            project = %project.manifest.id,
            count = found,
            "plugin discovery finished"
        );
        Ok(())
    }
}

/// Scans `<root>/plugins/*/plugin.json` and registers each manifest as a
/// grouping command, in bundle-name order. Returns how many registered.
fn discover_into(root: &Path, tree: &mut CommandTree) -> Result<usize> {
    let dir = root.join(PLUGIN_DIR);
    if !dir.is_dir() {
        return Ok(0);
    }

    let mut bundles: Vec<_> = fs::read_dir(&dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.join(PLUGIN_MANIFEST).is_file())
        .collect();
    bundles.sort();

    let mut registered = 0;
    for bundle in bundles {
        let path = bundle.join(PLUGIN_MANIFEST);
        let raw = fs::read_to_string(&path)?;
        let manifest: PluginManifest = serde_json::from_str(&raw)
            .map_err(|source| RuntimeError::Manifest { path, source })?;
        tracing::debug!(plugin = %manifest.id, "registering discovered plugin");
        tree.register(&[], CommandNode::new(&manifest.id, &manifest.description))?;
        registered += 1;
    }
    Ok(registered)
}
