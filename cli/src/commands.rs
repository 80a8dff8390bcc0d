//! Built-in commands and the root composition.
//!
//! The root node composes one flag mixin per concern — logging, plugins,
//! pods — so every command under it accepts the global flags, and the
//! bootstrap collaborators receive one merged record built from all three.

use forgekit_core::FlagSet;
use forgekit_dispatch::{CommandNode, CommandTree, Result};
use forgekit_runtime::{Version, paths};

use crate::{plugins, pods};

/// One-line tool description shown at the top of root usage.
pub const DESCRIPTION: &str = "Build, package, and manage project workspaces";

/// Flags the logging concern contributes to the root composition.
pub fn logging_flags() -> FlagSet {
    FlagSet::new("logging").flag(Some('v'), "verbose", "Enable verbose logging")
}

/// Builds the command tree: root composition plus built-in commands.
pub fn build_tree(program: &str) -> Result<CommandTree> {
    let root = CommandNode::new(program, DESCRIPTION)
        .with_flags(logging_flags())
        .with_flags(plugins::flags())
        .with_flags(pods::flags())
        .with_handler(|tree, args| {
            if !args.rest().is_empty() {
                tracing::debug!(tokens = ?args.rest(), "unrecognized arguments, showing usage");
            }
            println!("{}", tree.root_usage());
            Ok(())
        });

    let mut tree = CommandTree::new(root)?;
    tree.register(
        &[],
        CommandNode::new("usage", "Show usage information")
            .with_alias("u")
            .with_handler(|tree, _args| {
                println!("{}", tree.root_usage());
                Ok(())
            }),
    )?;
    tree.register(
        &[],
        CommandNode::new("version", "Show current version")
            .with_alias("v")
            .with_handler(|_tree, _args| {
                println!("{} v{}", paths::TOOL_NAME, Version::CURRENT);
                Ok(())
            }),
    )?;
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_built_ins_are_registered_with_aliases() {
        let tree = build_tree("forgekit").unwrap();
        assert!(tree.root().find_child("usage").is_some());
        assert!(tree.root().find_child("u").is_some());
        assert!(tree.root().find_child("version").is_some());
        assert!(tree.root().find_child("v").is_some());
    }

    #[test]
    fn test_root_usage_lists_built_ins_in_registration_order() {
        let tree = build_tree("forgekit").unwrap();
        let usage = tree.root_usage();
        assert!(usage.contains("u, usage"));
        assert!(usage.contains("v, version"));
        assert!(usage.contains("-v, --verbose"));
        assert!(usage.find("usage").unwrap() < usage.find("version").unwrap());
    }

    #[test]
    fn test_version_command_evaluates_cleanly() {
        let tree = build_tree("forgekit").unwrap();
        tree.eval(&argv(&["forgekit", "version"])).unwrap();
        tree.eval(&argv(&["forgekit", "v"])).unwrap();
    }

    #[test]
    fn test_bogus_command_degrades_to_root() {
        let tree = build_tree("forgekit").unwrap();
        // `bogus` names no child: the root handler runs with it as a rest
        // token, which is not an error.
        tree.eval(&argv(&["forgekit", "bogus"])).unwrap();
    }

    #[test]
    fn test_global_flags_reach_built_ins() {
        let tree = build_tree("forgekit").unwrap();
        tree.eval(&argv(&["forgekit", "--verbose", "version"])).unwrap();
    }
}
