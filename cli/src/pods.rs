//! Pod environment collaborator.
//!
//! Pods are prepared environments commands can run inside of. This core
//! only validates and records the selection; provisioning happens in the
//! pod tooling the commands delegate to.

use forgekit_core::{ArgumentRecord, FlagSet, ValueType};
use forgekit_dispatch::CommandTree;
use forgekit_runtime::{Result, RuntimeError, Setup};

/// Flags the pod concern contributes to the root composition.
pub fn flags() -> FlagSet {
    FlagSet::new("pods").option(
        None,
        "pod",
        "Run inside the named pod environment",
        ValueType::Str,
    )
}

/// The pod/environment setup collaborator.
pub struct PodSetup;

impl Setup for PodSetup {
    fn name(&self) -> &str {
        "pods"
    }

    fn setup(&self, args: &ArgumentRecord, _tree: &mut CommandTree) -> Result<()> {
        let Some(pod) = args.str_value("pod") else {
            return Ok(());
        };
        if !is_valid_pod_name(pod) {
            return Err(RuntimeError::Config(format!("invalid pod name `{pod}`")));
        }
        tracing::info!(pod, "pod environment selected");
        Ok(())
    }
}

fn is_valid_pod_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use forgekit_core::{bind, compose};
    use forgekit_dispatch::CommandNode;

    use super::*;

    fn record(tokens: &[&str]) -> ArgumentRecord {
        let set = compose([&flags()]).unwrap();
        let tokens: Vec<String> = tokens.iter().map(|s| s.to_string()).collect();
        let (record, _) = bind(&set, &tokens).unwrap();
        record
    }

    fn tree() -> CommandTree {
        CommandTree::new(CommandNode::new("forgekit", "")).unwrap()
    }

    #[test]
    fn test_pod_names() {
        assert!(is_valid_pod_name("build-env_2"));
        assert!(!is_valid_pod_name(""));
        assert!(!is_valid_pod_name("has space"));
        assert!(!is_valid_pod_name("semi;colon"));
    }

    #[test]
    fn test_setup_without_pod_selection_is_a_no_op() {
        PodSetup.setup(&record(&[]), &mut tree()).unwrap();
    }

    #[test]
    fn test_setup_accepts_valid_selection() {
        PodSetup
            .setup(&record(&["--pod", "ubuntu-24"]), &mut tree())
            .unwrap();
    }

    #[test]
    fn test_setup_rejects_invalid_selection() {
        let err = PodSetup
            .setup(&record(&["--pod", "bad name"]), &mut tree())
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Config(_)));
    }
}
