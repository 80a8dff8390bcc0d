//! The command tree: registration, resolution, and evaluation.

use forgekit_core::{FlagSet, bind, compose, is_flag_token};

use crate::error::{DispatchError, Result};
use crate::node::CommandNode;

/// Owns the root [`CommandNode`] and drives dispatch.
///
/// The tree is assembled declaratively at startup —
/// [`register`](CommandTree::register) inserts nodes at arbitrary depth —
/// and is never mutated once evaluation begins.
/// Flag mixins declared on a node apply to the node and everything below
/// it, so root-level mixins act as the tool's global flags; the composed
/// union along every root-to-node chain is checked for collisions at
/// registration time.
///
/// # Examples
///
/// ```
/// use forgekit_dispatch::{CommandNode, CommandTree};
///
/// let mut tree = CommandTree::new(CommandNode::new("tool", "A developer tool")).unwrap();
/// tree.register(&[], CommandNode::new("build", "Compile").with_alias("b")).unwrap();
/// tree.register(&["build"], CommandNode::new("doc", "Build docs")).unwrap();
///
/// let tokens: Vec<String> = ["build", "doc", "--open"].iter().map(|s| s.to_string()).collect();
/// let (node, remaining) = tree.resolve(&tokens);
/// assert_eq!(node.name(), "doc");
/// assert_eq!(remaining, vec!["--open".to_string()]);
/// ```
#[derive(Debug)]
pub struct CommandTree {
    root: CommandNode,
}

impl CommandTree {
    /// Wraps a root node, validating any children nested at build time.
    pub fn new(root: CommandNode) -> Result<Self> {
        validate_subtree(&root, &[])?;
        Ok(Self { root })
    }

    /// The root node; its lifetime is the process lifetime.
    pub fn root(&self) -> &CommandNode {
        &self.root
    }

    /// Inserts a node under an existing parent path.
    ///
    /// The path is a sequence of child names (or aliases) starting below
    /// the root; an empty path registers a top-level command. Fails with
    /// [`DispatchError::UnknownParent`] when the path names no registered
    /// node, with a duplicate error when the node collides with a sibling,
    /// and with a compose error when the node's mixins collide with flags
    /// inherited from its ancestors.
    pub fn register(&mut self, parent_path: &[&str], node: CommandNode) -> Result<()> {
        // Walk immutably first: existence check plus the inherited mixins
        // needed for collision validation.
        let mut parent = &self.root;
        let mut inherited: Vec<&FlagSet> = self.root.flags().iter().collect();
        for segment in parent_path {
            parent = parent
                .find_child(segment)
                .ok_or_else(|| DispatchError::UnknownParent(parent_path.join(" ")))?;
            inherited.extend(parent.flags().iter());
        }

        let parent_label = if parent_path.is_empty() {
            self.root.name().to_string()
        } else {
            parent_path.join(" ")
        };
        check_sibling(parent.children().iter(), &node, &parent_label)?;
        validate_subtree(&node, &inherited)?;

        tracing::debug!(
            command = node.name(),
            parent = %parent_label,
            "registering command"
        );

        let mut slot = &mut self.root;
        for segment in parent_path {
            slot = match slot.find_child_mut(segment) {
                Some(child) => child,
                None => return Err(DispatchError::UnknownParent(parent_path.join(" "))),
            };
        }
        slot.push_child(node);
        Ok(())
    }

    /// Resolves a token stream to the most specific matching node.
    ///
    /// Tokens are scanned in order. Flag-shaped tokens are skipped — they
    /// belong to the binder — along with the following token when the flag
    /// is declared value-taking somewhere on the path walked so far. Each
    /// non-flag token that names a child of the current node is consumed,
    /// descending one level. The first non-flag token that names no child
    /// stops resolution: the current node is the match and every unconsumed
    /// token, flags included, is returned as its argument stream. Empty
    /// input resolves to the root.
    ///
    /// Flags the resolver cannot see yet (a deeper command's own flags
    /// appearing before the command path) have unknowable arity, so their
    /// value token is treated as a path candidate — ambiguity is resolved
    /// in favor of descending into a child. Flags a command accepts must
    /// therefore not collide lexically with its child names.
    pub fn resolve<'a>(&'a self, tokens: &[String]) -> (&'a CommandNode, Vec<String>) {
        let (path, remaining) = self.resolve_path(tokens);
        (path[path.len() - 1], remaining)
    }

    /// Synthesizes the root usage string.
    pub fn root_usage(&self) -> String {
        self.root.usage(self.root.name())
    }

    /// Synthesizes the usage string for the node at `path` (empty = root).
    pub fn usage(&self, path: &[&str]) -> Result<String> {
        let mut node = &self.root;
        let mut invocation = self.root.name().to_string();
        for segment in path {
            node = node
                .find_child(segment)
                .ok_or_else(|| DispatchError::UnknownParent(path.join(" ")))?;
            invocation.push(' ');
            invocation.push_str(node.name());
        }
        Ok(node.usage(&invocation))
    }

    /// Evaluates a full argv, program name included.
    ///
    /// Strips the program name, resolves the command, composes the matched
    /// node's inherited and own mixins, binds the remaining tokens, and
    /// invokes the handler with the bound record (leftover non-flag tokens
    /// attached in order). A node without a handler prints its usage
    /// instead of failing.
    pub fn eval(&self, argv: &[String]) -> Result<()> {
        let tokens = argv.get(1..).unwrap_or_default();
        let (path, remaining) = self.resolve_path(tokens);
        let node = path[path.len() - 1];

        let specs: Vec<&FlagSet> = path.iter().flat_map(|n| n.flags().iter()).collect();
        let set = compose(specs)?;
        let (record, rest) = bind(&set, &remaining)?;
        let record = record.with_rest(rest);

        let invocation = invocation_of(&path);
        match node.handler() {
            Some(handler) => {
                tracing::debug!(command = %invocation, "running command");
                handler(self, &record).map_err(DispatchError::from)
            }
            None => {
                tracing::debug!(command = %invocation, "no handler, showing usage");
                println!("{}", node.usage(&invocation));
                Ok(())
            }
        }
    }

    fn resolve_path<'a>(&'a self, tokens: &[String]) -> (Vec<&'a CommandNode>, Vec<String>) {
        let mut current = &self.root;
        let mut path = vec![current];
        let mut remaining = Vec::with_capacity(tokens.len());
        let mut halted = false;
        let mut iter = tokens.iter();

        while let Some(token) = iter.next() {
            if halted {
                remaining.push(token.clone());
                continue;
            }
            if is_flag_token(token) {
                remaining.push(token.clone());
                if takes_value_on_path(&path, token) {
                    if let Some(value) = iter.next() {
                        remaining.push(value.clone());
                    }
                }
                continue;
            }
            match current.find_child(token) {
                Some(child) => {
                    current = child;
                    path.push(child);
                }
                None => {
                    halted = true;
                    remaining.push(token.clone());
                }
            }
        }

        (path, remaining)
    }
}

/// Whether any schema visible on the walked path declares `token` as a
/// value-taking flag.
fn takes_value_on_path(path: &[&CommandNode], token: &str) -> bool {
    path.iter()
        .flat_map(|node| node.flags())
        .flat_map(|set| set.schemas())
        .any(|schema| schema.matches(token) && schema.takes_value())
}

fn invocation_of(path: &[&CommandNode]) -> String {
    path.iter()
        .map(|node| node.name())
        .collect::<Vec<_>>()
        .join(" ")
}

fn check_sibling<'a, I>(siblings: I, node: &CommandNode, parent: &str) -> Result<()>
where
    I: IntoIterator<Item = &'a CommandNode>,
{
    for sibling in siblings {
        if sibling.matches(node.name()) {
            return Err(DispatchError::DuplicateCommand {
                name: node.name().to_string(),
                parent: parent.to_string(),
            });
        }
        if let Some(alias) = node.alias() {
            if sibling.matches(alias) {
                return Err(DispatchError::DuplicateAlias {
                    alias: alias.to_string(),
                    parent: parent.to_string(),
                });
            }
        }
    }
    Ok(())
}

fn validate_subtree(node: &CommandNode, inherited: &[&FlagSet]) -> Result<()> {
    let own: Vec<&FlagSet> = inherited
        .iter()
        .copied()
        .chain(node.flags().iter())
        .collect();
    compose(own.iter().copied())?;

    let mut accepted: Vec<&CommandNode> = Vec::new();
    for child in node.children() {
        check_sibling(accepted.iter().copied(), child, node.name())?;
        accepted.push(child);
        validate_subtree(child, &own)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use forgekit_core::{ArgumentRecord, ValueType};

    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn sample_tree() -> CommandTree {
        let mut tree = CommandTree::new(
            CommandNode::new("tool", "A developer tool").with_flags(
                FlagSet::new("logging").flag(Some('v'), "verbose", "Enable verbose logging"),
            ),
        )
        .unwrap();
        tree.register(
            &[],
            CommandNode::new("build", "Compile the project").with_alias("b"),
        )
        .unwrap();
        tree.register(&[], CommandNode::new("clean", "Remove build artifacts"))
            .unwrap();
        tree.register(&["build"], CommandNode::new("doc", "Build documentation"))
            .unwrap();
        tree
    }

    #[test]
    fn test_resolve_empty_tokens_is_root() {
        let tree = sample_tree();
        let (node, remaining) = tree.resolve(&[]);
        assert_eq!(node.name(), "tool");
        assert!(remaining.is_empty());
    }

    #[test]
    fn test_resolve_descends_greedily() {
        let tree = sample_tree();
        let (node, remaining) = tree.resolve(&tokens(&["build", "doc", "extra"]));
        assert_eq!(node.name(), "doc");
        assert_eq!(remaining, tokens(&["extra"]));
    }

    #[test]
    fn test_resolve_by_alias() {
        let tree = sample_tree();
        let (node, _) = tree.resolve(&tokens(&["b"]));
        assert_eq!(node.name(), "build");
    }

    #[test]
    fn test_resolve_skips_flag_tokens() {
        let tree = sample_tree();
        let (node, remaining) = tree.resolve(&tokens(&["--verbose", "build"]));
        assert_eq!(node.name(), "build");
        assert_eq!(remaining, tokens(&["--verbose"]));
    }

    #[test]
    fn test_resolve_skips_value_of_known_value_flag() {
        let mut tree = CommandTree::new(CommandNode::new("tool", "").with_flags(
            FlagSet::new("pods").option(None, "pod", "Target pod", ValueType::Str),
        ))
        .unwrap();
        tree.register(&[], CommandNode::new("build", "Compile"))
            .unwrap();

        // `demo` is --pod's value, not a path segment; `build` still
        // resolves even though a non-flag token precedes it.
        let (node, remaining) = tree.resolve(&tokens(&["--pod", "demo", "build"]));
        assert_eq!(node.name(), "build");
        assert_eq!(remaining, tokens(&["--pod", "demo"]));
    }

    #[test]
    fn test_resolve_value_naming_a_child_descends() {
        let mut tree = CommandTree::new(CommandNode::new("tool", "")).unwrap();
        tree.register(
            &[],
            CommandNode::new("build", "Compile").with_flags(FlagSet::new("build").option(
                None,
                "target",
                "Build target",
                ValueType::Str,
            )),
        )
        .unwrap();

        // --target is declared on `build`, not on the root, so the resolver
        // cannot know its arity yet; its value is read as a path candidate
        // and descends into the child it names.
        let (node, _) = tree.resolve(&tokens(&["--target", "build"]));
        assert_eq!(node.name(), "build");
    }

    #[test]
    fn test_unregistered_first_token_resolves_to_root() {
        let tree = sample_tree();
        let (node, remaining) = tree.resolve(&tokens(&["bogus", "build"]));
        assert_eq!(node.name(), "tool");
        // Resolution halts at the miss; `build` is data, not a path segment.
        assert_eq!(remaining, tokens(&["bogus", "build"]));
    }

    #[test]
    fn test_register_unknown_parent() {
        let mut tree = sample_tree();
        let err = tree
            .register(&["missing"], CommandNode::new("x", ""))
            .unwrap_err();
        assert!(matches!(err, DispatchError::UnknownParent(path) if path == "missing"));
    }

    #[test]
    fn test_register_rejects_duplicate_name() {
        let mut tree = sample_tree();
        let err = tree
            .register(&[], CommandNode::new("build", "Again"))
            .unwrap_err();
        assert!(matches!(err, DispatchError::DuplicateCommand { name, .. } if name == "build"));
    }

    #[test]
    fn test_register_rejects_alias_shadowing_sibling() {
        let mut tree = sample_tree();
        let err = tree
            .register(&[], CommandNode::new("bundle", "Bundle").with_alias("b"))
            .unwrap_err();
        assert!(matches!(err, DispatchError::DuplicateAlias { alias, .. } if alias == "b"));
    }

    #[test]
    fn test_register_rejects_inherited_flag_collision() {
        let mut tree = sample_tree();
        // Root already declares --verbose; a child redeclaring it must fail
        // at registration, not at eval.
        let err = tree
            .register(
                &[],
                CommandNode::new("noisy", "Noisy").with_flags(
                    FlagSet::new("noisy").flag(None, "verbose", "Conflicting"),
                ),
            )
            .unwrap_err();
        assert!(matches!(err, DispatchError::Compose(_)));
    }

    #[test]
    fn test_usage_lists_registration_order() {
        let tree = sample_tree();
        let usage = tree.usage(&[]).unwrap();
        assert!(usage.contains("b, build"));
        assert!(usage.contains("clean"));
        assert!(usage.contains("Compile the project"));
        assert!(usage.contains("Remove build artifacts"));
        assert!(usage.find("build").unwrap() < usage.find("clean").unwrap());
    }

    #[test]
    fn test_eval_binds_inherited_and_own_flags() {
        let seen: Rc<RefCell<Option<(bool, i64)>>> = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);

        let mut tree = sample_tree();
        tree.register(
            &[],
            CommandNode::new("bench", "Run benchmarks")
                .with_flags(FlagSet::new("bench").option(
                    Some('j'),
                    "jobs",
                    "Parallel jobs",
                    ValueType::Int,
                ))
                .with_handler(move |_tree, args: &ArgumentRecord| {
                    *sink.borrow_mut() =
                        Some((args.flag("verbose"), args.int_value("jobs").unwrap_or(0)));
                    Ok(())
                }),
        )
        .unwrap();

        tree.eval(&tokens(&["tool", "--verbose", "bench", "-j", "4"]))
            .unwrap();
        assert_eq!(*seen.borrow(), Some((true, 4)));
    }

    #[test]
    fn test_eval_unknown_flag_surfaces_bind_error() {
        let tree = sample_tree();
        let err = tree
            .eval(&tokens(&["tool", "build", "--does-not-exist"]))
            .unwrap_err();
        assert!(matches!(err, DispatchError::Bind(_)));
    }

    #[test]
    fn test_eval_without_handler_shows_usage() {
        let tree = sample_tree();
        // `build` has no handler; this must not error.
        tree.eval(&tokens(&["tool", "build"])).unwrap();
    }

    #[test]
    fn test_eval_passes_rest_tokens_to_handler() {
        let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut tree = sample_tree();
        tree.register(
            &[],
            CommandNode::new("run", "Run a target").with_handler(
                move |_tree, args: &ArgumentRecord| {
                    *sink.borrow_mut() = args.rest().to_vec();
                    Ok(())
                },
            ),
        )
        .unwrap();

        tree.eval(&tokens(&["tool", "run", "demo", "--verbose", "fast"]))
            .unwrap();
        assert_eq!(*seen.borrow(), tokens(&["demo", "fast"]));
    }

    #[test]
    fn test_eval_handler_failure_propagates() {
        let mut tree = sample_tree();
        tree.register(
            &[],
            CommandNode::new("fail", "Always fails").with_handler(|_, _| {
                Err(crate::error::CommandError::Failed(
                    "nothing to do".to_string(),
                ))
            }),
        )
        .unwrap();

        let err = tree.eval(&tokens(&["tool", "fail"])).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Command(crate::error::CommandError::Failed(_))
        ));
    }

    #[test]
    fn test_eval_propagates_cancellation() {
        let mut tree = sample_tree();
        tree.register(
            &[],
            CommandNode::new("slow", "Interruptible work")
                .with_handler(|_, _| Err(crate::error::CommandError::Interrupted)),
        )
        .unwrap();

        let err = tree.eval(&tokens(&["tool", "slow"])).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Command(crate::error::CommandError::Interrupted)
        ));
    }
}
