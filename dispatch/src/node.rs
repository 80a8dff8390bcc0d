//! Command nodes.

use std::fmt;
use std::fmt::Write as _;

use forgekit_core::{ArgumentRecord, FlagSet};

use crate::error::CommandError;
use crate::tree::CommandTree;

/// Behavior attached to a command node.
///
/// Handlers receive the bound argument record plus a read-only view of the
/// tree they live in, so built-ins like `usage` can synthesize help from
/// whatever commands ended up registered by bootstrap.
pub type Handler = Box<dyn Fn(&CommandTree, &ArgumentRecord) -> Result<(), CommandError>>;

/// One addressable unit in the command hierarchy.
///
/// A node has a long name, an optional short alias, one-line help, the flag
/// mixins it accepts, an optional handler, and child nodes. A node without a
/// handler is a pure grouping node: invoking it prints its usage instead of
/// running anything. Nodes are built declaratively before evaluation begins
/// and never mutated afterwards.
///
/// # Examples
///
/// ```
/// use forgekit_core::FlagSet;
/// use forgekit_dispatch::CommandNode;
///
/// let build = CommandNode::new("build", "Compile the current project")
///     .with_alias("b")
///     .with_flags(FlagSet::new("build").flag(None, "release", "Optimized build"))
///     .with_handler(|_tree, _args| Ok(()));
///
/// assert_eq!(build.name(), "build");
/// assert!(build.matches("b"));
/// assert!(build.matches("build"));
/// ```
pub struct CommandNode {
    name: String,
    alias: Option<String>,
    help: String,
    flags: Vec<FlagSet>,
    handler: Option<Handler>,
    children: Vec<CommandNode>,
}

impl CommandNode {
    /// Creates a node with no alias, flags, handler, or children.
    pub fn new(name: &str, help: &str) -> Self {
        Self {
            name: name.to_string(),
            alias: None,
            help: help.to_string(),
            flags: Vec::new(),
            handler: None,
            children: Vec::new(),
        }
    }

    /// Sets the short alias.
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    /// Adds a flag mixin to this node's own schema set.
    pub fn with_flags(mut self, flags: FlagSet) -> Self {
        self.flags.push(flags);
        self
    }

    /// Attaches the handler invoked when this node is the matched command.
    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&CommandTree, &ArgumentRecord) -> Result<(), CommandError> + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Nests a child command at build time.
    pub fn with_child(mut self, child: CommandNode) -> Self {
        self.children.push(child);
        self
    }

    /// The node's long name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node's alias, if any.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The node's one-line description.
    pub fn help(&self) -> &str {
        &self.help
    }

    /// The flag mixins declared on this node itself.
    pub fn flags(&self) -> &[FlagSet] {
        &self.flags
    }

    /// Child nodes, in registration order.
    pub fn children(&self) -> &[CommandNode] {
        &self.children
    }

    /// Whether this node carries behavior of its own.
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    pub(crate) fn handler(&self) -> Option<&Handler> {
        self.handler.as_ref()
    }

    pub(crate) fn push_child(&mut self, child: CommandNode) {
        self.children.push(child);
    }

    /// Whether a token addresses this node by name or alias.
    pub fn matches(&self, token: &str) -> bool {
        self.name == token || self.alias.as_deref() == Some(token)
    }

    /// Finds a direct child by name or alias.
    pub fn find_child(&self, token: &str) -> Option<&CommandNode> {
        self.children.iter().find(|child| child.matches(token))
    }

    pub(crate) fn find_child_mut(&mut self, token: &str) -> Option<&mut CommandNode> {
        self.children.iter_mut().find(|child| child.matches(token))
    }

    /// Synthesizes the usage string for this node.
    ///
    /// `invocation` is the full command path as the user would type it
    /// (e.g. `forgekit` or `forgekit build`). Flags and children are listed
    /// in registration order.
    pub fn usage(&self, invocation: &str) -> String {
        let mut out = String::new();

        let mut line = format!("Usage: {invocation}");
        if self.flags.iter().any(|set| !set.schemas().is_empty()) {
            line.push_str(" [options]");
        }
        if !self.children.is_empty() {
            line.push_str(" <command>");
        }
        line.push_str(" [args...]");
        out.push_str(&line);
        out.push('\n');

        if !self.help.is_empty() {
            let _ = write!(out, "\n{}\n", self.help);
        }

        let mut flag_rows: Vec<(String, &str)> = Vec::new();
        for set in &self.flags {
            for schema in set.schemas() {
                let mut label = match schema.short {
                    Some(short) => format!("-{short}, --{}", schema.long),
                    None => format!("    --{}", schema.long),
                };
                if let Some(hint) = schema.value_type.hint() {
                    let _ = write!(label, " {hint}");
                }
                flag_rows.push((label, schema.help.as_str()));
            }
        }
        if !flag_rows.is_empty() {
            out.push_str("\nOptions:\n");
            let width = flag_rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
            for (label, help) in &flag_rows {
                let _ = writeln!(out, "    {label:<width$}    {help}");
            }
        }

        if !self.children.is_empty() {
            out.push_str("\nCommands:\n");
            let width = self
                .children
                .iter()
                .map(|c| c.name.len())
                .max()
                .unwrap_or(0);
            for child in &self.children {
                let alias = match child.alias.as_deref() {
                    Some(alias) => format!("{alias}, "),
                    None => "   ".to_string(),
                };
                let _ = writeln!(out, "    {alias}{:<width$}    {}", child.name, child.help);
            }
        }

        out
    }
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("name", &self.name)
            .field("alias", &self.alias)
            .field("handler", &self.handler.is_some())
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}
