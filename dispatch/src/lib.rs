//! Command registration and dispatch for ForgeKit.
//!
//! The dispatch layer turns a raw argv into a running command:
//!
//! - [`CommandNode`] — a named, described, optionally executable unit with
//!   its own flag mixins and child commands.
//! - [`CommandTree`] — owns the root node; supports registration at
//!   arbitrary depth, greedy resolution of a token stream to the most
//!   specific node, usage-string synthesis, and top-level evaluation.
//! - [`CommandError`] / [`DispatchError`] — the failure taxonomy the
//!   outermost boundary maps to exit codes.
//!
//! Registration happens once at startup (collaborators may add commands
//! during bootstrap); the tree is immutable from the first `resolve` on.
//!
//! # Example
//!
//! ```
//! use forgekit_core::FlagSet;
//! use forgekit_dispatch::{CommandNode, CommandTree};
//!
//! let mut tree = CommandTree::new(
//!     CommandNode::new("tool", "A developer tool")
//!         .with_flags(FlagSet::new("logging").flag(Some('v'), "verbose", "Verbose logging")),
//! ).unwrap();
//!
//! tree.register(&[], CommandNode::new("build", "Compile").with_alias("b")).unwrap();
//!
//! let argv: Vec<String> = ["tool", "b"].iter().map(|s| s.to_string()).collect();
//! tree.eval(&argv).unwrap(); // `build` has no handler: prints its usage
//! ```

mod error;
mod node;
mod tree;

pub use error::{CommandError, DispatchError, Result};
pub use node::{CommandNode, Handler};
pub use tree::CommandTree;
