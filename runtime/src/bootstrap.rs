//! The startup sequence.
//!
//! Bootstrap is a linear state machine with no branching back:
//!
//! 1. **Version gate** — when a minimum was declared, anything below it is
//!    a hard stop.
//! 2. **Logging setup** — destination chosen from the bound `verbose` flag
//!    and the project context, sink installed once.
//! 3. **Downstream setup** — registered collaborators run in fixed order,
//!    each receiving the same merged argument record and mutable tree
//!    access. Collaborators may register additional commands, so command
//!    resolution must happen strictly after [`Bootstrap::run`] returns.

use forgekit_core::ArgumentRecord;
use forgekit_dispatch::CommandTree;

use crate::error::Result;
use crate::logging::{init, select_target};
use crate::version::{Version, ensure};

/// The narrow contract a downstream collaborator implements.
///
/// Collaborators receive the fully merged argument record built from every
/// composed root mixin, and may register additional [`CommandNode`]s on the
/// tree before resolution starts.
///
/// [`CommandNode`]: forgekit_dispatch::CommandNode
pub trait Setup {
    /// Collaborator name, used in log output.
    fn name(&self) -> &str;

    /// Performs this collaborator's startup work.
    fn setup(&self, args: &ArgumentRecord, tree: &mut CommandTree) -> Result<()>;
}

/// Orchestrates process startup.
///
/// # Examples
///
/// ```
/// use forgekit_runtime::{Bootstrap, Version};
///
/// let bootstrap = Bootstrap::new().require(Version::new(99, 0, 0));
/// // The gate alone can be exercised without running the full sequence:
/// assert!(forgekit_runtime::ensure(Version::new(99, 0, 0)).is_err());
/// # let _ = bootstrap;
/// ```
#[derive(Default)]
pub struct Bootstrap {
    min_version: Option<Version>,
    hooks: Vec<Box<dyn Setup>>,
}

impl Bootstrap {
    /// Creates a bootstrap with no version requirement or collaborators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the minimum tool version this embedding requires.
    pub fn require(mut self, min: Version) -> Self {
        self.min_version = Some(min);
        self
    }

    /// Appends a collaborator; collaborators run in registration order.
    pub fn with_setup(mut self, hook: impl Setup + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Runs the startup sequence.
    pub fn run(&self, args: &ArgumentRecord, tree: &mut CommandTree) -> Result<()> {
        if let Some(min) = self.min_version {
            ensure(min)?;
        }

        let cwd = std::env::current_dir()?;
        let target = select_target(args.flag("verbose"), &cwd)?;
        init(&target)?;
        tracing::info!(version = %Version::CURRENT, "bootstrap complete, running setup hooks");

        for hook in &self.hooks {
            tracing::debug!(collaborator = hook.name(), "running setup");
            hook.setup(args, tree)?;
        }
        Ok(())
    }
}
