//! Top-level invocation and the single error boundary.
//!
//! Everything fatal funnels through [`run`]: the error is logged with full
//! detail to the active sink, rendered to the user as one concise line, and
//! turned into exit code 1. Cancellation is silent. No other layer catches
//! broad error classes.

use std::path::Path;

use owo_colors::OwoColorize;

use forgekit_core::{bind_partial, compose};
use forgekit_dispatch::{CommandError, DispatchError};
use forgekit_runtime::{Bootstrap, RuntimeError, paths};

use crate::commands;
use crate::plugins::PluginSetup;
use crate::pods::PodSetup;

/// Runs the tool and maps the error taxonomy onto a process exit code.
pub fn run(argv: Vec<String>) -> i32 {
    // A keyboard interrupt mirrors a cancelled run: newline, no trace.
    let _ = ctrlc::set_handler(|| {
        println!();
        std::process::exit(1);
    });

    match try_run(argv) {
        Ok(()) => 0,
        Err(RuntimeError::Dispatch(DispatchError::Command(CommandError::Interrupted))) => {
            println!();
            1
        }
        Err(err) => {
            tracing::error!(error = %err, "fatal error");
            eprintln!("{} {err}", "error:".red());
            1
        }
    }
}

fn try_run(argv: Vec<String>) -> Result<(), RuntimeError> {
    paths::ensure_dir(&paths::global_dir()?)?;

    let extra = std::env::var(paths::EXTRA_ARGS_ENV).ok();
    let argv = splice_extra_args(argv, extra.as_deref());

    let mut tree = commands::build_tree(&program_name(&argv))?;

    // Bootstrap runs before the tree is final, so the root composition is
    // bound tolerantly here; eval re-binds strictly afterwards.
    let tokens = argv.get(1..).unwrap_or_default();
    let root_set = compose(tree.root().flags().iter()).map_err(DispatchError::from)?;
    let (root_args, _) = bind_partial(&root_set, tokens).map_err(DispatchError::from)?;

    Bootstrap::new()
        .with_setup(PluginSetup)
        .with_setup(PodSetup)
        .run(&root_args, &mut tree)?;

    tree.eval(&argv)?;
    Ok(())
}

/// Splices environment-supplied default arguments between the program name
/// and the explicit CLI tokens.
fn splice_extra_args(argv: Vec<String>, extra: Option<&str>) -> Vec<String> {
    let Some(extra) = extra else {
        return argv;
    };
    let mut iter = argv.into_iter();
    let mut spliced = Vec::new();
    if let Some(program) = iter.next() {
        spliced.push(program);
    }
    spliced.extend(extra.split_whitespace().map(String::from));
    spliced.extend(iter);
    spliced
}

fn program_name(argv: &[String]) -> String {
    argv.first()
        .map(|argv0| Path::new(argv0))
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .unwrap_or(paths::BIN_NAME)
        .to_string()
}
