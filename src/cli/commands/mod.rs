//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Calls the engine to execute the command
//! 3. Formats and displays output
//!
//! Handlers do NOT spawn external tools directly; everything goes through
//! the [`ProcessRunner`] passed in, so tests can record the command lines.

mod add;
mod build;
mod clean;
mod completion;
mod doc;
mod info;
mod init;
mod new;
mod run;

// Re-export command functions for testing and direct invocation
pub use add::add;
pub use build::build;
pub use clean::clean;
pub use completion::completion;
pub use doc::doc;
pub use info::info;
pub use init::init;
pub use new::{new, NewOptions};
pub use run::run;

use crate::cli::args::Command;
use crate::core::config::Config;
use crate::engine::Context;
use crate::toolchain::ProcessRunner;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(
    command: Command,
    ctx: &Context,
    config: &Config,
    runner: &dyn ProcessRunner,
) -> Result<()> {
    match command {
        // Setup commands
        Command::New {
            name,
            package,
            driver,
            no_git,
        } => new::new(
            ctx,
            config,
            &NewOptions {
                name,
                package,
                driver,
                no_git,
            },
        ),
        Command::Init { no_git } => init::init(ctx, config, no_git),

        // Toolchain commands
        Command::Build { args } => build::build(ctx, config, runner, &args),
        Command::Run { args } => run::run(ctx, config, runner, &args),
        Command::Doc { args } => doc::doc(ctx, config, runner, &args),
        Command::Clean { doc } => clean::clean(ctx, config, doc),

        // Project maintenance
        Command::Add { dependency } => add::add(ctx, config, &dependency),
        Command::Info { json } => info::info(ctx, config, json),
        Command::Completion { shell } => completion::completion(shell),
    }
}
