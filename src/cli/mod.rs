//! cli
//!
//! Command-line interface layer for Javelin.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install logging
//! - Delegate to command handlers
//! - Map failures to process exit codes (see [`exit`])
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! handlers that drive the [`crate::engine`]. Handlers never spawn tools
//! directly.

pub mod args;
pub mod commands;
pub mod exit;

pub use args::{Cli, Shell};
pub use exit::CliError;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::core::config::Config;
use crate::engine;
use crate::toolchain::SystemRunner;
use crate::ui::output::{self, Verbosity};

/// Environment variable overriding the log filter.
pub const LOG_ENV: &str = "JAVELIN_LOG";

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> ExitCode {
    let (args, verb) = args::normalize(std::env::args_os());
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let code = exit::clap_exit_code(&err, verb);
            // clap picks stdout for help and stderr for errors
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    let ctx = engine::Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };
    init_tracing(ctx.verbosity());

    let result = Config::load()
        .map_err(anyhow::Error::from)
        .and_then(|config| commands::dispatch(cli.command, &ctx, &config, &SystemRunner));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::from(exit::exit_code(&err))
        }
    }
}

fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init();
}
