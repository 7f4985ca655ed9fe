//! run command - Build if needed, then launch the driver

use anyhow::Result;

use crate::core::config::Config;
use crate::engine::{self, Context};
use crate::toolchain::{ProcessRunner, ToolArgs};

use super::build::report;

/// Compile when stale, then run the entry point.
///
/// Leading `-` options go to `java`; the first positional token, or
/// everything after `--`, is passed to the program after the entry point.
/// The implicit compile only sees the JavaFX request. A failed compile
/// stops here and the program is not launched.
pub fn run(
    ctx: &Context,
    config: &Config,
    runner: &dyn ProcessRunner,
    raw: &[String],
) -> Result<()> {
    let verbosity = ctx.verbosity();
    let session = engine::open_project(ctx, config)?;
    let args = ToolArgs::parse(raw);

    let compile_args = ToolArgs {
        fx: args.fx,
        ..Default::default()
    };
    let outcome = engine::build(&session, runner, &compile_args)?;
    report(outcome, &compile_args, verbosity);

    tracing::debug!("launching {}", session.project.entry_point());
    engine::execute(&session, runner, &args)?;
    Ok(())
}
