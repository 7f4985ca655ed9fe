//! build command - Compile the project when sources changed

use anyhow::Result;

use crate::core::config::Config;
use crate::engine::{self, BuildOutcome, Context};
use crate::toolchain::{ProcessRunner, ToolArgs};
use crate::ui::output::{self, Verbosity};

/// Compile if any source is stale.
///
/// `raw` is everything after the verb: `--jfx`/`--fx` and javac flags.
pub fn build(
    ctx: &Context,
    config: &Config,
    runner: &dyn ProcessRunner,
    raw: &[String],
) -> Result<()> {
    let session = engine::open_project(ctx, config)?;
    let args = ToolArgs::parse_tool_only(raw);

    let outcome = engine::build(&session, runner, &args)?;
    report(outcome, &args, ctx.verbosity());
    Ok(())
}

/// Print the result of a build.
pub(super) fn report(outcome: BuildOutcome, args: &ToolArgs, verbosity: Verbosity) {
    match outcome {
        BuildOutcome::UpToDate => output::print("Build is up to date", verbosity),
        BuildOutcome::Compiled { sources } => {
            let mut message = format!("Build successful ({} source file(s))", sources);
            if let Some(flags) = args.describe_flags() {
                message.push_str(&format!(" with flags: {}", flags));
            }
            output::success(message, verbosity);
        }
    }
}
