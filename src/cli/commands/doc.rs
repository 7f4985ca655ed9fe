//! doc command - Generate documentation

use anyhow::Result;

use crate::core::config::Config;
use crate::core::paths::DOCS_DIR;
use crate::engine::{self, Context};
use crate::toolchain::{ProcessRunner, ToolArgs};
use crate::ui::output;

/// Run javadoc over every source into `docs/`.
pub fn doc(
    ctx: &Context,
    config: &Config,
    runner: &dyn ProcessRunner,
    raw: &[String],
) -> Result<()> {
    let verbosity = ctx.verbosity();
    let session = engine::open_project(ctx, config)?;
    let args = ToolArgs::parse_tool_only(raw);

    let sources = engine::document(&session, runner, &args)?;

    let mut message = format!(
        "Documentation generated in {}/ ({} source file(s))",
        DOCS_DIR, sources
    );
    if let Some(flags) = args.describe_flags() {
        message.push_str(&format!(" with flags: {}", flags));
    }
    output::success(message, verbosity);
    Ok(())
}
