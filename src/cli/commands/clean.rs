//! clean command - Remove compiled classes and optionally docs

use anyhow::Result;

use crate::core::config::Config;
use crate::core::paths::{BIN_DIR, DOCS_DIR};
use crate::engine::{self, Context};
use crate::ui::output;

/// Empty `bin/`; with `doc`, also delete `docs/`.
pub fn clean(ctx: &Context, config: &Config, doc: bool) -> Result<()> {
    let verbosity = ctx.verbosity();
    let session = engine::open_project(ctx, config)?;

    let outcome = engine::clean(&session.paths, doc)?;

    let mut removed = Vec::new();
    if outcome.bin {
        removed.push(format!("{}/", BIN_DIR));
    }
    if outcome.docs {
        removed.push(format!("{}/", DOCS_DIR));
    }

    if removed.is_empty() {
        output::print("Nothing to clean", verbosity);
    } else {
        output::success(format!("Cleaned {}", removed.join(" and ")), verbosity);
    }
    Ok(())
}
