//! add command - Require a dependency in module-info.java

use std::fs;

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::core::paths::MODULE_MARKER;
use crate::core::project::Dependency;
use crate::core::scaffold::{self, MarkerUpdate};
use crate::engine::{self, Context};
use crate::ui::output;

/// Add `dependency` to the module marker and record it in the descriptor.
///
/// Only `javafx` (and its aliases) is known; anything else is reported as
/// an unsupported dependency. If the descriptor cannot be written, the
/// module marker is put back as it was.
pub fn add(ctx: &Context, config: &Config, dependency: &str) -> Result<()> {
    let verbosity = ctx.verbosity();
    let mut session = engine::open_project(ctx, config)?;
    let dep: Dependency = dependency.parse()?;

    let marker_path = session.paths.module_marker();
    let original = fs::read_to_string(&marker_path)
        .with_context(|| format!("failed to read {}", MODULE_MARKER))?;

    let marker = scaffold::add_requirement(&session.paths, dep)
        .with_context(|| format!("failed to update {}", MODULE_MARKER))?;
    let recorded = session.project.add_requirement(dep);
    if recorded {
        if let Err(err) = session.project.write(&session.paths) {
            if marker == MarkerUpdate::Added {
                if let Err(restore) = scaffold::write_file(&marker_path, &original) {
                    tracing::warn!("failed to restore {}: {}", MODULE_MARKER, restore);
                }
            }
            return Err(anyhow::Error::new(err).context("failed to write project descriptor"));
        }
    }

    match (marker, recorded) {
        (MarkerUpdate::AlreadyPresent, false) => {
            output::print(format!("{} is already a dependency", dep), verbosity)
        }
        _ => {
            output::success(format!("Added {} to {}", dep, MODULE_MARKER), verbosity);
            output::kv("modules", dep.modules().join(", "), verbosity);
        }
    }
    Ok(())
}
