//! info command - Show the project descriptor and build status
//!
//! Read-only: nothing is compiled or written.

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::core::config::Config;
use crate::core::project::Dependency;
use crate::core::staleness::StaleReason;
use crate::engine::{self, Context};
use crate::ui::output;

#[derive(Debug, Serialize)]
struct InfoReport<'a> {
    name: &'a str,
    package: &'a str,
    driver: &'a str,
    entry_point: String,
    requires: &'a [Dependency],
    sources: usize,
    stale: Vec<String>,
    rebuild_required: bool,
}

/// Print the descriptor, entry point and staleness summary.
pub fn info(ctx: &Context, config: &Config, json: bool) -> Result<()> {
    let verbosity = ctx.verbosity();
    let session = engine::open_project(ctx, config)?;
    let report = engine::staleness(&session)?;
    let project = &session.project;

    let stale: Vec<String> = report
        .stale
        .iter()
        .map(|s| {
            let reason = match s.reason {
                StaleReason::Missing => "not compiled",
                StaleReason::Outdated => "modified",
            };
            format!("{} ({})", s.source.display(), reason)
        })
        .collect();

    if json {
        let info = InfoReport {
            name: project.name.as_str(),
            package: project.package.as_str(),
            driver: project.driver.as_str(),
            entry_point: project.entry_point(),
            requires: &project.requires,
            sources: report.sources,
            stale,
            rebuild_required: report.rebuild_required(),
        };
        let rendered = serde_json::to_string_pretty(&info).context("failed to render JSON")?;
        println!("{}", rendered);
        return Ok(());
    }

    output::print(format!("Project: {}", project.name), verbosity);
    output::kv("package", &project.package, verbosity);
    output::kv("driver", &project.driver, verbosity);
    output::kv("entry point", project.entry_point(), verbosity);
    if !project.requires.is_empty() {
        let requires: Vec<&str> = project.requires.iter().map(Dependency::id).collect();
        output::kv("requires", requires.join(", "), verbosity);
    }
    output::kv("sources", report.sources, verbosity);

    if report.rebuild_required() {
        output::kv("build", "stale", verbosity);
        output::print(output::format_list(&stale, "    "), verbosity);
    } else {
        output::kv("build", "up to date", verbosity);
    }
    Ok(())
}
