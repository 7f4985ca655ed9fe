//! init command - Turn the current directory into a project

use anyhow::{Context as _, Result};

use crate::cli::exit::CliError;
use crate::core::config::Config;
use crate::core::paths::{ProjectPaths, DESCRIPTOR_FILE};
use crate::core::project::ProjectDescriptor;
use crate::core::scaffold::{self, ScaffoldError};
use crate::core::types::{DriverName, PackageName, ProjectName};
use crate::engine::Context;
use crate::ui::output;

use super::new::init_git;

/// Initialize a project in place.
///
/// The project name is the directory's base name. An existing driver is
/// reused; otherwise the default one is generated. A driver without a
/// package declaration is refused, since the module marker would make it
/// uncompilable. Existing files are never overwritten, and running `init`
/// on a project is a no-op.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `config` - User configuration (default package and driver)
/// * `no_git` - Skip repository creation
pub fn init(ctx: &Context, config: &Config, no_git: bool) -> Result<()> {
    let verbosity = ctx.verbosity();
    let paths = ProjectPaths::new(ctx.working_dir()?);

    if paths.descriptor().exists() {
        output::print(
            format!(
                "Already a project: {} exists in {}",
                DESCRIPTOR_FILE,
                paths.root().display()
            ),
            verbosity,
        );
        return Ok(());
    }

    let dir_name = paths
        .root_name()
        .context("cannot determine the directory name")?;
    let name =
        ProjectName::new(dir_name).map_err(|e| CliError::InvalidProjectName(e.to_string()))?;

    let entry = match scaffold::find_entry_point(&paths.src_dir()) {
        Err(ScaffoldError::UnnamedPackage(path)) => {
            let shown = path.strip_prefix(paths.root()).unwrap_or(&path).display();
            return Err(CliError::CannotAdopt(format!(
                "{} has no package declaration; declare a package and move it \
                 into the matching folder under src/",
                shown
            ))
            .into());
        }
        found => found?,
    };

    let project = match entry {
        Some(entry) => {
            let shown = entry
                .path
                .strip_prefix(paths.root())
                .unwrap_or(&entry.path)
                .display()
                .to_string();
            output::print(format!("Found entry point in {}", shown), verbosity);
            ProjectDescriptor::new(name, entry.package, entry.driver)
        }
        None => {
            let package = PackageName::new(config.default_package())?;
            let driver = DriverName::new(config.default_driver())?;
            let path = paths.driver_source(&package, &driver);
            if scaffold::write_if_missing(&path, &scaffold::driver_source(&package, &driver))? {
                output::print(
                    format!("No entry point found; generated {}.{}", package, driver),
                    verbosity,
                );
            }
            ProjectDescriptor::new(name, package, driver)
        }
    };

    let marker = paths.module_marker();
    if !scaffold::write_if_missing(
        &marker,
        &scaffold::module_marker(&project.name, &project.package),
    )? {
        output::warn(
            format!(
                "{} already exists; make sure it exports {}",
                marker.strip_prefix(paths.root()).unwrap_or(&marker).display(),
                project.package
            ),
            verbosity,
        );
    }
    scaffold::create_dir(&paths.bin_dir())?;
    scaffold::write_if_missing(&paths.readme(), &scaffold::readme(&project))?;

    let git = if no_git || !config.git() {
        None
    } else {
        Some(init_git(&paths)?)
    };

    project
        .write(&paths)
        .context("failed to write project descriptor")?;

    output::success(format!("Initialized project '{}'", project.name), verbosity);
    output::kv("entry point", project.entry_point(), verbosity);
    let git_status = match git {
        Some(true) => "initialized",
        Some(false) => "existing repository",
        None => "skipped",
    };
    output::kv("git", git_status, verbosity);

    Ok(())
}
