//! new command - Scaffold a new project directory

use std::fs;

use anyhow::{Context as _, Result};

use crate::cli::exit::CliError;
use crate::core::config::Config;
use crate::core::paths::ProjectPaths;
use crate::core::project::ProjectDescriptor;
use crate::core::scaffold;
use crate::core::types::{DriverName, PackageName, ProjectName};
use crate::engine::Context;
use crate::git::Git;
use crate::ui::output;

/// Arguments of `jvl new`.
#[derive(Debug, Clone, Default)]
pub struct NewOptions {
    /// Project name; also the directory created under the working directory.
    pub name: Option<String>,
    /// Package override (`-n`).
    pub package: Option<String>,
    /// Driver override (`-d`).
    pub driver: Option<String>,
    /// Skip repository creation.
    pub no_git: bool,
}

/// Create a new project.
///
/// # Errors
///
/// - [`CliError::MissingProjectName`] when no name (or a blank one) is given
/// - [`CliError::InvalidProjectName`] when the name cannot be a directory
/// - [`CliError::InvalidFlag`] when `--package` or `--driver` is not a Java name
/// - [`CliError::ProjectExists`] when the directory is already there
///
/// If scaffolding fails after the directory was created, the directory is
/// removed again.
pub fn new(ctx: &Context, config: &Config, opts: &NewOptions) -> Result<()> {
    let verbosity = ctx.verbosity();

    let name = match opts.name.as_deref() {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Err(CliError::MissingProjectName.into()),
    };
    let name = ProjectName::new(name).map_err(|e| CliError::InvalidProjectName(e.to_string()))?;

    let package = PackageName::new(opts.package.as_deref().unwrap_or(config.default_package()))
        .map_err(|e| CliError::InvalidFlag(format!("--package: {}", e)))?;
    let driver = DriverName::new(opts.driver.as_deref().unwrap_or(config.default_driver()))
        .map_err(|e| CliError::InvalidFlag(format!("--driver: {}", e)))?;

    let root = ctx.working_dir()?.join(name.as_str());
    if root.exists() {
        return Err(CliError::ProjectExists(root.display().to_string()).into());
    }

    fs::create_dir(&root).with_context(|| format!("failed to create '{}'", root.display()))?;
    let paths = ProjectPaths::new(root);
    let project = ProjectDescriptor::new(name, package, driver);
    let git = !opts.no_git && config.git();

    if let Err(err) = populate(&paths, &project, git) {
        if let Err(cleanup) = fs::remove_dir_all(paths.root()) {
            tracing::warn!("failed to remove '{}': {}", paths.root().display(), cleanup);
        }
        return Err(err);
    }

    output::success(format!("Created project '{}'", project.name), verbosity);
    output::kv("location", paths.root().display(), verbosity);
    output::kv("entry point", project.entry_point(), verbosity);
    output::kv("git", if git { "initialized" } else { "skipped" }, verbosity);

    Ok(())
}

fn populate(paths: &ProjectPaths, project: &ProjectDescriptor, git: bool) -> Result<()> {
    scaffold::write_file(
        &paths.driver_source(&project.package, &project.driver),
        &scaffold::driver_source(&project.package, &project.driver),
    )?;
    scaffold::write_file(
        &paths.module_marker(),
        &scaffold::module_marker(&project.name, &project.package),
    )?;
    scaffold::create_dir(&paths.bin_dir())?;
    project
        .write(paths)
        .context("failed to write project descriptor")?;
    scaffold::write_file(&paths.readme(), &scaffold::readme(project))?;

    if git {
        init_git(paths)?;
    }
    Ok(())
}

/// Create a repository at the project root (unless one is already there)
/// and a `.gitignore` (unless one exists).
///
/// Returns whether a repository was created.
pub(super) fn init_git(paths: &ProjectPaths) -> Result<bool> {
    let created = if Git::is_repo(paths.root()) {
        tracing::debug!("{} is already a repository", paths.root().display());
        false
    } else {
        Git::init(paths.root())?;
        true
    };

    scaffold::write_if_missing(&paths.gitignore(), &scaffold::gitignore())?;
    Ok(created)
}
