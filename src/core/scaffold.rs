//! core::scaffold
//!
//! Generated project files and entry-point discovery.
//!
//! Nothing here decides *whether* a file should be written; the `new` and
//! `init` commands own that. This module only renders contents, writes
//! them, and finds an existing driver for `init`.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::paths::ProjectPaths;
use crate::core::project::{Dependency, ProjectDescriptor};
use crate::core::staleness::{self, StalenessError};
use crate::core::types::{DriverName, PackageName, ProjectName};

/// Errors from scaffolding.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("module marker '{0}' has no closing brace")]
    MalformedMarker(PathBuf),

    #[error("'{0}' declares main in the unnamed package")]
    UnnamedPackage(PathBuf),

    #[error(transparent)]
    Scan(#[from] StalenessError),
}

/// Entries written to `.gitignore`.
pub const GITIGNORE_ENTRIES: [&str; 3] = ["*.class", "bin/", "docs/"];

/// Source of the driver class.
pub fn driver_source(package: &PackageName, driver: &DriverName) -> String {
    format!(
        "package {package};\n\
         \n\
         public class {driver} {{\n\
         \x20   public static void main(String[] args) {{\n\
         \x20       System.out.println(\"Hello from {driver}!\");\n\
         \x20   }}\n\
         }}\n"
    )
}

/// Module marker declaring the project module.
pub fn module_marker(name: &ProjectName, package: &PackageName) -> String {
    format!(
        "module {} {{\n    exports {};\n}}\n",
        name.module_name(),
        package
    )
}

/// README for a new project.
pub fn readme(desc: &ProjectDescriptor) -> String {
    format!(
        "# {name}\n\
         \n\
         Entry point: `{entry}`\n\
         \n\
         ## Commands\n\
         \n\
         ```sh\n\
         jvl build    # compile src/ into bin/ when sources changed\n\
         jvl run      # build if needed, then run {entry}\n\
         jvl doc      # generate documentation into docs/\n\
         jvl clean    # remove compiled classes\n\
         ```\n",
        name = desc.name,
        entry = desc.entry_point(),
    )
}

/// Contents of `.gitignore`.
pub fn gitignore() -> String {
    let mut contents = GITIGNORE_ENTRIES.join("\n");
    contents.push('\n');
    contents
}

/// Write `contents` to `path`, creating parent directories.
pub fn write_file(path: &Path, contents: &str) -> Result<(), ScaffoldError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ScaffoldError::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(path, contents).map_err(|e| ScaffoldError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!("wrote {}", path.display());
    Ok(())
}

/// Write `contents` to `path` unless the file already exists.
///
/// Returns whether the file was written.
pub fn write_if_missing(path: &Path, contents: &str) -> Result<bool, ScaffoldError> {
    if path.exists() {
        return Ok(false);
    }
    write_file(path, contents)?;
    Ok(true)
}

/// Create a directory and its parents.
pub fn create_dir(path: &Path) -> Result<(), ScaffoldError> {
    fs::create_dir_all(path).map_err(|e| ScaffoldError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

/// An existing driver found in a source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    /// Package of the driver.
    pub package: PackageName,
    /// Driver class.
    pub driver: DriverName,
    /// Path of the driver source.
    pub path: PathBuf,
}

/// Find the first source under `src_dir` declaring a `main` method.
///
/// The package comes from the file's `package` declaration. A `main` in a
/// file without one lives in the unnamed package, which a module cannot
/// contain, so any such file is an error. Files whose package or stem are
/// not valid Java names are skipped.
pub fn find_entry_point(src_dir: &Path) -> Result<Option<EntryPoint>, ScaffoldError> {
    let mut found = None;

    for path in staleness::list_sources(src_dir)? {
        let contents = fs::read_to_string(&path).map_err(|e| ScaffoldError::Read {
            path: path.clone(),
            source: e,
        })?;

        if !declares_main(&contents) {
            continue;
        }

        let Some(package) = declared_package(&contents) else {
            return Err(ScaffoldError::UnnamedPackage(path));
        };
        if found.is_some() {
            continue;
        }

        let driver = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| DriverName::new(s).ok());
        let package = PackageName::new(package).ok();

        if let (Some(package), Some(driver)) = (package, driver) {
            tracing::debug!("found entry point {}.{}", package, driver);
            found = Some(EntryPoint {
                package,
                driver,
                path,
            });
        }
    }
    Ok(found)
}

/// Whether Java source text contains a `public static void main` signature.
pub fn declares_main(contents: &str) -> bool {
    contents.lines().any(|line| {
        let words: Vec<&str> = line
            .split(|c: char| c.is_whitespace() || c == '(')
            .filter(|w| !w.is_empty())
            .collect();
        words
            .windows(4)
            .any(|w| w == ["public", "static", "void", "main"])
    })
}

fn declared_package(contents: &str) -> Option<String> {
    contents.lines().find_map(|line| {
        line.trim()
            .strip_prefix("package ")
            .and_then(|rest| rest.split(';').next())
            .map(|p| p.trim().to_string())
    })
}

/// Outcome of adding a dependency to the module marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerUpdate {
    /// `requires` lines were inserted.
    Added,
    /// Every module was already required.
    AlreadyPresent,
}

/// Insert `requires` lines for `dep` before the marker's closing brace.
pub fn add_requirement(
    paths: &ProjectPaths,
    dep: Dependency,
) -> Result<MarkerUpdate, ScaffoldError> {
    let path = paths.module_marker();
    let contents = fs::read_to_string(&path).map_err(|e| ScaffoldError::Read {
        path: path.clone(),
        source: e,
    })?;

    let missing: Vec<&str> = dep
        .modules()
        .iter()
        .copied()
        .filter(|module| !requires_module(&contents, module))
        .collect();
    if missing.is_empty() {
        return Ok(MarkerUpdate::AlreadyPresent);
    }

    let close = contents
        .rfind('}')
        .ok_or_else(|| ScaffoldError::MalformedMarker(path.clone()))?;
    let (head, tail) = contents.split_at(close);

    let mut updated = head.trim_end().to_string();
    updated.push('\n');
    for module in missing {
        updated.push_str(&format!("    requires {};\n", module));
    }
    updated.push_str(tail);

    write_file(&path, &updated)?;
    Ok(MarkerUpdate::Added)
}

fn requires_module(contents: &str, module: &str) -> bool {
    contents.lines().any(|line| {
        let line = line.trim();
        line.strip_prefix("requires ")
            .map(|rest| {
                rest.trim_end_matches(';')
                    .split_whitespace()
                    .last()
                    .is_some_and(|m| m == module)
            })
            .unwrap_or(false)
    })
}
