//! core::project
//!
//! The project descriptor: the small persisted record at the project root.
//!
//! # Format
//!
//! ```toml
//! name = "Foo"
//! package = "App"
//! driver = "Main"
//! requires = ["javafx"]
//! ```
//!
//! The descriptor is read once per invocation and passed explicitly into
//! every operation. It is written only by `new`, `init` and `add`.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::paths::ProjectPaths;
use crate::core::types::{DriverName, PackageName, ProjectName};

/// Errors from descriptor operations.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("no project descriptor at '{path}'")]
    NotFound { path: PathBuf },

    #[error("failed to read project descriptor '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse project descriptor '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write project descriptor '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize project descriptor: {0}")]
    Serialize(String),
}

/// A dependency that can be declared in the module marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dependency {
    /// The JavaFX GUI toolkit.
    JavaFx,
}

impl Dependency {
    /// Canonical identifier, as stored in the descriptor.
    pub fn id(&self) -> &'static str {
        match self {
            Dependency::JavaFx => "javafx",
        }
    }

    /// Java modules this dependency adds to the module marker.
    pub fn modules(&self) -> &'static [&'static str] {
        match self {
            Dependency::JavaFx => &["javafx.controls", "javafx.fxml"],
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error for an identifier no dependency matches.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported dependency '{0}' (supported: javafx)")]
pub struct UnsupportedDependency(pub String);

impl FromStr for Dependency {
    type Err = UnsupportedDependency;

    /// Matching is exact and case-insensitive; partial identifiers do not match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "javafx" | "jfx" | "fx" => Ok(Dependency::JavaFx),
            _ => Err(UnsupportedDependency(s.to_string())),
        }
    }
}

/// In-memory project descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectDescriptor {
    /// Project name; equals the project root directory name.
    pub name: ProjectName,
    /// Package holding the driver.
    pub package: PackageName,
    /// Entry point class.
    pub driver: DriverName,
    /// Dependencies recorded by `add`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<Dependency>,
}

impl ProjectDescriptor {
    /// Create a descriptor with no recorded dependencies.
    pub fn new(name: ProjectName, package: PackageName, driver: DriverName) -> Self {
        Self {
            name,
            package,
            driver,
            requires: Vec::new(),
        }
    }

    /// Fully qualified entry point, `package.driver`.
    pub fn entry_point(&self) -> String {
        self.package.qualify(&self.driver)
    }

    /// Whether `dep` has been recorded.
    pub fn requires(&self, dep: Dependency) -> bool {
        self.requires.contains(&dep)
    }

    /// Record `dep`. Returns false if it was already present.
    pub fn add_requirement(&mut self, dep: Dependency) -> bool {
        if self.requires(dep) {
            return false;
        }
        self.requires.push(dep);
        true
    }

    /// Load the descriptor of the project rooted at `paths`.
    ///
    /// # Errors
    ///
    /// - [`ProjectError::NotFound`] if there is no descriptor file
    /// - [`ProjectError::ParseError`] if it is malformed or holds invalid names
    pub fn load(paths: &ProjectPaths) -> Result<Self, ProjectError> {
        let path = paths.descriptor();
        if !path.exists() {
            return Err(ProjectError::NotFound { path });
        }

        let contents = fs::read_to_string(&path).map_err(|e| ProjectError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ProjectError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Write the descriptor atomically (temp file, then rename).
    pub fn write(&self, paths: &ProjectPaths) -> Result<PathBuf, ProjectError> {
        let path = paths.descriptor();
        write_atomic(&path, self)?;
        tracing::debug!("wrote project descriptor {}", path.display());
        Ok(path)
    }
}

fn write_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), ProjectError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ProjectError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let contents =
        toml::to_string_pretty(value).map_err(|e| ProjectError::Serialize(e.to_string()))?;

    let temp_path = path.with_extension("toml.tmp");
    let mut file = fs::File::create(&temp_path).map_err(|e| ProjectError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(contents.as_bytes())
        .map_err(|e| ProjectError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

    file.sync_all().map_err(|e| ProjectError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| ProjectError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn descriptor() -> ProjectDescriptor {
        ProjectDescriptor::new(
            ProjectName::new("Foo").unwrap(),
            PackageName::new("App").unwrap(),
            DriverName::new("Main").unwrap(),
        )
    }

    #[test]
    fn write_then_load() {
        let temp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(temp.path());

        let path = descriptor().write(&paths).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());

        let loaded = ProjectDescriptor::load(&paths).unwrap();
        assert_eq!(loaded, descriptor());
    }

    #[test]
    fn written_format_is_plain_keys() {
        let temp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(temp.path());
        descriptor().write(&paths).unwrap();

        let contents = fs::read_to_string(paths.descriptor()).unwrap();
        assert!(contents.contains("name = \"Foo\""));
        assert!(contents.contains("package = \"App\""));
        assert!(contents.contains("driver = \"Main\""));
        assert!(!contents.contains("requires"));
    }

    #[test]
    fn missing_descriptor_is_not_found() {
        let temp = TempDir::new().unwrap();
        let result = ProjectDescriptor::load(&ProjectPaths::new(temp.path()));
        assert!(matches!(result, Err(ProjectError::NotFound { .. })));
    }

    #[test]
    fn invalid_names_rejected() {
        let temp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(temp.path());
        fs::write(
            paths.descriptor(),
            "name = \"Foo\"\npackage = \"com..bad\"\ndriver = \"Main\"\n",
        )
        .unwrap();

        let result = ProjectDescriptor::load(&paths);
        assert!(matches!(result, Err(ProjectError::ParseError { .. })));
    }

    #[test]
    fn unknown_fields_rejected() {
        let temp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(temp.path());
        fs::write(
            paths.descriptor(),
            "name = \"Foo\"\npackage = \"App\"\ndriver = \"Main\"\nversion = 2\n",
        )
        .unwrap();

        assert!(ProjectDescriptor::load(&paths).is_err());
    }

    #[test]
    fn requirements_recorded_once() {
        let mut desc = descriptor();
        assert!(desc.add_requirement(Dependency::JavaFx));
        assert!(!desc.add_requirement(Dependency::JavaFx));
        assert_eq!(desc.requires, vec![Dependency::JavaFx]);
    }

    #[test]
    fn entry_point_is_qualified() {
        assert_eq!(descriptor().entry_point(), "App.Main");
    }

    mod dependency {
        use super::*;

        #[test]
        fn parses_aliases_case_insensitively() {
            assert_eq!("javafx".parse(), Ok(Dependency::JavaFx));
            assert_eq!("JFX".parse(), Ok(Dependency::JavaFx));
            assert_eq!("fx".parse(), Ok(Dependency::JavaFx));
        }

        #[test]
        fn partial_match_is_unsupported() {
            assert!("java".parse::<Dependency>().is_err());
            assert!("javafx-controls".parse::<Dependency>().is_err());
            assert!("junit".parse::<Dependency>().is_err());
        }
    }
}
