//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ProjectName`] - Project root directory name
//! - [`PackageName`] - Dotted Java package the driver lives in
//! - [`DriverName`] - Class name of the program entry point
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, so a descriptor that parsed is always usable
//! for building paths and command lines.
//!
//! # Examples
//!
//! ```
//! use javelin::core::types::{DriverName, PackageName, ProjectName};
//!
//! let project = ProjectName::new("Foo").unwrap();
//! let package = PackageName::new("com.acme.app").unwrap();
//! let driver = DriverName::new("Main").unwrap();
//!
//! assert_eq!(package.segments().collect::<Vec<_>>(), ["com", "acme", "app"]);
//! assert_eq!(package.qualify(&driver), "com.acme.app.Main");
//!
//! assert!(ProjectName::new("").is_err());
//! assert!(PackageName::new("com..acme").is_err());
//! assert!(DriverName::new("1Main").is_err());
//! # let _ = project;
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid project name: {0}")]
    InvalidProjectName(String),

    #[error("invalid package name: {0}")]
    InvalidPackageName(String),

    #[error("invalid driver name: {0}")]
    InvalidDriverName(String),
}

/// Java reserved words that cannot be used as identifiers.
const RESERVED: [&str; 53] = [
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "try",
    "void",
    "volatile",
    "while",
    "true",
    "false",
    "null",
];

/// Check whether `s` is a single Java identifier.
pub fn is_java_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_alphabetic() || first == '_' || first == '$') {
        return false;
    }
    if !chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$') {
        return false;
    }
    s != "_" && !RESERVED.contains(&s)
}

/// The name of a project.
///
/// The project name is also the name of its root directory, so it must be
/// usable as a single path component:
/// - Cannot be empty, `.` or `..`
/// - Cannot contain path separators or control characters
/// - Cannot start with `-` (it would parse as a flag)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectName(String);

impl ProjectName {
    /// Create a new validated project name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidProjectName` if the name is not a single
    /// usable directory name.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.trim().is_empty() {
            return Err(TypeError::InvalidProjectName(
                "project name cannot be empty".into(),
            ));
        }
        if name == "." || name == ".." {
            return Err(TypeError::InvalidProjectName(format!(
                "'{name}' is not a directory name"
            )));
        }
        if name.starts_with('-') {
            return Err(TypeError::InvalidProjectName(
                "project name cannot start with '-'".into(),
            ));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(TypeError::InvalidProjectName(
                "project name cannot contain path separators".into(),
            ));
        }
        if name.chars().any(|c| c.is_control()) {
            return Err(TypeError::InvalidProjectName(
                "project name cannot contain control characters".into(),
            ));
        }
        Ok(())
    }

    /// Get the project name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive a Java module name from the project name.
    ///
    /// Characters that are not legal in an identifier become `_`, and a
    /// leading digit or reserved word is prefixed with `_`.
    pub fn module_name(&self) -> String {
        let mut module: String = self
            .0
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
            .collect::<String>()
            .to_lowercase();
        if !is_java_identifier(&module) {
            module.insert(0, '_');
        }
        module
    }
}

impl TryFrom<String> for ProjectName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProjectName> for String {
    fn from(name: ProjectName) -> Self {
        name.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A dotted Java package name such as `App` or `com.acme.app`.
///
/// Every dot-separated segment must be a Java identifier. The package
/// doubles as the folder path of the driver under the source directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageName(String);

impl PackageName {
    /// Create a new validated package name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidPackageName` if any segment is not a
    /// Java identifier.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TypeError::InvalidPackageName(
                "package name cannot be empty".into(),
            ));
        }
        for segment in name.split('.') {
            if !is_java_identifier(segment) {
                return Err(TypeError::InvalidPackageName(format!(
                    "'{segment}' in '{name}' is not a Java identifier"
                )));
            }
        }
        Ok(Self(name))
    }

    /// Get the package name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the dot-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Fully qualified class name of `driver` inside this package.
    pub fn qualify(&self, driver: &DriverName) -> String {
        format!("{}.{}", self.0, driver.as_str())
    }
}

impl TryFrom<String> for PackageName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PackageName> for String {
    fn from(name: PackageName) -> Self {
        name.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Base name (no extension) of the class holding the entry point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DriverName(String);

impl DriverName {
    /// Create a new validated driver name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidDriverName` if the name is not a Java
    /// identifier.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if !is_java_identifier(&name) {
            return Err(TypeError::InvalidDriverName(format!(
                "'{name}' is not a Java identifier"
            )));
        }
        Ok(Self(name))
    }

    /// Get the driver name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the driver source, e.g. `Main.java`.
    pub fn file_name(&self) -> String {
        format!("{}.java", self.0)
    }
}

impl TryFrom<String> for DriverName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DriverName> for String {
    fn from(name: DriverName) -> Self {
        name.0
    }
}

impl fmt::Display for DriverName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
