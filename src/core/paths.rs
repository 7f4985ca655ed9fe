//! core::paths
//!
//! Centralized path routing for project locations.
//!
//! # Project Layout
//!
//! ```text
//! <root>/
//!   Javelin.toml            project descriptor
//!   README.md
//!   .gitignore              (when version control is enabled)
//!   src/
//!     module-info.java      module marker
//!     <package path>/<Driver>.java
//!   bin/                    compiler output
//!   docs/                   documentation output
//! ```
//!
//! **Hard rule:** no code outside this module joins `src`, `bin` or `docs`
//! onto a project root by hand.
//!
//! # Example
//!
//! ```
//! use javelin::core::paths::ProjectPaths;
//! use javelin::core::types::{DriverName, PackageName};
//! use std::path::PathBuf;
//!
//! let paths = ProjectPaths::new("/work/Foo");
//! let package = PackageName::new("com.acme").unwrap();
//! let driver = DriverName::new("Main").unwrap();
//!
//! assert_eq!(paths.bin_dir(), PathBuf::from("/work/Foo/bin"));
//! assert_eq!(
//!     paths.driver_source(&package, &driver),
//!     PathBuf::from("/work/Foo/src/com/acme/Main.java")
//! );
//! ```

use std::path::{Path, PathBuf};

use crate::core::types::{DriverName, PackageName};

/// File name of the project descriptor.
pub const DESCRIPTOR_FILE: &str = "Javelin.toml";

/// Source directory name.
pub const SRC_DIR: &str = "src";

/// Compiler output directory name.
pub const BIN_DIR: &str = "bin";

/// Documentation output directory name.
pub const DOCS_DIR: &str = "docs";

/// Module marker file name.
pub const MODULE_MARKER: &str = "module-info.java";

/// Path routing for a single project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    root: PathBuf,
}

impl ProjectPaths {
    /// Create paths for the project rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Base name of the root directory, if it has one.
    pub fn root_name(&self) -> Option<&str> {
        self.root.file_name().and_then(|n| n.to_str())
    }

    /// `<root>/Javelin.toml`
    pub fn descriptor(&self) -> PathBuf {
        self.root.join(DESCRIPTOR_FILE)
    }

    /// `<root>/src`
    pub fn src_dir(&self) -> PathBuf {
        self.root.join(SRC_DIR)
    }

    /// `<root>/bin`
    pub fn bin_dir(&self) -> PathBuf {
        self.root.join(BIN_DIR)
    }

    /// `<root>/docs`
    pub fn docs_dir(&self) -> PathBuf {
        self.root.join(DOCS_DIR)
    }

    /// `<root>/README.md`
    pub fn readme(&self) -> PathBuf {
        self.root.join("README.md")
    }

    /// `<root>/.gitignore`
    pub fn gitignore(&self) -> PathBuf {
        self.root.join(".gitignore")
    }

    /// `<root>/src/module-info.java`
    pub fn module_marker(&self) -> PathBuf {
        self.src_dir().join(MODULE_MARKER)
    }

    /// Folder of `package` under the source directory.
    pub fn package_dir(&self, package: &PackageName) -> PathBuf {
        package
            .segments()
            .fold(self.src_dir(), |dir, segment| dir.join(segment))
    }

    /// Source file of the driver class.
    pub fn driver_source(&self, package: &PackageName, driver: &DriverName) -> PathBuf {
        self.package_dir(package).join(driver.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_locations() {
        let paths = ProjectPaths::new("/p/Foo");
        assert_eq!(paths.descriptor(), PathBuf::from("/p/Foo/Javelin.toml"));
        assert_eq!(paths.src_dir(), PathBuf::from("/p/Foo/src"));
        assert_eq!(paths.docs_dir(), PathBuf::from("/p/Foo/docs"));
        assert_eq!(
            paths.module_marker(),
            PathBuf::from("/p/Foo/src/module-info.java")
        );
    }

    #[test]
    fn root_name_is_base_name() {
        assert_eq!(ProjectPaths::new("/p/Foo").root_name(), Some("Foo"));
        assert_eq!(ProjectPaths::new("/").root_name(), None);
    }

    #[test]
    fn single_segment_package() {
        let paths = ProjectPaths::new("/p/Foo");
        let package = PackageName::new("App").unwrap();
        let driver = DriverName::new("Main").unwrap();
        assert_eq!(
            paths.driver_source(&package, &driver),
            PathBuf::from("/p/Foo/src/App/Main.java")
        );
    }
}
