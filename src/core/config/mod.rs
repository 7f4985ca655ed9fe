//! core::config
//!
//! User configuration loading.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. User config file
//! 3. CLI flags and environment (not handled here)
//!
//! # Locations
//!
//! Searched in order:
//! 1. `$JAVELIN_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/javelin/config.toml`
//! 3. `~/.javelin/config.toml`
//!
//! Project-scoped settings live in the project descriptor
//! ([`crate::core::project`]), not here.
//!
//! # Example
//!
//! ```no_run
//! use javelin::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("javac: {}", config.javac());
//! println!("default package: {}", config.default_package());
//! ```

pub mod schema;

pub use schema::{ToolchainConfig, UserConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default package for new projects.
pub const DEFAULT_PACKAGE: &str = "App";

/// Default driver for new projects.
pub const DEFAULT_DRIVER: &str = "Main";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded user configuration with accessors that apply defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Raw user configuration
    pub user: UserConfig,
}

impl Config {
    /// Wrap an in-memory user configuration.
    pub fn new(user: UserConfig) -> Self {
        Self { user }
    }

    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed.
    /// A missing config file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let user = Self::read(path)?;
        user.validate()?;
        tracing::debug!("loaded user config from {}", path.display());
        Ok(Self { user })
    }

    fn find() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("JAVELIN_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("javelin/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::home_dir()
            .map(|home| home.join(".javelin/config.toml"))
            .filter(|path| path.exists())
    }

    fn read(path: &Path) -> Result<UserConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Package used by `new` when none is given. Defaults to `App`.
    pub fn default_package(&self) -> &str {
        self.user
            .default_package
            .as_deref()
            .unwrap_or(DEFAULT_PACKAGE)
    }

    /// Driver used by `new` when none is given. Defaults to `Main`.
    pub fn default_driver(&self) -> &str {
        self.user.default_driver.as_deref().unwrap_or(DEFAULT_DRIVER)
    }

    /// Whether to create git repositories. Defaults to `true`.
    pub fn git(&self) -> bool {
        self.user.git.unwrap_or(true)
    }

    fn toolchain(&self) -> Option<&ToolchainConfig> {
        self.user.toolchain.as_ref()
    }

    /// Compiler program. Defaults to `javac`.
    pub fn javac(&self) -> &str {
        self.toolchain()
            .and_then(|t| t.javac.as_deref())
            .unwrap_or("javac")
    }

    /// Runtime program. Defaults to `java`.
    pub fn java(&self) -> &str {
        self.toolchain()
            .and_then(|t| t.java.as_deref())
            .unwrap_or("java")
    }

    /// Documentation generator program. Defaults to `javadoc`.
    pub fn javadoc(&self) -> &str {
        self.toolchain()
            .and_then(|t| t.javadoc.as_deref())
            .unwrap_or("javadoc")
    }

    /// Configured JavaFX module path, if any.
    pub fn fx_path(&self) -> Option<&str> {
        self.toolchain().and_then(|t| t.fx_path.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_file() {
        let config = Config::default();
        assert_eq!(config.default_package(), "App");
        assert_eq!(config.default_driver(), "Main");
        assert!(config.git());
        assert_eq!(config.javac(), "javac");
        assert_eq!(config.java(), "java");
        assert_eq!(config.javadoc(), "javadoc");
        assert!(config.fx_path().is_none());
    }

    #[test]
    fn load_from_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
            default_driver = "Launcher"
            git = false

            [toolchain]
            java = "/opt/jdk/bin/java"
            "#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_driver(), "Launcher");
        assert_eq!(config.default_package(), "App");
        assert!(!config.git());
        assert_eq!(config.java(), "/opt/jdk/bin/java");
        assert_eq!(config.javac(), "javac");
    }

    #[test]
    fn unknown_fields_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "trunk = \"main\"\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn invalid_values_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "default_driver = \"not-valid\"\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }
}
