//! core::config::schema
//!
//! User configuration schema.
//!
//! # Validation
//!
//! Config values are validated after parsing: default package and driver
//! must be valid Java names and tool programs cannot be empty.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::{DriverName, PackageName};

/// User configuration.
///
/// # Example
///
/// ```toml
/// default_package = "com.acme"
/// default_driver = "Main"
/// git = true
///
/// [toolchain]
/// javac = "/opt/jdk-21/bin/javac"
/// java = "/opt/jdk-21/bin/java"
/// fx_path = "/opt/javafx-sdk-21/lib"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct UserConfig {
    /// Package used by `new` when `-n` is not given
    pub default_package: Option<String>,

    /// Driver used by `new` when `-d` is not given
    pub default_driver: Option<String>,

    /// Whether `new` and `init` create a git repository
    pub git: Option<bool>,

    /// External tool overrides
    pub toolchain: Option<ToolchainConfig>,
}

impl UserConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(package) = &self.default_package {
            PackageName::new(package.as_str())
                .map_err(|e| ConfigError::InvalidValue(format!("default_package: {}", e)))?;
        }

        if let Some(driver) = &self.default_driver {
            DriverName::new(driver.as_str())
                .map_err(|e| ConfigError::InvalidValue(format!("default_driver: {}", e)))?;
        }

        if let Some(toolchain) = &self.toolchain {
            toolchain.validate()?;
        }

        Ok(())
    }
}

/// External tool programs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolchainConfig {
    /// Compiler program
    pub javac: Option<String>,

    /// Runtime program
    pub java: Option<String>,

    /// Documentation generator program
    pub javadoc: Option<String>,

    /// JavaFX module path used when `PATH_TO_FX` is unset
    pub fx_path: Option<String>,
}

impl ToolchainConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("javac", &self.javac),
            ("java", &self.java),
            ("javadoc", &self.javadoc),
            ("fx_path", &self.fx_path),
        ] {
            if matches!(value, Some(v) if v.trim().is_empty()) {
                return Err(ConfigError::InvalidValue(format!(
                    "toolchain.{} cannot be empty",
                    key
                )));
            }
        }
        Ok(())
    }
}
