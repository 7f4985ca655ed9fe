//! toolchain
//!
//! Thin process-spawning layer over the external JDK tools.
//!
//! # Architecture
//!
//! Command lines are built as plain [`ToolCommand`] values and handed to a
//! [`ProcessRunner`]. The real runner spawns the process and blocks until
//! it exits; tests substitute a recording runner. Nothing here compiles,
//! runs or documents code itself, and nothing is retried.
//!
//! # Command Lines
//!
//! All commands run with the project root as working directory:
//!
//! ```text
//! javac   -d bin  [fx] [flags] <sources>
//! java    [fx] [flags] -cp bin <package>.<driver> [program args]
//! javadoc -d docs [fx] [flags] <sources>        (stdout discarded)
//! ```
//!
//! `[fx]` is `--module-path <PATH_TO_FX> --add-modules javafx.controls,javafx.fxml`.

mod flags;

pub use flags::{ToolArgs, FX_FLAGS};

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;

use crate::core::config::Config;
use crate::core::paths::{ProjectPaths, BIN_DIR, DOCS_DIR};
use crate::core::project::ProjectDescriptor;

/// Environment variable naming the JavaFX library directory.
pub const FX_ENV: &str = "PATH_TO_FX";

/// Modules added when JavaFX is requested.
pub const FX_MODULES: &str = "javafx.controls,javafx.fxml";

/// Errors from the toolchain layer.
#[derive(Debug, Error)]
pub enum ToolchainError {
    /// JavaFX was requested but no module path is known.
    #[error("JavaFX requested but PATH_TO_FX is not set (export it or set toolchain.fx_path)")]
    FxPathMissing,

    /// The tool could not be started at all.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
}

/// Which external tool a command drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Compile,
    Execute,
    Document,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tool::Compile => "compiler",
            Tool::Execute => "program",
            Tool::Document => "documentation generator",
        })
    }
}

/// A fully built external command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// Which tool this drives.
    pub tool: Tool,
    /// Program to spawn.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
    /// Working directory.
    pub cwd: PathBuf,
    /// Discard standard output (standard error is always inherited).
    pub discard_stdout: bool,
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Exit status of a finished tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    /// Exit code, or `None` if the process was killed by a signal.
    pub code: Option<i32>,
}

impl ToolStatus {
    /// A zero exit.
    pub const SUCCESS: ToolStatus = ToolStatus { code: Some(0) };

    /// Whether the tool exited with code zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs tool commands to completion.
pub trait ProcessRunner {
    /// Run `command`, blocking until it exits.
    fn run(&self, command: &ToolCommand) -> Result<ToolStatus, ToolchainError>;
}

/// Spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &ToolCommand) -> Result<ToolStatus, ToolchainError> {
        tracing::debug!("running: {}", command);

        let mut process = Command::new(&command.program);
        process.args(&command.args).current_dir(&command.cwd);
        if command.discard_stdout {
            process.stdout(Stdio::null());
        }

        let status = process.status().map_err(|e| ToolchainError::Spawn {
            program: command.program.clone(),
            source: e,
        })?;

        tracing::debug!("{} exited with {:?}", command.program, status.code());
        Ok(ToolStatus {
            code: status.code(),
        })
    }
}

/// External tool programs and the JavaFX module path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub javac: String,
    pub java: String,
    pub javadoc: String,
    pub fx_path: Option<String>,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            javac: "javac".to_string(),
            java: "java".to_string(),
            javadoc: "javadoc".to_string(),
            fx_path: None,
        }
    }
}

impl Toolchain {
    /// Resolve tools from user config; `PATH_TO_FX` wins over `fx_path`.
    pub fn from_config(config: &Config) -> Self {
        let fx_path = std::env::var(FX_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| config.fx_path().map(str::to_string));

        Self {
            javac: config.javac().to_string(),
            java: config.java().to_string(),
            javadoc: config.javadoc().to_string(),
            fx_path,
        }
    }

    /// The JavaFX module flags.
    ///
    /// # Errors
    ///
    /// [`ToolchainError::FxPathMissing`] when no module path is known.
    pub fn fx_flags(&self) -> Result<Vec<String>, ToolchainError> {
        let path = self
            .fx_path
            .as_ref()
            .ok_or(ToolchainError::FxPathMissing)?;
        Ok(vec![
            "--module-path".to_string(),
            path.clone(),
            "--add-modules".to_string(),
            FX_MODULES.to_string(),
        ])
    }

    fn option_flags(&self, fx: bool, flags: &[String]) -> Result<Vec<String>, ToolchainError> {
        let mut args = if fx { self.fx_flags()? } else { Vec::new() };
        args.extend(flags.iter().cloned());
        Ok(args)
    }

    /// Compile every source into the build directory.
    pub fn compile(
        &self,
        paths: &ProjectPaths,
        sources: &[PathBuf],
        fx: bool,
        flags: &[String],
    ) -> Result<ToolCommand, ToolchainError> {
        let mut args = vec!["-d".to_string(), BIN_DIR.to_string()];
        args.extend(self.option_flags(fx, flags)?);
        args.extend(relative_sources(paths.root(), sources));

        Ok(ToolCommand {
            tool: Tool::Compile,
            program: self.javac.clone(),
            args,
            cwd: paths.root().to_path_buf(),
            discard_stdout: false,
        })
    }

    /// Launch the project's entry point from the build directory.
    pub fn execute(
        &self,
        paths: &ProjectPaths,
        project: &ProjectDescriptor,
        fx: bool,
        flags: &[String],
        program_args: &[String],
    ) -> Result<ToolCommand, ToolchainError> {
        let mut args = self.option_flags(fx, flags)?;
        args.push("-cp".to_string());
        args.push(BIN_DIR.to_string());
        args.push(project.entry_point());
        args.extend(program_args.iter().cloned());

        Ok(ToolCommand {
            tool: Tool::Execute,
            program: self.java.clone(),
            args,
            cwd: paths.root().to_path_buf(),
            discard_stdout: false,
        })
    }

    /// Generate documentation for every source.
    pub fn document(
        &self,
        paths: &ProjectPaths,
        sources: &[PathBuf],
        fx: bool,
        flags: &[String],
    ) -> Result<ToolCommand, ToolchainError> {
        let mut args = vec!["-d".to_string(), DOCS_DIR.to_string()];
        args.extend(self.option_flags(fx, flags)?);
        args.extend(relative_sources(paths.root(), sources));

        Ok(ToolCommand {
            tool: Tool::Document,
            program: self.javadoc.clone(),
            args,
            cwd: paths.root().to_path_buf(),
            discard_stdout: true,
        })
    }
}

fn relative_sources<'a>(
    root: &'a Path,
    sources: &'a [PathBuf],
) -> impl Iterator<Item = String> + 'a {
    sources.iter().map(move |source| {
        source
            .strip_prefix(root)
            .unwrap_or(source)
            .to_string_lossy()
            .into_owned()
    })
}
