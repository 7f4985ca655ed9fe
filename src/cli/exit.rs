//! cli::exit
//!
//! Process exit codes.
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | success, help, version |
//! | 1 | insufficient arguments, precondition or other failure |
//! | 2 | unknown command |
//! | 3 | missing or unusable project name for `new` |
//! | 4 | target directory already exists |
//! | 5 | invalid or unknown flag for `new` / `init`, or `init` cannot adopt the directory |
//!
//! A failed external tool exits with the tool's own code, except that codes
//! 2 to 5 are reported as 1 so they never read as a usage error.

use clap::error::ErrorKind;
use thiserror::Error;

use crate::engine::EngineError;

pub const SUCCESS: u8 = 0;
pub const INSUFFICIENT_ARGS: u8 = 1;
pub const UNKNOWN_COMMAND: u8 = 2;
pub const MISSING_NAME: u8 = 3;
pub const PROJECT_EXISTS: u8 = 4;
pub const INVALID_FLAG: u8 = 5;
pub const FAILURE: u8 = 1;

/// Usage errors raised by command handlers.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("missing project name: usage is `jvl new <NAME>`")]
    MissingProjectName,

    #[error("{0}")]
    InvalidProjectName(String),

    #[error("'{0}' already exists")]
    ProjectExists(String),

    #[error("{0}")]
    InvalidFlag(String),

    #[error("cannot adopt this directory: {0}")]
    CannotAdopt(String),
}

impl CliError {
    /// Exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::MissingProjectName | CliError::InvalidProjectName(_) => MISSING_NAME,
            CliError::ProjectExists(_) => PROJECT_EXISTS,
            CliError::InvalidFlag(_) | CliError::CannotAdopt(_) => INVALID_FLAG,
        }
    }
}

/// Exit code for an error returned by a command handler.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return cli.exit_code();
    }
    if let Some(EngineError::ToolFailed { code, .. }) = err.downcast_ref::<EngineError>() {
        return code
            .and_then(|c| u8::try_from(c).ok())
            .filter(|c| *c != SUCCESS && !is_reserved(*c))
            .unwrap_or(FAILURE);
    }
    FAILURE
}

fn is_reserved(code: u8) -> bool {
    (UNKNOWN_COMMAND..=INVALID_FLAG).contains(&code)
}

/// Exit code for a clap parse error.
///
/// `verb` is the canonical verb found on the command line, if any.
pub fn clap_exit_code(err: &clap::Error, verb: Option<&str>) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => SUCCESS,
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        | ErrorKind::MissingSubcommand
        | ErrorKind::MissingRequiredArgument => INSUFFICIENT_ARGS,
        ErrorKind::InvalidSubcommand => UNKNOWN_COMMAND,
        _ => match verb {
            None => UNKNOWN_COMMAND,
            Some("new") | Some("init") => INVALID_FLAG,
            Some(_) => INSUFFICIENT_ARGS,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolchain::Tool;

    #[test]
    fn cli_error_codes() {
        assert_eq!(CliError::MissingProjectName.exit_code(), 3);
        assert_eq!(CliError::ProjectExists("Foo".into()).exit_code(), 4);
        assert_eq!(CliError::InvalidFlag("-x".into()).exit_code(), 5);
        assert_eq!(CliError::CannotAdopt("src/Main.java".into()).exit_code(), 5);
    }

    #[test]
    fn downcast_through_anyhow() {
        let err = anyhow::Error::new(CliError::ProjectExists("Foo".into()));
        assert_eq!(exit_code(&err), 4);

        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn tool_failure_propagates_code() {
        let err = anyhow::Error::new(EngineError::ToolFailed {
            tool: Tool::Execute,
            code: Some(42),
        });
        assert_eq!(exit_code(&err), 42);

        let err = anyhow::Error::new(EngineError::ToolFailed {
            tool: Tool::Compile,
            code: None,
        });
        assert_eq!(exit_code(&err), 1);

        let err = anyhow::Error::new(EngineError::ToolFailed {
            tool: Tool::Compile,
            code: Some(-1),
        });
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn tool_code_colliding_with_usage_codes_is_failure() {
        for code in 2..=5 {
            let err = anyhow::Error::new(EngineError::ToolFailed {
                tool: Tool::Compile,
                code: Some(code),
            });
            assert_eq!(exit_code(&err), 1, "tool exit {}", code);
        }

        let err = anyhow::Error::new(EngineError::ToolFailed {
            tool: Tool::Execute,
            code: Some(6),
        });
        assert_eq!(exit_code(&err), 6);
    }

    #[test]
    fn precondition_is_failure() {
        let err = anyhow::Error::new(EngineError::NotProjectRoot {
            expected: "Foo".into(),
            found: "src".into(),
        });
        assert_eq!(exit_code(&err), 1);
    }
}
