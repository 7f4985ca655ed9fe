//! engine
//!
//! Orchestrates project-scoped operations.
//!
//! # Lifecycle
//!
//! Every project-scoped command follows the same flow:
//!
//! ```text
//! CheckRoot -> [DetectStaleness] -> InvokeToolchain -> Report
//! ```
//!
//! 1. **CheckRoot**: load the project descriptor from the working directory
//!    and require that the directory's base name is the recorded project
//!    name. Nothing is touched when this fails.
//! 2. **DetectStaleness**: for `build` and `run`, compare sources against
//!    the build output.
//! 3. **InvokeToolchain**: spawn the external tool through a
//!    [`ProcessRunner`] and turn a non-zero exit into
//!    [`EngineError::ToolFailed`].
//!
//! Reporting is left to the command handlers.
//!
//! # Invariants
//!
//! - The descriptor is loaded once into a [`Session`] and passed explicitly
//! - A failed compile is never followed by an execute
//! - Tools are never retried

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::core::config::Config;
use crate::core::paths::{ProjectPaths, DESCRIPTOR_FILE};
use crate::core::project::{Dependency, ProjectDescriptor, ProjectError};
use crate::core::staleness::{self, StalenessError, StalenessReport};
use crate::toolchain::{ProcessRunner, Tool, ToolArgs, ToolCommand, Toolchain, ToolchainError};
use crate::ui::output::Verbosity;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    /// The directory commands act on: `--cwd` or the process working directory.
    pub fn working_dir(&self) -> Result<PathBuf, EngineError> {
        let dir = match &self.cwd {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().map_err(EngineError::CurrentDir)?,
        };
        Ok(dir.canonicalize().unwrap_or(dir))
    }

    /// Output verbosity from the quiet and debug flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

/// Errors from engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// No descriptor in the working directory.
    #[error("not in a project root: no {} in {}", DESCRIPTOR_FILE, .dir.display())]
    NoProject { dir: PathBuf },

    /// Descriptor found but the directory name does not match.
    #[error("not in project root: directory is '{found}' but the project is '{expected}'")]
    NotProjectRoot { expected: String, found: String },

    /// The working directory could not be determined.
    #[error("cannot determine current directory: {0}")]
    CurrentDir(io::Error),

    /// Descriptor could not be loaded.
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// Staleness check failed.
    #[error("staleness check failed: {0}")]
    Staleness(#[from] StalenessError),

    /// Toolchain could not be invoked.
    #[error(transparent)]
    Toolchain(#[from] ToolchainError),

    /// The external tool exited unsuccessfully.
    #[error("{tool} failed ({})", exit_description(.code))]
    ToolFailed { tool: Tool, code: Option<i32> },

    /// Filesystem error while preparing or cleaning outputs.
    #[error("failed to update '{}': {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl EngineError {
    /// Whether this is a precondition failure (nothing was attempted).
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            EngineError::NoProject { .. } | EngineError::NotProjectRoot { .. }
        )
    }
}

/// A loaded, root-checked project.
#[derive(Debug, Clone)]
pub struct Session {
    /// Project locations.
    pub paths: ProjectPaths,
    /// The descriptor, read once.
    pub project: ProjectDescriptor,
    /// External tools.
    pub toolchain: Toolchain,
}

impl Session {
    /// Whether JavaFX flags apply: requested on the command line or
    /// recorded as a dependency.
    pub fn wants_fx(&self, args: &ToolArgs) -> bool {
        args.fx || self.project.requires(Dependency::JavaFx)
    }
}

/// Load the project in the working directory and check the root.
pub fn open_project(ctx: &Context, config: &Config) -> Result<Session, EngineError> {
    let paths = ProjectPaths::new(ctx.working_dir()?);

    let project = match ProjectDescriptor::load(&paths) {
        Ok(project) => project,
        Err(ProjectError::NotFound { .. }) => {
            return Err(EngineError::NoProject {
                dir: paths.root().to_path_buf(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    check_root(&paths, &project)?;

    Ok(Session {
        paths,
        project,
        toolchain: Toolchain::from_config(config),
    })
}

/// Require that the root directory's base name is the project name.
pub fn check_root(paths: &ProjectPaths, project: &ProjectDescriptor) -> Result<(), EngineError> {
    let found = paths.root_name().unwrap_or_default();
    if found != project.name.as_str() {
        return Err(EngineError::NotProjectRoot {
            expected: project.name.to_string(),
            found: found.to_string(),
        });
    }
    Ok(())
}

/// Result of a build request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Nothing was stale; the compiler was not invoked.
    UpToDate,
    /// The whole source tree was compiled.
    Compiled {
        /// Number of sources passed to the compiler.
        sources: usize,
    },
}

/// Check staleness of the session's project.
pub fn staleness(session: &Session) -> Result<StalenessReport, EngineError> {
    Ok(staleness::check(
        &session.paths.src_dir(),
        &session.paths.bin_dir(),
    )?)
}

/// Compile if stale.
pub fn build(
    session: &Session,
    runner: &dyn ProcessRunner,
    args: &ToolArgs,
) -> Result<BuildOutcome, EngineError> {
    let report = staleness(session)?;
    if !report.rebuild_required() {
        tracing::debug!("{} source(s) up to date", report.sources);
        return Ok(BuildOutcome::UpToDate);
    }
    compile(session, runner, args)
}

/// Compile the whole source tree unconditionally.
pub fn compile(
    session: &Session,
    runner: &dyn ProcessRunner,
    args: &ToolArgs,
) -> Result<BuildOutcome, EngineError> {
    let sources = staleness::list_sources(&session.paths.src_dir())?;
    let command = session.toolchain.compile(
        &session.paths,
        &sources,
        session.wants_fx(args),
        &args.flags,
    )?;

    let bin = session.paths.bin_dir();
    fs::create_dir_all(&bin).map_err(|e| EngineError::Io {
        path: bin,
        source: e,
    })?;

    invoke(runner, &command)?;
    Ok(BuildOutcome::Compiled {
        sources: sources.len(),
    })
}

/// Launch the entry point. Callers build first.
pub fn execute(
    session: &Session,
    runner: &dyn ProcessRunner,
    args: &ToolArgs,
) -> Result<(), EngineError> {
    let command = session.toolchain.execute(
        &session.paths,
        &session.project,
        session.wants_fx(args),
        &args.flags,
        &args.program_args,
    )?;
    invoke(runner, &command)
}

/// Generate documentation. Returns the number of documented sources.
pub fn document(
    session: &Session,
    runner: &dyn ProcessRunner,
    args: &ToolArgs,
) -> Result<usize, EngineError> {
    let sources = staleness::list_sources(&session.paths.src_dir())?;
    let command = session.toolchain.document(
        &session.paths,
        &sources,
        session.wants_fx(args),
        &args.flags,
    )?;
    invoke(runner, &command)?;
    Ok(sources.len())
}

fn invoke(runner: &dyn ProcessRunner, command: &ToolCommand) -> Result<(), EngineError> {
    let status = runner.run(command)?;
    if !status.success() {
        return Err(EngineError::ToolFailed {
            tool: command.tool,
            code: status.code,
        });
    }
    Ok(())
}

/// What `clean` removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanOutcome {
    /// Compiled artifacts were removed.
    pub bin: bool,
    /// Generated documentation was removed.
    pub docs: bool,
}

/// Remove compiled artifacts (leaving an empty build directory) and
/// optionally the documentation directory.
pub fn clean(paths: &ProjectPaths, docs: bool) -> Result<CleanOutcome, EngineError> {
    let mut outcome = CleanOutcome::default();

    let bin = paths.bin_dir();
    outcome.bin = remove_dir(&bin)?;
    fs::create_dir_all(&bin).map_err(|e| EngineError::Io {
        path: bin.clone(),
        source: e,
    })?;

    if docs {
        outcome.docs = remove_dir(&paths.docs_dir())?;
    }

    Ok(outcome)
}

fn remove_dir(path: &std::path::Path) -> Result<bool, EngineError> {
    match fs::remove_dir_all(path) {
        Ok(()) => {
            tracing::debug!("removed {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(EngineError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{DriverName, PackageName, ProjectName};
    use crate::toolchain::ToolStatus;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Records commands and answers with scripted exit codes.
    struct ScriptedRunner {
        codes: RefCell<Vec<i32>>,
        seen: RefCell<Vec<ToolCommand>>,
    }

    impl ScriptedRunner {
        fn new(codes: &[i32]) -> Self {
            Self {
                codes: RefCell::new(codes.iter().rev().copied().collect()),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn tools(&self) -> Vec<Tool> {
            self.seen.borrow().iter().map(|c| c.tool).collect()
        }
    }

    impl ProcessRunner for ScriptedRunner {
        fn run(&self, command: &ToolCommand) -> Result<ToolStatus, ToolchainError> {
            self.seen.borrow_mut().push(command.clone());
            let code = self.codes.borrow_mut().pop().unwrap_or(0);
            Ok(ToolStatus { code: Some(code) })
        }
    }

    fn session(name: &str) -> (TempDir, Session) {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join(name);
        fs::create_dir_all(root.join("src/App")).unwrap();
        fs::write(root.join("src/App/Main.java"), "class Main {}").unwrap();

        let project = ProjectDescriptor::new(
            ProjectName::new(name).unwrap(),
            PackageName::new("App").unwrap(),
            DriverName::new("Main").unwrap(),
        );
        let session = Session {
            paths: ProjectPaths::new(root),
            project,
            toolchain: Toolchain::default(),
        };
        (temp, session)
    }

    mod context {
        use super::*;

        #[test]
        fn default_values() {
            let ctx = Context::default();
            assert!(ctx.cwd.is_none());
            assert!(!ctx.debug);
            assert!(!ctx.quiet);
            assert_eq!(ctx.verbosity(), Verbosity::Normal);
        }

        #[test]
        fn cwd_override() {
            let temp = TempDir::new().unwrap();
            let ctx = Context {
                cwd: Some(temp.path().to_path_buf()),
                ..Default::default()
            };
            assert_eq!(
                ctx.working_dir().unwrap(),
                temp.path().canonicalize().unwrap()
            );
        }
    }

    mod root_check {
        use super::*;

        #[test]
        fn matching_name_passes() {
            let (_temp, session) = session("Foo");
            assert!(check_root(&session.paths, &session.project).is_ok());
        }

        #[test]
        fn mismatched_name_fails() {
            let (_temp, session) = session("Foo");
            let paths = ProjectPaths::new(session.paths.root().join("src"));
            let err = check_root(&paths, &session.project).unwrap_err();
            assert!(err.is_precondition());
            assert!(err.to_string().contains("not in project root"));
        }

        #[test]
        fn missing_descriptor_is_no_project() {
            let temp = TempDir::new().unwrap();
            let ctx = Context {
                cwd: Some(temp.path().to_path_buf()),
                ..Default::default()
            };
            let err = open_project(&ctx, &Config::default()).unwrap_err();
            assert!(matches!(err, EngineError::NoProject { .. }));
        }
    }

    mod build {
        use super::*;

        #[test]
        fn stale_tree_compiles() {
            let (_temp, session) = session("Foo");
            let runner = ScriptedRunner::new(&[0]);

            let outcome = build(&session, &runner, &ToolArgs::default()).unwrap();
            assert_eq!(outcome, BuildOutcome::Compiled { sources: 1 });
            assert_eq!(runner.tools(), [Tool::Compile]);
            assert!(session.paths.bin_dir().is_dir());
        }

        #[test]
        fn fresh_tree_skips_compiler() {
            let (_temp, session) = session("Foo");
            let class = session.paths.bin_dir().join("App/Main.class");
            fs::create_dir_all(class.parent().unwrap()).unwrap();
            fs::write(&class, "").unwrap();
            filetime::set_file_mtime(
                session.paths.src_dir().join("App/Main.java"),
                filetime::FileTime::from_unix_time(1_000, 0),
            )
            .unwrap();

            let runner = ScriptedRunner::new(&[]);
            let outcome = build(&session, &runner, &ToolArgs::default()).unwrap();
            assert_eq!(outcome, BuildOutcome::UpToDate);
            assert!(runner.tools().is_empty());
        }

        #[test]
        fn compiler_failure_surfaces_code() {
            let (_temp, session) = session("Foo");
            let runner = ScriptedRunner::new(&[2]);

            let err = build(&session, &runner, &ToolArgs::default()).unwrap_err();
            assert!(matches!(
                err,
                EngineError::ToolFailed {
                    tool: Tool::Compile,
                    code: Some(2)
                }
            ));
        }

        #[test]
        fn recorded_javafx_dependency_requires_fx_path() {
            let (_temp, mut session) = session("Foo");
            session.project.add_requirement(Dependency::JavaFx);
            let runner = ScriptedRunner::new(&[]);

            let err = build(&session, &runner, &ToolArgs::default()).unwrap_err();
            assert!(matches!(
                err,
                EngineError::Toolchain(ToolchainError::FxPathMissing)
            ));
            assert!(runner.tools().is_empty());
        }
    }

    mod clean {
        use super::*;

        #[test]
        fn removes_bin_contents_and_optionally_docs() {
            let (_temp, session) = session("Foo");
            let paths = &session.paths;
            fs::create_dir_all(paths.bin_dir().join("App")).unwrap();
            fs::write(paths.bin_dir().join("App/Main.class"), "").unwrap();
            fs::create_dir_all(paths.docs_dir()).unwrap();

            let outcome = clean(paths, false).unwrap();
            assert_eq!(outcome, CleanOutcome { bin: true, docs: false });
            assert!(paths.bin_dir().is_dir());
            assert_eq!(fs::read_dir(paths.bin_dir()).unwrap().count(), 0);
            assert!(paths.docs_dir().exists());

            let outcome = clean(paths, true).unwrap();
            assert!(outcome.docs);
            assert!(!paths.docs_dir().exists());
        }
    }

    #[test]
    fn tool_failure_display() {
        let err = EngineError::ToolFailed {
            tool: Tool::Execute,
            code: None,
        };
        assert_eq!(err.to_string(), "program failed (terminated by signal)");
    }
}
