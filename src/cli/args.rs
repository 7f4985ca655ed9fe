//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//!
//! # Verb Normalization
//!
//! Before clap sees the arguments, the verb is matched case-insensitively
//! and the aliases `n`, `b` and `r` are expanded. For `build`, `run` and
//! `doc` everything after the verb is forwarded untouched, so global flags
//! must come before those verbs.

use std::ffi::OsString;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Javelin - scaffold, build and run Java projects
#[derive(Parser, Debug)]
#[command(name = "jvl")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Run as if jvl was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Verbs whose trailing arguments are forwarded verbatim.
const PASS_THROUGH_VERBS: [&str; 3] = ["build", "run", "doc"];

/// Canonical verb for a user-typed token, if it names one.
pub fn canonical_verb(token: &str) -> Option<&'static str> {
    let lower = token.to_ascii_lowercase();
    let verb = match lower.as_str() {
        "new" | "n" => "new",
        "init" => "init",
        "build" | "b" => "build",
        "run" | "r" => "run",
        "clean" => "clean",
        "doc" => "doc",
        "add" => "add",
        "info" => "info",
        "completion" => "completion",
        "help" => "help",
        _ => return None,
    };
    Some(verb)
}

impl Cli {
    /// Normalize then parse an argument list (first item is the program).
    pub fn try_parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let (args, _) = normalize(args);
        Self::try_parse_from(args)
    }
}

/// Rewrite the verb to its canonical form and protect pass-through
/// arguments from clap.
///
/// Returns the rewritten arguments and the canonical verb, if one was found.
pub fn normalize<I, T>(args: I) -> (Vec<OsString>, Option<&'static str>)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    let mut i = 1;
    while i < args.len() {
        let Some(token) = args[i].to_str() else {
            return (args, None);
        };

        if token == "--cwd" {
            i += 2;
            continue;
        }
        if token.starts_with('-') {
            i += 1;
            continue;
        }

        let Some(verb) = canonical_verb(token) else {
            return (args, None);
        };
        args[i] = OsString::from(verb);

        if PASS_THROUGH_VERBS.contains(&verb) {
            let asks_help = args
                .get(i + 1)
                .and_then(|a| a.to_str())
                .is_some_and(|a| a == "-h" || a == "--help");
            if !asks_help {
                args.insert(i + 1, OsString::from("--"));
            }
        }
        return (args, Some(verb));
    }

    (args, None)
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project directory
    #[command(
        name = "new",
        visible_alias = "n",
        long_about = "Create a new project directory.\n\n\
            Scaffolds <NAME>/ with a driver class under src/, a module-info.java, \
            an empty bin/ directory, a Javelin.toml descriptor and a README. Unless \
            --no-git is given, a git repository with a .gitignore is created too.",
        after_help = "\
EXAMPLES:
    # Default layout: src/App/Main.java
    jvl new Foo

    # Custom package and driver
    jvl new Foo -n com.acme.foo -d Launcher

    # Skip git
    jvl new Foo --no-git"
    )]
    New {
        /// Name of the project (and its directory)
        name: Option<String>,

        /// Package holding the driver (default: App)
        #[arg(short = 'n', long = "package", value_name = "PACKAGE")]
        package: Option<String>,

        /// Driver class name (default: Main)
        #[arg(short = 'd', long = "driver", value_name = "DRIVER")]
        driver: Option<String>,

        /// Do not create a git repository
        #[arg(long)]
        no_git: bool,
    },

    /// Turn the current directory into a project
    #[command(
        name = "init",
        long_about = "Turn the current directory into a project.\n\n\
            The project name is the directory name. The driver is found by \
            scanning src/ for a class with a `public static void main` method; \
            if there is none, the default driver is generated. A driver without \
            a package declaration is refused. Existing files are never \
            overwritten."
    )]
    Init {
        /// Do not create a git repository
        #[arg(long)]
        no_git: bool,
    },

    /// Compile the project if sources changed
    #[command(
        name = "build",
        visible_alias = "b",
        after_help = "\
EXAMPLES:
    jvl build
    jvl build -Xlint:all --release 17
    jvl build --jfx"
    )]
    Build {
        /// Flags for javac; --jfx/--fx adds the JavaFX modules
        #[arg(allow_hyphen_values = true, value_name = "FLAGS")]
        args: Vec<String>,
    },

    /// Build if needed, then run the driver
    #[command(
        name = "run",
        visible_alias = "r",
        after_help = "\
EXAMPLES:
    jvl run
    jvl run input.txt
    jvl run -ea -- input.txt --verbose
    jvl run --fx"
    )]
    Run {
        /// Options for java, then program arguments (`--` forces the split)
        #[arg(allow_hyphen_values = true, value_name = "FLAGS")]
        args: Vec<String>,
    },

    /// Remove compiled classes
    #[command(name = "clean")]
    Clean {
        /// Also remove generated documentation
        #[arg(short = 'd', long = "doc")]
        doc: bool,
    },

    /// Generate documentation into docs/
    #[command(name = "doc")]
    Doc {
        /// Flags for javadoc; --jfx/--fx adds the JavaFX modules
        #[arg(allow_hyphen_values = true, value_name = "FLAGS")]
        args: Vec<String>,
    },

    /// Add a dependency to module-info.java
    #[command(
        name = "add",
        after_help = "\
SUPPORTED DEPENDENCIES:
    javafx (aliases: jfx, fx)"
    )]
    Add {
        /// Dependency identifier
        dependency: String,
    },

    /// Show the project descriptor and build status
    #[command(name = "info")]
    Info {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    #[command(name = "completion")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_normalized(std::iter::once("jvl").chain(args.iter().copied()))
    }

    mod normalize {
        use super::*;

        fn strings(args: &[&str]) -> Vec<String> {
            let (out, _) = normalize(std::iter::once("jvl").chain(args.iter().copied()));
            out.into_iter()
                .map(|a| a.into_string().unwrap())
                .collect()
        }

        #[test]
        fn verbs_case_insensitive() {
            assert_eq!(strings(&["NEW", "Foo"]), ["jvl", "new", "Foo"]);
            assert_eq!(strings(&["Clean"]), ["jvl", "clean"]);
        }

        #[test]
        fn aliases_expanded() {
            assert_eq!(strings(&["n", "Foo"]), ["jvl", "new", "Foo"]);
            assert_eq!(strings(&["B"]), ["jvl", "build", "--"]);
            assert_eq!(strings(&["r", "x"]), ["jvl", "run", "--", "x"]);
        }

        #[test]
        fn global_flags_skipped() {
            assert_eq!(
                strings(&["--cwd", "b", "--debug", "Build", "-g"]),
                ["jvl", "--cwd", "b", "--debug", "build", "--", "-g"]
            );
        }

        #[test]
        fn help_after_pass_through_verb_kept() {
            assert_eq!(strings(&["run", "--help"]), ["jvl", "run", "--help"]);
        }

        #[test]
        fn unknown_verb_untouched() {
            assert_eq!(strings(&["Frobnicate"]), ["jvl", "Frobnicate"]);
            let (_, verb) = normalize(["jvl", "Frobnicate"]);
            assert!(verb.is_none());
        }

        #[test]
        fn project_name_not_rewritten() {
            assert_eq!(strings(&["new", "Run"]), ["jvl", "new", "Run"]);
        }
    }

    mod parsing {
        use super::*;

        #[test]
        fn new_with_flags() {
            let cli = parse(&["new", "Foo", "-n", "com.acme", "-d", "Launcher", "--no-git"])
                .unwrap();
            match cli.command {
                Command::New {
                    name,
                    package,
                    driver,
                    no_git,
                } => {
                    assert_eq!(name.as_deref(), Some("Foo"));
                    assert_eq!(package.as_deref(), Some("com.acme"));
                    assert_eq!(driver.as_deref(), Some("Launcher"));
                    assert!(no_git);
                }
                other => panic!("unexpected command: {:?}", other),
            }
        }

        #[test]
        fn new_without_name_parses() {
            let cli = parse(&["new"]).unwrap();
            assert!(matches!(cli.command, Command::New { name: None, .. }));
        }

        #[test]
        fn run_forwards_everything() {
            let cli = parse(&["run", "-ea", "--jfx", "--", "a", "--debug"]).unwrap();
            match cli.command {
                Command::Run { args } => {
                    assert_eq!(args, ["-ea", "--jfx", "--", "a", "--debug"]);
                }
                other => panic!("unexpected command: {:?}", other),
            }
            assert!(!cli.debug);
        }

        #[test]
        fn run_leading_separator_kept() {
            let cli = parse(&["run", "--", "a"]).unwrap();
            match cli.command {
                Command::Run { args } => assert_eq!(args, ["--", "a"]),
                other => panic!("unexpected command: {:?}", other),
            }
        }

        #[test]
        fn clean_doc_short_flag() {
            let cli = parse(&["clean", "-d"]).unwrap();
            assert!(matches!(cli.command, Command::Clean { doc: true }));
        }

        #[test]
        fn global_flags_before_verb() {
            let cli = parse(&["-q", "--cwd", "/tmp", "info"]).unwrap();
            assert!(cli.quiet);
            assert_eq!(cli.cwd, Some(PathBuf::from("/tmp")));
        }

        #[test]
        fn unknown_verb_is_invalid_subcommand() {
            let err = parse(&["frobnicate"]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::InvalidSubcommand);
        }

        #[test]
        fn unknown_new_flag_rejected() {
            let err = parse(&["new", "Foo", "--bogus"]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
        }
    }
}
