//! toolchain::flags
//!
//! Splitting of raw trailing arguments into tool flags and program arguments.
//!
//! # Rules
//!
//! - `--jfx` and `--fx` in the flag region request JavaFX and are consumed.
//! - For `run`, leading `-`-prefixed tokens are `java` options. Options
//!   that take a value (`-cp`, `--module-path`, ...) also take the next
//!   token. The first other token starts the program arguments.
//! - A literal `--` ends the flag region explicitly; everything after it is
//!   a program argument, even tokens that look like flags.
//! - `build` and `doc` have no program: every token is a tool flag, kept
//!   verbatim and in order.
//!
//! # Example
//!
//! ```
//! use javelin::toolchain::ToolArgs;
//!
//! let raw = ["-ea", "--jfx", "input.txt", "-v"].map(String::from);
//! let args = ToolArgs::parse(&raw);
//!
//! assert!(args.fx);
//! assert_eq!(args.flags, ["-ea"]);
//! assert_eq!(args.program_args, ["input.txt", "-v"]);
//!
//! let raw = ["-Xlint", "--", "--jfx", "input.txt"].map(String::from);
//! let args = ToolArgs::parse(&raw);
//! assert!(!args.fx);
//! assert_eq!(args.program_args, ["--jfx", "input.txt"]);
//! ```

/// Flags that request the JavaFX module expansion.
pub const FX_FLAGS: [&str; 2] = ["--jfx", "--fx"];

/// `java` options whose value is the following token.
pub const JAVA_VALUE_OPTIONS: [&str; 8] = [
    "-cp",
    "-classpath",
    "--class-path",
    "-p",
    "--module-path",
    "--upgrade-module-path",
    "--add-modules",
    "--enable-native-access",
];

/// Parsed trailing arguments of `build`, `run` and `doc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolArgs {
    /// JavaFX requested on the command line.
    pub fx: bool,
    /// Pass-through flags for the external tool.
    pub flags: Vec<String>,
    /// Arguments for the launched program.
    pub program_args: Vec<String>,
}

impl ToolArgs {
    /// Split the trailing arguments of `run` into `java` options and
    /// program arguments.
    pub fn parse(raw: &[String]) -> Self {
        let mut args = Self::default();
        let mut iter = raw.iter();

        while let Some(token) = iter.next() {
            if token == "--" {
                break;
            }
            if FX_FLAGS.contains(&token.as_str()) {
                args.fx = true;
                continue;
            }
            if !token.starts_with('-') {
                args.program_args.push(token.clone());
                break;
            }
            args.flags.push(token.clone());
            if JAVA_VALUE_OPTIONS.contains(&token.as_str()) {
                args.flags.extend(iter.next().cloned());
            }
        }
        args.program_args.extend(iter.cloned());
        args
    }

    /// Split the trailing arguments of a verb without a program: every
    /// token is a tool flag, and `--jfx`/`--fx` count only before `--`.
    pub fn parse_tool_only(raw: &[String]) -> Self {
        let mut args = Self::default();
        let mut iter = raw.iter();

        for token in iter.by_ref() {
            if token == "--" {
                break;
            }
            if FX_FLAGS.contains(&token.as_str()) {
                args.fx = true;
            } else {
                args.flags.push(token.clone());
            }
        }
        args.flags.extend(iter.cloned());
        args
    }

    /// Human-readable flag list, or `None` when no flags were given.
    pub fn describe_flags(&self) -> Option<String> {
        let mut shown: Vec<&str> = Vec::new();
        if self.fx {
            shown.push("--jfx");
        }
        shown.extend(self.flags.iter().map(String::as_str));
        (!shown.is_empty()).then(|| shown.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_input() {
        let args = ToolArgs::parse(&[]);
        assert_eq!(args, ToolArgs::default());
        assert_eq!(args.describe_flags(), None);
    }

    #[test]
    fn fx_aliases_consumed() {
        assert!(ToolArgs::parse(&raw(&["--fx"])).fx);
        let args = ToolArgs::parse(&raw(&["-g", "--jfx", "-Werror"]));
        assert!(args.fx);
        assert_eq!(args.flags, ["-g", "-Werror"]);
    }

    #[test]
    fn flag_values_kept_in_order() {
        let args = ToolArgs::parse_tool_only(&raw(&["--release", "17", "-encoding", "UTF-8"]));
        assert_eq!(args.flags, ["--release", "17", "-encoding", "UTF-8"]);
        assert!(args.program_args.is_empty());
    }

    #[test]
    fn program_args_after_separator() {
        let args = ToolArgs::parse(&raw(&["-ea", "--", "a", "--", "b"]));
        assert_eq!(args.flags, ["-ea"]);
        assert_eq!(args.program_args, ["a", "--", "b"]);
    }

    #[test]
    fn first_positional_starts_program_args() {
        let args = ToolArgs::parse(&raw(&["input.txt"]));
        assert!(args.flags.is_empty());
        assert_eq!(args.program_args, ["input.txt"]);

        let args = ToolArgs::parse(&raw(&["-ea", "in.txt", "-v", "--", "--fx"]));
        assert!(!args.fx);
        assert_eq!(args.flags, ["-ea"]);
        assert_eq!(args.program_args, ["in.txt", "-v", "--", "--fx"]);
    }

    #[test]
    fn value_options_take_next_token() {
        let args = ToolArgs::parse(&raw(&["-cp", "lib", "-Dk=v", "--add-modules", "m", "x"]));
        assert_eq!(args.flags, ["-cp", "lib", "-Dk=v", "--add-modules", "m"]);
        assert_eq!(args.program_args, ["x"]);
    }

    #[test]
    fn tool_only_folds_program_args() {
        let args = ToolArgs::parse_tool_only(&raw(&["-g", "--", "-Xlint", "--fx"]));
        assert!(!args.fx);
        assert_eq!(args.flags, ["-g", "-Xlint", "--fx"]);
        assert!(args.program_args.is_empty());
    }

    #[test]
    fn tool_only_keeps_positional_flags() {
        let args = ToolArgs::parse_tool_only(&raw(&["-d", "out", "--jfx"]));
        assert!(args.fx);
        assert_eq!(args.flags, ["-d", "out"]);
    }

    #[test]
    fn describe_includes_fx() {
        let args = ToolArgs::parse(&raw(&["--fx", "-g"]));
        assert_eq!(args.describe_flags().as_deref(), Some("--jfx -g"));
    }
}
