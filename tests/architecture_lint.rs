//! Architecture enforcement tests.
//!
//! The layering described in `src/lib.rs` is only useful if it holds. These
//! tests scan the source tree so violations are caught in CI.
//!
//! # Test Categories
//!
//! 1. **Git Doorway** - Only `src/git/` may touch `git2`
//! 2. **Process Spawning** - Only `src/toolchain/` may spawn processes
//! 3. **Handler Seam** - Command handlers receive their runner, never build one
//! 4. **Quiet Layers** - Only `src/cli/` and `src/ui/` print

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

fn src_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src")
}

/// Every Rust file under `src/` with its path relative to `src/`.
fn sources() -> Vec<(String, String)> {
    let root = src_dir();
    WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .map(|e| e.expect("failed to walk src"))
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .map(|e| {
            let relative = e
                .path()
                .strip_prefix(&root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            let content = fs::read_to_string(e.path())
                .unwrap_or_else(|_| panic!("failed to read {}", relative));
            (relative, content)
        })
        .collect()
}

/// Code lines (comments skipped) outside `allowed` containing any of `patterns`.
fn violations(allowed: &[&str], patterns: &[&str]) -> Vec<String> {
    sources()
        .into_iter()
        .filter(|(path, _)| !allowed.iter().any(|prefix| path.starts_with(prefix)))
        .filter_map(|(path, content)| {
            content
                .lines()
                .enumerate()
                .filter(|(_, line)| !line.trim_start().starts_with("//"))
                .find_map(|(n, line)| {
                    patterns
                        .iter()
                        .find(|p| line.contains(*p))
                        .map(|p| format!("{}:{}: contains `{}`", path, n + 1, p))
                })
        })
        .collect()
}

#[test]
fn sources_found() {
    let files = sources();
    assert!(files.iter().any(|(p, _)| p == "lib.rs"));
    assert!(files.iter().any(|(p, _)| p == "toolchain/mod.rs"));
}

#[test]
fn only_git_module_uses_git2() {
    let found = violations(&["git/"], &["git2::", "use git2"]);
    assert!(
        found.is_empty(),
        "git2 used outside src/git:\n  {}",
        found.join("\n  ")
    );
}

#[test]
fn only_toolchain_spawns_processes() {
    let found = violations(&["toolchain/"], &["process::Command", "Command::new("]);
    assert!(
        found.is_empty(),
        "process spawned outside src/toolchain:\n  {}",
        found.join("\n  ")
    );
}

#[test]
fn handlers_do_not_construct_runner() {
    // cli/mod.rs wires SystemRunner in; handlers only see `&dyn ProcessRunner`
    let found = violations(&["cli/mod.rs", "toolchain/"], &["SystemRunner"]);
    assert!(
        found.is_empty(),
        "SystemRunner referenced outside the entry point:\n  {}",
        found.join("\n  ")
    );
}

#[test]
fn only_cli_and_ui_print() {
    let found = violations(&["cli/", "ui/"], &["println!", "eprintln!"]);
    assert!(
        found.is_empty(),
        "printing outside src/cli and src/ui:\n  {}",
        found.join("\n  ")
    );
}
