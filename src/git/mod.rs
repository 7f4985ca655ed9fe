//! git
//!
//! Single interface for all version-control operations.
//!
//! # Architecture
//!
//! This module is the **only doorway** to Git. No other module imports
//! `git2`, and nothing shells out to the `git` binary.
//!
//! # Example
//!
//! ```no_run
//! use javelin::git::Git;
//! use std::path::Path;
//!
//! let root = Path::new("Foo");
//! if !Git::is_repo(root) {
//!     Git::init(root)?;
//! }
//! # Ok::<(), javelin::git::GitError>(())
//! ```

mod interface;

pub use interface::{Git, GitError};
