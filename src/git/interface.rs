//! git::interface
//!
//! Git interface implementation using git2.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// Creating a repository failed.
    #[error("failed to initialize git repository at {path}: {message}")]
    InitFailed {
        /// Where the repository was to be created
        path: PathBuf,
        /// Message from libgit2
        message: String,
    },
}

/// Handle to a non-bare Git repository.
pub struct Git {
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("git_dir", &self.repo.path())
            .finish()
    }
}

impl Git {
    /// Open the repository whose working directory is exactly `path`.
    ///
    /// Unlike discovery, a parent repository does not count: a project
    /// created inside another checkout still gets its own repository.
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::open(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        Ok(Self { repo })
    }

    /// Whether `path` is the root of a repository.
    pub fn is_repo(path: &Path) -> bool {
        Self::open(path).is_ok()
    }

    /// Create a new repository at `path`.
    pub fn init(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::init(path).map_err(|e| GitError::InitFailed {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;
        tracing::debug!("initialized git repository at {}", path.display());
        Ok(Self { repo })
    }
}
