//! core::staleness
//!
//! Decides whether the build output is stale relative to the sources.
//!
//! # Mapping
//!
//! Every source `src/<rel>/X.java` is paired with the artifact the compiler
//! writes for it, `bin/<rel>/X.class`. Pairing is by path, never by
//! enumeration order.
//!
//! # Rules
//!
//! A rebuild is required iff at least one source:
//! - has no artifact, or
//! - was modified strictly after its artifact.
//!
//! An empty or missing source tree never requires a rebuild. A missing
//! build directory means every artifact is missing. Artifacts without a
//! source are ignored here; `clean` removes them.
//!
//! # Example
//!
//! ```no_run
//! use javelin::core::paths::ProjectPaths;
//! use javelin::core::staleness;
//!
//! let paths = ProjectPaths::new("/work/Foo");
//! let report = staleness::check(&paths.src_dir(), &paths.bin_dir()).unwrap();
//! if report.rebuild_required() {
//!     println!("{} source(s) need compiling", report.stale.len());
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use thiserror::Error;
use walkdir::WalkDir;

/// Source file extension.
pub const SOURCE_EXT: &str = "java";

/// Artifact file extension.
pub const ARTIFACT_EXT: &str = "class";

/// Errors from the staleness check.
#[derive(Debug, Error)]
pub enum StalenessError {
    #[error("failed to walk '{path}': {message}")]
    Walk { path: PathBuf, message: String },

    #[error("failed to read modification time of '{path}': {source}")]
    Metadata { path: PathBuf, source: io::Error },
}

/// Why a source is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    /// The expected artifact does not exist.
    Missing,
    /// The source was modified after the artifact.
    Outdated,
}

/// A source that needs recompiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleSource {
    /// Source path relative to the source directory.
    pub source: PathBuf,
    /// Expected artifact path relative to the build directory.
    pub artifact: PathBuf,
    /// Why the source is stale.
    pub reason: StaleReason,
}

/// Result of a staleness check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StalenessReport {
    /// Number of sources inspected.
    pub sources: usize,
    /// Sources that need recompiling, in path order.
    pub stale: Vec<StaleSource>,
}

impl StalenessReport {
    /// Whether any source needs recompiling.
    pub fn rebuild_required(&self) -> bool {
        !self.stale.is_empty()
    }
}

/// Expected artifact for a source path relative to the source directory.
pub fn artifact_for(source: &Path) -> PathBuf {
    source.with_extension(ARTIFACT_EXT)
}

/// List every source file under `src_dir`, sorted.
///
/// A missing directory yields an empty list.
pub fn list_sources(src_dir: &Path) -> Result<Vec<PathBuf>, StalenessError> {
    if !src_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(src_dir).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| StalenessError::Walk {
            path: src_dir.to_path_buf(),
            message: e.to_string(),
        })?;

        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == SOURCE_EXT)
        {
            sources.push(entry.into_path());
        }
    }
    Ok(sources)
}

/// Compare the source tree against the build tree.
pub fn check(src_dir: &Path, bin_dir: &Path) -> Result<StalenessReport, StalenessError> {
    let sources = list_sources(src_dir)?;
    let mut report = StalenessReport {
        sources: sources.len(),
        stale: Vec::new(),
    };

    for source in sources {
        let relative = source
            .strip_prefix(src_dir)
            .unwrap_or(&source)
            .to_path_buf();
        let artifact = artifact_for(&relative);

        let reason = match modified(&bin_dir.join(&artifact))? {
            None => Some(StaleReason::Missing),
            Some(built) => {
                let changed = modified(&source)?.ok_or_else(|| StalenessError::Metadata {
                    path: source.clone(),
                    source: io::Error::from(io::ErrorKind::NotFound),
                })?;
                (changed > built).then_some(StaleReason::Outdated)
            }
        };

        if let Some(reason) = reason {
            tracing::debug!("stale: {} ({:?})", relative.display(), reason);
            report.stale.push(StaleSource {
                source: relative,
                artifact,
                reason,
            });
        }
    }

    Ok(report)
}

/// Modification time of `path`, or `None` if it does not exist.
fn modified(path: &Path) -> Result<Option<SystemTime>, StalenessError> {
    match fs::metadata(path) {
        Ok(meta) => meta
            .modified()
            .map(Some)
            .map_err(|e| StalenessError::Metadata {
                path: path.to_path_buf(),
                source: e,
            }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StalenessError::Metadata {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
