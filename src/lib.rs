//! Javelin - scaffold, build and run plain Java projects
//!
//! Javelin is a single-binary tool (`jvl`) that manages small Java projects
//! without a build file: it lays out a conventional source tree, recompiles
//! only when sources changed, and launches the entry point, with optional
//! JavaFX support.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Orchestrates root check → staleness → toolchain flow
//! - [`core`] - Domain types, the project descriptor, paths, staleness, scaffolding
//! - [`toolchain`] - Command lines for javac, java and javadoc, and the process seam
//! - [`git`] - Single interface for all Git operations
//! - [`ui`] - User interaction utilities
//!
//! # Correctness Invariants
//!
//! 1. Project-scoped commands run only from the project root
//! 2. A failed compile is never followed by an execute
//! 3. The descriptor is written atomically and never half-updated

pub mod cli;
pub mod core;
pub mod engine;
pub mod git;
pub mod toolchain;
pub mod ui;
