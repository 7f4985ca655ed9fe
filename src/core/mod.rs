//! core
//!
//! Core domain types, schemas, and operations for Javelin.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ProjectName, PackageName, DriverName
//! - [`project`] - Project descriptor schema and storage
//! - [`paths`] - Centralized path routing inside a project
//! - [`staleness`] - Source/artifact freshness checks
//! - [`scaffold`] - Generated files and entry-point discovery
//! - [`config`] - User configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid names reaching the filesystem
//! - Schemas are strict and self-describing
//! - Staleness is deterministic for a given tree

pub mod config;
pub mod paths;
pub mod project;
pub mod scaffold;
pub mod staleness;
pub mod types;
