//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All user-facing text goes through this module so quiet mode and
//! styling are applied consistently. Diagnostics for developers go
//! through `tracing` instead.

pub mod output;
