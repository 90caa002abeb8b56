//! CLI command handlers for RetroSkin.
//!
//! This module provides the scriptable entry points of the converter.

pub mod common;
pub mod config;
pub mod convert;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use convert::ConvertArgs;
