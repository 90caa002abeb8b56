//! RetroSkin Library
//!
//! This library converts Delta emulator skins into RetroArch overlays,
//! including fitting layouts to a target display, turning controls into
//! touch descriptors, and generating the overlay config and screen shader.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod parser;
pub mod services;

// Re-export commonly used types
pub use config::Config;
pub use error::{Diagnostics, SkinError, SkinResult};
