//! Reading skins and writing RetroArch files.
//!
//! This module handles loading Delta skin descriptions, serializing
//! overlays into RetroArch config syntax, and rewriting the shader template.

pub mod config_gen;
pub mod shader;
pub mod skin_json;

// Re-export commonly used functions
pub use config_gen::generate_config;
pub use skin_json::{load_skin, LoadedSkin};
