//! Application-wide constants.
//!
//! This module defines names used throughout the application, including
//! the application name and the fixed file names of generated output.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "RetroSkin";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "retroskin";

/// Directory name below the platform config directory.
pub const CONFIG_DIR_NAME: &str = "RetroSkin";

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "RETROSKIN_CONFIG_DIR";

/// Skin description inside a skin directory or archive.
pub const SKIN_INFO_FILE: &str = "info.json";

/// Extension of zipped skins.
pub const SKIN_ARCHIVE_EXTENSION: &str = "deltaskin";

/// Only supported game type that cannot be converted (dual screen).
pub const UNSUPPORTED_GAME_TYPE: &str = "com.rileytestut.delta.game.ds";

/// Device class read from the skin.
pub const DEVICE_CLASS: &str = "iphone";

/// Display type read from the skin.
pub const DISPLAY_TYPE: &str = "edgeToEdge";

/// Shader preset copied from the template directory.
pub const SHADER_PRESET: &str = "delta.slangp";

/// Shader template rewritten with screen geometry.
pub const SHADER_NAME: &str = "delta.slang";

/// Default debug overlay image in the template directory.
pub const DEFAULT_DEBUG_OVERLAY: &str = "debug.png";

/// Default output config name (without extension).
pub const DEFAULT_OUTPUT_NAME: &str = "delta";

/// Default debug config name (without extension).
pub const DEFAULT_DEBUG_NAME: &str = "delta-debug";

/// Templates shipped with the crate.
pub const BUNDLED_TEMPLATE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/template");
