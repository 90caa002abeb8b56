//! Configuration management for the converter.
//!
//! This module handles loading, validating, and saving converter settings
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{BUNDLED_TEMPLATE_DIR, CONFIG_DIR_ENV, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::models::{DescBox, Orientation, Size};

/// Box of an extra control (rotate / switch button) in final overlay
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ButtonBox {
    /// Center x
    pub x: f64,
    /// Center y
    pub y: f64,
    /// Half width
    pub w: f64,
    /// Half height
    pub h: f64,
}

impl ButtonBox {
    /// Creates a box from center and half extents.
    #[must_use]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Converts to a rectangular descriptor box.
    #[must_use]
    pub const fn to_desc_box(self) -> DescBox {
        DescBox::new(self.x, self.y, self.w, self.h)
    }
}

/// Placement of an extra control, optionally different per orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ButtonPlacement {
    /// Used when no orientation-specific box is set
    #[serde(flatten)]
    pub default: ButtonBox,
    /// Override for portrait overlays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait: Option<ButtonBox>,
    /// Override for landscape overlays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landscape: Option<ButtonBox>,
}

impl ButtonPlacement {
    /// Same box for every orientation.
    #[must_use]
    pub const fn new(default: ButtonBox) -> Self {
        Self {
            default,
            portrait: None,
            landscape: None,
        }
    }

    /// Box to use for an overlay of the given orientation.
    #[must_use]
    pub fn for_orientation(&self, orientation: Orientation) -> ButtonBox {
        let specific = match orientation {
            Orientation::Portrait => self.portrait,
            Orientation::Landscape => self.landscape,
        };
        specific.unwrap_or(self.default)
    }
}

/// External rasterizer settings for vector assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterizerConfig {
    /// ImageMagick-compatible executable
    pub program: String,
    /// Render density (DPI) before resizing
    pub density: u32,
}

impl Default for RasterizerConfig {
    fn default() -> Self {
        Self {
            program: "magick".to_string(),
            density: 300,
        }
    }
}

/// Converter configuration.
///
/// # File Location
///
/// - Linux: `~/.config/RetroSkin/config.toml`
/// - macOS: `~/Library/Application Support/RetroSkin/config.toml`
/// - Windows: `%APPDATA%\RetroSkin\config.toml`
///
/// `RETROSKIN_CONFIG_DIR` overrides the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Express descriptor boxes in [0, 1] instead of pixels
    pub normalized: bool,
    /// Hit-region growth factor applied by RetroArch
    pub range_mod: f64,
    /// Opacity multiplier applied to every overlay
    pub alpha_mod: f64,
    /// Portrait display size in pixels (default: iPhone 15 Pro Max)
    pub target_screen_size: Size,
    /// Button switching between portrait and landscape
    pub rotate_button: ButtonPlacement,
    /// Button cycling through merged skins
    pub switch_button: ButtonPlacement,
    /// Overrides the console aspect ratio used for synthesized screens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console_aspect_ratio: Option<f64>,
    /// Image shown on descriptors without one in the debug config
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_overlay: Option<String>,
    /// Directory holding `delta.slang`, `delta.slangp` and `debug.png`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
    /// Replace assets already present in the output directory
    pub overwrite_assets: bool,
    /// External tool used for vector assets
    pub rasterizer: RasterizerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            normalized: true,
            range_mod: 1.5,
            alpha_mod: 0.7,
            target_screen_size: Size::new(1290.0, 2796.0),
            rotate_button: ButtonPlacement::new(ButtonBox::new(0.95, 0.05, 0.0, 0.0)),
            switch_button: ButtonPlacement::new(ButtonBox::new(0.95, 0.95, 0.01, 0.01)),
            console_aspect_ratio: None,
            debug_overlay: None,
            template_dir: None,
            overwrite_assets: false,
            rasterizer: RasterizerConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Template directory: the configured one, else the templates shipped
    /// with the crate.
    #[must_use]
    pub fn template_dir(&self) -> PathBuf {
        self.template_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(BUNDLED_TEMPLATE_DIR))
    }

    /// Gets the full path to the default config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Loads configuration from the default location.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        if !config_path.exists() {
            return Ok(Self::new());
        }
        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to `path` using atomic write.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create config directory: {}", dir.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp config file: {}", temp_path.display())
        })?;

        fs::rename(&temp_path, path).with_context(|| {
            format!("Failed to rename temp config file to: {}", path.display())
        })?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - target screen size is positive and finite
    /// - console aspect ratio override (if set) is positive and finite
    /// - rasterizer program is not empty
    pub fn validate(&self) -> Result<()> {
        let Size { width, height } = self.target_screen_size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            anyhow::bail!("Invalid target_screen_size {width}x{height}: must be positive");
        }

        if let Some(ratio) = self.console_aspect_ratio {
            if !(ratio.is_finite() && ratio > 0.0) {
                anyhow::bail!("Invalid console_aspect_ratio {ratio}: must be positive");
            }
        }

        if self.rasterizer.program.trim().is_empty() {
            anyhow::bail!("rasterizer.program must not be empty");
        }

        Ok(())
    }
}
