//! Skin conversion command.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::constants::{DEFAULT_DEBUG_NAME, DEFAULT_OUTPUT_NAME};
use crate::parser::skin_json::load_skin;
use crate::services::{
    merge_skins, transcode, write_output, CommandRasterizer, OutputOptions, TranscodedSkin,
};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::info;

/// Convert a Delta skin into a RetroArch overlay
#[derive(Debug, Clone, Args)]
pub struct ConvertArgs {
    /// Skin directory (containing info.json) or .deltaskin archive
    #[arg(value_name = "SKIN")]
    pub skin: PathBuf,

    /// Output directory (defaults to the skin directory)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Configuration file (defaults to the platform config file)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Additional skin to cycle through with the switch button (repeatable)
    #[arg(short, long = "switch", value_name = "SKIN")]
    pub switch: Vec<PathBuf>,

    /// Directory holding delta.slang, delta.slangp and debug.png
    #[arg(long, value_name = "DIR")]
    pub template_dir: Option<PathBuf>,

    /// Overlay config name without extension
    #[arg(long, value_name = "NAME", default_value = DEFAULT_OUTPUT_NAME)]
    pub output_name: String,

    /// Debug overlay config name without extension
    #[arg(long, value_name = "NAME", default_value = DEFAULT_DEBUG_NAME)]
    pub debug_name: String,

    /// Do not write the debug overlay config
    #[arg(long)]
    pub no_debug: bool,
}

impl ConvertArgs {
    /// Execute the convert command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config(self.config.as_deref())?;

        let (base, skin_dir) = convert_skin(&self.skin, &config)?;
        let mut others = Vec::with_capacity(self.switch.len());
        for path in &self.switch {
            others.push(convert_skin(path, &config)?.0);
        }
        let skin = if others.is_empty() {
            base
        } else {
            merge_skins(base, others, &config.switch_button)?
        };

        let options = OutputOptions {
            out_dir: self.output.clone().unwrap_or(skin_dir),
            template_dir: self
                .template_dir
                .clone()
                .unwrap_or_else(|| config.template_dir()),
            output_name: self.output_name.clone(),
            debug_name: (!self.no_debug).then(|| self.debug_name.clone()),
            debug_overlay: config.debug_overlay.clone(),
        };
        let rasterizer =
            CommandRasterizer::new(config.rasterizer.program.clone(), config.rasterizer.density);
        let written = write_output(&skin, &options, &rasterizer)
            .map_err(|e| CliError::from_anyhow("Failed to write output", &e))?;

        println!(
            "Converted {} overlay(s) into {}",
            skin.overlays.len(),
            written.config.display()
        );
        if let Some(debug) = &written.debug_config {
            println!("Debug overlay: {}", debug.display());
        }
        println!("Shader: {}", written.shader.display());
        if !skin.diagnostics.is_empty() {
            println!("{} warning(s):", skin.diagnostics.len());
            for warning in skin.diagnostics.warnings() {
                println!("  {warning}");
            }
        }

        Ok(())
    }
}

fn load_config(path: Option<&Path>) -> CliResult<Config> {
    let loaded = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    loaded.map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))
}

/// Loads and transcodes one skin, returning it with its asset directory.
fn convert_skin(path: &Path, config: &Config) -> CliResult<(TranscodedSkin, PathBuf)> {
    info!("Converting {}", path.display());
    let loaded = load_skin(path).map_err(|e| CliError::from_anyhow("Failed to load skin", &e))?;
    let skin = transcode(&loaded.document, &loaded.dir, config)?;
    Ok((skin, loaded.dir))
}
