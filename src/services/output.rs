//! Writes a converted skin to disk.
//!
//! Everything that can fail without side effects happens first: the shader
//! template is read and both configs are rendered in memory. Text outputs
//! are then staged as `*.tmp` files, asset jobs run, and only when all of
//! that succeeded are the staged files renamed into place. On failure the
//! staged files are removed.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::constants::{DEFAULT_DEBUG_OVERLAY, SHADER_NAME, SHADER_PRESET};
use crate::parser::config_gen::generate_config;
use crate::parser::shader::{inject_shader_params, shader_params};

use super::assets::{run_jobs, AssetJob, Rasterizer};
use super::transcoder::{add_debug_overlay, TranscodedSkin};

/// Where and under which names output is written.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Receives every produced file
    pub out_dir: PathBuf,
    /// Holds the shader template, preset and default debug image
    pub template_dir: PathBuf,
    /// Config file name without extension
    pub output_name: String,
    /// Debug config name without extension; `None` skips the debug config
    pub debug_name: Option<String>,
    /// Debug image already available to RetroArch; `None` copies the
    /// template's `debug.png`
    pub debug_overlay: Option<String>,
}

/// Paths of the files a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutput {
    /// Overlay config
    pub config: PathBuf,
    /// Debug overlay config, if requested
    pub debug_config: Option<PathBuf>,
    /// Shader with injected parameters
    pub shader: PathBuf,
    /// Number of asset jobs executed
    pub assets: usize,
}

/// Writes configs, shader and assets for `skin`.
pub fn write_output(
    skin: &TranscodedSkin,
    options: &OutputOptions,
    rasterizer: &dyn Rasterizer,
) -> Result<WrittenOutput> {
    let template_path = options.template_dir.join(SHADER_NAME);
    let template = fs::read_to_string(&template_path).with_context(|| {
        format!("Failed to read shader template: {}", template_path.display())
    })?;
    let shader = inject_shader_params(&template, &shader_params(&skin.screens));

    let mut jobs = skin.assets.clone();
    jobs.push(AssetJob::Copy {
        source: options.template_dir.join(SHADER_PRESET),
        name: SHADER_PRESET.to_string(),
        overwrite: true,
    });

    let config_path = options.out_dir.join(format!("{}.cfg", options.output_name));
    let shader_path = options.out_dir.join(SHADER_NAME);
    let mut files = vec![
        (config_path.clone(), generate_config(&skin.overlays)),
        (shader_path.clone(), shader),
    ];

    let debug_config = match &options.debug_name {
        Some(name) => {
            let asset = match &options.debug_overlay {
                Some(asset) => asset.clone(),
                None => {
                    jobs.push(AssetJob::Copy {
                        source: options.template_dir.join(DEFAULT_DEBUG_OVERLAY),
                        name: DEFAULT_DEBUG_OVERLAY.to_string(),
                        overwrite: false,
                    });
                    DEFAULT_DEBUG_OVERLAY.to_string()
                }
            };
            let mut overlays = skin.overlays.clone();
            add_debug_overlay(&mut overlays, &asset);
            let path = options.out_dir.join(format!("{name}.cfg"));
            files.push((path.clone(), generate_config(&overlays)));
            Some(path)
        }
        None => None,
    };

    fs::create_dir_all(&options.out_dir).with_context(|| {
        format!("Failed to create output directory: {}", options.out_dir.display())
    })?;

    let staged = stage_files(&files)?;
    let committed = run_jobs(&jobs, &options.out_dir, rasterizer)
        .context("Failed to prepare assets")
        .and_then(|()| commit_files(&staged));
    if let Err(err) = committed {
        discard_files(&staged);
        return Err(err);
    }

    Ok(WrittenOutput {
        config: config_path,
        debug_config,
        shader: shader_path,
        assets: jobs.len(),
    })
}

/// A text file written to a temporary path, waiting to be renamed.
struct StagedFile {
    temp: PathBuf,
    target: PathBuf,
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn stage_files(files: &[(PathBuf, String)]) -> Result<Vec<StagedFile>> {
    let mut staged = Vec::with_capacity(files.len());
    for (target, content) in files {
        let temp = temp_path(target);
        if let Err(err) = fs::write(&temp, content) {
            discard_files(&staged);
            return Err(err).with_context(|| {
                format!("Failed to write to temporary file: {}", temp.display())
            });
        }
        staged.push(StagedFile {
            temp,
            target: target.clone(),
        });
    }
    Ok(staged)
}

fn commit_files(staged: &[StagedFile]) -> Result<()> {
    for file in staged {
        fs::rename(&file.temp, &file.target).with_context(|| {
            format!("Failed to rename temporary file to: {}", file.target.display())
        })?;
        info!("Saved {}", file.target.display());
    }
    Ok(())
}

fn discard_files(staged: &[StagedFile]) {
    for file in staged {
        if file.temp.exists() {
            if let Err(err) = fs::remove_file(&file.temp) {
                warn!("Failed to remove {}: {err}", file.temp.display());
            }
        }
    }
}
