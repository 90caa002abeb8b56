//! Asset resolution for border, thumbstick and debug images.
//!
//! Resolving an asset only records what has to happen to it (an
//! [`AssetJob`]) and returns the file name the config should reference.
//! Jobs are executed by [`run_jobs`] once the whole conversion succeeded,
//! so a failing skin leaves the output directory untouched.
//!
//! Vector assets (`.pdf`) are rasterized to PNG at the size they will be
//! displayed at, using an external tool behind the [`Rasterizer`] trait.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

use crate::error::{SkinError, SkinResult};
use crate::models::Size;

/// Pixel size of a rasterized image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterSize {
    /// Pixels
    pub width: u32,
    /// Pixels
    pub height: u32,
}

impl RasterSize {
    /// Rounds a display size to whole pixels (at least 1x1).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_size(size: Size) -> Self {
        Self {
            width: size.width.round().max(1.0) as u32,
            height: size.height.round().max(1.0) as u32,
        }
    }
}

/// Optional canvas adjustments after resizing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RasterOptions {
    /// Pad the canvas to this size
    pub extent: Option<RasterSize>,
    /// Anchor used when padding (e.g. "center", "south")
    pub gravity: Option<String>,
}

/// A single rasterization call.
#[derive(Debug, Clone, Copy)]
pub struct RasterRequest<'a> {
    /// Vector image
    pub source: &'a Path,
    /// PNG to write
    pub output: &'a Path,
    /// Size after resizing
    pub size: RasterSize,
    /// Canvas adjustments
    pub options: &'a RasterOptions,
}

/// Converts a vector asset to a raster image.
pub trait Rasterizer {
    /// Writes `request.output`.
    fn rasterize(&self, request: &RasterRequest<'_>) -> Result<()>;
}

/// Rasterizer backed by an ImageMagick-compatible command line tool.
#[derive(Debug, Clone)]
pub struct CommandRasterizer {
    program: String,
    density: u32,
}

impl CommandRasterizer {
    /// `density` is the DPI the vector source is read at.
    pub fn new(program: impl Into<String>, density: u32) -> Self {
        Self {
            program: program.into(),
            density,
        }
    }

    fn build_command(&self, request: &RasterRequest<'_>) -> Command {
        let size = request.size;
        let mut cmd = Command::new(&self.program);
        cmd.arg("-density")
            .arg(self.density.to_string())
            .args(["-background", "none"])
            .arg(request.source)
            .arg("-resize")
            .arg(format!("{}x{}!", size.width, size.height));
        if let Some(gravity) = &request.options.gravity {
            cmd.arg("-gravity").arg(gravity);
        }
        if let Some(extent) = request.options.extent {
            cmd.arg("-extent")
                .arg(format!("{}x{}", extent.width, extent.height));
        }
        cmd.arg(request.output)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl Rasterizer for CommandRasterizer {
    fn rasterize(&self, request: &RasterRequest<'_>) -> Result<()> {
        info!(
            "Rasterizing {} at {}x{}",
            request.source.display(),
            request.size.width,
            request.size.height
        );
        let output = self
            .build_command(request)
            .output()
            .with_context(|| format!("Failed to execute {}", self.program))?;

        if !output.status.success() {
            anyhow::bail!(
                "{} failed for {}: {}",
                self.program,
                request.source.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}

/// Deferred work for one asset.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetJob {
    /// Copy `source` to `<out_dir>/<name>`
    Copy {
        /// File inside the skin
        source: PathBuf,
        /// Path relative to the output directory
        name: String,
        /// Replace an existing destination
        overwrite: bool,
    },
    /// Rasterize `source` next to itself under the file name of `name`,
    /// then copy the PNG to `<out_dir>/<name>`
    Rasterize {
        /// Vector file inside the skin
        source: PathBuf,
        /// PNG path relative to the output directory
        name: String,
        /// Display size
        size: RasterSize,
        /// Canvas adjustments
        options: RasterOptions,
    },
}

impl AssetJob {
    /// File name the job produces in the output directory.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Copy { name, .. } | Self::Rasterize { name, .. } => name,
        }
    }

    /// Moves the produced file into the `dir` subdirectory of the output.
    pub fn place_under(&mut self, dir: &str) {
        match self {
            Self::Copy { name, .. } | Self::Rasterize { name, .. } => {
                *name = format!("{dir}/{name}");
            }
        }
    }
}

/// Returns true for assets that must be rasterized.
#[must_use]
pub fn is_vector_asset(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Collects asset jobs for one skin.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    skin_dir: PathBuf,
    overwrite: bool,
    jobs: Vec<AssetJob>,
}

impl AssetResolver {
    /// `overwrite` controls whether copies replace existing output files.
    pub fn new(skin_dir: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            skin_dir: skin_dir.into(),
            overwrite,
            jobs: Vec::new(),
        }
    }

    /// Resolves a skin asset displayed at `size` and returns the name the
    /// config should reference.
    pub fn resolve(&mut self, name: &str, size: Size) -> String {
        let source = self.skin_dir.join(name);
        let job = if is_vector_asset(name) {
            let size = RasterSize::from_size(size);
            let mut png = Path::new(name).with_extension("png");
            // One vector image shown at two sizes needs two raster files
            let taken = self.jobs.iter().any(|job| {
                matches!(job, AssetJob::Rasterize { name, size: other, .. }
                    if Path::new(name) == png.as_path() && *other != size)
            });
            if taken {
                png = sized_name(&png, size);
            }
            AssetJob::Rasterize {
                source,
                name: png.to_string_lossy().into_owned(),
                size,
                options: RasterOptions::default(),
            }
        } else {
            AssetJob::Copy {
                source,
                name: name.to_string(),
                overwrite: self.overwrite,
            }
        };
        let resolved = job.name().to_string();
        self.push(job);
        resolved
    }

    /// Records a copy from an arbitrary directory (e.g. the template directory).
    pub fn copy_from(&mut self, dir: &Path, name: &str, overwrite: bool) -> String {
        self.push(AssetJob::Copy {
            source: dir.join(name),
            name: name.to_string(),
            overwrite,
        });
        name.to_string()
    }

    fn push(&mut self, job: AssetJob) {
        if !self.jobs.contains(&job) {
            self.jobs.push(job);
        }
    }

    /// Jobs recorded so far.
    #[must_use]
    pub fn jobs(&self) -> &[AssetJob] {
        &self.jobs
    }

    /// Consumes the resolver.
    #[must_use]
    pub fn into_jobs(self) -> Vec<AssetJob> {
        self.jobs
    }
}

/// `art/stick.png` at 120x80 becomes `art/stick_120x80.png`.
fn sized_name(png: &Path, size: RasterSize) -> PathBuf {
    let stem = png.file_stem().unwrap_or_default().to_string_lossy();
    png.with_file_name(format!("{stem}_{}x{}.png", size.width, size.height))
}

/// Copies a file unless `overwrite` is false and the destination exists.
///
/// Returns whether a copy took place. Copying a file onto itself is skipped.
pub fn copy_file(source: &Path, destination: &Path, overwrite: bool) -> SkinResult<bool> {
    if !overwrite && destination.exists() {
        info!("Skip copying existing file {}", destination.display());
        return Ok(false);
    }
    if same_file(source, destination) {
        debug!("Skip copying {} onto itself", source.display());
        return Ok(false);
    }
    if !source.exists() {
        return Err(SkinError::asset(format!(
            "asset not found: {}",
            source.display()
        )));
    }
    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent)?;
    }
    info!("Copying {} => {}", source.display(), destination.display());
    std::fs::copy(source, destination)?;
    Ok(true)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Executes asset jobs into `out_dir`.
pub fn run_jobs(jobs: &[AssetJob], out_dir: &Path, rasterizer: &dyn Rasterizer) -> SkinResult<()> {
    for job in jobs {
        match job {
            AssetJob::Copy {
                source,
                name,
                overwrite,
            } => {
                copy_file(source, &out_dir.join(name), *overwrite)?;
            }
            AssetJob::Rasterize {
                source,
                name,
                size,
                options,
            } => {
                let file_name = Path::new(name).file_name().unwrap_or_default();
                let raster = source.with_file_name(file_name);
                rasterizer
                    .rasterize(&RasterRequest {
                        source,
                        output: &raster,
                        size: *size,
                        options,
                    })
                    .map_err(|e| SkinError::asset(format!("{e:#}")))?;
                copy_file(&raster, &out_dir.join(name), true)?;
            }
        }
    }
    Ok(())
}
