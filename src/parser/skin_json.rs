//! Skin loading.
//!
//! A skin is either a directory containing `info.json` or a `.deltaskin`
//! zip archive, which is extracted next to itself before loading. The
//! description is parsed as JSON5, a superset of JSON.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::{DEVICE_CLASS, DISPLAY_TYPE, SKIN_ARCHIVE_EXTENSION, SKIN_INFO_FILE};
use crate::error::{SkinError, SkinResult};
use crate::models::SkinDocument;

/// A parsed skin and the directory its assets live in.
#[derive(Debug, Clone)]
pub struct LoadedSkin {
    /// Parsed `info.json`
    pub document: SkinDocument,
    /// Directory asset names are relative to
    pub dir: PathBuf,
}

/// Returns true if `path` names a zipped skin.
#[must_use]
pub fn is_skin_archive(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SKIN_ARCHIVE_EXTENSION))
}

/// Extracts a `.deltaskin` archive into a sibling directory named after
/// the archive and returns that directory.
pub fn unzip_skin(archive: &Path) -> Result<PathBuf> {
    let stem = archive
        .file_stem()
        .with_context(|| format!("Invalid skin archive name: {}", archive.display()))?;
    let target = archive.with_file_name(stem);

    info!("Extracting {} => {}", archive.display(), target.display());
    let file = File::open(archive)
        .with_context(|| format!("Failed to open skin archive: {}", archive.display()))?;
    let mut zip = zip::ZipArchive::new(file)
        .with_context(|| format!("Failed to read skin archive: {}", archive.display()))?;

    fs::create_dir_all(&target)
        .with_context(|| format!("Failed to create directory: {}", target.display()))?;
    zip.extract(&target)
        .with_context(|| format!("Failed to extract skin archive: {}", archive.display()))?;

    Ok(target)
}

/// Parses skin description text.
///
/// # Errors
///
/// `Document` if the text is not valid JSON5 or lacks required fields.
pub fn parse_skin_document(content: &str) -> SkinResult<SkinDocument> {
    json5::from_str(content).map_err(|e| SkinError::document(format!("invalid {SKIN_INFO_FILE}: {e}")))
}

/// Reads and parses `info.json` from a skin directory.
pub fn read_skin_document(dir: &Path) -> SkinResult<SkinDocument> {
    let path = dir.join(SKIN_INFO_FILE);
    info!("Reading {}", path.display());
    let content = fs::read_to_string(&path)
        .map_err(|e| SkinError::document(format!("cannot read {}: {e}", path.display())))?;
    parse_skin_document(&content)
}

/// Loads a skin from a directory or `.deltaskin` archive.
pub fn load_skin(path: &Path) -> Result<LoadedSkin> {
    let dir = if is_skin_archive(path) {
        unzip_skin(path)?
    } else {
        path.to_path_buf()
    };
    let document = read_skin_document(&dir)?;
    Ok(LoadedSkin { document, dir })
}

/// The orientation map the converter reads (`iphone` / `edgeToEdge`).
pub fn edge_to_edge(
    document: &SkinDocument,
) -> SkinResult<&serde_json::Map<String, serde_json::Value>> {
    document
        .representations
        .get(DEVICE_CLASS)
        .and_then(|displays| displays.get(DISPLAY_TYPE))
        .ok_or_else(|| {
            SkinError::document(format!(
                "skin has no {DEVICE_CLASS} {DISPLAY_TYPE} representation"
            ))
        })
}
