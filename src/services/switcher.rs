//! Merges several converted skins into one overlay ring.
//!
//! Overlays of skin `k` are renamed `<name>_switch<k>`; a switch control on
//! each overlay leads to the same orientation of skin `k + 1`, wrapping
//! around to the base skin after the last one. Assets of skin `k >= 1` are
//! written to a `switch<k>/` subdirectory so equally named images of
//! different skins do not overwrite each other.

use std::collections::HashMap;
use tracing::info;

use crate::config::ButtonPlacement;
use crate::error::{SkinError, SkinResult};

use super::linker::overlay_next;
use super::transcoder::TranscodedSkin;

/// Merges `others` into `base`.
///
/// # Errors
///
/// `SkinMismatch` if any skin produced a different number of overlays
/// than the base skin.
pub fn merge_skins(
    base: TranscodedSkin,
    others: Vec<TranscodedSkin>,
    placement: &ButtonPlacement,
) -> SkinResult<TranscodedSkin> {
    let per_skin = base.overlays.len();
    for (index, other) in others.iter().enumerate() {
        if other.overlays.len() != per_skin {
            return Err(SkinError::skin_mismatch(format!(
                "switch skin {} has {} overlays, base skin has {per_skin}",
                index + 1,
                other.overlays.len()
            )));
        }
    }

    let skin_count = others.len() + 1;
    info!("Merging {skin_count} skins with {per_skin} overlays each");

    let mut merged = base;
    for (index, mut other) in others.into_iter().enumerate() {
        place_assets_under(&mut other, &format!("switch{}", index + 1));
        merged.overlays.extend(other.overlays);
        merged.assets.extend(other.assets);
        merged.diagnostics.extend(other.diagnostics);
    }
    if per_skin == 0 {
        return Ok(merged);
    }

    for (position, overlay) in merged.overlays.iter_mut().enumerate() {
        let skin = position / per_skin;
        let suffix = format!("_switch{skin}");
        let next = format!("{}_switch{}", overlay.name, (skin + 1) % skin_count);

        overlay.name.push_str(&suffix);
        for desc in &mut overlay.descs {
            if let Some(target) = desc.next_target_mut() {
                target.push_str(&suffix);
            }
        }
        let switch = overlay_next(overlay, placement, &next);
        overlay.descs.push(switch);
    }

    Ok(merged)
}

/// Moves every asset of `skin` under `dir` and repoints its descriptors.
fn place_assets_under(skin: &mut TranscodedSkin, dir: &str) {
    let mut renamed = HashMap::new();
    for job in &mut skin.assets {
        let old = job.name().to_string();
        job.place_under(dir);
        renamed.insert(old, job.name().to_string());
    }
    for desc in skin.overlays.iter_mut().flat_map(|o| o.descs.iter_mut()) {
        if let Some(path) = desc.overlay_mut() {
            if let Some(new) = renamed.get(path.as_str()) {
                path.clone_from(new);
            }
        }
    }
}
