//! Conversion of one skin into RetroArch overlays.
//!
//! Transcoding never touches the filesystem: assets the overlays reference
//! are recorded as [`AssetJob`]s and executed by the output writer once
//! every skin of a run has converted successfully.

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

use crate::config::Config;
use crate::constants::UNSUPPORTED_GAME_TYPE;
use crate::error::{Diagnostics, SkinError, SkinResult, UnknownField};
use crate::models::{Layout, Orientation, Overlay, SkinDocument};
use crate::parser::shader::ScreenGeometry;
use crate::parser::skin_json::edge_to_edge;

use super::assets::{AssetJob, AssetResolver};
use super::decomposer::Decomposer;
use super::linker::link_orientations;
use super::normalizer::{console_aspect_ratio, fit_layout};

/// Result of converting one skin.
#[derive(Debug, Clone, Default)]
pub struct TranscodedSkin {
    /// One overlay per orientation, in document order
    pub overlays: Vec<Overlay>,
    /// Screen geometry for shader parameters, parallel to `overlays`
    pub screens: Vec<ScreenGeometry>,
    /// Pending asset copies and rasterizations
    pub assets: Vec<AssetJob>,
    /// Non-fatal findings
    pub diagnostics: Diagnostics,
}

/// Converts `document`, whose assets live in `skin_dir`.
///
/// Overlays for both orientations are linked with a rotate control.
///
/// # Errors
///
/// Any fatal [`SkinError`]; unknown orientation keys, input names and
/// directions are only recorded in the returned diagnostics.
pub fn transcode(
    document: &SkinDocument,
    skin_dir: &Path,
    config: &Config,
) -> SkinResult<TranscodedSkin> {
    if document.game_type_identifier == UNSUPPORTED_GAME_TYPE {
        return Err(SkinError::unsupported_game_type(format!(
            "{} skins are not supported",
            document.console_key()
        )));
    }
    let representations = edge_to_edge(document)?;
    let aspect_ratio = config
        .console_aspect_ratio
        .or_else(|| console_aspect_ratio(document.console_key()));

    info!(
        "Transcoding {} ({})",
        document.name.as_deref().unwrap_or("unnamed skin"),
        document.game_type_identifier
    );

    let mut assets = AssetResolver::new(skin_dir, config.overwrite_assets);
    let mut skin = TranscodedSkin::default();

    for (key, value) in representations {
        let Some(orientation) = Orientation::from_key(key) else {
            skin.diagnostics
                .unknown(UnknownField::Orientation, key, "edgeToEdge representation");
            continue;
        };
        let layout = Layout::deserialize(value)
            .map_err(|e| SkinError::document(format!("invalid {orientation} layout: {e}")))?;

        let fitted = fit_layout(&layout, orientation, config.target_screen_size, aspect_ratio)?;
        debug!(
            "{orientation}: scale {} offset ({}, {})",
            fitted.fit.scale, fitted.fit.offset.x, fitted.fit.offset.y
        );
        let border = fitted.assets.border().ok_or_else(|| {
            SkinError::document(format!("{orientation} layout has no border asset"))
        })?;

        let mut overlay = Overlay::new(
            orientation,
            config.normalized,
            config.range_mod,
            config.alpha_mod,
        );
        let mut decomposer =
            Decomposer::new(&fitted, config.normalized, &mut assets, &mut skin.diagnostics);
        overlay.descs.push(decomposer.border(border));
        for (index, item) in fitted.items.iter().enumerate() {
            overlay.descs.extend(decomposer.decompose(index, item));
        }

        skin.screens.push(ScreenGeometry {
            orientation,
            border_size: fitted.mapping_size,
            output_frame: fitted.screen.output_frame,
        });
        skin.overlays.push(overlay);
    }

    link_orientations(&mut skin.overlays, &config.rotate_button);
    skin.assets = assets.into_jobs();
    Ok(skin)
}

/// Gives every descriptor without an image the `asset` image.
pub fn add_debug_overlay(overlays: &mut [Overlay], asset: &str) {
    for desc in overlays.iter_mut().flat_map(|overlay| overlay.descs.iter_mut()) {
        desc.fill_overlay(asset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DescAttr;
    use crate::parser::skin_json::parse_skin_document;
    use crate::services::linker::OVERLAY_NEXT;

    fn document(game: &str, orientations: &str) -> SkinDocument {
        parse_skin_document(&format!(
            r#"{{
                "name": "Test",
                "gameTypeIdentifier": "com.rileytestut.delta.game.{game}",
                "representations": {{ "iphone": {{ "edgeToEdge": {{ {orientations} }} }} }}
            }}"#
        ))
        .unwrap()
    }

    const PORTRAIT: &str = r#""portrait": {
        "mappingSize": { "width": 430, "height": 932 },
        "assets": { "resizable": "border.pdf" },
        "screens": [ { "outputFrame": { "x": 0, "y": 100, "width": 430, "height": 287 } } ],
        "items": [
            { "inputs": ["a", "b"], "frame": { "x": 300, "y": 600, "width": 60, "height": 60 } },
            { "inputs": ["menu"], "frame": { "x": 10, "y": 880, "width": 40, "height": 20 } }
        ]
    }"#;

    const LANDSCAPE: &str = r#""landscape": {
        "mappingSize": { "width": 932, "height": 430 },
        "assets": { "large": "landscape.png" },
        "gameScreenFrame": { "x": 200, "y": 0, "width": 532, "height": 430 },
        "items": [
            { "inputs": { "up": "up", "down": "down", "left": "left", "right": "right" },
              "frame": { "x": 20, "y": 200, "width": 120, "height": 120 } }
        ]
    }"#;

    #[test]
    fn test_single_orientation_has_border_then_items() {
        let skin = transcode(&document("gba", PORTRAIT), Path::new("/skin"), &Config::new())
            .unwrap();

        assert_eq!(skin.overlays.len(), 1);
        let overlay = &skin.overlays[0];
        assert_eq!(overlay.name, "portrait");
        assert_eq!(overlay.descs.len(), 3);
        assert_eq!(overlay.descs[0].command, "null");
        assert_eq!(
            overlay.descs[0].attrs,
            [
                DescAttr::AlphaMod(1.0),
                DescAttr::Overlay("border.png".to_string())
            ]
        );
        assert_eq!(overlay.descs[1].command, "a|b");
        assert_eq!(overlay.descs[2].command, "menu_toggle");
        assert!(overlay.descs.iter().all(|d| d.command != OVERLAY_NEXT));
        assert!(skin.diagnostics.is_empty());
    }

    #[test]
    fn test_normalized_boxes_stay_in_unit_range() {
        let skin = transcode(&document("gba", PORTRAIT), Path::new("/skin"), &Config::new())
            .unwrap();
        for desc in &skin.overlays[0].descs {
            let rect = desc.rect;
            for v in [rect.x, rect.y, rect.w, rect.h] {
                assert!((0.0..=1.0).contains(&v), "{} out of range: {v}", desc.command);
            }
        }
    }

    #[test]
    fn test_pixel_coordinates_round_half_up() {
        let portrait = r#""portrait": {
            "mappingSize": { "width": 430, "height": 932 },
            "assets": { "resizable": "border.png" },
            "screens": [ { "outputFrame": { "x": 0, "y": 100, "width": 430, "height": 287 } } ],
            "items": [
                { "inputs": ["a"], "frame": { "x": 100, "y": 600, "width": 37.5, "height": 40 } }
            ]
        }"#;
        let config = Config {
            normalized: false,
            ..Config::new()
        };
        let skin = transcode(&document("gba", portrait), Path::new("/skin"), &config).unwrap();
        assert_eq!(
            skin.overlays[0].descs[1].primary(false),
            "a,356.3,1860.0,rect,56.3,60.0"
        );
    }

    #[test]
    fn test_border_vector_asset_becomes_raster_job() {
        let skin = transcode(&document("gba", PORTRAIT), Path::new("/skin"), &Config::new())
            .unwrap();
        assert_eq!(skin.assets.len(), 1);
        assert!(matches!(
            &skin.assets[0],
            AssetJob::Rasterize { name, .. } if name == "border.png"
        ));
    }

    #[test]
    fn test_both_orientations_are_linked() {
        let skin = transcode(
            &document("gba", &format!("{PORTRAIT}, {LANDSCAPE}")),
            Path::new("/skin"),
            &Config::new(),
        )
        .unwrap();

        assert_eq!(skin.overlays.len(), 2);
        for (overlay, other) in [("portrait", "landscape"), ("landscape", "portrait")] {
            let overlay = skin.overlays.iter().find(|o| o.name == overlay).unwrap();
            let rotates: Vec<_> = overlay
                .descs
                .iter()
                .filter(|d| d.command == OVERLAY_NEXT)
                .collect();
            assert_eq!(rotates.len(), 1);
            assert_eq!(rotates[0].next_target(), Some(other));
        }

        // Landscape fits into the swapped target; the legacy frame becomes its screen
        let landscape = skin.screens[1];
        assert_eq!(landscape.orientation, Orientation::Landscape);
        assert_eq!(landscape.border_size.width, 2796.0);
        assert_eq!(landscape.border_size.height, 1290.0);
    }

    #[test]
    fn test_unknown_orientation_is_skipped_with_warning() {
        let skin = transcode(
            &document(
                "gba",
                &format!(r#"{PORTRAIT}, "upsideDown": {{ "mappingSize": {{ "width": 1, "height": 1 }} }}"#),
            ),
            Path::new("/skin"),
            &Config::new(),
        )
        .unwrap();
        assert_eq!(skin.overlays.len(), 1);
        assert_eq!(skin.diagnostics.len(), 1);
        assert_eq!(
            skin.diagnostics.warnings()[0].field,
            UnknownField::Orientation
        );
    }

    #[test]
    fn test_ds_skins_are_rejected() {
        let err = transcode(&document("ds", PORTRAIT), Path::new("/skin"), &Config::new())
            .unwrap_err();
        assert!(matches!(err, SkinError::UnsupportedGameType(_)));
    }

    #[test]
    fn test_missing_border_asset_is_document_error() {
        let err = transcode(
            &document(
                "gba",
                r#""portrait": { "mappingSize": { "width": 430, "height": 932 },
                    "screens": [ { "outputFrame": { "x": 0, "y": 0, "width": 430, "height": 287 } } ] }"#,
            ),
            Path::new("/skin"),
            &Config::new(),
        )
        .unwrap_err();
        assert!(matches!(err, SkinError::Document(_)));
    }

    #[test]
    fn test_multi_screen_layout_is_rejected() {
        let err = transcode(
            &document(
                "gba",
                r#""portrait": { "mappingSize": { "width": 430, "height": 932 },
                    "assets": { "large": "b.png" },
                    "screens": [
                        { "outputFrame": { "x": 0, "y": 0, "width": 430, "height": 287 } },
                        { "outputFrame": { "x": 0, "y": 300, "width": 430, "height": 287 } }
                    ] }"#,
            ),
            Path::new("/skin"),
            &Config::new(),
        )
        .unwrap_err();
        assert!(matches!(err, SkinError::UnsupportedLayout(_)));
    }

    #[test]
    fn test_debug_overlay_fills_only_missing_images() {
        let mut skin = transcode(&document("gba", PORTRAIT), Path::new("/skin"), &Config::new())
            .unwrap();
        add_debug_overlay(&mut skin.overlays, "debug.png");
        let descs = &skin.overlays[0].descs;
        assert_eq!(descs[0].overlay(), Some("border.png"));
        assert_eq!(descs[1].overlay(), Some("debug.png"));
        assert_eq!(descs[2].overlay(), Some("debug.png"));
    }
}
