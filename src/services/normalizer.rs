//! Fits one orientation's layout onto the target display.
//!
//! The source layout is scaled uniformly so it fits entirely inside the
//! target, centered horizontally. Vertically a translucent border is
//! centered, an opaque one is pushed to the bottom so the game screen gets
//! the remaining space above it. Fitting produces a new [`FittedLayout`];
//! the source [`Layout`] is never modified.

use crate::error::{SkinError, SkinResult};
use crate::models::{
    ExtendedEdges, Frame, Item, Layout, LayoutAssets, Orientation, Point, Screen, Size,
};

use super::geometry::{ApplyFit, Fit};

/// Display aspect ratio (width / height) per console family, keyed by the
/// last segment of the game type identifier.
const CONSOLE_ASPECT_RATIOS: &[(&str, f64)] = &[
    ("gbc", 10.0 / 9.0),
    ("gba", 3.0 / 2.0),
    ("ds", 2.0 / 3.0),
    ("nes", 16.0 / 15.0),
    ("snes", 8.0 / 7.0),
    ("n64", 8.0 / 7.0),
];

/// Looks up the native aspect ratio of a console family.
#[must_use]
pub fn console_aspect_ratio(console: &str) -> Option<f64> {
    CONSOLE_ASPECT_RATIOS
        .iter()
        .find(|(key, _)| *key == console)
        .map(|(_, ratio)| *ratio)
}

/// A layout expressed in target display pixels.
#[derive(Debug, Clone)]
pub struct FittedLayout {
    /// Orientation of the source layout
    pub orientation: Orientation,
    /// Full target size (the coordinate space of everything below)
    pub mapping_size: Size,
    /// Size of the scaled border image
    pub new_size: Size,
    /// Where the scaled border image sits on the target
    pub border_frame: Frame,
    /// Transform that was applied to all geometry
    pub fit: Fit,
    /// Fitted layout-level edges
    pub extended_edges: ExtendedEdges,
    /// Fitted items
    pub items: Vec<Item>,
    /// The single game screen
    pub screen: Screen,
    /// Border images, unchanged
    pub assets: LayoutAssets,
    /// Copied from the layout
    pub translucent: bool,
}

/// Fits `layout` onto `target` (given in portrait orientation).
///
/// `aspect_ratio` is only consulted when the layout declares no screen and
/// one has to be synthesized.
///
/// # Errors
///
/// `UnsupportedLayout` for multi-screen layouts, and `UnsupportedGameType`
/// when a screen must be synthesized without a known aspect ratio.
pub fn fit_layout(
    layout: &Layout,
    orientation: Orientation,
    target: Size,
    aspect_ratio: Option<f64>,
) -> SkinResult<FittedLayout> {
    if layout.screens.len() > 1 {
        return Err(SkinError::unsupported_layout(format!(
            "{orientation} layout has {} screens, only single-screen layouts are supported",
            layout.screens.len()
        )));
    }
    if layout.mapping_size.width <= 0.0 || layout.mapping_size.height <= 0.0 {
        return Err(SkinError::document(format!(
            "{orientation} layout has an empty mapping size"
        )));
    }

    let target = if orientation.is_portrait() {
        target
    } else {
        target.swapped()
    };

    let old = layout.mapping_size;
    let scale = (target.width / old.width).min(target.height / old.height);
    let new_size = old.scaled(scale);
    let vertical_divisor = if layout.translucent { 2.0 } else { 1.0 };
    let offset = Point::new(
        (target.width - new_size.width) / 2.0,
        (target.height - new_size.height) / vertical_divisor,
    );
    let fit = Fit::new(scale, offset);

    let mut screens: Vec<Screen> = layout.screens.clone();
    if screens.is_empty() {
        if let Some(frame) = layout.game_screen_frame {
            screens.push(Screen {
                output_frame: frame,
            });
        }
    }
    let screen = match screens.first() {
        Some(screen) => screen.apply_fit(&fit),
        None => {
            let aspect = aspect_ratio.ok_or_else(|| {
                SkinError::unsupported_game_type(format!(
                    "{orientation} layout has no screen and the console aspect ratio is unknown"
                ))
            })?;
            synthesize_screen(layout.translucent, target, new_size, aspect)
        }
    };

    Ok(FittedLayout {
        orientation,
        mapping_size: target,
        new_size,
        border_frame: Frame::from_origin(offset, new_size),
        fit,
        extended_edges: layout.extended_edges.apply_fit(&fit),
        items: layout.items.iter().map(|item| item.apply_fit(&fit)).collect(),
        screen,
        assets: layout.assets.clone(),
        translucent: layout.translucent,
    })
}

/// Builds a screen of the console's aspect ratio, as large as possible
/// within the area not taken by an opaque border, centered in that area.
fn synthesize_screen(translucent: bool, target: Size, border: Size, aspect: f64) -> Screen {
    let available = if translucent {
        target.height
    } else {
        target.height - border.height
    };

    let mut size = Size::new(target.width, available);
    if size.width / size.height > aspect {
        size.width = size.height * aspect;
    } else {
        size.height = size.width / aspect;
    }

    Screen {
        output_frame: Frame::new(
            (target.width - size.width) / 2.0,
            (available - size.height) / 2.0,
            size.width,
            size.height,
        ),
    }
}
