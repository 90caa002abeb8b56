//! Links the portrait and landscape overlays with a rotate control.

use crate::config::ButtonPlacement;
use crate::models::{DescAttr, Descriptor, Overlay};

/// Command RetroArch uses to switch to another overlay.
pub const OVERLAY_NEXT: &str = "overlay_next";

/// Control switching to `target`, placed at the button's box for
/// `overlay`'s orientation (final coordinates, never normalized again).
#[must_use]
pub fn overlay_next(overlay: &Overlay, placement: &ButtonPlacement, target: &str) -> Descriptor {
    let button = placement.for_orientation(overlay.orientation);
    Descriptor::new(OVERLAY_NEXT, button.to_desc_box())
        .with(DescAttr::NextTarget(target.to_string()))
}

/// Appends a rotate control to each overlay pointing at the other one.
///
/// Does nothing unless there are exactly two overlays.
pub fn link_orientations(overlays: &mut [Overlay], placement: &ButtonPlacement) {
    let [first, second] = overlays else {
        return;
    };
    let to_second = overlay_next(first, placement, &second.name);
    let to_first = overlay_next(second, placement, &first.name);
    first.descs.push(to_second);
    second.descs.push(to_first);
}
