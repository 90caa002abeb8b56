//! Turns layout items into overlay descriptors.
//!
//! - Button groups become one rectangle bound to all of their commands.
//! - Thumbsticks become one movable radial region sized by the stick's
//!   travel, not by its frame.
//! - Directional pads are cut into a 3x3 grid: corners press two
//!   directions, edges one, the center is a dead zone.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use crate::error::{Diagnostics, UnknownField};
use crate::models::{
    ControlKind, DescAttr, DescBox, Descriptor, ExtendedEdges, Frame, Item, Shape, Size,
    StickSide, Thumbstick,
};

use super::assets::AssetResolver;
use super::geometry::convert_box;
use super::normalizer::FittedLayout;

/// Delta input name → RetroArch command.
static INPUT_COMMANDS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut table = HashMap::from([
        ("quickSave", "save_state"),
        ("quickLoad", "load_state"),
        ("fastForward", "hold_fast_forward"),
        ("toggleFastForward", "toggle_fast_forward"),
        ("menu", "menu_toggle"),
        // n64
        ("z", "l2"),
        ("cUp", "r_y_minus"),
        ("cDown", "r_y_plus"),
        ("cLeft", "r_x_minus"),
        ("cRight", "r_x_plus"),
        ("analogStickUp", "l_y_minus"),
        ("analogStickDown", "l_y_plus"),
        ("analogStickLeft", "l_x_minus"),
        ("analogStickRight", "l_x_plus"),
    ]);
    for same in [
        "a", "b", "x", "y", "l", "r", "select", "start", "up", "down", "left", "right",
    ] {
        table.insert(same, same);
    }
    table
});

/// Input whose presence on a stick's `up` marks it as the right stick.
const RIGHT_STICK_UP: &str = "cUp";

const DIRECTIONS: [&str; 4] = ["up", "down", "left", "right"];

/// D-pad cells, row by row; the empty center cell is skipped.
const DPAD_GRID: [[&[&str]; 3]; 3] = [
    [&["up", "left"], &["up"], &["up", "right"]],
    [&["left"], &[], &["right"]],
    [&["down", "left"], &["down"], &["down", "right"]],
];

/// Looks up the command for a Delta input name.
#[must_use]
pub fn input_command(input: &str) -> Option<&'static str> {
    INPUT_COMMANDS.get(input).copied()
}

/// Builds descriptors for the items of one fitted layout.
pub struct Decomposer<'a> {
    layout: &'a FittedLayout,
    normalized: bool,
    assets: &'a mut AssetResolver,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> Decomposer<'a> {
    /// Descriptors are emitted in normalized coordinates when `normalized` is set.
    pub fn new(
        layout: &'a FittedLayout,
        normalized: bool,
        assets: &'a mut AssetResolver,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            layout,
            normalized,
            assets,
            diagnostics,
        }
    }

    /// Descriptor drawing the border image behind everything else.
    pub fn border(&mut self, asset: &str) -> Descriptor {
        let overlay = self.assets.resolve(asset, self.layout.new_size);
        let rect = convert_box(&self.layout.border_frame, &ExtendedEdges::NONE);
        self.descriptor("null", rect)
            .with(DescAttr::AlphaMod(1.0))
            .with(DescAttr::Overlay(overlay))
    }

    /// Descriptors for one item, in emission order.
    pub fn decompose(&mut self, index: usize, item: &Item) -> Vec<Descriptor> {
        let context = format!("{} item {index}", self.layout.orientation);
        let edges = self.layout.extended_edges.merged(item.extended_edges.as_ref());

        match item.kind() {
            ControlKind::Buttons(inputs) => {
                let command = self.command(inputs.iter().map(String::as_str), &context);
                vec![self.descriptor(command, convert_box(&item.frame, &edges))]
            }
            ControlKind::Thumbstick(thumbstick) => {
                vec![self.thumbstick(item, thumbstick)]
            }
            ControlKind::DirectionalPad(inputs) => {
                for key in inputs.keys() {
                    if !DIRECTIONS.contains(&key.as_str()) {
                        self.diagnostics.unknown(UnknownField::Direction, key, &context);
                    }
                }
                self.directional_pad(&item.frame, &edges, inputs, &context)
            }
            ControlKind::Unknown => {
                self.diagnostics
                    .unknown(UnknownField::Item, "item without inputs", context);
                Vec::new()
            }
        }
    }

    fn thumbstick(&mut self, item: &Item, thumbstick: &Thumbstick) -> Descriptor {
        let overlay = self.assets.resolve(
            &thumbstick.name,
            Size::new(thumbstick.width, thumbstick.height),
        );
        let command = match stick_side(item) {
            StickSide::Left => "analog_left",
            StickSide::Right => "analog_right",
        };
        // Sticks are centered in their frame; extended edges do not apply.
        let center = convert_box(&item.frame, &ExtendedEdges::NONE);
        let rect = DescBox::new(
            center.x,
            center.y,
            thumbstick.width / 2.0,
            thumbstick.height / 2.0,
        )
        .with_shape(Shape::Radial);

        self.descriptor(command, rect)
            .with(DescAttr::Overlay(overlay))
            .with(DescAttr::Movable(true))
    }

    fn directional_pad(
        &mut self,
        frame: &Frame,
        edges: &ExtendedEdges,
        inputs: &BTreeMap<String, String>,
        context: &str,
    ) -> Vec<Descriptor> {
        let mut xs: [f64; 4] = std::array::from_fn(|i| frame.x + frame.width / 3.0 * i as f64);
        let mut ys: [f64; 4] = std::array::from_fn(|i| frame.y + frame.height / 3.0 * i as f64);
        // Only the outer boundary grows
        xs[0] -= edges.left();
        xs[3] += edges.right();
        ys[0] -= edges.top();
        ys[3] += edges.bottom();

        let mut descs = Vec::new();
        for (row, cells) in DPAD_GRID.iter().enumerate() {
            for (col, directions) in cells.iter().enumerate() {
                let bound: Vec<&str> = directions
                    .iter()
                    .filter_map(|direction| inputs.get(*direction).map(String::as_str))
                    .collect();
                if bound.is_empty() {
                    continue;
                }
                let cell = Frame::new(xs[col], ys[row], xs[col + 1] - xs[col], ys[row + 1] - ys[row]);
                let command = self.command(bound.into_iter(), context);
                descs.push(self.descriptor(command, convert_box(&cell, &ExtendedEdges::NONE)));
            }
        }
        descs
    }

    /// Maps input names to commands joined by `|`, dropping unknown names.
    fn command<'i>(&mut self, inputs: impl Iterator<Item = &'i str>, context: &str) -> String {
        let mut commands = Vec::new();
        for input in inputs {
            match input_command(input) {
                Some(command) => commands.push(command),
                None => self.diagnostics.unknown(UnknownField::Input, input, context),
            }
        }
        commands.join("|")
    }

    /// Rectangle-or-radial descriptor in layout space, normalized if configured.
    fn descriptor(&self, command: impl Into<String>, rect: DescBox) -> Descriptor {
        let rect = if self.normalized {
            rect.normalized(self.layout.mapping_size)
        } else {
            rect
        };
        Descriptor::new(command, rect)
    }
}

/// Explicit `stick` field, else the right stick when `up` is the C-stick.
fn stick_side(item: &Item) -> StickSide {
    item.stick.unwrap_or_else(|| {
        let up = item.inputs.as_ref().and_then(|inputs| inputs.direction("up"));
        if up == Some(RIGHT_STICK_UP) {
            StickSide::Right
        } else {
            StickSide::Left
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Layout, Orientation};
    use crate::services::assets::AssetJob;
    use crate::services::normalizer::fit_layout;

    /// Fits a 100x100 layout onto a 100x100 target (identity transform).
    fn fitted(items: serde_json::Value, edges: serde_json::Value) -> FittedLayout {
        let layout: Layout = serde_json::from_value(serde_json::json!({
            "mappingSize": { "width": 100, "height": 100 },
            "items": items,
            "extendedEdges": edges,
            "assets": { "large": "border.png" },
            "screens": [{ "outputFrame": { "x": 0, "y": 0, "width": 100, "height": 50 } }]
        }))
        .unwrap();
        fit_layout(&layout, Orientation::Portrait, Size::new(100.0, 100.0), None).unwrap()
    }

    fn decompose_all(
        layout: &FittedLayout,
        normalized: bool,
    ) -> (Vec<Descriptor>, Diagnostics, AssetResolver) {
        let mut assets = AssetResolver::new("/skin", false);
        let mut diagnostics = Diagnostics::new();
        let mut descs = Vec::new();
        {
            let mut decomposer = Decomposer::new(layout, normalized, &mut assets, &mut diagnostics);
            for (i, item) in layout.items.iter().enumerate() {
                descs.extend(decomposer.decompose(i, item));
            }
        }
        (descs, diagnostics, assets)
    }

    #[test]
    fn test_button_group_joins_commands_and_applies_edges() {
        let layout = fitted(
            serde_json::json!([{
                "inputs": ["a", "b"],
                "frame": { "x": 10, "y": 10, "width": 20, "height": 20 },
                "extendedEdges": { "left": 4 }
            }]),
            serde_json::json!({ "top": 2, "left": 10 }),
        );
        let (descs, diagnostics, _) = decompose_all(&layout, false);

        assert_eq!(descs.len(), 1);
        assert!(diagnostics.is_empty());
        let desc = &descs[0];
        assert_eq!(desc.command, "a|b");
        // width 20 + 4 left → half 12, center 10 + 12 - 4 = 18
        // height 20 + 2 top → half 11, center 10 + 11 - 2 = 19
        assert_eq!(desc.rect, DescBox::new(18.0, 19.0, 12.0, 11.0));
    }

    #[test]
    fn test_unknown_inputs_are_dropped_with_warning() {
        let layout = fitted(
            serde_json::json!([{
                "inputs": ["menu", "turbo", "quickSave"],
                "frame": { "x": 0, "y": 0, "width": 10, "height": 10 }
            }]),
            serde_json::json!({}),
        );
        let (descs, diagnostics, _) = decompose_all(&layout, true);
        assert_eq!(descs[0].command, "menu_toggle|save_state");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.warnings()[0].name, "turbo");
        assert_eq!(diagnostics.warnings()[0].field, UnknownField::Input);
    }

    #[test]
    fn test_dpad_emits_eight_cells_without_center() {
        let layout = fitted(
            serde_json::json!([{
                "inputs": { "up": "up", "down": "down", "left": "left", "right": "right" },
                "frame": { "x": 0, "y": 0, "width": 30, "height": 30 }
            }]),
            serde_json::json!({}),
        );
        let (descs, _, _) = decompose_all(&layout, false);
        let commands: Vec<&str> = descs.iter().map(|d| d.command.as_str()).collect();
        assert_eq!(
            commands,
            [
                "up|left", "up", "up|right", "left", "right", "down|left", "down", "down|right"
            ]
        );
        // No descriptor covers the center cell
        assert!(descs.iter().all(|d| d.rect != DescBox::new(15.0, 15.0, 5.0, 5.0)));
        assert_eq!(descs[0].rect, DescBox::new(5.0, 5.0, 5.0, 5.0));
        assert_eq!(descs[7].rect, DescBox::new(25.0, 25.0, 5.0, 5.0));
    }

    #[test]
    fn test_dpad_edges_grow_outer_cells_only() {
        let layout = fitted(
            serde_json::json!([{
                "inputs": { "up": "up", "down": "down", "left": "left", "right": "right" },
                "frame": { "x": 30, "y": 30, "width": 30, "height": 30 },
                "extendedEdges": { "left": 6, "top": 4 }
            }]),
            serde_json::json!({}),
        );
        let (descs, _, _) = decompose_all(&layout, false);
        // top-left corner: x 24..40, y 26..40
        assert_eq!(descs[0].rect, DescBox::new(32.0, 33.0, 8.0, 7.0));
        // "up" middle column keeps interior lines: x 40..50, y 26..40
        assert_eq!(descs[1].rect, DescBox::new(45.0, 33.0, 5.0, 7.0));
        // "down|right" corner is unaffected
        assert_eq!(descs[7].rect, DescBox::new(55.0, 55.0, 5.0, 5.0));
    }

    #[test]
    fn test_dpad_omits_absent_directions() {
        let layout = fitted(
            serde_json::json!([{
                "inputs": { "up": "up", "left": "left", "jump": "a" },
                "frame": { "x": 0, "y": 0, "width": 30, "height": 30 }
            }]),
            serde_json::json!({}),
        );
        let (descs, diagnostics, _) = decompose_all(&layout, false);
        let commands: Vec<&str> = descs.iter().map(|d| d.command.as_str()).collect();
        assert_eq!(commands, ["up|left", "up", "up", "left", "left"]);
        assert!(descs
            .iter()
            .all(|d| !d.command.contains("down") && !d.command.contains("right")));
        assert_eq!(diagnostics.warnings()[0].field, UnknownField::Direction);
        assert_eq!(diagnostics.warnings()[0].name, "jump");
    }

    #[test]
    fn test_thumbstick_uses_stick_size_and_is_movable() {
        let layout = fitted(
            serde_json::json!([{
                "inputs": { "up": "analogStickUp", "down": "analogStickDown" },
                "thumbstick": { "name": "stick.pdf", "width": 20, "height": 16 },
                "frame": { "x": 10, "y": 10, "width": 40, "height": 40 },
                "extendedEdges": { "left": 30 }
            }]),
            serde_json::json!({}),
        );
        let (descs, _, assets) = decompose_all(&layout, false);
        let desc = &descs[0];
        assert_eq!(desc.command, "analog_left");
        assert_eq!(
            desc.rect,
            DescBox::new(30.0, 30.0, 10.0, 8.0).with_shape(Shape::Radial)
        );
        assert_eq!(
            desc.attrs,
            vec![
                DescAttr::Overlay("stick.png".to_string()),
                DescAttr::Movable(true)
            ]
        );
        assert!(matches!(&assets.jobs()[0], AssetJob::Rasterize { name, .. } if name == "stick.png"));
    }

    #[test]
    fn test_c_stick_maps_to_right_stick() {
        let layout = fitted(
            serde_json::json!([
                {
                    "inputs": { "up": "cUp", "down": "cDown" },
                    "thumbstick": { "name": "c.png", "width": 10, "height": 10 },
                    "frame": { "x": 0, "y": 0, "width": 10, "height": 10 }
                },
                {
                    "inputs": { "up": "analogStickUp" },
                    "thumbstick": { "name": "s.png", "width": 10, "height": 10 },
                    "frame": { "x": 0, "y": 0, "width": 10, "height": 10 },
                    "stick": "right"
                }
            ]),
            serde_json::json!({}),
        );
        let (descs, _, _) = decompose_all(&layout, false);
        assert_eq!(descs[0].command, "analog_right");
        assert_eq!(descs[1].command, "analog_right");
    }

    #[test]
    fn test_normalized_boxes_use_mapping_size() {
        let layout = fitted(
            serde_json::json!([{
                "inputs": ["start"],
                "frame": { "x": 40, "y": 40, "width": 20, "height": 20 }
            }]),
            serde_json::json!({}),
        );
        let (descs, _, _) = decompose_all(&layout, true);
        assert_eq!(descs[0].rect, DescBox::new(0.5, 0.5, 0.1, 0.1));
    }

    #[test]
    fn test_border_descriptor() {
        let layout = fitted(serde_json::json!([]), serde_json::json!({}));
        let mut assets = AssetResolver::new("/skin", false);
        let mut diagnostics = Diagnostics::new();
        let border = Decomposer::new(&layout, true, &mut assets, &mut diagnostics).border("border.png");
        assert_eq!(border.command, "null");
        assert_eq!(border.rect, DescBox::new(0.5, 0.5, 0.5, 0.5));
        assert_eq!(
            border.attrs,
            vec![
                DescAttr::AlphaMod(1.0),
                DescAttr::Overlay("border.png".to_string())
            ]
        );
    }

    #[test]
    fn test_item_without_inputs_is_skipped() {
        let layout = fitted(
            serde_json::json!([{ "frame": { "x": 0, "y": 0, "width": 10, "height": 10 } }]),
            serde_json::json!({}),
        );
        let (descs, diagnostics, _) = decompose_all(&layout, false);
        assert!(descs.is_empty());
        assert_eq!(diagnostics.warnings()[0].field, UnknownField::Item);
    }

    #[test]
    fn test_input_table() {
        assert_eq!(input_command("cLeft"), Some("r_x_minus"));
        assert_eq!(input_command("select"), Some("select"));
        assert_eq!(input_command("turbo"), None);
    }
}
