//! Delta skin document model (`info.json`).
//!
//! Only the parts of the document needed for conversion are modelled. The
//! representation tree is kept as ordered JSON so that orientation order and
//! unknown orientation keys survive until the transcoder inspects them.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::geometry::{ExtendedEdges, Frame, Size};

/// Device class → display type → orientation → layout.
pub type Representations =
    HashMap<String, HashMap<String, serde_json::Map<String, serde_json::Value>>>;

/// Root of a skin's `info.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinDocument {
    /// Display name of the skin
    #[serde(default)]
    pub name: Option<String>,
    /// Reverse-DNS skin identifier
    #[serde(default)]
    pub identifier: Option<String>,
    /// Console family, e.g. `com.rileytestut.delta.game.gba`
    pub game_type_identifier: String,
    /// Layouts keyed by device class and display type
    pub representations: Representations,
}

impl SkinDocument {
    /// Last dot-separated segment of the game type (e.g. `gba`).
    #[must_use]
    pub fn console_key(&self) -> &str {
        self.game_type_identifier
            .rsplit('.')
            .next()
            .unwrap_or(&self.game_type_identifier)
    }
}

/// Orientations the converter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Tall display
    Portrait,
    /// Wide display
    Landscape,
}

impl Orientation {
    /// Parses a representation key; anything else is not an orientation.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "portrait" => Some(Self::Portrait),
            "landscape" => Some(Self::Landscape),
            _ => None,
        }
    }

    /// Representation key and default overlay name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }

    /// Single-letter prefix used for shader parameters.
    #[must_use]
    pub const fn prefix(self) -> char {
        match self {
            Self::Portrait => 'p',
            Self::Landscape => 'l',
        }
    }

    /// True for portrait.
    #[must_use]
    pub const fn is_portrait(self) -> bool {
        matches!(self, Self::Portrait)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One orientation's layout.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    /// Logical coordinate space of `items` and `screens`
    pub mapping_size: Size,
    /// Controls
    #[serde(default)]
    pub items: Vec<Item>,
    /// Default edge extension for every item
    #[serde(default)]
    pub extended_edges: ExtendedEdges,
    /// Border images
    #[serde(default)]
    pub assets: LayoutAssets,
    /// Game screens; at most one is supported
    #[serde(default)]
    pub screens: Vec<Screen>,
    /// Legacy single-screen placement
    #[serde(default)]
    pub game_screen_frame: Option<Frame>,
    /// Border does not reserve exclusive screen space
    #[serde(default)]
    pub translucent: bool,
}

/// Border image references.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LayoutAssets {
    /// Image for large devices
    #[serde(default)]
    pub large: Option<String>,
    /// Vector image usable at any size
    #[serde(default)]
    pub resizable: Option<String>,
    /// Image for small devices
    #[serde(default)]
    pub small: Option<String>,
    /// Image for medium devices
    #[serde(default)]
    pub medium: Option<String>,
}

impl LayoutAssets {
    /// Preferred border asset: `large`, falling back to `resizable`.
    #[must_use]
    pub fn border(&self) -> Option<&str> {
        self.large.as_deref().or(self.resizable.as_deref())
    }
}

/// Region of the display showing game video.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    /// Placement in mapping coordinates
    pub output_frame: Frame,
}

/// One control.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Bound inputs; items without any are skipped
    #[serde(default)]
    pub inputs: Option<Inputs>,
    /// Visual frame in mapping coordinates
    pub frame: Frame,
    /// Present for analog sticks
    #[serde(default)]
    pub thumbstick: Option<Thumbstick>,
    /// Overrides the layout edges side by side
    #[serde(default)]
    pub extended_edges: Option<ExtendedEdges>,
    /// Physical stick bound to a thumbstick item; inferred when absent
    #[serde(default)]
    pub stick: Option<StickSide>,
}

/// Input bindings of an item.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Inputs {
    /// Buttons pressed together
    Buttons(Vec<String>),
    /// Direction → input name (d-pads and thumbsticks)
    Directions(BTreeMap<String, String>),
}

impl Inputs {
    /// Input bound to `direction`, if this is a directional mapping.
    #[must_use]
    pub fn direction(&self, direction: &str) -> Option<&str> {
        match self {
            Self::Directions(map) => map.get(direction).map(String::as_str),
            Self::Buttons(_) => None,
        }
    }
}

/// Analog stick image and travel size.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Thumbstick {
    /// Image file
    pub name: String,
    /// Image width in mapping coordinates
    pub width: f64,
    /// Image height in mapping coordinates
    pub height: f64,
}

/// Physical analog stick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StickSide {
    /// Left analog stick
    Left,
    /// Right analog stick
    Right,
}

/// What an [`Item`] turns into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlKind<'a> {
    /// Button group
    Buttons(&'a [String]),
    /// Analog stick
    Thumbstick(&'a Thumbstick),
    /// Eight-way d-pad
    DirectionalPad(&'a BTreeMap<String, String>),
    /// Nothing to emit
    Unknown,
}

impl Item {
    /// Classifies the item: a list of inputs is a button group, otherwise a
    /// thumbstick if one is declared, otherwise a directional pad.
    #[must_use]
    pub fn kind(&self) -> ControlKind<'_> {
        match (&self.inputs, &self.thumbstick) {
            (Some(Inputs::Buttons(buttons)), _) => ControlKind::Buttons(buttons),
            (_, Some(thumbstick)) => ControlKind::Thumbstick(thumbstick),
            (Some(Inputs::Directions(map)), None) => ControlKind::DirectionalPad(map),
            (None, None) => ControlKind::Unknown,
        }
    }
}
