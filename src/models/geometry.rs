//! Plain geometry value types shared by skins and overlays.
//!
//! All coordinates use a top-left origin. [`Frame`] is the corner + size form
//! used by skin documents, [`DescBox`] the center + half-extent form used by
//! overlay descriptors.

use serde::{Deserialize, Serialize};

/// Width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent
    #[serde(alias = "w")]
    pub width: f64,
    /// Vertical extent
    #[serde(alias = "h")]
    pub height: f64,
}

impl Size {
    /// Creates a size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the size with width and height exchanged.
    #[must_use]
    pub const fn swapped(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Multiplies both dimensions by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

/// 2D point or offset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rectangle in corner + size form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Frame {
    /// Creates a frame from its corner and size.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a frame from its top-left corner and size.
    #[must_use]
    pub const fn from_origin(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Width and height of the frame.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Per-side hit-region growth beyond a control's visual frame.
///
/// Absent sides stay `None` so that item-level edges can override
/// layout-level edges one side at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtendedEdges {
    /// Growth above the frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    /// Growth below the frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    /// Growth left of the frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    /// Growth right of the frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
}

impl ExtendedEdges {
    /// No extension on any side.
    pub const NONE: Self = Self {
        top: None,
        bottom: None,
        left: None,
        right: None,
    };

    /// Same extension on every side.
    #[must_use]
    pub const fn uniform(amount: f64) -> Self {
        Self {
            top: Some(amount),
            bottom: Some(amount),
            left: Some(amount),
            right: Some(amount),
        }
    }

    /// Shallow merge: each side set on `overrides` replaces the one on `self`.
    #[must_use]
    pub fn merged(&self, overrides: Option<&Self>) -> Self {
        let Some(o) = overrides else {
            return *self;
        };
        Self {
            top: o.top.or(self.top),
            bottom: o.bottom.or(self.bottom),
            left: o.left.or(self.left),
            right: o.right.or(self.right),
        }
    }

    /// Top growth, 0 when unset.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.top.unwrap_or(0.0)
    }

    /// Bottom growth, 0 when unset.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.bottom.unwrap_or(0.0)
    }

    /// Left growth, 0 when unset.
    #[must_use]
    pub fn left(&self) -> f64 {
        self.left.unwrap_or(0.0)
    }

    /// Right growth, 0 when unset.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.right.unwrap_or(0.0)
    }
}

/// Hit-test shape of an overlay descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Axis-aligned rectangle
    #[default]
    Rect,
    /// Ellipse inscribed in the box
    Radial,
}

impl Shape {
    /// Name used in descriptor strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Radial => "radial",
        }
    }
}

/// Descriptor box in center + half-extent form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescBox {
    /// Center x
    pub x: f64,
    /// Center y
    pub y: f64,
    /// Half width
    pub w: f64,
    /// Half height
    pub h: f64,
    /// Hit-test shape
    #[serde(default)]
    pub shape: Shape,
}

impl DescBox {
    /// Creates a rectangular box.
    #[must_use]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w,
            h,
            shape: Shape::Rect,
        }
    }

    /// Replaces the hit-test shape.
    #[must_use]
    pub const fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    /// Divides horizontal values by `size.width` and vertical values by
    /// `size.height`, mapping the box into the unit square.
    #[must_use]
    pub fn normalized(self, size: Size) -> Self {
        Self {
            x: self.x / size.width,
            y: self.y / size.height,
            w: self.w / size.width,
            h: self.h / size.height,
            shape: self.shape,
        }
    }
}
