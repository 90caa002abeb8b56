//! Box and scale math shared by the layout fitter and control decomposer.

use crate::models::{DescBox, ExtendedEdges, Frame, Item, Point, Screen, Thumbstick};

/// Converts a frame plus edge extension into center + half-extent form.
///
/// The hit region grows by each side's extension while the visible frame
/// keeps its position: `w = (width + left + right) / 2` and
/// `x = frame.x + w - left` (vertically alike).
#[must_use]
pub fn convert_box(frame: &Frame, edges: &ExtendedEdges) -> DescBox {
    let w = (frame.width + edges.left() + edges.right()) / 2.0;
    let h = (frame.height + edges.top() + edges.bottom()) / 2.0;
    DescBox::new(frame.x + w - edges.left(), frame.y + h - edges.top(), w, h)
}

/// Uniform scale followed by a translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    /// Factor applied to all lengths
    pub scale: f64,
    /// Added after scaling
    pub offset: Point,
}

impl Fit {
    /// Transform that leaves everything unchanged.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset: Point { x: 0.0, y: 0.0 },
    };

    /// Creates a fit.
    #[must_use]
    pub const fn new(scale: f64, offset: Point) -> Self {
        Self { scale, offset }
    }

    /// Scales a length (width, height or edge extension).
    #[must_use]
    pub fn length(&self, value: f64) -> f64 {
        value * self.scale
    }

    /// Maps a horizontal position.
    #[must_use]
    pub fn x(&self, value: f64) -> f64 {
        value * self.scale + self.offset.x
    }

    /// Maps a vertical position.
    #[must_use]
    pub fn y(&self, value: f64) -> f64 {
        value * self.scale + self.offset.y
    }
}

/// Values that can be moved into fitted display space.
///
/// Lengths are scaled, positions are scaled and offset.
pub trait ApplyFit {
    #[must_use]
    fn apply_fit(&self, fit: &Fit) -> Self;
}

impl ApplyFit for Frame {
    fn apply_fit(&self, fit: &Fit) -> Self {
        Self::new(
            fit.x(self.x),
            fit.y(self.y),
            fit.length(self.width),
            fit.length(self.height),
        )
    }
}

impl ApplyFit for ExtendedEdges {
    fn apply_fit(&self, fit: &Fit) -> Self {
        let scale = |side: Option<f64>| side.map(|v| fit.length(v));
        Self {
            top: scale(self.top),
            bottom: scale(self.bottom),
            left: scale(self.left),
            right: scale(self.right),
        }
    }
}

impl ApplyFit for Thumbstick {
    fn apply_fit(&self, fit: &Fit) -> Self {
        Self {
            name: self.name.clone(),
            width: fit.length(self.width),
            height: fit.length(self.height),
        }
    }
}

impl ApplyFit for Screen {
    fn apply_fit(&self, fit: &Fit) -> Self {
        Self {
            output_frame: self.output_frame.apply_fit(fit),
        }
    }
}

impl ApplyFit for Item {
    fn apply_fit(&self, fit: &Fit) -> Self {
        Self {
            inputs: self.inputs.clone(),
            frame: self.frame.apply_fit(fit),
            thumbstick: self.thumbstick.apply_fit(fit),
            extended_edges: self.extended_edges.apply_fit(fit),
            stick: self.stick,
        }
    }
}

// Missing values stay missing.
impl<T: ApplyFit> ApplyFit for Option<T> {
    fn apply_fit(&self, fit: &Fit) -> Self {
        self.as_ref().map(|value| value.apply_fit(fit))
    }
}
