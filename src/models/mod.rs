//! Data models for skin documents, geometry and generated overlays.
//!
//! Models carry no I/O and no conversion logic; see `services` for that.

pub mod geometry;
pub mod overlay;
pub mod skin;

// Re-export all model types
pub use geometry::{DescBox, ExtendedEdges, Frame, Point, Shape, Size};
pub use overlay::{DescAttr, Descriptor, Overlay};
pub use skin::{
    ControlKind, Inputs, Item, Layout, LayoutAssets, Orientation, Representations, Screen,
    SkinDocument, StickSide, Thumbstick,
};
