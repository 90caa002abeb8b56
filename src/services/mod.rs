//! Conversion services.
//!
//! Each stage of the pipeline lives in its own module; [`transcoder`]
//! strings them together for one skin and [`output`] writes the result.

pub mod assets;
pub mod decomposer;
pub mod geometry;
pub mod linker;
pub mod normalizer;
pub mod output;
pub mod switcher;
pub mod transcoder;

// Re-export commonly used types and functions
pub use assets::{AssetJob, AssetResolver, CommandRasterizer, Rasterizer};
pub use normalizer::{fit_layout, FittedLayout};
pub use output::{write_output, OutputOptions, WrittenOutput};
pub use switcher::merge_skins;
pub use transcoder::{transcode, TranscodedSkin};
