//! Error taxonomy for skin conversion.
//!
//! Fatal conditions are reported through [`SkinError`] and abort the run
//! before any output is written. Recoverable oddities in a skin document
//! (unknown orientation keys, input names or directions) are collected as
//! [`UnknownFieldWarning`]s in a [`Diagnostics`] report instead.

use std::fmt;
use tracing::warn;

/// Result alias used by the conversion pipeline.
pub type SkinResult<T> = Result<T, SkinError>;

/// Fatal conversion errors.
#[derive(thiserror::Error, Debug)]
pub enum SkinError {
    /// Skin document missing, unparsable, or missing required structure.
    #[error("document error: {0}")]
    Document(String),

    /// Console family is recognized but cannot be converted.
    #[error("unsupported game type: {0}")]
    UnsupportedGameType(String),

    /// Layout shape cannot be converted (e.g. more than one screen).
    #[error("unsupported layout: {0}")]
    UnsupportedLayout(String),

    /// Skins merged for switching produced different overlay counts.
    #[error("skin mismatch: {0}")]
    SkinMismatch(String),

    /// Asset could not be copied or rasterized.
    #[error("asset error: {0}")]
    Asset(String),

    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SkinError {
    /// Creates a [`SkinError::Document`].
    pub fn document(msg: impl Into<String>) -> Self {
        Self::Document(msg.into())
    }

    /// Creates a [`SkinError::UnsupportedGameType`].
    pub fn unsupported_game_type(msg: impl Into<String>) -> Self {
        Self::UnsupportedGameType(msg.into())
    }

    /// Creates a [`SkinError::UnsupportedLayout`].
    pub fn unsupported_layout(msg: impl Into<String>) -> Self {
        Self::UnsupportedLayout(msg.into())
    }

    /// Creates a [`SkinError::SkinMismatch`].
    pub fn skin_mismatch(msg: impl Into<String>) -> Self {
        Self::SkinMismatch(msg.into())
    }

    /// Creates a [`SkinError::Asset`].
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }
}

/// Which part of the document an unknown field was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownField {
    /// Orientation key other than `portrait` / `landscape`
    Orientation,
    /// Input name missing from the command table
    Input,
    /// Directional-pad key other than `up` / `down` / `left` / `right`
    Direction,
    /// Item that is neither a button group, a d-pad nor a thumbstick
    Item,
}

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Orientation => "orientation",
            Self::Input => "input",
            Self::Direction => "direction",
            Self::Item => "item",
        };
        f.write_str(label)
    }
}

/// Non-fatal warning: an element was skipped and conversion continued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldWarning {
    /// Category of the unrecognized element
    pub field: UnknownField,
    /// The offending key or name
    pub name: String,
    /// Where it was found (e.g. "portrait item 3")
    pub context: String,
}

impl fmt::Display for UnknownFieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped unknown {} '{}' ({})", self.field, self.name, self.context)
    }
}

/// Accumulated non-fatal warnings for one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    warnings: Vec<UnknownFieldWarning>,
}

impl Diagnostics {
    /// Creates an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            warnings: Vec::new(),
        }
    }

    /// Records and logs a warning.
    pub fn unknown(
        &mut self,
        field: UnknownField,
        name: impl Into<String>,
        context: impl Into<String>,
    ) {
        let warning = UnknownFieldWarning {
            field,
            name: name.into(),
            context: context.into(),
        };
        warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Appends all warnings from another report.
    pub fn extend(&mut self, other: Self) {
        self.warnings.extend(other.warnings);
    }

    /// Warnings in the order they were recorded.
    #[must_use]
    pub fn warnings(&self) -> &[UnknownFieldWarning] {
        &self.warnings
    }

    /// True when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Number of recorded warnings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.warnings.len()
    }
}
