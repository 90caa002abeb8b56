//! RetroArch overlay model.
//!
//! An [`Overlay`] is one touch-reactive control set (one orientation of one
//! skin); each [`Descriptor`] is one touch region with its bound command.

use super::geometry::DescBox;
use super::skin::Orientation;

/// Optional descriptor attribute, kept in the order it was attached.
#[derive(Debug, Clone, PartialEq)]
pub enum DescAttr {
    /// Per-descriptor opacity multiplier
    AlphaMod(f64),
    /// Image drawn for the descriptor
    Overlay(String),
    /// Overlay switched to by `overlay_next`
    NextTarget(String),
    /// Region follows the finger (analog sticks)
    Movable(bool),
}

impl DescAttr {
    /// Field name in the config file.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::AlphaMod(_) => "alpha_mod",
            Self::Overlay(_) => "overlay",
            Self::NextTarget(_) => "next_target",
            Self::Movable(_) => "movable",
        }
    }
}

/// One touch region.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    /// Command string, several commands joined by `|`
    pub command: String,
    /// Final box (already normalized when the overlay is)
    pub rect: DescBox,
    /// Extra attributes in insertion order
    pub attrs: Vec<DescAttr>,
}

impl Descriptor {
    /// Creates a descriptor without attributes.
    pub fn new(command: impl Into<String>, rect: DescBox) -> Self {
        Self {
            command: command.into(),
            rect,
            attrs: Vec::new(),
        }
    }

    /// Appends an attribute.
    #[must_use]
    pub fn with(mut self, attr: DescAttr) -> Self {
        self.attrs.push(attr);
        self
    }

    /// Image path, if any.
    #[must_use]
    pub fn overlay(&self) -> Option<&str> {
        self.attrs.iter().find_map(|attr| match attr {
            DescAttr::Overlay(path) => Some(path.as_str()),
            _ => None,
        })
    }

    /// Mutable access to the image path.
    pub fn overlay_mut(&mut self) -> Option<&mut String> {
        self.attrs.iter_mut().find_map(|attr| match attr {
            DescAttr::Overlay(path) => Some(path),
            _ => None,
        })
    }

    /// Overlay targeted by this descriptor, if any.
    #[must_use]
    pub fn next_target(&self) -> Option<&str> {
        self.attrs.iter().find_map(|attr| match attr {
            DescAttr::NextTarget(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Mutable access to the next target name.
    pub fn next_target_mut(&mut self) -> Option<&mut String> {
        self.attrs.iter_mut().find_map(|attr| match attr {
            DescAttr::NextTarget(name) => Some(name),
            _ => None,
        })
    }

    /// Sets the image unless one is already present.
    pub fn fill_overlay(&mut self, asset: &str) {
        if self.overlay().is_none() {
            self.attrs.push(DescAttr::Overlay(asset.to_string()));
        }
    }

    /// Renders `command,x,y,shape,w,h` with 6 decimals for normalized
    /// coordinates and 1 decimal for pixel coordinates.
    #[must_use]
    pub fn primary(&self, normalized: bool) -> String {
        let digits = if normalized { 6 } else { 1 };
        let fixed = |v: f64| to_fixed(v, digits);
        format!(
            "{},{},{},{},{},{}",
            self.command,
            fixed(self.rect.x),
            fixed(self.rect.y),
            self.rect.shape.as_str(),
            fixed(self.rect.w),
            fixed(self.rect.h)
        )
    }
}

/// Formats `value` with `digits` decimals, rounding exact ties away from
/// zero. `format!` rounds ties to even, which would print `60.25` as `60.2`.
#[allow(clippy::cast_possible_truncation)]
fn to_fixed(value: f64, digits: usize) -> String {
    // +0.0 folds negative zero so it prints without a sign
    let value = value + 0.0;
    match tie_numerator(value.abs(), digits) {
        Some(twice) => {
            let scaled = twice.div_ceil(2);
            let unit = 10u128.pow(digits as u32);
            let sign = if value < 0.0 { "-" } else { "" };
            if digits == 0 {
                format!("{sign}{scaled}")
            } else {
                format!("{sign}{}.{:0digits$}", scaled / unit, scaled % unit)
            }
        }
        None => format!("{value:.digits$}"),
    }
}

/// Returns `2 * value * 10^digits` when that product is an odd integer,
/// i.e. when `value` sits exactly halfway between two outputs.
#[allow(clippy::cast_possible_truncation)]
fn tie_numerator(value: f64, digits: usize) -> Option<u128> {
    if !value.is_finite() || value == 0.0 || digits > 20 {
        return None;
    }
    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    };
    // value * 2 * 10^digits = mantissa * 5^digits * 2^(exponent + 1 + digits)
    let shift = exponent + 1 + digits as i32;
    if shift > 0 || mantissa.trailing_zeros() as i32 != -shift {
        return None;
    }
    let product = u128::from(mantissa).checked_mul(5u128.checked_pow(digits as u32)?)?;
    Some(product >> -shift)
}

/// One overlay of the generated config.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// Unique overlay name, target of `next_target`
    pub name: String,
    /// Orientation this overlay was built for (not written to the config)
    pub orientation: Orientation,
    /// Stretch over the whole display
    pub full_screen: bool,
    /// Descriptor coordinates are in `0..=1`
    pub normalized: bool,
    /// Hit-region scale factor
    pub range_mod: f64,
    /// Opacity multiplier
    pub alpha_mod: f64,
    /// Touch regions in emission order
    pub descs: Vec<Descriptor>,
}

impl Overlay {
    /// Creates an empty overlay named after its orientation.
    #[must_use]
    pub fn new(orientation: Orientation, normalized: bool, range_mod: f64, alpha_mod: f64) -> Self {
        Self {
            name: orientation.as_str().to_string(),
            orientation,
            full_screen: false,
            normalized,
            range_mod,
            alpha_mod,
            descs: Vec::new(),
        }
    }
}
