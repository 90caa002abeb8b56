//! RetroArch overlay config generation.
//!
//! The overlay tree is converted to a small [`ConfigValue`] tree and then
//! flattened into `key = value` lines:
//!
//! - a sequence under `prefix` emits `<prefix>s = <len>` followed by each
//!   element under `<prefix><index>`
//! - a record emits each field under `<prefix><suffix>` in insertion order;
//!   a field's suffix is usually `_<name>`, the primary field has none
//! - strings are quoted, numbers and booleans are not
//!
//! Lines are keyed by generated indices, so emission order is significant.

use crate::models::{DescAttr, Descriptor, Overlay};

/// Flattenable value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    /// Written verbatim
    Str(String),
    /// Written with `Display` for `f64`
    Num(f64),
    /// `true` / `false`
    Bool(bool),
    /// Count under the prefix, then indexed elements
    Seq(Vec<ConfigValue>),
    /// Fields as `(key suffix, value)` in emission order
    Record(Vec<(String, ConfigValue)>),
}

/// Builder for [`ConfigValue::Record`].
#[derive(Debug, Default)]
pub struct RecordBuilder {
    fields: Vec<(String, ConfigValue)>,
}

impl RecordBuilder {
    /// Starts an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Field written as `<prefix>_<name>`.
    #[must_use]
    pub fn field(mut self, name: &str, value: ConfigValue) -> Self {
        self.fields.push((format!("_{name}"), value));
        self
    }

    /// Field written as `<prefix>` itself.
    #[must_use]
    pub fn primary(mut self, value: ConfigValue) -> Self {
        self.fields.push((String::new(), value));
        self
    }

    /// Finishes the record.
    #[must_use]
    pub fn build(self) -> ConfigValue {
        ConfigValue::Record(self.fields)
    }
}

/// Conversion into the flattenable tree.
pub trait ToConfigValue {
    fn to_config_value(&self) -> ConfigValue;
}

impl ToConfigValue for DescAttr {
    fn to_config_value(&self) -> ConfigValue {
        match self {
            Self::AlphaMod(v) => ConfigValue::Num(*v),
            Self::Overlay(s) | Self::NextTarget(s) => ConfigValue::Str(s.clone()),
            Self::Movable(b) => ConfigValue::Bool(*b),
        }
    }
}

/// Descriptor fields; the primary string precision depends on whether the
/// owning overlay is normalized.
fn descriptor_value(desc: &Descriptor, normalized: bool) -> ConfigValue {
    desc.attrs
        .iter()
        .fold(
            RecordBuilder::new().primary(ConfigValue::Str(desc.primary(normalized))),
            |record, attr| record.field(attr.key(), attr.to_config_value()),
        )
        .build()
}

impl ToConfigValue for Overlay {
    fn to_config_value(&self) -> ConfigValue {
        let descs = self
            .descs
            .iter()
            .map(|desc| descriptor_value(desc, self.normalized))
            .collect();
        RecordBuilder::new()
            .field("name", ConfigValue::Str(self.name.clone()))
            .field("full_screen", ConfigValue::Bool(self.full_screen))
            .field("normalized", ConfigValue::Bool(self.normalized))
            .field("range_mod", ConfigValue::Num(self.range_mod))
            .field("alpha_mod", ConfigValue::Num(self.alpha_mod))
            // the descriptor list is keyed `_desc`, its length `_descs`
            .field("desc", ConfigValue::Seq(descs))
            .build()
    }
}

/// Appends the lines for `value` under `prefix`.
pub fn flatten(prefix: &str, value: &ConfigValue, lines: &mut Vec<String>) {
    match value {
        ConfigValue::Seq(items) => {
            lines.push(format!("{prefix}s = {}", items.len()));
            for (index, item) in items.iter().enumerate() {
                flatten(&format!("{prefix}{index}"), item, lines);
            }
        }
        ConfigValue::Record(fields) => {
            for (suffix, field) in fields {
                flatten(&format!("{prefix}{suffix}"), field, lines);
            }
        }
        ConfigValue::Str(s) => lines.push(format!("{prefix} = \"{s}\"")),
        ConfigValue::Num(n) => lines.push(format!("{prefix} = {n}")),
        ConfigValue::Bool(b) => lines.push(format!("{prefix} = {b}")),
    }
}

/// Renders the complete overlay config (lines joined by `\n`).
#[must_use]
pub fn generate_config(overlays: &[Overlay]) -> String {
    let value = ConfigValue::Seq(overlays.iter().map(ToConfigValue::to_config_value).collect());
    let mut lines = Vec::new();
    flatten("overlay", &value, &mut lines);
    lines.join("\n")
}
