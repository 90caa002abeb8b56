//! Shader parameter injection.
//!
//! The shader template declares per-orientation parameters such as
//! `p_screen_size = vec2(1.0, 1.0);`. Assignments to `p_*` / `l_*`
//! identifiers that the converter knows are rewritten up to the `;`;
//! everything else in the template is left untouched.

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::models::{Frame, Orientation, Size};

/// `<p|l>_<name> =` followed by the expression up to `;`.
static PARAM_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(([pl]_\w+)\s*=\s*)[^;]+").expect("parameter pattern is valid")
});

/// Geometry of one orientation's game screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenGeometry {
    /// Selects the `p_` or `l_` prefix
    pub orientation: Orientation,
    /// Full display size the border was fitted into
    pub border_size: Size,
    /// Game screen placement on that display
    pub output_frame: Frame,
}

/// Computes `<o>_border_size`, `<o>_screen_size` and `<o>_screen_offset`
/// for each screen.
#[must_use]
pub fn shader_params(screens: &[ScreenGeometry]) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    for screen in screens {
        let o = screen.orientation.prefix();
        let frame = screen.output_frame;
        params.insert(
            format!("{o}_border_size"),
            vec2(screen.border_size.width, screen.border_size.height),
        );
        params.insert(format!("{o}_screen_size"), vec2(frame.width, frame.height));
        params.insert(format!("{o}_screen_offset"), vec2(frame.x, frame.y));
    }
    params
}

fn vec2(a: f64, b: f64) -> String {
    format!("vec2({a}, {b})")
}

/// Rewrites known parameter assignments in `template`.
#[must_use]
pub fn inject_shader_params(template: &str, params: &BTreeMap<String, String>) -> String {
    PARAM_ASSIGNMENT
        .replace_all(template, |caps: &Captures<'_>| match params.get(&caps[2]) {
            Some(value) => format!("{}{value}", &caps[1]),
            None => caps[0].to_string(),
        })
        .into_owned()
}
