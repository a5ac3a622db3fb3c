//! Configuration enum types.

use crate::draw::{Color, color::LIGHT_GRAY};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - either a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// background = "light-gray"
///
/// # Custom RGB color (0-255 per component)
/// color = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, light-gray, gray, white, black
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Named colors are mapped using `util::name_to_color()`. Unknown names
    /// fall back to light gray with a warning. RGB arrays are converted from
    /// 0-255 range to 0.0-1.0 range with full opacity.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => crate::util::name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using light-gray", name);
                LIGHT_GRAY
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }
}
