//! Color name lookups shared by configuration and scripts.

use crate::draw::{Color, color::*};

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "white", "black"
/// - "light-gray" (also "lightgray", "light_gray", "gray", "grey")
///
/// # Returns
/// - `Some(Color)` if the name matches a predefined color
/// - `None` if the name is not recognized
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.trim().to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "light-gray" | "lightgray" | "light_gray" | "light-grey" | "gray" | "grey" => {
            Some(LIGHT_GRAY)
        }
        _ => None,
    }
}

/// Maps a Color value to its human-readable name.
///
/// Uses approximate matching (threshold-based). Returns "custom" for colors
/// that are not in the predefined palette.
pub fn color_to_name(color: &Color) -> &'static str {
    let near = |a: f64, b: f64| (a - b).abs() < 0.05;
    [
        (RED, "red"),
        (GREEN, "green"),
        (BLUE, "blue"),
        (WHITE, "white"),
        (BLACK, "black"),
        (LIGHT_GRAY, "light-gray"),
    ]
    .into_iter()
    .find(|(known, _)| near(known.r, color.r) && near(known.g, color.g) && near(known.b, color.b))
    .map(|(_, name)| name)
    .unwrap_or("custom")
}
