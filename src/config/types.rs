//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::input::Tool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canvas settings.
///
/// Controls the size of the raster surface and how strokes look on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Logical container width (valid range: 16 - 8192)
    #[serde(default = "default_canvas_width")]
    pub width: f64,

    /// Logical container height (valid range: 16 - 8192)
    #[serde(default = "default_canvas_height")]
    pub height: f64,

    /// Device pixels per logical unit (valid range: 0.5 - 8.0)
    #[serde(default = "default_display_scale")]
    pub display_scale: f64,

    /// Stroke width in device pixels (valid range: 1.0 - 100.0)
    #[serde(default = "default_line_width")]
    pub line_width: f64,

    /// Background fill - either a named color or an RGB array like `[255, 255, 255]`
    #[serde(default = "default_background")]
    pub background: ColorSpec,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            display_scale: default_display_scale(),
            line_width: default_line_width(),
            background: default_background(),
        }
    }
}

/// Overrides for a single tool. Unset fields keep the tool's built-in value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ToolConfig {
    /// Ink color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorSpec>,

    /// Seconds before the first segment of a replay appears (valid range: 0 - 60)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_secs: Option<f64>,
}

/// Per-tool overrides.
///
/// Built-in values: red 1 s, blue 3 s, green 5 s, eraser 2 s (background color).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ToolsConfig {
    #[serde(default)]
    pub red: ToolConfig,
    #[serde(default)]
    pub blue: ToolConfig,
    #[serde(default)]
    pub green: ToolConfig,
    #[serde(default)]
    pub eraser: ToolConfig,
}

impl ToolsConfig {
    pub fn get(&self, tool: Tool) -> &ToolConfig {
        match tool {
            Tool::Red => &self.red,
            Tool::Blue => &self.blue,
            Tool::Green => &self.green,
            Tool::Eraser => &self.eraser,
        }
    }

    pub fn get_mut(&mut self, tool: Tool) -> &mut ToolConfig {
        match tool {
            Tool::Red => &mut self.red,
            Tool::Blue => &mut self.blue,
            Tool::Green => &mut self.green,
            Tool::Eraser => &mut self.eraser,
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_canvas_width() -> f64 {
    400.0
}

fn default_canvas_height() -> f64 {
    400.0
}

fn default_display_scale() -> f64 {
    2.0
}

fn default_line_width() -> f64 {
    12.0
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("light-gray".to_string())
}
