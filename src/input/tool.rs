//! Drawing tool selection.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::ToolsConfig;
use crate::draw::{BLUE, Color, GREEN, LIGHT_GRAY, RED};

/// Drawing tool selection.
///
/// The selected tool decides the ink color of a stroke and how long its replay
/// waits before the first segment appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    /// Red ink, shortest lead-in
    Red,
    /// Blue ink
    Blue,
    /// Green ink, longest lead-in
    Green,
    /// Paints with the background color
    Eraser,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::Red, Tool::Blue, Tool::Green, Tool::Eraser];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Red => "red",
            Tool::Blue => "blue",
            Tool::Green => "green",
            Tool::Eraser => "eraser",
        }
    }

    /// Built-in ink color.
    pub fn default_color(self) -> Color {
        match self {
            Tool::Red => RED,
            Tool::Blue => BLUE,
            Tool::Green => GREEN,
            Tool::Eraser => LIGHT_GRAY,
        }
    }

    /// Built-in lead-in before the first segment of a replay.
    pub fn default_delay(self) -> Duration {
        match self {
            Tool::Red => Duration::from_secs(1),
            Tool::Blue => Duration::from_secs(3),
            Tool::Green => Duration::from_secs(5),
            Tool::Eraser => Duration::from_secs(2),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tool '{s}'"))
    }
}

/// Resolved appearance and timing of a tool, captured by value when a gesture ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolSpec {
    pub color: Color,
    pub initial_delay: Duration,
}

/// Lookup table from [`Tool`] to its configured [`ToolSpec`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolPalette {
    specs: [ToolSpec; 4],
}

impl Default for ToolPalette {
    fn default() -> Self {
        Self {
            specs: Tool::ALL.map(|tool| ToolSpec {
                color: tool.default_color(),
                initial_delay: tool.default_delay(),
            }),
        }
    }
}

impl ToolPalette {
    /// Builds the palette from config, falling back to built-ins for unset fields.
    pub fn from_config(config: &ToolsConfig) -> Self {
        Self {
            specs: Tool::ALL.map(|tool| {
                let entry = config.get(tool);
                ToolSpec {
                    color: entry
                        .color
                        .as_ref()
                        .map(|spec| spec.to_color())
                        .unwrap_or_else(|| tool.default_color()),
                    initial_delay: entry
                        .delay_secs
                        .map(|secs| delay_from_secs(tool, secs))
                        .unwrap_or_else(|| tool.default_delay()),
                }
            }),
        }
    }

    pub fn spec(&self, tool: Tool) -> ToolSpec {
        self.specs[Self::slot(tool)]
    }

    fn slot(tool: Tool) -> usize {
        match tool {
            Tool::Red => 0,
            Tool::Blue => 1,
            Tool::Green => 2,
            Tool::Eraser => 3,
        }
    }
}

/// Negative delays clamp to zero; NaN and infinite ones keep the built-in delay.
fn delay_from_secs(tool: Tool, secs: f64) -> Duration {
    match Duration::try_from_secs_f64(secs) {
        Ok(delay) => delay,
        Err(_) if secs < 0.0 => {
            warn!("Negative {} delay {:.2}s, using 0", tool, secs);
            Duration::ZERO
        }
        Err(_) => {
            warn!(
                "Invalid {} delay {}, using {:?}",
                tool,
                secs,
                tool.default_delay()
            );
            tool.default_delay()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColorSpec, ToolConfig};

    #[test]
    fn default_palette_matches_built_in_tools() {
        let palette = ToolPalette::default();
        assert_eq!(palette.spec(Tool::Red).color, RED);
        assert_eq!(palette.spec(Tool::Red).initial_delay, Duration::from_secs(1));
        assert_eq!(palette.spec(Tool::Blue).initial_delay, Duration::from_secs(3));
        assert_eq!(palette.spec(Tool::Green).initial_delay, Duration::from_secs(5));
        assert_eq!(palette.spec(Tool::Eraser).color, LIGHT_GRAY);
        assert_eq!(palette.spec(Tool::Eraser).initial_delay, Duration::from_secs(2));
    }

    #[test]
    fn from_config_overrides_only_set_fields() {
        let mut config = ToolsConfig::default();
        config.blue = ToolConfig {
            color: Some(ColorSpec::Rgb([0, 128, 255])),
            delay_secs: Some(0.25),
        };
        config.green.delay_secs = Some(0.0);

        let palette = ToolPalette::from_config(&config);
        assert_eq!(palette.spec(Tool::Blue).color, Color::from_rgb8(0, 128, 255));
        assert_eq!(palette.spec(Tool::Blue).initial_delay, Duration::from_millis(250));
        assert_eq!(palette.spec(Tool::Green).color, GREEN);
        assert_eq!(palette.spec(Tool::Green).initial_delay, Duration::ZERO);
        assert_eq!(palette.spec(Tool::Red), ToolPalette::default().spec(Tool::Red));
    }

    #[test]
    fn unusable_delays_do_not_panic() {
        let mut config = ToolsConfig::default();
        config.red.delay_secs = Some(-2.0);
        config.blue.delay_secs = Some(f64::NAN);
        config.green.delay_secs = Some(f64::INFINITY);

        let palette = ToolPalette::from_config(&config);
        assert_eq!(palette.spec(Tool::Red).initial_delay, Duration::ZERO);
        assert_eq!(palette.spec(Tool::Blue).initial_delay, Duration::from_secs(3));
        assert_eq!(palette.spec(Tool::Green).initial_delay, Duration::from_secs(5));
    }

    #[test]
    fn parses_tool_names_case_insensitively() {
        assert_eq!("Eraser".parse::<Tool>().unwrap(), Tool::Eraser);
        assert_eq!(" green ".parse::<Tool>().unwrap(), Tool::Green);
        assert!("marker".parse::<Tool>().is_err());
    }
}
