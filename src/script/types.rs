//! Gesture script data types.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::input::Tool;

/// A recorded drawing session to play back through the input boundary.
///
/// # Example TOML
/// ```toml
/// [[gesture]]
/// tool = "red"
/// start = 0.0
/// points = [[10.0, 10.0, 0.0], [40.0, 60.0, 0.2], [90.0, 20.0, 0.5]]
///
/// [[gesture]]
/// tool = "green"
/// switch_to = "blue"
/// points = [[20.0, 80.0, 0.0], [80.0, 80.0, 0.3]]
///
/// [[clear]]
/// at = 4.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GestureScript {
    /// Gestures, played one after another
    #[serde(default, rename = "gesture")]
    pub gestures: Vec<ScriptGesture>,

    /// Clear actions, timed from the start of playback
    #[serde(default, rename = "clear")]
    pub clears: Vec<ScriptClear>,
}

/// One scripted gesture.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptGesture {
    /// Tool selected before the first point
    #[serde(default = "default_tool")]
    pub tool: Tool,

    /// Tool selected after the last point, right before the gesture ends
    #[serde(default)]
    pub switch_to: Option<Tool>,

    /// Seconds to wait after the previous gesture before starting
    #[serde(default)]
    pub start: f64,

    /// Deliver a cancel signal instead of ending the gesture
    #[serde(default)]
    pub cancel: bool,

    /// `[x, y, t]` triples: logical coordinates and seconds since gesture start
    #[serde(default)]
    pub points: Vec<[f64; 3]>,
}

/// A scripted press of the clear button.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScriptClear {
    /// Seconds after playback starts
    pub at: f64,
}

fn default_tool() -> Tool {
    Tool::Red
}

/// Errors raised while loading a gesture script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse script: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Gesture {gesture}: {message}")]
    InvalidGesture { gesture: usize, message: String },

    #[error("Clear {index}: time {at} must be a non-negative number of seconds")]
    InvalidClear { index: usize, at: f64 },
}

impl GestureScript {
    /// Reads and validates a script file.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let source = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    /// Parses and validates script text.
    pub fn parse(source: &str) -> Result<Self, ScriptError> {
        let script: GestureScript = toml::from_str(source)?;
        script.validate()?;
        Ok(script)
    }

    fn validate(&self) -> Result<(), ScriptError> {
        for (gesture, entry) in self.gestures.iter().enumerate() {
            let invalid = |message: String| ScriptError::InvalidGesture { gesture, message };

            if !entry.start.is_finite() || entry.start < 0.0 {
                return Err(invalid(format!(
                    "start {} must be a non-negative number of seconds",
                    entry.start
                )));
            }
            if let Some(point) = entry.points.iter().find(|p| p.iter().any(|v| !v.is_finite())) {
                return Err(invalid(format!("point {point:?} is not finite")));
            }
            if let Some(point) = entry.points.iter().find(|p| p[2] < 0.0) {
                return Err(invalid(format!(
                    "point {point:?} has a negative time offset"
                )));
            }
        }

        for (index, clear) in self.clears.iter().enumerate() {
            if !clear.at.is_finite() || clear.at < 0.0 {
                return Err(ScriptError::InvalidClear {
                    index,
                    at: clear.at,
                });
            }
        }
        Ok(())
    }

    /// Number of gestures that will be ended (not cancelled).
    pub fn completed_gestures(&self) -> usize {
        self.gestures.iter().filter(|g| !g.cancel).count()
    }
}
