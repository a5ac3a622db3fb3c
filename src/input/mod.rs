//! Input handling and tool selection.
//!
//! This module turns the host's pointer stream into strokes. It tracks the
//! selected tool, accumulates the points of the gesture in progress and, when
//! the gesture ends, hands the stroke to the replay scheduler.

pub mod capture;
pub mod tool;

// Re-export commonly used types at module level
pub use capture::{CaptureState, GestureCapture};
pub use tool::{Tool, ToolPalette, ToolSpec};
