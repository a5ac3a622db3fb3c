//! Scripted input for driving the canvas without a windowing system.
//!
//! A script is a TOML file of gestures (point triples with time offsets)
//! and clear actions. [`play`] feeds it through the same input boundary a
//! pointer device would use. [`FrameRecorder`] optionally keeps every
//! snapshot observed along the way.

mod frames;
mod player;
mod types;

pub use frames::{FrameRecorder, frame_filename};
pub use player::{PlaybackSummary, play};
pub use types::{GestureScript, ScriptClear, ScriptError, ScriptGesture};
