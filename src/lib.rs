//! Library exports for the ghostdraw delayed-replay canvas.
//!
//! Pointer gestures are captured as timestamped strokes, then replayed onto a
//! raster canvas segment by segment after a per-tool lead-in delay. Hosts
//! drive everything through [`GhostCanvas`] and observe published
//! [`draw::CanvasSnapshot`]s.

pub mod canvas;
pub mod config;
pub mod draw;
pub mod ghost;
pub mod input;
pub mod replay;
pub mod script;
pub mod util;

pub use config::Config;
pub use ghost::GhostCanvas;
