//! Delayed replay of captured strokes.
//!
//! A finished gesture becomes a [`Stroke`]; the [`ReplayScheduler`] splits it
//! into [`Segment`]s and draws them one by one, pausing before each so the
//! canvas re-traces the original pacing after a tool-specific lead-in.

mod scheduler;
mod stroke;

pub use scheduler::{ReplayScheduler, SegmentSink};
pub use stroke::{Point, Segment, Stroke, TimedPoint};
