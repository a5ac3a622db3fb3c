//! Captured strokes and the segments derived from them.

use std::time::{Duration, Instant};

use log::warn;

use crate::draw::Color;
use crate::input::ToolSpec;

/// A 2D coordinate in input-gesture space (logical units).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point together with the monotonic clock reading at which it was captured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedPoint {
    pub point: Point,
    pub timestamp: Instant,
}

impl TimedPoint {
    pub fn new(point: Point, timestamp: Instant) -> Self {
        Self { point, timestamp }
    }
}

/// One finished freehand gesture, points in capture order.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<TimedPoint>,
}

/// Straight piece between two consecutive points of a stroke, ready to replay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// 1-based position of the segment's end point within the stroke.
    pub index: usize,
    pub start: Point,
    pub end: Point,
    /// Wait after the previous segment (or after scheduling, for the first one).
    pub delay: Duration,
    pub color: Color,
}

impl Stroke {
    pub fn new(points: Vec<TimedPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[TimedPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Derives the segments to replay with `tool`.
    ///
    /// The first segment waits for the tool's initial delay; every later one
    /// waits for the time that elapsed between its two points while drawing.
    /// Timestamps that run backwards yield a zero delay. Strokes with fewer
    /// than two points have no segments.
    pub fn segment_plan(&self, tool: &ToolSpec) -> Vec<Segment> {
        self.points
            .windows(2)
            .enumerate()
            .map(|(offset, pair)| {
                let index = offset + 1;
                let (prev, cur) = (pair[0], pair[1]);
                let delay = if index == 1 {
                    tool.initial_delay
                } else {
                    cur.timestamp
                        .checked_duration_since(prev.timestamp)
                        .unwrap_or_else(|| {
                            warn!(
                                "Point {} was captured {:?} before its predecessor; replaying without delay",
                                index,
                                prev.timestamp.duration_since(cur.timestamp)
                            );
                            Duration::ZERO
                        })
                };
                Segment {
                    index,
                    start: prev.point,
                    end: cur.point,
                    delay,
                    color: tool.color,
                }
            })
            .collect()
    }
}
