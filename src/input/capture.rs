//! Gesture capture state machine.

use std::time::Instant;

use log::debug;
use tokio::task::JoinHandle;

use super::tool::{Tool, ToolPalette};
use crate::replay::{Point, ReplayScheduler, Stroke, TimedPoint};

/// Current capture mode.
///
/// Tracks whether a gesture is in progress and which points it has produced.
#[derive(Debug, Default)]
pub enum CaptureState {
    /// No gesture in progress - waiting for the first point
    #[default]
    Idle,
    /// A gesture is in progress (finger or button held down)
    Capturing {
        /// Accumulated points in capture order
        points: Vec<TimedPoint>,
    },
}

/// Collects the points of one gesture at a time and hands finished strokes
/// to the [`ReplayScheduler`].
///
/// The host input layer decides whether a gesture ended or was cancelled;
/// this type only reacts to whichever signal arrives.
pub struct GestureCapture {
    state: CaptureState,
    selected_tool: Tool,
    palette: ToolPalette,
    scheduler: ReplayScheduler,
}

impl GestureCapture {
    pub fn new(scheduler: ReplayScheduler, palette: ToolPalette) -> Self {
        Self {
            state: CaptureState::Idle,
            selected_tool: Tool::Red,
            palette,
            scheduler,
        }
    }

    /// Changes the tool used by the next gesture that ends.
    ///
    /// Replays already scheduled keep the tool they were started with.
    pub fn select_tool(&mut self, tool: Tool) {
        if tool != self.selected_tool {
            debug!("Selected tool {}", tool);
        }
        self.selected_tool = tool;
    }

    pub fn selected_tool(&self) -> Tool {
        self.selected_tool
    }

    pub fn palette(&self) -> &ToolPalette {
        &self.palette
    }

    pub fn scheduler(&self) -> &ReplayScheduler {
        &self.scheduler
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.state, CaptureState::Capturing { .. })
    }

    /// Points accumulated by the gesture in progress.
    pub fn point_count(&self) -> usize {
        match &self.state {
            CaptureState::Idle => 0,
            CaptureState::Capturing { points } => points.len(),
        }
    }

    /// Appends a point to the gesture in progress.
    ///
    /// The first point received while idle starts a new gesture.
    pub fn on_point_received(&mut self, point: Point, timestamp: Instant) {
        let timed = TimedPoint::new(point, timestamp);
        match &mut self.state {
            CaptureState::Capturing { points } => points.push(timed),
            CaptureState::Idle => {
                debug!("Gesture started at ({:.1}, {:.1})", point.x, point.y);
                self.state = CaptureState::Capturing {
                    points: vec![timed],
                };
            }
        }
    }

    /// Finishes the gesture and schedules its replay with the selected tool.
    ///
    /// Returns the replay task handle, or `None` when nothing was scheduled
    /// (no gesture in progress, or fewer than two points).
    pub fn on_gesture_ended(&mut self) -> Option<JoinHandle<()>> {
        let CaptureState::Capturing { points } = std::mem::take(&mut self.state) else {
            debug!("Gesture end without a gesture in progress");
            return None;
        };

        let tool = self.palette.spec(self.selected_tool);
        debug!(
            "Gesture ended with {} points using {}",
            points.len(),
            self.selected_tool
        );
        self.scheduler.replay(Stroke::new(points), tool)
    }

    /// Throws the gesture in progress away without replaying it.
    pub fn on_gesture_cancelled(&mut self) {
        if let CaptureState::Capturing { points } = std::mem::take(&mut self.state) {
            debug!("Gesture cancelled, discarding {} points", points.len());
        }
    }
}
