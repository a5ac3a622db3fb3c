use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use super::stroke::{Point, Stroke};
use crate::draw::Color;
use crate::input::ToolSpec;

/// Destination of replayed segment draws.
///
/// Implemented by [`crate::canvas::CanvasHandle`]; tests substitute recorders.
pub trait SegmentSink: Send + Sync {
    /// Generation of the surface draws would currently land on.
    fn surface_generation(&self) -> u64;

    /// Draws one segment, provided the surface still belongs to `generation`.
    fn draw_segment(&self, generation: u64, start: Point, end: Point, color: Color);
}

/// Turns finished strokes into delayed, sequential segment draws.
///
/// Each [`ReplayScheduler::replay`] call spawns one task that walks the
/// stroke's segments in order, sleeping for each segment's delay before
/// drawing it. Replays of different strokes run independently, so their
/// segments interleave on the canvas.
#[derive(Clone)]
pub struct ReplayScheduler {
    sink: Arc<dyn SegmentSink>,
    runtime: tokio::runtime::Handle,
    in_flight: Arc<AtomicUsize>,
}

/// Decrements the in-flight counter when a replay task ends, however it ends.
struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl ReplayScheduler {
    /// Creates a scheduler that spawns replay tasks on `runtime_handle`.
    pub fn new(runtime_handle: &tokio::runtime::Handle, sink: Arc<dyn SegmentSink>) -> Self {
        Self {
            sink,
            runtime: runtime_handle.clone(),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Schedules the replay of `stroke` in the colors and timing of `tool`.
    ///
    /// Returns `None` without scheduling anything when the stroke has fewer
    /// than two points. The returned handle resolves once the last segment has
    /// been handed to the sink.
    pub fn replay(&self, stroke: Stroke, tool: ToolSpec) -> Option<JoinHandle<()>> {
        if stroke.len() < 2 {
            debug!("Skipping replay of {}-point stroke", stroke.len());
            return None;
        }

        let segments = stroke.segment_plan(&tool);
        let generation = self.sink.surface_generation();
        let sink = Arc::clone(&self.sink);

        self.in_flight.fetch_add(1, Ordering::AcqRel);
        let guard = InFlightGuard(Arc::clone(&self.in_flight));

        debug!(
            "Scheduling {} segments (lead-in {:?}, generation {})",
            segments.len(),
            tool.initial_delay,
            generation
        );

        Some(self.runtime.spawn(async move {
            let _guard = guard;
            for segment in segments {
                sleep(segment.delay).await;
                sink.draw_segment(generation, segment.start, segment.end, segment.color);
            }
        }))
    }

    /// Number of replays that still have segments waiting to be drawn.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }
}
