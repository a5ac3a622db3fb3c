//! The ghost drawing canvas as seen by a UI host.
//!
//! [`GhostCanvas`] wires the pieces together: pointer events feed the
//! [`GestureCapture`], finished gestures are replayed by the
//! [`ReplayScheduler`] onto the canvas thread, and every change is published
//! as a [`CanvasSnapshot`].

use std::sync::Arc;
use std::time::Instant;

use log::info;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::canvas::{CanvasError, CanvasHandle, CanvasPublisher, SurfaceConfig};
use crate::config::Config;
use crate::draw::{CanvasSnapshot, Color};
use crate::input::{GestureCapture, Tool, ToolPalette};
use crate::replay::{Point, ReplayScheduler};

pub struct GhostCanvas {
    canvas: CanvasHandle,
    capture: GestureCapture,
    background: Color,
    line_width: f64,
}

impl GhostCanvas {
    /// Starts the canvas thread and prepares capture with the configured tools.
    ///
    /// The surface does not exist until [`GhostCanvas::resize`] is called.
    pub fn new(runtime_handle: &tokio::runtime::Handle, config: &Config) -> Result<Self, CanvasError> {
        let canvas = CanvasHandle::spawn(CanvasPublisher::new())?;
        let scheduler = ReplayScheduler::new(runtime_handle, Arc::new(canvas.clone()));
        let capture = GestureCapture::new(scheduler, ToolPalette::from_config(&config.tools));

        Ok(Self {
            canvas,
            capture,
            background: config.canvas.background.to_color(),
            line_width: config.canvas.line_width,
        })
    }

    /// Recreates the surface for a new container size.
    ///
    /// Everything drawn so far is lost, and segments of replays still in
    /// flight are dropped when they fire. Resolves once the new surface
    /// exists; on error the previous surface stays in use.
    pub async fn resize(
        &self,
        container_width: f64,
        container_height: f64,
        display_scale: f64,
    ) -> Result<(), CanvasError> {
        let config = SurfaceConfig::for_container(
            container_width,
            container_height,
            display_scale,
            self.background,
            self.line_width,
        );
        let generation = self.canvas.initialize(config).await?;
        info!(
            "Canvas container {:.0}x{:.0} @{:.2}x (generation {})",
            container_width, container_height, display_scale, generation
        );
        Ok(())
    }

    pub fn pointer_moved(&mut self, point: Point, timestamp: Instant) {
        self.capture.on_point_received(point, timestamp);
    }

    pub fn gesture_ended(&mut self) -> Option<JoinHandle<()>> {
        self.capture.on_gesture_ended()
    }

    pub fn gesture_cancelled(&mut self) {
        self.capture.on_gesture_cancelled();
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.capture.select_tool(tool);
    }

    pub fn selected_tool(&self) -> Tool {
        self.capture.selected_tool()
    }

    /// Wipes the canvas back to its background color.
    pub fn clear(&self) -> Result<(), CanvasError> {
        self.canvas.clear()
    }

    /// Attaches an observer to the published snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Option<CanvasSnapshot>> {
        self.canvas.publisher().subscribe()
    }

    /// Last published snapshot.
    pub fn latest(&self) -> Option<CanvasSnapshot> {
        self.canvas.publisher().latest()
    }

    /// Snapshot taken after every command queued so far has run.
    pub async fn snapshot(&self) -> Result<Option<CanvasSnapshot>, CanvasError> {
        self.canvas.snapshot().await
    }

    /// Replays that have not drawn their last segment yet.
    pub fn replays_in_flight(&self) -> usize {
        self.capture.scheduler().in_flight()
    }

    /// Cloneable handle to the canvas thread.
    pub fn canvas(&self) -> &CanvasHandle {
        &self.canvas
    }

    pub fn capture(&self) -> &GestureCapture {
        &self.capture
    }

    /// Stops the canvas thread once queued commands have run.
    pub fn shutdown(&self) {
        self.canvas.shutdown();
    }
}
