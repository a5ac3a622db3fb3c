use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use log::{debug, info, warn};
use tokio::sync::{mpsc, oneshot};

use super::publisher::CanvasPublisher;
use super::types::{CanvasError, SurfaceConfig};
use crate::draw::{CanvasSnapshot, Color, RasterSurface};
use crate::replay::{Point, SegmentSink};

enum CanvasCommand {
    Initialize {
        config: SurfaceConfig,
        reply: oneshot::Sender<Result<(), CanvasError>>,
    },
    Clear,
    Stroke {
        generation: u64,
        start: Point,
        end: Point,
        color: Color,
    },
    Snapshot(oneshot::Sender<Option<CanvasSnapshot>>),
    Shutdown,
}

/// Cloneable front door to the canvas thread.
///
/// The [`RasterSurface`] lives on a dedicated thread and executes one command
/// at a time, in the order received. Replay tasks, the UI and the layout host
/// all talk to it through handles, so no two draws ever touch the buffer at
/// once and no draw can tear a snapshot.
#[derive(Clone)]
pub struct CanvasHandle {
    commands: mpsc::UnboundedSender<CanvasCommand>,
    publisher: CanvasPublisher,
    /// Last generation number handed out.
    issued: Arc<AtomicU64>,
    /// Generation of the surface the canvas thread actually holds.
    generation: Arc<AtomicU64>,
}

impl CanvasHandle {
    /// Starts the canvas thread. The surface stays uninitialized until
    /// [`CanvasHandle::initialize`] is called.
    pub fn spawn(publisher: CanvasPublisher) -> Result<Self, CanvasError> {
        let (commands, receiver) = mpsc::unbounded_channel();
        let surface_publisher = publisher.clone();

        thread::Builder::new()
            .name("ghostdraw-canvas".into())
            .spawn(move || run_canvas(RasterSurface::new(surface_publisher), receiver))?;

        Ok(Self {
            commands,
            publisher,
            issued: Arc::new(AtomicU64::new(0)),
            generation: Arc::new(AtomicU64::new(0)),
        })
    }

    /// (Re)creates the surface, discarding everything drawn so far.
    ///
    /// Dimensions are validated before anything is queued, and the call
    /// resolves once the canvas thread has created the surface. Returns the
    /// generation number of the new surface; segments scheduled against an
    /// older generation are dropped when they fire. On error the previous
    /// surface and its generation stay current.
    pub async fn initialize(&self, mut config: SurfaceConfig) -> Result<u64, CanvasError> {
        config.validate()?;
        let generation = self.issued.fetch_add(1, Ordering::AcqRel) + 1;
        config.generation = generation;

        let (reply, response) = oneshot::channel();
        self.send(CanvasCommand::Initialize { config, reply })?;
        response.await.map_err(|_| CanvasError::Closed)??;

        self.generation.fetch_max(generation, Ordering::AcqRel);
        Ok(generation)
    }

    /// Refills the canvas with its background color.
    pub fn clear(&self) -> Result<(), CanvasError> {
        self.send(CanvasCommand::Clear)
    }

    /// Strokes one segment on the current surface.
    pub fn stroke_segment(&self, start: Point, end: Point, color: Color) -> Result<(), CanvasError> {
        self.send(CanvasCommand::Stroke {
            generation: self.current_generation(),
            start,
            end,
            color,
        })
    }

    /// Copies the canvas once every previously queued command has run.
    pub async fn snapshot(&self) -> Result<Option<CanvasSnapshot>, CanvasError> {
        let (reply, response) = oneshot::channel();
        self.send(CanvasCommand::Snapshot(reply))?;
        response.await.map_err(|_| CanvasError::Closed)
    }

    /// Asks the canvas thread to exit after the commands already queued.
    pub fn shutdown(&self) {
        if self.send(CanvasCommand::Shutdown).is_err() {
            debug!("Canvas thread already stopped");
        }
    }

    pub fn publisher(&self) -> &CanvasPublisher {
        &self.publisher
    }

    /// Generation of the most recent surface the canvas thread created.
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    fn send(&self, command: CanvasCommand) -> Result<(), CanvasError> {
        self.commands.send(command).map_err(|_| CanvasError::Closed)
    }
}

impl SegmentSink for CanvasHandle {
    fn surface_generation(&self) -> u64 {
        self.current_generation()
    }

    fn draw_segment(&self, generation: u64, start: Point, end: Point, color: Color) {
        let command = CanvasCommand::Stroke {
            generation,
            start,
            end,
            color,
        };
        if self.send(command).is_err() {
            debug!("Canvas thread stopped; dropping replayed segment");
        }
    }
}

fn run_canvas(mut surface: RasterSurface, mut commands: mpsc::UnboundedReceiver<CanvasCommand>) {
    debug!("Canvas thread started");
    while let Some(command) = commands.blocking_recv() {
        match command {
            CanvasCommand::Initialize { config, reply } => {
                let result = surface.initialize(config);
                if let Err(err) = &result {
                    warn!("Failed to create canvas: {}", err);
                }
                let _ = reply.send(result);
            }
            CanvasCommand::Clear => surface.clear(),
            CanvasCommand::Stroke {
                generation,
                start,
                end,
                color,
            } => {
                surface.stroke_segment_for(generation, start, end, color);
            }
            CanvasCommand::Snapshot(reply) => {
                let _ = reply.send(surface.snapshot());
            }
            CanvasCommand::Shutdown => break,
        }
    }
    info!("Canvas thread stopped");
}
