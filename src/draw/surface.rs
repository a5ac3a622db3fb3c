//! Persistent Cairo raster the ghost strokes are composited onto.

use log::{debug, info, warn};

use super::color::Color;
use super::snapshot::CanvasSnapshot;
use super::transform::GeometryTransform;
use crate::canvas::{CanvasError, CanvasPublisher, SurfaceConfig};
use crate::replay::Point;

/// The fixed-resolution canvas.
///
/// Starts uninitialized; every drawing operation is silently dropped until
/// [`RasterSurface::initialize`] succeeds. Every successful mutation publishes
/// a fresh snapshot through the attached [`CanvasPublisher`].
///
/// Cairo surfaces are not `Send`, so a `RasterSurface` lives on the canvas
/// thread for its whole life (see [`crate::canvas::CanvasHandle`]).
pub struct RasterSurface {
    state: Option<SurfaceState>,
    publisher: CanvasPublisher,
}

struct SurfaceState {
    surface: cairo::ImageSurface,
    transform: GeometryTransform,
    background: Color,
    line_width: f64,
    generation: u64,
}

impl SurfaceState {
    fn fill_background(&self) -> Result<(), cairo::Error> {
        let ctx = cairo::Context::new(&self.surface)?;
        ctx.set_operator(cairo::Operator::Source);
        self.background.apply_to(&ctx);
        ctx.paint()
    }

    fn stroke_line(&self, start: Point, end: Point, color: Color) -> Result<(), cairo::Error> {
        let from = self.transform.to_raster_space(start);
        let to = self.transform.to_raster_space(end);

        let ctx = cairo::Context::new(&self.surface)?;
        color.apply_to(&ctx);
        ctx.set_line_width(self.line_width);
        ctx.set_line_cap(cairo::LineCap::Round);
        ctx.move_to(from.x, from.y);
        ctx.line_to(to.x, to.y);
        ctx.stroke()
    }
}

impl RasterSurface {
    /// Creates an uninitialized surface that publishes through `publisher`.
    pub fn new(publisher: CanvasPublisher) -> Self {
        Self {
            state: None,
            publisher,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Generation of the current surface, if one exists.
    pub fn generation(&self) -> Option<u64> {
        self.state.as_ref().map(|state| state.generation)
    }

    /// Pixel dimensions of the current surface.
    pub fn dimensions(&self) -> Option<(i32, i32)> {
        self.state
            .as_ref()
            .map(|state| (state.surface.width(), state.surface.height()))
    }

    /// Allocates a new buffer filled with the background color.
    ///
    /// Any previous surface and its content are discarded. On error the
    /// previous surface is kept as it was.
    pub fn initialize(&mut self, config: SurfaceConfig) -> Result<(), CanvasError> {
        config.validate()?;

        let surface = cairo::ImageSurface::create(
            cairo::Format::ARgb32,
            config.pixel_width,
            config.pixel_height,
        )?;
        let state = SurfaceState {
            surface,
            transform: GeometryTransform::new(config.display_scale, config.pixel_height as f64),
            background: config.background,
            line_width: config.line_width,
            generation: config.generation,
        };
        state.fill_background()?;

        info!(
            "Created {}x{} canvas (scale {:.2}, line width {:.1}, generation {})",
            config.pixel_width,
            config.pixel_height,
            config.display_scale,
            config.line_width,
            config.generation
        );
        self.state = Some(state);
        self.publish();
        Ok(())
    }

    /// Refills the whole buffer with the background color.
    pub fn clear(&mut self) {
        let Some(state) = self.state.as_ref() else {
            debug!("Ignoring clear before the canvas exists");
            return;
        };
        if let Err(err) = state.fill_background() {
            warn!("Failed to clear canvas: {}", err);
            return;
        }
        self.publish();
    }

    /// Strokes one segment given in input-gesture coordinates.
    ///
    /// Returns `false` when the draw was dropped.
    pub fn stroke_segment(&mut self, start: Point, end: Point, color: Color) -> bool {
        let Some(state) = self.state.as_ref() else {
            debug!("Dropping segment drawn before the canvas exists");
            return false;
        };
        if let Err(err) = state.stroke_line(start, end, color) {
            warn!("Failed to stroke segment: {}", err);
            return false;
        }
        self.publish();
        true
    }

    /// Like [`RasterSurface::stroke_segment`], but only if the surface still
    /// belongs to `generation`.
    pub fn stroke_segment_for(
        &mut self,
        generation: u64,
        start: Point,
        end: Point,
        color: Color,
    ) -> bool {
        match self.generation() {
            Some(current) if current == generation => self.stroke_segment(start, end, color),
            Some(current) => {
                debug!(
                    "Dropping stale segment from generation {} (canvas is at {})",
                    generation, current
                );
                false
            }
            None => {
                debug!("Dropping segment drawn before the canvas exists");
                false
            }
        }
    }

    /// Copies the current pixels.
    pub fn snapshot(&mut self) -> Option<CanvasSnapshot> {
        let state = self.state.as_mut()?;
        match CanvasSnapshot::capture(&mut state.surface) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!("Failed to snapshot canvas: {}", err);
                None
            }
        }
    }

    fn publish(&mut self) {
        if let Some(snapshot) = self.snapshot() {
            self.publisher.publish(snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLUE, LIGHT_GRAY, RED};

    const GRAY: [u8; 4] = [170, 170, 170, 255];

    fn config(width: i32, height: i32, scale: f64) -> SurfaceConfig {
        SurfaceConfig {
            pixel_width: width,
            pixel_height: height,
            display_scale: scale,
            background: LIGHT_GRAY,
            line_width: 12.0,
            generation: 1,
        }
    }

    fn ready_surface() -> (RasterSurface, CanvasPublisher) {
        let publisher = CanvasPublisher::new();
        let mut surface = RasterSurface::new(publisher.clone());
        surface.initialize(config(100, 100, 1.0)).unwrap();
        (surface, publisher)
    }

    #[test]
    fn operations_before_initialize_are_noops() {
        let publisher = CanvasPublisher::new();
        let mut surface = RasterSurface::new(publisher.clone());
        assert!(!surface.is_initialized());

        surface.clear();
        assert!(!surface.stroke_segment(Point::new(0.0, 0.0), Point::new(5.0, 5.0), RED));
        assert!(surface.snapshot().is_none());
        assert_eq!(publisher.publish_count(), 0);
    }

    #[test]
    fn initialize_fills_background_and_publishes() {
        let (mut surface, publisher) = ready_surface();
        assert!(surface.is_initialized());
        assert_eq!(surface.dimensions(), Some((100, 100)));
        assert!(surface.snapshot().unwrap().is_uniform(GRAY));
        assert_eq!(publisher.publish_count(), 1);
        assert!(publisher.latest().unwrap().is_uniform(GRAY));
    }

    #[test]
    fn initialize_rejects_invalid_dimensions_and_keeps_old_surface() {
        let (mut surface, _publisher) = ready_surface();
        let err = surface.initialize(config(0, 50, 1.0)).unwrap_err();
        assert!(matches!(err, CanvasError::InvalidDimensions { .. }));
        assert_eq!(surface.dimensions(), Some((100, 100)));

        let err = surface.initialize(config(10, 10, 0.0)).unwrap_err();
        assert!(matches!(err, CanvasError::InvalidScale(_)));
    }

    #[test]
    fn stroke_segment_draws_in_flipped_raster_space() {
        let (mut surface, publisher) = ready_surface();

        // Input y = 80 measured from the bottom lands on raster row 20.
        assert!(surface.stroke_segment(Point::new(10.0, 80.0), Point::new(90.0, 80.0), RED));

        let snapshot = surface.snapshot().unwrap();
        assert_eq!(snapshot.pixel(50, 20), Some([255, 0, 0, 255]));
        assert_eq!(snapshot.pixel(50, 80), Some(GRAY));
        assert_eq!(publisher.publish_count(), 2);
        assert_eq!(publisher.latest().unwrap(), snapshot);
    }

    #[test]
    fn stroke_segment_applies_display_scale() {
        let publisher = CanvasPublisher::new();
        let mut surface = RasterSurface::new(publisher);
        surface.initialize(config(100, 100, 2.0)).unwrap();

        assert!(surface.stroke_segment(Point::new(5.0, 45.0), Point::new(45.0, 45.0), BLUE));

        let snapshot = surface.snapshot().unwrap();
        assert_eq!(snapshot.pixel(50, 10), Some([0, 0, 255, 255]));
        assert_eq!(snapshot.pixel(50, 90), Some(GRAY));
    }

    #[test]
    fn clear_restores_background_after_any_history() {
        let (mut surface, publisher) = ready_surface();
        surface.stroke_segment(Point::new(0.0, 0.0), Point::new(100.0, 100.0), RED);
        surface.stroke_segment(Point::new(0.0, 100.0), Point::new(100.0, 0.0), BLUE);

        surface.clear();

        assert!(surface.snapshot().unwrap().is_uniform(GRAY));
        assert_eq!(publisher.publish_count(), 4);
    }

    #[test]
    fn snapshot_is_independent_of_later_draws() {
        let (mut surface, _publisher) = ready_surface();
        let before = surface.snapshot().unwrap();

        surface.stroke_segment(Point::new(10.0, 50.0), Point::new(90.0, 50.0), RED);
        surface.stroke_segment(Point::new(50.0, 10.0), Point::new(50.0, 90.0), BLUE);

        assert!(before.is_uniform(GRAY));
        assert!(!surface.snapshot().unwrap().is_uniform(GRAY));
    }

    #[test]
    fn reinitialize_discards_prior_content() {
        let (mut surface, _publisher) = ready_surface();
        surface.stroke_segment(Point::new(10.0, 50.0), Point::new(90.0, 50.0), RED);

        let mut next = config(64, 48, 1.0);
        next.generation = 2;
        surface.initialize(next).unwrap();

        let snapshot = surface.snapshot().unwrap();
        assert_eq!((snapshot.width(), snapshot.height()), (64, 48));
        assert!(snapshot.is_uniform(GRAY));
        assert_eq!(surface.generation(), Some(2));
    }

    #[test]
    fn stale_generation_segments_are_dropped() {
        let (mut surface, publisher) = ready_surface();
        let mut next = config(100, 100, 1.0);
        next.generation = 7;
        surface.initialize(next).unwrap();
        let published = publisher.publish_count();

        assert!(!surface.stroke_segment_for(1, Point::new(10.0, 50.0), Point::new(90.0, 50.0), RED));
        assert!(surface.snapshot().unwrap().is_uniform(GRAY));
        assert_eq!(publisher.publish_count(), published);

        assert!(surface.stroke_segment_for(7, Point::new(10.0, 50.0), Point::new(90.0, 50.0), RED));
        assert_eq!(publisher.publish_count(), published + 1);
    }
}
