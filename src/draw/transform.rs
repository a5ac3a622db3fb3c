//! Mapping from gesture coordinates to raster pixels.

use crate::replay::Point;

/// Affine transform from input-gesture space to raster space.
///
/// Input points are logical units with the origin at the bottom-left of the
/// container and Y growing upward. The raster has its origin at the top-left
/// with Y growing downward, so the transform scales by the display scale,
/// flips the Y axis and translates by the raster height.
#[derive(Debug, Clone, Copy)]
pub struct GeometryTransform {
    matrix: cairo::Matrix,
    display_scale: f64,
    raster_height: f64,
}

impl GeometryTransform {
    /// Builds the transform for a raster of `raster_height` pixels.
    pub fn new(display_scale: f64, raster_height: f64) -> Self {
        Self {
            matrix: cairo::Matrix::new(
                display_scale,
                0.0,
                0.0,
                -display_scale,
                0.0,
                raster_height,
            ),
            display_scale,
            raster_height,
        }
    }

    /// Transform that leaves points untouched.
    pub fn identity() -> Self {
        Self {
            matrix: cairo::Matrix::identity(),
            display_scale: 1.0,
            raster_height: 0.0,
        }
    }

    /// Maps an input-space point to raster pixel coordinates.
    pub fn to_raster_space(&self, point: Point) -> Point {
        let (x, y) = self.matrix.transform_point(point.x, point.y);
        Point::new(x, y)
    }

    pub fn display_scale(&self) -> f64 {
        self.display_scale
    }

    pub fn raster_height(&self) -> f64 {
        self.raster_height
    }
}
