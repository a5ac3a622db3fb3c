//! Data types shared by the canvas actor and the raster surface.

use thiserror::Error;

use crate::draw::Color;

/// Largest width or height Cairo can allocate.
pub const MAX_SURFACE_DIMENSION: i32 = 32767;

/// Parameters for (re)creating the raster surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceConfig {
    /// Buffer width in device pixels.
    pub pixel_width: i32,
    /// Buffer height in device pixels.
    pub pixel_height: i32,
    /// Factor from logical gesture units to device pixels.
    pub display_scale: f64,
    /// Fill color used by initialize and clear.
    pub background: Color,
    /// Width of every stroked segment, in device pixels.
    pub line_width: f64,
    /// Identifies which initialize call produced the surface.
    pub generation: u64,
}

impl SurfaceConfig {
    /// Derives a surface config from a logical container size.
    ///
    /// Pixel dimensions are the logical size times the display scale, rounded.
    pub fn for_container(
        container_width: f64,
        container_height: f64,
        display_scale: f64,
        background: Color,
        line_width: f64,
    ) -> Self {
        Self {
            pixel_width: (container_width * display_scale).round() as i32,
            pixel_height: (container_height * display_scale).round() as i32,
            display_scale,
            background,
            line_width,
            generation: 0,
        }
    }

    /// Checks dimensions and scale before any pixels are allocated.
    pub fn validate(&self) -> Result<(), CanvasError> {
        let in_range = |side: i32| (1..=MAX_SURFACE_DIMENSION).contains(&side);
        if !in_range(self.pixel_width) || !in_range(self.pixel_height) {
            return Err(CanvasError::InvalidDimensions {
                width: self.pixel_width,
                height: self.pixel_height,
            });
        }
        if !self.display_scale.is_finite() || self.display_scale <= 0.0 {
            return Err(CanvasError::InvalidScale(self.display_scale));
        }
        Ok(())
    }
}

/// Errors that can occur while managing the canvas.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("Invalid display scale {0}")]
    InvalidScale(f64),

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Surface data is still borrowed: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("Failed to encode PNG: {0}")]
    Png(#[from] cairo::IoError),

    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Canvas thread is not running")]
    Closed,
}
