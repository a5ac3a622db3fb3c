//! Rendering primitives for the ghost canvas (Cairo-based).
//!
//! This module defines the raster side of the system:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`GeometryTransform`]: gesture coordinates to raster pixels
//! - [`RasterSurface`]: the persistent pixel buffer segments are stroked onto
//! - [`CanvasSnapshot`]: immutable copies of that buffer handed to observers

pub mod color;
pub mod snapshot;
pub mod surface;
pub mod transform;

// Re-export commonly used types at module level
pub use color::Color;
pub use snapshot::CanvasSnapshot;
pub use surface::RasterSurface;
pub use transform::GeometryTransform;

pub use color::{BLACK, BLUE, GREEN, LIGHT_GRAY, RED, WHITE};
