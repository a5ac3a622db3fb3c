//! Serialized ownership of the shared canvas.
//!
//! This module provides:
//! - [`CanvasHandle`]: command queue into the thread that owns the raster
//! - [`CanvasPublisher`]: latest-snapshot channel for observers
//! - [`SurfaceConfig`] and [`CanvasError`]

mod actor;
mod publisher;
pub mod types;
#[cfg(test)]
mod tests;

pub use actor::CanvasHandle;
pub use publisher::CanvasPublisher;
pub use types::{CanvasError, SurfaceConfig};
