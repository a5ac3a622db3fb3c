//! Immutable copies of the raster surface.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use crate::canvas::CanvasError;

/// Immutable RGBA8 copy of the canvas pixels at one point in time.
///
/// Pixels are stored row-major, four bytes per pixel, straight (not
/// premultiplied) alpha. Cloning is cheap and never copies pixel data; the
/// buffer is detached from the live surface so later draws never show up here.
#[derive(Clone, PartialEq, Eq)]
pub struct CanvasSnapshot {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl std::fmt::Debug for CanvasSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasSnapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

impl CanvasSnapshot {
    /// Copies the current contents of a Cairo ARGB32 surface.
    ///
    /// The surface must not be referenced by a live `cairo::Context`.
    pub(crate) fn capture(surface: &mut cairo::ImageSurface) -> Result<Self, CanvasError> {
        let width = surface.width().max(0) as usize;
        let height = surface.height().max(0) as usize;
        let stride = surface.stride().max(0) as usize;
        let data = surface.data()?;

        let mut pixels = Vec::with_capacity(width * height * 4);
        for row in data.chunks(stride).take(height) {
            for px in row[..width * 4].chunks_exact(4) {
                let argb = u32::from_ne_bytes([px[0], px[1], px[2], px[3]]);
                pixels.extend_from_slice(&unpremultiply(argb));
            }
        }

        Ok(Self {
            width: width as u32,
            height: height as u32,
            pixels: pixels.into(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 rows.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the RGBA value at (x, y), or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y * self.width + x) * 4) as usize;
        let px = &self.pixels[offset..offset + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Returns true when every pixel equals `rgba`.
    pub fn is_uniform(&self, rgba: [u8; 4]) -> bool {
        self.pixels.chunks_exact(4).all(|px| px == rgba.as_slice())
    }

    /// Counts pixels equal to `rgba`.
    pub fn count_pixels(&self, rgba: [u8; 4]) -> usize {
        self.pixels.chunks_exact(4).filter(|px| *px == rgba.as_slice()).count()
    }

    /// Encodes the snapshot as a PNG file.
    pub fn write_png(&self, path: &Path) -> Result<(), CanvasError> {
        if self.width == 0 || self.height == 0 {
            return Err(CanvasError::InvalidDimensions {
                width: self.width as i32,
                height: self.height as i32,
            });
        }

        let format = cairo::Format::ARgb32;
        let stride = format.stride_for_width(self.width)?;
        let mut data = vec![0u8; stride as usize * self.height as usize];

        for (y, row) in self.pixels.chunks_exact(self.width as usize * 4).enumerate() {
            let dst = &mut data[y * stride as usize..];
            for (x, px) in row.chunks_exact(4).enumerate() {
                let argb = premultiply([px[0], px[1], px[2], px[3]]);
                dst[x * 4..x * 4 + 4].copy_from_slice(&argb.to_ne_bytes());
            }
        }

        let surface = cairo::ImageSurface::create_for_data(
            data,
            format,
            self.width as i32,
            self.height as i32,
            stride,
        )?;
        let mut file = File::create(path)?;
        surface.write_to_png(&mut file)?;
        Ok(())
    }
}

fn unpremultiply(argb: u32) -> [u8; 4] {
    let a = (argb >> 24) & 0xff;
    let channel = |shift: u32| {
        let c = (argb >> shift) & 0xff;
        if a == 0 {
            0
        } else {
            ((c * 255 + a / 2) / a).min(255) as u8
        }
    };
    [channel(16), channel(8), channel(0), a as u8]
}

fn premultiply(rgba: [u8; 4]) -> u32 {
    let a = rgba[3] as u32;
    let channel = |c: u8| (c as u32 * a + 127) / 255;
    (a << 24) | (channel(rgba[0]) << 16) | (channel(rgba[1]) << 8) | channel(rgba[2])
}
