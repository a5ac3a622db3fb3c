//! RGBA color type and predefined color constants.

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use ghostdraw::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// assert_eq!(red.to_rgba8(), [255, 0, 0, 255]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 0-255 channel values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Quantizes the color to 8-bit straight RGBA, the layout used by snapshots.
    pub fn to_rgba8(self) -> [u8; 4] {
        let quantize = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }

    /// Applies this color as the source of a Cairo context.
    pub(crate) fn apply_to(self, ctx: &cairo::Context) {
        ctx.set_source_rgba(self.r, self.g, self.b, self.a);
    }
}

// ============================================================================
// Predefined Color Constants
// ============================================================================

/// Predefined red color (R=1.0, G=0.0, B=0.0)
pub const RED: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Predefined green color (R=0.0, G=1.0, B=0.0)
pub const GREEN: Color = Color {
    r: 0.0,
    g: 1.0,
    b: 0.0,
    a: 1.0,
};

/// Predefined blue color (R=0.0, G=0.0, B=1.0)
pub const BLUE: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 1.0,
    a: 1.0,
};

/// Light gray (two-thirds white). Default canvas background and eraser ink.
pub const LIGHT_GRAY: Color = Color {
    r: 2.0 / 3.0,
    g: 2.0 / 3.0,
    b: 2.0 / 3.0,
    a: 1.0,
};

/// Predefined white color (R=1.0, G=1.0, B=1.0)
pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Predefined black color (R=0.0, G=0.0, B=0.0)
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};
