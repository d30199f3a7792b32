use super::{from_float_channels, to_float_channels, PixelFormat, Rgba};
use serde::{Deserialize, Serialize};

/// Color with four normalized channels in `[0.0, 1.0]`.
///
/// Values outside the range are allowed while doing arithmetic; they are
/// saturated when the color is written into a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorF {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorF {
    pub const TRANSPARENT: ColorF = ColorF::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: ColorF = ColorF::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: ColorF = ColorF::new(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[inline]
    pub const fn gray_alpha(c: f32, a: f32) -> Self {
        Self::new(c, c, c, a)
    }

    #[inline]
    pub const fn gray(c: f32) -> Self {
        Self::rgb(c, c, c)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn from_array([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }

    /// Clamp all channels into `[0.0, 1.0]`
    pub fn saturate(self) -> Self {
        Self::from_array(self.to_array().map(|c| c.clamp(0.0, 1.0)))
    }
}

impl PixelFormat for ColorF {
    #[inline]
    fn to_packed(self) -> u32 {
        from_float_channels(self.to_array())
    }

    #[inline]
    fn from_packed(packed: u32) -> Self {
        Self::from_array(to_float_channels(packed))
    }
}

impl From<Rgba> for ColorF {
    fn from(value: Rgba) -> Self {
        Self::from_packed(value.0)
    }
}
