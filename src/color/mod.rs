//! Color codecs.
//!
//! Pixels are stored as packed `u32` words laid out `0xRRGGBBAA` (red in the
//! most significant byte). Two interchangeable front-ends sit on top of that
//! word: [`Rgba`], a thin newtype over the packed value, and [`ColorF`], four
//! normalized `f32` channels. Both implement [`PixelFormat`], which is the only
//! thing the buffer and the algorithms need to know about a color.

mod float;
mod hsv;

pub use float::ColorF;
pub use hsv::Hsva;

use serde::{Deserialize, Serialize};

// ============================================================================
// Channels
// ============================================================================

/// One of the four 8-bit channels of a packed color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha];

    /// Bit offset of this channel inside a packed word
    #[inline]
    pub const fn shift(self) -> u32 {
        match self {
            Channel::Red => 24,
            Channel::Green => 16,
            Channel::Blue => 8,
            Channel::Alpha => 0,
        }
    }

    /// Mask selecting exactly this channel's byte
    #[inline]
    pub const fn mask(self) -> u32 {
        0xFF << self.shift()
    }
}

// ============================================================================
// Packed helpers
// ============================================================================

/// Pack four channels into `0xRRGGBBAA`
#[inline]
pub const fn pack(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (r as u32) << 24 | (g as u32) << 16 | (b as u32) << 8 | a as u32
}

/// Extract one channel from a packed word
#[inline]
pub const fn unpack_channel(c: u32, which: Channel) -> u8 {
    ((c >> which.shift()) & 0xFF) as u8
}

/// Replace one channel of a packed word, leaving the other three intact
#[inline]
pub const fn set_channel(c: u32, which: Channel, value: u8) -> u32 {
    (c & !which.mask()) | ((value as u32) << which.shift())
}

/// Normalize a byte to `[0.0, 1.0]`
#[inline]
pub fn byte_to_unit(v: u8) -> f32 {
    v as f32 / 255.0
}

/// Saturate a normalized channel and truncate it back to a byte
#[inline]
pub fn unit_to_byte(v: f32) -> u8 {
    // NaN falls through clamp unchanged; `as` maps it to 0
    (v.clamp(0.0, 1.0) * 255.0) as u8
}

/// Split a packed word into normalized `[r, g, b, a]`
#[inline]
pub fn to_float_channels(c: u32) -> [f32; 4] {
    Channel::ALL.map(|ch| byte_to_unit(unpack_channel(c, ch)))
}

/// Pack normalized channels, clamping each to `[0.0, 1.0]` first
#[inline]
pub fn from_float_channels([r, g, b, a]: [f32; 4]) -> u32 {
    pack(unit_to_byte(r), unit_to_byte(g), unit_to_byte(b), unit_to_byte(a))
}

// ============================================================================
// PixelFormat
// ============================================================================

/// A color representation that can round-trip through the packed word.
///
/// `Default` must be the zero color (all channels zero), which is what
/// out-of-bounds reads return.
pub trait PixelFormat: Copy + PartialEq + Default + std::fmt::Debug {
    fn to_packed(self) -> u32;
    fn from_packed(packed: u32) -> Self;

    /// Normalized `[r, g, b, a]` view used by the tonal adjustments
    #[inline]
    fn to_unit(self) -> [f32; 4] {
        to_float_channels(self.to_packed())
    }

    #[inline]
    fn from_unit(channels: [f32; 4]) -> Self {
        Self::from_packed(from_float_channels(channels))
    }
}

// ============================================================================
// Rgba
// ============================================================================

/// Packed 8-bit RGBA color (`0xRRGGBBAA`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgba(pub u32);

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba(0);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(pack(r, g, b, a))
    }

    /// Opaque color
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Gray with explicit alpha
    #[inline]
    pub const fn gray_alpha(c: u8, a: u8) -> Self {
        Self::rgba(c, c, c, a)
    }

    /// Opaque gray
    #[inline]
    pub const fn gray(c: u8) -> Self {
        Self::rgb(c, c, c)
    }

    #[inline]
    pub const fn channel(self, which: Channel) -> u8 {
        unpack_channel(self.0, which)
    }

    #[inline]
    pub const fn with_channel(self, which: Channel, value: u8) -> Self {
        Self(set_channel(self.0, which, value))
    }

    #[inline]
    pub const fn r(self) -> u8 {
        self.channel(Channel::Red)
    }

    #[inline]
    pub const fn g(self) -> u8 {
        self.channel(Channel::Green)
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.channel(Channel::Blue)
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.channel(Channel::Alpha)
    }

    #[inline]
    pub const fn with_r(self, v: u8) -> Self {
        self.with_channel(Channel::Red, v)
    }

    #[inline]
    pub const fn with_g(self, v: u8) -> Self {
        self.with_channel(Channel::Green, v)
    }

    #[inline]
    pub const fn with_b(self, v: u8) -> Self {
        self.with_channel(Channel::Blue, v)
    }

    #[inline]
    pub const fn with_a(self, v: u8) -> Self {
        self.with_channel(Channel::Alpha, v)
    }
}

impl PixelFormat for Rgba {
    #[inline]
    fn to_packed(self) -> u32 {
        self.0
    }

    #[inline]
    fn from_packed(packed: u32) -> Self {
        Self(packed)
    }
}

impl From<u32> for Rgba {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Rgba> for u32 {
    fn from(value: Rgba) -> Self {
        value.0
    }
}

impl From<ColorF> for Rgba {
    fn from(value: ColorF) -> Self {
        Self(value.to_packed())
    }
}
