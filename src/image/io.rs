//! Import boundary.
//!
//! - `Image::from_rgba`: adopt an already decoded, interleaved byte buffer.
//! - `Image::decode`: decode PNG/QOI bytes through the `image` crate.
//! - `Image::load`: read a file and decode it.
//!
//! Encoding back to disk is intentionally not provided.
use std::fs;
use std::path::Path;

use log::{debug, warn};

use super::{pixel_count, Image};
use crate::color::{pack, PixelFormat};
use crate::error::{ImageError, Result};

impl<C: PixelFormat> Image<C> {
    /// Build a buffer from decoded pixels.
    ///
    /// `bytes` holds `width * height` interleaved RGBA quads; `channels` is the
    /// channel count the codec reported for the source, and inputs with fewer
    /// than three channels are rejected.
    pub fn from_rgba(width: u32, height: u32, channels: u8, bytes: &[u8]) -> Result<Self> {
        let len =
            pixel_count(width, height).ok_or(ImageError::InvalidDimensions { width, height })?;
        if channels < 3 {
            return Err(ImageError::UnsupportedChannels(channels));
        }
        let expected = len * 4;
        if bytes.len() != expected {
            return Err(ImageError::BufferSize {
                expected,
                actual: bytes.len(),
            });
        }

        let pixels = bytes
            .chunks_exact(4)
            .map(|p| pack(p[0], p[1], p[2], p[3]))
            .collect();
        Self::from_packed(width, height, pixels)
    }

    /// Decode compressed image bytes (PNG or QOI)
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        let decoded = image::load_from_memory(bytes).map_err(|e| {
            warn!("rejecting {} bytes of image data: {e}", bytes.len());
            ImageError::Decode(e)
        })?;

        let channels = decoded.color().channel_count();
        let (width, height) = (decoded.width(), decoded.height());
        debug!("decoded {width}x{height} image with {channels} channels");

        let rgba = decoded.to_rgba8();
        Self::from_rgba(width, height, channels, rgba.as_raw())
    }

    /// Read a file fully and decode it
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ImageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::decode(&bytes)
    }
}
