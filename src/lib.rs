//! Software RGBA raster buffers.
//!
//! An [`Image`] owns a `width x height` grid of packed `0xRRGGBBAA` pixels and
//! is viewed through either the [`Rgba`] or the [`ColorF`] color backend.
//! On top of it:
//!
//! - geometry: nearest-neighbour resize, rotation, clipping and pasting
//! - [`draw`]: lines, circles, rectangles, triangles and flood fill
//! - [`adjust`]: brightness, contrast and saturation
//! - [`Script`]: JSON command lists replayed onto an image
//! - [`TextureSink`]: one-way upload into a streaming GPU texture
//!
//! Drawing never fails; coordinates off the image are dropped. Construction,
//! decoding and I/O return [`ImageError`].

pub mod adjust;
pub mod color;
pub mod draw;
mod error;
mod geometry;
mod image;
pub mod script;
pub mod texture;

pub use color::{Channel, ColorF, Hsva, PixelFormat, Rgba};
pub use error::{ImageError, Result};
pub use crate::image::{Canvas, Image};
pub use script::{Command, Script};
pub use texture::TextureSink;
