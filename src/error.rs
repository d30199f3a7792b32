use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by buffer construction, import and export.
///
/// Drawing and geometry on an existing buffer never fail; out-of-range
/// coordinates are ignored instead.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("cannot allocate a {width}x{height} image")]
    Allocation { width: u32, height: u32 },
    #[error("pixel data is {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("unsupported channel count {0}, at least 3 required")]
    UnsupportedChannels(u8),
    #[error("no image data")]
    Empty,
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("clip rectangle has no area inside the source image")]
    EmptyRegion,
    #[error("texture upload failed: {0}")]
    Texture(String),
    #[error("failed to parse script: {0}")]
    Script(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ImageError>;
