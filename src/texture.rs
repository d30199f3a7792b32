//! Streaming texture export.
//!
//! A texture sink receives the whole buffer as raw bytes, 4 per pixel, rows
//! `width * 4` bytes apart. The bytes are the packed words in native order,
//! which is what SDL's `RGBA8888` format expects. Nothing is ever read back.

use crate::color::PixelFormat;
use crate::error::{ImageError, Result};
use crate::image::Image;

/// Fixed-size 8-bit RGBA texture that accepts full-frame updates
pub trait TextureSink {
    fn dimensions(&self) -> (u32, u32);

    /// Replace the texture contents with `bytes` (`pitch` bytes per row)
    fn upload(&mut self, bytes: &[u8], pitch: usize) -> Result<()>;
}

impl<C: PixelFormat> Image<C> {
    /// Push the full buffer into `sink`, which must match the image size
    pub fn upload_to<S: TextureSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        let (width, height) = sink.dimensions();
        if (width, height) != self.dimensions() {
            return Err(ImageError::Texture(format!(
                "texture is {width}x{height}, image is {}x{}",
                self.width(),
                self.height()
            )));
        }
        sink.upload(self.as_bytes(), self.pitch())
    }
}

#[cfg(feature = "sdl")]
mod sdl {
    use log::debug;
    use sdl2::pixels::PixelFormatEnum;
    use sdl2::render::{Texture, TextureCreator};

    use super::*;

    impl TextureSink for Texture<'_> {
        fn dimensions(&self) -> (u32, u32) {
            let query = self.query();
            (query.width, query.height)
        }

        fn upload(&mut self, bytes: &[u8], pitch: usize) -> Result<()> {
            let format = self.query().format;
            if format != PixelFormatEnum::RGBA8888 {
                return Err(ImageError::Texture(format!("unsupported texture format {format:?}")));
            }
            self.update(None, bytes, pitch)
                .map_err(|e| ImageError::Texture(e.to_string()))
        }
    }

    /// Create a streaming `RGBA8888` texture of the given size
    pub fn create_streaming_texture<T>(
        creator: &TextureCreator<T>,
        width: u32,
        height: u32,
    ) -> Result<Texture<'_>> {
        debug!("creating {width}x{height} streaming texture");
        creator
            .create_texture_streaming(PixelFormatEnum::RGBA8888, width, height)
            .map_err(|e| ImageError::Texture(e.to_string()))
    }

    /// Create a streaming texture sized to `image` and upload it once
    pub fn texture_from_image<'r, T, C: PixelFormat>(
        creator: &'r TextureCreator<T>,
        image: &Image<C>,
    ) -> Result<Texture<'r>> {
        let mut texture = create_streaming_texture(creator, image.width(), image.height())?;
        image.upload_to(&mut texture)?;
        Ok(texture)
    }
}

#[cfg(feature = "sdl")]
pub use sdl::{create_streaming_texture, texture_from_image};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ColorF, Rgba};

    struct MockTexture {
        width: u32,
        height: u32,
        bytes: Vec<u8>,
        pitch: usize,
        uploads: usize,
    }

    impl MockTexture {
        fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                bytes: Vec::new(),
                pitch: 0,
                uploads: 0,
            }
        }
    }

    impl TextureSink for MockTexture {
        fn dimensions(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        fn upload(&mut self, bytes: &[u8], pitch: usize) -> Result<()> {
            self.bytes = bytes.to_vec();
            self.pitch = pitch;
            self.uploads += 1;
            Ok(())
        }
    }

    #[test]
    fn test_upload_pushes_native_words() {
        let mut img = Image::new(3, 2, Rgba::BLACK).unwrap();
        img.set(2, 1, Rgba::rgba(0x11, 0x22, 0x33, 0x44));
        let mut tex = MockTexture::new(3, 2);
        img.upload_to(&mut tex).unwrap();

        assert_eq!(tex.uploads, 1);
        assert_eq!(tex.pitch, 12);
        assert_eq!(tex.bytes.len(), 24);
        assert_eq!(&tex.bytes[20..], &0x1122_3344u32.to_ne_bytes());
    }

    #[test]
    fn test_upload_rejects_size_mismatch() {
        let img = Image::new(4, 4, ColorF::WHITE).unwrap();
        let mut tex = MockTexture::new(4, 3);
        assert!(matches!(img.upload_to(&mut tex), Err(ImageError::Texture(_))));
        assert_eq!(tex.uploads, 0);
    }

    #[test]
    fn test_upload_through_trait_object() {
        let img = Image::new(1, 1, Rgba::WHITE).unwrap();
        let mut tex = MockTexture::new(1, 1);
        let sink: &mut dyn TextureSink = &mut tex;
        img.upload_to(sink).unwrap();
        assert_eq!(tex.bytes, vec![0xFF; 4]);
    }
}
