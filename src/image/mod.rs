mod io;

use std::fmt;
use std::marker::PhantomData;

use crate::color::{PixelFormat, Rgba};
use crate::error::{ImageError, Result};

// ============================================================================
// Canvas
// ============================================================================

/// Bounds-checked point access to a pixel surface.
///
/// Every drawing, flood-fill and tonal routine in the crate is written against
/// this trait only, so it runs unchanged on any color backend.
pub trait Canvas {
    type Color: PixelFormat;

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Read a pixel; coordinates outside the surface yield the zero color
    fn get(&self, x: i32, y: i32) -> Self::Color;

    /// Write a pixel; coordinates outside the surface are ignored
    fn set(&mut self, x: i32, y: i32, color: Self::Color);

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }
}

// ============================================================================
// Image
// ============================================================================

/// Owned `width x height` pixel buffer.
///
/// Storage is always one packed `0xRRGGBBAA` word per pixel, row-major. The
/// type parameter only selects which color representation the accessors speak
/// ([`Rgba`] or [`ColorF`](crate::color::ColorF)); converting between the two
/// views with [`Image::convert`] is free.
///
/// A buffer with a zero dimension cannot be constructed. Storage is released
/// when the value is dropped; derived images (resize, rotate, clip, duplicate)
/// always own fresh storage.
#[derive(Clone, PartialEq)]
pub struct Image<C: PixelFormat = Rgba> {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    _format: PhantomData<C>,
}

/// Number of pixels for a `width x height` image, or `None` if either
/// dimension is zero or the product overflows
pub(crate) fn pixel_count(width: u32, height: u32) -> Option<usize> {
    if width == 0 || height == 0 {
        return None;
    }
    (width as usize).checked_mul(height as usize)
}

impl<C: PixelFormat> Image<C> {
    /// Create a buffer filled with `fill`
    pub fn new(width: u32, height: u32, fill: C) -> Result<Self> {
        let len =
            pixel_count(width, height).ok_or(ImageError::InvalidDimensions { width, height })?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| ImageError::Allocation { width, height })?;
        pixels.resize(len, fill.to_packed());

        Ok(Self::from_parts(width, height, pixels))
    }

    /// Create a transparent (all-zero) buffer
    pub fn empty(width: u32, height: u32) -> Result<Self> {
        Self::new(width, height, C::default())
    }

    /// Wrap an already-packed pixel vector
    pub fn from_packed(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self> {
        let expected =
            pixel_count(width, height).ok_or(ImageError::InvalidDimensions { width, height })?;
        if pixels.len() != expected {
            return Err(ImageError::BufferSize {
                expected: expected * 4,
                actual: pixels.len() * 4,
            });
        }
        Ok(Self::from_parts(width, height, pixels))
    }

    fn from_parts(width: u32, height: u32, pixels: Vec<u32>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
            _format: PhantomData,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Read a pixel (zero color when out of bounds)
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> C {
        C::from_packed(self.get_packed(x, y))
    }

    /// Write a pixel (no-op when out of bounds)
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: C) {
        self.set_packed(x, y, color.to_packed());
    }

    #[inline]
    pub(crate) fn get_packed(&self, x: i32, y: i32) -> u32 {
        if self.in_bounds(x, y) {
            self.pixels[self.index(x as u32, y as u32)]
        } else {
            0
        }
    }

    #[inline]
    pub(crate) fn set_packed(&mut self, x: i32, y: i32, packed: u32) {
        if self.in_bounds(x, y) {
            let idx = self.index(x as u32, y as u32);
            self.pixels[idx] = packed;
        }
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: C) {
        self.pixels.fill(color.to_packed());
    }

    /// Deep copy with independent storage
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Replace every pixel with `f(x, y, old)`.
    ///
    /// `f` sees the original value of each pixel only; it must not rely on
    /// neighbours having been visited.
    pub fn pass_through<F>(&mut self, mut f: F)
    where
        F: FnMut(u32, u32, C) -> C,
    {
        let width = self.width as usize;
        for (i, px) in self.pixels.iter_mut().enumerate() {
            let x = (i % width) as u32;
            let y = (i / width) as u32;
            *px = f(x, y, C::from_packed(*px)).to_packed();
        }
    }

    /// Reinterpret the buffer under another color backend
    pub fn convert<D: PixelFormat>(self) -> Image<D> {
        Image::from_parts(self.width, self.height, self.pixels)
    }

    /// Packed pixels, row-major
    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Raw bytes of the packed words in native byte order.
    ///
    /// On little-endian targets each pixel reads `[A, B, G, R]`, which is the
    /// layout SDL calls `RGBA8888`.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Row stride of [`as_bytes`](Self::as_bytes)
    #[inline]
    pub fn pitch(&self) -> usize {
        self.width as usize * 4
    }

    /// Interleaved `[R, G, B, A]` bytes, row-major
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_be_bytes()).collect()
    }

    /// Consume the buffer and return its packed storage
    pub fn into_packed(self) -> Vec<u32> {
        self.pixels
    }
}

impl<C: PixelFormat> Canvas for Image<C> {
    type Color = C;

    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn get(&self, x: i32, y: i32) -> C {
        Image::get(self, x, y)
    }

    #[inline]
    fn set(&mut self, x: i32, y: i32, color: C) {
        Image::set(self, x, y, color);
    }
}

impl<C: PixelFormat> fmt::Debug for Image<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &std::any::type_name::<C>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::color::ColorF;

    /// Order-sensitive checksum over the packed storage
    pub(crate) fn checksum<C: PixelFormat>(img: &Image<C>) -> u64 {
        img.pixels()
            .iter()
            .enumerate()
            .fold(0u64, |acc, (i, &p)| {
                acc.wrapping_mul(31).wrapping_add(p as u64 ^ (i as u64) << 32)
            })
    }

    #[test]
    fn test_new_fills_every_pixel() {
        let c = Rgba::rgb(10, 20, 30);
        for (w, h) in [(1, 1), (3, 7), (16, 2)] {
            let img = Image::new(w, h, c).unwrap();
            for y in 0..h as i32 {
                for x in 0..w as i32 {
                    assert_eq!(img.get(x, y), c);
                }
            }
        }
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(matches!(
            Image::<Rgba>::new(0, 4, Rgba::BLACK),
            Err(ImageError::InvalidDimensions { width: 0, height: 4 })
        ));
        assert!(Image::<Rgba>::empty(4, 0).is_err());
        assert!(Image::<ColorF>::empty(0, 0).is_err());
    }

    #[test]
    fn test_set_get_round_trip() {
        let mut img = Image::<Rgba>::empty(4, 3).unwrap();
        let c = Rgba::rgba(1, 2, 3, 4);
        img.set(3, 2, c);
        assert_eq!(img.get(3, 2), c);
        assert_eq!(img.pixels()[2 * 4 + 3], c.0);
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut img = Image::new(4, 4, Rgba::WHITE).unwrap();
        let before = checksum(&img);
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (4, 4), (i32::MIN, i32::MAX)] {
            assert_eq!(img.get(x, y), Rgba::TRANSPARENT);
            img.set(x, y, Rgba::BLACK);
        }
        assert_eq!(checksum(&img), before);
    }

    #[test]
    fn test_canvas_bounds_match_image() {
        fn canvas_bounds<S: Canvas>(surface: &S, x: i32, y: i32) -> bool {
            surface.in_bounds(x, y)
        }
        let img = Image::<Rgba>::empty(4, 3).unwrap();
        for (x, y) in [(0, 0), (3, 2), (4, 2), (3, 3), (-1, 0), (i32::MAX, 0)] {
            assert_eq!(canvas_bounds(&img, x, y), img.in_bounds(x, y));
        }
        assert!(canvas_bounds(&img, 3, 2));
        assert!(!canvas_bounds(&img, 4, 2));
    }

    #[test]
    fn test_duplicate_is_independent() {
        let mut src = Image::new(3, 3, Rgba::gray(50)).unwrap();
        src.set(1, 1, Rgba::WHITE);
        let mut copy = src.duplicate();
        assert!(copy == src);

        copy.set(0, 0, Rgba::BLACK);
        assert_eq!(src.get(0, 0), Rgba::gray(50));
        assert_eq!(copy.get(0, 0), Rgba::BLACK);
    }

    #[test]
    fn test_pass_through_maps_each_pixel() {
        let mut img = Image::<Rgba>::empty(4, 2).unwrap();
        img.pass_through(|x, y, _| Rgba::rgb(x as u8, y as u8, 0));
        assert_eq!(img.get(3, 1), Rgba::rgb(3, 1, 0));
        assert_eq!(img.get(2, 0), Rgba::rgb(2, 0, 0));
    }

    #[test]
    fn test_float_backend_shares_storage() {
        let mut img = Image::new(2, 2, ColorF::WHITE).unwrap();
        img.set(1, 0, ColorF::rgb(1.0, 0.0, 0.0));
        assert_eq!(img.get(5, 5), ColorF::TRANSPARENT);

        let packed: Image<Rgba> = img.convert();
        assert_eq!(packed.get(1, 0), Rgba::rgb(255, 0, 0));
        assert_eq!(packed.get(0, 0), Rgba::WHITE);
    }

    #[test]
    fn test_byte_views() {
        let img = Image::new(2, 1, Rgba::rgba(1, 2, 3, 4)).unwrap();
        assert_eq!(img.to_rgba8(), vec![1, 2, 3, 4, 1, 2, 3, 4]);
        assert_eq!(img.as_bytes().len(), 8);
        assert_eq!(img.pitch(), 8);
        assert_eq!(&img.as_bytes()[..4], &0x0102_0304u32.to_ne_bytes());
    }

    #[test]
    fn test_from_packed_checks_length() {
        assert!(Image::<Rgba>::from_packed(2, 2, vec![0; 4]).is_ok());
        assert!(matches!(
            Image::<Rgba>::from_packed(2, 2, vec![0; 3]),
            Err(ImageError::BufferSize { expected: 16, actual: 12 })
        ));
    }
}
