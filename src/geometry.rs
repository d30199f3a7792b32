//! Geometric transforms: nearest-neighbour resize, arbitrary rotation,
//! clipping and paste/blit.
//!
//! The `*ed` methods (`resized`, `rotated`, `clipped`) build a new image and
//! leave the source alone. The in-place forms swap the result into `self`; on
//! failure `self` is untouched.

use log::debug;

use crate::color::PixelFormat;
use crate::error::{ImageError, Result};
use crate::image::Image;

/// 16.16 fixed-point step used by the resampler
const FIXED_SHIFT: u32 = 16;

/// Sines and cosines this close to zero are treated as exact zeros so that
/// quarter turns produce exact bounding boxes
const TRIG_EPSILON: f32 = 1e-6;

/// Axis-aligned bounds of a rotated image, relative to the rotation origin
#[derive(Debug, Clone, Copy, PartialEq)]
struct RotatedBounds {
    min_x: f32,
    min_y: f32,
    width: u32,
    height: u32,
}

impl RotatedBounds {
    /// Bounding box of a `w x h` rectangle rotated about its top-left corner
    fn new(w: f32, h: f32, cos: f32, sin: f32) -> Self {
        // The three corners that move; the fourth stays at the origin, which
        // is why every fold starts from zero
        let corners = [
            (-h * sin, h * cos),
            (w * cos - h * sin, h * cos + w * sin),
            (w * cos, w * sin),
        ];

        let min_x = corners.iter().fold(0.0f32, |m, c| m.min(c.0));
        let min_y = corners.iter().fold(0.0f32, |m, c| m.min(c.1));
        let max_x = corners.iter().fold(0.0f32, |m, c| m.max(c.0));
        let max_y = corners.iter().fold(0.0f32, |m, c| m.max(c.1));

        Self {
            min_x,
            min_y,
            width: (max_x - min_x).ceil() as u32,
            height: (max_y - min_y).ceil() as u32,
        }
    }
}

fn snap(v: f32) -> f32 {
    if v.abs() < TRIG_EPSILON {
        0.0
    } else {
        v
    }
}

impl<C: PixelFormat> Image<C> {
    // ========================================================================
    // Resize
    // ========================================================================

    /// Nearest-neighbour scale to `new_width x new_height`
    pub fn resized(&self, new_width: u32, new_height: u32) -> Result<Self> {
        // The +1 ratio bias drifts past 65536 pixels
        if (new_width, new_height) == self.dimensions() {
            return Ok(self.duplicate());
        }
        let mut dst = Self::empty(new_width, new_height)?;
        let (src_w, src_h) = (self.width() as u64, self.height() as u64);

        let x_ratio = (src_w << FIXED_SHIFT) / new_width as u64 + 1;
        let y_ratio = (src_h << FIXED_SHIFT) / new_height as u64 + 1;
        debug!("resize {}x{} -> {}x{}", src_w, src_h, new_width, new_height);

        let src = self.pixels();
        for (i, row) in dst.pixels_mut().chunks_exact_mut(new_width as usize).enumerate() {
            let sy = ((i as u64 * y_ratio) >> FIXED_SHIFT).min(src_h - 1) as usize;
            let src_row = &src[sy * src_w as usize..(sy + 1) * src_w as usize];

            let mut rat = 0u64;
            for px in row.iter_mut() {
                let sx = (rat >> FIXED_SHIFT).min(src_w - 1) as usize;
                *px = src_row[sx];
                rat += x_ratio;
            }
        }
        Ok(dst)
    }

    /// Resize in place, replacing the current storage
    pub fn resize(&mut self, new_width: u32, new_height: u32) -> Result<()> {
        *self = self.resized(new_width, new_height)?;
        Ok(())
    }

    // ========================================================================
    // Rotate
    // ========================================================================

    /// Rotate by `degrees` around the top-left corner, growing the canvas to
    /// the rotated bounding box. Uncovered pixels stay transparent.
    pub fn rotated(&self, degrees: f32) -> Result<Self> {
        let theta = degrees.rem_euclid(360.0).to_radians();
        let (sin, cos) = theta.sin_cos();
        let (sin, cos) = (snap(sin), snap(cos));
        let (w, h) = (self.width() as i32, self.height() as i32);

        let bounds = RotatedBounds::new(w as f32, h as f32, cos, sin);
        debug!(
            "rotate {}x{} by {} degrees -> {}x{}",
            w, h, degrees, bounds.width, bounds.height
        );
        let mut dst = Self::empty(bounds.width, bounds.height)?;

        for y in 0..bounds.height as i32 {
            let fy = y as f32 + 0.5 + bounds.min_y;
            for x in 0..bounds.width as i32 {
                let fx = x as f32 + 0.5 + bounds.min_x;
                // Inverse rotation of the destination pixel centre
                let sx = (fx * cos + fy * sin).floor() as i32;
                let sy = (fy * cos - fx * sin).floor() as i32;
                if sx < 0 || sx >= w || sy < 0 || sy >= h {
                    continue;
                }
                dst.set_packed(x, y, self.get_packed(sx, sy));
            }
        }
        Ok(dst)
    }

    /// Rotate in place, replacing the current storage
    pub fn rotate(&mut self, degrees: f32) -> Result<()> {
        *self = self.rotated(degrees)?;
        Ok(())
    }

    // ========================================================================
    // Clip
    // ========================================================================

    /// Copy out the sub-rectangle `(x, y, width, height)`.
    ///
    /// The origin is clamped to the image and the extent truncated at the
    /// right/bottom edges. Fails with [`ImageError::EmptyRegion`] when nothing
    /// of the rectangle remains.
    pub fn clipped(&self, x: i32, y: i32, width: i32, height: i32) -> Result<Self> {
        let (src_w, src_h) = (self.width() as i64, self.height() as i64);
        let ox = (x as i64).clamp(0, src_w);
        let oy = (y as i64).clamp(0, src_h);
        if ox >= src_w || oy >= src_h {
            return Err(ImageError::EmptyRegion);
        }

        let iw = (ox + width as i64).min(src_w) - ox;
        let ih = (oy + height as i64).min(src_h) - oy;
        if iw <= 0 || ih <= 0 {
            return Err(ImageError::EmptyRegion);
        }
        debug!("clip {}x{} at ({}, {}) from {}x{}", iw, ih, ox, oy, src_w, src_h);

        let mut dst = Self::empty(iw as u32, ih as u32)?;
        let (ox, oy, iw) = (ox as usize, oy as usize, iw as usize);
        let src = self.pixels();
        for (row, out) in dst.pixels_mut().chunks_exact_mut(iw).enumerate() {
            let start = (oy + row) * src_w as usize + ox;
            out.copy_from_slice(&src[start..start + iw]);
        }
        Ok(dst)
    }

    /// Clip in place, replacing the current storage
    pub fn clip(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<()> {
        *self = self.clipped(x, y, width, height)?;
        Ok(())
    }

    // ========================================================================
    // Paste
    // ========================================================================

    /// Copy all of `src` into this image with its top-left corner at `(x, y)`.
    /// Pixels falling outside this image are dropped.
    pub fn paste<D: PixelFormat>(&mut self, src: &Image<D>, x: i32, y: i32) {
        let (dst_w, dst_h) = (self.width() as i32, self.height() as i32);

        for oy in 0..src.height() as i32 {
            let dy = y.saturating_add(oy);
            if dy >= dst_h {
                break;
            }
            for ox in 0..src.width() as i32 {
                let dx = x.saturating_add(ox);
                if dx >= dst_w {
                    break;
                }
                self.set_packed(dx, dy, src.get_packed(ox, oy));
            }
        }
    }

    /// Copy the `rw x rh` region of `src` starting at `(rx, ry)` into this
    /// image at `(x, y)`. Reads outside `src` paste the zero color.
    pub fn paste_region<D: PixelFormat>(
        &mut self,
        src: &Image<D>,
        x: i32,
        y: i32,
        rx: i32,
        ry: i32,
        rw: i32,
        rh: i32,
    ) {
        for oy in 0..rh.max(0) {
            for ox in 0..rw.max(0) {
                let packed = src.get_packed(rx.saturating_add(ox), ry.saturating_add(oy));
                self.set_packed(x.saturating_add(ox), y.saturating_add(oy), packed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ColorF, Rgba};

    /// Image with a distinct color per pixel
    fn gradient(w: u32, h: u32) -> Image<Rgba> {
        let mut img = Image::empty(w, h).unwrap();
        img.pass_through(|x, y, _| Rgba::rgb(x as u8 * 10, y as u8 * 10, 200));
        img
    }

    #[test]
    fn test_resize_identity() {
        let img = gradient(7, 5);
        assert!(img.resized(7, 5).unwrap() == img);
    }

    #[test]
    fn test_resize_identity_wide_and_tall() {
        let mut wide = Image::<Rgba>::empty(70_000, 1).unwrap();
        wide.pass_through(|x, _, _| Rgba(x));
        assert!(wide.resized(70_000, 1).unwrap() == wide);

        let mut tall = Image::<Rgba>::empty(1, 70_000).unwrap();
        tall.pass_through(|_, y, _| Rgba(y));
        assert!(tall.resized(1, 70_000).unwrap() == tall);
    }

    #[test]
    fn test_resize_doubles_pixels() {
        let img = gradient(2, 2);
        let big = img.resized(4, 4).unwrap();
        assert_eq!(big.dimensions(), (4, 4));
        assert_eq!(big.get(0, 0), img.get(0, 0));
        assert_eq!(big.get(1, 1), img.get(0, 0));
        assert_eq!(big.get(2, 0), img.get(1, 0));
        assert_eq!(big.get(3, 3), img.get(1, 1));
    }

    #[test]
    fn test_resize_shrinks() {
        let img = gradient(8, 8);
        let small = img.resized(2, 2).unwrap();
        assert_eq!(small.get(0, 0), img.get(0, 0));
        assert_eq!(small.get(1, 1), img.get(4, 4));
    }

    #[test]
    fn test_resize_in_place_and_failure() {
        let mut img = gradient(3, 3);
        img.resize(6, 1).unwrap();
        assert_eq!(img.dimensions(), (6, 1));

        let before = img.clone();
        assert!(img.resize(0, 4).is_err());
        assert!(img == before);
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let img = gradient(5, 3);
        assert!(img.rotated(0.0).unwrap() == img);
        assert!(img.rotated(360.0).unwrap() == img);
    }

    #[test]
    fn test_rotate_180_flips() {
        let img = gradient(4, 3);
        let out = img.rotated(180.0).unwrap();
        assert_eq!(out.dimensions(), (4, 3));
        // Corners swap diagonally
        assert_eq!(out.get(0, 0), img.get(3, 2));
        assert_eq!(out.get(3, 2), img.get(0, 0));
        assert_eq!(out.get(3, 0), img.get(0, 2));
    }

    #[test]
    fn test_rotate_quarter_turns() {
        let img = gradient(5, 3);
        let cw = img.rotated(90.0).unwrap();
        assert_eq!(cw.dimensions(), (3, 5));
        assert_eq!(cw.get(0, 0), img.get(0, 2));
        assert_eq!(cw.get(2, 0), img.get(0, 0));
        assert_eq!(cw.get(2, 4), img.get(4, 0));

        let ccw = img.rotated(270.0).unwrap();
        assert_eq!(ccw.dimensions(), (3, 5));
        assert_eq!(ccw.get(0, 0), img.get(4, 0));
        assert_eq!(ccw.get(2, 4), img.get(0, 2));
    }

    #[test]
    fn test_rotate_in_place() {
        let mut img = gradient(5, 3);
        img.rotate(90.0).unwrap();
        img.rotate(-90.0).unwrap();
        assert!(img == gradient(5, 3));
    }

    #[test]
    fn test_rotate_45_grows_canvas() {
        let img = Image::new(10, 10, Rgba::WHITE).unwrap();
        let out = img.rotated(45.0).unwrap();
        // 10 * sqrt(2) = 14.14..
        assert_eq!(out.dimensions(), (15, 15));
        // Centre is covered, box corners are not
        assert_eq!(out.get(7, 7), Rgba::WHITE);
        assert_eq!(out.get(14, 14), Rgba::TRANSPARENT);
        assert_eq!(out.get(0, 0), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_rotate_negative_angle_normalizes() {
        let img = gradient(4, 2);
        assert!(img.rotated(-180.0).unwrap() == img.rotated(180.0).unwrap());
    }

    #[test]
    fn test_clip_extracts_region() {
        let img = gradient(6, 4);
        let part = img.clipped(2, 1, 3, 2).unwrap();
        assert_eq!(part.dimensions(), (3, 2));
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(part.get(x, y), img.get(x + 2, y + 1));
            }
        }
    }

    #[test]
    fn test_clip_truncates_and_clamps() {
        let img = gradient(6, 4);
        let part = img.clipped(4, 2, 10, 10).unwrap();
        assert_eq!(part.dimensions(), (2, 2));

        let part = img.clipped(-3, -3, 2, 2).unwrap();
        assert_eq!(part.dimensions(), (2, 2));
        assert_eq!(part.get(0, 0), img.get(0, 0));
    }

    #[test]
    fn test_clip_empty_regions_fail() {
        let mut img = gradient(6, 4);
        assert!(matches!(img.clipped(6, 0, 2, 2), Err(ImageError::EmptyRegion)));
        assert!(matches!(img.clipped(0, 4, 2, 2), Err(ImageError::EmptyRegion)));
        assert!(matches!(img.clipped(1, 1, 0, 2), Err(ImageError::EmptyRegion)));
        assert!(matches!(img.clipped(1, 1, 2, -1), Err(ImageError::EmptyRegion)));

        let before = img.clone();
        assert!(img.clip(10, 10, 1, 1).is_err());
        assert!(img == before);
        img.clip(1, 1, 2, 2).unwrap();
        assert_eq!(img.dimensions(), (2, 2));
    }

    #[test]
    fn test_clip_then_paste_restores() {
        let img = gradient(8, 6);
        let part = img.clipped(3, 2, 4, 3).unwrap();
        let mut copy = img.duplicate();
        copy.fill(Rgba::BLACK);
        copy.paste(&part, 3, 2);

        for y in 2..5 {
            for x in 3..7 {
                assert_eq!(copy.get(x, y), img.get(x, y));
            }
        }
        assert_eq!(copy.get(0, 0), Rgba::BLACK);
    }

    #[test]
    fn test_paste_drops_out_of_range() {
        let mut dst = Image::new(4, 4, Rgba::BLACK).unwrap();
        let src = Image::new(3, 3, Rgba::WHITE).unwrap();
        dst.paste(&src, -1, 2);

        assert_eq!(dst.get(0, 2), Rgba::WHITE);
        assert_eq!(dst.get(1, 3), Rgba::WHITE);
        assert_eq!(dst.get(2, 2), Rgba::BLACK);
        assert_eq!(dst.get(0, 1), Rgba::BLACK);
    }

    #[test]
    fn test_paste_across_backends() {
        let mut dst = Image::<Rgba>::empty(2, 2).unwrap();
        let src = Image::new(1, 1, ColorF::rgb(0.0, 1.0, 0.0)).unwrap();
        dst.paste(&src, 1, 1);
        assert_eq!(dst.get(1, 1), Rgba::rgb(0, 255, 0));
    }

    #[test]
    fn test_paste_region() {
        let src = gradient(5, 5);
        let mut dst = Image::new(4, 4, Rgba::BLACK).unwrap();
        dst.paste_region(&src, 1, 1, 3, 3, 3, 3);

        assert_eq!(dst.get(1, 1), src.get(3, 3));
        assert_eq!(dst.get(2, 2), src.get(4, 4));
        // Reads past the source edge paste the zero color
        assert_eq!(dst.get(3, 3), Rgba::TRANSPARENT);
        assert_eq!(dst.get(0, 0), Rgba::BLACK);
    }
}
