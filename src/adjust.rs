//! Per-pixel tonal adjustments.
//!
//! All three work in the normalized float domain and saturate each channel
//! back into `[0.0, 1.0]` on the way out. Alpha is treated like any other
//! channel by [`brightness`] and [`contrast`].

use crate::color::{ColorF, Hsva, PixelFormat};
use crate::image::Canvas;

/// Midpoint that [`contrast`] pivots around
pub const CONTRAST_MIDPOINT: f32 = 0.5;

fn map_channels<C, F>(canvas: &mut C, mut f: F)
where
    C: Canvas + ?Sized,
    F: FnMut([f32; 4]) -> [f32; 4],
{
    for y in 0..canvas.height() as i32 {
        for x in 0..canvas.width() as i32 {
            let unit = canvas.get(x, y).to_unit();
            canvas.set(x, y, C::Color::from_unit(f(unit)));
        }
    }
}

/// Add `delta` to every channel
pub fn brightness<C: Canvas + ?Sized>(canvas: &mut C, delta: f32) {
    map_channels(canvas, |c| c.map(|v| v + delta));
}

/// Scale every channel's distance from the midpoint by `factor`
pub fn contrast<C: Canvas + ?Sized>(canvas: &mut C, factor: f32) {
    map_channels(canvas, |c| {
        c.map(|v| (v - CONTRAST_MIDPOINT) * factor + CONTRAST_MIDPOINT)
    });
}

/// Shift HSV saturation by `delta`, clamped to `[0.0, 1.0]`; hue, value and
/// alpha are preserved
pub fn saturation<C: Canvas + ?Sized>(canvas: &mut C, delta: f32) {
    map_channels(canvas, |c| {
        let mut hsv = Hsva::from(ColorF::from_array(c));
        hsv.s = (hsv.s + delta).clamp(0.0, 1.0);
        ColorF::from(hsv).to_array()
    });
}
