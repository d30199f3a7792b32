use log::debug;

use crate::color::PixelFormat;
use crate::image::Canvas;

/// Replace the 4-connected region of same-colored pixels around `(x, y)`.
///
/// Scanline fill over an explicit work stack: each popped seed is widened to
/// its full run on the row, the run is painted, and one seed per matching run
/// on the rows above and below is queued. Colors compare in packed form so a
/// float color that quantizes to the seed color is a no-op rather than a
/// repaint loop.
pub fn flood<C: Canvas + ?Sized>(canvas: &mut C, x: i32, y: i32, color: C::Color) {
    if !canvas.in_bounds(x, y) {
        return;
    }
    let target = canvas.get(x, y).to_packed();
    if target == color.to_packed() {
        return;
    }

    let width = canvas.width() as i32;
    let height = canvas.height() as i32;
    let matches = |canvas: &C, px: i32, py: i32| canvas.get(px, py).to_packed() == target;

    let mut stack = vec![(x, y)];
    let mut painted = 0usize;
    while let Some((sx, sy)) = stack.pop() {
        if !matches(canvas, sx, sy) {
            continue;
        }

        let mut left = sx;
        while left > 0 && matches(canvas, left - 1, sy) {
            left -= 1;
        }
        let mut right = sx;
        while right + 1 < width && matches(canvas, right + 1, sy) {
            right += 1;
        }

        for px in left..=right {
            canvas.set(px, sy, color);
        }
        painted += (right - left + 1) as usize;

        for ny in [sy - 1, sy + 1] {
            if ny < 0 || ny >= height {
                continue;
            }
            let mut in_run = false;
            for px in left..=right {
                if matches(canvas, px, ny) {
                    if !in_run {
                        stack.push((px, ny));
                        in_run = true;
                    }
                } else {
                    in_run = false;
                }
            }
        }
    }

    debug!("flood from ({x}, {y}) painted {painted} pixels");
}
