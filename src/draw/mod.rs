//! Shape rasterization.
//!
//! Every routine here goes through [`Canvas::set`] only, so clipping is the
//! canvas' job: anything drawn off the surface is silently dropped. Spans are
//! clamped up front where that is cheap so large shapes don't walk millions of
//! rejected pixels.

mod flood;

pub use flood::flood;

use crate::image::Canvas;

// ============================================================================
// Spans
// ============================================================================

/// Horizontal span from `x0` to `x1` inclusive (either order)
pub fn hline<C: Canvas + ?Sized>(canvas: &mut C, y: i32, x0: i32, x1: i32, color: C::Color) {
    let (x0, x1) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
    let width = canvas.width() as i64;
    if y < 0 || y as i64 >= canvas.height() as i64 || x0 as i64 >= width || x1 < 0 {
        return;
    }

    let end = (x1 as i64).min(width - 1) as i32;
    for x in x0.max(0)..=end {
        canvas.set(x, y, color);
    }
}

/// Vertical span from `y0` to `y1` inclusive (either order)
pub fn vline<C: Canvas + ?Sized>(canvas: &mut C, x: i32, y0: i32, y1: i32, color: C::Color) {
    let (y0, y1) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
    let height = canvas.height() as i64;
    if x < 0 || x as i64 >= canvas.width() as i64 || y0 as i64 >= height || y1 < 0 {
        return;
    }

    let end = (y1 as i64).min(height - 1) as i32;
    for y in y0.max(0)..=end {
        canvas.set(x, y, color);
    }
}

// ============================================================================
// Line
// ============================================================================

/// How far past the canvas edges a line endpoint may lie before the segment
/// is clipped
const LINE_GUARD: i64 = 1 << 16;

/// Radii above this are rasterized row by row instead of walked
const MAX_WALK_RADIUS: i64 = 1 << 16;

#[inline]
fn plot<C: Canvas + ?Sized>(canvas: &mut C, x: i64, y: i64, color: C::Color) {
    if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
        canvas.set(x, y, color);
    }
}

/// [`hline`] over wide coordinates, clamped just outside the canvas
fn span<C: Canvas + ?Sized>(canvas: &mut C, y: i64, x0: i64, x1: i64, color: C::Color) {
    let Ok(y) = i32::try_from(y) else {
        return;
    };
    let width = canvas.width() as i64;
    let clamp = |x: i64| x.clamp(-1, width) as i32;
    hline(canvas, y, clamp(x0), clamp(x1), color);
}

/// Draw a 1px line with Bresenham's algorithm.
///
/// Axis-aligned lines take the clamped span path. Endpoints further than
/// `LINE_GUARD` pixels outside the canvas are pulled in along the segment
/// first, so the walk stays proportional to the canvas size.
pub fn line<C: Canvas + ?Sized>(
    canvas: &mut C,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: C::Color,
) {
    if x0 == x1 {
        vline(canvas, x0, y0, y1, color);
        return;
    }
    if y0 == y1 {
        hline(canvas, y0, x0, x1, color);
        return;
    }

    let (width, height) = (canvas.width() as i64, canvas.height() as i64);
    let start = (i64::from(x0), i64::from(y0));
    let end = (i64::from(x1), i64::from(y1));
    let Some(((mut x, mut y), (x1, y1))) = clip_to_guard(start, end, width, height) else {
        return;
    };

    let dx = (x1 - x).abs();
    let dy = (y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = (if dx > dy { dx } else { -dy }) / 2;

    loop {
        plot(canvas, x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = err;
        if e2 > -dx {
            err -= dy;
            x += sx;
        }
        if e2 < dy {
            err += dx;
            y += sy;
        }
    }
}

/// Liang-Barsky clip against the canvas grown by `LINE_GUARD` on every side.
/// Segments already inside are returned untouched.
fn clip_to_guard(
    p0: (i64, i64),
    p1: (i64, i64),
    width: i64,
    height: i64,
) -> Option<((i64, i64), (i64, i64))> {
    let (min_x, min_y) = (-LINE_GUARD, -LINE_GUARD);
    let (max_x, max_y) = (width + LINE_GUARD, height + LINE_GUARD);
    let inside =
        |(x, y): (i64, i64)| (min_x..=max_x).contains(&x) && (min_y..=max_y).contains(&y);
    if inside(p0) && inside(p1) {
        return Some((p0, p1));
    }

    let (x0, y0) = (p0.0 as f64, p0.1 as f64);
    let dx = (p1.0 - p0.0) as f64;
    let dy = (p1.1 - p0.1) as f64;
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [
        (-dx, x0 - min_x as f64),
        (dx, max_x as f64 - x0),
        (-dy, y0 - min_y as f64),
        (dy, max_y as f64 - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else if p < 0.0 {
            t0 = t0.max(q / p);
        } else {
            t1 = t1.min(q / p);
        }
    }
    if t0 > t1 {
        return None;
    }

    let at = |t: f64| ((x0 + dx * t).round() as i64, (y0 + dy * t).round() as i64);
    Some((at(t0), at(t1)))
}

// ============================================================================
// Circle
// ============================================================================

/// Midpoint circle of radius `r` centred on `(xc, yc)`.
///
/// The outline is plotted with 4-way symmetry per step; `filled` adds the
/// horizontal span between each mirrored pair. Negative radii draw nothing.
/// Radii above `MAX_WALK_RADIUS` are drawn one canvas row at a time from the
/// integer square root instead.
pub fn circle<C: Canvas + ?Sized>(
    canvas: &mut C,
    xc: i32,
    yc: i32,
    r: i32,
    color: C::Color,
    filled: bool,
) {
    if r < 0 {
        return;
    }
    let (xc, yc, r) = (i64::from(xc), i64::from(yc), i64::from(r));
    if r > MAX_WALK_RADIUS {
        circle_rows(canvas, xc, yc, r, color, filled);
        return;
    }

    // Walk the second quadrant: x runs -r..0 while y runs 0..r
    let mut x = -r;
    let mut y = 0;
    let mut err = 2 - 2 * r;
    loop {
        plot(canvas, xc - x, yc + y, color);
        plot(canvas, xc - y, yc - x, color);
        plot(canvas, xc + x, yc - y, color);
        plot(canvas, xc + y, yc + x, color);

        if filled {
            span(canvas, yc - y, xc + x, xc - x, color);
            span(canvas, yc + y, xc + x, xc - x, color);
        }

        let step = err;
        if step <= y {
            y += 1;
            err += y * 2 + 1;
        }
        if step > x || err > y {
            x += 1;
            err += x * 2 + 1;
        }
        if x >= 0 {
            break;
        }
    }
}

/// Visits canvas rows only: each row within `r` of the centre gets the span
/// `±isqrt(r² - dy²)`, or for an outline the part of it not covered by the
/// next row outward.
fn circle_rows<C: Canvas + ?Sized>(
    canvas: &mut C,
    xc: i64,
    yc: i64,
    r: i64,
    color: C::Color,
    filled: bool,
) {
    let r2 = r * r;
    for py in 0..canvas.height() as i64 {
        let dy = (py - yc).abs();
        if dy > r {
            continue;
        }
        let outer = isqrt(r2 - dy * dy);
        if filled {
            span(canvas, py, xc - outer, xc + outer, color);
        } else {
            let inner = if dy < r {
                isqrt(r2 - (dy + 1) * (dy + 1)) + 1
            } else {
                0
            };
            let inner = inner.min(outer);
            span(canvas, py, xc + inner, xc + outer, color);
            span(canvas, py, xc - outer, xc - inner, color);
        }
    }
}

/// Floor of the square root of a non-negative `n`
fn isqrt(n: i64) -> i64 {
    let mut s = (n as f64).sqrt() as i64;
    while s * s > n {
        s -= 1;
    }
    while (s + 1) * (s + 1) <= n {
        s += 1;
    }
    s
}

// ============================================================================
// Rectangle
// ============================================================================

/// Axis-aligned `w x h` rectangle with its top-left corner at `(x, y)`.
///
/// A negative origin shrinks the extent; the far edges are clamped to the
/// canvas. The outline is drawn on the clamped box.
pub fn rectangle<C: Canvas + ?Sized>(
    canvas: &mut C,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    color: C::Color,
    filled: bool,
) {
    let (mut x, mut y, mut w, mut h) = (x as i64, y as i64, w as i64, h as i64);
    if x < 0 {
        w += x;
        x = 0;
    }
    if y < 0 {
        h += y;
        y = 0;
    }

    let (width, height) = (canvas.width() as i64, canvas.height() as i64);
    if w <= 0 || h <= 0 || x >= width || y >= height {
        return;
    }
    let x_end = (x + w - 1).min(width - 1) as i32;
    let y_end = (y + h - 1).min(height - 1) as i32;
    let (x, y) = (x as i32, y as i32);

    if filled {
        for row in y..=y_end {
            hline(canvas, row, x, x_end, color);
        }
    } else {
        hline(canvas, y, x, x_end, color);
        hline(canvas, y_end, x, x_end, color);
        vline(canvas, x, y, y_end, color);
        vline(canvas, x_end, y, y_end, color);
    }
}

// ============================================================================
// Triangle
// ============================================================================

/// Triangle through three vertices.
///
/// Outline mode draws the three edges. Filled mode scan-converts one row at a
/// time between the long edge (top to bottom vertex) and the two short edges,
/// switching at the middle vertex. A triangle whose vertices all share one row
/// draws nothing in either mode.
pub fn triangle<C: Canvas + ?Sized>(
    canvas: &mut C,
    v0: (i32, i32),
    v1: (i32, i32),
    v2: (i32, i32),
    color: C::Color,
    filled: bool,
) {
    if v0.1 == v1.1 && v0.1 == v2.1 {
        return;
    }
    if !filled {
        line(canvas, v0.0, v0.1, v1.0, v1.1, color);
        line(canvas, v1.0, v1.1, v2.0, v2.1, color);
        line(canvas, v2.0, v2.1, v0.0, v0.1, color);
        return;
    }

    let mut v = [v0, v1, v2];
    v.sort_by_key(|&(_, y)| y);
    let [(x0, y0), (x1, y1), (x2, y2)] = v.map(|(x, y)| (i64::from(x), i64::from(y)));

    let total = y2 - y0;
    let upper = y1 - y0;
    // Rows off the canvas are skipped without interpolating
    let last = y2.min(canvas.height() as i64 - 1);
    for py in y0.max(0)..=last {
        let i = py - y0;
        let second_half = i > upper || y1 == y0;
        let (start_x, end_x, seg_height, offset) = if second_half {
            (x1, x2, y2 - y1, upper)
        } else {
            (x0, x1, upper, 0)
        };

        let alpha = i as f64 / total as f64;
        // Flat segments step straight to their far end
        let beta = if seg_height == 0 {
            1.0
        } else {
            (i - offset) as f64 / seg_height as f64
        };

        let ax = x0 as f64 + (x2 - x0) as f64 * alpha;
        let bx = start_x as f64 + (end_x - start_x) as f64 * beta;
        span(canvas, py, ax as i64, bx as i64, color);
    }
}
