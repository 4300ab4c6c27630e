//! Canvases, the pixel-addressable surfaces the pipeline draws on.
//!
//! The pipeline only ever issues a handful of calls to its canvas: clear,
//! set a pixel, draw a plain line, and draw a shaded line. Anything that
//! can do those, from an LED matrix driver to an in-memory framebuffer,
//! can be a render target by implementing [`Canvas`].

use crate::math::color::Rgb565;
use crate::util::buf::Buf2;

/// A point in screen space, in whole pixels.
///
/// Column `x` grows to the right and row `y` grows downward, with (0, 0) at
/// the top left corner. Coordinates may be negative or beyond the canvas
/// dimensions; canvases are expected to discard such pixels.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct ScreenPt {
    pub x: i32,
    pub y: i32,
}

/// One endpoint of a shaded line: a position, a depth value, and a color.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ShadedPt {
    pub pos: ScreenPt,
    /// Depth used to weight color interpolation. The pipeline passes the
    /// squared distance of the vertex from the eye.
    pub depth: f32,
    pub color: Rgb565,
}

/// Returns a screen point with column `x` and row `y`.
#[inline]
pub const fn screen_pt(x: i32, y: i32) -> ScreenPt {
    ScreenPt { x, y }
}

/// Trait for types that can be drawn on by the pipeline.
///
/// The trait is object safe; the rasterizers receive a `&mut dyn Canvas`.
pub trait Canvas {
    /// Returns the width of the drawable area in pixels.
    fn width(&self) -> u32;

    /// Returns the height of the drawable area in pixels.
    fn height(&self) -> u32;

    /// Fills the entire surface with `color`.
    fn fill_screen(&mut self, color: Rgb565);

    /// Sets the pixel at `pt` to `color`.
    ///
    /// Bounds checking is the responsibility of the implementation; the
    /// pipeline may pass positions outside the canvas, for example at the
    /// edges of a point square.
    fn draw_pixel(&mut self, pt: ScreenPt, color: Rgb565);

    /// Draws a one-pixel-wide line from `from` to `to`, inclusive.
    fn draw_line(&mut self, from: ScreenPt, to: ScreenPt, color: Rgb565);

    /// Draws a line whose color interpolates between the colors of the
    /// endpoints, using their depths to weight the interpolation.
    ///
    /// The exact interpolation law is up to the implementation.
    fn draw_shaded_line(&mut self, from: ShadedPt, to: ShadedPt);
}

/// Rasterizes a one-pixel-thick line from `from` to `to`, both inclusive,
/// using Bresenham's algorithm.
///
/// Invokes `pixel_fn` for each pixel, together with the fraction of the
/// way from `from` to `to`, in the range [0, 1].
pub fn line<F>(from: ScreenPt, to: ScreenPt, mut pixel_fn: F)
where
    F: FnMut(ScreenPt, f32),
{
    // i64 so that the deltas of extreme endpoints cannot overflow
    let (x0, y0) = (i64::from(from.x), i64::from(from.y));
    let (x1, y1) = (i64::from(to.x), i64::from(to.y));
    let (dx, dy) = ((x1 - x0).abs(), -(y1 - y0).abs());
    let (sx, sy) = ((x1 - x0).signum(), (y1 - y0).signum());
    let steps = dx.max(-dy);
    let recip = if steps == 0 { 0.0 } else { 1.0 / steps as f32 };

    let (mut x, mut y) = (x0, y0);
    let mut err = dx + dy;
    for i in 0..=steps {
        // Always between the endpoints, so the casts are lossless
        pixel_fn(screen_pt(x as i32, y as i32), i as f32 * recip);

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Clips the segment from `from` to `to` to the rectangle [0, w) × [0, h)
/// using the Liang–Barsky algorithm.
///
/// Returns the endpoints of the visible part, each paired with its
/// fraction of the way along the original segment, or `None` if no part
/// of the segment is visible.
pub fn clip_line(
    from: ScreenPt,
    to: ScreenPt,
    w: u32,
    h: u32,
) -> Option<[(ScreenPt, f32); 2]> {
    let (x0, y0) = (f64::from(from.x), f64::from(from.y));
    let (dx, dy) = (f64::from(to.x) - x0, f64::from(to.y) - y0);
    let (x_max, y_max) = (f64::from(w) - 1.0, f64::from(h) - 1.0);

    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [(-dx, x0), (dx, x_max - x0), (-dy, y0), (dy, y_max - y0)] {
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
    // Both points are inside the rectangle, so non-negative
    let at = |t: f64| {
        let x = x0 + t * dx + 0.5;
        let y = y0 + t * dy + 0.5;
        screen_pt(x as i32, y as i32)
    };
    Some([(at(t0), t0 as f32), (at(t1), t1 as f32)])
}

/// Returns the perspective-correct interpolation weight of `to` at the
/// linear fraction `t` of the way from a point at depth `d0` to one at
/// depth `d1`.
///
/// Falls back to `t` itself unless both depths are positive and finite.
pub fn depth_weight(t: f32, d0: f32, d1: f32) -> f32 {
    let valid = |d: f32| d.is_finite() && d > 0.0;
    if !(valid(d0) && valid(d1)) {
        return t;
    }
    let (w0, w1) = ((1.0 - t) / d0, t / d1);
    w1 / (w0 + w1)
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn width(&self) -> u32 {
        (**self).width()
    }
    fn height(&self) -> u32 {
        (**self).height()
    }
    fn fill_screen(&mut self, color: Rgb565) {
        (**self).fill_screen(color)
    }
    fn draw_pixel(&mut self, pt: ScreenPt, color: Rgb565) {
        (**self).draw_pixel(pt, color)
    }
    fn draw_line(&mut self, from: ScreenPt, to: ScreenPt, color: Rgb565) {
        (**self).draw_line(from, to, color)
    }
    fn draw_shaded_line(&mut self, from: ShadedPt, to: ShadedPt) {
        (**self).draw_shaded_line(from, to)
    }
}

/// An in-memory framebuffer canvas.
///
/// Pixels outside the buffer are silently discarded. Shaded lines blend
/// the endpoint colors per channel with perspective-correct weights.
impl Canvas for Buf2<Rgb565> {
    fn width(&self) -> u32 {
        Buf2::width(self) as u32
    }
    fn height(&self) -> u32 {
        Buf2::height(self) as u32
    }
    fn fill_screen(&mut self, color: Rgb565) {
        self.fill(color);
    }
    fn draw_pixel(&mut self, ScreenPt { x, y }: ScreenPt, color: Rgb565) {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if let Some(px) = self.get_mut(x, y) {
            *px = color;
        }
    }
    fn draw_line(&mut self, from: ScreenPt, to: ScreenPt, color: Rgb565) {
        let (w, h) = (Canvas::width(self), Canvas::height(self));
        let Some([(a, _), (b, _)]) = clip_line(from, to, w, h) else {
            return;
        };
        line(a, b, |pt, _| self.draw_pixel(pt, color));
    }
    fn draw_shaded_line(&mut self, from: ShadedPt, to: ShadedPt) {
        let (w, h) = (Canvas::width(self), Canvas::height(self));
        let Some([(a, t0), (b, t1)]) = clip_line(from.pos, to.pos, w, h)
        else {
            return;
        };
        line(a, b, |pt, s| {
            // Fraction along the unclipped line
            let t = t0 + s * (t1 - t0);
            let t = depth_weight(t, from.depth, to.depth);
            self.draw_pixel(pt, from.color.lerp(to.color, t));
        });
    }
}
