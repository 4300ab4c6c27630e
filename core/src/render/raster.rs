//! Screen-space mapping and the per-primitive rasterization strategies.
//!
//! Each strategy receives the buffered vertices already transformed to
//! normalized device coordinates and shaded, and issues draw calls to the
//! canvas. None of them clip partially: points are dropped one by one,
//! outlines and wireframes all at once.

use crate::math::color::Rgb565;
use crate::math::vec::Vec3;

use super::canvas::{Canvas, ScreenPt, ShadedPt, screen_pt};
use super::{Context, Ndc, Status};

/// A vertex after projection, ready to be rasterized.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Projected {
    /// Position in normalized device coordinates.
    pub ndc: Vec3<Ndc>,
    /// The color of the vertex as submitted.
    pub color: Rgb565,
    /// Squared distance from the eye in view space.
    pub dist_sqr: f32,
    /// Brightness factor derived from `dist_sqr`.
    pub brightness: f32,
}

/// Signature of a rasterization strategy.
pub type RasterFn = fn(&[Projected], &Context, &mut dyn Canvas) -> Status;

/// Maps the x and y of a point in normalized device coordinates to a pixel
/// position on a `w` × `h` canvas.
///
/// The range [-1, 1] maps to [0, w - 1] horizontally and to [h - 1, 0]
/// vertically, that is, +y points up in device space but down in screen
/// space. Fractional positions are truncated toward zero.
///
/// # Examples
/// ```
/// use ledgl_core::math::vec3;
/// use ledgl_core::render::{raster::to_screen, screen_pt};
/// assert_eq!(to_screen(vec3(0.0, 0.0, 0.0), 100, 100), screen_pt(49, 49));
/// assert_eq!(to_screen(vec3(-1.0, 1.0, 0.0), 100, 100), screen_pt(0, 0));
/// assert_eq!(to_screen(vec3(1.0, -1.0, 0.0), 100, 100), screen_pt(99, 99));
/// ```
pub fn to_screen(ndc: Vec3<Ndc>, w: u32, h: u32) -> ScreenPt {
    let (w, h) = (w as f32 - 1.0, h as f32 - 1.0);
    let col = (ndc.x() + 1.0) / 2.0 * w;
    let row = (1.0 - (ndc.y() + 1.0) / 2.0) * h;
    screen_pt(col as i32, row as i32)
}

/// Returns whether `v` is within the range [-1, 1]. NaN is not.
#[inline]
pub fn in_unit(v: f32) -> bool {
    (-1.0..=1.0).contains(&v)
}

/// Returns whether every vertex in `vs` has a depth within [-1, 1].
fn all_in_depth(vs: &[Projected]) -> bool {
    vs.iter().all(|v| in_unit(v.ndc.z()))
}

/// Draws each vertex as a filled square of side `ctx.point_size` in
/// `ctx.point_color`.
///
/// Points outside the unit cube on any axis are skipped. Returns
/// `Status::Clipped` if any point was skipped.
pub fn points(vs: &[Projected], ctx: &Context, canvas: &mut dyn Canvas) -> Status {
    let (w, h) = (canvas.width(), canvas.height());
    let size = ctx.point_size.max(1) as i32;
    let mut status = Status::Ok;

    for v in vs {
        let [x, y, z] = v.ndc.0;
        if !(in_unit(x) && in_unit(y) && in_unit(z)) {
            status = Status::Clipped;
            continue;
        }
        let ScreenPt { x: x0, y: y0 } = to_screen(v.ndc, w, h);
        let (x0, y0) = (x0 - size / 2, y0 - size / 2);
        for y in y0..y0 + size {
            for x in x0..x0 + size {
                canvas.draw_pixel(screen_pt(x, y), ctx.point_color);
            }
        }
    }
    status
}

/// Draws the closed outline of the polygon formed by `vs`.
///
/// Each edge is a shaded line whose endpoints carry the vertex colors
/// dimmed by their brightness, with the squared eye distances as depths.
/// A polygon of two vertices draws its single edge twice.
///
/// Requires at least two vertices, all within the depth range; otherwise
/// draws nothing.
pub fn polygon(vs: &[Projected], _: &Context, canvas: &mut dyn Canvas) -> Status {
    if vs.len() < 2 {
        return Status::Degenerate;
    }
    if !all_in_depth(vs) {
        return Status::Clipped;
    }
    let (w, h) = (canvas.width(), canvas.height());
    let shaded = |v: &Projected| ShadedPt {
        pos: to_screen(v.ndc, w, h),
        depth: v.dist_sqr,
        color: v.color.dim(v.brightness),
    };
    for (i, a) in vs.iter().enumerate() {
        let b = &vs[(i + 1) % vs.len()];
        canvas.draw_shaded_line(shaded(a), shaded(b));
    }
    Status::Ok
}

/// Draws the edges of every triangle of the strip formed by `vs` in
/// `ctx.wire_color`.
///
/// Triangle i consists of vertices i, i + 1, and i + 2. Edges shared by
/// adjacent triangles are drawn once per triangle.
///
/// Requires at least three vertices, all within the depth range; otherwise
/// draws nothing.
pub fn strip(vs: &[Projected], ctx: &Context, canvas: &mut dyn Canvas) -> Status {
    if vs.len() < 3 {
        return Status::Degenerate;
    }
    if !all_in_depth(vs) {
        return Status::Clipped;
    }
    let (w, h) = (canvas.width(), canvas.height());
    for tri in vs.windows(3) {
        let [a, b, c] = [0, 1, 2].map(|i| to_screen(tri[i].ndc, w, h));
        canvas.draw_line(a, b, ctx.wire_color);
        canvas.draw_line(a, c, ctx.wire_color);
        canvas.draw_line(b, c, ctx.wire_color);
    }
    Status::Ok
}
