//! The pipeline state machine and its driver.

#[cfg(feature = "fp")]
use crate::math::angle::Angle;
use crate::math::color::Rgb565;
use crate::math::mat::{self, Mat4};
use crate::math::vec::{Vec3, Vec4, vec3};

use super::canvas::{Canvas, ScreenPt, ShadedPt};
use super::raster::Projected;
use super::{
    ClearMask, Clip, Context, MAX_VERTICES, MatrixMode, MatrixStack,
    Primitive, Stats, Status, Vertex, VertexBuf, View,
};

/// A fixed-function rendering pipeline bound to a canvas of type `C`.
///
/// The pipeline holds two matrices, model-view and projection, of which
/// one is *current* as selected by [`set_mode`][Self::set_mode]. Matrix
/// operations act on the current matrix only. Vertices are accumulated
/// between [`begin`][Self::begin] and [`end`][Self::end]; the latter
/// transforms, shades, and rasterizes them.
///
/// No method panics. Anomalous requests, such as pushing onto a full
/// matrix stack or ending a primitive with no canvas bound, are dropped
/// and reported by the returned [`Status`] and in [`stats`][Self::stats].
///
/// # Examples
/// ```
/// use ledgl_core::prelude::*;
///
/// let mut gl = Pipeline::new(Buf2::<Rgb565>::new_default(16, 16));
/// gl.set_mode(MatrixMode::Projection);
/// gl.load_identity();
/// gl.ortho(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
///
/// gl.set_mode(MatrixMode::ModelView);
/// gl.load_identity();
///
/// gl.begin(Primitive::TriangleStrip);
/// gl.submit(vertex(-1.0, -1.0, 0.0));
/// gl.submit(vertex(1.0, -1.0, 0.0));
/// gl.submit(vertex(0.0, 1.0, 0.0));
/// assert_eq!(gl.end(), Status::Ok);
/// assert_eq!(gl.stats.draws, 3);
/// ```
#[derive(Debug)]
pub struct Pipeline<C> {
    /// Rendering parameters.
    pub ctx: Context,
    /// Accumulated statistics.
    pub stats: Stats,

    canvas: Option<C>,
    mode: MatrixMode,
    mats: [Mat4; 2],
    stack: MatrixStack,
    verts: VertexBuf,
}

/// Forwards draw calls to a canvas, counting them.
struct Counted<'a> {
    inner: &'a mut dyn Canvas,
    draws: usize,
}

//
// Inherent impls
//

impl<C: Canvas> Pipeline<C> {
    /// Returns a new pipeline drawing on `canvas`.
    ///
    /// Both matrices are initially the identity, and the current matrix
    /// mode is [`MatrixMode::Projection`].
    pub fn new(canvas: C) -> Self {
        Self {
            canvas: Some(canvas),
            ..Self::unbound()
        }
    }

    /// Returns a new pipeline with no canvas bound.
    ///
    /// Until a canvas is [bound][Self::bind], ending a primitive draws
    /// nothing.
    pub fn unbound() -> Self {
        Self {
            ctx: Context::default(),
            stats: Stats::new(),
            canvas: None,
            mode: MatrixMode::default(),
            mats: [Mat4::IDENTITY; 2],
            stack: MatrixStack::new(),
            verts: VertexBuf::new(),
        }
    }

    //
    // Canvas binding
    //

    /// Binds `canvas` as the render target, returning the previously
    /// bound canvas, if any.
    pub fn bind(&mut self, canvas: C) -> Option<C> {
        self.canvas.replace(canvas)
    }
    /// Unbinds and returns the current canvas, if any.
    pub fn unbind(&mut self) -> Option<C> {
        self.canvas.take()
    }
    /// Returns a reference to the bound canvas, if any.
    pub fn canvas(&self) -> Option<&C> {
        self.canvas.as_ref()
    }
    /// Returns a mutable reference to the bound canvas, if any.
    pub fn canvas_mut(&mut self) -> Option<&mut C> {
        self.canvas.as_mut()
    }

    //
    // Matrix state
    //

    /// Selects the matrix that subsequent matrix operations act on.
    ///
    /// Accepts a [`MatrixMode`] or a raw mode code (see
    /// [`MatrixMode::try_from`]). If `mode` is not a valid mode, the
    /// current mode is kept and `Status::Rejected` returned.
    pub fn set_mode<M: TryInto<MatrixMode>>(&mut self, mode: M) -> Status {
        match mode.try_into() {
            Ok(mode) => {
                self.mode = mode;
                Status::Ok
            }
            Err(_) => {
                log::debug!("set_mode: invalid mode ignored");
                Status::Rejected
            }
        }
    }

    /// Returns the current matrix mode.
    #[inline]
    pub fn mode(&self) -> MatrixMode {
        self.mode
    }
    /// Returns the matrix of `mode`.
    #[inline]
    pub fn matrix(&self, mode: MatrixMode) -> &Mat4 {
        &self.mats[mode.index()]
    }
    /// Returns the current matrix.
    #[inline]
    pub fn current(&self) -> &Mat4 {
        self.matrix(self.mode)
    }
    fn current_mut(&mut self) -> &mut Mat4 {
        &mut self.mats[self.mode.index()]
    }

    /// Replaces the current matrix with `m`.
    pub fn load(&mut self, m: &Mat4) {
        *self.current_mut() = *m;
    }
    /// Replaces the current matrix with the identity.
    pub fn load_identity(&mut self) {
        self.load(&Mat4::IDENTITY);
    }
    /// Multiplies the current matrix by `m` from the right.
    ///
    /// As a result, `m` is applied to vertices *before* any transform
    /// already in the current matrix.
    pub fn mult(&mut self, m: &Mat4) {
        let cur = self.current_mut();
        *cur = cur.compose(m);
    }

    /// Saves a copy of the current matrix on the matrix stack.
    ///
    /// If the stack is full, does nothing and returns `Status::Overflow`.
    pub fn push(&mut self) -> Status {
        let status = self.stack.push(&self.mats[self.mode.index()]);
        if status == Status::Overflow {
            log::debug!("push: matrix stack full, {:?} not saved", self.mode);
            self.stats.overflows += 1;
        }
        status
    }

    /// Restores the current matrix from the top of the matrix stack.
    ///
    /// If the stack is empty, does nothing and returns `Status::Underflow`.
    pub fn pop(&mut self) -> Status {
        let Some(m) = self.stack.pop() else {
            log::debug!("pop: matrix stack empty, {:?} kept", self.mode);
            self.stats.underflows += 1;
            return Status::Underflow;
        };
        self.load(&m);
        Status::Ok
    }

    //
    // Transforms
    //

    /// Multiplies the current matrix by an orthographic projection that
    /// maps the box [l, r] × [b, t] × [-near, -far] to the unit cube.
    pub fn ortho(&mut self, l: f32, r: f32, b: f32, t: f32, near: f32, far: f32) {
        self.mult(&mat::orthographic(l..r, b..t, near..far));
    }
    /// Equivalent to `self.ortho(l, r, b, t, -1.0, 1.0)`.
    pub fn ortho_2d(&mut self, l: f32, r: f32, b: f32, t: f32) {
        self.ortho(l, r, b, t, -1.0, 1.0);
    }

    /// Multiplies the current matrix by a perspective projection of the
    /// frustum with near-plane bounds [l, r] × [b, t] and depth range
    /// [near, far].
    pub fn frustum(&mut self, l: f32, r: f32, b: f32, t: f32, near: f32, far: f32) {
        self.mult(&mat::frustum(l..r, b..t, near..far));
    }

    /// Multiplies the current matrix by a symmetric perspective projection
    /// with vertical field of view `fov_y` and aspect ratio `aspect`, the
    /// ratio of width to height.
    #[cfg(feature = "fp")]
    pub fn perspective(&mut self, fov_y: Angle, aspect: f32, near: f32, far: f32) {
        self.mult(&mat::perspective(fov_y, aspect, near..far));
    }

    /// Multiplies the current matrix by a rotation of `angle` about the
    /// axis (x, y, z). The axis need not be normalized.
    ///
    /// If the axis has zero length, does nothing and returns
    /// `Status::Degenerate`.
    #[cfg(feature = "fp")]
    pub fn rotate(&mut self, angle: Angle, x: f32, y: f32, z: f32) -> Status {
        let Some(m) = mat::rotate(angle, vec3(x, y, z)) else {
            log::debug!("rotate: zero-length axis, rotation ignored");
            return Status::Degenerate;
        };
        self.mult(&m);
        Status::Ok
    }

    /// Multiplies the current matrix by a translation by (x, y, z).
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.mult(&mat::translate(vec3(x, y, z)));
    }
    /// Multiplies the current matrix by a scaling by (x, y, z).
    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.mult(&mat::scale(vec3(x, y, z)));
    }

    /// Multiplies the current matrix by a view transform with the eye at
    /// `eye`, looking at `center`, with `up` pointing approximately up.
    ///
    /// If `eye` and `center` coincide, or `up` is parallel to the view
    /// direction, does nothing and returns `Status::Degenerate`.
    pub fn look_at(&mut self, eye: Vec3, center: Vec3, up: Vec3) -> Status {
        let Some(m) = mat::look_at(eye, center, up) else {
            log::debug!("look_at: degenerate basis, view ignored");
            return Status::Degenerate;
        };
        self.mult(&m);
        Status::Ok
    }

    //
    // Drawing
    //

    /// Clears the buffers selected by `mask`.
    ///
    /// Clearing [`ClearMask::COLOR`] fills the canvas with
    /// `ctx.clear_color`. There is no depth buffer, so
    /// [`ClearMask::DEPTH`] is ignored. Returns `Status::Unbound` if no
    /// canvas is bound.
    pub fn clear(&mut self, mask: ClearMask) -> Status {
        let Some(canvas) = self.canvas.as_mut() else {
            return Status::Unbound;
        };
        if mask.contains(ClearMask::COLOR) {
            canvas.fill_screen(self.ctx.clear_color);
        }
        Status::Ok
    }

    /// Sets the side length of points in pixels.
    pub fn point_size(&mut self, size: u32) {
        self.ctx.point_size = size;
    }

    /// Starts a new primitive of kind `prim`, discarding any buffered
    /// vertices.
    pub fn begin(&mut self, prim: Primitive) {
        self.verts.begin(prim);
    }

    /// Adds a vertex to the current primitive.
    ///
    /// Accepts a [`Vertex`] or anything convertible to one, such as an
    /// `[x, y, z]` array. If the vertex buffer already holds
    /// [`MAX_VERTICES`] vertices, drops the vertex and returns
    /// `Status::Overflow`.
    pub fn submit(&mut self, v: impl Into<Vertex>) -> Status {
        self.stats.verts.i += 1;
        let status = self.verts.push(v.into());
        if status == Status::Overflow {
            log::trace!("submit: vertex buffer full, vertex dropped");
            self.stats.dropped += 1;
        }
        status
    }

    /// Ends the current primitive, drawing it on the bound canvas.
    ///
    /// Every buffered vertex is transformed to normalized device
    /// coordinates by the projection and model-view matrices, and shaded
    /// by its view-space distance from the eye as configured by
    /// `ctx.falloff`. The vertices are then rasterized as specified by the
    /// current [`Primitive`].
    ///
    /// Returns
    /// * `Status::Unbound` if no canvas is bound,
    /// * `Status::Rejected` if the primitive kind is not rasterized,
    /// * `Status::Degenerate` if there are too few vertices,
    /// * `Status::Clipped` if some or all vertices were out of range,
    ///
    /// and `Status::Ok` otherwise. The buffered vertices and primitive
    /// kind are kept until the next `begin`.
    pub fn end(&mut self) -> Status {
        let prim = self.verts.prim();
        let n = self.verts.len();
        self.stats.prims.i += 1;

        let Some(canvas) = self.canvas.as_mut() else {
            log::debug!("end: no canvas bound, {prim:?} dropped");
            return Status::Unbound;
        };
        let Some(raster) = prim.rasterizer() else {
            log::debug!("end: {prim:?} not rasterized, {n} vertices dropped");
            return Status::Rejected;
        };

        let mv = &self.mats[MatrixMode::ModelView.index()];
        let mvp = self.mats[MatrixMode::Projection.index()].compose(mv);
        let falloff = &self.ctx.falloff;

        let mut projected = [Projected::default(); MAX_VERTICES];
        for (p, v) in projected.iter_mut().zip(self.verts.as_slice()) {
            let clip: Vec4<Clip> = mvp.apply(&v.pos);
            let eye: Vec4<View> = mv.apply(&v.pos);
            let dist_sqr = eye.xyz().len_sqr();
            *p = Projected {
                ndc: clip.project_to_real().to(),
                color: v.color,
                dist_sqr,
                brightness: falloff.brightness(dist_sqr),
            };
        }

        let mut canvas = Counted { inner: canvas, draws: 0 };
        let status = raster(&projected[..n], &self.ctx, &mut canvas);

        self.stats.draws += canvas.draws;
        if canvas.draws > 0 {
            self.stats.prims.o += 1;
        }
        if status.is_ok() {
            self.stats.verts.o += n;
            log::trace!("end: {prim:?} with {n} vertices drawn");
        } else {
            log::debug!("end: {prim:?} with {n} vertices: {status}");
        }
        status
    }
}

impl<C: Canvas> Default for Pipeline<C> {
    /// Returns an unbound pipeline.
    fn default() -> Self {
        Self::unbound()
    }
}

impl Canvas for Counted<'_> {
    fn width(&self) -> u32 {
        self.inner.width()
    }
    fn height(&self) -> u32 {
        self.inner.height()
    }
    fn fill_screen(&mut self, color: Rgb565) {
        self.inner.fill_screen(color);
    }
    fn draw_pixel(&mut self, pt: ScreenPt, color: Rgb565) {
        self.draws += 1;
        self.inner.draw_pixel(pt, color);
    }
    fn draw_line(&mut self, from: ScreenPt, to: ScreenPt, color: Rgb565) {
        self.draws += 1;
        self.inner.draw_line(from, to, color);
    }
    fn draw_shaded_line(&mut self, from: ShadedPt, to: ShadedPt) {
        self.draws += 1;
        self.inner.draw_shaded_line(from, to);
    }
}

#[cfg(test)]
mod tests {
    use crate::math::vec::vec4;
    use crate::render::vertex;
    use crate::util::buf::Buf2;

    use super::*;

    type Gl = Pipeline<Buf2<Rgb565>>;

    fn gl(w: usize, h: usize) -> Gl {
        let mut gl = Pipeline::new(Buf2::new_default(w, h));
        gl.ctx.point_color = Rgb565::WHITE;
        gl.ctx.wire_color = Rgb565::WHITE;
        gl
    }

    fn lit(gl: &Gl) -> usize {
        let buf = gl.canvas().expect("canvas should be bound");
        buf.data().iter().filter(|&&c| c != Rgb565::BLACK).count()
    }

    #[test]
    fn initial_state() {
        let gl = Gl::unbound();
        assert_eq!(gl.mode(), MatrixMode::Projection);
        assert_eq!(gl.matrix(MatrixMode::ModelView), &Mat4::IDENTITY);
        assert_eq!(gl.matrix(MatrixMode::Projection), &Mat4::IDENTITY);
        assert!(gl.canvas().is_none());
    }

    #[test]
    fn set_mode_rejects_invalid_codes() {
        let mut gl = Gl::unbound();
        assert_eq!(gl.set_mode(0_u32), Status::Ok);
        assert_eq!(gl.mode(), MatrixMode::ModelView);
        assert_eq!(gl.set_mode(7_u32), Status::Rejected);
        assert_eq!(gl.mode(), MatrixMode::ModelView);
    }

    #[test]
    fn transforms_act_on_current_matrix_only() {
        let mut gl = Gl::unbound();
        gl.set_mode(MatrixMode::ModelView);
        gl.translate(1.0, 2.0, 3.0);
        assert_eq!(gl.matrix(MatrixMode::Projection), &Mat4::IDENTITY);
        assert_eq!(gl.current().get(1, 3), 2.0);
    }

    #[test]
    fn mult_right_multiplies() {
        let mut gl = Gl::unbound();
        gl.translate(1.0, 0.0, 0.0);
        gl.scale(2.0, 2.0, 2.0);
        // Scale applies first, then translate
        let v: Vec4 = gl.current().apply(&vec4::<()>(1.0, 0.0, 0.0, 1.0));
        assert_eq!(v.0, [3.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn push_pop_restores_matrix() {
        let mut gl = Gl::unbound();
        gl.translate(1.0, 0.0, 0.0);
        let saved = *gl.current();
        assert_eq!(gl.push(), Status::Ok);
        gl.scale(5.0, 5.0, 5.0);
        assert_eq!(gl.pop(), Status::Ok);
        assert_eq!(gl.current(), &saved);
    }

    #[test]
    fn stack_overflow_and_underflow_are_counted() {
        let mut gl = Gl::unbound();
        for _ in 0..8 {
            assert_eq!(gl.push(), Status::Ok);
        }
        assert_eq!(gl.push(), Status::Overflow);
        for _ in 0..8 {
            assert_eq!(gl.pop(), Status::Ok);
        }
        assert_eq!(gl.pop(), Status::Underflow);
        assert_eq!((gl.stats.overflows, gl.stats.underflows), (1, 1));
    }

    #[cfg(feature = "fp")]
    #[test]
    fn rotate_zero_axis_is_noop() {
        use crate::assert_approx_eq;
        use crate::math::angle::degs;

        let mut gl = Gl::unbound();
        assert_eq!(gl.rotate(degs(90.0), 0.0, 0.0, 0.0), Status::Degenerate);
        assert_eq!(gl.current(), &Mat4::IDENTITY);
        assert_eq!(gl.rotate(degs(90.0), 0.0, 0.0, 2.0), Status::Ok);
        let v: Vec4 = gl.current().apply(&vec4::<()>(1.0, 0.0, 0.0, 1.0));
        assert_approx_eq!(v, vec4(0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn look_at_degenerate_is_noop() {
        let mut gl = Gl::unbound();
        let p = vec3(1.0, 2.0, 3.0);
        assert_eq!(gl.look_at(p, p, vec3(0.0, 1.0, 0.0)), Status::Degenerate);
        assert_eq!(gl.current(), &Mat4::IDENTITY);
    }

    #[test]
    fn submit_beyond_capacity_is_dropped() {
        let mut gl = Gl::unbound();
        gl.begin(Primitive::Points);
        for i in 0..MAX_VERTICES {
            assert_eq!(gl.submit([i as f32, 0.0, 0.0]), Status::Ok);
        }
        assert_eq!(gl.submit([0.0, 0.0, 0.0]), Status::Overflow);
        assert_eq!(gl.stats.verts.i, 25);
        assert_eq!(gl.stats.dropped, 1);
    }

    #[test]
    fn end_without_canvas_is_noop() {
        let mut gl = Gl::unbound();
        gl.begin(Primitive::Points);
        gl.submit(vertex(0.0, 0.0, 0.0));
        assert_eq!(gl.end(), Status::Unbound);
        assert_eq!(gl.stats.draws, 0);
    }

    #[test]
    fn end_with_unsupported_primitive_is_noop() {
        let mut gl = gl(4, 4);
        gl.begin(Primitive::Triangles);
        gl.submit(vertex(0.0, 0.0, 0.0));
        assert_eq!(gl.end(), Status::Rejected);

        gl.begin(Primitive::None);
        assert_eq!(gl.end(), Status::Rejected);
        assert_eq!(lit(&gl), 0);
    }

    #[test]
    fn end_draws_points() {
        let mut gl = gl(5, 5);
        gl.begin(Primitive::Points);
        gl.submit(vertex(0.0, 0.0, 0.0));
        gl.submit(vertex(-1.0, 1.0, 0.0));
        assert_eq!(gl.end(), Status::Ok);
        assert_eq!(lit(&gl), 2);
        assert_eq!(gl.stats.draws, 2);
        assert_eq!(gl.stats.prims.o, 1);
        assert_eq!(gl.stats.verts.o, 2);
    }

    #[test]
    fn end_uses_model_view_and_projection() {
        let mut gl = gl(5, 5);
        gl.ortho(0.0, 4.0, 0.0, 4.0, -1.0, 1.0);
        gl.set_mode(MatrixMode::ModelView);
        gl.translate(4.0, 0.0, 0.0);

        gl.begin(Primitive::Points);
        gl.submit(vertex(0.0, 4.0, 0.0));
        assert_eq!(gl.end(), Status::Ok);
        let buf = gl.canvas().expect("canvas should be bound");
        assert_eq!(buf[[4, 0]], Rgb565::WHITE);
    }

    #[test]
    fn clear_fills_with_clear_color() {
        let mut gl = gl(2, 2);
        gl.ctx.clear_color = Rgb565::WHITE;
        assert_eq!(gl.clear(ClearMask::DEPTH), Status::Ok);
        assert_eq!(lit(&gl), 0);
        assert_eq!(gl.clear(ClearMask::COLOR), Status::Ok);
        assert_eq!(lit(&gl), 4);
        assert_eq!(Gl::unbound().clear(ClearMask::COLOR), Status::Unbound);
    }

    #[test]
    fn bind_and_unbind() {
        let mut gl = Gl::unbound();
        assert!(gl.bind(Buf2::new_default(1, 1)).is_none());
        assert!(gl.bind(Buf2::new_default(2, 2)).is_some());
        assert_eq!(gl.unbind().map(|b| b.width()), Some(2));
        assert!(gl.canvas_mut().is_none());
    }

    #[test]
    fn point_size_sets_context() {
        let mut gl = gl(5, 5);
        gl.point_size(3);
        gl.begin(Primitive::Points);
        gl.submit(vertex(0.0, 0.0, 0.0));
        gl.end();
        assert_eq!(lit(&gl), 9);
    }
}
