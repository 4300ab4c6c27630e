//! Vertices and the bounded vertex buffer.

use crate::math::color::Rgb565;
use crate::math::vec::{Vec4, vec4};

use super::{Model, Primitive, Status};

/// Default capacity of a [`VertexBuf`].
pub const MAX_VERTICES: usize = 24;

/// A vertex submitted to the pipeline: a homogeneous model-space position
/// and a color.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    pub pos: Vec4<Model>,
    pub color: Rgb565,
}

/// Returns a white vertex at (x, y, z) with w = 1.
///
/// Use [`Vertex::with_w`] and [`Vertex::with_color`] to override the
/// defaults.
///
/// # Examples
/// ```
/// use ledgl_core::prelude::*;
/// let v = vertex(1.0, 2.0, 3.0).with_color(rgb565(255, 0, 0));
/// assert_eq!(v.pos.w(), 1.0);
/// assert_eq!(v.color, Rgb565(0xF800));
/// ```
#[inline]
pub const fn vertex(x: f32, y: f32, z: f32) -> Vertex {
    Vertex {
        pos: vec4(x, y, z, 1.0),
        color: Rgb565::WHITE,
    }
}

impl Vertex {
    /// Returns `self` with the homogeneous coordinate set to `w`.
    #[must_use]
    pub const fn with_w(mut self, w: f32) -> Self {
        self.pos.0[3] = w;
        self
    }
    /// Returns `self` with color `color`.
    #[must_use]
    pub const fn with_color(mut self, color: Rgb565) -> Self {
        self.color = color;
        self
    }
}

impl Default for Vertex {
    /// Returns a white vertex at the origin.
    fn default() -> Self {
        vertex(0.0, 0.0, 0.0)
    }
}

impl From<[f32; 3]> for Vertex {
    fn from([x, y, z]: [f32; 3]) -> Self {
        vertex(x, y, z)
    }
}

impl From<[f32; 4]> for Vertex {
    fn from([x, y, z, w]: [f32; 4]) -> Self {
        vertex(x, y, z).with_w(w)
    }
}

impl From<([f32; 3], Rgb565)> for Vertex {
    fn from(([x, y, z], c): ([f32; 3], Rgb565)) -> Self {
        vertex(x, y, z).with_color(c)
    }
}

/// A fixed-capacity buffer of the vertices of one primitive, tagged with
/// the primitive kind.
#[derive(Clone, Debug)]
pub struct VertexBuf<const N: usize = MAX_VERTICES> {
    verts: [Vertex; N],
    len: usize,
    prim: Primitive,
}

impl<const N: usize> VertexBuf<N> {
    /// Returns a new empty buffer with no active primitive.
    pub const fn new() -> Self {
        Self {
            verts: [vertex(0.0, 0.0, 0.0); N],
            len: 0,
            prim: Primitive::None,
        }
    }

    /// Discards all vertices and sets the active primitive to `prim`.
    pub fn begin(&mut self, prim: Primitive) {
        self.prim = prim;
        self.len = 0;
    }

    /// Appends `v` to the buffer.
    ///
    /// If the buffer is full, drops `v` and returns `Status::Overflow`.
    pub fn push(&mut self, v: Vertex) -> Status {
        let Some(slot) = self.verts.get_mut(self.len) else {
            return Status::Overflow;
        };
        *slot = v;
        self.len += 1;
        Status::Ok
    }

    /// Returns the buffered vertices in submission order.
    pub fn as_slice(&self) -> &[Vertex] {
        &self.verts[..self.len]
    }

    /// Returns the active primitive.
    #[inline]
    pub const fn prim(&self) -> Primitive {
        self.prim
    }
    /// Returns the number of buffered vertices.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }
    /// Returns whether the buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<const N: usize> Default for VertexBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}
