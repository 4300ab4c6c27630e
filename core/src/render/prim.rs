//! Primitive kinds and their rasterization strategies.

use super::raster::{self, RasterFn};

/// The kind of primitive assembled from the vertices between
/// [`begin`][super::Pipeline::begin] and [`end`][super::Pipeline::end].
///
/// Only [`Points`][Self::Points], [`Polygon`][Self::Polygon], and
/// [`TriangleStrip`][Self::TriangleStrip] are rasterized. The other kinds
/// are accepted, so that callers written against the full set of classic
/// primitive modes keep working, but ending them draws nothing.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Primitive {
    /// No primitive is active.
    #[default]
    None,
    /// Each vertex is drawn as a filled square.
    Points,
    /// The vertices form a closed outline drawn with shaded lines.
    Polygon,
    /// The vertices form a triangle strip drawn as a wireframe.
    TriangleStrip,
    /// Separate line segments. Accepted, but not rasterized.
    Lines,
    /// A connected polyline. Accepted, but not rasterized.
    LineStrip,
    /// A closed polyline. Accepted, but not rasterized.
    LineLoop,
    /// Separate filled triangles. Accepted, but not rasterized.
    Triangles,
    /// A fan of triangles around the first vertex. Accepted, but not
    /// rasterized.
    TriangleFan,
    /// Separate quadrilaterals. Accepted, but not rasterized.
    Quads,
}

impl Primitive {
    /// Returns the rasterization strategy of `self`, or `None` if `self`
    /// is not supported.
    pub fn rasterizer(self) -> Option<RasterFn> {
        const TABLE: [(Primitive, RasterFn); 3] = [
            (Primitive::Points, raster::points),
            (Primitive::Polygon, raster::polygon),
            (Primitive::TriangleStrip, raster::strip),
        ];
        TABLE
            .iter()
            .find(|(p, _)| *p == self)
            .map(|&(_, f)| f)
    }
}
