//! Turning 3D geometry into pixels on a canvas.
//!
//! This module constitutes the fixed-function pipeline of `ledgl`. The
//! [`Pipeline`] holds the [matrix state][stack], the [vertex buffer][vbuf],
//! and the [canvas][canvas] binding. On [`end`][Pipeline::end] it transforms
//! the buffered vertices into normalized device coordinates, computes a
//! [distance-based brightness][shade] for each, and hands them to the
//! [rasterizer][raster] strategy of the active [primitive][prim].

pub mod canvas;
pub mod ctx;
pub mod pipeline;
pub mod prim;
pub mod raster;
pub mod shade;
pub mod stack;
pub mod stats;
pub mod status;
pub mod vbuf;

pub use {
    canvas::{Canvas, ScreenPt, ShadedPt, screen_pt},
    ctx::{ClearMask, Context},
    pipeline::Pipeline,
    prim::Primitive,
    shade::Falloff,
    stack::{MAX_MATRICES, MatrixMode, MatrixStack},
    stats::{Stats, Throughput},
    status::Status,
    vbuf::{MAX_VERTICES, Vertex, VertexBuf, vertex},
};

/// Model (object) space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Model;

/// View (eye, camera) space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct View;

/// Homogeneous clip space coordinate basis, before the perspective divide.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Clip;

/// NDC space coordinate basis (normalized device coordinates).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Ndc;
