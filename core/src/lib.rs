//! Core functionality of the `ledgl` project.
//!
//! A small fixed-function 3D pipeline for displays that are addressed one
//! pixel at a time, such as LED panels and cubes. The API follows the shape
//! of a classic immediate-mode graphics library: two matrix slots with a
//! save/restore stack, the usual transform constructors, `begin`/`submit`/
//! `end` vertex submission, and rasterization of points, polygon outlines,
//! and triangle-strip wireframes with distance-based dimming.
//!
//! # Example
//! ```
//! use ledgl_core::prelude::*;
//!
//! let mut gl = Pipeline::new(Buf2::<Rgb565>::new_default(100, 100));
//!
//! gl.set_mode(MatrixMode::Projection);
//! gl.load_identity();
//! gl.ortho(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
//! gl.set_mode(MatrixMode::ModelView);
//! gl.load_identity();
//!
//! gl.begin(Primitive::Points);
//! gl.submit(vertex(0.0, 0.0, 0.0));
//! gl.end();
//!
//! let buf = gl.canvas().unwrap();
//! assert_eq!(buf[[49, 49]], gl.ctx.point_color);
//! ```
//!
//! # Crate features
//!
//! * `std`:
//!   Uses the floating-point functions of the standard library.
//!
//! * `libm`:
//!   Provides software implementations of floating-point functions via the
//!   [libm](https://crates.io/crates/libm) crate. Enabled by default.
//!
//! * `mm`:
//!   Provides fast approximate implementations of floating-point functions
//!   via the [micromath](https://crates.io/crates/micromath) crate.
//!
//! If none of these is enabled, only a fallback square root is available,
//! and the trigonometric transforms [`rotate`][render::Pipeline::rotate] and
//! [`perspective`][render::Pipeline::perspective] are not compiled in.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod math;
pub mod render;
pub mod util;

pub mod prelude {
    pub use crate::math::{
        Angle, Mat4, Rgb565, Vec3, Vec4, degs, frustum, look_at, orthographic,
        rads, rgb565, scale, translate, vec3, vec4,
    };
    #[cfg(feature = "fp")]
    pub use crate::math::{perspective, rotate};

    pub use crate::render::{
        Canvas, ClearMask, Context, Falloff, MatrixMode, Pipeline, Primitive,
        ScreenPt, ShadedPt, Stats, Status, Vertex, screen_pt, vertex,
    };

    pub use crate::util::buf::Buf2;
}
