//! Linear algebra and other mathematics needed by the pipeline.
//!
//! Includes [vectors][self::vec], column-major 4×4 [matrices][mat] with the
//! standard transform constructors, [angles][angle], the packed
//! [color][color] type, and approximate equality comparisons for tests.

pub use {
    angle::{Angle, degs, rads},
    approx::ApproxEq,
    color::{Rgb565, rgb565},
    mat::{Mat4, frustum, look_at, orthographic, scale, translate},
    vec::{Vec3, Vec4, Vector, vec3, vec4},
};
#[cfg(feature = "fp")]
pub use mat::{perspective, rotate};

pub mod angle;
pub mod approx;
pub mod color;
pub mod float;
pub mod mat;
pub mod vec;
