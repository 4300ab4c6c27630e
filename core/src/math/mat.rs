//! Matrices and linear transforms.
//!
//! [`Mat4`] stores its elements in column-major order, so the element at
//! row `r` and column `c` lives at index `r + c * 4`. This matches the memory
//! layout that classic immediate-mode graphics APIs accept in their
//! load/multiply calls. Constructors take rows, however, so that matrix
//! literals in code read the way they are written on paper.
//!
//! Matrices are plain `Copy` values; composing two matrices always builds
//! the product in a fresh array, so there is no aliasing hazard in writing
//! `m = m.compose(&m)`.

use core::fmt::{self, Debug, Formatter};
use core::ops::{Mul, Range};

#[cfg(feature = "fp")]
use crate::math::angle::Angle;
use crate::math::approx::ApproxEq;
use crate::math::vec::{Vec3, Vec4, vec4};

/// A 4×4 matrix of `f32` in column-major order.
#[derive(Copy, Clone, PartialEq)]
#[repr(transparent)]
pub struct Mat4([f32; 16]);

impl Mat4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    /// Returns a matrix with the given elements in column-major order.
    #[inline]
    pub const fn new(cols: [f32; 16]) -> Self {
        Self(cols)
    }

    /// Returns a matrix with the given rows.
    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        let mut els = [0.0; 16];
        let mut r = 0;
        while r < 4 {
            let mut c = 0;
            while c < 4 {
                els[r + c * 4] = rows[r][c];
                c += 1;
            }
            r += 1;
        }
        Self(els)
    }

    /// Returns the elements of `self` in column-major order.
    #[inline]
    pub const fn to_cols_array(&self) -> [f32; 16] {
        self.0
    }

    /// Returns the element at row `r` and column `c`.
    ///
    /// # Panics
    /// If `r` or `c` is greater than 3.
    #[inline]
    pub const fn get(&self, r: usize, c: usize) -> f32 {
        assert!(r < 4 && c < 4);
        self.0[r + c * 4]
    }

    /// Returns the row with index `r`.
    #[inline]
    pub fn row(&self, r: usize) -> [f32; 4] {
        [0, 1, 2, 3].map(|c| self.get(r, c))
    }

    /// Returns the matrix product `self · other`.
    ///
    /// Applying the result to a vector is equivalent to applying first
    /// `other` and then `self`.
    pub fn compose(&self, other: &Self) -> Self {
        let (a, b) = (&self.0, &other.0);
        let mut els = [0.0; 16];
        for i in 0..4 {
            for j in 0..4 {
                els[i + j * 4] = (0..4)
                    .map(|k| a[i + k * 4] * b[k + j * 4])
                    .sum();
            }
        }
        Self(els)
    }

    /// Returns the matrix product `other · self`, that is, a matrix that
    /// applies first `self` and then `other`.
    #[inline]
    pub fn then(&self, other: &Self) -> Self {
        other.compose(self)
    }

    /// Applies `self` to the homogeneous vector `v`.
    ///
    /// The space tags of the input and output are independent; the output
    /// space is usually inferred from context.
    pub fn apply<Src, Dst>(&self, v: &Vec4<Src>) -> Vec4<Dst> {
        let m = &self.0;
        let [x, y, z, w] = v.0;
        vec4(
            m[0] * x + m[4] * y + m[8] * z + m[12] * w,
            m[1] * x + m[5] * y + m[9] * z + m[13] * w,
            m[2] * x + m[6] * y + m[10] * z + m[14] * w,
            m[3] * x + m[7] * y + m[11] * z + m[15] * w,
        )
    }

    /// Returns whether the bottom row of `self` is `(0, 0, 0, 1)`, that is,
    /// whether `self` is affine rather than projective.
    pub fn is_affine(&self) -> bool {
        self.row(3) == [0.0, 0.0, 0.0, 1.0]
    }
}

impl Default for Mat4 {
    /// Returns the identity matrix.
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.compose(&rhs)
    }
}

impl From<[f32; 16]> for Mat4 {
    fn from(cols: [f32; 16]) -> Self {
        Self(cols)
    }
}

impl Debug for Mat4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mat4[")?;
        for r in 0..4 {
            writeln!(f, "    {:6.2?}", self.row(r))?;
        }
        write!(f, "]")
    }
}

impl ApproxEq<Self, f32> for Mat4 {
    fn approx_eq_eps(&self, other: &Self, eps: &f32) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn relative_epsilon() -> f32 {
        f32::relative_epsilon()
    }
}

//
// Transform constructors
//

/// Returns a matrix applying a scaling by `s`.
pub fn scale(s: Vec3) -> Mat4 {
    let [x, y, z] = s.0;
    Mat4::from_rows([
        [x, 0.0, 0.0, 0.0],
        [0.0, y, 0.0, 0.0],
        [0.0, 0.0, z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a matrix applying a translation by `t`.
pub fn translate(t: Vec3) -> Mat4 {
    let [x, y, z] = t.0;
    Mat4::from_rows([
        [1.0, 0.0, 0.0, x],
        [0.0, 1.0, 0.0, y],
        [0.0, 0.0, 1.0, z],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a matrix applying a rotation by `angle` counterclockwise about
/// `axis`, or `None` if `axis` has zero length.
///
/// The axis need not be normalized.
#[cfg(feature = "fp")]
pub fn rotate(angle: Angle, axis: Vec3) -> Option<Mat4> {
    if axis.len_sqr() == 0.0 {
        return None;
    }
    let [x, y, z] = axis.normalize().0;
    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;

    Some(Mat4::from_rows([
        [x * x * t + c, x * y * t - z * s, x * z * t + y * s, 0.0],
        [y * x * t + z * s, y * y * t + c, y * z * t - x * s, 0.0],
        [x * z * t - y * s, y * z * t + x * s, z * z * t + c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]))
}

/// Returns an orthographic projection matrix mapping the box spanned by
/// `x`, `y`, and `-z` to the cube [-1, 1]³.
///
/// The near and far planes are given as distances from the viewer, so
/// `z: near..far` maps view-space z = -near to -1 and z = -far to 1.
pub fn orthographic(x: Range<f32>, y: Range<f32>, z: Range<f32>) -> Mat4 {
    let (l, r, b, t) = (x.start, x.end, y.start, y.end);
    let (n, f) = (z.start, z.end);
    Mat4::from_rows([
        [2.0 / (r - l), 0.0, 0.0, -(r + l) / (r - l)],
        [0.0, 2.0 / (t - b), 0.0, -(t + b) / (t - b)],
        [0.0, 0.0, -2.0 / (f - n), -(f + n) / (f - n)],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a perspective projection matrix for the frustum whose near
/// plane is the rectangle spanned by `x` and `y` at distance `z.start`,
/// and whose far plane is at distance `z.end`.
///
/// The bottom row is `(0, 0, -1, 0)`, so the projected w equals the
/// view-space depth -z and the perspective divide yields the foreshortening.
pub fn frustum(x: Range<f32>, y: Range<f32>, z: Range<f32>) -> Mat4 {
    let (l, r, b, t) = (x.start, x.end, y.start, y.end);
    let (n, f) = (z.start, z.end);

    let x_off = (r + l) / (r - l);
    let y_off = (t + b) / (t - b);
    let z_scale = -(f + n) / (f - n);
    let z_off = -(2.0 * f * n) / (f - n);

    Mat4::from_rows([
        [2.0 * n / (r - l), 0.0, x_off, 0.0],
        [0.0, 2.0 * n / (t - b), y_off, 0.0],
        [0.0, 0.0, z_scale, z_off],
        [0.0, 0.0, -1.0, 0.0],
    ])
}

/// Returns a symmetric perspective projection matrix with vertical field
/// of view `fov_y` and the given aspect ratio (width / height).
///
/// Equivalent to calling [`frustum`] with bounds derived from the field
/// of view at the near plane.
#[cfg(feature = "fp")]
pub fn perspective(fov_y: Angle, aspect: f32, z: Range<f32>) -> Mat4 {
    let top = z.start * (fov_y / 2.0).tan();
    let right = top * aspect;
    frustum(-right..right, -top..top, z)
}

/// Returns a view matrix for a camera at `eye` looking toward `center`,
/// with `up` giving the approximate upward direction, or `None` if the
/// view direction is zero or parallel to `up`.
///
/// The result is a rotation R whose rows are the camera basis vectors,
/// followed by a translation T by `-eye`: view = R · T.
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Option<Mat4> {
    let dir = center - eye;
    if dir.len_sqr() == 0.0 {
        return None;
    }
    let fwd = dir.normalize();
    let side = fwd.cross(&up);
    if side.len_sqr() == 0.0 {
        return None;
    }
    let side = side.normalize();
    let up = side.cross(&fwd);

    let rot = Mat4::from_rows([
        [side.x(), side.y(), side.z(), 0.0],
        [up.x(), up.y(), up.z(), 0.0],
        [-fwd.x(), -fwd.y(), -fwd.z(), 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    Some(rot.compose(&translate(-eye)))
}
