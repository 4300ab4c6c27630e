//! Real vectors in three and four (homogeneous) dimensions.

use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;
use core::ops::{Add, Index, Mul, Neg, Sub};

use crate::math::approx::ApproxEq;

//
// Types
//

/// A generic vector type.
///
/// # Type parameters
/// * `Repr`: the representation of the components of `Self`.
/// * `Space`: a tag type for the coordinate space `Self` is embedded in.
///   Vectors in different spaces cannot be mixed without an explicit
///   [`to`][Vector::to] conversion.
#[repr(transparent)]
pub struct Vector<Repr, Space = ()>(pub Repr, PhantomData<Space>);

/// A 3-vector with `f32` components.
pub type Vec3<Space = ()> = Vector<[f32; 3], Space>;

/// A homogeneous 4-vector with `f32` components.
pub type Vec4<Space = ()> = Vector<[f32; 4], Space>;

//
// Free fns
//

/// Returns a 3-vector with components `x`, `y`, and `z`.
pub const fn vec3<Sp>(x: f32, y: f32, z: f32) -> Vec3<Sp> {
    Vector([x, y, z], PhantomData)
}

/// Returns a 4-vector with components `x`, `y`, `z`, and `w`.
pub const fn vec4<Sp>(x: f32, y: f32, z: f32, w: f32) -> Vec4<Sp> {
    Vector([x, y, z, w], PhantomData)
}

//
// Inherent impls
//

impl<Sp, const N: usize> Vector<[f32; N], Sp> {
    /// Returns `self` tagged with another space, without modifying its
    /// components.
    #[inline]
    pub fn to<Sp2>(self) -> Vector<[f32; N], Sp2> {
        Vector(self.0, PhantomData)
    }

    /// Returns the dot product of `self` and `other`.
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        let mut res = 0.0;
        for i in 0..N {
            res += self.0[i] * other.0[i];
        }
        res
    }

    /// Returns the squared Euclidean length of `self`.
    #[inline]
    pub fn len_sqr(&self) -> f32 {
        self.dot(self)
    }

    /// Returns the Euclidean length of `self`.
    #[inline]
    pub fn len(&self) -> f32 {
        use crate::math::float::f32;
        f32::sqrt(self.len_sqr())
    }

    /// Returns `self` divided by its length.
    ///
    /// Every component of the result is NaN if `self` has length zero,
    /// whichever float backend is in use. Callers that can receive
    /// degenerate input should check [`len_sqr`] first.
    ///
    /// [`len_sqr`]: Self::len_sqr
    #[inline]
    pub fn normalize(&self) -> Self {
        if self.len_sqr() == 0.0 {
            return Self(self.0.map(|_| f32::NAN), PhantomData);
        }
        let len = self.len();
        Self(self.0.map(|c| c / len), PhantomData)
    }
}

impl<Sp> Vec3<Sp> {
    #[inline]
    pub const fn x(&self) -> f32 {
        self.0[0]
    }
    #[inline]
    pub const fn y(&self) -> f32 {
        self.0[1]
    }
    #[inline]
    pub const fn z(&self) -> f32 {
        self.0[2]
    }

    /// Returns the cross product of `self` and `other`.
    ///
    /// # Examples
    /// ```
    /// use ledgl_core::math::{vec3, Vec3};
    /// let x: Vec3 = vec3(1.0, 0.0, 0.0);
    /// assert_eq!(x.cross(&vec3(0.0, 1.0, 0.0)), vec3(0.0, 0.0, 1.0));
    /// ```
    pub fn cross(&self, other: &Self) -> Self {
        let [a, b, c] = self.0;
        let [d, e, f] = other.0;
        vec3(b * f - c * e, c * d - a * f, a * e - b * d)
    }

    /// Returns a homogeneous vector with the components of `self`
    /// and the given `w`.
    #[inline]
    pub fn extend(self, w: f32) -> Vec4<Sp> {
        let [x, y, z] = self.0;
        vec4(x, y, z, w)
    }
}

impl<Sp> Vec4<Sp> {
    #[inline]
    pub const fn x(&self) -> f32 {
        self.0[0]
    }
    #[inline]
    pub const fn y(&self) -> f32 {
        self.0[1]
    }
    #[inline]
    pub const fn z(&self) -> f32 {
        self.0[2]
    }
    #[inline]
    pub const fn w(&self) -> f32 {
        self.0[3]
    }

    /// Returns the x, y, and z components of `self`, dropping w.
    #[inline]
    pub const fn xyz(&self) -> Vec3<Sp> {
        vec3(self.x(), self.y(), self.z())
    }

    /// Returns the x, y, and z components of `self` divided by w.
    ///
    /// No check is made for `w` = 0; the result is then infinite or NaN.
    #[inline]
    pub fn project_to_real(&self) -> Vec3<Sp> {
        let w = self.w();
        vec3(self.x() / w, self.y() / w, self.z() / w)
    }
}

//
// Trait impls
//

impl<R: Copy, Sp> Copy for Vector<R, Sp> {}

impl<R: Clone, Sp> Clone for Vector<R, Sp> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<R: Default, Sp> Default for Vector<R, Sp> {
    fn default() -> Self {
        Self(R::default(), PhantomData)
    }
}

impl<R: PartialEq, Sp> PartialEq for Vector<R, Sp> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R: Debug, Sp> Debug for Vector<R, Sp> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Vec{:?}", self.0)
    }
}

impl<R, Sp> From<R> for Vector<R, Sp> {
    #[inline]
    fn from(els: R) -> Self {
        Self(els, PhantomData)
    }
}

impl<Sp, const N: usize> Index<usize> for Vector<[f32; N], Sp> {
    type Output = f32;
    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.0[i]
    }
}

impl<Sp, const N: usize> Add for Vector<[f32; N], Sp> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(core::array::from_fn(|i| self.0[i] + rhs.0[i]), PhantomData)
    }
}

impl<Sp, const N: usize> Sub for Vector<[f32; N], Sp> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(core::array::from_fn(|i| self.0[i] - rhs.0[i]), PhantomData)
    }
}

impl<Sp, const N: usize> Mul<f32> for Vector<[f32; N], Sp> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self(self.0.map(|c| c * rhs), PhantomData)
    }
}

impl<Sp, const N: usize> Neg for Vector<[f32; N], Sp> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self(self.0.map(|c| -c), PhantomData)
    }
}

impl<Sp, const N: usize> ApproxEq<Self, f32> for Vector<[f32; N], Sp> {
    fn approx_eq_eps(&self, other: &Self, eps: &f32) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn relative_epsilon() -> f32 {
        f32::relative_epsilon()
    }
}
