//! Angular quantities.

use core::f32::consts::PI;
use core::fmt::{self, Debug, Formatter};
use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::math::approx::ApproxEq;

/// A scalar angular quantity.
///
/// Prevents confusion between degrees and radians by requiring the use of
/// one of the named constructors to create an `Angle`, as well as one of
/// the named getter methods to obtain the angle as a raw `f32` value.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Angle(f32);

const RADS_PER_DEG: f32 = PI / 180.0;

/// Returns an angle of `a` radians.
pub const fn rads(a: f32) -> Angle {
    Angle(a)
}

/// Returns an angle of `a` degrees.
pub const fn degs(a: f32) -> Angle {
    Angle(a * RADS_PER_DEG)
}

impl Angle {
    /// A zero angle.
    pub const ZERO: Self = Self(0.0);

    /// Returns the value of `self` in radians.
    #[inline]
    pub const fn to_rads(self) -> f32 {
        self.0
    }
    /// Returns the value of `self` in degrees.
    #[inline]
    pub const fn to_degs(self) -> f32 {
        self.0 / RADS_PER_DEG
    }
}

#[cfg(feature = "fp")]
impl Angle {
    /// Returns the sine of `self`.
    #[inline]
    pub fn sin(self) -> f32 {
        use crate::math::float::f32;
        f32::sin(self.0)
    }
    /// Returns the cosine of `self`.
    #[inline]
    pub fn cos(self) -> f32 {
        use crate::math::float::f32;
        f32::cos(self.0)
    }
    /// Returns the tangent of `self`.
    #[inline]
    pub fn tan(self) -> f32 {
        use crate::math::float::f32;
        f32::tan(self.0)
    }
    /// Returns the sine and cosine of `self`.
    #[inline]
    pub fn sin_cos(self) -> (f32, f32) {
        (self.sin(), self.cos())
    }
}

impl Debug for Angle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}°", self.to_degs())
    }
}

impl Add for Angle {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}
impl Sub for Angle {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}
impl Neg for Angle {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}
impl Mul<f32> for Angle {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self(self.0 * rhs)
    }
}
impl Div<f32> for Angle {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self(self.0 / rhs)
    }
}

impl ApproxEq<Self, f32> for Angle {
    fn approx_eq_eps(&self, other: &Self, eps: &f32) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn relative_epsilon() -> f32 {
        f32::relative_epsilon()
    }
}

#[cfg(test)]
mod tests {
    use core::f32::consts::{FRAC_PI_2, PI};

    use crate::assert_approx_eq;

    use super::*;

    #[test]
    fn degrees_to_radians() {
        assert_approx_eq!(degs(180.0).to_rads(), PI);
        assert_approx_eq!(degs(-90.0).to_rads(), -FRAC_PI_2);
        assert_approx_eq!(rads(PI).to_degs(), 180.0);
    }

    #[test]
    fn arithmetic() {
        assert_approx_eq!(degs(60.0) / 2.0, degs(30.0));
        assert_approx_eq!(degs(10.0) + degs(20.0), degs(30.0));
        assert_approx_eq!(-degs(45.0) * 2.0, degs(-90.0));
    }

    #[cfg(feature = "fp")]
    #[test]
    fn trig() {
        assert_approx_eq!(degs(30.0).sin(), 0.5, eps = 1e-3);
        assert_approx_eq!(degs(60.0).cos(), 0.5, eps = 1e-3);
        assert_approx_eq!(degs(45.0).tan(), 1.0, eps = 1e-3);
    }

    #[test]
    fn debug_in_degrees() {
        assert_eq!(alloc::format!("{:?}", degs(0.0)), "0.0°");
    }
}
