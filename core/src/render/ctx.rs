//! Rendering parameters and clear masks.

use core::ops::BitOr;

use crate::math::color::Rgb565;

use super::shade::Falloff;

/// Context and parameters used by the rasterizers.
#[derive(Clone, Debug, PartialEq)]
pub struct Context {
    /// Side length of the square drawn for each point, in pixels.
    ///
    /// The default is 1. Zero is treated as 1.
    pub point_size: u32,
    /// Color used to draw points.
    ///
    /// The default is `Rgb565(0x0001)`, the dimmest visible blue.
    pub point_color: Rgb565,
    /// Color used to draw triangle strip wireframes.
    ///
    /// The default is `Rgb565(0x0001)`.
    pub wire_color: Rgb565,
    /// Color used by [`Pipeline::clear`][super::Pipeline::clear].
    ///
    /// The default is black.
    pub clear_color: Rgb565,
    /// Distance-based brightness falloff of shaded primitives.
    ///
    /// The default is [`Falloff::default()`].
    pub falloff: Falloff,
}

/// Selects which buffers [`Pipeline::clear`][super::Pipeline::clear] clears.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct ClearMask(pub u32);

impl Default for Context {
    /// Creates a rendering context with default settings.
    ///
    /// See the documentation of each field for the default value.
    fn default() -> Self {
        Self {
            point_size: 1,
            point_color: Rgb565(0x0001),
            wire_color: Rgb565(0x0001),
            clear_color: Rgb565::BLACK,
            falloff: Falloff::default(),
        }
    }
}

impl ClearMask {
    /// The color buffer, that is, the canvas itself.
    pub const COLOR: Self = Self(0x4000);
    /// The depth buffer. There is none, so clearing it does nothing.
    pub const DEPTH: Self = Self(0x0100);

    /// Returns whether every bit of `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ClearMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
