//! Packed 16-bit colors.

use core::fmt::{self, Debug, Formatter};

/// An RGB color packed into 16 bits, with 5 bits of red, 6 bits of green,
/// and 5 bits of blue, in that order from the most significant bit.
///
/// This is the native pixel format of many small LCD and LED drivers.
/// Display drivers that use the value as a palette or pattern index rather
/// than a literal color can still pass it through unchanged.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Rgb565(pub u16);

/// Returns a packed color with the given 8-bit channels, discarding the
/// low-order bits that do not fit.
///
/// # Examples
/// ```
/// use ledgl_core::math::{rgb565, Rgb565};
/// assert_eq!(rgb565(0xFF, 0xFF, 0xFF), Rgb565::WHITE);
/// assert_eq!(rgb565(0xFF, 0x00, 0x00).to_bits(), 0xF800);
/// ```
pub const fn rgb565(r: u8, g: u8, b: u8) -> Rgb565 {
    let (r, g, b) = ((r >> 3) as u16, (g >> 2) as u16, (b >> 3) as u16);
    Rgb565(r << 11 | g << 5 | b)
}

impl Rgb565 {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);

    /// Returns a color with the given packed representation.
    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }
    /// Returns the packed representation of `self`.
    #[inline]
    pub const fn to_bits(self) -> u16 {
        self.0
    }

    /// Returns the raw 5-bit red, 6-bit green, and 5-bit blue channels.
    #[inline]
    pub const fn channels(self) -> [u16; 3] {
        [self.0 >> 11, (self.0 >> 5) & 0x3F, self.0 & 0x1F]
    }

    /// Returns the channels of `self` expanded to 8 bits each, such that
    /// full intensity maps to `0xFF`.
    pub const fn to_rgb888(self) -> [u8; 3] {
        let [r, g, b] = self.channels();
        [
            (r << 3 | r >> 2) as u8,
            (g << 2 | g >> 4) as u8,
            (b << 3 | b >> 2) as u8,
        ]
    }

    /// Returns `self` with every channel scaled by `brightness`.
    ///
    /// `brightness` is clamped to [0, 1] and each channel is rounded to the
    /// nearest representable value, so the hue is preserved as closely as
    /// 16 bits allow. A NaN brightness yields black.
    ///
    /// # Examples
    /// ```
    /// use ledgl_core::math::Rgb565;
    /// let c = Rgb565::WHITE.dim(0.5);
    /// assert_eq!(c.channels(), [16, 32, 16]);
    /// assert_eq!(Rgb565::WHITE.dim(2.0), Rgb565::WHITE);
    /// ```
    pub fn dim(self, brightness: f32) -> Self {
        let f = if brightness.is_nan() {
            0.0
        } else {
            brightness.clamp(0.0, 1.0)
        };
        self.map(|c| (c as f32 * f + 0.5) as u16)
    }

    /// Linearly interpolates each channel between `self` and `other`.
    ///
    /// If `t` = 0, returns `self`; if `t` = 1, returns `other`. Values of
    /// `t` outside [0, 1] are clamped.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let [r0, g0, b0] = self.channels().map(|c| c as f32);
        let [r1, g1, b1] = other.channels().map(|c| c as f32);
        let mix = |a: f32, b: f32| (a + (b - a) * t + 0.5) as u16;
        Self::from_channels([mix(r0, r1), mix(g0, g1), mix(b0, b1)])
    }

    fn map(self, mut f: impl FnMut(u16) -> u16) -> Self {
        Self::from_channels(self.channels().map(&mut f))
    }

    const fn from_channels([r, g, b]: [u16; 3]) -> Self {
        Self((r & 0x1F) << 11 | (g & 0x3F) << 5 | (b & 0x1F))
    }
}

impl Debug for Rgb565 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.channels();
        write!(f, "Rgb565({:#06X}: {r}, {g}, {b})", self.0)
    }
}

impl From<u16> for Rgb565 {
    fn from(bits: u16) -> Self {
        Self(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_layout() {
        assert_eq!(Rgb565(0xF800).channels(), [31, 0, 0]);
        assert_eq!(Rgb565(0x07E0).channels(), [0, 63, 0]);
        assert_eq!(Rgb565(0x001F).channels(), [0, 0, 31]);
        assert_eq!(rgb565(0x08, 0x04, 0x08).channels(), [1, 1, 1]);
    }

    #[test]
    fn expand_to_rgb888() {
        assert_eq!(Rgb565::WHITE.to_rgb888(), [0xFF; 3]);
        assert_eq!(Rgb565::BLACK.to_rgb888(), [0; 3]);
        assert_eq!(Rgb565(0xF800).to_rgb888(), [0xFF, 0, 0]);
    }

    #[test]
    fn dim_scales_all_channels() {
        assert_eq!(Rgb565::WHITE.dim(1.0), Rgb565::WHITE);
        assert_eq!(Rgb565::WHITE.dim(0.0), Rgb565::BLACK);
        assert_eq!(Rgb565(0xF800).dim(0.5).channels(), [16, 0, 0]);
    }

    #[test]
    fn dim_keeps_faint_leds_lit() {
        // The minimum brightness used for distance shading
        let c = Rgb565::WHITE.dim(0.039_215_686);
        assert_eq!(c.channels(), [1, 2, 1]);
    }

    #[test]
    fn dim_clamps_and_rejects_nan() {
        assert_eq!(Rgb565::WHITE.dim(-1.0), Rgb565::BLACK);
        assert_eq!(Rgb565::WHITE.dim(1.5), Rgb565::WHITE);
        assert_eq!(Rgb565::WHITE.dim(f32::NAN), Rgb565::BLACK);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let (a, b) = (Rgb565::BLACK, Rgb565(0xF800));
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5).channels(), [16, 0, 0]);
    }

    #[test]
    fn debug_shows_bits_and_channels() {
        assert_eq!(
            alloc::format!("{:?}", Rgb565(0xF81F)),
            "Rgb565(0xF81F: 31, 0, 31)"
        );
    }
}
