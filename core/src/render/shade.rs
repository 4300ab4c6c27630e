//! Distance-based brightness falloff.

/// Parameters of the inverse-distance brightness falloff applied to the
/// vertices of shaded primitives.
///
/// The brightness of a vertex at squared eye-space distance `d` is
/// ```text
/// clamp(1 / (1 + (d - start) / attenuation), min, 1)
/// ```
/// Vertices somewhat nearer than `start` are at full brightness, and the
/// brightness never drops below `min`, so that distant geometry stays
/// faintly visible. Note that the formula has a pole at
/// `start - attenuation`; nearer than that it turns negative, and the
/// brightness clamps to `min`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Falloff {
    /// Squared distance at which dimming begins.
    pub start: f32,
    /// Squared distance over which brightness halves past `start`.
    pub attenuation: f32,
    /// Lower bound of the brightness.
    pub min: f32,
}

impl Falloff {
    /// Default squared distance at which dimming begins.
    pub const START: f32 = 39592.0;
    /// Default attenuation distance.
    pub const ATTENUATION: f32 = 12000.0;
    /// Default minimum brightness, 10/255.
    pub const MIN: f32 = 0.039215686;

    /// Returns the brightness factor of a vertex at squared distance
    /// `dist_sqr` from the eye.
    ///
    /// The result is always in the range [`self.min`, 1]. A NaN distance
    /// yields full brightness.
    ///
    /// # Examples
    /// ```
    /// use ledgl_core::render::Falloff;
    /// let f = Falloff::default();
    /// assert_eq!(f.brightness(f.start), 1.0);
    /// assert_eq!(f.brightness(f.start + f.attenuation), 0.5);
    /// assert_eq!(f.brightness(1e12), f.min);
    /// ```
    pub fn brightness(&self, dist_sqr: f32) -> f32 {
        let b = 1.0 / (1.0 + (dist_sqr - self.start) / self.attenuation);
        // `min` first so that NaN maps to 1
        b.min(1.0).max(self.min)
    }
}

impl Default for Falloff {
    /// Returns the default falloff, tuned for geometry a few hundred units
    /// from the eye.
    fn default() -> Self {
        Self {
            start: Self::START,
            attenuation: Self::ATTENUATION,
            min: Self::MIN,
        }
    }
}
