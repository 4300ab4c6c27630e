//! Outcomes of pipeline operations.

use core::fmt::{self, Display, Formatter};

/// The outcome of a pipeline operation.
///
/// The pipeline never panics or fails on bad input; instead, the offending
/// request is dropped and the operation degrades to a no-op. The returned
/// `Status` tells what happened. It is not `#[must_use]`, so it can be
/// ignored; to fail fast instead, turn it into a `Result` with
/// [`to_result`][Self::to_result] and propagate it with `?`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Status {
    /// The operation completed normally.
    Ok,
    /// A fixed-capacity buffer or stack was full; the item was dropped.
    Overflow,
    /// The matrix stack was empty; nothing was restored.
    Underflow,
    /// The input was geometrically degenerate, such as a zero-length
    /// rotation axis or too few vertices for the primitive.
    Degenerate,
    /// The primitive had a vertex outside the depth range and was dropped.
    Clipped,
    /// No canvas is bound.
    Unbound,
    /// The requested mode is not one the operation handles.
    Rejected,
}

impl Status {
    /// Returns whether `self` is [`Status::Ok`].
    #[inline]
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }

    /// Returns `Ok(())` if `self` is [`Status::Ok`], `Err(self)` otherwise.
    ///
    /// # Examples
    /// ```
    /// use ledgl_core::render::{MatrixStack, Status};
    /// use ledgl_core::math::Mat4;
    ///
    /// let mut stack = MatrixStack::<1>::new();
    /// assert_eq!(stack.push(&Mat4::IDENTITY).to_result(), Ok(()));
    /// assert_eq!(stack.push(&Mat4::IDENTITY).to_result(), Err(Status::Overflow));
    /// ```
    #[inline]
    pub fn to_result(self) -> Result<(), Self> {
        match self {
            Self::Ok => Ok(()),
            other => Err(other),
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ok => "ok",
            Self::Overflow => "capacity exceeded",
            Self::Underflow => "stack empty",
            Self::Degenerate => "degenerate geometry",
            Self::Clipped => "outside depth range",
            Self::Unbound => "no canvas bound",
            Self::Rejected => "unsupported mode",
        })
    }
}

impl core::error::Error for Status {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_ok_is_ok() {
        assert!(Status::Ok.is_ok());
        assert!(!Status::Overflow.is_ok());
        assert_eq!(Status::Ok.to_result(), Ok(()));
        assert_eq!(Status::Clipped.to_result(), Err(Status::Clipped));
    }

    #[test]
    fn display() {
        assert_eq!(alloc::format!("{}", Status::Overflow), "capacity exceeded");
        assert_eq!(alloc::format!("{}", Status::Unbound), "no canvas bound");
    }
}
