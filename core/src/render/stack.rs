//! Matrix slots and the bounded save/restore stack.

use core::fmt::{self, Debug, Formatter};

use crate::math::mat::Mat4;

use super::Status;

/// Default capacity of a [`MatrixStack`].
pub const MAX_MATRICES: usize = 8;

/// Selects which of the two pipeline matrices subsequent matrix operations
/// act on.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum MatrixMode {
    /// The model-view matrix, from model space to view space.
    ModelView = 0,
    /// The projection matrix, from view space to clip space.
    #[default]
    Projection = 1,
}

/// A fixed-capacity stack of matrix snapshots.
///
/// The stack is shared by both matrix modes; it is up to the caller to pop
/// in the same mode that was pushed in. Pushing onto a full stack and
/// popping an empty one are no-ops reported through the return value.
#[derive(Clone)]
pub struct MatrixStack<const N: usize = MAX_MATRICES> {
    items: [Mat4; N],
    len: usize,
}

impl MatrixMode {
    /// Returns the index of the matrix slot of `self`.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u32> for MatrixMode {
    type Error = Status;

    /// Converts a raw mode code (0 for model-view, 1 for projection) into
    /// a `MatrixMode`, or returns `Status::Rejected` for any other value.
    fn try_from(code: u32) -> Result<Self, Status> {
        match code {
            0 => Ok(Self::ModelView),
            1 => Ok(Self::Projection),
            _ => Err(Status::Rejected),
        }
    }
}

impl<const N: usize> MatrixStack<N> {
    /// Returns a new empty stack.
    pub const fn new() -> Self {
        Self { items: [Mat4::IDENTITY; N], len: 0 }
    }

    /// Returns the number of saved matrices.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }
    /// Returns whether the stack is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
    /// Returns the maximum number of saved matrices.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns the topmost saved matrix, if any.
    pub fn top(&self) -> Option<&Mat4> {
        self.len.checked_sub(1).map(|i| &self.items[i])
    }

    /// Saves a copy of `m` on top of the stack.
    ///
    /// If the stack is full, does nothing and returns `Status::Overflow`.
    pub fn push(&mut self, m: &Mat4) -> Status {
        if self.len == N {
            return Status::Overflow;
        }
        self.items[self.len] = *m;
        self.len += 1;
        Status::Ok
    }

    /// Removes and returns the topmost saved matrix, or `None` if the stack
    /// is empty.
    pub fn pop(&mut self) -> Option<Mat4> {
        self.len = self.len.checked_sub(1)?;
        Some(self.items[self.len])
    }
}

impl<const N: usize> Default for MatrixStack<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Debug for MatrixStack<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(&self.items[..self.len])
            .finish()
    }
}
