//! Two-dimensional buffers.

use alloc::vec::Vec;
use core::fmt::{self, Debug, Formatter};
use core::iter::repeat_n;
use core::ops::{Index, IndexMut};

/// A rectangular 2D buffer that owns its elements, backed by a `Vec`.
///
/// `Buf2` stores its elements contiguously, in standard row-major order,
/// such that element (x, y) maps to element at index
/// ```text
/// buf.width() * y + x
/// ```
/// in the backing vector.
///
/// # Examples
/// ```
/// # use ledgl_core::util::buf::Buf2;
/// // Elements initialized with `Default::default()`
/// let mut buf = Buf2::new_default(4, 4);
/// // Indexing with an array [x, y] yields element at row y, column x:
/// buf[[2, 1]] = 123;
/// // Indexing with an usize i yields row with index i as a slice:
/// assert_eq!(&buf[1], &[0, 0, 123, 0]);
/// // Thus you can also do this, row first, column second:
/// assert_eq!(buf[1][2], 123)
/// ```
#[derive(Clone, Eq, PartialEq)]
pub struct Buf2<T> {
    w: usize,
    h: usize,
    data: Vec<T>,
}

impl<T> Buf2<T> {
    /// Returns a buffer with size `w` × `h`, with elements initialized
    /// with values from `init` in row-major order.
    ///
    /// # Panics
    /// If there are fewer than `w * h` elements in `init`.
    pub fn new<I>(w: usize, h: usize, init: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let data: Vec<_> = init.into_iter().take(w * h).collect();
        assert_eq!(data.len(), w * h);
        Self { w, h, data }
    }
    /// Returns a buffer with size `w` × `h`, with every element
    /// initialized by calling `T::default()`.
    pub fn new_default(w: usize, h: usize) -> Self
    where
        T: Clone + Default,
    {
        Self::new(w, h, repeat_n(T::default(), w * h))
    }
    /// Returns a buffer with size `w` × `h`, with every element
    /// initialized by calling `init_fn(x, y)` where x is the column index
    /// and y the row index of the element being initialized.
    pub fn new_with<F>(w: usize, h: usize, mut init_fn: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(init_fn(x, y));
            }
        }
        Self { w, h, data }
    }

    /// Returns the width of `self`.
    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }
    /// Returns the height of `self`.
    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    /// Returns a view of the backing data of `self`.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Returns an iterator over the rows of `self`, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // `max(1)` to avoid a panic on zero-width buffers
        self.data.chunks(self.w.max(1))
    }

    /// Returns a reference to the element at column `x`, row `y`, or `None`
    /// if the position is out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        (x < self.w && y < self.h).then(|| &self.data[self.w * y + x])
    }
    /// Returns a mutable reference to the element at column `x`, row `y`,
    /// or `None` if the position is out of bounds.
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x < self.w && y < self.h {
            Some(&mut self.data[self.w * y + x])
        } else {
            None
        }
    }

    /// Sets every element of `self` to `val`.
    pub fn fill(&mut self, val: T)
    where
        T: Clone,
    {
        self.data.fill(val);
    }
}

impl<T> Index<usize> for Buf2<T> {
    type Output = [T];

    /// Returns the row with index `y`.
    ///
    /// # Panics
    /// If `y` is out of bounds.
    fn index(&self, y: usize) -> &[T] {
        assert!(y < self.h, "row index {y} out of bounds (height {})", self.h);
        &self.data[self.w * y..][..self.w]
    }
}

impl<T> IndexMut<usize> for Buf2<T> {
    fn index_mut(&mut self, y: usize) -> &mut [T] {
        assert!(y < self.h, "row index {y} out of bounds (height {})", self.h);
        &mut self.data[self.w * y..][..self.w]
    }
}

impl<T> Index<[usize; 2]> for Buf2<T> {
    type Output = T;

    /// Returns the element at column `x`, row `y`.
    ///
    /// # Panics
    /// If the position is out of bounds.
    fn index(&self, [x, y]: [usize; 2]) -> &T {
        &self[y][x]
    }
}

impl<T> IndexMut<[usize; 2]> for Buf2<T> {
    fn index_mut(&mut self, [x, y]: [usize; 2]) -> &mut T {
        &mut self[y][x]
    }
}

impl<T: Debug> Debug for Buf2<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Buf2[{}×{}][", self.w, self.h)?;
        for row in self.rows() {
            writeln!(f, "    {row:?}")?;
        }
        write!(f, "]")
    }
}
