//! Pipeline statistics.

use alloc::{format, string::String};
use core::fmt::{self, Display, Formatter};
use core::ops::AddAssign;

//
// Types
//

/// Collects and accumulates pipeline statistics.
///
/// Every [`Pipeline`][super::Pipeline] keeps a running `Stats` instance.
/// Since the pipeline never fails loudly, these counters are the main way
/// to find out how much of the submitted geometry actually got drawn.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// Number of draw calls issued to the canvas.
    pub draws: usize,

    /// Primitives and vertices input/output.
    pub prims: Throughput,
    pub verts: Throughput,

    /// Number of vertices dropped because the vertex buffer was full.
    pub dropped: usize,
    /// Number of pushes onto a full matrix stack.
    pub overflows: usize,
    /// Number of pops from an empty matrix stack.
    pub underflows: usize,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Throughput {
    // Count of items submitted.
    pub i: usize,
    // Count of items drawn.
    pub o: usize,
}

//
// Impls
//

impl Stats {
    /// Creates a new zeroed `Stats` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets every counter to zero.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Display for Stats {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let w = f.width().unwrap_or(16);
        writeln!(f,
            " STATS  {:>w$}\n\
             ────────{empty:─>w$}\n \
              draws  {:>w$}",
            "IN / OUT", self.draws,
            empty = ""
        )?;
        for (lbl, tp) in [("prims", self.prims), ("verts", self.verts)] {
            if f.alternate() {
                writeln!(f, " {lbl:6} {tp:#w$}")?;
            } else {
                writeln!(f, " {lbl:6} {tp:w$}")?;
            }
        }
        writeln!(f,
            "────────{empty:─>w$}\n \
              drops  {:>w$}\n \
              overfl {:>w$}\n \
              underf {:>w$}",
            self.dropped, self.overflows, self.underflows,
            empty = ""
        )
    }
}

impl Display for Throughput {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let &Self { i, o } = self;
        let w = f.width().unwrap_or(10);
        if f.alternate() {
            if i == 0 {
                write!(f, "{:>w$}", "--")
            } else {
                let pct = 100.0 * o as f32 / i as f32;
                write!(f, "{pct:>w$.1}%", w = w - 1)
            }
        } else {
            let io = format!("{} / {}", human_num(i), human_num(o));
            write!(f, "{io:>w$}")
        }
    }
}

impl AddAssign for Stats {
    /// Appends the stats of `other` to `self`.
    fn add_assign(&mut self, other: Self) {
        self.draws += other.draws;
        self.prims += other.prims;
        self.verts += other.verts;
        self.dropped += other.dropped;
        self.overflows += other.overflows;
        self.underflows += other.underflows;
    }
}

impl AddAssign for Throughput {
    fn add_assign(&mut self, rhs: Self) {
        self.i += rhs.i;
        self.o += rhs.o;
    }
}

fn human_num(n: usize) -> String {
    if n < 1_000 {
        format!("{n:5}")
    } else if n < 100_000 {
        format!("{:4.1}k", n as f32 / 1_000.)
    } else if n < 1_000_000 {
        format!("{:4}k", n / 1_000)
    } else if n < 100_000_000 {
        format!("{:4.1}M", n as f32 / 1_000_000.)
    } else {
        format!("{:4}M", n / 1_000_000)
    }
}
