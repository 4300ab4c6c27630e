//! Helpers shared by the demo programs.

use std::io::{self, Write};

use gl::prelude::*;

/// Initializes the global logger.
///
/// The filter is read from `RUST_LOG` if set, otherwise defaults to `info`.
/// Run with `RUST_LOG=ledgl_core=debug` to see dropped primitives.
pub fn init_logging() {
    let mut builder = env_logger::Builder::new();
    if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();
}

/// Writes `buf` to `out` using ANSI true-color escapes, two pixels per
/// character cell.
///
/// Each cell is a lower half block whose background is the upper pixel and
/// foreground the lower one, so that the image keeps its aspect ratio in a
/// typical terminal font.
pub fn write_ansi(buf: &Buf2<Rgb565>, mut out: impl Write) -> io::Result<()> {
    let mut rows = buf.rows();
    while let Some(upper) = rows.next() {
        let lower = rows.next();
        for (x, hi) in upper.iter().enumerate() {
            let lo = lower.map_or(Rgb565::BLACK, |row| row[x]);
            let [r0, g0, b0] = hi.to_rgb888();
            let [r1, g1, b1] = lo.to_rgb888();
            write!(out, "\x1b[48;2;{r0};{g0};{b0}m\x1b[38;2;{r1};{g1};{b1}m▄")?;
        }
        writeln!(out, "\x1b[0m")?;
    }
    out.flush()
}

/// Writes `buf` to `out` as a binary PPM (P6) image.
pub fn write_ppm(buf: &Buf2<Rgb565>, mut out: impl Write) -> io::Result<()> {
    writeln!(out, "P6 {} {} 255", buf.width(), buf.height())?;
    for px in buf.data() {
        out.write_all(&px.to_rgb888())?;
    }
    out.flush()
}

/// Returns the vertices of the unit cube centered at the origin, as two
/// quads (back, front) followed by a strip around the four sides.
pub fn cube() -> ([[f32; 3]; 4], [[f32; 3]; 4], [[f32; 3]; 10]) {
    let back = [[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0]];
    let front = back.map(|[x, y, _]| [x, y, 1.0]);
    let mut sides = [[0.0; 3]; 10];
    for (i, s) in sides.chunks_mut(2).enumerate() {
        s[0] = back[i % 4];
        s[1] = front[i % 4];
    }
    (back, front, sides)
}
