use std::io::{self, Write};
use std::thread::sleep;
use std::time::Duration;

use gl::prelude::*;
use ledgl_demos::{cube, init_logging, write_ansi};

const W: usize = 64;
const H: usize = 48;

fn main() -> io::Result<()> {
    init_logging();

    let frames: u32 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(180);

    let mut gl = Pipeline::new(Buf2::<Rgb565>::new_default(W, H));
    gl.ctx.wire_color = rgb565(0x40, 0x80, 0xFF);
    gl.ctx.point_color = rgb565(0xFF, 0xFF, 0x40);
    gl.ctx.falloff = Falloff {
        start: 9.0,
        attenuation: 12.0,
        ..Falloff::default()
    };

    gl.set_mode(MatrixMode::Projection);
    gl.load_identity();
    gl.perspective(degs(60.0), W as f32 / H as f32, 1.0, 20.0);

    gl.set_mode(MatrixMode::ModelView);
    gl.load_identity();
    gl.look_at(
        vec3(0.0, 1.5, 5.0),
        vec3(0.0, 0.0, 0.0),
        vec3(0.0, 1.0, 0.0),
    );

    let (back, front, sides) = cube();
    let (red, green) = (rgb565(0xFF, 0x30, 0x30), rgb565(0x30, 0xFF, 0x30));

    let mut out = io::stdout().lock();
    write!(out, "\x1b[2J")?;

    for frame in 0..frames {
        gl.clear(ClearMask::COLOR);

        gl.push();
        gl.rotate(degs(frame as f32 * 3.0), 0.0, 1.0, 0.0);
        gl.rotate(degs(frame as f32 * 1.3), 1.0, 0.0, 0.2);

        gl.begin(Primitive::TriangleStrip);
        for v in sides {
            gl.submit(v);
        }
        gl.end();

        for (face, color) in [(back, red), (front, green)] {
            gl.begin(Primitive::Polygon);
            for v in face {
                gl.submit((v, color));
            }
            gl.end();
        }

        gl.begin(Primitive::Points);
        for v in back.into_iter().chain(front) {
            gl.submit(v);
        }
        gl.end();

        gl.pop();

        write!(out, "\x1b[H")?;
        if let Some(buf) = gl.canvas() {
            write_ansi(buf, &mut out)?;
        }
        sleep(Duration::from_millis(33));
    }

    log::info!("{frames} frames rendered\n{}", gl.stats);
    Ok(())
}
