use std::fs::File;
use std::io::{self, BufWriter};

use gl::prelude::*;
use ledgl_demos::{init_logging, write_ppm};

fn main() -> io::Result<()> {
    init_logging();

    let (w, h) = (160, 120);
    let mut gl = Pipeline::new(Buf2::<Rgb565>::new_default(w, h));
    gl.ctx.point_color = Rgb565::WHITE;
    gl.ctx.wire_color = rgb565(0x00, 0xC0, 0xFF);
    gl.ctx.falloff = Falloff {
        start: 4.0,
        attenuation: 20.0,
        ..Falloff::default()
    };

    gl.set_mode(MatrixMode::Projection);
    gl.frustum(-0.4, 0.4, -0.3, 0.3, 1.0, 50.0);

    gl.set_mode(MatrixMode::ModelView);
    gl.translate(0.0, -1.0, -3.0);

    // A row of frames receding into the distance
    for i in 0..8 {
        gl.push();
        gl.translate(0.0, 0.0, -3.0 * i as f32);
        gl.begin(Primitive::Polygon);
        for [x, y] in [[-1.0_f32, 0.0], [1.0, 0.0], [1.0, 2.0], [-1.0, 2.0]] {
            gl.submit(([x, y, 0.0], rgb565(0xFF, 0xA0, 0x20)));
        }
        gl.end();
        gl.pop();
    }

    // A zigzag strip along the floor
    gl.begin(Primitive::TriangleStrip);
    for i in 0..12 {
        let x = if i % 2 == 0 { -2.0 } else { 2.0 };
        gl.submit([x, 0.0, -2.0 * i as f32]);
    }
    gl.end();

    // Stars
    gl.point_size(2);
    gl.begin(Primitive::Points);
    for i in 0..16 {
        let t = i as f32;
        gl.submit([(t * 7.3) % 12.0 - 6.0, 3.0 + (t * 3.1) % 4.0, -20.0]);
    }
    gl.end();

    let path = std::env::args().nth(1).unwrap_or("ledgl.ppm".into());
    let Some(buf) = gl.canvas() else {
        return Ok(());
    };
    write_ppm(buf, BufWriter::new(File::create(&path)?))?;

    log::info!("wrote {path}\n{}", gl.stats);
    Ok(())
}
