use ledgl_core::assert_approx_eq;
use ledgl_core::math::ApproxEq;
use ledgl_core::prelude::*;
use ledgl_core::render::{Falloff, raster::to_screen};

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Fill(Rgb565),
    Pixel(ScreenPt, Rgb565),
    Line(ScreenPt, ScreenPt, Rgb565),
    Shaded(ShadedPt, ShadedPt),
}

/// A canvas that records every call made to it.
struct Recorder {
    w: u32,
    h: u32,
    calls: Vec<Call>,
}

impl Recorder {
    fn new(w: u32, h: u32) -> Self {
        Self { w, h, calls: Vec::new() }
    }
}

impl Canvas for Recorder {
    fn width(&self) -> u32 {
        self.w
    }
    fn height(&self) -> u32 {
        self.h
    }
    fn fill_screen(&mut self, c: Rgb565) {
        self.calls.push(Call::Fill(c));
    }
    fn draw_pixel(&mut self, pt: ScreenPt, c: Rgb565) {
        self.calls.push(Call::Pixel(pt, c));
    }
    fn draw_line(&mut self, a: ScreenPt, b: ScreenPt, c: Rgb565) {
        self.calls.push(Call::Line(a, b, c));
    }
    fn draw_shaded_line(&mut self, a: ShadedPt, b: ShadedPt) {
        self.calls.push(Call::Shaded(a, b));
    }
}

/// Returns a pipeline on a 100×100 recorder with the unit cube as the
/// view volume.
fn unit_cube() -> Pipeline<Recorder> {
    let mut gl = Pipeline::new(Recorder::new(100, 100));
    gl.set_mode(MatrixMode::Projection);
    gl.load_identity();
    gl.ortho(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
    gl.set_mode(MatrixMode::ModelView);
    gl.load_identity();
    gl
}

fn calls(gl: &Pipeline<Recorder>) -> &[Call] {
    &gl.canvas().expect("recorder should be bound").calls
}

fn draw(gl: &mut Pipeline<Recorder>, prim: Primitive, vs: &[[f32; 3]]) -> Status {
    gl.begin(prim);
    for &v in vs {
        gl.submit(v);
    }
    gl.end()
}

#[test]
fn load_identity_then_mult_equals_loaded_matrix() {
    let m = translate(vec3(1.0, 2.0, 3.0)).compose(&scale(vec3(2.0, 3.0, 4.0)));
    let mut gl = Pipeline::new(Recorder::new(1, 1));
    gl.load_identity();
    gl.mult(&m);
    assert_eq!(gl.current(), &m);
}

#[test]
fn push_then_pop_restores_bitwise() {
    let mut gl = unit_cube();
    gl.translate(0.1, 0.2, 0.3);
    let before = *gl.current();

    gl.push();
    gl.scale(3.0, 3.0, 3.0);
    gl.translate(7.0, 0.0, 0.0);
    gl.pop();

    assert_eq!(gl.current().to_cols_array(), before.to_cols_array());
}

#[test]
fn stack_saturates_at_capacity() {
    let mut gl = unit_cube();
    let mut saved = Vec::new();
    for i in 0..9 {
        gl.translate(1.0, 0.0, 0.0);
        saved.push(*gl.current());
        let st = gl.push();
        assert_eq!(st.is_ok(), i < 8, "push #{i}");
    }
    // The ninth push was dropped, so the first pop yields the eighth
    for i in (0..8).rev() {
        assert_eq!(gl.pop(), Status::Ok);
        assert_eq!(gl.current(), &saved[i]);
    }
    assert_eq!(gl.pop(), Status::Underflow);
    assert_eq!(gl.current(), &saved[0]);
}

#[test]
fn ortho_maps_box_center_to_origin() {
    let mut gl = Pipeline::new(Recorder::new(1, 1));
    gl.ortho(-4.0, 2.0, 1.0, 5.0, 0.5, 10.5);
    let v: Vec4 = gl.current().apply(&vec4::<()>(-1.0, 3.0, -5.5, 1.0));
    assert_approx_eq!(v, vec4(0.0, 0.0, 0.0, 1.0));
}

#[cfg(feature = "fp")]
#[test]
fn perspective_equals_symmetric_frustum() {
    let (near, far, aspect) = (1.0, 100.0, 1.5);
    let fov = degs(60.0);
    let top = near * (fov / 2.0).tan();

    let mut a = Pipeline::new(Recorder::new(1, 1));
    a.perspective(fov, aspect, near, far);
    let mut b = Pipeline::new(Recorder::new(1, 1));
    b.frustum(-top * aspect, top * aspect, -top, top, near, far);

    assert_approx_eq!(*a.current(), *b.current());
}

#[test]
fn points_outside_unit_cube_are_dropped() {
    let mut gl = unit_cube();
    let st = draw(&mut gl, Primitive::Points, &[[1.5, 0.0, 0.0]]);
    assert_eq!(st, Status::Clipped);
    assert!(calls(&gl).is_empty());

    draw(&mut gl, Primitive::Points, &[[0.99, 0.0, 0.0]]);
    let c = gl.ctx.point_color;
    assert_eq!(calls(&gl), [Call::Pixel(screen_pt(98, 49), c)]);
}

#[test]
fn screen_y_is_flipped() {
    assert_eq!(to_screen(vec3(0.0, 1.0, 0.0), 100, 100).y, 0);
    assert_eq!(to_screen(vec3(0.0, -1.0, 0.0), 100, 100).y, 99);

    let mut gl = unit_cube();
    draw(&mut gl, Primitive::Points, &[[0.0, 1.0, 0.0], [0.0, -1.0, 0.0]]);
    let c = gl.ctx.point_color;
    assert_eq!(calls(&gl), [
        Call::Pixel(screen_pt(49, 0), c),
        Call::Pixel(screen_pt(49, 99), c),
    ]);
}

#[test]
fn brightness_is_clamped() {
    let f = Falloff::default();
    let at_eye = 1.0 / (1.0 + (0.0 - f.start) / f.attenuation);
    assert_eq!(f.brightness(0.0), at_eye.clamp(f.min, 1.0));
    assert_eq!(f.brightness(1e10), f.min);
    assert!(f.brightness(1e5) > f.min);
}

#[test]
fn single_point_end_to_end() {
    let mut gl = unit_cube();
    gl.begin(Primitive::Points);
    gl.submit(vertex(0.0, 0.0, 0.0).with_w(1.0));
    assert_eq!(gl.end(), Status::Ok);

    assert_eq!(calls(&gl), [Call::Pixel(screen_pt(49, 49), Rgb565(0x0001))]);
    assert_eq!(gl.stats.draws, 1);
}

#[test]
fn strip_with_two_vertices_draws_nothing() {
    let mut gl = unit_cube();
    let st = draw(&mut gl, Primitive::TriangleStrip, &[[0.0; 3], [0.5; 3]]);
    assert_eq!(st, Status::Degenerate);
    assert!(calls(&gl).is_empty());
}

#[test]
fn strip_draws_three_edges_per_triangle() {
    let mut gl = unit_cube();
    let vs = [[-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [-1.0, 1.0, 0.0], [1.0, 1.0, 0.0]];
    assert_eq!(draw(&mut gl, Primitive::TriangleStrip, &vs), Status::Ok);

    let c = gl.ctx.wire_color;
    let [p0, p1, p2, p3] =
        [(0, 99), (99, 99), (0, 0), (99, 0)].map(|(x, y)| screen_pt(x, y));
    assert_eq!(calls(&gl), [
        Call::Line(p0, p1, c),
        Call::Line(p0, p2, c),
        Call::Line(p1, p2, c),
        Call::Line(p1, p2, c),
        Call::Line(p1, p3, c),
        Call::Line(p2, p3, c),
    ]);
}

#[test]
fn strip_out_of_depth_range_draws_nothing() {
    let mut gl = unit_cube();
    let vs = [[0.0, 0.0, 0.0], [0.5, 0.0, 0.0], [0.0, 0.5, -1.5]];
    assert_eq!(draw(&mut gl, Primitive::TriangleStrip, &vs), Status::Clipped);
    assert!(calls(&gl).is_empty());
}

#[test]
fn polygon_with_one_vertex_draws_nothing() {
    let mut gl = unit_cube();
    let st = draw(&mut gl, Primitive::Polygon, &[[0.0; 3]]);
    assert_eq!(st, Status::Degenerate);
    assert!(calls(&gl).is_empty());
}

#[test]
fn polygon_with_two_vertices_draws_segment_twice() {
    let mut gl = unit_cube();
    let st = draw(&mut gl, Primitive::Polygon, &[[-1.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    assert_eq!(st, Status::Ok);

    let [Call::Shaded(a0, b0), Call::Shaded(b1, a1)] = calls(&gl) else {
        panic!("expected two shaded lines, got {:?}", calls(&gl));
    };
    assert_eq!((a0, b0), (a1, b1));
    assert_eq!((a0.pos, b0.pos), (screen_pt(0, 49), screen_pt(99, 49)));
}

#[test]
fn polygon_shades_by_view_space_distance() {
    let mut gl = Pipeline::new(Recorder::new(100, 100));
    gl.ctx.falloff = Falloff { start: 1.0, attenuation: 1.0, min: 0.0 };
    gl.ortho(-10.0, 10.0, -10.0, 10.0, -10.0, 10.0);
    gl.set_mode(MatrixMode::ModelView);
    gl.translate(0.0, 0.0, -1.0);

    let st = draw(&mut gl, Primitive::Polygon, &[[0.0, 0.0, 0.0], [0.0, 0.0, -2.0]]);
    assert_eq!(st, Status::Ok);

    let Some(Call::Shaded(near, far)) = calls(&gl).first() else {
        panic!("expected a shaded line, got {:?}", calls(&gl));
    };
    // Distances after the model-view translation are 1 and 3
    assert_eq!((near.depth, far.depth), (1.0, 9.0));
    assert_eq!(near.color, Rgb565::WHITE);
    assert_eq!(far.color, Rgb565::WHITE.dim(1.0 / 9.0));
}

#[test]
fn polygon_out_of_depth_range_draws_nothing() {
    let mut gl = unit_cube();
    let vs = [[0.0, 0.0, 0.0], [0.5, 0.0, 2.0], [0.0, 0.5, 0.0]];
    assert_eq!(draw(&mut gl, Primitive::Polygon, &vs), Status::Clipped);
    assert!(calls(&gl).is_empty());
}

#[test]
fn end_without_canvas_is_noop() {
    let mut gl = Pipeline::<Recorder>::unbound();
    assert_eq!(draw(&mut gl, Primitive::Points, &[[0.0; 3]]), Status::Unbound);

    gl.bind(Recorder::new(10, 10));
    assert!(calls(&gl).is_empty());
}

#[test]
fn unsupported_primitive_draws_nothing() {
    let mut gl = unit_cube();
    let vs = [[0.0; 3], [0.5; 3], [0.1; 3]];
    for prim in [Primitive::None, Primitive::Lines, Primitive::Quads] {
        assert_eq!(draw(&mut gl, prim, &vs), Status::Rejected);
    }
    assert!(calls(&gl).is_empty());
}

#[test]
fn clear_color_fills_screen() {
    let mut gl = unit_cube();
    gl.clear(ClearMask::COLOR | ClearMask::DEPTH);
    assert_eq!(calls(&gl), [Call::Fill(Rgb565::BLACK)]);
}

#[test]
fn status_converts_to_result() {
    fn render(gl: &mut Pipeline<Recorder>) -> Result<(), Status> {
        gl.push().to_result()?;
        draw(gl, Primitive::Points, &[[0.0; 3]]).to_result()?;
        gl.pop().to_result()
    }
    assert_eq!(render(&mut unit_cube()), Ok(()));
    assert_eq!(render(&mut Pipeline::unbound()), Err(Status::Unbound));
}

#[test]
fn look_at_moves_eye_to_origin() {
    let mut gl = Pipeline::new(Recorder::new(1, 1));
    gl.set_mode(MatrixMode::ModelView);
    let eye = vec3(0.0, 0.0, 5.0);
    assert_eq!(gl.look_at(eye, vec3(0.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0)), Status::Ok);

    let v: Vec4 = gl.current().apply(&vec4::<()>(0.0, 0.0, 0.0, 1.0));
    assert_approx_eq!(v, vec4(0.0, 0.0, -5.0, 1.0));
    assert!(gl.current().approx_eq(&translate(vec3(0.0, 0.0, -5.0))));
}

#[test]
fn framebuf_survives_far_off_screen_strip() {
    let mut gl = Pipeline::new(Buf2::<Rgb565>::new_default(100, 100));
    gl.ctx.wire_color = Rgb565::WHITE;
    gl.set_mode(MatrixMode::Projection);
    gl.ortho(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
    gl.set_mode(MatrixMode::ModelView);

    gl.begin(Primitive::TriangleStrip);
    for v in [[-1e9_f32, 0.0, 0.0], [1e9, 0.0, 0.0], [0.0, 0.5, 0.0]] {
        gl.submit(v);
    }
    assert_eq!(gl.end(), Status::Ok);

    // The edge between the two far vertices crosses the whole canvas
    let buf = gl.canvas().unwrap();
    let row = to_screen(vec3(0.0, 0.0, 0.0), 100, 100).y as usize;
    assert!((0..100).all(|x| buf[[x, row]] == Rgb565::WHITE));
}

#[test]
fn framebuf_survives_far_off_screen_polygon() {
    let mut gl = Pipeline::new(Buf2::<Rgb565>::new_default(100, 100));
    gl.set_mode(MatrixMode::Projection);
    gl.ortho(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
    gl.set_mode(MatrixMode::ModelView);

    gl.begin(Primitive::Polygon);
    for v in [[0.0_f32, -1e9, 0.0], [0.0, 1e9, 0.0], [0.5, 0.0, 0.0]] {
        gl.submit(v);
    }
    assert_eq!(gl.end(), Status::Ok);
    assert_eq!(gl.stats.draws, 3);
}
