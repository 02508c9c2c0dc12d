use framebuffer::{Canvas, Color, GraphicBuffer};

/// How far the screen is shifted onto itself before drawing frame t
pub fn offset(t: i64) -> (i64, i64) {
    let angle = t as f64 * 0.05;
    ((8.0 * angle.sin()) as i64, (8.0 * angle.cos()) as i64)
}

/// Wraps on overflow, so any t is usable
fn phase(t: i64, x: i64, y: i64, bitwise: bool) -> i64 {
    let base = t.wrapping_mul(5);
    if bitwise {
        base | (x ^ y)
    } else {
        base.wrapping_add(x ^ y)
    }
}

pub fn color_at(x: i64, y: i64, t: i64, bitwise: bool) -> Color {
    shade(x, y, t, offset(t), bitwise)
}

fn shade(x: i64, y: i64, t: i64, (swirl_x, swirl_y): (i64, i64), bitwise: bool) -> Color {
    let fx = (2.0 * (phase(t, x, y, bitwise) as f64).sin()) as i64;
    let fy = (2.0 * (phase(t, y, x, bitwise) as f64).cos()) as i64;

    Color::rgb(
        ((fx + fy) & 0xFF) as u8,
        ((swirl_x + fx + fy) & 0xFF) as u8,
        ((swirl_y + fx + fy) & 0xFF) as u8,
    )
}

pub fn render<B: GraphicBuffer<Color>>(canvas: &mut Canvas<Color, B>, t: i64, bitwise: bool) {
    let swirl = offset(t);
    canvas.paint(|x, y| shade(x, y, t, swirl, bitwise));
}
