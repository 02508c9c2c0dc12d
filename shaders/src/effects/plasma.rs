use framebuffer::{Canvas, Color, GraphicBuffer, Hsl};

const FREQ_X: f64 = 0.05;
const FREQ_Y: f64 = 0.07;
const FREQ_DIAGONAL: f64 = 0.03;
const FREQ_RADIAL: f64 = 0.1;

/// Sum of four sine waves, roughly in [-4, 4]
pub fn wave(x: i64, y: i64, center_x: i64, center_y: i64, t: f64) -> f64 {
    let dx = (x - center_x) as f64;
    let dy = (y - center_y) as f64;
    let dist = (dx * dx + dy * dy).sqrt();

    (x as f64 * FREQ_X + t).sin()
        + (y as f64 * FREQ_Y + t).sin()
        + ((x + y) as f64 * FREQ_DIAGONAL + t).sin()
        + (dist * FREQ_RADIAL + t).sin()
}

pub fn color_for(v: f64) -> Color {
    let normalized = ((v + 4.0) / 8.0).max(0.0).min(1.0);
    Hsl::new(normalized, 1.0, 0.25 + 0.5 * normalized).to_color()
}

pub fn render<B: GraphicBuffer<Color>>(canvas: &mut Canvas<Color, B>, t: f64) {
    let center_x = canvas.width() as i64 / 2;
    let center_y = canvas.height() as i64 / 2;
    canvas.paint(|x, y| color_for(wave(x, y, center_x, center_y, t)));
}
