use framebuffer::{Canvas, Color, GraphicBuffer, Hsl};

pub const MAX_ITERATIONS: u32 = 100;

const REAL_MIN: f64 = -2.0;
const REAL_MAX: f64 = 1.0;
const IMAG_MIN: f64 = -1.0;
const IMAG_MAX: f64 = 1.0;

/// Maps a pixel onto the complex plane
pub fn point_at(x: i64, y: i64, width: u32, height: u32) -> (f64, f64) {
    (
        REAL_MIN + (REAL_MAX - REAL_MIN) * (x as f64 / width as f64),
        IMAG_MIN + (IMAG_MAX - IMAG_MIN) * (y as f64 / height as f64),
    )
}

/// Counts iterations of z <- z^2 + c until |z|^2 > 4, up to MAX_ITERATIONS
pub fn escape_time(real: f64, imag: f64) -> u32 {
    let (mut zr, mut zi) = (0.0f64, 0.0f64);
    let mut iterations = 0;
    while zr * zr + zi * zi <= 4.0 && iterations < MAX_ITERATIONS {
        let next = zr * zr - zi * zi + real;
        zi = 2.0 * zr * zi + imag;
        zr = next;
        iterations += 1;
    }
    iterations
}

/// Points that never escape are black; the rest cycle through the hues with
/// a brightness that peaks halfway to the cap
pub fn color_for(iterations: u32) -> Color {
    if iterations >= MAX_ITERATIONS {
        return Color::black();
    }

    let frac = iterations as f64 / MAX_ITERATIONS as f64;
    let lightness = if frac < 0.5 {
        frac * 2.0
    } else {
        2.0 - frac * 2.0
    };
    Hsl::new(frac, 1.0, lightness).to_color()
}

pub fn render<B: GraphicBuffer<Color>>(canvas: &mut Canvas<Color, B>) {
    let (width, height) = (canvas.width(), canvas.height());
    canvas.paint(|x, y| {
        let (real, imag) = point_at(x, y, width, height);
        color_for(escape_time(real, imag))
    });
}
