use framebuffer::{Canvas, Color, GraphicBuffer};
use random::Source;

/// Rows per band
pub const BAND_HEIGHT: i64 = 10;

/// Which of the three channel rules applies to row y
pub fn band(y: i64) -> i64 {
    (y / BAND_HEIGHT) % 3
}

fn wrap(channel: i64) -> u8 {
    channel.rem_euclid(256) as u8
}

/// Shuffles and offsets a noise pixel according to its band. With `chained`,
/// later channels of a rule read the values earlier channels were just given.
pub fn shift(noise: Color, x: i64, y: i64, chained: bool) -> Color {
    let (r, g, b) = (noise.r as i64, noise.g as i64, noise.b as i64);

    match band(y) {
        0 => Color::rgb(wrap(r + x), wrap(g + y), wrap(b + x + y)),
        1 if chained => {
            let nr = wrap(b + x);
            let ng = wrap(nr as i64 + y);
            Color::rgb(nr, ng, wrap(ng as i64 + x + y))
        }
        1 => Color::rgb(wrap(b + x), wrap(r + y), wrap(g + x + y)),
        _ if chained => {
            let nr = wrap(g + x);
            Color::rgb(nr, wrap(b + y), wrap(nr as i64 + x + y))
        }
        _ => Color::rgb(wrap(g + x), wrap(b + y), wrap(r + x + y)),
    }
}

/// Generates a random color
fn random_color<T: Source>(source: &mut T) -> Color {
    Color::rgb(
        source.read::<u8>(),
        source.read::<u8>(),
        source.read::<u8>(),
    )
}

pub fn render<B, T>(canvas: &mut Canvas<Color, B>, rng: &mut T, chained: bool)
where
    B: GraphicBuffer<Color>,
    T: Source,
{
    canvas.paint(|x, y| shift(random_color(rng), x, y, chained));
}
