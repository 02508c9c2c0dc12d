use framebuffer::{Canvas, Color, FrameBuffer, GraphicBuffer, Point};

/// Only every GRID_STEP-th pixel on each axis carries the pattern
const GRID_STEP: i64 = 4;

/// The sine pattern's color at a grid point
pub fn sample(x: i64, y: i64, theta: f64) -> Color {
    let channel = |phase: f64| (128.0 + 127.0 * (phase + theta).sin()) as u8;
    Color::rgb(
        channel(x as f64 * 0.01),
        channel(y as f64 * 0.01),
        channel((x + y) as f64 * 0.005),
    )
}

/// Paints the coarse source image: the sine pattern on the grid, black in
/// between
pub fn pattern<B: GraphicBuffer<Color>>(source: &mut Canvas<Color, B>, theta: f64) {
    source.paint(|x, y| {
        if x % GRID_STEP == 0 && y % GRID_STEP == 0 {
            sample(x, y, theta)
        } else {
            Color::black()
        }
    });
}

/// Where the upper-left, upper-right and lower-left corners of a
/// width x height image land
pub fn corners(width: u32, height: u32, theta: f64, skewed: bool) -> [Point; 3] {
    if skewed {
        let (sn, cs) = theta.sin_cos();
        let cx = (width / 2) as f64;
        let cy = (height / 2) as f64;
        let rw = (width / 2) as f64;
        let rh = (height / 2) as f64;
        return [
            Point::new((cx + rw * cs).trunc(), (cy + rw * sn).trunc()),
            Point::new((cx - rh * sn).trunc(), (cy + rh * cs).trunc()),
            Point::new(
                (cx - rw * cs + rh * sn).trunc(),
                (cy - rw * sn - rh * cs).trunc(),
            ),
        ];
    }

    let (w, h) = (width as f64, height as f64);
    let center = Point::new(w / 2.0, h / 2.0);
    [
        Point::new(0.0, 0.0).rotate(center, theta),
        Point::new(w, 0.0).rotate(center, theta),
        Point::new(0.0, h).rotate(center, theta),
    ]
}

/// Redraws the coarse pattern into `source`, then maps it onto the canvas
/// through the rotated corners. Points the rotated image does not cover
/// come out black.
pub fn render<B: GraphicBuffer<Color>>(
    canvas: &mut Canvas<Color, B>,
    source: &mut Canvas<Color, FrameBuffer>,
    theta: f64,
    skewed: bool,
) {
    pattern(source, theta);
    let corners = corners(canvas.width(), canvas.height(), theta, skewed);
    canvas.set_fill(Color::black());
    canvas.plg_blit(source.buffer(), corners);
}
