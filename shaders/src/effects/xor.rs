use framebuffer::{Canvas, Color, GraphicBuffer};

pub fn color_at(x: i64, y: i64, t: i64) -> Color {
    Color::rgb(
        ((x ^ y ^ t) & 0xFF) as u8,
        ((x ^ t) & 0xFF) as u8,
        ((y ^ t) & 0xFF) as u8,
    )
}

pub fn render<B: GraphicBuffer<Color>>(canvas: &mut Canvas<Color, B>, t: i64) {
    canvas.paint(|x, y| color_at(x, y, t));
}
