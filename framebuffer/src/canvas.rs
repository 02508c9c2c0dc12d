use crate::buffer::GraphicBuffer;
use crate::color::Color;
use crate::raster::{Composite, Parallelogram, Point};

/// Performs drawing operations on an underlying graphical buffer
pub struct Canvas<Element: Copy, Buffer: GraphicBuffer<Element>> {
    buffer: Buffer,
    fill: Element,
}

impl<Element: Copy, Buffer: GraphicBuffer<Element>> Canvas<Element, Buffer> {
    /// Initializes a canvas on top of the given buffer with the given fill
    /// color
    pub fn new(buffer: Buffer, fill: Element) -> Canvas<Element, Buffer> {
        Canvas { buffer, fill }
    }

    /// Gets the underlying buffer for the canvas
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Gets the underlying buffer for the canvas, mutably
    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    /// Gives up the canvas, returning the buffer it was drawing on
    pub fn into_buffer(self) -> Buffer {
        self.buffer
    }

    /// Gets the width of the underlying buffer
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Gets the height of the underlying buffer
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Gets the given point from the underlying canvas
    pub fn get_point(&self, x: i64, y: i64) -> Option<Element> {
        self.buffer.get_point(x, y)
    }

    /// Sets the current fill color
    pub fn set_fill(&mut self, fill: Element) {
        self.fill = fill;
    }

    /// Draws a single pixel at the given point using the current fill
    pub fn fill_point(&mut self, x: i64, y: i64) {
        self.buffer.put_point(x, y, self.fill);
    }

    /// Fills the entire buffer using the currently assigned fill value
    pub fn fill(&mut self) {
        for y in 0..self.buffer.height() {
            for x in 0..self.buffer.width() {
                self.fill_point(x as i64, y as i64);
            }
        }
    }

    /// Assigns every point of the buffer from shader(x, y), row by row from
    /// the top-left corner
    pub fn paint<F>(&mut self, mut shader: F)
    where
        F: FnMut(i64, i64) -> Element,
    {
        for y in 0..self.buffer.height() as i64 {
            for x in 0..self.buffer.width() as i64 {
                self.buffer.put_point(x, y, shader(x, y));
            }
        }
    }
}

impl<Buffer: GraphicBuffer<Color>> Canvas<Color, Buffer> {
    /// Combines the source onto this canvas with its top-left corner at
    /// (dx, dy). Source points that land outside the canvas are dropped and
    /// the destination outside the source is left alone.
    pub fn blit<Source>(&mut self, source: &Source, dx: i64, dy: i64, op: Composite)
    where
        Source: GraphicBuffer<Color>,
    {
        for sy in 0..source.height() as i64 {
            for sx in 0..source.width() as i64 {
                let src = match source.get_point(sx, sy) {
                    None => continue,
                    Some(color) => color,
                };

                let dest = match self.buffer.get_point(sx + dx, sy + dy) {
                    None => continue,
                    Some(color) => color,
                };

                self.buffer.put_point(sx + dx, sy + dy, op.apply(dest, src));
            }
        }
    }

    /// Copies the whole source into the parallelogram given by where its
    /// upper-left, upper-right and lower-left corners should land. Every
    /// point of this canvas is written: points outside the parallelogram get
    /// the current fill.
    pub fn plg_blit<Source>(&mut self, source: &Source, corners: [Point; 3])
    where
        Source: GraphicBuffer<Color>,
    {
        let map = Parallelogram::new(corners, source.width(), source.height());
        let (sw, sh) = (source.width() as f64, source.height() as f64);
        let fill = self.fill;

        self.paint(|x, y| {
            // Sample at pixel centers so an identity map reads back (x, y)
            match map.to_source(x as f64 + 0.5, y as f64 + 0.5) {
                Some((u, v)) if u >= 0.0 && u < sw && v >= 0.0 && v < sh => source
                    .get_point(u.floor() as i64, v.floor() as i64)
                    .unwrap_or(fill),
                _ => fill,
            }
        });
    }
}
