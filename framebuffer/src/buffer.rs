use crate::color::Color;
use std::io;

/// Byte layouts a framebuffer can be encoded into
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PixelFormat {
    /// Three bytes per pixel in R, G, B order (the PPM layout)
    Rgb24,
    /// Three bytes per pixel in B, G, R order
    Bgr24,
    /// Four bytes per pixel in B, G, R, A order, i.e. a little-endian
    /// 0xAARRGGBB word
    Bgra32,
}

impl PixelFormat {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Rgb24 | PixelFormat::Bgr24 => 3,
            PixelFormat::Bgra32 => 4,
        }
    }

    /// The name ffmpeg and friends use for this layout
    pub fn name(&self) -> &'static str {
        match self {
            PixelFormat::Rgb24 => "rgb24",
            PixelFormat::Bgr24 => "bgr24",
            PixelFormat::Bgra32 => "bgra",
        }
    }
}

pub trait GraphicBuffer<T: Copy> {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn put_point(&mut self, x: i64, y: i64, color: T);
    fn get_point(&self, x: i64, y: i64) -> Option<T>;
}

/// A graphical buffer of opaque pixels, stored row-major from the top-left
/// corner
#[derive(Clone, PartialEq, Debug)]
pub struct FrameBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    /// Creates a new FrameBuffer with a black background
    pub fn new(width: u32, height: u32) -> FrameBuffer {
        let size = width as usize * height as usize * 3;
        FrameBuffer {
            pixels: vec![0; size],
            width,
            height,
        }
    }

    /// The raw pixel data, three bytes per pixel in R, G, B order
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Iterates over every pixel in row-major order
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.pixels
            .chunks_exact(3)
            .map(|px| Color::rgb(px[0], px[1], px[2]))
    }

    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || x >= self.width as i64 || y < 0 || y >= self.height as i64 {
            None
        } else {
            Some(((y * self.width as i64 + x) * 3) as usize)
        }
    }

    /// Lays the pixels out in the given format, replacing the contents of
    /// `output`
    pub fn encode_into(&self, format: PixelFormat, output: &mut Vec<u8>) {
        output.clear();
        output.reserve(self.width as usize * self.height as usize * format.bytes_per_pixel());

        match format {
            PixelFormat::Rgb24 => output.extend_from_slice(&self.pixels),
            PixelFormat::Bgr24 => {
                for px in self.pixels.chunks_exact(3) {
                    output.extend_from_slice(&[px[2], px[1], px[0]]);
                }
            }
            PixelFormat::Bgra32 => {
                for px in self.pixels.chunks_exact(3) {
                    output.extend_from_slice(&[px[2], px[1], px[0], 0xFF]);
                }
            }
        }
    }

    /// Dumps the framebuffer as a binary PPM image
    pub fn write_ppm(&self, output: &mut impl io::Write) -> io::Result<()> {
        let header = format!("P6\n{} {}\n255\n", self.width, self.height);
        output.write_all(header.as_bytes())?;
        output.write_all(&self.pixels)
    }
}

impl GraphicBuffer<Color> for FrameBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn get_point(&self, x: i64, y: i64) -> Option<Color> {
        self.offset(x, y).map(|offset| {
            Color::rgb(
                self.pixels[offset],
                self.pixels[offset + 1],
                self.pixels[offset + 2],
            )
        })
    }

    fn put_point(&mut self, x: i64, y: i64, color: Color) {
        if let Some(offset) = self.offset(x, y) {
            self.pixels[offset] = color.r;
            self.pixels[offset + 1] = color.g;
            self.pixels[offset + 2] = color.b;
        }
    }
}
