use crate::buffer::{FrameBuffer, GraphicBuffer, PixelFormat};
use crate::canvas::Canvas;
use crate::color::Color;
use crate::raster::Composite;
use log::{debug, trace};
use std::io;
use std::mem;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("cannot acquire a {width}x{height} buffer")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("frame is {actual:?} but the surface is {expected:?}")]
    SizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    #[error("no buffer has been acquired from this surface")]
    NotAcquired,
    #[error("surface output failed: {0}")]
    Io(#[from] io::Error),
}

/// Something that can show frames: a screen, a window, a video stream.
///
/// The surface owns what is currently visible. Frames are composited onto
/// it and then shown, once per completed frame.
pub trait DisplaySurface {
    /// Prepares the surface for frames of the given size and layout and hands
    /// back a black buffer to draw them in
    fn acquire_buffer(
        &mut self,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<FrameBuffer, SurfaceError>;

    /// What is currently visible
    fn screen(&self) -> &FrameBuffer;

    /// Combines the source onto the visible contents at (dx, dy) with
    /// `destination AND NOT source`, without showing the result yet
    fn composite_with_inverted_destination(
        &mut self,
        source: &FrameBuffer,
        dx: i64,
        dy: i64,
    ) -> Result<(), SurfaceError>;

    /// Composites a completed frame onto the visible contents and shows it.
    /// On failure the visible contents are left as they were.
    fn present(&mut self, frame: &FrameBuffer, composite: Composite) -> Result<(), SurfaceError>;
}

/// How a StreamSurface writes each shown screen
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Encoding {
    /// A binary PPM image per frame
    Ppm,
    /// Bare pixel bytes in the acquired pixel format
    Raw,
}

/// A surface that writes every shown screen to an output stream, e.g. stdout
/// piped into a video player
pub struct StreamSurface<W: io::Write> {
    output: W,
    encoding: Encoding,
    format: PixelFormat,
    screen: Canvas<Color, FrameBuffer>,
    // Next screen, swapped in once it has been written out
    staging: Canvas<Color, FrameBuffer>,
    acquired: bool,
    scratch: Vec<u8>,
    presented: u64,
}

impl<W: io::Write> StreamSurface<W> {
    pub fn new(output: W, encoding: Encoding) -> StreamSurface<W> {
        StreamSurface {
            output,
            encoding,
            format: PixelFormat::Rgb24,
            screen: Canvas::new(FrameBuffer::new(0, 0), Color::black()),
            staging: Canvas::new(FrameBuffer::new(0, 0), Color::black()),
            acquired: false,
            scratch: Vec::new(),
            presented: 0,
        }
    }

    /// How many frames have been shown so far
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// The layout raw frames are written in
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn into_inner(self) -> W {
        self.output
    }

    fn screen_mut(&mut self) -> Result<&mut Canvas<Color, FrameBuffer>, SurfaceError> {
        if self.acquired {
            Ok(&mut self.screen)
        } else {
            Err(SurfaceError::NotAcquired)
        }
    }

    fn write_frame(&mut self, frame: &FrameBuffer) -> Result<(), SurfaceError> {
        match self.encoding {
            Encoding::Ppm => frame.write_ppm(&mut self.output)?,
            Encoding::Raw => {
                frame.encode_into(self.format, &mut self.scratch);
                self.output.write_all(&self.scratch)?;
            }
        }
        self.output.flush()?;
        Ok(())
    }
}

impl<W: io::Write> DisplaySurface for StreamSurface<W> {
    fn acquire_buffer(
        &mut self,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<FrameBuffer, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidDimensions { width, height });
        }

        if !self.acquired || self.screen.width() != width || self.screen.height() != height {
            debug!("acquiring {}x{} {} surface", width, height, format.name());
            self.screen = Canvas::new(FrameBuffer::new(width, height), Color::black());
            self.staging = Canvas::new(FrameBuffer::new(width, height), Color::black());
            self.acquired = true;
        }

        self.format = format;
        Ok(FrameBuffer::new(width, height))
    }

    fn screen(&self) -> &FrameBuffer {
        self.screen.buffer()
    }

    fn composite_with_inverted_destination(
        &mut self,
        source: &FrameBuffer,
        dx: i64,
        dy: i64,
    ) -> Result<(), SurfaceError> {
        self.screen_mut()?.blit(source, dx, dy, Composite::Erase);
        Ok(())
    }

    fn present(&mut self, frame: &FrameBuffer, composite: Composite) -> Result<(), SurfaceError> {
        let screen = self.screen_mut()?;
        if screen.width() != frame.width() || screen.height() != frame.height() {
            return Err(SurfaceError::SizeMismatch {
                expected: (screen.width(), screen.height()),
                actual: (frame.width(), frame.height()),
            });
        }

        let empty = Canvas::new(FrameBuffer::new(0, 0), Color::black());
        let mut next = mem::replace(&mut self.staging, empty);
        next.buffer_mut().clone_from(self.screen.buffer());
        next.blit(frame, 0, 0, composite);

        let written = self.write_frame(next.buffer());
        if written.is_ok() {
            self.staging = mem::replace(&mut self.screen, next);
            self.presented += 1;
            trace!("presented frame {}", self.presented);
        } else {
            self.staging = next;
        }
        written
    }
}
