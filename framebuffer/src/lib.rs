//! Pixel buffers, color math and the surfaces frames are shown on.

mod buffer;
mod canvas;
mod color;
mod raster;
pub mod surface;

pub use buffer::{FrameBuffer, GraphicBuffer, PixelFormat};
pub use canvas::Canvas;
pub use color::{Color, Hsl};
pub use raster::{Composite, Parallelogram, Point};
pub use surface::{DisplaySurface, Encoding, StreamSurface, SurfaceError};
