//! Procedural full-screen effects: XOR patterns, a Mandelbrot hue cycler,
//! plasma, a rotating distortion, an XOR swirl and banded noise.
//!
//! Each effect renders whole frames into a `framebuffer::FrameBuffer`. A
//! `Generator` keeps the buffer and the frame counter between frames and can
//! hand finished frames to any `DisplaySurface`.

#[macro_use]
extern crate bitflags;

pub mod effects;
mod error;
mod generator;
mod mode;
mod quirks;

pub use error::Error;
pub use generator::{
    generate, generate_into, noise_source, validate_dimensions, GenerationState, Generator,
    DEFAULT_SEED,
};
pub use mode::Mode;
pub use quirks::Quirks;
