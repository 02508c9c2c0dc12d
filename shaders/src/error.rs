use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// Frames need at least one row and one column
    #[error("invalid frame dimensions {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },
    #[error("frame buffer is {actual:?} but {expected:?} was requested")]
    SizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    #[error("noise seed must have at least one non-zero bit")]
    InvalidSeed,
    #[error("unknown mode {0:?} (expected one of xor, mandelbrot, plasma, rotate, swirl, glitch)")]
    UnknownMode(String),
}
