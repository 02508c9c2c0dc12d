//! One module per effect. Each renders a complete frame onto a canvas; every
//! point is written exactly once per call.

pub mod glitch;
pub mod mandelbrot;
pub mod plasma;
pub mod rotate;
pub mod swirl;
pub mod xor;
