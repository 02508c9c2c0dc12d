use crate::error::Error;
use crate::effects::swirl;
use framebuffer::{Composite, PixelFormat};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// The six frame generators
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Mode {
    XorRgb,
    MandelbrotHsl,
    Plasma,
    RotatedDistortion,
    SwirlXor,
    NoiseGlitch,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::XorRgb,
        Mode::MandelbrotHsl,
        Mode::Plasma,
        Mode::RotatedDistortion,
        Mode::SwirlXor,
        Mode::NoiseGlitch,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Mode::XorRgb => "xor",
            Mode::MandelbrotHsl => "mandelbrot",
            Mode::Plasma => "plasma",
            Mode::RotatedDistortion => "rotate",
            Mode::SwirlXor => "swirl",
            Mode::NoiseGlitch => "glitch",
        }
    }

    /// The time parameter this mode uses on the given frame
    pub fn time_at(&self, frame: u64) -> f64 {
        match self {
            Mode::XorRgb | Mode::SwirlXor => frame as f64,
            Mode::Plasma => frame as f64 * 0.03,
            Mode::RotatedDistortion => frame as f64 * 0.01,
            Mode::MandelbrotHsl | Mode::NoiseGlitch => 0.0,
        }
    }

    /// How finished frames are combined with what is already on screen
    pub fn composite(&self) -> Composite {
        match self {
            Mode::MandelbrotHsl | Mode::RotatedDistortion | Mode::SwirlXor => Composite::Erase,
            Mode::XorRgb | Mode::Plasma | Mode::NoiseGlitch => Composite::Copy,
        }
    }

    /// The layout this mode's frames are laid out in on screen
    pub fn pixel_format(&self) -> PixelFormat {
        match self {
            Mode::MandelbrotHsl | Mode::Plasma => PixelFormat::Bgra32,
            _ => PixelFormat::Bgr24,
        }
    }

    /// Pause between two frames
    pub fn frame_delay(&self) -> Duration {
        match self {
            Mode::MandelbrotHsl => Duration::from_millis(10),
            _ => Duration::from_millis(1),
        }
    }

    /// Offset at which the screen is erase-composited onto itself before a
    /// frame is drawn, for modes that feed back on their own output
    pub fn feedback_offset(&self, t: f64) -> Option<(i64, i64)> {
        match self {
            Mode::SwirlXor => Some(swirl::offset(t as i64)),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Mode, Error> {
        let lower = s.trim().to_lowercase();
        Mode::ALL
            .iter()
            .copied()
            .find(|mode| mode.name() == lower)
            .ok_or_else(|| Error::UnknownMode(s.to_string()))
    }
}
