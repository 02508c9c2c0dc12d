use clap::Parser;
use framebuffer::Encoding;
use shaders::{Mode, Quirks};
use std::time::{Duration, SystemTime};

/// Runs one procedural effect and streams its frames to stdout.
///
/// Frames are binary PPM images by default, e.g.
/// `shaderloop plasma | ffplay -f image2pipe -i -`.
#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Effect to run: xor, mandelbrot, plasma, rotate, swirl or glitch
    pub mode: Mode,

    /// Frame width in pixels
    #[arg(long, default_value_t = 800, allow_negative_numbers = true)]
    pub width: i64,

    /// Frame height in pixels
    #[arg(long, default_value_t = 600, allow_negative_numbers = true)]
    pub height: i64,

    /// Stop after this many frames instead of running until interrupted
    #[arg(long)]
    pub frames: Option<u64>,

    /// Noise seed as one number or two comma-separated numbers
    #[arg(long, value_parser = parse_seed)]
    pub seed: Option<[u64; 2]>,

    /// Write bare pixels in the mode's own layout instead of PPM images
    #[arg(long)]
    pub raw: bool,

    /// Pause between frames in milliseconds, overriding the mode's cadence
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Glitch bands read channels already rewritten by the same band rule
    #[arg(long)]
    pub chained_glitch_bands: bool,

    /// Swirl phase adds the XOR term instead of OR-ing it in
    #[arg(long)]
    pub additive_swirl_phase: bool,

    /// Rotation uses the skewed corner points instead of a centered turn
    #[arg(long)]
    pub skewed_corners: bool,
}

impl Cli {
    pub fn quirks(&self) -> Quirks {
        let mut quirks = Quirks::default();
        if self.chained_glitch_bands {
            quirks |= Quirks::GLITCH_CHAINED_BANDS;
        }
        if self.additive_swirl_phase {
            quirks.remove(Quirks::SWIRL_BITWISE_PHASE);
        }
        if self.skewed_corners {
            quirks |= Quirks::SKEWED_CORNERS;
        }
        quirks
    }

    pub fn encoding(&self) -> Encoding {
        if self.raw {
            Encoding::Raw
        } else {
            Encoding::Ppm
        }
    }

    pub fn frame_delay(&self) -> Duration {
        self.delay_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| self.mode.frame_delay())
    }

    /// The configured seed, or one made up from the current process ID and
    /// time
    pub fn seed(&self) -> [u64; 2] {
        self.seed.unwrap_or_else(|| {
            let time = SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .unwrap_or(Duration::new(0, 0))
                .as_secs();
            [std::process::id() as u64 | 1, time]
        })
    }
}

fn parse_seed(s: &str) -> Result<[u64; 2], String> {
    let parts = s
        .split(',')
        .map(|part| part.trim().parse::<u64>().map_err(|e| format!("{:?}: {}", part, e)))
        .collect::<Result<Vec<_>, _>>()?;

    let seed = match parts.as_slice() {
        [single] => [*single, !*single],
        [first, second] => [*first, *second],
        _ => return Err("expected one or two comma-separated numbers".to_string()),
    };

    if seed == [0, 0] {
        return Err("seed needs at least one non-zero half".to_string());
    }
    Ok(seed)
}
