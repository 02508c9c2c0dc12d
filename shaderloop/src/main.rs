mod config;
mod driver;

use anyhow::{Context, Result};
use clap::Parser;
use config::Cli;
use driver::Limits;
use framebuffer::{DisplaySurface, StreamSurface, SurfaceError};
use log::info;
use shaders::Generator;
use signal_hook::consts::{SIGINT, SIGTERM};
use std::io;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    let stop = Arc::new(AtomicBool::new(false));
    for signal in &[SIGINT, SIGTERM] {
        signal_hook::flag::register(*signal, Arc::clone(&stop))
            .with_context(|| format!("registering handler for signal {}", signal))?;
    }

    let stdout = io::stdout();
    let mut surface = StreamSurface::new(io::BufWriter::new(stdout.lock()), cli.encoding());

    let (width, height) = shaders::validate_dimensions(cli.width, cli.height)?;
    let buffer = surface
        .acquire_buffer(width, height, cli.mode.pixel_format())
        .context("acquiring the output surface")?;
    let rng = shaders::noise_source(cli.seed())?;
    let mut generator = Generator::with_buffer(cli.mode, buffer, rng)?.with_quirks(cli.quirks());

    info!(
        "running {} at {}x{} ({:?}, {})",
        cli.mode,
        generator.width(),
        generator.height(),
        cli.encoding(),
        surface.format().name()
    );

    let limits = Limits {
        frames: cli.frames,
        delay: cli.frame_delay(),
    };

    match driver::run(&mut generator, &mut surface, &stop, limits) {
        Ok(shown) => {
            info!("showed {} frames", shown);
            Ok(())
        }
        Err(SurfaceError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
            info!("output closed, stopping");
            Ok(())
        }
        Err(e) => Err(e).context("presenting frames"),
    }
}
