use framebuffer::{DisplaySurface, SurfaceError};
use log::info;
use random::Source;
use shaders::Generator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// When the frame loop should end on its own
#[derive(Clone, Copy, Debug)]
pub struct Limits {
    pub frames: Option<u64>,
    pub delay: Duration,
}

/// Steps the generator against the surface until the stop flag is raised or
/// the frame limit is reached. The flag is checked once per frame boundary.
/// Returns how many frames were shown.
pub fn run<R, S>(
    generator: &mut Generator<R>,
    surface: &mut S,
    stop: &AtomicBool,
    limits: Limits,
) -> Result<u64, SurfaceError>
where
    R: Source,
    S: DisplaySurface,
{
    let mut shown = 0;
    loop {
        if stop.load(Ordering::Relaxed) {
            info!("stopping after {} frames", shown);
            break;
        }

        if limits.frames.map_or(false, |limit| shown >= limit) {
            break;
        }

        generator.step(surface)?;
        shown += 1;

        if limits.delay > Duration::from_millis(0) {
            thread::sleep(limits.delay);
        }
    }

    Ok(shown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use framebuffer::{Encoding, FrameBuffer, PixelFormat, StreamSurface};
    use random::Xorshift128Plus;
    use shaders::Mode;
    use std::io;

    fn no_delay(frames: Option<u64>) -> Limits {
        Limits {
            frames,
            delay: Duration::from_millis(0),
        }
    }

    fn attach(mode: Mode, surface: &mut StreamSurface<Vec<u8>>) -> Generator {
        let buffer = surface.acquire_buffer(5, 4, mode.pixel_format()).unwrap();
        Generator::with_buffer(mode, buffer, Xorshift128Plus::new([1, 2])).unwrap()
    }

    #[test]
    fn stops_at_the_frame_limit() {
        let mut surface = StreamSurface::new(Vec::new(), Encoding::Raw);
        let mut generator = attach(Mode::Plasma, &mut surface);
        let stop = AtomicBool::new(false);

        let shown = run(&mut generator, &mut surface, &stop, no_delay(Some(3))).unwrap();
        assert_eq!(shown, 3);
        assert_eq!(surface.presented(), 3);
        assert_eq!(
            surface.into_inner().len(),
            3 * 5 * 4 * PixelFormat::Bgra32.bytes_per_pixel()
        );
    }

    #[test]
    fn raised_flag_stops_before_the_first_frame() {
        let mut surface = StreamSurface::new(Vec::new(), Encoding::Ppm);
        let mut generator = attach(Mode::NoiseGlitch, &mut surface);
        let stop = AtomicBool::new(true);

        assert_eq!(run(&mut generator, &mut surface, &stop, no_delay(None)).unwrap(), 0);
        assert_eq!(surface.presented(), 0);
    }

    /// Raises the stop flag once the given number of frames was shown
    struct StopAfter<'a> {
        inner: StreamSurface<Vec<u8>>,
        stop: &'a AtomicBool,
        after: u64,
    }

    impl<'a> DisplaySurface for StopAfter<'a> {
        fn acquire_buffer(
            &mut self,
            width: u32,
            height: u32,
            format: PixelFormat,
        ) -> Result<FrameBuffer, SurfaceError> {
            self.inner.acquire_buffer(width, height, format)
        }

        fn screen(&self) -> &FrameBuffer {
            self.inner.screen()
        }

        fn composite_with_inverted_destination(
            &mut self,
            source: &FrameBuffer,
            dx: i64,
            dy: i64,
        ) -> Result<(), SurfaceError> {
            self.inner.composite_with_inverted_destination(source, dx, dy)
        }

        fn present(
            &mut self,
            frame: &FrameBuffer,
            composite: framebuffer::Composite,
        ) -> Result<(), SurfaceError> {
            self.inner.present(frame, composite)?;
            if self.inner.presented() >= self.after {
                self.stop.store(true, Ordering::Relaxed);
            }
            Ok(())
        }
    }

    #[test]
    fn flag_raised_mid_run_stops_at_the_next_boundary() {
        let stop = AtomicBool::new(false);
        let mut surface = StopAfter {
            inner: StreamSurface::new(Vec::new(), Encoding::Ppm),
            stop: &stop,
            after: 4,
        };
        let buffer = surface.acquire_buffer(3, 3, PixelFormat::Bgr24).unwrap();
        let mut generator =
            Generator::with_buffer(Mode::SwirlXor, buffer, Xorshift128Plus::new([3, 4])).unwrap();

        let shown = run(&mut generator, &mut surface, &stop, no_delay(None)).unwrap();
        assert_eq!(shown, 4);
        assert_eq!(generator.state().frame(), 4);
    }

    struct BrokenPipe;

    impl io::Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn surface_errors_end_the_run() {
        let mut surface = StreamSurface::new(BrokenPipe, Encoding::Ppm);
        let buffer = surface.acquire_buffer(2, 2, PixelFormat::Bgr24).unwrap();
        let mut generator = Generator::with_buffer(Mode::XorRgb, buffer, Xorshift128Plus::new([3, 4])).unwrap();
        let stop = AtomicBool::new(false);

        match run(&mut generator, &mut surface, &stop, no_delay(None)) {
            Err(SurfaceError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("unexpected {:?}", other),
        }
    }
}
