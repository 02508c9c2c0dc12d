use crate::effects::{glitch, mandelbrot, plasma, rotate, swirl, xor};
use crate::error::Error;
use crate::mode::Mode;
use crate::quirks::Quirks;
use framebuffer::{Canvas, Color, DisplaySurface, FrameBuffer, GraphicBuffer, SurfaceError};
use log::{debug, trace};
use random::{Source, Xorshift128Plus};
use std::mem;

/// Seed used when the caller does not bring its own random source. Never
/// all zeroes, which would stall the generator.
pub const DEFAULT_SEED: [u64; 2] = [0x9e37_79b9_7f4a_7c15, 0xbf58_476d_1ce4_e5b9];

/// A random source owned by one generator. An all-zero seed only ever yields
/// zeroes and is rejected.
pub fn noise_source(seed: [u64; 2]) -> Result<Xorshift128Plus, Error> {
    if seed == [0, 0] {
        return Err(Error::InvalidSeed);
    }
    Ok(Xorshift128Plus::new(seed))
}

/// The only state carried from one frame to the next
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct GenerationState {
    frame: u64,
}

impl GenerationState {
    pub fn new() -> GenerationState {
        GenerationState { frame: 0 }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The time parameter the given mode sees on the current frame
    pub fn time(&self, mode: Mode) -> f64 {
        mode.time_at(self.frame)
    }

    pub fn advance(&mut self) {
        self.frame += 1;
    }
}

/// Checks that a frame of this size can be allocated, i.e. both sides are
/// positive and fit in a u32
pub fn validate_dimensions(width: i64, height: i64) -> Result<(u32, u32), Error> {
    let fits = |v: i64| v > 0 && v <= u32::MAX as i64;
    if fits(width) && fits(height) {
        Ok((width as u32, height as u32))
    } else {
        Err(Error::InvalidDimensions { width, height })
    }
}

/// Renders frames of one mode into a buffer it keeps between frames
pub struct Generator<R: Source = Xorshift128Plus> {
    mode: Mode,
    quirks: Quirks,
    state: GenerationState,
    rng: R,
    canvas: Canvas<Color, FrameBuffer>,
    // Coarse source image for the rotation, reused across frames
    scratch: Option<Canvas<Color, FrameBuffer>>,
}

impl Generator<Xorshift128Plus> {
    /// A generator whose noise comes from DEFAULT_SEED
    pub fn new(mode: Mode, width: i64, height: i64) -> Result<Generator, Error> {
        Generator::seeded(mode, width, height, DEFAULT_SEED)
    }

    pub fn seeded(mode: Mode, width: i64, height: i64, seed: [u64; 2]) -> Result<Generator, Error> {
        let rng = noise_source(seed)?;
        Generator::with_source(mode, width, height, rng)
    }
}

impl<R: Source> Generator<R> {
    pub fn with_source(mode: Mode, width: i64, height: i64, rng: R) -> Result<Generator<R>, Error> {
        let (width, height) = validate_dimensions(width, height)?;
        Generator::with_buffer(mode, FrameBuffer::new(width, height), rng)
    }

    /// Draws into a buffer handed out by a surface
    pub fn with_buffer(mode: Mode, buffer: FrameBuffer, rng: R) -> Result<Generator<R>, Error> {
        let (width, height) = validate_dimensions(buffer.width() as i64, buffer.height() as i64)?;
        debug!("{} generator for {}x{} frames", mode, width, height);

        Ok(Generator {
            mode,
            quirks: Quirks::default(),
            state: GenerationState::new(),
            rng,
            canvas: Canvas::new(buffer, Color::black()),
            scratch: None,
        })
    }

    pub fn with_quirks(mut self, quirks: Quirks) -> Generator<R> {
        self.quirks = quirks;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// The most recently rendered frame
    pub fn frame(&self) -> &FrameBuffer {
        self.canvas.buffer()
    }

    /// Renders one complete frame at time t. Integer-stepped modes truncate t.
    pub fn render(&mut self, t: f64) -> &FrameBuffer {
        match self.mode {
            Mode::XorRgb => xor::render(&mut self.canvas, t as i64),
            Mode::MandelbrotHsl => mandelbrot::render(&mut self.canvas),
            Mode::Plasma => plasma::render(&mut self.canvas, t),
            Mode::RotatedDistortion => {
                let (width, height) = (self.canvas.width(), self.canvas.height());
                let scratch = self
                    .scratch
                    .get_or_insert_with(|| Canvas::new(FrameBuffer::new(width, height), Color::black()));
                rotate::render(
                    &mut self.canvas,
                    scratch,
                    t,
                    self.quirks.contains(Quirks::SKEWED_CORNERS),
                );
            }
            Mode::SwirlXor => swirl::render(
                &mut self.canvas,
                t as i64,
                self.quirks.contains(Quirks::SWIRL_BITWISE_PHASE),
            ),
            Mode::NoiseGlitch => glitch::render(
                &mut self.canvas,
                &mut self.rng,
                self.quirks.contains(Quirks::GLITCH_CHAINED_BANDS),
            ),
        }

        self.canvas.buffer()
    }

    /// Renders the frame for the current state and moves the state on
    pub fn next_frame(&mut self) -> &FrameBuffer {
        let t = self.state.time(self.mode);
        self.state.advance();
        self.render(t)
    }

    /// Draws the current frame onto the surface: feeds the screen back onto
    /// itself if the mode asks for it, renders, presents with the mode's
    /// composite rule, then moves the state on.
    ///
    /// If the surface fails the state stays put, but a feedback composite
    /// that already happened is not undone. Retrying the step feeds the
    /// screen back a second time.
    pub fn step<S: DisplaySurface>(&mut self, surface: &mut S) -> Result<(), SurfaceError> {
        let t = self.state.time(self.mode);

        if let Some((dx, dy)) = self.mode.feedback_offset(t) {
            let snapshot = surface.screen().clone();
            surface.composite_with_inverted_destination(&snapshot, dx, dy)?;
        }

        self.render(t);
        surface.present(self.canvas.buffer(), self.mode.composite())?;

        trace!("{} frame {} at t={}", self.mode, self.state.frame(), t);
        self.state.advance();
        Ok(())
    }
}

/// Renders a single frame of the given mode. The noise mode draws from
/// DEFAULT_SEED, so repeated calls give the same frame.
pub fn generate(mode: Mode, width: i64, height: i64, t: f64) -> Result<FrameBuffer, Error> {
    let (w, h) = validate_dimensions(width, height)?;
    let mut frame = FrameBuffer::new(w, h);
    generate_into(mode, &mut frame, width, height, t)?;
    Ok(frame)
}

/// Like `generate`, but reuses a frame the caller already holds. The frame
/// must be exactly width x height.
pub fn generate_into(
    mode: Mode,
    frame: &mut FrameBuffer,
    width: i64,
    height: i64,
    t: f64,
) -> Result<(), Error> {
    let expected = validate_dimensions(width, height)?;
    let actual = (frame.width(), frame.height());
    if expected != actual {
        return Err(Error::SizeMismatch { expected, actual });
    }

    let buffer = mem::replace(frame, FrameBuffer::new(0, 0));
    let mut generator = Generator::with_buffer(mode, buffer, Xorshift128Plus::new(DEFAULT_SEED))?;
    generator.render(t);
    *frame = generator.canvas.into_buffer();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use framebuffer::{Composite, Encoding, PixelFormat, StreamSurface};

    fn rng() -> Xorshift128Plus {
        Xorshift128Plus::new(DEFAULT_SEED)
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert_eq!(
            generate(Mode::XorRgb, 0, 10, 0.0).err(),
            Some(Error::InvalidDimensions { width: 0, height: 10 })
        );
        assert_eq!(
            generate(Mode::Plasma, 10, -1, 0.0).err(),
            Some(Error::InvalidDimensions { width: 10, height: -1 })
        );
        assert!(Generator::new(Mode::NoiseGlitch, 1 << 33, 1).is_err());
    }

    #[test]
    fn generate_into_reuses_the_frame() {
        let mut frame = FrameBuffer::new(5, 3);
        generate_into(Mode::Plasma, &mut frame, 5, 3, 1.5).unwrap();
        assert_eq!(frame, generate(Mode::Plasma, 5, 3, 1.5).unwrap());
    }

    #[test]
    fn generate_into_checks_the_frame_size() {
        let mut frame = FrameBuffer::new(5, 3);
        assert_eq!(
            generate_into(Mode::XorRgb, &mut frame, 3, 5, 0.0),
            Err(Error::SizeMismatch {
                expected: (3, 5),
                actual: (5, 3)
            })
        );
        assert_eq!(
            generate_into(Mode::XorRgb, &mut frame, 0, 3, 0.0),
            Err(Error::InvalidDimensions { width: 0, height: 3 })
        );
        // Left untouched on failure
        assert_eq!((frame.width(), frame.height()), (5, 3));
    }

    #[test]
    fn generators_can_move_between_threads() {
        fn assert_send<T: Send>() {}
        assert_send::<Generator>();
    }

    #[test]
    fn one_pixel_frames_are_fine() {
        for mode in Mode::ALL.iter() {
            let frame = generate(*mode, 1, 1, 0.0).unwrap();
            assert_eq!((frame.width(), frame.height()), (1, 1));
        }
    }

    #[test]
    fn empty_surface_buffers_are_rejected() {
        let result = Generator::with_buffer(Mode::XorRgb, FrameBuffer::new(0, 3), rng());
        assert!(matches!(result, Err(Error::InvalidDimensions { .. })));
    }

    #[test]
    fn next_frame_advances_time() {
        let mut generator = Generator::new(Mode::XorRgb, 4, 4).unwrap();
        generator.next_frame();
        assert_eq!(generator.frame().get_point(0, 0), Some(Color::black()));
        generator.next_frame();
        assert_eq!(generator.frame().get_point(0, 0), Some(Color::rgb(1, 1, 1)));
        assert_eq!(generator.state().frame(), 2);
    }

    #[test]
    fn same_seed_same_noise() {
        let a = Generator::seeded(Mode::NoiseGlitch, 16, 16, [1, 2]).unwrap().next_frame().clone();
        let b = Generator::seeded(Mode::NoiseGlitch, 16, 16, [1, 2]).unwrap().next_frame().clone();
        let c = Generator::seeded(Mode::NoiseGlitch, 16, 16, [3, 4]).unwrap().next_frame().clone();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn generators_keep_their_own_noise() {
        let mut a = Generator::seeded(Mode::NoiseGlitch, 4, 1, [1, 2]).unwrap();
        let mut b = Generator::seeded(Mode::NoiseGlitch, 4, 1, [1, 2]).unwrap();

        let a1 = a.next_frame().clone();
        let b1 = b.next_frame().clone();
        let a2 = a.next_frame().clone();
        let b2 = b.next_frame().clone();
        assert_eq!(a1, b1);
        assert_eq!(a2, b2);
        assert_ne!(a1, a2);
    }

    #[test]
    fn generate_leaves_live_generators_alone() {
        let mut reference = Generator::seeded(Mode::NoiseGlitch, 4, 2, [7, 8]).unwrap();
        reference.next_frame();
        let expected = reference.next_frame().clone();

        let mut generator = Generator::seeded(Mode::NoiseGlitch, 4, 2, [7, 8]).unwrap();
        generator.next_frame();
        generate(Mode::NoiseGlitch, 4, 2, 0.0).unwrap();
        Generator::seeded(Mode::NoiseGlitch, 4, 2, [9, 9]).unwrap().next_frame();
        assert_eq!(generator.next_frame(), &expected);
    }

    #[test]
    fn all_zero_seed_is_rejected() {
        assert!(matches!(
            Generator::seeded(Mode::NoiseGlitch, 4, 1, [0, 0]),
            Err(Error::InvalidSeed)
        ));
        assert!(noise_source([0, 1]).is_ok());
    }

    #[test]
    fn noise_changes_between_frames() {
        let mut generator = Generator::new(Mode::NoiseGlitch, 8, 8).unwrap();
        let first = generator.next_frame().clone();
        assert_ne!(&first, generator.next_frame());
    }

    #[test]
    fn chained_bands_quirk_changes_output() {
        let plain = Generator::seeded(Mode::NoiseGlitch, 4, 12, [5, 6])
            .unwrap()
            .next_frame()
            .clone();
        let chained = Generator::seeded(Mode::NoiseGlitch, 4, 12, [5, 6])
            .unwrap()
            .with_quirks(Quirks::GLITCH_CHAINED_BANDS)
            .next_frame()
            .clone();
        // Band 0 rows agree, band 1 rows read rewritten channels
        assert_eq!(plain.get_point(2, 3), chained.get_point(2, 3));
        assert_ne!(&plain.pixels()[4 * 3 * 10..], &chained.pixels()[4 * 3 * 10..]);
    }

    #[test]
    fn swirl_phase_quirk_changes_output() {
        let bitwise = generate(Mode::SwirlXor, 32, 32, 3.0).unwrap();
        let mut generator = Generator::new(Mode::SwirlXor, 32, 32)
            .unwrap()
            .with_quirks(Quirks::NONE);
        assert_ne!(&bitwise, generator.render(3.0));
    }

    #[test]
    fn step_presents_each_frame_once() {
        let mut surface = StreamSurface::new(Vec::new(), Encoding::Raw);
        let buffer = surface.acquire_buffer(8, 4, Mode::XorRgb.pixel_format()).unwrap();
        let mut generator = Generator::with_buffer(Mode::XorRgb, buffer, rng()).unwrap();

        generator.step(&mut surface).unwrap();
        generator.step(&mut surface).unwrap();
        assert_eq!(surface.presented(), 2);
        assert_eq!(generator.state().frame(), 2);
        // Copy mode: the screen is the last frame
        assert_eq!(surface.screen(), generator.frame());
        assert_eq!(surface.into_inner().len(), 2 * 8 * 4 * PixelFormat::Bgr24.bytes_per_pixel());
    }

    #[test]
    fn erase_modes_composite_against_the_screen() {
        let mut surface = StreamSurface::new(Vec::new(), Encoding::Ppm);
        let buffer = surface.acquire_buffer(6, 6, PixelFormat::Rgb24).unwrap();

        let mut white = Canvas::new(FrameBuffer::new(6, 6), Color::white());
        white.fill();
        surface.present(white.buffer(), Composite::Copy).unwrap();

        let mut generator =
            Generator::with_buffer(Mode::MandelbrotHsl, buffer, rng()).unwrap();
        generator.step(&mut surface).unwrap();

        let frame = generator.frame().clone();
        for (shown, drawn) in surface.screen().colors().zip(frame.colors()) {
            assert_eq!(shown, Color::white().erase(drawn));
        }
    }

    #[test]
    fn swirl_feeds_the_screen_back_before_drawing() {
        let mut surface = StreamSurface::new(Vec::new(), Encoding::Ppm);
        let buffer = surface.acquire_buffer(4, 12, PixelFormat::Bgr24).unwrap();

        let mut pattern = Canvas::new(FrameBuffer::new(4, 12), Color::black());
        pattern.paint(|x, y| Color::rgb((x * 60) as u8, (y * 20) as u8, 0xAA));
        surface.present(pattern.buffer(), Composite::Copy).unwrap();

        // Frame 0 shifts the screen by (0, 8) onto itself
        let mut expected = Canvas::new(pattern.buffer().clone(), Color::black());
        expected.blit(pattern.buffer(), 0, 8, Composite::Erase);
        let mut aux = Canvas::new(FrameBuffer::new(4, 12), Color::black());
        swirl::render(&mut aux, 0, true);
        expected.blit(aux.buffer(), 0, 0, Composite::Erase);

        let mut generator = Generator::with_buffer(Mode::SwirlXor, buffer, rng()).unwrap();
        generator.step(&mut surface).unwrap();
        assert_eq!(surface.screen(), expected.buffer());
    }

    #[test]
    fn failed_present_does_not_advance() {
        let mut surface = StreamSurface::new(Vec::new(), Encoding::Ppm);
        let mut generator = Generator::new(Mode::Plasma, 3, 3).unwrap();
        assert!(generator.step(&mut surface).is_err());
        assert_eq!(generator.state().frame(), 0);
    }
}
