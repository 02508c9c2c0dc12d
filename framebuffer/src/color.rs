/// A simple RGB color with transparency.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: u8,
}

impl Color {
    /// Creates a new opaque color from R, G and B components
    pub fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color {
            r,
            g,
            b,
            alpha: 255,
        }
    }

    /// Creates a new color from R, G, B and transparency components
    pub fn rgba(r: u8, g: u8, b: u8, alpha: u8) -> Color {
        Color { r, g, b, alpha }
    }

    /// Combines this color (the destination) with the source using
    /// `destination AND NOT source` on every channel. The alpha of the
    /// destination is kept.
    pub fn erase(&self, source: Color) -> Color {
        Color::rgba(
            self.r & !source.r,
            self.g & !source.g,
            self.b & !source.b,
            self.alpha,
        )
    }

    /// Returns a Color representing pure white
    pub fn white() -> Color {
        Color::rgb(255, 255, 255)
    }

    /// Returns a Color representing pure black
    pub fn black() -> Color {
        Color::rgb(0, 0, 0)
    }
}

/// A color in hue, saturation and lightness form, each in [0, 1].
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub fn new(h: f64, s: f64, l: f64) -> Hsl {
        Hsl { h, s, l }
    }

    /// Converts an RGB color into HSL. Grays (r == g == b) come back with
    /// zero hue and saturation.
    pub fn from_color(color: Color) -> Hsl {
        let r = color.r as f64 / 255.0;
        let g = color.g as f64 / 255.0;
        let b = color.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl::new(0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl::new(h / 6.0, s, l)
    }

    /// Converts this color into an opaque RGB color. Components are clamped
    /// to [0, 1] first, and channels are truncated toward zero.
    pub fn to_color(&self) -> Color {
        let h = self.h.max(0.0).min(1.0);
        let s = self.s.max(0.0).min(1.0);
        let l = self.l.max(0.0).min(1.0);

        let (r, g, b) = if s == 0.0 {
            // achromatic
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;
            (
                hue_to_channel(p, q, h + 1.0 / 3.0),
                hue_to_channel(p, q, h),
                hue_to_channel(p, q, h - 1.0 / 3.0),
            )
        };

        Color::rgb(to_byte(r), to_byte(g), to_byte(b))
    }
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Scales a [0, 1] channel to a byte. `as` saturates, so rounding noise just
/// outside the range still lands on 0 or 255.
fn to_byte(channel: f64) -> u8 {
    (channel * 255.0) as u8
}
