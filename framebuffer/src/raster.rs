use crate::color::Color;

/// How a source pixel is combined with the destination pixel under it
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Composite {
    /// The source replaces the destination
    Copy,
    /// `destination AND NOT source` per channel
    Erase,
}

impl Composite {
    pub fn apply(&self, dest: Color, source: Color) -> Color {
        match self {
            Composite::Copy => source,
            Composite::Erase => dest.erase(source),
        }
    }
}

/// A point on the destination plane, in pixels
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    /// Rotates this point around the given center by `theta` radians
    pub fn rotate(&self, center: Point, theta: f64) -> Point {
        let (sn, cs) = theta.sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point::new(
            center.x + dx * cs - dy * sn,
            center.y + dx * sn + dy * cs,
        )
    }
}

/// An affine map from a width x height source rectangle onto the
/// parallelogram whose upper-left, upper-right and lower-left corners are
/// given
pub struct Parallelogram {
    origin: Point,
    // Destination displacement per source pixel along x and along y
    ux: f64,
    uy: f64,
    vx: f64,
    vy: f64,
    det: f64,
}

impl Parallelogram {
    pub fn new(corners: [Point; 3], width: u32, height: u32) -> Parallelogram {
        let [origin, right, bottom] = corners;
        let ux = (right.x - origin.x) / width as f64;
        let uy = (right.y - origin.y) / width as f64;
        let vx = (bottom.x - origin.x) / height as f64;
        let vy = (bottom.y - origin.y) / height as f64;

        Parallelogram {
            origin,
            ux,
            uy,
            vx,
            vy,
            det: ux * vy - vx * uy,
        }
    }

    /// Whether the corners collapse onto a line (or a point)
    pub fn is_degenerate(&self) -> bool {
        !self.det.is_finite() || self.det.abs() < 1e-12
    }

    /// Maps a destination point back into source coordinates
    pub fn to_source(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if self.is_degenerate() {
            return None;
        }

        let dx = x - self.origin.x;
        let dy = y - self.origin.y;
        Some((
            (dx * self.vy - dy * self.vx) / self.det,
            (self.ux * dy - self.uy * dx) / self.det,
        ))
    }
}
