use crate::constants::approx_eq;

/// A point in the plane.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn dist_sq(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn dist(&self, other: &Point) -> f64 {
        self.dist_sq(other).sqrt()
    }

    /// Equality within `EPSILON` on both axes.
    pub fn approx_eq(&self, other: &Point) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }
}

impl From<[f64; 2]> for Point {
    fn from(p: [f64; 2]) -> Self {
        Point::new(p[0], p[1])
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Twice the signed area of the triangle `(b, a, c)` with `b` as the pivot.
///
/// Negative when `a -> b -> c` turns the way the sweep needs for a converging
/// circle event.
pub fn orientation(a: Point, b: Point, c: Point) -> f64 {
    let ax = a.x - b.x;
    let ay = a.y - b.y;
    let cx = c.x - b.x;
    let cy = c.y - b.y;
    2.0 * (ax * cy - ay * cx)
}

/// Circumcenter of `a`, `b`, `c`, evaluated relative to `b` to keep the
/// subtraction of nearby coordinates out of the products.
///
/// Returns `None` for collinear input.
pub fn circumcenter(a: Point, b: Point, c: Point) -> Option<Point> {
    let ax = a.x - b.x;
    let ay = a.y - b.y;
    let cx = c.x - b.x;
    let cy = c.y - b.y;
    let d = 2.0 * (ax * cy - ay * cx);
    if d == 0.0 {
        return None;
    }
    let ha = ax * ax + ay * ay;
    let hc = cx * cx + cy * cy;
    Some(Point::new(
        (cy * ha - ay * hc) / d + b.x,
        (ax * hc - cx * ha) / d + b.y,
    ))
}
