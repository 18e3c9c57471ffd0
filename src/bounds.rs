use crate::geometry::Point;
use crate::{Result, VoronoiError};

/// Bounding box ID for the left side (minimum x), it is negative to prevent conflicts with site indices.
pub const BOX_ID_LEFT: i32 = -1;
/// Bounding box ID for the right side (maximum x), it is negative to prevent conflicts with site indices.
pub const BOX_ID_RIGHT: i32 = -2;
/// Bounding box ID for the top side (minimum y), it is negative to prevent conflicts with site indices.
pub const BOX_ID_TOP: i32 = -3;
/// Bounding box ID for the bottom side (maximum y), it is negative to prevent conflicts with site indices.
pub const BOX_ID_BOTTOM: i32 = -4;

/// Axis-aligned rectangle the diagram is clipped to.
///
/// The sweep advances towards increasing y, so `min[1]` is the "top" and
/// `max[1]` the "bottom" of the box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl BoundingBox {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Self { min, max }
    }

    pub fn xl(&self) -> f64 {
        self.min[0]
    }

    pub fn xr(&self) -> f64 {
        self.max[0]
    }

    pub fn yt(&self) -> f64 {
        self.min[1]
    }

    pub fn yb(&self) -> f64 {
        self.max[1]
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.min[0] && p.x <= self.max[0] && p.y >= self.min[1] && p.y <= self.max[1]
    }

    /// Rejects boxes with non-finite corners or an empty extent.
    pub fn validate(&self) -> Result<()> {
        let finite = self.min.iter().chain(self.max.iter()).all(|v| v.is_finite());
        if !finite || self.min[0] >= self.max[0] || self.min[1] >= self.max[1] {
            return Err(VoronoiError::InvalidBounds {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// One side of the bounding box, visited in perimeter-walk order by [`BoxSide::next`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoxSide {
    Left,
    Bottom,
    Right,
    Top,
}

impl BoxSide {
    /// Left -> Bottom -> Right -> Top -> Left.
    pub fn next(self) -> BoxSide {
        match self {
            BoxSide::Left => BoxSide::Bottom,
            BoxSide::Bottom => BoxSide::Right,
            BoxSide::Right => BoxSide::Top,
            BoxSide::Top => BoxSide::Left,
        }
    }

    /// Negative neighbor id reported for half-edges lying on this side.
    pub fn id(self) -> i32 {
        match self {
            BoxSide::Left => BOX_ID_LEFT,
            BoxSide::Right => BOX_ID_RIGHT,
            BoxSide::Top => BOX_ID_TOP,
            BoxSide::Bottom => BOX_ID_BOTTOM,
        }
    }
}
