use crate::constants::EPSILON;
use crate::diagram::HalfEdge;
use crate::geometry::Point;

/// A closed Voronoi cell: the polygon of all points closer to its site than
/// to any other site, clipped to the bounding box.
#[derive(Clone, Debug)]
pub struct Cell {
    pub(crate) site: usize,
    pub(crate) position: Point,
    pub(crate) half_edges: Vec<HalfEdge>,
    pub(crate) closed: bool,
    // Start point of each half-edge, in half-edge order.
    pub(crate) vertices: Vec<Point>,
    // Neighbor across each half-edge; negative for a box side.
    pub(crate) neighbors: Vec<i32>,
}

impl Cell {
    pub(crate) fn new(site: usize, position: Point) -> Cell {
        Cell {
            site,
            position,
            half_edges: Vec::new(),
            closed: true,
            vertices: Vec::new(),
            neighbors: Vec::new(),
        }
    }

    /// Input index of the site owning this cell.
    pub fn id(&self) -> usize {
        self.site
    }

    pub fn site(&self) -> Point {
        self.position
    }

    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.half_edges
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Vertices as a flat `[x, y, x, y, ...]` buffer.
    pub fn flat_vertices(&self) -> Vec<f64> {
        self.vertices.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    /// Neighbor for each half-edge: the other site's index, or one of the
    /// negative `BOX_ID_*` values for the box sides.
    pub fn neighbors(&self) -> &[i32] {
        &self.neighbors
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.len() < 3
    }

    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 { return 0.0; }

        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            let vi = self.vertices[i];
            let vj = self.vertices[j];
            area += vi.x * vj.y - vj.x * vi.y;
        }
        (area * 0.5).abs()
    }

    /// Centroid of the polygon; falls back to the site for degenerate cells.
    pub fn centroid(&self) -> Point {
        let n = self.vertices.len();
        if n < 3 { return self.position; }

        let mut cx = 0.0;
        let mut cy = 0.0;
        let mut area = 0.0;

        for i in 0..n {
            let j = (i + 1) % n;
            let vi = self.vertices[i];
            let vj = self.vertices[j];

            let cross = vi.x * vj.y - vj.x * vi.y;
            area += cross;
            cx += (vi.x + vj.x) * cross;
            cy += (vi.y + vj.y) * cross;
        }

        if area.abs() < EPSILON {
            return self.position;
        }

        let factor = 1.0 / (3.0 * area);
        Point::new(cx * factor, cy * factor)
    }

    /// Strict point-in-polygon test; points on the boundary are outside.
    pub fn contains(&self, p: &Point) -> bool {
        let n = self.vertices.len();
        if n < 3 { return false; }

        let mut positive = 0;
        let mut negative = 0;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
            // Zero-length sides carry no orientation.
            if a.approx_eq(&b) {
                continue;
            }
            if cross > EPSILON {
                positive += 1;
            } else if cross < -EPSILON {
                negative += 1;
            } else {
                return false;
            }
        }
        positive == 0 || negative == 0
    }
}
