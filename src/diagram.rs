use std::collections::HashMap;

use crate::bounds::{BoundingBox, BoxSide};
use crate::cell::Cell;
use crate::constants::{EPSILON, VERTEX_GRID, approx_eq, greater_than, less_than};
use crate::events::SiteEvent;
use crate::geometry::Point;
use crate::{Result, VoronoiError};

pub type VertexId = usize;
pub type EdgeId = usize;

/// A bisector between two sites, or a piece of the box boundary.
///
/// Travelling from `start` to `end`, `left_site` lies on the left.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub left_site: usize,
    /// `None` for border edges synthesized while closing cells.
    pub right_site: Option<usize>,
    pub start: Option<VertexId>,
    pub end: Option<VertexId>,
    /// Box side a border edge runs along.
    pub side: Option<BoxSide>,
}

impl Edge {
    fn new(left_site: usize, right_site: Option<usize>) -> Self {
        Edge {
            left_site,
            right_site,
            start: None,
            end: None,
            side: None,
        }
    }

    pub fn is_border(&self) -> bool {
        self.right_site.is_none()
    }

    pub fn is_resolved(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

/// The side of an [`Edge`] owned by one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HalfEdge {
    /// Site owning the cell this half-edge belongs to.
    pub site: usize,
    pub edge: EdgeId,
    /// Polar angle used to order the half-edges around `site`.
    pub angle: f64,
}

/// Outcome of extending an unbounded edge towards the box.
enum RayStart {
    Keep,
    Replace(Point),
    Reject,
}

fn ray_start(existing: Option<Point>, entry: Point, before: impl Fn(&Point) -> bool, beyond: impl Fn(&Point) -> bool) -> RayStart {
    match existing {
        None => RayStart::Replace(entry),
        Some(p) if before(&p) => RayStart::Replace(entry),
        Some(p) if beyond(&p) => RayStart::Reject,
        Some(_) => RayStart::Keep,
    }
}

/// A Voronoi diagram clipped to a bounding box.
///
/// Built by [`crate::generate`]; cells are stored under the input index of
/// their site.
#[derive(Clone, Debug)]
pub struct VoronoiDiagram {
    bounds: BoundingBox,
    sites: Vec<SiteEvent>,
    pub(crate) cells: Vec<Cell>,
    edges: Vec<Edge>,
    vertices: Vec<Point>,
    vertex_lookup: HashMap<(i64, i64), Vec<VertexId>>,
}

impl VoronoiDiagram {
    /// Creates an empty diagram with one cell per site. `sites` must be
    /// ordered by input index.
    pub(crate) fn new(sites: Vec<SiteEvent>, bounds: BoundingBox) -> Self {
        let cells = sites.iter().map(|s| Cell::new(s.index, s.position)).collect();
        VoronoiDiagram {
            bounds,
            sites,
            cells,
            edges: Vec::new(),
            vertices: Vec::new(),
            vertex_lookup: HashMap::new(),
        }
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn sites(&self) -> &[SiteEvent] {
        &self.sites
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn vertex(&self, id: VertexId) -> Point {
        self.vertices[id]
    }

    pub fn site_position(&self, site: usize) -> Point {
        self.sites[site].position
    }

    pub fn half_edge_start(&self, half_edge: &HalfEdge) -> Option<VertexId> {
        let edge = &self.edges[half_edge.edge];
        if edge.left_site == half_edge.site { edge.start } else { edge.end }
    }

    pub fn half_edge_end(&self, half_edge: &HalfEdge) -> Option<VertexId> {
        let edge = &self.edges[half_edge.edge];
        if edge.left_site == half_edge.site { edge.end } else { edge.start }
    }

    fn vertex_key(x: f64, y: f64) -> (i64, i64) {
        ((x / VERTEX_GRID).round() as i64, (y / VERTEX_GRID).round() as i64)
    }

    /// Returns the vertex within `EPSILON` of `p`, creating it if there is none.
    pub(crate) fn create_vertex(&mut self, p: Point) -> VertexId {
        let (kx, ky) = Self::vertex_key(p.x, p.y);
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(bucket) = self.vertex_lookup.get(&(kx + dx, ky + dy)) else {
                    continue;
                };
                if let Some(&id) = bucket.iter().find(|&&id| self.vertices[id].approx_eq(&p)) {
                    return id;
                }
            }
        }
        let id = self.vertices.len();
        self.vertices.push(p);
        self.vertex_lookup.entry((kx, ky)).or_default().push(id);
        id
    }

    fn create_half_edge(&self, edge: EdgeId, site: usize, other: Option<usize>) -> HalfEdge {
        let angle = match other {
            Some(other) => {
                let s = self.site_position(site);
                let o = self.site_position(other);
                (o.y - s.y).atan2(o.x - s.x)
            }
            None => {
                let e = &self.edges[edge];
                match (e.start, e.end) {
                    (Some(a), Some(b)) => {
                        let va = self.vertices[a];
                        let vb = self.vertices[b];
                        if e.left_site == site {
                            (vb.x - va.x).atan2(va.y - vb.y)
                        } else {
                            (va.x - vb.x).atan2(vb.y - va.y)
                        }
                    }
                    _ => 0.0,
                }
            }
        };
        HalfEdge { site, edge, angle }
    }

    /// Adds a bisector between two sites and one half-edge to each of their cells.
    pub(crate) fn create_edge(
        &mut self,
        left_site: usize,
        right_site: usize,
        start: Option<VertexId>,
        end: Option<VertexId>,
    ) -> EdgeId {
        let id = self.edges.len();
        self.edges.push(Edge::new(left_site, Some(right_site)));
        if let Some(v) = start {
            self.set_edge_start_point(id, left_site, right_site, v);
        }
        if let Some(v) = end {
            self.set_edge_end_point(id, left_site, right_site, v);
        }
        let left = self.create_half_edge(id, left_site, Some(right_site));
        self.cells[left_site].half_edges.push(left);
        let right = self.create_half_edge(id, right_site, Some(left_site));
        self.cells[right_site].half_edges.push(right);
        id
    }

    fn create_border_edge(&mut self, site: usize, start: VertexId, end: VertexId, side: BoxSide) -> EdgeId {
        let id = self.edges.len();
        let mut edge = Edge::new(site, None);
        edge.start = Some(start);
        edge.end = Some(end);
        edge.side = Some(side);
        self.edges.push(edge);
        id
    }

    /// Resolves one endpoint of `edge` as seen from `left_site`.
    ///
    /// The first endpoint resolved on an edge fixes its orientation.
    pub(crate) fn set_edge_start_point(&mut self, edge: EdgeId, left_site: usize, right_site: usize, vertex: VertexId) {
        let e = &mut self.edges[edge];
        if e.start.is_none() && e.end.is_none() {
            e.start = Some(vertex);
            e.left_site = left_site;
            e.right_site = Some(right_site);
        } else if e.left_site == right_site {
            e.end = Some(vertex);
        } else {
            e.start = Some(vertex);
        }
    }

    pub(crate) fn set_edge_end_point(&mut self, edge: EdgeId, left_site: usize, right_site: usize, vertex: VertexId) {
        self.set_edge_start_point(edge, right_site, left_site, vertex);
    }

    fn mark_open(&mut self, edge: EdgeId) {
        let (left, right) = (self.edges[edge].left_site, self.edges[edge].right_site);
        self.cells[left].closed = false;
        if let Some(right) = right {
            self.cells[right].closed = false;
        }
    }

    /// Gives every unbounded edge an endpoint on the box boundary.
    ///
    /// Returns `false` when the bisector misses the box entirely.
    fn connect_edge(&mut self, id: EdgeId) -> bool {
        let edge = &self.edges[id];
        if edge.end.is_some() {
            return true;
        }
        let Some(right_site) = edge.right_site else {
            return false;
        };
        let left = self.site_position(edge.left_site);
        let right = self.site_position(right_site);
        let existing = edge.start.map(|v| self.vertices[v]);
        let (xl, xr, yt, yb) = (self.bounds.xl(), self.bounds.xr(), self.bounds.yt(), self.bounds.yb());
        let fx = (left.x + right.x) / 2.0;
        let fy = (left.y + right.y) / 2.0;

        self.mark_open(id);

        let (start, end) = if approx_eq(left.y, right.y) {
            // Vertical bisector.
            if fx < xl || fx >= xr {
                return false;
            }
            if left.x > right.x {
                let s = ray_start(existing, Point::new(fx, yt), |p| p.y < yt, |p| p.y >= yb);
                (s, Point::new(fx, yb))
            } else {
                let s = ray_start(existing, Point::new(fx, yb), |p| p.y > yb, |p| p.y < yt);
                (s, Point::new(fx, yt))
            }
        } else {
            let fm = (left.x - right.x) / (right.y - left.y);
            let fb = fy - fm * fx;
            if !(-1.0..=1.0).contains(&fm) {
                // Steep: intersect with the top and bottom sides.
                if left.x > right.x {
                    let s = ray_start(existing, Point::new((yt - fb) / fm, yt), |p| p.y < yt, |p| p.y >= yb);
                    (s, Point::new((yb - fb) / fm, yb))
                } else {
                    let s = ray_start(existing, Point::new((yb - fb) / fm, yb), |p| p.y > yb, |p| p.y < yt);
                    (s, Point::new((yt - fb) / fm, yt))
                }
            } else if left.y < right.y {
                let s = ray_start(existing, Point::new(xl, fm * xl + fb), |p| p.x < xl, |p| p.x >= xr);
                (s, Point::new(xr, fm * xr + fb))
            } else {
                let s = ray_start(existing, Point::new(xr, fm * xr + fb), |p| p.x > xr, |p| p.x < xl);
                (s, Point::new(xl, fm * xl + fb))
            }
        };

        let start = match start {
            RayStart::Keep => self.edges[id].start,
            RayStart::Replace(p) => Some(self.create_vertex(p)),
            RayStart::Reject => return false,
        };
        let end = self.create_vertex(end);
        self.edges[id].start = start;
        self.edges[id].end = Some(end);
        true
    }

    /// Liang-Barsky clipping of a resolved edge against the box.
    ///
    /// Returns `false` when nothing of the edge is left inside.
    fn clip_edge(&mut self, id: EdgeId) -> bool {
        let (Some(a), Some(b)) = (self.edges[id].start, self.edges[id].end) else {
            return false;
        };
        let va = self.vertices[a];
        let vb = self.vertices[b];
        let (xl, xr, yt, yb) = (self.bounds.xl(), self.bounds.xr(), self.bounds.yt(), self.bounds.yb());
        let dx = vb.x - va.x;
        let dy = vb.y - va.y;
        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;

        // (p, q): the point is inside the half plane while p * t <= q.
        let planes = [(-dx, va.x - xl), (dx, xr - va.x), (-dy, va.y - yt), (dy, yb - va.y)];
        for (p, q) in planes {
            if p == 0.0 {
                if q < 0.0 {
                    return false;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return false;
                }
                if r > t0 {
                    t0 = r;
                }
            } else {
                if r < t0 {
                    return false;
                }
                if r < t1 {
                    t1 = r;
                }
            }
        }

        if t0 > 0.0 {
            let v = self.create_vertex(Point::new(va.x + t0 * dx, va.y + t0 * dy));
            self.edges[id].start = Some(v);
        }
        if t1 < 1.0 {
            let v = self.create_vertex(Point::new(va.x + t1 * dx, va.y + t1 * dy));
            self.edges[id].end = Some(v);
        }
        if t0 > 0.0 || t1 < 1.0 {
            self.mark_open(id);
        }
        true
    }

    /// Resolves every edge against the box and drops the ones outside of it
    /// or collapsed to a point.
    pub(crate) fn clip_edges(&mut self) {
        let mut keep = vec![true; self.edges.len()];
        for (id, kept) in keep.iter_mut().enumerate() {
            let degenerate = !self.connect_edge(id)
                || !self.clip_edge(id)
                || match (self.edges[id].start, self.edges[id].end) {
                    (Some(a), Some(b)) => self.vertices[a].approx_eq(&self.vertices[b]),
                    _ => true,
                };
            if degenerate {
                self.edges[id].start = None;
                self.edges[id].end = None;
                *kept = false;
            }
        }

        let mut remap = vec![None; self.edges.len()];
        let mut next = 0;
        for (id, &kept) in keep.iter().enumerate() {
            if kept {
                remap[id] = Some(next);
                next += 1;
            }
        }
        let mut id = 0;
        self.edges.retain(|_| {
            id += 1;
            keep[id - 1]
        });
        for cell in &mut self.cells {
            cell.half_edges.retain_mut(|he| match remap[he.edge] {
                Some(new_id) => {
                    he.edge = new_id;
                    true
                }
                None => false,
            });
        }
        self.compact_vertices();
    }

    /// Drops vertices no kept edge uses, such as circle centers outside the box.
    fn compact_vertices(&mut self) {
        let old = std::mem::take(&mut self.vertices);
        let mut remap: Vec<Option<VertexId>> = vec![None; old.len()];
        for edge in &mut self.edges {
            for slot in [&mut edge.start, &mut edge.end] {
                let Some(v) = *slot else {
                    continue;
                };
                let id = match remap[v] {
                    Some(id) => id,
                    None => {
                        let id = self.vertices.len();
                        self.vertices.push(old[v]);
                        remap[v] = Some(id);
                        id
                    }
                };
                *slot = Some(id);
            }
        }

        self.vertex_lookup.clear();
        for (id, p) in self.vertices.iter().enumerate() {
            self.vertex_lookup.entry(Self::vertex_key(p.x, p.y)).or_default().push(id);
        }
    }

    /// Drops unresolved half-edges and orders the rest by descending angle.
    fn prepare_half_edges(&mut self, index: usize) {
        let edges = &self.edges;
        let cell = &mut self.cells[index];
        cell.half_edges.retain(|he| edges[he.edge].is_resolved());
        cell.half_edges.sort_by(|a, b| b.angle.total_cmp(&a.angle));
    }

    /// Box side a boundary point continues along, in perimeter-walk order.
    fn walk_side(&self, p: Point) -> Option<BoxSide> {
        let b = &self.bounds;
        if approx_eq(p.x, b.xl()) && less_than(p.y, b.yb()) {
            Some(BoxSide::Left)
        } else if approx_eq(p.y, b.yb()) && less_than(p.x, b.xr()) {
            Some(BoxSide::Bottom)
        } else if approx_eq(p.x, b.xr()) && greater_than(p.y, b.yt()) {
            Some(BoxSide::Right)
        } else if approx_eq(p.y, b.yt()) && greater_than(p.x, b.xl()) {
            Some(BoxSide::Top)
        } else {
            None
        }
    }

    /// Whether `target` lies on `side`, and the corner ending `side` otherwise.
    fn walk_step(&self, side: BoxSide, target: Point) -> (bool, Point) {
        let b = &self.bounds;
        match side {
            BoxSide::Left => (approx_eq(target.x, b.xl()), Point::new(b.xl(), b.yb())),
            BoxSide::Bottom => (approx_eq(target.y, b.yb()), Point::new(b.xr(), b.yb())),
            BoxSide::Right => (approx_eq(target.x, b.xr()), Point::new(b.xr(), b.yt())),
            BoxSide::Top => (approx_eq(target.y, b.yt()), Point::new(b.xl(), b.yt())),
        }
    }

    fn push_border(&mut self, index: usize, at: usize, start: VertexId, end: VertexId, side: BoxSide) {
        let site = self.cells[index].site;
        let edge = self.create_border_edge(site, start, end, side);
        let half_edge = self.create_half_edge(edge, site, None);
        self.cells[index].half_edges.insert(at, half_edge);
    }

    /// Bridges every gap between consecutive half-edges of an open cell by
    /// walking the box perimeter.
    fn bridge_gaps(&mut self, index: usize) -> Result<()> {
        let site = self.cells[index].site;
        let mut i = 0;
        while i < self.cells[index].half_edges.len() {
            let n = self.cells[index].half_edges.len();
            let current = self.cells[index].half_edges[i];
            let following = self.cells[index].half_edges[(i + 1) % n];
            let (Some(mut from), Some(to)) = (self.half_edge_end(&current), self.half_edge_start(&following)) else {
                i += 1;
                continue;
            };
            let target = self.vertices[to];
            if !self.vertices[from].approx_eq(&target) {
                let Some(mut side) = self.walk_side(self.vertices[from]) else {
                    tracing::error!(site, x = self.vertices[from].x, y = self.vertices[from].y, "open cell boundary does not start on the box");
                    return Err(VoronoiError::UnclosableCell { site });
                };
                let mut reached = false;
                for _ in 0..4 {
                    let (last, corner) = self.walk_step(side, target);
                    let end = if last { to } else { self.create_vertex(corner) };
                    i += 1;
                    self.push_border(index, i, from, end, side);
                    if last {
                        reached = true;
                        break;
                    }
                    from = end;
                    side = side.next();
                }
                if !reached {
                    tracing::error!(site, x = target.x, y = target.y, "perimeter walk did not reach the gap end");
                    return Err(VoronoiError::UnclosableCell { site });
                }
            }
            i += 1;
        }
        Ok(())
    }

    /// Closes a cell that lost every bisector: it covers the whole box.
    fn fill_cell(&mut self, index: usize) {
        let b = self.bounds;
        let corners = [
            Point::new(b.xl(), b.yt()),
            Point::new(b.xl(), b.yb()),
            Point::new(b.xr(), b.yb()),
            Point::new(b.xr(), b.yt()),
        ];
        let ids: Vec<VertexId> = corners.iter().map(|&c| self.create_vertex(c)).collect();
        let mut side = BoxSide::Left;
        for k in 0..4 {
            self.push_border(index, k, ids[k], ids[(k + 1) % 4], side);
            side = side.next();
        }
    }

    /// Orders every cell's half-edges and closes open cells along the box.
    pub(crate) fn close_cells(&mut self) -> Result<()> {
        for index in 0..self.cells.len() {
            self.prepare_half_edges(index);
            if self.cells[index].half_edges.is_empty() {
                self.fill_cell(index);
            } else if !self.cells[index].closed {
                self.bridge_gaps(index)?;
            }
            self.cells[index].closed = true;
            self.finish_cell(index);
        }
        Ok(())
    }

    /// Caches the vertex ring and neighbor ids of a closed cell.
    fn finish_cell(&mut self, index: usize) {
        let site = self.cells[index].site;
        let mut ring = Vec::with_capacity(self.cells[index].half_edges.len());
        let mut neighbors = Vec::with_capacity(ring.capacity());
        for he in &self.cells[index].half_edges {
            if let Some(v) = self.half_edge_start(he) {
                ring.push(self.vertices[v]);
            }
            let edge = &self.edges[he.edge];
            let neighbor = match (edge.right_site, edge.side) {
                (None, Some(side)) => side.id(),
                (None, None) => -1,
                (Some(r), _) if edge.left_site == site => r as i32,
                (Some(_), _) => edge.left_site as i32,
            };
            neighbors.push(neighbor);
        }
        let cell = &mut self.cells[index];
        cell.vertices = ring;
        cell.neighbors = neighbors;
    }

    /// Area covered by all cells, which matches the box area for a valid diagram.
    pub fn total_area(&self) -> f64 {
        self.cells.iter().map(Cell::area).sum()
    }

    /// Checks that every cell is closed: each half-edge ends where the next one starts.
    pub fn is_consistent(&self) -> bool {
        self.cells.iter().all(|cell| {
            let n = cell.half_edges.len();
            cell.closed
                && n >= 3
                && (0..n).all(|i| {
                    match (self.half_edge_end(&cell.half_edges[i]), self.half_edge_start(&cell.half_edges[(i + 1) % n])) {
                        (Some(a), Some(b)) => (self.vertices[a].x - self.vertices[b].x).abs() < EPSILON
                            && (self.vertices[a].y - self.vertices[b].y).abs() < EPSILON,
                        _ => false,
                    }
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagram(points: &[[f64; 2]]) -> VoronoiDiagram {
        let sites = points
            .iter()
            .enumerate()
            .map(|(i, &p)| SiteEvent::new(i, i, p.into()))
            .collect();
        VoronoiDiagram::new(sites, BoundingBox::new([0.0, 0.0], [100.0, 100.0]))
    }

    #[test]
    fn test_vertex_dedup() {
        let mut d = diagram(&[[10.0, 10.0]]);
        let a = d.create_vertex(Point::new(50.0, 50.0));
        let b = d.create_vertex(Point::new(50.0 + 1e-11, 50.0 - 1e-11));
        let c = d.create_vertex(Point::new(50.0 + 1e-3, 50.0));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(d.vertices().len(), 2);
    }

    #[test]
    fn test_vertex_dedup_across_bucket_seam() {
        let mut d = diagram(&[[10.0, 10.0]]);
        // Sits right on a rounding boundary of the lookup grid.
        let x = 1.5 * VERTEX_GRID;
        let a = d.create_vertex(Point::new(x - 1e-12, 0.0));
        let b = d.create_vertex(Point::new(x + 1e-12, 0.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_create_edge_adds_half_edges() {
        let mut d = diagram(&[[10.0, 50.0], [90.0, 50.0]]);
        let e = d.create_edge(0, 1, None, None);
        assert_eq!(d.cells[0].half_edges.len(), 1);
        assert_eq!(d.cells[1].half_edges.len(), 1);
        assert_eq!(d.cells[0].half_edges[0].edge, e);
        assert!((d.cells[0].half_edges[0].angle - 0.0).abs() < 1e-12);
        assert!((d.cells[1].half_edges[0].angle - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_end_point_first_swaps_orientation() {
        let mut d = diagram(&[[10.0, 50.0], [90.0, 50.0]]);
        let v = d.create_vertex(Point::new(50.0, 20.0));
        let e = d.create_edge(0, 1, None, Some(v));
        assert_eq!(d.edges[e].start, Some(v));
        assert_eq!(d.edges[e].left_site, 1);
        assert_eq!(d.edges[e].right_site, Some(0));

        let w = d.create_vertex(Point::new(50.0, 80.0));
        d.set_edge_start_point(e, 0, 1, w);
        assert_eq!(d.edges[e].end, Some(w));
    }

    #[test]
    fn test_connect_vertical_ray() {
        let mut d = diagram(&[[10.0, 50.0], [90.0, 50.0]]);
        let e = d.create_edge(0, 1, None, None);
        assert!(d.connect_edge(e));
        let a = d.vertex(d.edges[e].start.unwrap());
        let b = d.vertex(d.edges[e].end.unwrap());
        assert!(a.approx_eq(&Point::new(50.0, 100.0)));
        assert!(b.approx_eq(&Point::new(50.0, 0.0)));
        assert!(!d.cells[0].closed && !d.cells[1].closed);
    }

    #[test]
    fn test_connect_rejects_bisector_outside_box() {
        let sites = vec![
            SiteEvent::new(0, 0, Point::new(10.0, 10.0)),
            SiteEvent::new(1, 1, Point::new(250.0, 10.0)),
        ];
        let mut d = VoronoiDiagram::new(sites, BoundingBox::new([0.0, 0.0], [100.0, 100.0]));
        let e = d.create_edge(0, 1, None, None);
        assert!(!d.connect_edge(e));
    }

    #[test]
    fn test_clip_edge_shortens_segment() {
        let mut d = diagram(&[[10.0, 50.0], [90.0, 50.0]]);
        let a = d.create_vertex(Point::new(50.0, -20.0));
        let b = d.create_vertex(Point::new(50.0, 120.0));
        let e = d.create_edge(0, 1, Some(a), Some(b));
        assert!(d.clip_edge(e));
        assert!(d.vertex(d.edges[e].start.unwrap()).approx_eq(&Point::new(50.0, 0.0)));
        assert!(d.vertex(d.edges[e].end.unwrap()).approx_eq(&Point::new(50.0, 100.0)));
    }

    #[test]
    fn test_clip_edge_outside() {
        let mut d = diagram(&[[10.0, 50.0], [90.0, 50.0]]);
        let a = d.create_vertex(Point::new(120.0, 10.0));
        let b = d.create_vertex(Point::new(150.0, 90.0));
        let e = d.create_edge(0, 1, Some(a), Some(b));
        assert!(!d.clip_edge(e));
    }

    #[test]
    fn test_clip_edges_compacts_and_remaps() {
        let mut d = diagram(&[[10.0, 50.0], [90.0, 50.0], [50.0, 90.0]]);
        let a = d.create_vertex(Point::new(120.0, 10.0));
        let b = d.create_vertex(Point::new(150.0, 90.0));
        d.create_edge(0, 2, Some(a), Some(b));
        d.create_edge(0, 1, None, None);
        d.clip_edges();
        assert_eq!(d.edges.len(), 1);
        assert!(d.edges[0].is_resolved());
        assert_eq!(d.cells[0].half_edges.len(), 1);
        assert_eq!(d.cells[0].half_edges[0].edge, 0);
        assert!(d.cells[2].half_edges.is_empty());
    }

    #[test]
    fn test_clip_edges_drops_unused_vertices() {
        let mut d = diagram(&[[10.0, 50.0], [90.0, 50.0], [50.0, 90.0]]);
        let outside = d.create_vertex(Point::new(50.0, -40.0));
        let stray = d.create_vertex(Point::new(120.0, 10.0));
        let inside = d.create_vertex(Point::new(50.0, 70.0));
        let e = d.create_edge(0, 1, Some(outside), Some(inside));
        d.create_edge(0, 2, Some(stray), Some(d.vertices.len() - 1));
        d.clip_edges();

        assert_eq!(d.edges.len(), 2);
        assert_eq!(d.vertices.len(), 3);
        for (id, v) in d.vertices.iter().enumerate() {
            assert!(d.bounds.contains(v));
            assert!(d.edges.iter().any(|edge| edge.start == Some(id) || edge.end == Some(id)));
        }
        let top = d.vertex(d.edges[e].start.unwrap());
        assert!(top.approx_eq(&Point::new(50.0, 0.0)));
        assert_eq!(d.create_vertex(Point::new(50.0, 70.0)), d.edges[e].end.unwrap());
        assert_eq!(d.vertices.len(), 3);
    }

    #[test]
    fn test_close_two_cells() {
        let mut d = diagram(&[[10.0, 50.0], [90.0, 50.0]]);
        d.create_edge(0, 1, None, None);
        d.clip_edges();
        d.close_cells().unwrap();
        assert!(d.is_consistent());
        assert!((d.cells[0].area() - 5000.0).abs() < 1e-6);
        assert!((d.cells[1].area() - 5000.0).abs() < 1e-6);
        assert_eq!(d.edges.iter().filter(|e| e.is_border()).count(), 6);
    }

    #[test]
    fn test_fill_single_cell() {
        let mut d = diagram(&[[30.0, 70.0]]);
        d.clip_edges();
        d.close_cells().unwrap();
        let cell = &d.cells[0];
        assert!(cell.is_closed());
        assert_eq!(cell.vertices().len(), 4);
        assert!((cell.area() - 10000.0).abs() < 1e-6);
        assert!(d.is_consistent());
    }
}
