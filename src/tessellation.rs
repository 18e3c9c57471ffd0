use crate::beachline::BeachLine;
use crate::bounds::BoundingBox;
use crate::cell::Cell;
use crate::constants::{EPSILON, approx_eq};
use crate::diagram::VoronoiDiagram;
use crate::events::{CircleEvent, SiteEvent};
use crate::geometry::Point;
use crate::{Result, VoronoiError};
use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;

/// Checks the input and returns the site events in sweep order.
fn sweep_order(sites: &[Point], bounds: &BoundingBox) -> Result<Vec<SiteEvent>> {
    bounds.validate()?;
    if sites.is_empty() {
        return Err(VoronoiError::NoSites);
    }
    for (index, p) in sites.iter().enumerate() {
        if !p.is_finite() {
            return Err(VoronoiError::NonFiniteSite { index });
        }
        if !bounds.contains(p) {
            return Err(VoronoiError::SiteOutOfBounds { index, x: p.x, y: p.y });
        }
    }

    let mut events: Vec<SiteEvent> = sites
        .iter()
        .enumerate()
        .map(|(index, &p)| SiteEvent::new(0, index, p))
        .collect();
    events.sort_by(SiteEvent::sweep_cmp);

    // Coincident sites are within EPSILON in y, so they sit in one run of the sorted order.
    for (k, a) in events.iter().enumerate() {
        let run = events[k + 1..]
            .iter()
            .take_while(|b| b.position.y - a.position.y < EPSILON);
        for b in run {
            if approx_eq(a.position.x, b.position.x) {
                return Err(VoronoiError::DuplicateSite {
                    first: a.index.min(b.index),
                    second: a.index.max(b.index),
                });
            }
        }
    }

    // Sites within EPSILON of a row's first y share that row and go left to right.
    let mut start = 0;
    while start < events.len() {
        let y = events[start].position.y;
        let len = events[start..]
            .iter()
            .take_while(|e| e.position.y - y < EPSILON)
            .count();
        events[start..start + len].sort_by(|a, b| a.position.x.total_cmp(&b.position.x));
        start += len;
    }

    for (id, event) in events.iter_mut().enumerate() {
        event.id = id;
    }
    Ok(events)
}

/// A circle event fires before a site only when it lies strictly above it.
fn circle_first(circle: &CircleEvent, site: &SiteEvent) -> bool {
    circle.point.y < site.position.y
}

/// Builds the Voronoi diagram of `sites` clipped to `bounds` with Fortune's sweep.
///
/// Cells are indexed like `sites`. Fails before sweeping when the input is
/// empty, contains coincident or non-finite sites, or leaves the box.
pub fn generate(sites: &[Point], bounds: BoundingBox) -> Result<VoronoiDiagram> {
    let events = sweep_order(sites, &bounds)?;
    tracing::debug!(sites = events.len(), "starting sweep");

    let mut by_index = events.clone();
    by_index.sort_by_key(|s| s.index);
    let mut diagram = VoronoiDiagram::new(by_index, bounds);
    let mut beachline = BeachLine::new();

    let mut pending = events.iter().peekable();
    loop {
        let site_first = match (pending.peek(), beachline.next_circle_event()) {
            (Some(site), Some(circle)) => !circle_first(circle, site),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        if site_first {
            if let Some(site) = pending.next() {
                tracing::trace!(
                    id = site.id,
                    x = site.position.x,
                    y = site.position.y,
                    pending_circles = beachline.pending_circle_events(),
                    "site event"
                );
                beachline.add_beach_section(site.index, &mut diagram);
            }
        } else {
            beachline.process_circle_event(&mut diagram);
        }
    }

    tracing::debug!(arcs = beachline.len(), edges = diagram.edges().len(), "sweep finished");

    diagram.clip_edges();
    diagram.close_cells()?;
    tracing::debug!(
        cells = diagram.cells().len(),
        edges = diagram.edges().len(),
        vertices = diagram.vertices().len(),
        "diagram closed"
    );
    Ok(diagram)
}

/// A bounded 2D Voronoi tessellation over a set of generators.
///
/// Holds the generators as a flat `[x, y, x, y, ...]` buffer, recomputes the
/// diagram on [`Tessellation::calculate`], and supports Lloyd relaxation.
pub struct Tessellation {
    pub bounds: BoundingBox,
    pub generators: Vec<f64>,
    diagram: Option<VoronoiDiagram>,
}

impl Tessellation {
    pub fn new(bounds: BoundingBox) -> Self {
        Self {
            bounds,
            generators: Vec::new(),
            diagram: None,
        }
    }

    /// Replaces all generators. Any previously calculated diagram is dropped.
    pub fn set_generators(&mut self, generators: &[f64]) {
        self.generators = generators[..generators.len() / 2 * 2].to_vec();
        self.diagram = None;
    }

    /// Moves a single generator. Out-of-range indices are ignored.
    pub fn set_generator(&mut self, index: usize, pos: &[f64; 2]) {
        let offset = index * 2;
        if offset + 1 < self.generators.len() {
            self.generators[offset] = pos[0];
            self.generators[offset + 1] = pos[1];
            self.diagram = None;
        }
    }

    /// Generates random points within the bounds and sets them as generators.
    pub fn random_generators(&mut self, count: usize) {
        let mut rng = StdRng::seed_from_u64(get_seed());
        let w = self.bounds.width();
        let h = self.bounds.height();
        let mut points = Vec::with_capacity(count * 2);
        for _ in 0..count {
            points.push(self.bounds.min[0] + rng.r#gen::<f64>() * w);
            points.push(self.bounds.min[1] + rng.r#gen::<f64>() * h);
        }
        self.set_generators(&points);
    }

    pub fn count_generators(&self) -> usize {
        self.generators.len() / 2
    }

    pub fn count_cells(&self) -> usize {
        self.diagram.as_ref().map_or(0, |d| d.cells().len())
    }

    pub fn get_generator(&self, index: usize) -> Option<[f64; 2]> {
        let c = self.generators.get(index * 2..index * 2 + 2)?;
        Some([c[0], c[1]])
    }

    pub fn points(&self) -> Vec<Point> {
        self.generators.chunks_exact(2).map(|c| Point::new(c[0], c[1])).collect()
    }

    /// Builds the diagram for the current generators.
    pub fn calculate(&mut self) -> Result<()> {
        self.diagram = None;
        self.diagram = Some(generate(&self.points(), self.bounds)?);
        Ok(())
    }

    pub fn diagram(&self) -> Option<&VoronoiDiagram> {
        self.diagram.as_ref()
    }

    pub fn get_cell(&self, index: usize) -> Option<&Cell> {
        self.diagram.as_ref().and_then(|d| d.cell(index))
    }

    pub fn cells(&self) -> &[Cell] {
        self.diagram.as_ref().map_or(&[], |d| d.cells())
    }

    /// Performs one step of Lloyd's relaxation.
    ///
    /// Moves each generator to the centroid of its last calculated cell. The
    /// diagram has to be recalculated afterwards.
    pub fn relax(&mut self) -> Result<()> {
        let Some(diagram) = self.diagram.as_ref() else {
            tracing::warn!("relax called before calculate");
            return Err(VoronoiError::NotCalculated);
        };
        let new_generators: Vec<f64> = diagram
            .cells()
            .par_iter()
            .flat_map_iter(|cell| {
                let c = cell.centroid();
                [c.x, c.y]
            })
            .collect();

        self.set_generators(&new_generators);
        Ok(())
    }
}

fn get_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * 4294967296.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        123456789 // Fixed seed for tests
    }
}
