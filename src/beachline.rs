//! The beach line of Fortune's sweep: the sequence of parabolic arcs between
//! the swept and the unswept part of the plane.

use std::collections::VecDeque;

use crate::constants::{CIRCLE_EVENT_EPSILON, EPSILON, approx_eq};
use crate::diagram::{EdgeId, VoronoiDiagram};
use crate::events::{CircleEvent, CircleKey, CircleQueue};
use crate::geometry::{Point, circumcenter, orientation};
use crate::rbtree::{NodeId, RbArena};

/// One arc of the beach line.
#[derive(Clone, Copy, Debug)]
pub struct BeachSection {
    /// Focus of the arc.
    pub site: usize,
    /// Edge traced by the breakpoint between this arc and the previous one.
    pub edge: Option<EdgeId>,
    /// Pending collapse of this arc, if its neighbors converge.
    pub circle_event: Option<CircleKey>,
}

impl BeachSection {
    fn new(site: usize) -> Self {
        BeachSection {
            site,
            edge: None,
            circle_event: None,
        }
    }
}

/// Sweep state: the arcs ordered left to right, and the circle events
/// predicted for them.
#[derive(Debug, Default)]
pub struct BeachLine {
    arcs: RbArena<BeachSection>,
    circles: CircleQueue,
}

impl BeachLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Sites of the arcs from left to right.
    #[cfg(test)]
    pub fn sites(&self) -> Vec<usize> {
        self.arcs.iter().map(|id| self.arcs.get(id).site).collect()
    }

    pub fn pending_circle_events(&self) -> usize {
        self.circles.len()
    }

    /// The circle event the sweep reaches first.
    pub fn next_circle_event(&self) -> Option<&CircleEvent> {
        self.circles.peek().map(|(_, event)| event)
    }

    /// Fires the earliest circle event. Returns `false` when none is pending.
    pub fn process_circle_event(&mut self, diagram: &mut VoronoiDiagram) -> bool {
        match self.circles.pop() {
            Some(event) => {
                tracing::trace!(x = event.point.x, y = event.point.y, site = event.site, "circle event");
                self.remove_beach_section(event, diagram);
                true
            }
            None => false,
        }
    }

    /// x of the breakpoint between `arc` and its predecessor on the directrix.
    fn left_break_point(&self, arc: NodeId, directrix: f64, diagram: &VoronoiDiagram) -> f64 {
        let site = diagram.site_position(self.arcs.get(arc).site);
        let (rfocx, rfocy) = (site.x, site.y);
        let pby2 = rfocy - directrix;
        // Focus on the directrix: the arc is a vertical ray.
        if pby2.abs() < EPSILON {
            return rfocx;
        }
        let Some(left) = self.arcs.prev(arc) else {
            return f64::NEG_INFINITY;
        };
        let site = diagram.site_position(self.arcs.get(left).site);
        let (lfocx, lfocy) = (site.x, site.y);
        let plby2 = lfocy - directrix;
        if plby2.abs() < EPSILON {
            return lfocx;
        }
        if approx_eq(lfocy, rfocy) {
            return (rfocx + lfocx) / 2.0;
        }
        let hl = lfocx - rfocx;
        let aby2 = 1.0 / pby2 - 1.0 / plby2;
        let b = hl / plby2;
        let discriminant = b * b - 2.0 * aby2 * (hl * hl / (-2.0 * plby2) - lfocy + plby2 / 2.0 + rfocy - pby2 / 2.0);
        (-b + discriminant.max(0.0).sqrt()) / aby2 + rfocx
    }

    /// x of the breakpoint between `arc` and its successor on the directrix.
    fn right_break_point(&self, arc: NodeId, directrix: f64, diagram: &VoronoiDiagram) -> f64 {
        if let Some(right) = self.arcs.next(arc) {
            return self.left_break_point(right, directrix, diagram);
        }
        let site = diagram.site_position(self.arcs.get(arc).site);
        if approx_eq(site.y, directrix) { site.x } else { f64::INFINITY }
    }

    fn detach_circle_event(&mut self, arc: NodeId) {
        if let Some(key) = self.arcs.get_mut(arc).circle_event.take() {
            self.circles.remove(&key);
        }
    }

    fn detach_beach_section(&mut self, arc: NodeId) {
        self.detach_circle_event(arc);
        self.arcs.remove(arc);
    }

    /// Schedules the collapse of `arc` if its neighbors converge over it.
    fn attach_circle_event(&mut self, arc: NodeId, diagram: &VoronoiDiagram) {
        self.detach_circle_event(arc);
        let (Some(left), Some(right)) = (self.arcs.prev(arc), self.arcs.next(arc)) else {
            return;
        };
        let l_site = self.arcs.get(left).site;
        let c_site = self.arcs.get(arc).site;
        let r_site = self.arcs.get(right).site;
        if l_site == r_site {
            return;
        }
        let (lp, cp, rp) = (diagram.site_position(l_site), diagram.site_position(c_site), diagram.site_position(r_site));
        // Collinear or diverging breakpoints never meet.
        if orientation(lp, cp, rp) >= -CIRCLE_EVENT_EPSILON {
            return;
        }
        let Some(center) = circumcenter(lp, cp, rp) else {
            return;
        };
        let radius = center.dist(&cp);
        let event = CircleEvent {
            arc,
            site: c_site,
            point: Point::new(center.x, center.y + radius),
            y_center: center.y,
        };
        let key = self.circles.insert(event);
        self.arcs.get_mut(arc).circle_event = Some(key);
    }

    /// Inserts the arc of a new site, splitting the arc above it.
    pub fn add_beach_section(&mut self, site: usize, diagram: &mut VoronoiDiagram) {
        let p = diagram.site_position(site);
        let (x, directrix) = (p.x, p.y);

        let mut l_arc = None;
        let mut r_arc = None;
        let mut node = self.arcs.root();
        while let Some(n) = node {
            let dxl = self.left_break_point(n, directrix, diagram) - x;
            if dxl > EPSILON {
                if self.arcs.left(n).is_none() {
                    // Left of every arc: only a site sharing the first row with `n`.
                    l_arc = self.arcs.prev(n);
                    r_arc = Some(n);
                    break;
                }
                node = self.arcs.left(n);
                continue;
            }
            let dxr = x - self.right_break_point(n, directrix, diagram);
            if dxr > EPSILON {
                if self.arcs.right(n).is_none() {
                    l_arc = Some(n);
                    break;
                }
                node = self.arcs.right(n);
            } else {
                if dxl > -EPSILON {
                    l_arc = self.arcs.prev(n);
                    r_arc = Some(n);
                } else if dxr > -EPSILON {
                    l_arc = Some(n);
                    r_arc = self.arcs.next(n);
                } else {
                    l_arc = Some(n);
                    r_arc = Some(n);
                }
                break;
            }
        }

        let new_arc = self.arcs.insert_successor(l_arc, BeachSection::new(site));

        match (l_arc, r_arc) {
            (None, None) => {}
            // Before the leftmost arc, the mirror of the rightmost append.
            (None, Some(r)) => {
                let r_site = self.arcs.get(r).site;
                let edge = diagram.create_edge(site, r_site, None, None);
                self.arcs.get_mut(r).edge = Some(edge);
                self.attach_circle_event(r, diagram);
            }
            // Inside a single arc: split it around the new one.
            (Some(l), Some(r)) if l == r => {
                self.detach_circle_event(l);
                let l_site = self.arcs.get(l).site;
                let copy = self.arcs.insert_successor(Some(new_arc), BeachSection::new(l_site));
                let edge = diagram.create_edge(l_site, site, None, None);
                self.arcs.get_mut(new_arc).edge = Some(edge);
                self.arcs.get_mut(copy).edge = Some(edge);
                self.attach_circle_event(l, diagram);
                self.attach_circle_event(copy, diagram);
            }
            // Past the rightmost arc, only when sites share the first sweep row.
            (Some(l), None) => {
                let l_site = self.arcs.get(l).site;
                let edge = diagram.create_edge(l_site, site, None, None);
                self.arcs.get_mut(new_arc).edge = Some(edge);
                self.attach_circle_event(l, diagram);
            }
            // Exactly on the breakpoint between two arcs.
            (Some(l), Some(r)) => {
                self.detach_circle_event(l);
                self.detach_circle_event(r);
                let l_site = self.arcs.get(l).site;
                let r_site = self.arcs.get(r).site;
                let Some(center) = circumcenter(p, diagram.site_position(l_site), diagram.site_position(r_site)) else {
                    tracing::warn!(site, l_site, r_site, "collinear breakpoint insertion");
                    let edge = diagram.create_edge(l_site, site, None, None);
                    self.arcs.get_mut(new_arc).edge = Some(edge);
                    let edge = diagram.create_edge(site, r_site, None, None);
                    self.arcs.get_mut(r).edge = Some(edge);
                    return;
                };
                let vertex = diagram.create_vertex(center);
                if let Some(edge) = self.arcs.get(r).edge {
                    diagram.set_edge_start_point(edge, l_site, r_site, vertex);
                }
                let edge = diagram.create_edge(l_site, site, None, Some(vertex));
                self.arcs.get_mut(new_arc).edge = Some(edge);
                let edge = diagram.create_edge(site, r_site, None, Some(vertex));
                self.arcs.get_mut(r).edge = Some(edge);
                self.attach_circle_event(l, diagram);
                self.attach_circle_event(r, diagram);
            }
        }
    }

    /// Removes the arc collapsing at `event`, together with every neighbor
    /// collapsing at the same point, and joins the survivors with a new edge.
    pub fn remove_beach_section(&mut self, event: CircleEvent, diagram: &mut VoronoiDiagram) {
        let arc = event.arc;
        let center = event.center();
        let vertex = diagram.create_vertex(center);
        let collapses_here = |line: &BeachLine, id: NodeId| {
            line.arcs
                .get(id)
                .circle_event
                .and_then(|key| line.circles.get(&key))
                .is_some_and(|c| approx_eq(c.point.x, center.x) && approx_eq(c.y_center, center.y))
        };

        let mut previous = self.arcs.prev(arc);
        let mut next = self.arcs.next(arc);
        let mut disappearing: VecDeque<(NodeId, BeachSection)> = VecDeque::from([(arc, *self.arcs.get(arc))]);
        self.detach_beach_section(arc);

        while let Some(l) = previous {
            if !collapses_here(self, l) {
                break;
            }
            previous = self.arcs.prev(l);
            disappearing.push_front((l, *self.arcs.get(l)));
            self.detach_beach_section(l);
        }
        let Some(l_arc) = previous else {
            tracing::warn!(site = event.site, "collapsing arc has no left neighbor");
            return;
        };
        disappearing.push_front((l_arc, *self.arcs.get(l_arc)));
        self.detach_circle_event(l_arc);

        while let Some(r) = next {
            if !collapses_here(self, r) {
                break;
            }
            next = self.arcs.next(r);
            disappearing.push_back((r, *self.arcs.get(r)));
            self.detach_beach_section(r);
        }
        let Some(r_arc) = next else {
            tracing::warn!(site = event.site, "collapsing arc has no right neighbor");
            return;
        };
        disappearing.push_back((r_arc, *self.arcs.get(r_arc)));
        self.detach_circle_event(r_arc);

        // Every transition between collapsing arcs ends at the new vertex.
        for i in 1..disappearing.len() {
            let (_, left) = disappearing[i - 1];
            let (_, right) = disappearing[i];
            if let Some(edge) = right.edge {
                diagram.set_edge_start_point(edge, left.site, right.site, vertex);
            }
        }

        let l_site = disappearing[0].1.site;
        let r_site = disappearing[disappearing.len() - 1].1.site;
        let edge = diagram.create_edge(l_site, r_site, None, Some(vertex));
        self.arcs.get_mut(r_arc).edge = Some(edge);

        self.attach_circle_event(l_arc, diagram);
        self.attach_circle_event(r_arc, diagram);
    }
}
