use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::geometry::Point;
use crate::rbtree::NodeId;

/// An input site tagged with its processing order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SiteEvent {
    /// Position in sweep order, assigned after sorting.
    pub id: usize,
    /// Position in the caller's input; cells are stored under this index.
    pub index: usize,
    pub position: Point,
}

impl SiteEvent {
    pub fn new(id: usize, index: usize, position: Point) -> Self {
        Self { id, index, position }
    }

    /// Sweep order: ascending y, then ascending x.
    pub fn sweep_cmp(&self, other: &SiteEvent) -> Ordering {
        self.position
            .y
            .total_cmp(&other.position.y)
            .then(self.position.x.total_cmp(&other.position.x))
    }
}

/// Ordering key of a pending circle event.
///
/// Compares by `(y, x)` of the event point, then by a sequence number so that
/// events at the same point stay distinct and pop in insertion order.
#[derive(Clone, Copy, Debug)]
pub struct CircleKey {
    pub y: f64,
    pub x: f64,
    seq: u64,
}

impl PartialEq for CircleKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CircleKey {}

impl PartialOrd for CircleKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CircleKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y
            .total_cmp(&other.y)
            .then(self.x.total_cmp(&other.x))
            .then(self.seq.cmp(&other.seq))
    }
}

/// Predicted collapse of a beach section.
#[derive(Clone, Copy, Debug)]
pub struct CircleEvent {
    /// The beach section that vanishes when the sweep reaches `point`.
    pub arc: NodeId,
    /// Site of that beach section at the time the event was created.
    pub site: usize,
    /// Lowest point of the circumcircle: `(center.x, center.y + radius)`.
    pub point: Point,
    pub y_center: f64,
}

impl CircleEvent {
    pub fn center(&self) -> Point {
        Point::new(self.point.x, self.y_center)
    }
}

/// Pending circle events, ordered by event point and removable by key.
#[derive(Debug, Default)]
pub struct CircleQueue {
    events: BTreeMap<CircleKey, CircleEvent>,
    next_seq: u64,
}

impl CircleQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, event: CircleEvent) -> CircleKey {
        let key = CircleKey {
            y: event.point.y,
            x: event.point.x,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.events.insert(key, event);
        key
    }

    pub fn remove(&mut self, key: &CircleKey) -> Option<CircleEvent> {
        self.events.remove(key)
    }

    pub fn get(&self, key: &CircleKey) -> Option<&CircleEvent> {
        self.events.get(key)
    }

    pub fn peek(&self) -> Option<(&CircleKey, &CircleEvent)> {
        self.events.first_key_value()
    }

    pub fn pop(&mut self) -> Option<CircleEvent> {
        self.events.pop_first().map(|(_, event)| event)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
