//! Centralized numerical tolerances for the sweep and the post-processing passes.

/// Absolute tolerance for comparing computed coordinates.
pub const EPSILON: f64 = 1e-9;

/// A circle event is only scheduled when the orientation determinant of the
/// (left, center, right) triple is below `-CIRCLE_EVENT_EPSILON`.
pub const CIRCLE_EVENT_EPSILON: f64 = 2e-12;

/// Bucket size of the vertex deduplication hash.
pub const VERTEX_GRID: f64 = 1e-7;

#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// `a < b` by more than the tolerance.
#[inline]
pub fn less_than(a: f64, b: f64) -> bool {
    b - a > EPSILON
}

/// `a > b` by more than the tolerance.
#[inline]
pub fn greater_than(a: f64, b: f64) -> bool {
    a - b > EPSILON
}
