//! Planar points and closed-tour length.
//!
//! A tour visits every point once and returns to its start, so its length
//! is the sum of consecutive Euclidean distances plus the closing edge.
//! These are pure functions: no state, no side effects.

/// A city location in the plane.
///
/// The `id` is an opaque caller-supplied identifier (a CSV row name, an
/// index, anything). The engine never interprets it; it exists so that
/// presentation layers can label tour stops. Coordinates must be finite.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Caller-supplied identifier.
    pub id: u64,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point from an identifier and coordinates.
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}

/// Euclidean distance between two points.
pub fn distance(a: &Point, b: &Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Total length of a closed tour over an ordered point sequence.
///
/// Sums consecutive distances and the edge from the last point back to
/// the first. Sequences of length 0 or 1 have length 0.
pub fn tour_length(tour: &[Point]) -> f64 {
    if tour.len() < 2 {
        return 0.0;
    }
    let mut total = 0.0;
    for pair in tour.windows(2) {
        total += distance(&pair[0], &pair[1]);
    }
    total + distance(&tour[tour.len() - 1], &tour[0])
}

/// Closed-tour length over an index permutation into a point table.
///
/// This is the engine's working form: tours are stored as permutations of
/// `0..points.len()` rather than as point sequences.
pub fn order_length(points: &[Point], order: &[usize]) -> f64 {
    if order.len() < 2 {
        return 0.0;
    }
    let mut total = 0.0;
    for pair in order.windows(2) {
        total += distance(&points[pair[0]], &points[pair[1]]);
    }
    total + distance(&points[order[order.len() - 1]], &points[order[0]])
}
