//! 2D geometry utilities for the survey plane.
//!
//! Pure functions over `[f64; 2]` coordinates, shared by the hull builder,
//! the sequencer and the board queries.

/// Tolerance for floating-point comparisons that are allowed to be fuzzy.
/// Orientation tests stay exact.
pub const EPSILON: f64 = 1e-9;

// =============================================================================
// Point Operations
// =============================================================================

/// Compute squared distance between two 2D points.
#[inline]
pub fn distance_squared(p1: [f64; 2], p2: [f64; 2]) -> f64 {
    let dx = p2[0] - p1[0];
    let dy = p2[1] - p1[1];
    dx * dx + dy * dy
}

/// Compute distance between two 2D points.
#[inline]
pub fn distance(p1: [f64; 2], p2: [f64; 2]) -> f64 {
    distance_squared(p1, p2).sqrt()
}

// =============================================================================
// Orientation
// =============================================================================

/// Turn direction of an ordered point triple (y axis pointing up).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    Collinear,
    CounterClockwise,
}

impl Orientation {
    /// -1, 0 or +1, matching the sign of the cross product.
    pub fn sign(self) -> i32 {
        match self {
            Orientation::Clockwise => -1,
            Orientation::Collinear => 0,
            Orientation::CounterClockwise => 1,
        }
    }
}

/// 2D cross product (z-component of 3D cross product).
/// Positive if v2 is counter-clockwise from v1.
#[inline]
pub fn cross_2d(v1: [f64; 2], v2: [f64; 2]) -> f64 {
    v1[0] * v2[1] - v1[1] * v2[0]
}

/// Sign of the cross product of (q - p) and (r - q).
///
/// Exactly collinear triples are `Collinear`; no tolerance is applied.
pub fn orientation(p: [f64; 2], q: [f64; 2], r: [f64; 2]) -> Orientation {
    let val = cross_2d([q[0] - p[0], q[1] - p[1]], [r[0] - q[0], r[1] - q[1]]);
    if val > 0.0 {
        Orientation::CounterClockwise
    } else if val < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Given collinear p, q, r: does q lie within the bounding box of segment pr?
#[inline]
pub fn on_segment(p: [f64; 2], q: [f64; 2], r: [f64; 2]) -> bool {
    q[0] <= p[0].max(r[0])
        && q[0] >= p[0].min(r[0])
        && q[1] <= p[1].max(r[1])
        && q[1] >= p[1].min(r[1])
}

// =============================================================================
// Polygon Operations (test support for hull checks)
// =============================================================================

/// Compute signed area of a polygon using the Shoelace formula.
/// Positive = CCW winding, Negative = CW winding.
#[cfg(test)]
pub(crate) fn polygon_signed_area(vertices: &[[f64; 2]]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += vertices[i][0] * vertices[j][1];
        area -= vertices[j][0] * vertices[i][1];
    }
    area / 2.0
}

/// Test if a point is inside a polygon using the winding number algorithm.
/// Works for both convex and concave polygons. Points exactly on an edge may
/// go either way; use [`point_on_polygon_boundary`] when that matters.
#[cfg(test)]
pub(crate) fn point_in_polygon(point: [f64; 2], polygon: &[[f64; 2]]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut winding: i32 = 0;

    for i in 0..n {
        let p1 = polygon[i];
        let p2 = polygon[(i + 1) % n];

        if p1[1] <= point[1] {
            if p2[1] > point[1] && cross_2d([p2[0] - p1[0], p2[1] - p1[1]], [point[0] - p1[0], point[1] - p1[1]]) > 0.0 {
                // Upward crossing
                winding += 1;
            }
        } else if p2[1] <= point[1]
            && cross_2d([p2[0] - p1[0], p2[1] - p1[1]], [point[0] - p1[0], point[1] - p1[1]]) < 0.0
        {
            // Downward crossing
            winding -= 1;
        }
    }

    winding != 0
}

/// True if the point lies on one of the polygon's edges (within EPSILON).
#[cfg(test)]
pub(crate) fn point_on_polygon_boundary(point: [f64; 2], polygon: &[[f64; 2]]) -> bool {
    let n = polygon.len();
    (0..n).any(|i| {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let len = distance(a, b);
        if len < EPSILON {
            return distance(a, point) < EPSILON;
        }
        let off_line = cross_2d([b[0] - a[0], b[1] - a[1]], [point[0] - a[0], point[1] - a[1]]).abs() / len;
        off_line < EPSILON && on_segment(a, point, b)
    })
}

// =============================================================================
// Tests
// =============================================================================
