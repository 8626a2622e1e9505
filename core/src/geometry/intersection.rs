//! Segment intersection for land boundaries

use super::primitives::{Point, Segment, Tag};
use super::utils_2d::{on_segment, orientation, Orientation};

/// Do two segments cross or touch?
///
/// Uses the four-orientation test, falling back to bounding-box checks for the
/// collinear cases. Segments that share an endpoint are never reported: adjacent
/// polygon edges meet at a vertex without that counting as a crossing.
pub fn segments_intersect(a: &Segment, b: &Segment) -> bool {
    if a.shares_endpoint(b) {
        return false;
    }

    let (p1, q1) = (a.p1.coords(), a.p2.coords());
    let (p2, q2) = (b.p1.coords(), b.p2.coords());

    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Collinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Collinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Collinear && on_segment(p2, q1, q2))
}

/// Intersection of the two lines carrying the segments.
///
/// Each line is written as `a*x + b*y = c` and the 2x2 system is solved directly.
/// Returns `None` when the determinant is zero (parallel or collinear lines).
/// The result is tagged with [`Tag::intersection`] so it can be told apart from
/// revealed points.
pub fn intersection_point(s1: &Segment, s2: &Segment) -> Option<Point> {
    let a1 = s1.p2.y - s1.p1.y;
    let b1 = s1.p1.x - s1.p2.x;
    let c1 = a1 * s1.p1.x + b1 * s1.p1.y;

    let a2 = s2.p2.y - s2.p1.y;
    let b2 = s2.p1.x - s2.p2.x;
    let c2 = a2 * s2.p1.x + b2 * s2.p1.y;

    let determinant = a1 * b2 - a2 * b1;
    if determinant == 0.0 {
        return None;
    }

    let x = (b2 * c1 - b1 * c2) / determinant;
    let y = (a1 * c2 - a2 * c1) / determinant;
    Some(Point::tagged(x, y, Tag::intersection()))
}
