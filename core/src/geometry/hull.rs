//! Gift-wrapping (Jarvis march) convex hull.

use super::primitives::Point;
use super::utils_2d::{distance_squared, orientation, Orientation};
use indexmap::IndexSet;

/// Convex hull of a point set, counter-clockwise, starting at the leftmost point
/// (lowest of those on a tie).
///
/// Duplicate coordinates are collapsed first. With fewer than three distinct
/// points the (deduplicated) input is returned unchanged; the caller decides
/// whether that is an error. Runs in O(n·h).
///
/// Among exactly collinear candidates the one farthest from the current vertex
/// wins, so points in the middle of a hull edge are never hull vertices.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let points: Vec<Point> = points.iter().cloned().collect::<IndexSet<_>>().into_iter().collect();
    let n = points.len();
    if n < 3 {
        return points;
    }

    // Leftmost, then lowest: a point in the middle of a vertical edge is never the start.
    let mut start = 0;
    for i in 1..n {
        let (a, b) = (&points[i], &points[start]);
        if a.x < b.x || (a.x == b.x && a.y < b.y) {
            start = i;
        }
    }

    let mut hull = Vec::new();
    let mut on_hull = vec![false; n];
    let mut p = start;
    loop {
        hull.push(points[p].clone());
        on_hull[p] = true;

        let mut q = (p + 1) % n;
        for i in 0..n {
            if i == p || i == q {
                continue;
            }
            if more_extreme(&points[p], &points[q], &points[i]) {
                q = i;
            }
        }

        // Back at the start, or at any earlier vertex if rounding bent the walk.
        if on_hull[q] {
            break;
        }
        p = q;
    }

    hull
}

/// Should `candidate` replace `current` as the next hull vertex after `from`?
fn more_extreme(from: &Point, current: &Point, candidate: &Point) -> bool {
    let (f, c, r) = (from.coords(), current.coords(), candidate.coords());
    match orientation(f, c, r) {
        Orientation::Clockwise => true,
        Orientation::CounterClockwise => false,
        Orientation::Collinear => {
            // Only compare points on the same side of `from`.
            let same_direction = (c[0] - f[0]) * (r[0] - f[0]) + (c[1] - f[1]) * (r[1] - f[1]) > 0.0;
            same_direction && distance_squared(f, r) > distance_squared(f, c)
        }
    }
}
