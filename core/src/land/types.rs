use super::sequencer::Sequencer;
use super::{LandError, LandId, LandResult};
use crate::geometry::{Point, Segment, Tag};
use indexmap::IndexSet;
use serde::Serialize;

/// A tagged simple polygon.
///
/// `edges[i]` always runs from `boundary[i]` to `boundary[(i + 1) % n]`; both are
/// rebuilt together and only through the sequencer, so the polygon stays simple.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Land {
    pub id: LandId,
    pub tag: Tag,
    boundary: Vec<Point>,
    edges: Vec<Segment>,
}

impl Land {
    /// New land from a convex hull. The hull is already simple, so no sequencing.
    /// Repeated coordinates are collapsed, keeping the first occurrence.
    pub fn from_hull(tag: Tag, hull: Vec<Point>) -> LandResult<Self> {
        let hull: Vec<Point> = hull.into_iter().collect::<IndexSet<_>>().into_iter().collect();
        if hull.len() < 3 {
            return Err(LandError::DegenerateHull { points: hull.len() });
        }
        let mut land = Self { id: LandId::new(), tag, boundary: Vec::new(), edges: Vec::new() };
        land.set_boundary(hull);
        Ok(land)
    }

    /// Rebuild a land from a stored, already ordered boundary.
    pub fn from_boundary(id: LandId, tag: Tag, boundary: Vec<Point>) -> LandResult<Self> {
        if boundary.len() < 3 {
            return Err(LandError::UnderpopulatedRegion { land: id, remaining: boundary.len() });
        }
        let mut land = Self { id, tag, boundary: Vec::new(), edges: Vec::new() };
        land.set_boundary(boundary);
        Ok(land)
    }

    pub fn boundary(&self) -> &[Point] {
        &self.boundary
    }

    pub fn edges(&self) -> &[Segment] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.boundary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundary.is_empty()
    }

    pub fn contains(&self, p: &Point) -> bool {
        self.boundary.contains(p)
    }

    pub fn point_set(&self) -> IndexSet<Point> {
        self.boundary.iter().cloned().collect()
    }

    /// Boundary points lying in `points_inside`: the part of this land an
    /// interaction has swept over.
    pub fn swept_slice(&self, points_inside: &IndexSet<Point>) -> IndexSet<Point> {
        self.boundary.iter().filter(|p| points_inside.contains(*p)).cloned().collect()
    }

    /// Absorb a hull of the same tag.
    ///
    /// Points on both the boundary and the hull become interior. `ceded` points
    /// (taken from lands of another tag) are kept; any other point in
    /// `points_inside` was consumed by the interaction and is dropped.
    /// Returns the points the sequencer had to prune.
    pub fn grow(
        &mut self,
        hull: &[Point],
        points_inside: &IndexSet<Point>,
        ceded: &IndexSet<Point>,
        sequencer: &Sequencer,
    ) -> LandResult<Vec<Point>> {
        let survivors = grow_set(&self.point_set(), hull, points_inside, ceded);
        self.rebuild(survivors, sequencer)
    }

    /// Take over the slice of `other` that lies in `points_inside`.
    ///
    /// `other` is not touched; shedding that slice is the caller's job.
    pub fn mini_grow(
        &mut self,
        other: &Land,
        points_inside: &IndexSet<Point>,
        sequencer: &Sequencer,
    ) -> LandResult<Vec<Point>> {
        let survivors = mini_grow_set(&self.point_set(), other, points_inside);
        self.rebuild(survivors, sequencer)
    }

    /// Remove one boundary point. Unknown points are a no-op.
    pub fn delete_point(&mut self, p: &Point, sequencer: &Sequencer) -> LandResult<Vec<Point>> {
        let removed: IndexSet<Point> = std::iter::once(p.clone()).collect();
        self.remove_points(&removed, sequencer)
    }

    /// Remove several boundary points at once and re-sequence the rest.
    pub fn remove_points(&mut self, removed: &IndexSet<Point>, sequencer: &Sequencer) -> LandResult<Vec<Point>> {
        if !self.boundary.iter().any(|p| removed.contains(p)) {
            return Ok(Vec::new());
        }
        let survivors: IndexSet<Point> = self.boundary.iter().filter(|p| !removed.contains(*p)).cloned().collect();
        self.rebuild(survivors, sequencer)
    }

    /// Replace the boundary with `survivors` in sequenced order. On error the land
    /// is left untouched.
    pub(crate) fn rebuild(&mut self, survivors: IndexSet<Point>, sequencer: &Sequencer) -> LandResult<Vec<Point>> {
        if survivors.len() < 3 {
            return Err(LandError::UnderpopulatedRegion { land: self.id, remaining: survivors.len() });
        }
        let sequenced = sequencer.sequence(&survivors)?;
        self.set_boundary(sequenced.order);
        Ok(sequenced.dropped)
    }

    fn set_boundary(&mut self, points: Vec<Point>) {
        self.boundary = points.into_iter().map(|p| p.with_tag(self.tag.clone())).collect();
        self.edges = closed_edges(&self.boundary, Some(&self.tag));
    }
}

/// Edges of the closed polygon through `points`, in order.
pub fn closed_edges(points: &[Point], tag: Option<&Tag>) -> Vec<Segment> {
    let n = points.len();
    (0..n)
        .map(|i| {
            let (a, b) = (points[i].clone(), points[(i + 1) % n].clone());
            match tag {
                Some(t) => Segment::tagged(a, b, t.clone()),
                None => Segment::new(a, b),
            }
        })
        .collect()
}

/// Point set left after a same-tag grow: the symmetric difference of boundary
/// and hull, plus `ceded`, minus the consumed part of `points_inside`.
pub fn grow_set(
    boundary: &IndexSet<Point>,
    hull: &[Point],
    points_inside: &IndexSet<Point>,
    ceded: &IndexSet<Point>,
) -> IndexSet<Point> {
    let hull: IndexSet<Point> = hull.iter().cloned().collect();

    let mut out: IndexSet<Point> = boundary.iter().filter(|p| !hull.contains(*p)).cloned().collect();
    out.extend(hull.iter().filter(|p| !boundary.contains(*p)).cloned());
    out.extend(ceded.iter().cloned());
    out.retain(|p| !points_inside.contains(p) || ceded.contains(p));
    out
}

/// Point set after taking over the swept slice of `other`.
pub fn mini_grow_set(boundary: &IndexSet<Point>, other: &Land, points_inside: &IndexSet<Point>) -> IndexSet<Point> {
    let mut out = boundary.clone();
    out.extend(other.swept_slice(points_inside));
    out
}
