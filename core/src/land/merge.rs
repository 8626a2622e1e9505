//! Merge orchestration: decides what one interaction does to the land collection.
//!
//! Every new land state is computed on copies first. The collection is only
//! written once all sequencing has succeeded, so a failed interaction leaves it
//! exactly as it was.

use super::sequencer::Sequencer;
use super::types::{grow_set, mini_grow_set, Land};
use super::{LandError, LandId, LandResult};
use crate::config::SequencerConfig;
use crate::geometry::{convex_hull, Point, Tag};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use tracing::{debug, info, warn};

/// One resolved interaction, as handed over by the board.
#[derive(Debug, Clone)]
pub struct Interaction {
    /// Every point the interaction swept: ambient points and touched boundary points.
    pub swept: Vec<Point>,
    pub tag: Tag,
    /// Lands with at least one boundary point inside the interaction radius.
    pub touched: Vec<LandId>,
    /// Boundary points of the touched lands inside the radius.
    pub points_inside: IndexSet<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MergeKind {
    /// Nothing was touched; a new land was made from the hull.
    Created,
    /// A single land of the same tag absorbed the hull.
    Grown,
    /// A single land of another tag was touched; the new land took its swept slice.
    Contested,
    /// Several lands were touched and consolidated into a new land.
    Merged,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeOutcome {
    pub kind: MergeKind,
    /// The land that was created or grown.
    pub land: LandId,
    /// Same-tag lands absorbed into `land`.
    pub absorbed: Vec<LandId>,
    /// Lands of another tag that ceded part of their boundary.
    pub shrunk: Vec<LandId>,
    /// Lands of another tag left with fewer than three points, now gone.
    pub removed: Vec<LandId>,
    /// Points the sequencer pruned.
    pub dropped: Vec<Point>,
    /// Remaining points of removed lands.
    pub released: Vec<Point>,
}

impl MergeOutcome {
    fn new(kind: MergeKind, land: LandId) -> Self {
        Self {
            kind,
            land,
            absorbed: Vec::new(),
            shrunk: Vec::new(),
            removed: Vec::new(),
            dropped: Vec::new(),
            released: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DeleteOutcome {
    /// The land lost the point and was re-sequenced.
    Reshaped { land: LandId, dropped: Vec<Point> },
    /// Too few points were left; the land is gone and its points released.
    Removed { land: LandId, released: Vec<Point> },
}

/// New state of a land of another tag after giving up its swept slice.
enum Shed {
    Kept(Land, Vec<Point>),
    Removed(LandId, Vec<Point>),
}

/// The land collection. Sole writer of every land it holds.
#[derive(Debug, Clone, Default)]
pub struct LandMap {
    lands: IndexMap<LandId, Land>,
    sequencer: Sequencer,
}

impl LandMap {
    pub fn new(config: &SequencerConfig) -> Self {
        Self { lands: IndexMap::new(), sequencer: Sequencer::new(config) }
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn len(&self) -> usize {
        self.lands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lands.is_empty()
    }

    pub fn get(&self, id: &LandId) -> Option<&Land> {
        self.lands.get(id)
    }

    /// Lands in creation order.
    pub fn lands(&self) -> impl Iterator<Item = &Land> {
        self.lands.values()
    }

    pub fn insert(&mut self, land: Land) {
        self.lands.insert(land.id, land);
    }

    pub fn clear(&mut self) {
        self.lands.clear();
    }

    /// Land whose boundary holds this coordinate, if any.
    pub fn owner_of(&self, p: &Point) -> Option<LandId> {
        self.lands.values().find(|land| land.contains(p)).map(|land| land.id)
    }

    /// Lands with a boundary point within `radius` of `location`, and those points.
    pub fn boundary_points_within(&self, location: &Point, radius: f64) -> (Vec<LandId>, IndexSet<Point>) {
        let mut touched = Vec::new();
        let mut inside = IndexSet::new();
        for land in self.lands.values() {
            let before = inside.len();
            inside.extend(land.boundary().iter().filter(|p| p.distance(location) <= radius).cloned());
            if inside.len() > before {
                touched.push(land.id);
            }
        }
        (touched, inside)
    }

    /// Nearest boundary point across all lands, if one lies within `threshold`.
    pub fn nearest_boundary_point(&self, location: &Point, threshold: f64) -> Option<(LandId, Point)> {
        self.lands
            .values()
            .flat_map(|land| land.boundary().iter().map(move |p| (land.id, p)))
            .map(|(id, p)| (id, p, p.distance(location)))
            .filter(|(_, _, d)| *d <= threshold)
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(id, p, _)| (id, p.clone()))
    }

    /// Resolve one interaction: create, grow, contest or merge.
    pub fn apply_interaction(&mut self, interaction: &Interaction) -> LandResult<MergeOutcome> {
        let hull = convex_hull(&interaction.swept);
        if hull.len() < 3 {
            return Err(LandError::DegenerateHull { points: hull.len() });
        }

        // Snapshot of the touched lands; the collection is only written below.
        let mut touched: Vec<Land> = Vec::new();
        for id in interaction.touched.iter().collect::<IndexSet<_>>() {
            touched.push(self.lands.get(id).cloned().ok_or(LandError::UnknownLand(*id))?);
        }

        let tag = &interaction.tag;
        let inside = &interaction.points_inside;

        let outcome = match touched.as_slice() {
            [] => {
                let land = Land::from_hull(tag.clone(), hull)?;
                let outcome = MergeOutcome::new(MergeKind::Created, land.id);
                self.insert(land);
                outcome
            }
            [existing] if existing.tag == *tag => {
                let mut grown = existing.clone();
                let dropped = grown.grow(&hull, inside, &IndexSet::new(), &self.sequencer)?;
                let mut outcome = MergeOutcome::new(MergeKind::Grown, grown.id);
                outcome.dropped = dropped;
                self.insert(grown);
                outcome
            }
            [foreign] => {
                let mut land = Land::from_hull(tag.clone(), hull)?;
                let mut dropped = land.mini_grow(foreign, inside, &self.sequencer)?;
                let shed = self.shed(foreign, inside)?;

                let mut outcome = MergeOutcome::new(MergeKind::Contested, land.id);
                self.commit_shed(shed, &mut outcome, &mut dropped);
                outcome.dropped = dropped;
                self.insert(land);
                outcome
            }
            _ => self.merge_many(&touched, hull, tag, inside)?,
        };

        info!(
            "Interaction {:?} -> land {} ({} absorbed, {} shrunk, {} removed)",
            outcome.kind,
            outcome.land,
            outcome.absorbed.len(),
            outcome.shrunk.len(),
            outcome.removed.len()
        );
        if !outcome.dropped.is_empty() {
            warn!("Sequencer pruned {} point(s) during interaction", outcome.dropped.len());
        }
        Ok(outcome)
    }

    /// Several touched lands: consolidate them into one new land of `tag`.
    ///
    /// Same-tag lands are absorbed whole. Lands of another tag cede their swept
    /// slice and survive otherwise. The consolidated set is sequenced once.
    fn merge_many(
        &mut self,
        touched: &[Land],
        hull: Vec<Point>,
        tag: &Tag,
        inside: &IndexSet<Point>,
    ) -> LandResult<MergeOutcome> {
        let mut land = Land::from_hull(tag.clone(), hull)?;

        let ceded: IndexSet<Point> = touched
            .iter()
            .filter(|other| other.tag != *tag)
            .flat_map(|other| other.swept_slice(inside))
            .collect();

        let mut points = land.point_set();
        let mut absorbed = Vec::new();
        let mut foreign = Vec::new();
        for other in touched {
            if other.tag == *tag {
                points = grow_set(&points, other.boundary(), inside, &ceded);
                absorbed.push(other.id);
            } else {
                points = mini_grow_set(&points, other, inside);
                foreign.push(other);
            }
        }
        debug!("Consolidating {} point(s) from {} land(s)", points.len(), touched.len());

        let mut dropped = land.rebuild(points, &self.sequencer)?;
        let sheds = foreign
            .into_iter()
            .map(|other| self.shed(other, inside))
            .collect::<LandResult<Vec<_>>>()?;

        let mut outcome = MergeOutcome::new(MergeKind::Merged, land.id);
        for id in &absorbed {
            self.lands.shift_remove(id);
        }
        outcome.absorbed = absorbed;
        for shed in sheds {
            self.commit_shed(shed, &mut outcome, &mut dropped);
        }
        outcome.dropped = dropped;
        self.insert(land);
        Ok(outcome)
    }

    /// Compute what `land` looks like once its swept slice is gone.
    fn shed(&self, land: &Land, inside: &IndexSet<Point>) -> LandResult<Shed> {
        let slice = land.swept_slice(inside);
        let mut rest = land.clone();
        match rest.remove_points(&slice, &self.sequencer) {
            Ok(dropped) => Ok(Shed::Kept(rest, dropped)),
            Err(LandError::UnderpopulatedRegion { .. }) => {
                let remaining = land.boundary().iter().filter(|p| !slice.contains(*p)).cloned().collect();
                Ok(Shed::Removed(land.id, remaining))
            }
            Err(e) => Err(e),
        }
    }

    fn commit_shed(&mut self, shed: Shed, outcome: &mut MergeOutcome, dropped: &mut Vec<Point>) {
        match shed {
            Shed::Kept(land, shed_dropped) => {
                outcome.shrunk.push(land.id);
                dropped.extend(shed_dropped);
                self.insert(land);
            }
            Shed::Removed(id, remaining) => {
                warn!("Land {} fell below three points and was removed", id);
                self.lands.shift_remove(&id);
                outcome.removed.push(id);
                outcome.released.extend(remaining);
            }
        }
    }

    /// Delete one boundary point from a land.
    ///
    /// A land that would keep fewer than three points is removed entirely.
    pub fn delete_point(&mut self, id: LandId, p: &Point) -> LandResult<DeleteOutcome> {
        let land = self.lands.get(&id).ok_or(LandError::UnknownLand(id))?;
        let mut reshaped = land.clone();

        match reshaped.delete_point(p, &self.sequencer) {
            Ok(dropped) => {
                self.insert(reshaped);
                Ok(DeleteOutcome::Reshaped { land: id, dropped })
            }
            Err(LandError::UnderpopulatedRegion { remaining, .. }) => {
                warn!("Land {} down to {} point(s), removing it", id, remaining);
                let released = self
                    .lands
                    .shift_remove(&id)
                    .map(|land| land.boundary().iter().filter(|q| *q != p).cloned().collect())
                    .unwrap_or_default();
                Ok(DeleteOutcome::Removed { land: id, released })
            }
            Err(e) => Err(e),
        }
    }
}
