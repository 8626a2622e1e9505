//! The survey board: ambient points plus the land collection.
//!
//! Resolves the interaction and deletion queries (which points an interaction
//! sweeps, which lands it touches, which boundary point an erase hits) and
//! keeps the ambient pool disjoint from every land boundary.

use super::merge::{DeleteOutcome, Interaction, LandMap, MergeOutcome};
use super::persistence;
use super::{Land, LandResult};
use crate::config::{BoardConfig, EngineConfig};
use crate::geometry::{Point, Tag};
use indexmap::IndexSet;
use serde::Serialize;
use tracing::{debug, info};

/// What the renderer gets: every land and every ambient point.
#[derive(Debug, Clone, Serialize)]
pub struct BoardSnapshot {
    pub lands: Vec<Land>,
    pub ambient: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevealOutcome {
    pub merge: MergeOutcome,
    /// Ambient points the interaction used up.
    pub consumed: usize,
    /// Pruned or released points put back into the ambient pool.
    pub returned: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EraseOutcome {
    /// No boundary point within the threshold.
    Missed,
    Erased { point: Point, outcome: DeleteOutcome },
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    ambient: IndexSet<Point>,
    lands: LandMap,
    config: BoardConfig,
}

impl Board {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            ambient: IndexSet::new(),
            lands: LandMap::new(&config.sequencer),
            config: config.board.clone(),
        }
    }

    pub fn lands(&self) -> &LandMap {
        &self.lands
    }

    pub fn ambient(&self) -> impl Iterator<Item = &Point> {
        self.ambient.iter()
    }

    pub fn ambient_len(&self) -> usize {
        self.ambient.len()
    }

    /// Add ambient points. Coordinates already in the pool or on a land boundary
    /// are skipped. Returns how many were added.
    pub fn add_ambient(&mut self, points: impl IntoIterator<Item = Point>) -> usize {
        let before = self.ambient.len();
        for p in points {
            if self.lands.owner_of(&p).is_some() {
                continue;
            }
            let p = match p.tag {
                Some(_) => p,
                None => p.with_tag(Tag::new(self.config.ambient_tag.as_str())),
            };
            self.ambient.insert(p);
        }
        self.ambient.len() - before
    }

    /// Run one interaction centred on `location`.
    ///
    /// Swept ambient points are consumed on success. On error nothing changes.
    pub fn reveal(&mut self, location: &Point, radius: Option<f64>, tag: Tag) -> LandResult<RevealOutcome> {
        let radius = radius.unwrap_or(self.config.reveal_radius);

        let swept_ambient: Vec<Point> =
            self.ambient.iter().filter(|p| p.distance(location) <= radius).cloned().collect();
        let (touched, points_inside) = self.lands.boundary_points_within(location, radius);
        debug!(
            "Reveal at ({}, {}) r={}: {} ambient, {} boundary point(s), {} land(s)",
            location.x,
            location.y,
            radius,
            swept_ambient.len(),
            points_inside.len(),
            touched.len()
        );

        let mut swept = swept_ambient.clone();
        swept.extend(points_inside.iter().cloned());
        let interaction = Interaction { swept, tag, touched, points_inside };

        let merge = self.lands.apply_interaction(&interaction)?;

        for p in &swept_ambient {
            self.ambient.shift_remove(p);
        }
        let returned = self.return_to_pool(merge.dropped.iter().chain(merge.released.iter()));

        Ok(RevealOutcome { merge, consumed: swept_ambient.len(), returned })
    }

    /// Delete the boundary point nearest to `location`, if one is close enough.
    pub fn erase(&mut self, location: &Point, threshold: Option<f64>) -> LandResult<EraseOutcome> {
        let threshold = threshold.unwrap_or(self.config.erase_threshold);
        let Some((id, point)) = self.lands.nearest_boundary_point(location, threshold) else {
            return Ok(EraseOutcome::Missed);
        };

        let outcome = self.lands.delete_point(id, &point)?;
        match &outcome {
            DeleteOutcome::Reshaped { dropped, .. } => self.return_to_pool(dropped.iter()),
            DeleteOutcome::Removed { released, .. } => self.return_to_pool(released.iter()),
        };
        info!("Erased ({}, {}) from land {}", point.x, point.y, id);
        Ok(EraseOutcome::Erased { point, outcome })
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            lands: self.lands.lands().cloned().collect(),
            ambient: self.ambient.iter().cloned().collect(),
        }
    }

    pub fn save_lands(&self) -> LandResult<String> {
        persistence::to_json(self.lands.lands())
    }

    /// Replace every land with the ones stored in `json`. Ambient points that
    /// now sit on a loaded boundary leave the pool.
    pub fn load_lands(&mut self, json: &str) -> LandResult<usize> {
        let loaded = persistence::from_json(json)?;
        let count = loaded.len();

        self.lands.clear();
        for land in loaded {
            self.lands.insert(land);
        }
        let lands = &self.lands;
        self.ambient.retain(|p| lands.owner_of(p).is_none());

        info!("Loaded {} land(s)", count);
        Ok(count)
    }

    fn return_to_pool<'a>(&mut self, points: impl Iterator<Item = &'a Point>) -> usize {
        let tag = Tag::new(self.config.ambient_tag.as_str());
        let mut returned = 0;
        for p in points {
            if self.lands.owner_of(p).is_none() && self.ambient.insert(p.clone().with_tag(tag.clone())) {
                returned += 1;
            }
        }
        returned
    }
}
