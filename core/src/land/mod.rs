//! Lands: tagged polygons grown from revealed points.
//!
//! A land is created from the convex hull of the points an interaction sweeps,
//! then grows, absorbs neighbours of its own tag, or trades boundary slices with
//! lands of another tag as further interactions overlap it. Every boundary change
//! goes through the [`Sequencer`], which keeps the polygon simple.

pub mod types;
pub mod sequencer;
pub mod merge;
pub mod board;
pub mod persistence;

#[cfg(test)]
mod tests_land;
#[cfg(test)]
mod tests_board;

pub use board::{Board, BoardSnapshot, EraseOutcome, RevealOutcome};
pub use merge::{Interaction, LandMap, MergeKind, MergeOutcome};
pub use sequencer::{Sequenced, Sequencer};
pub use types::Land;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Stable identity of a land. Survives every boundary mutation; a land absorbed
/// into another simply stops existing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LandId(pub Uuid);

impl LandId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LandId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur while building or mutating lands.
///
/// All of them are recoverable: the operation that failed leaves the land
/// collection exactly as it was.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LandError {
    #[error("Degenerate hull: {points} distinct point(s), need at least 3")]
    DegenerateHull { points: usize },

    #[error("Sequencing unresolved after {restarts} restart(s), {remaining} point(s) left")]
    SequencingUnresolved { restarts: usize, remaining: usize },

    #[error("Land {land} would keep only {remaining} boundary point(s)")]
    UnderpopulatedRegion { land: LandId, remaining: usize },

    #[error("Unknown land: {0}")]
    UnknownLand(LandId),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type for land operations.
pub type LandResult<T> = Result<T, LandError>;
