//! Land persistence.
//!
//! Lands are stored as an ordered JSON list of `{"tag": ..., "points": [[x, y], ...]}`.
//! Point order is the boundary order, so loading rebuilds the exact polygon
//! without re-sequencing. `color` is accepted in place of `tag`.

use super::{Land, LandError, LandId, LandResult};
use crate::geometry::{Point, Tag};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandRecord {
    #[serde(alias = "color")]
    pub tag: Tag,
    pub points: Vec<[f64; 2]>,
}

impl From<&Land> for LandRecord {
    fn from(land: &Land) -> Self {
        Self {
            tag: land.tag.clone(),
            points: land.boundary().iter().map(Point::coords).collect(),
        }
    }
}

pub fn to_json<'a>(lands: impl Iterator<Item = &'a Land>) -> LandResult<String> {
    let records: Vec<LandRecord> = lands.map(LandRecord::from).collect();
    serde_json::to_string_pretty(&records).map_err(|e| LandError::Persistence(e.to_string()))
}

/// Parse stored lands. Each land gets a fresh id.
///
/// Rejects lands with fewer than three points and coordinates that appear twice,
/// whether inside one land or across two.
pub fn from_json(json: &str) -> LandResult<Vec<Land>> {
    let records: Vec<LandRecord> = serde_json::from_str(json).map_err(|e| LandError::Persistence(e.to_string()))?;

    let mut seen = HashSet::new();
    let mut lands = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let boundary: Vec<Point> = record.points.iter().map(|&c| Point::from(c)).collect();
        if let Some(dup) = boundary.iter().find(|p| !seen.insert(p.key())) {
            return Err(LandError::Persistence(format!(
                "land {} repeats point ({}, {})",
                index, dup.x, dup.y
            )));
        }
        let land = Land::from_boundary(LandId::new(), record.tag, boundary)
            .map_err(|e| LandError::Persistence(format!("land {}: {}", index, e)))?;
        lands.push(land);
    }
    Ok(lands)
}

pub fn save<'a>(lands: impl Iterator<Item = &'a Land>, path: impl AsRef<Path>) -> LandResult<()> {
    let json = to_json(lands)?;
    std::fs::write(path, json).map_err(|e| LandError::Persistence(e.to_string()))
}

pub fn load(path: impl AsRef<Path>) -> LandResult<Vec<Land>> {
    let json = std::fs::read_to_string(path).map_err(|e| LandError::Persistence(e.to_string()))?;
    from_json(&json)
}
