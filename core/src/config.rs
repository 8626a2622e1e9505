//! Engine configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Boundary sequencing limits
    #[serde(default)]
    pub sequencer: SequencerConfig,
    /// Interaction defaults for the board
    #[serde(default)]
    pub board: BoardConfig,
}

/// Sequencing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    /// Dead ends a single point may cause before it is pruned
    pub failure_threshold: u32,
    /// Walk restarts allowed for one sequencing call
    pub max_restarts: usize,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 100,
            max_restarts: 10_000,
        }
    }
}

/// Board configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Radius used when an interaction does not carry one
    pub reveal_radius: f64,
    /// Maximum distance for erasing a boundary point
    pub erase_threshold: f64,
    /// Tag given to ambient points that arrive without one
    pub ambient_tag: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            reveal_radius: 100.0,
            erase_threshold: 10.0,
            ambient_tag: "red".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load from a JSON file. Missing sections fall back to their defaults.
    pub fn load(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
