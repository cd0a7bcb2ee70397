use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::validate_dimensions;
use crate::search::{DEFAULT_PROXIMITY_RADIUS, DEFAULT_SEARCH_DEPTH};
use super::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub board_size: usize,
    pub win_length: usize,
    pub proximity_radius: usize,
    pub search_depth: usize,
    /// Root-level parallelism; `None` uses every available execution unit.
    pub worker_count: Option<usize>,
    /// Per-move search budget; `None` waits for every root branch.
    pub move_timeout_ms: Option<u64>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            board_size: 3,
            win_length: 3,
            proximity_radius: DEFAULT_PROXIMITY_RADIUS,
            search_depth: DEFAULT_SEARCH_DEPTH,
            worker_count: None,
            move_timeout_ms: None,
        }
    }
}

impl EngineSettings {
    pub fn resolved_worker_count(&self) -> usize {
        self.worker_count.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    pub fn move_timeout(&self) -> Option<Duration> {
        self.move_timeout_ms.map(Duration::from_millis)
    }
}

impl Validate for EngineSettings {
    fn validate(&self) -> Result<(), String> {
        validate_dimensions(self.board_size, self.win_length)?;
        if self.proximity_radius < 1 {
            return Err("Proximity radius must be at least 1".to_string());
        }
        if self.search_depth < 1 {
            return Err("Search depth must be at least 1".to_string());
        }
        if self.worker_count == Some(0) {
            return Err("Worker count must be at least 1".to_string());
        }
        Ok(())
    }
}
