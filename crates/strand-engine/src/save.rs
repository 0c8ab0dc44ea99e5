//! Replay-based save states.
//!
//! A save is a recipe, not a snapshot: the RNG seed plus the ordered list
//! of links the player followed. Restoring replays the whole story, so
//! author code remains the single source of truth for derived state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

/// Save format version written by this engine.
pub const SAVE_VERSION: u32 = 1;

/// A serializable save state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveState {
    /// Save format version.
    pub version: u32,
    /// RNG seed the engine was created with.
    pub seed: u64,
    /// Links followed, in order.
    pub progress: Vec<String>,
    /// When the save was captured.
    pub saved_at: DateTime<Utc>,
}

impl SaveState {
    /// Capture a save state, timestamped now.
    pub fn new(seed: u64, progress: Vec<String>) -> Self {
        Self {
            version: SAVE_VERSION,
            seed,
            progress,
            saved_at: Utc::now(),
        }
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
