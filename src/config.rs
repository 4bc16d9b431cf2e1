//! Studio configuration
//!
//! Optional JSON settings file. Every field has a default, so an empty
//! object (or no file at all) gives the stock console behavior.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LumniaError, Result};
use crate::state::DEFAULT_TRACK_VOLUME;

/// Delay before the export placeholder reports completion.
pub const DEFAULT_EXPORT_DELAY_MS: u64 = 3000;

/// Strip color for tracks added during a session.
pub const DEFAULT_TRACK_COLOR: &str = "#10b981";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudioConfig {
    /// Milliseconds between an export request and its notification
    pub export_delay_ms: u64,

    /// Color assigned to added tracks
    pub new_track_color: String,

    /// Fader level assigned to added tracks (0.0 to 1.0)
    pub new_track_volume: f64,

    /// env_logger filter used by the CLI when RUST_LOG is unset
    pub log_filter: String,

    /// Wall-clock pacing step for `--realtime` runs
    pub realtime_tick_ms: u64,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            export_delay_ms: DEFAULT_EXPORT_DELAY_MS,
            new_track_color: DEFAULT_TRACK_COLOR.to_string(),
            new_track_volume: DEFAULT_TRACK_VOLUME,
            log_filter: "info".to_string(),
            realtime_tick_ms: 250,
        }
    }
}

impl StudioConfig {
    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| LumniaError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: StudioConfig =
            serde_json::from_str(&content).map_err(|e| LumniaError::ConfigParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(config.normalized())
    }

    /// Load from `path` when given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn normalized(mut self) -> Self {
        self.new_track_volume = self.new_track_volume.clamp(0.0, 1.0);
        self.realtime_tick_ms = self.realtime_tick_ms.max(1);
        self
    }
}
