//! Track model

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisPhase, AnalysisStage};
use crate::effects::EffectRack;

/// Default fader level for a newly added track.
pub const DEFAULT_TRACK_VOLUME: f64 = 0.7;

/// Role of a track in the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackType {
    Lead,
    Double,
    Beat,
    Master,
}

impl fmt::Display for TrackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackType::Lead => write!(f, "lead"),
            TrackType::Double => write!(f, "double"),
            TrackType::Beat => write!(f, "beat"),
            TrackType::Master => write!(f, "master"),
        }
    }
}

/// A single track in the mixing console.
///
/// The id is assigned at creation and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    id: String,

    /// Display name ("Vocal 2", "Instrumental Beat", ...)
    pub name: String,

    #[serde(rename = "type")]
    pub track_type: TrackType,

    /// Fader level, 0.0 to 1.0
    pub volume: f64,

    /// Stereo position, -1.0 (left) to 1.0 (right)
    pub pan: f64,

    pub effects: EffectRack,

    /// CSS-style color used by the console strip
    pub color: String,

    /// Name of the uploaded file. The content is never read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    #[serde(default)]
    pub is_analyzing: bool,

    /// Labels appended by each completed analysis stage, in order
    #[serde(default)]
    pub analysis_results: Vec<String>,
}

impl Track {
    /// Create a track with registry-default effects, default volume and center pan.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        track_type: TrackType,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            track_type,
            volume: DEFAULT_TRACK_VOLUME,
            pan: 0.0,
            effects: EffectRack::new(),
            color: color.into(),
            file_name: None,
            is_analyzing: false,
            analysis_results: Vec::new(),
        }
    }

    /// Set the initial fader level (clamped to 0.0..=1.0)
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_beat(&self) -> bool {
        self.track_type == TrackType::Beat
    }

    /// Where this track sits in the analysis sequence.
    ///
    /// The stage is derived from the number of results. With overlapping runs
    /// on one track the count can pass the last stage while a run is still
    /// pending; the phase then stays at the last stage until the flag clears.
    pub fn analysis_phase(&self) -> AnalysisPhase {
        if self.is_analyzing {
            let last = AnalysisStage::ALL.len() - 1;
            AnalysisPhase::Running(AnalysisStage::ALL[self.analysis_results.len().min(last)])
        } else if self.analysis_results.is_empty() {
            AnalysisPhase::Idle
        } else {
            AnalysisPhase::Done
        }
    }
}
