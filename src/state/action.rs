//! Actions and the reducer
//!
//! `reduce` is the only way a [`ProjectState`] changes. It never edits its
//! input: every call returns a fresh state, so snapshots taken earlier stay
//! valid. Track-keyed actions naming a track that does not exist leave the
//! state unchanged.

use std::fmt;

use log::debug;

use super::project::ProjectState;
use super::track::{Track, TrackType};
use crate::analysis::AnalysisStage;
use crate::effects::{EffectKind, ParamMap};

/// A single state change.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Append a lead track with the given id and select it.
    AddTrack {
        id: String,
        color: String,
        volume: f64,
    },

    SetActiveTrack { track_id: String },

    /// Replace the full parameter map of one effect.
    SetEffectParams {
        track_id: String,
        kind: EffectKind,
        params: ParamMap,
    },

    ToggleEffect { track_id: String, kind: EffectKind },

    SetTrackVolume { track_id: String, volume: f64 },

    /// Record the name of an uploaded file.
    AttachFile { track_id: String, file_name: String },

    /// Mark a track as analyzing and clear its previous results.
    BeginAnalysis { track_id: String },

    /// Apply one stage of the analysis patch table.
    ApplyAnalysisStage {
        track_id: String,
        stage: AnalysisStage,
    },

    ToggleMastering,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::AddTrack { id, .. } => write!(f, "add track {}", id),
            Action::SetActiveTrack { track_id } => write!(f, "select {}", track_id),
            Action::SetEffectParams { track_id, kind, .. } => {
                write!(f, "set {} params on {}", kind, track_id)
            }
            Action::ToggleEffect { track_id, kind } => {
                write!(f, "toggle {} on {}", kind, track_id)
            }
            Action::SetTrackVolume { track_id, volume } => {
                write!(f, "volume {:.2} on {}", volume, track_id)
            }
            Action::AttachFile {
                track_id,
                file_name,
            } => write!(f, "attach '{}' to {}", file_name, track_id),
            Action::BeginAnalysis { track_id } => write!(f, "begin analysis on {}", track_id),
            Action::ApplyAnalysisStage { track_id, stage } => {
                write!(f, "analysis stage {} on {}", stage, track_id)
            }
            Action::ToggleMastering => write!(f, "toggle mastering"),
        }
    }
}

/// Build the state that results from applying `action` to `state`.
pub fn reduce(state: &ProjectState, action: &Action) -> ProjectState {
    match action {
        Action::AddTrack { id, color, volume } => {
            if state.contains_track(id) {
                debug!("ignoring add of duplicate track id {}", id);
                return state.clone();
            }
            let name = format!("Vocal {}", state.vocal_track_count() + 1);
            let track = Track::new(id.clone(), name, TrackType::Lead, color.clone())
                .with_volume(*volume);

            let mut next = state.clone();
            next.tracks.push(track);
            next.active_track_id = id.clone();
            next
        }
        Action::SetActiveTrack { track_id } => {
            if !state.contains_track(track_id) {
                debug!("ignoring selection of unknown track {}", track_id);
                return state.clone();
            }
            let mut next = state.clone();
            next.active_track_id = track_id.clone();
            next
        }
        Action::SetEffectParams {
            track_id,
            kind,
            params,
        } => patch_track(state, track_id, |track| {
            track.effects[*kind].params = params.clone();
        }),
        Action::ToggleEffect { track_id, kind } => patch_track(state, track_id, |track| {
            let settings = &mut track.effects[*kind];
            settings.enabled = !settings.enabled;
        }),
        Action::SetTrackVolume { track_id, volume } => patch_track(state, track_id, |track| {
            track.volume = volume.clamp(0.0, 1.0);
        }),
        Action::AttachFile {
            track_id,
            file_name,
        } => patch_track(state, track_id, |track| {
            track.file_name = Some(file_name.clone());
        }),
        Action::BeginAnalysis { track_id } => patch_track(state, track_id, |track| {
            track.is_analyzing = true;
            track.analysis_results.clear();
        }),
        Action::ApplyAnalysisStage { track_id, stage } => {
            patch_track(state, track_id, |track| stage.apply(track))
        }
        Action::ToggleMastering => {
            let mut next = state.clone();
            next.is_mastering_enabled = !next.is_mastering_enabled;
            next
        }
    }
}

/// Copy `state` and run `f` on the matching track of the copy.
fn patch_track(state: &ProjectState, track_id: &str, f: impl FnOnce(&mut Track)) -> ProjectState {
    let mut next = state.clone();
    match next.track_mut(track_id) {
        Some(track) => f(track),
        None => debug!("no track {}; state unchanged", track_id),
    }
    next
}
