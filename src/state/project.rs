//! Project state
//!
//! The whole console state: ordered tracks, the active selection and the
//! mastering flag. Values of this type are never edited in place once
//! published; [`reduce`](super::reduce) builds a new one for every change.

use serde::{Deserialize, Serialize};

use super::track::{Track, TrackType};

/// Id of the seeded instrumental track.
pub const SEED_BEAT_ID: &str = "beat-1";
/// Id of the seeded lead vocal track.
pub const SEED_VOCAL_ID: &str = "vocal-1";

/// Snapshot of the console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectState {
    pub(crate) tracks: Vec<Track>,
    pub(crate) active_track_id: String,
    pub(crate) is_mastering_enabled: bool,
}

impl Default for ProjectState {
    fn default() -> Self {
        Self::seeded()
    }
}

impl ProjectState {
    /// The starting session: an instrumental beat and one lead vocal, with
    /// the vocal selected.
    pub fn seeded() -> Self {
        let tracks = vec![
            Track::new(SEED_BEAT_ID, "Instrumental Beat", TrackType::Beat, "#0a0a0a")
                .with_volume(0.8),
            Track::new(SEED_VOCAL_ID, "Vocal Principal", TrackType::Lead, "#e11d48"),
        ];
        Self {
            tracks,
            active_track_id: SEED_VOCAL_ID.to_string(),
            is_mastering_enabled: false,
        }
    }

    /// Tracks in display order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id() == id)
    }

    pub(crate) fn track_mut(&mut self, id: &str) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.id() == id)
    }

    pub fn contains_track(&self, id: &str) -> bool {
        self.track(id).is_some()
    }

    pub fn active_track_id(&self) -> &str {
        &self.active_track_id
    }

    /// The selected track, falling back to the first one.
    pub fn active_track(&self) -> Option<&Track> {
        self.track(&self.active_track_id)
            .or_else(|| self.tracks.first())
    }

    pub fn is_mastering_enabled(&self) -> bool {
        self.is_mastering_enabled
    }

    /// Number of tracks that are not instrumental beats.
    pub fn vocal_track_count(&self) -> usize {
        self.tracks.iter().filter(|t| !t.is_beat()).count()
    }

    /// Tracks with an analysis still running.
    pub fn analyzing_track_ids(&self) -> Vec<&str> {
        self.tracks
            .iter()
            .filter(|t| t.is_analyzing)
            .map(|t| t.id())
            .collect()
    }
}
