//! State Management Module
//!
//! Project state, the track model and the reducer that is the single
//! mutation path for both.

mod action;
mod project;
mod track;

pub use action::{reduce, Action};
pub use project::{ProjectState, SEED_BEAT_ID, SEED_VOCAL_ID};
pub use track::{Track, TrackType, DEFAULT_TRACK_VOLUME};
