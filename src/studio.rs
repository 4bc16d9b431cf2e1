//! Studio controller
//!
//! Owns the current [`ProjectState`] snapshot, the timer queue and the
//! transport. Every user request and every fired timer goes through
//! [`Studio::dispatch`], one at a time, so mutations never overlap.
//!
//! ```
//! use lumnia::studio::Studio;
//! use lumnia::state::SEED_VOCAL_ID;
//!
//! let mut studio = Studio::default();
//! studio.upload_file(SEED_VOCAL_ID, "take_03.wav");
//! studio.run_until_idle();
//!
//! let state = studio.state();
//! let vocal = state.track(SEED_VOCAL_ID).unwrap();
//! assert!(!vocal.is_analyzing);
//! assert_eq!(vocal.analysis_results.len(), 4);
//! ```

use std::sync::Arc;

use log::{debug, info, warn};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::{plan_analysis, AnalysisStep};
use crate::config::StudioConfig;
use crate::effects::{EffectKind, ParamMap};
use crate::engine::{Fired, Scheduler, TransportManager, TransportState};
use crate::error::{LumniaError, Result};
use crate::state::{reduce, Action, ProjectState};

/// Message shown when the export placeholder completes.
pub const EXPORT_NOTIFICATION: &str = "mix exported successfully (simulation)";

/// Work deferred on the studio clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudioEvent {
    Analysis(AnalysisStep),
    ExportComplete,
}

/// A user-visible message raised by deferred work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub at_ms: u64,
    pub message: String,
}

/// The console controller.
#[derive(Debug)]
pub struct Studio {
    config: StudioConfig,
    state: Arc<ProjectState>,
    scheduler: Scheduler<StudioEvent>,
    transport: TransportManager,
    notifications: Vec<Notification>,
}

impl Default for Studio {
    fn default() -> Self {
        Self::new(StudioConfig::default())
    }
}

impl Studio {
    /// Start a session from the seeded project.
    pub fn new(config: StudioConfig) -> Self {
        Self::with_state(config, ProjectState::seeded())
    }

    /// Start a session from an existing state.
    pub fn with_state(config: StudioConfig, state: ProjectState) -> Self {
        Self {
            config,
            state: Arc::new(state),
            scheduler: Scheduler::new(),
            transport: TransportManager::new(),
            notifications: Vec::new(),
        }
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// Current state. The snapshot never changes after it is handed out.
    pub fn state(&self) -> Arc<ProjectState> {
        Arc::clone(&self.state)
    }

    /// Studio clock in milliseconds since the session started
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Apply one action through the reducer.
    pub fn dispatch(&mut self, action: Action) {
        debug!("[DISPATCH] {}", action);
        self.state = Arc::new(reduce(&self.state, &action));
    }

    // ========================================================================
    // Tracks
    // ========================================================================

    /// Add a lead track with a fresh id and select it. Returns the new id.
    pub fn add_track(&mut self) -> String {
        let id = loop {
            let candidate = format!("vocal-{}", Uuid::new_v4().simple());
            if !self.state.contains_track(&candidate) {
                break candidate;
            }
        };
        self.dispatch(Action::AddTrack {
            id: id.clone(),
            color: self.config.new_track_color.clone(),
            volume: self.config.new_track_volume,
        });
        info!("Added track {}", id);
        id
    }

    pub fn set_active_track(&mut self, track_id: &str) {
        self.dispatch(Action::SetActiveTrack {
            track_id: track_id.to_string(),
        });
    }

    pub fn set_track_volume(&mut self, track_id: &str, volume: f64) {
        self.dispatch(Action::SetTrackVolume {
            track_id: track_id.to_string(),
            volume,
        });
    }

    /// Look up a track id supplied from outside (e.g. a CLI argument).
    pub fn require_track(&self, track_id: &str) -> Result<()> {
        if self.state.contains_track(track_id) {
            Ok(())
        } else {
            Err(LumniaError::UnknownTrack {
                id: track_id.to_string(),
            })
        }
    }

    // ========================================================================
    // Effects
    // ========================================================================

    /// Replace the whole parameter map of one effect.
    pub fn set_effect_params(&mut self, track_id: &str, kind: EffectKind, params: ParamMap) {
        self.dispatch(Action::SetEffectParams {
            track_id: track_id.to_string(),
            kind,
            params,
        });
    }

    /// Set one knob: the value is clamped to the parameter's range and merged
    /// into the current map. Returns the clamped value, which is not stored
    /// anywhere when the track does not exist.
    pub fn set_effect_param(
        &mut self,
        track_id: &str,
        kind: EffectKind,
        name: &str,
        value: f64,
    ) -> Result<f64> {
        let spec = kind
            .param_spec(name)
            .ok_or_else(|| LumniaError::UnknownParameter {
                kind,
                name: name.to_string(),
            })?;
        let value = spec.clamp(value);

        let Some(track) = self.state.track(track_id) else {
            debug!("no track {}; knob change dropped", track_id);
            return Ok(value);
        };
        let mut params = track.effects[kind].params.clone();
        params.insert(name.to_string(), value);
        self.set_effect_params(track_id, kind, params);
        Ok(value)
    }

    pub fn toggle_effect_enabled(&mut self, track_id: &str, kind: EffectKind) {
        self.dispatch(Action::ToggleEffect {
            track_id: track_id.to_string(),
            kind,
        });
    }

    /// Flip the mastering flag. Returns the new value.
    pub fn toggle_mastering(&mut self) -> bool {
        self.dispatch(Action::ToggleMastering);
        self.state.is_mastering_enabled()
    }

    // ========================================================================
    // Analysis
    // ========================================================================

    /// Record an uploaded file's name and start the analysis on that track.
    ///
    /// Returns false (and changes nothing) if the track does not exist.
    pub fn upload_file(&mut self, track_id: &str, file_name: &str) -> bool {
        if !self.state.contains_track(track_id) {
            warn!("Upload for unknown track {} ignored", track_id);
            return false;
        }
        self.dispatch(Action::AttachFile {
            track_id: track_id.to_string(),
            file_name: file_name.to_string(),
        });
        info!("Uploaded '{}' to {}", file_name, track_id);
        self.start_analysis(track_id)
    }

    /// Reset the track's analysis and schedule the four stages.
    ///
    /// Runs cannot be cancelled. Starting again on a track that is still
    /// analyzing schedules a second run alongside the first.
    pub fn start_analysis(&mut self, track_id: &str) -> bool {
        if !self.state.contains_track(track_id) {
            warn!("Analysis for unknown track {} ignored", track_id);
            return false;
        }
        let plan = plan_analysis(track_id);
        self.dispatch(plan.start);
        for (offset_ms, step) in plan.steps {
            self.scheduler
                .schedule_in(offset_ms, StudioEvent::Analysis(step));
        }
        info!("[ANALYSIS] Started on {} at {}ms", track_id, self.now_ms());
        true
    }

    // ========================================================================
    // Transport & Export
    // ========================================================================

    pub fn toggle_playback(&mut self) -> TransportState {
        self.transport.toggle_playback()
    }

    /// Start the export placeholder. Returns false if one is already running.
    pub fn export(&mut self) -> bool {
        let delay_ms = self.config.export_delay_ms;
        let now_ms = self.now_ms();
        match self.transport.begin_export(now_ms, delay_ms) {
            Some(_) => {
                self.scheduler.schedule_in(delay_ms, StudioEvent::ExportComplete);
                info!("[EXPORT] Rendering mix (simulated, {}ms)", delay_ms);
                true
            }
            None => false,
        }
    }

    pub fn is_exporting(&self) -> bool {
        self.transport.is_exporting()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Remove and return all pending notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // ========================================================================
    // Clock
    // ========================================================================

    /// Due time of the next deferred event, if any
    pub fn next_due_ms(&self) -> Option<u64> {
        self.scheduler.next_due()
    }

    pub fn pending_events(&self) -> usize {
        self.scheduler.pending()
    }

    /// Move the clock forward by `elapsed_ms`, firing everything that falls
    /// due on the way. Returns the number of events fired.
    pub fn advance(&mut self, elapsed_ms: u64) -> usize {
        let horizon = self.now_ms().saturating_add(elapsed_ms);
        let mut fired = 0;
        while let Some(event) = self.scheduler.pop_due(horizon) {
            self.fire(event);
            fired += 1;
        }
        self.scheduler.advance_clock(horizon);
        fired
    }

    /// Fire every pending event, jumping the clock as needed.
    pub fn run_until_idle(&mut self) -> usize {
        let mut fired = 0;
        while let Some(due) = self.next_due_ms() {
            fired += self.advance(due.saturating_sub(self.now_ms()));
        }
        fired
    }

    fn fire(&mut self, fired: Fired<StudioEvent>) {
        match fired.event {
            StudioEvent::Analysis(step) => {
                if !self.state.contains_track(&step.track_id) {
                    debug!(
                        "[ANALYSIS] {} stage for missing track {} skipped",
                        step.stage, step.track_id
                    );
                    return;
                }
                info!(
                    "[ANALYSIS] {} @ {}ms: {}",
                    step.track_id,
                    fired.due_ms,
                    step.stage.label()
                );
                self.dispatch(step.into_action());
            }
            StudioEvent::ExportComplete => {
                if self.transport.finish_export() {
                    info!("[EXPORT] {}", EXPORT_NOTIFICATION);
                    self.notifications.push(Notification {
                        at_ms: fired.due_ms,
                        message: EXPORT_NOTIFICATION.to_string(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisStage;
    use crate::state::{SEED_BEAT_ID, SEED_VOCAL_ID};
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_snapshots_are_stable() {
        let mut studio = Studio::default();
        let before = studio.state();
        studio.toggle_effect_enabled(SEED_VOCAL_ID, EffectKind::Reverb);
        let after = studio.state();

        assert!(!before.track(SEED_VOCAL_ID).unwrap().effects[EffectKind::Reverb].enabled);
        assert!(after.track(SEED_VOCAL_ID).unwrap().effects[EffectKind::Reverb].enabled);
    }

    #[test]
    fn test_set_effect_param_merges_and_clamps() {
        let mut studio = Studio::default();
        let stored = studio
            .set_effect_param(SEED_VOCAL_ID, EffectKind::Eq, "high", 30.0)
            .unwrap();
        assert_eq!(stored, 12.0);

        let state = studio.state();
        let eq = &state.track(SEED_VOCAL_ID).unwrap().effects[EffectKind::Eq];
        assert_eq!(eq.param("high"), Some(12.0));
        assert_eq!(eq.param("low"), Some(0.0));
        assert_eq!(eq.param("mid"), Some(0.0));
    }

    #[test]
    fn test_set_effect_param_unknown_name() {
        let mut studio = Studio::default();
        let err = studio
            .set_effect_param(SEED_VOCAL_ID, EffectKind::Eq, "presence", 1.0)
            .unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_PARAMETER");
    }

    #[test]
    fn test_set_effect_param_unknown_track_is_noop() {
        let mut studio = Studio::default();
        let before = studio.state();
        let stored = studio
            .set_effect_param("ghost", EffectKind::Reverb, "decay", 0.01)
            .unwrap();
        assert_relative_eq!(stored, 0.1);
        assert_eq!(*studio.state(), *before);
    }

    #[test]
    fn test_upload_records_name_and_starts() {
        let mut studio = Studio::default();
        assert!(studio.upload_file(SEED_VOCAL_ID, "take_01.wav"));

        let state = studio.state();
        let vocal = state.track(SEED_VOCAL_ID).unwrap();
        assert_eq!(vocal.file_name.as_deref(), Some("take_01.wav"));
        assert!(vocal.is_analyzing);
        assert_eq!(studio.pending_events(), 4);
        assert_eq!(studio.next_due_ms(), Some(1500));
    }

    #[test]
    fn test_upload_unknown_track() {
        let mut studio = Studio::default();
        let before = studio.state();
        assert!(!studio.upload_file("ghost", "take.wav"));
        assert_eq!(*studio.state(), *before);
        assert_eq!(studio.pending_events(), 0);
    }

    #[test]
    fn test_advance_moves_clock_without_events() {
        let mut studio = Studio::default();
        assert_eq!(studio.advance(250), 0);
        assert_eq!(studio.now_ms(), 250);
    }

    #[test]
    fn test_analysis_offsets_are_relative_to_start() {
        let mut studio = Studio::default();
        studio.advance(1000);
        studio.start_analysis(SEED_VOCAL_ID);

        assert_eq!(studio.advance(1499), 0);
        assert_eq!(studio.advance(1), 1);
        let state = studio.state();
        assert_eq!(
            state.track(SEED_VOCAL_ID).unwrap().analysis_results,
            vec![AnalysisStage::Clarity.label()]
        );
    }

    #[test]
    fn test_export_notification() {
        let mut studio = Studio::default();
        assert!(studio.export());
        assert!(studio.is_exporting());
        assert!(!studio.export());

        studio.advance(2999);
        assert!(studio.notifications().is_empty());
        studio.advance(1);
        assert!(!studio.is_exporting());
        assert_eq!(
            studio.take_notifications(),
            vec![Notification {
                at_ms: 3000,
                message: EXPORT_NOTIFICATION.to_string()
            }]
        );
        assert!(studio.notifications().is_empty());
    }

    #[test]
    fn test_export_delay_from_config() {
        let config = StudioConfig {
            export_delay_ms: 10,
            ..StudioConfig::default()
        };
        let mut studio = Studio::new(config);
        studio.export();
        assert_eq!(studio.run_until_idle(), 1);
        assert_eq!(studio.notifications()[0].at_ms, 10);
    }

    #[test]
    fn test_export_leaves_project_untouched() {
        let mut studio = Studio::default();
        let before = studio.state();
        studio.export();
        studio.run_until_idle();
        assert_eq!(*studio.state(), *before);
    }

    #[test]
    fn test_stage_for_removed_track_is_skipped() {
        let mut studio = Studio::default();
        let id = studio.add_track();
        assert!(studio.start_analysis(&id));

        // Drop the track while its stages are still queued
        studio.state = Arc::new(ProjectState::seeded());
        assert_eq!(studio.run_until_idle(), 4);
        assert_eq!(*studio.state(), ProjectState::seeded());
        assert_eq!(studio.pending_events(), 0);
    }

    #[test]
    fn test_require_track() {
        let studio = Studio::default();
        assert!(studio.require_track(SEED_BEAT_ID).is_ok());
        assert_eq!(
            studio.require_track("nope").unwrap_err().error_code(),
            "UNKNOWN_TRACK"
        );
    }
}
