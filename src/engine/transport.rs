//! Transport and export state for the Lumnia console
//!
//! Playback is a flag only: no audio is rendered. Export is a placeholder
//! that completes after a delay and never writes a file.

use std::fmt;

use log::{debug, warn};

/// Transport states representing the current playback mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportState {
    /// Transport is stopped (default state)
    #[default]
    Stopped,
    /// The mix is "playing"
    Playing,
}

impl fmt::Display for TransportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportState::Stopped => write!(f, "Stopped"),
            TransportState::Playing => write!(f, "Playing"),
        }
    }
}

/// Progress of the export placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportState {
    #[default]
    Idle,
    /// Export requested; completes at `due_ms`
    Exporting { started_ms: u64, due_ms: u64 },
}

/// Holds the play/stop flag and the export placeholder state
#[derive(Debug, Clone, Default)]
pub struct TransportManager {
    state: TransportState,
    export: ExportState,
}

impl TransportManager {
    /// Create a stopped transport with no export in flight
    ///
    /// # Example
    /// ```
    /// use lumnia::engine::TransportManager;
    /// let transport = TransportManager::new();
    /// assert!(!transport.is_playing());
    /// assert!(!transport.is_exporting());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Playback
    // ========================================================================

    /// Flip between Stopped and Playing, returning the new state
    ///
    /// # Example
    /// ```
    /// use lumnia::engine::{TransportManager, TransportState};
    /// let mut transport = TransportManager::new();
    /// assert_eq!(transport.toggle_playback(), TransportState::Playing);
    /// assert_eq!(transport.toggle_playback(), TransportState::Stopped);
    /// ```
    pub fn toggle_playback(&mut self) -> TransportState {
        self.state = match self.state {
            TransportState::Stopped => TransportState::Playing,
            TransportState::Playing => TransportState::Stopped,
        };
        debug!("[TRANSPORT] {}", self.state);
        self.state
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == TransportState::Playing
    }

    // ========================================================================
    // Export Placeholder
    // ========================================================================

    /// Mark an export as started at `now_ms`, due `delay_ms` later.
    ///
    /// Returns the due time, or None if an export is already in flight.
    pub fn begin_export(&mut self, now_ms: u64, delay_ms: u64) -> Option<u64> {
        if let ExportState::Exporting { due_ms, .. } = self.export {
            warn!("[EXPORT] Already exporting (due at {}ms)", due_ms);
            return None;
        }
        let due_ms = now_ms.saturating_add(delay_ms);
        self.export = ExportState::Exporting {
            started_ms: now_ms,
            due_ms,
        };
        debug!("[EXPORT] Started at {}ms, due at {}ms", now_ms, due_ms);
        Some(due_ms)
    }

    /// Clear the in-flight export. Returns false if none was running.
    pub fn finish_export(&mut self) -> bool {
        match std::mem::take(&mut self.export) {
            ExportState::Exporting { started_ms, .. } => {
                debug!("[EXPORT] Finished (started at {}ms)", started_ms);
                true
            }
            ExportState::Idle => false,
        }
    }

    pub fn export_state(&self) -> ExportState {
        self.export
    }

    pub fn is_exporting(&self) -> bool {
        matches!(self.export, ExportState::Exporting { .. })
    }
}
