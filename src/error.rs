//! Error handling for Lumnia
//!
//! Track-keyed state operations never fail: an unknown id is a silent no-op.
//! The variants below cover the edges around the core (knob helpers,
//! deserialization, configuration and CLI arguments).

use std::path::PathBuf;

use thiserror::Error;

use crate::effects::EffectKind;

/// Result type alias for Lumnia operations
pub type Result<T> = std::result::Result<T, LumniaError>;

/// Main error type for Lumnia operations
#[derive(Error, Debug)]
pub enum LumniaError {
    // Effect Errors
    #[error("Unknown parameter '{name}' for effect '{kind}'")]
    UnknownParameter { kind: EffectKind, name: String },

    #[error("Effect rack is missing an entry for '{kind}'")]
    MissingEffect { kind: EffectKind },

    // Track Errors
    #[error("Track not found: {id}")]
    UnknownTrack { id: String },

    // Configuration Errors
    #[error("Failed to read config file: {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LumniaError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            LumniaError::UnknownParameter { .. } => "UNKNOWN_PARAMETER",
            LumniaError::MissingEffect { .. } => "MISSING_EFFECT",
            LumniaError::UnknownTrack { .. } => "UNKNOWN_TRACK",
            LumniaError::ConfigRead { .. } => "CONFIG_READ",
            LumniaError::ConfigParse { .. } => "CONFIG_PARSE",
            LumniaError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Returns a user-facing recovery suggestion.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            LumniaError::UnknownParameter { .. } => {
                Some("Run 'lumnia-cli effects' to list the parameters of each effect.")
            }
            LumniaError::UnknownTrack { .. } => {
                Some("Seed tracks are 'beat-1' and 'vocal-1'; run 'lumnia-cli state' to list them.")
            }
            LumniaError::ConfigRead { .. } => Some("Check the config path and try again."),
            LumniaError::ConfigParse { .. } => {
                Some("The config must be a JSON object; unknown keys are rejected.")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = LumniaError::UnknownTrack {
            id: "vocal-9".to_string(),
        };
        assert_eq!(err.error_code(), "UNKNOWN_TRACK");
        assert_eq!(err.to_string(), "Track not found: vocal-9");
    }

    #[test]
    fn test_recovery_suggestions() {
        let err = LumniaError::UnknownParameter {
            kind: EffectKind::Eq,
            name: "presence".to_string(),
        };
        assert!(err.recovery_suggestion().is_some());
        assert_eq!(
            err.to_string(),
            "Unknown parameter 'presence' for effect 'eq'"
        );

        let err = LumniaError::MissingEffect {
            kind: EffectKind::Stereo,
        };
        assert!(err.recovery_suggestion().is_none());
    }
}
