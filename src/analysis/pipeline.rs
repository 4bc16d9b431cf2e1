//! Analysis stage table
//!
//! The "AI analysis" is a fixed script. Each stage fires at a fixed offset
//! from the start of the run, switches on a set of effects with preset
//! values and appends one label to the track's results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::effects::{EffectKind, EffectSettings};
use crate::state::Track;

/// One stage of the scripted analysis, in firing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStage {
    Clarity,
    Dynamics,
    Spatial,
    Tuning,
}

/// Progress of a track through the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    /// Never analyzed.
    Idle,
    /// Running; the contained stage fires next.
    Running(AnalysisStage),
    /// All stages applied.
    Done,
}

/// Preset values for one effect.
#[derive(Debug)]
pub struct EffectPatch {
    pub kind: EffectKind,
    pub params: &'static [(&'static str, f64)],
}

/// Everything a stage does to its track.
#[derive(Debug)]
pub struct StagePatch {
    pub stage: AnalysisStage,
    /// Milliseconds after the start of the run
    pub offset_ms: u64,
    pub effects: &'static [EffectPatch],
    pub label: &'static str,
}

pub static ANALYSIS_PIPELINE: [StagePatch; 4] = [
    StagePatch {
        stage: AnalysisStage::Clarity,
        offset_ms: 1500,
        effects: &[EffectPatch {
            kind: EffectKind::Eq,
            params: &[("low", -2.0), ("mid", 1.0), ("high", 4.0)],
        }],
        label: "clarity added (EQ high-shelf)",
    },
    StagePatch {
        stage: AnalysisStage::Dynamics,
        offset_ms: 3000,
        effects: &[EffectPatch {
            kind: EffectKind::Compression,
            params: &[("threshold", -24.0), ("ratio", 4.0), ("makeup", 3.0)],
        }],
        label: "dynamics controlled (compressor)",
    },
    StagePatch {
        stage: AnalysisStage::Spatial,
        offset_ms: 4500,
        effects: &[
            EffectPatch {
                kind: EffectKind::Reverb,
                params: &[("mix", 15.0), ("size", 40.0), ("decay", 1.8)],
            },
            EffectPatch {
                kind: EffectKind::Delay,
                params: &[("time", 400.0), ("feedback", 20.0), ("mix", 10.0)],
            },
        ],
        label: "spatial depth applied (reverb/delay)",
    },
    StagePatch {
        stage: AnalysisStage::Tuning,
        offset_ms: 6000,
        effects: &[EffectPatch {
            kind: EffectKind::Tuning,
            params: &[("retune", 15.0), ("humanize", 40.0), ("scale", 0.0)],
        }],
        label: "pitch corrected (auto-tune)",
    },
];

impl AnalysisStage {
    pub const ALL: [AnalysisStage; 4] = [
        AnalysisStage::Clarity,
        AnalysisStage::Dynamics,
        AnalysisStage::Spatial,
        AnalysisStage::Tuning,
    ];

    pub fn patch(self) -> &'static StagePatch {
        &ANALYSIS_PIPELINE[self as usize]
    }

    pub fn offset_ms(self) -> u64 {
        self.patch().offset_ms
    }

    pub fn label(self) -> &'static str {
        self.patch().label
    }

    pub fn next(self) -> Option<AnalysisStage> {
        Self::ALL.get(self as usize + 1).copied()
    }

    /// The last stage also ends the run.
    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Every effect kind the whole script writes to.
    pub fn touched_kinds() -> Vec<EffectKind> {
        ANALYSIS_PIPELINE
            .iter()
            .flat_map(|p| p.effects.iter().map(|e| e.kind))
            .collect()
    }

    /// Enable this stage's effects with their preset values and append its label.
    pub(crate) fn apply(self, track: &mut Track) {
        let patch = self.patch();
        for effect in patch.effects {
            track
                .effects
                .replace(effect.kind, EffectSettings::from_pairs(true, effect.params));
        }
        track.analysis_results.push(patch.label.to_string());
        if self.is_terminal() {
            track.is_analyzing = false;
        }
    }
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisStage::Clarity => write!(f, "clarity"),
            AnalysisStage::Dynamics => write!(f, "dynamics"),
            AnalysisStage::Spatial => write!(f, "spatial"),
            AnalysisStage::Tuning => write!(f, "tuning"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TrackType;

    #[test]
    fn test_table_order_matches_enum() {
        for (i, patch) in ANALYSIS_PIPELINE.iter().enumerate() {
            assert_eq!(patch.stage as usize, i);
            assert_eq!(patch.stage.patch().label, patch.label);
        }
    }

    #[test]
    fn test_offsets_strictly_increase() {
        let offsets: Vec<u64> = AnalysisStage::ALL.iter().map(|s| s.offset_ms()).collect();
        assert_eq!(offsets, vec![1500, 3000, 4500, 6000]);
    }

    #[test]
    fn test_stage_chain() {
        assert_eq!(AnalysisStage::Clarity.next(), Some(AnalysisStage::Dynamics));
        assert_eq!(AnalysisStage::Spatial.next(), Some(AnalysisStage::Tuning));
        assert_eq!(AnalysisStage::Tuning.next(), None);
        assert!(AnalysisStage::Tuning.is_terminal());
        assert!(!AnalysisStage::Clarity.is_terminal());
    }

    #[test]
    fn test_touched_kinds() {
        assert_eq!(
            AnalysisStage::touched_kinds(),
            vec![
                EffectKind::Eq,
                EffectKind::Compression,
                EffectKind::Reverb,
                EffectKind::Delay,
                EffectKind::Tuning,
            ]
        );
    }

    #[test]
    fn test_preset_values_are_in_range() {
        for patch in &ANALYSIS_PIPELINE {
            for effect in patch.effects {
                for (name, value) in effect.params {
                    let spec = effect
                        .kind
                        .param_spec(name)
                        .unwrap_or_else(|| panic!("{}.{} not in registry", effect.kind, name));
                    assert!(spec.contains(*value), "{}.{} = {}", effect.kind, name, value);
                }
            }
        }
    }

    #[test]
    fn test_apply_spatial_stage() {
        let mut track = Track::new("v", "Vocal", TrackType::Lead, "#fff");
        track.is_analyzing = true;
        AnalysisStage::Spatial.apply(&mut track);

        assert!(track.effects[EffectKind::Reverb].enabled);
        assert_eq!(track.effects[EffectKind::Reverb].param("decay"), Some(1.8));
        assert!(track.effects[EffectKind::Delay].enabled);
        assert_eq!(track.effects[EffectKind::Delay].param("time"), Some(400.0));
        assert_eq!(track.analysis_results, vec!["spatial depth applied (reverb/delay)"]);
        assert!(track.is_analyzing);
    }

    #[test]
    fn test_terminal_stage_ends_run() {
        let mut track = Track::new("v", "Vocal", TrackType::Lead, "#fff");
        track.is_analyzing = true;
        AnalysisStage::Tuning.apply(&mut track);
        assert!(!track.is_analyzing);
        assert_eq!(track.effects[EffectKind::Tuning].param("retune"), Some(15.0));
    }
}
