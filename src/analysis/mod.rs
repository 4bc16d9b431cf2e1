//! Pseudo-Analysis
//!
//! A scripted stand-in for AI analysis: no audio is inspected. A run is a
//! four-stage state machine whose per-stage effect patches live in a static
//! table.

mod pipeline;
mod sequencer;

pub use pipeline::{AnalysisPhase, AnalysisStage, EffectPatch, StagePatch, ANALYSIS_PIPELINE};
pub use sequencer::{plan_analysis, AnalysisPlan, AnalysisStep};
