//! Analysis sequencer
//!
//! Turns a request to analyze a track into the immediate reset action plus
//! the four deferred stage steps. The caller owns the clock; this module only
//! says what should happen and when.

use crate::state::Action;

use super::pipeline::AnalysisStage;

/// A deferred stage of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisStep {
    pub track_id: String,
    pub stage: AnalysisStage,
}

impl AnalysisStep {
    pub fn into_action(self) -> Action {
        Action::ApplyAnalysisStage {
            track_id: self.track_id,
            stage: self.stage,
        }
    }
}

/// Schedule for one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisPlan {
    /// Applied synchronously when the run starts
    pub start: Action,
    /// `(offset_ms, step)` pairs, in firing order
    pub steps: Vec<(u64, AnalysisStep)>,
}

/// Build the plan for analyzing `track_id`.
pub fn plan_analysis(track_id: &str) -> AnalysisPlan {
    let steps = AnalysisStage::ALL
        .iter()
        .map(|stage| {
            (
                stage.offset_ms(),
                AnalysisStep {
                    track_id: track_id.to_string(),
                    stage: *stage,
                },
            )
        })
        .collect();

    AnalysisPlan {
        start: Action::BeginAnalysis {
            track_id: track_id.to_string(),
        },
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_shape() {
        let plan = plan_analysis("vocal-1");
        assert_eq!(
            plan.start,
            Action::BeginAnalysis {
                track_id: "vocal-1".into()
            }
        );
        let schedule: Vec<(u64, AnalysisStage)> =
            plan.steps.iter().map(|(at, step)| (*at, step.stage)).collect();
        assert_eq!(
            schedule,
            vec![
                (1500, AnalysisStage::Clarity),
                (3000, AnalysisStage::Dynamics),
                (4500, AnalysisStage::Spatial),
                (6000, AnalysisStage::Tuning),
            ]
        );
        assert!(plan.steps.iter().all(|(_, step)| step.track_id == "vocal-1"));
    }

    #[test]
    fn test_step_into_action() {
        let step = AnalysisStep {
            track_id: "vocal-1".into(),
            stage: AnalysisStage::Dynamics,
        };
        assert_eq!(
            step.into_action(),
            Action::ApplyAnalysisStage {
                track_id: "vocal-1".into(),
                stage: AnalysisStage::Dynamics,
            }
        );
    }
}
