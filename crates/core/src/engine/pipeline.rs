//! # Pipeline Stages
//!
//! The fixed, total stage order of a run. No branching, retries or
//! skipping at this level; a stage failure is terminal for the run.

use serde::{Deserialize, Serialize};

/// Stage of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Recording the initial task
    Intake,
    /// Annotating the run with a plan
    Planning,
    /// Resolving the resource locator
    Discovery,
    /// Fetching the activity record batch
    Collection,
    /// Classifying, aggregating and generating artifacts
    Analysis,
    /// Composing the final report
    Synthesis,
    /// Terminal: run succeeded
    Complete,
    /// Terminal: run halted on a fatal stage error
    Failed,
}

/// Working stages in execution order
pub const STAGE_ORDER: [Stage; 6] = [
    Stage::Intake,
    Stage::Planning,
    Stage::Discovery,
    Stage::Collection,
    Stage::Analysis,
    Stage::Synthesis,
];

impl Stage {
    /// The stage after this one. Monotonic; terminal stages absorb.
    pub fn next(self) -> Stage {
        match self {
            Stage::Intake => Stage::Planning,
            Stage::Planning => Stage::Discovery,
            Stage::Discovery => Stage::Collection,
            Stage::Collection => Stage::Analysis,
            Stage::Analysis => Stage::Synthesis,
            Stage::Synthesis => Stage::Complete,
            Stage::Complete => Stage::Complete,
            Stage::Failed => Stage::Failed,
        }
    }

    /// Agent label used in the message log and tracing spans
    pub fn agent(&self) -> &'static str {
        match self {
            Stage::Intake => "intake",
            Stage::Planning => "planning",
            Stage::Discovery => "discovery",
            Stage::Collection => "collection",
            Stage::Analysis => "analysis",
            Stage::Synthesis => "synthesis",
            Stage::Complete => "complete",
            Stage::Failed => "failed",
        }
    }

    /// Whether this stage ends the run
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Complete | Stage::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_is_total() {
        let mut stage = Stage::Intake;
        for expected in STAGE_ORDER {
            assert_eq!(stage, expected);
            stage = stage.next();
        }
        assert_eq!(stage, Stage::Complete);
    }

    #[test]
    fn test_terminal_stages_absorb() {
        assert_eq!(Stage::Complete.next(), Stage::Complete);
        assert_eq!(Stage::Failed.next(), Stage::Failed);
        assert!(Stage::Complete.is_terminal());
        assert!(Stage::Failed.is_terminal());
        assert!(!Stage::Analysis.is_terminal());
    }
}
