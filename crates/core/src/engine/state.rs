//! # Run State
//!
//! The single shared mutable record threaded through one pipeline
//! execution. Created empty at run start, owned exclusively by the engine,
//! discarded or returned at run end; nothing survives across runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::pipeline::Stage;
use crate::analysis::{ActivityRecord, Aggregations};
use crate::artifacts::ArtifactRef;

/// One entry in the per-run message log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageMessage {
    /// Agent label of the stage that wrote this entry
    pub agent: String,
    /// Narrative or summary content
    pub content: String,
    /// When the entry was written
    pub timestamp: DateTime<Utc>,
}

impl StageMessage {
    pub fn new(agent: &str, content: impl Into<String>) -> Self {
        Self {
            agent: agent.to_string(),
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// State of one pipeline run.
///
/// Invariants, enforced by [`RunState::fail`] and [`RunState::advance`]:
/// once `error` is set only the message log changes further;
/// `current_stage` advances monotonically; `report` is populated only in
/// the terminal stage and only when `error` is unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// The task text this run was started with
    pub task: String,
    /// Per-stage message log, append-only
    pub messages: Vec<StageMessage>,
    /// Stage the run is currently in (or terminal state)
    pub current_stage: Stage,
    /// Resource locator resolved by discovery; empty until then
    pub locator: String,
    /// Raw record batch from collection
    pub records: Vec<ActivityRecord>,
    /// Derived aggregations, present after analysis
    pub aggregations: Option<Aggregations>,
    /// Highlight lines composed from the categorical aggregation
    pub highlights: Vec<String>,
    /// References to rendered artifacts
    pub artifacts: Vec<ArtifactRef>,
    /// Final report text, written only by synthesis
    pub report: String,
    /// Terminal error message; check before trusting `report`
    pub error: Option<String>,
}

impl RunState {
    /// Create the empty state for a new run
    pub fn new(task: &str) -> Self {
        Self {
            task: task.to_string(),
            messages: Vec::new(),
            current_stage: Stage::Intake,
            locator: String::new(),
            records: Vec::new(),
            aggregations: None,
            highlights: Vec::new(),
            artifacts: Vec::new(),
            report: String::new(),
            error: None,
        }
    }

    /// Append a message to the log. The one mutation still allowed after
    /// a run has failed.
    pub fn log(&mut self, agent: &str, content: impl Into<String>) {
        self.messages.push(StageMessage::new(agent, content));
    }

    /// Advance to the next stage. No-op once the run has failed.
    pub fn advance(&mut self) {
        if self.error.is_none() {
            self.current_stage = self.current_stage.next();
        }
    }

    /// Halt the run with a terminal error. Fields written by earlier
    /// stages are kept for diagnostics; a second call changes nothing.
    pub fn fail(&mut self, agent: &str, message: impl Into<String>) {
        if self.error.is_some() {
            return;
        }
        let message = message.into();
        self.log(agent, format!("Stage failed: {message}"));
        self.error = Some(message);
        self.current_stage = Stage::Failed;
    }

    /// Whether the run has halted on a fatal error
    pub fn is_halted(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = RunState::new("analyze X");
        assert_eq!(state.task, "analyze X");
        assert_eq!(state.current_stage, Stage::Intake);
        assert!(state.locator.is_empty());
        assert!(state.records.is_empty());
        assert!(state.report.is_empty());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_fail_is_terminal_and_idempotent() {
        let mut state = RunState::new("analyze X");
        state.locator = "X".to_string();
        state.fail("discovery", "no resource");

        assert_eq!(state.error.as_deref(), Some("no resource"));
        assert_eq!(state.current_stage, Stage::Failed);
        // Diagnostic fields written before the failure are preserved
        assert_eq!(state.locator, "X");

        state.fail("collection", "later error");
        assert_eq!(state.error.as_deref(), Some("no resource"));

        state.advance();
        assert_eq!(state.current_stage, Stage::Failed);
    }

    #[test]
    fn test_log_still_allowed_after_failure() {
        let mut state = RunState::new("analyze X");
        state.fail("discovery", "no resource");
        let before = state.messages.len();
        state.log("engine", "post-mortem note");
        assert_eq!(state.messages.len(), before + 1);
    }

    #[test]
    fn test_advance_is_monotonic() {
        let mut state = RunState::new("analyze X");
        state.advance();
        assert_eq!(state.current_stage, Stage::Planning);
        state.advance();
        assert_eq!(state.current_stage, Stage::Discovery);
    }
}
