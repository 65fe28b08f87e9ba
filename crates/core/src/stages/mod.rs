//! # Stage Handlers
//!
//! One handler per pipeline stage, each implementing [`StageHandler`].
//!
//! A handler mutates the run state and returns `Ok` or a fatal
//! [`StageError`]; the engine maps the error onto the state and halts.
//! Recoverable collaborator failures (rendering, reasoning) are handled
//! inside the stage and never reach the engine.
//!
//! Every handler appends a [`StageMessage`](crate::engine::StageMessage)
//! describing what it did. When a reasoning collaborator is present the
//! handler additionally asks it for a short narrative on the outcome;
//! that narrative is strictly additive and never feeds back into
//! structural fields.

use async_trait::async_trait;

use crate::collab::{ReasoningCollaborator, StageError};
use crate::engine::pipeline::Stage;
use crate::engine::state::RunState;

pub mod analysis;
pub mod collection;
pub mod discovery;
pub mod intake;
pub mod planning;
pub mod synthesis;

pub use analysis::AnalysisStage;
pub use collection::CollectionStage;
pub use discovery::DiscoveryStage;
pub use intake::IntakeStage;
pub use planning::PlanningStage;
pub use synthesis::SynthesisStage;

/// One unit of work in the fixed pipeline
#[async_trait]
pub trait StageHandler: Send + Sync {
    /// Which stage this handler implements
    fn stage(&self) -> Stage;

    /// Run the stage against the shared run state
    async fn run(&self, state: &mut RunState) -> Result<(), StageError>;
}

/// Ask the reasoning collaborator for narrative text. `None` when the
/// collaborator is absent or fails; the caller keeps its state-only
/// summary either way.
pub(crate) async fn narrate(
    reasoning: Option<&dyn ReasoningCollaborator>,
    prompt: &str,
) -> Option<String> {
    let reasoning = reasoning?;
    match reasoning.respond(prompt).await {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::warn!("reasoning unavailable, keeping state-only narrative: {e}");
            None
        }
    }
}

/// Log a stage summary, with the reasoning narrative appended when one
/// could be produced.
pub(crate) async fn log_with_narrative(
    state: &mut RunState,
    agent: &str,
    summary: String,
    reasoning: Option<&dyn ReasoningCollaborator>,
    prompt: &str,
) {
    let mut content = summary;
    if let Some(note) = narrate(reasoning, prompt).await {
        content.push_str("\n\n");
        content.push_str(&note);
    }
    state.log(agent, content);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::ReasoningError;

    struct EchoReasoning;

    #[async_trait]
    impl ReasoningCollaborator for EchoReasoning {
        async fn respond(&self, prompt: &str) -> Result<String, ReasoningError> {
            Ok(format!("echo: {prompt}"))
        }
    }

    struct FailingReasoning;

    #[async_trait]
    impl ReasoningCollaborator for FailingReasoning {
        async fn respond(&self, _prompt: &str) -> Result<String, ReasoningError> {
            Err(ReasoningError::new("model offline"))
        }
    }

    #[tokio::test]
    async fn test_narrate_absent_collaborator() {
        assert_eq!(narrate(None, "anything").await, None);
    }

    #[tokio::test]
    async fn test_narrate_failure_recovers_to_none() {
        assert_eq!(narrate(Some(&FailingReasoning), "anything").await, None);
    }

    #[tokio::test]
    async fn test_log_with_narrative_appends_note() {
        let mut state = RunState::new("task");
        log_with_narrative(
            &mut state,
            "intake",
            "summary".to_string(),
            Some(&EchoReasoning),
            "prompt",
        )
        .await;
        assert_eq!(state.messages.len(), 1);
        assert!(state.messages[0].content.starts_with("summary"));
        assert!(state.messages[0].content.contains("echo: prompt"));
    }

    #[tokio::test]
    async fn test_log_without_narrative_keeps_summary_only() {
        let mut state = RunState::new("task");
        log_with_narrative(
            &mut state,
            "intake",
            "summary".to_string(),
            Some(&FailingReasoning),
            "prompt",
        )
        .await;
        assert_eq!(state.messages[0].content, "summary");
    }
}
