//! # Intake Stage
//!
//! Records the initial task text in the message log. Never fails.

use std::sync::Arc;

use async_trait::async_trait;

use super::{log_with_narrative, StageHandler};
use crate::collab::{ReasoningCollaborator, StageError};
use crate::engine::pipeline::Stage;
use crate::engine::state::RunState;

pub struct IntakeStage {
    reasoning: Option<Arc<dyn ReasoningCollaborator>>,
}

impl IntakeStage {
    pub fn new(reasoning: Option<Arc<dyn ReasoningCollaborator>>) -> Self {
        Self { reasoning }
    }
}

#[async_trait]
impl StageHandler for IntakeStage {
    fn stage(&self) -> Stage {
        Stage::Intake
    }

    async fn run(&self, state: &mut RunState) -> Result<(), StageError> {
        let summary = format!("Accepted task: {}", state.task);
        let prompt = format!(
            "Acknowledge this activity-analysis task in one sentence: {}",
            state.task
        );
        log_with_narrative(
            state,
            Stage::Intake.agent(),
            summary,
            self.reasoning.as_deref(),
            &prompt,
        )
        .await;
        Ok(())
    }
}
