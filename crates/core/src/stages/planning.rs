//! # Planning Stage
//!
//! Annotates the run with a plan. May consult the reasoning collaborator
//! for a richer plan narrative; never alters control flow.

use std::sync::Arc;

use async_trait::async_trait;

use super::{log_with_narrative, StageHandler};
use crate::collab::{ReasoningCollaborator, StageError};
use crate::engine::pipeline::Stage;
use crate::engine::state::RunState;

pub struct PlanningStage {
    reasoning: Option<Arc<dyn ReasoningCollaborator>>,
}

impl PlanningStage {
    pub fn new(reasoning: Option<Arc<dyn ReasoningCollaborator>>) -> Self {
        Self { reasoning }
    }
}

#[async_trait]
impl StageHandler for PlanningStage {
    fn stage(&self) -> Stage {
        Stage::Planning
    }

    async fn run(&self, state: &mut RunState) -> Result<(), StageError> {
        let summary =
            "Plan: discover a resource, collect its activity records, analyze them, synthesize a report."
                .to_string();
        let prompt = format!("Create a brief plan for: {}", state.task);
        log_with_narrative(
            state,
            Stage::Planning.agent(),
            summary,
            self.reasoning.as_deref(),
            &prompt,
        )
        .await;
        Ok(())
    }
}
