//! # Discovery Stage
//!
//! Resolves the resource locator via the discovery collaborator. Any retry
//! policy lives inside the collaborator; an error from it means the policy
//! is exhausted and the run halts.

use std::sync::Arc;

use async_trait::async_trait;

use super::{log_with_narrative, StageHandler};
use crate::collab::{DiscoveryCollaborator, ReasoningCollaborator, StageError};
use crate::engine::pipeline::Stage;
use crate::engine::state::RunState;

pub struct DiscoveryStage {
    discovery: Arc<dyn DiscoveryCollaborator>,
    reasoning: Option<Arc<dyn ReasoningCollaborator>>,
}

impl DiscoveryStage {
    pub fn new(
        discovery: Arc<dyn DiscoveryCollaborator>,
        reasoning: Option<Arc<dyn ReasoningCollaborator>>,
    ) -> Self {
        Self {
            discovery,
            reasoning,
        }
    }
}

#[async_trait]
impl StageHandler for DiscoveryStage {
    fn stage(&self) -> Stage {
        Stage::Discovery
    }

    async fn run(&self, state: &mut RunState) -> Result<(), StageError> {
        let locator = self.discovery.find_resource().await?;
        state.locator = locator;

        let summary = format!("Discovered resource: {}", state.locator);
        let prompt = format!(
            "In one sentence, say why resource '{}' is worth analyzing.",
            state.locator
        );
        log_with_narrative(
            state,
            Stage::Discovery.agent(),
            summary,
            self.reasoning.as_deref(),
            &prompt,
        )
        .await;
        Ok(())
    }
}
