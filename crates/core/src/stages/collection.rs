//! # Collection Stage
//!
//! Fetches the activity record batch for the discovered locator.
//!
//! Policy: a collaborator error is fatal; a successfully fetched empty
//! batch is not, and flows through as all-empty aggregations downstream.

use std::sync::Arc;

use async_trait::async_trait;

use super::{log_with_narrative, StageHandler};
use crate::collab::{CollectionCollaborator, ReasoningCollaborator, StageError};
use crate::engine::pipeline::Stage;
use crate::engine::state::RunState;

pub struct CollectionStage {
    collection: Arc<dyn CollectionCollaborator>,
    reasoning: Option<Arc<dyn ReasoningCollaborator>>,
}

impl CollectionStage {
    pub fn new(
        collection: Arc<dyn CollectionCollaborator>,
        reasoning: Option<Arc<dyn ReasoningCollaborator>>,
    ) -> Self {
        Self {
            collection,
            reasoning,
        }
    }
}

#[async_trait]
impl StageHandler for CollectionStage {
    fn stage(&self) -> Stage {
        Stage::Collection
    }

    async fn run(&self, state: &mut RunState) -> Result<(), StageError> {
        let records = self.collection.fetch_records(&state.locator).await?;

        let summary = format!(
            "Collected {} activity records from {}",
            records.len(),
            state.locator
        );
        state.records = records;

        let prompt = format!(
            "In one sentence, comment on a batch of {} activity records from '{}'.",
            state.records.len(),
            state.locator
        );
        log_with_narrative(
            state,
            Stage::Collection.agent(),
            summary,
            self.reasoning.as_deref(),
            &prompt,
        )
        .await;
        Ok(())
    }
}
