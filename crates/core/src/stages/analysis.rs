//! # Analysis Stage
//!
//! Runs the pure analysis chain over the collected batch: classifier,
//! aggregator, artifact generator, highlight composer. Individual bad
//! records are skipped by the aggregator; an empty batch produces empty
//! aggregations, not an error.

use std::sync::Arc;

use async_trait::async_trait;

use super::{log_with_narrative, StageHandler};
use crate::analysis::{compose_highlights, Aggregations};
use crate::artifacts::generate_artifacts;
use crate::collab::{ReasoningCollaborator, RenderingCollaborator, StageError};
use crate::engine::pipeline::Stage;
use crate::engine::state::RunState;

pub struct AnalysisStage {
    renderer: Option<Arc<dyn RenderingCollaborator>>,
    reasoning: Option<Arc<dyn ReasoningCollaborator>>,
}

impl AnalysisStage {
    pub fn new(
        renderer: Option<Arc<dyn RenderingCollaborator>>,
        reasoning: Option<Arc<dyn ReasoningCollaborator>>,
    ) -> Self {
        Self {
            renderer,
            reasoning,
        }
    }
}

#[async_trait]
impl StageHandler for AnalysisStage {
    fn stage(&self) -> Stage {
        Stage::Analysis
    }

    async fn run(&self, state: &mut RunState) -> Result<(), StageError> {
        let aggregations = Aggregations::build(&state.records);
        state.highlights = compose_highlights(&aggregations.by_category);
        state.artifacts = match &self.renderer {
            Some(renderer) => generate_artifacts(renderer.as_ref(), &aggregations).await,
            None => Vec::new(),
        };

        let summary = format!(
            "Classified {} records into {} categories and produced {} artifacts",
            aggregations.total_classified(),
            aggregations.by_category.len(),
            state.artifacts.len()
        );
        state.aggregations = Some(aggregations);

        let prompt = format!("In one sentence, comment on this analysis outcome: {summary}");
        log_with_narrative(
            state,
            Stage::Analysis.agent(),
            summary,
            self.reasoning.as_deref(),
            &prompt,
        )
        .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ActivityRecord;
    use crate::artifacts::{ArtifactRef, ChartKind, ChartSeries};
    use crate::collab::RenderError;

    struct StubRenderer;

    #[async_trait]
    impl RenderingCollaborator for StubRenderer {
        async fn render(
            &self,
            kind: ChartKind,
            _series: &ChartSeries,
        ) -> Result<ArtifactRef, RenderError> {
            Ok(ArtifactRef::new(kind, "chart://stub"))
        }
    }

    fn batch() -> Vec<ActivityRecord> {
        vec![
            ActivityRecord::new("1", "fix: broken parser", "dev", "2024-05-01T10:00:00Z"),
            ActivityRecord::new("2", "chore: tidy", "dev", "2024-05-02T10:00:00Z"),
        ]
    }

    #[tokio::test]
    async fn test_analysis_fills_derived_fields() {
        let stage = AnalysisStage::new(Some(Arc::new(StubRenderer)), None);
        let mut state = RunState::new("analyze X");
        state.records = batch();

        stage.run(&mut state).await.unwrap();

        let aggregations = state.aggregations.as_ref().unwrap();
        assert_eq!(aggregations.total_classified(), 2);
        assert!(!state.highlights.is_empty());
        assert_eq!(state.artifacts.len(), 3);
    }

    #[tokio::test]
    async fn test_analysis_without_renderer_yields_no_artifacts() {
        let stage = AnalysisStage::new(None, None);
        let mut state = RunState::new("analyze X");
        state.records = batch();

        stage.run(&mut state).await.unwrap();

        assert!(state.artifacts.is_empty());
        assert!(state.aggregations.is_some());
    }

    #[tokio::test]
    async fn test_empty_batch_is_not_an_error() {
        let stage = AnalysisStage::new(Some(Arc::new(StubRenderer)), None);
        let mut state = RunState::new("analyze X");

        stage.run(&mut state).await.unwrap();

        assert!(state.aggregations.as_ref().unwrap().is_empty());
        assert!(state.highlights.is_empty());
        assert!(state.artifacts.is_empty());
    }
}
