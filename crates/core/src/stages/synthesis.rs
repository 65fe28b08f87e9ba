//! # Synthesis Stage
//!
//! Deterministically renders the accumulated run state into the final
//! Markdown report. Runs only when no earlier stage failed, so `report`
//! is populated exactly when `error` is unset.

use std::sync::Arc;

use async_trait::async_trait;

use super::{log_with_narrative, StageHandler};
use crate::collab::{ReasoningCollaborator, StageError};
use crate::engine::pipeline::Stage;
use crate::engine::state::RunState;

pub struct SynthesisStage {
    max_report_records: usize,
    reasoning: Option<Arc<dyn ReasoningCollaborator>>,
}

impl SynthesisStage {
    pub fn new(
        max_report_records: usize,
        reasoning: Option<Arc<dyn ReasoningCollaborator>>,
    ) -> Self {
        Self {
            max_report_records,
            reasoning,
        }
    }
}

#[async_trait]
impl StageHandler for SynthesisStage {
    fn stage(&self) -> Stage {
        Stage::Synthesis
    }

    async fn run(&self, state: &mut RunState) -> Result<(), StageError> {
        let report = compose_report(state, self.max_report_records);
        state.report = report;

        let summary = format!(
            "Composed final report covering {} records and {} artifacts",
            state.records.len(),
            state.artifacts.len()
        );
        let prompt = format!(
            "In one sentence, summarize a report on '{}' covering {} records.",
            state.locator,
            state.records.len()
        );
        log_with_narrative(
            state,
            Stage::Synthesis.agent(),
            summary,
            self.reasoning.as_deref(),
            &prompt,
        )
        .await;
        Ok(())
    }
}

/// Render the report from the accumulated fields. Pure over the state.
fn compose_report(state: &RunState, max_records: usize) -> String {
    let mut lines = vec![
        "# Repository Activity Report".to_string(),
        String::new(),
        format!("Resource: {}", state.locator),
        String::new(),
    ];

    if state.records.is_empty() {
        lines.push("No activity records were collected.".to_string());
    } else {
        lines.push("## Recent Activity".to_string());
        lines.push(String::new());
        for record in state.records.iter().take(max_records) {
            lines.push(format!(
                "- [{}] {} ({}, {})",
                record.id, record.message, record.author, record.timestamp
            ));
        }

        if !state.highlights.is_empty() {
            lines.push(String::new());
            lines.push("## Highlights".to_string());
            lines.push(String::new());
            lines.extend(state.highlights.iter().cloned());
        }

        if let Some(aggregations) = &state.aggregations {
            lines.push(String::new());
            lines.push("## Summary Statistics".to_string());
            lines.push(String::new());
            lines.push(format!(
                "- Total records analyzed: {}",
                aggregations.total_classified()
            ));
            if let Some(category) = aggregations.most_active_category() {
                lines.push(format!("- Most active category: {}", category.label()));
            }
            lines.push(format!(
                "- Categories represented: {}",
                aggregations.by_category.len()
            ));
        }
    }

    if !state.artifacts.is_empty() {
        lines.push(String::new());
        lines.push("## Artifacts".to_string());
        lines.push(String::new());
        for artifact in &state.artifacts {
            lines.push(format!(
                "- {}: `{}`",
                artifact.kind.title(),
                artifact.reference
            ));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{compose_highlights, ActivityRecord, Aggregations};
    use crate::artifacts::{ArtifactRef, ChartKind};

    fn analyzed_state() -> RunState {
        let mut state = RunState::new("analyze X");
        state.locator = "repo://example/project".to_string();
        state.records = vec![
            ActivityRecord::new("1", "fix: a", "dev", "2024-05-01T10:00:00Z"),
            ActivityRecord::new("2", "chore: e", "dev", "2024-05-02T10:00:00Z"),
        ];
        let aggregations = Aggregations::build(&state.records);
        state.highlights = compose_highlights(&aggregations.by_category);
        state.aggregations = Some(aggregations);
        state.artifacts = vec![ArtifactRef::new(ChartKind::Categories, "chart://cats")];
        state
    }

    #[tokio::test]
    async fn test_report_contains_all_sections() {
        let stage = SynthesisStage::new(10, None);
        let mut state = analyzed_state();

        stage.run(&mut state).await.unwrap();

        assert!(state.report.contains("repo://example/project"));
        assert!(state.report.contains("## Recent Activity"));
        assert!(state.report.contains("## Highlights"));
        assert!(state.report.contains("- Total records analyzed: 2"));
        assert!(state.report.contains("## Artifacts"));
        assert!(state.report.contains("chart://cats"));
    }

    #[tokio::test]
    async fn test_report_caps_listed_records() {
        let stage = SynthesisStage::new(1, None);
        let mut state = analyzed_state();

        stage.run(&mut state).await.unwrap();

        assert!(state.report.contains("[1] fix: a"));
        assert!(!state.report.contains("[2] chore: e"));
        // The cap affects the listing only, not the statistics
        assert!(state.report.contains("- Total records analyzed: 2"));
    }

    #[tokio::test]
    async fn test_empty_run_still_produces_report() {
        let stage = SynthesisStage::new(10, None);
        let mut state = RunState::new("analyze X");
        state.locator = "repo://example/project".to_string();
        state.aggregations = Some(Aggregations::default());

        stage.run(&mut state).await.unwrap();

        assert!(!state.report.is_empty());
        assert!(state.report.contains("No activity records were collected."));
        assert!(!state.report.contains("## Artifacts"));
    }
}
