//! # Artifact Generator
//!
//! Decides which charts to render from the aggregations and delegates the
//! actual rendering to the rendering collaborator. One artifact per
//! non-empty aggregation; a failed render skips that artifact only.

use serde::{Deserialize, Serialize};

use crate::analysis::Aggregations;
use crate::collab::RenderingCollaborator;

/// Kind of rendered chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Time-series line of records per day
    Timeline,
    /// Bar chart of records per category
    Categories,
    /// Bar chart of most frequent tokens
    Topics,
}

impl ChartKind {
    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Timeline => "Activity Over Time",
            ChartKind::Categories => "Records by Category",
            ChartKind::Topics => "Most Mentioned Topics",
        }
    }
}

/// Label/value series prepared for the rendering collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

/// Opaque, immutable reference to a rendered visualization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRef {
    pub kind: ChartKind,
    pub reference: String,
}

impl ArtifactRef {
    pub fn new(kind: ChartKind, reference: impl Into<String>) -> Self {
        Self {
            kind,
            reference: reference.into(),
        }
    }
}

/// Build the chart series for every non-empty aggregation, in fixed order:
/// timeline, categories, topics.
fn chart_specs(aggregations: &Aggregations) -> Vec<(ChartKind, ChartSeries)> {
    let mut specs = Vec::new();

    if !aggregations.by_date.is_empty() {
        specs.push((
            ChartKind::Timeline,
            ChartSeries {
                title: ChartKind::Timeline.title().to_string(),
                labels: aggregations
                    .by_date
                    .iter()
                    .map(|d| d.date.format("%Y-%m-%d").to_string())
                    .collect(),
                values: aggregations.by_date.iter().map(|d| d.count as u64).collect(),
            },
        ));
    }

    if !aggregations.by_category.is_empty() {
        specs.push((
            ChartKind::Categories,
            ChartSeries {
                title: ChartKind::Categories.title().to_string(),
                labels: aggregations
                    .by_category
                    .iter()
                    .map(|b| b.category.label().to_string())
                    .collect(),
                values: aggregations
                    .by_category
                    .iter()
                    .map(|b| b.count as u64)
                    .collect(),
            },
        ));
    }

    if !aggregations.top_tokens.is_empty() {
        specs.push((
            ChartKind::Topics,
            ChartSeries {
                title: ChartKind::Topics.title().to_string(),
                labels: aggregations
                    .top_tokens
                    .iter()
                    .map(|t| t.token.clone())
                    .collect(),
                values: aggregations
                    .top_tokens
                    .iter()
                    .map(|t| t.count as u64)
                    .collect(),
            },
        ));
    }

    specs
}

/// Render one artifact per non-empty aggregation. A `RenderError` skips
/// that artifact and the run continues with the rest.
pub async fn generate_artifacts(
    renderer: &dyn RenderingCollaborator,
    aggregations: &Aggregations,
) -> Vec<ArtifactRef> {
    let mut artifacts = Vec::new();
    for (kind, series) in chart_specs(aggregations) {
        match renderer.render(kind, &series).await {
            Ok(artifact) => artifacts.push(artifact),
            Err(e) => {
                tracing::warn!(kind = ?kind, "skipping artifact: {e}");
            }
        }
    }
    artifacts
}
