//! # Collaborators
//!
//! Trait seams for the external capabilities the pipeline depends on but
//! does not implement: resource discovery, record collection, chart
//! rendering and reasoning/narration. Implementations live outside this
//! crate; tests use hand-rolled doubles.
//!
//! The error taxonomy splits fatal failures (discovery, collection) from
//! locally recovered ones (rendering, reasoning).

use async_trait::async_trait;
use thiserror::Error;

use crate::analysis::ActivityRecord;
use crate::artifacts::{ArtifactRef, ChartKind, ChartSeries};

/// No resource locator could be resolved. Fatal: the run halts.
#[derive(Debug, Clone, Error)]
#[error("discovery failed: {message}")]
pub struct DiscoveryError {
    pub message: String,
}

impl DiscoveryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Records could not be obtained for a locator. Fatal: the run halts.
/// A successfully fetched empty batch is not an error.
#[derive(Debug, Clone, Error)]
#[error("collection failed: {message}")]
pub struct CollectionError {
    pub message: String,
}

impl CollectionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A single artifact could not be rendered. Recovered locally: the
/// artifact is skipped, the run continues.
#[derive(Debug, Clone, Error)]
#[error("render failed: {message}")]
pub struct RenderError {
    pub message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The reasoning collaborator could not produce narrative text. Recovered
/// locally: the stage falls back to its state-only summary.
#[derive(Debug, Clone, Error)]
#[error("reasoning failed: {message}")]
pub struct ReasoningError {
    pub message: String,
}

impl ReasoningError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Fatal outcome of one stage. The engine maps this onto `RunState::error`
/// and halts; it never retries a failed stage.
#[derive(Debug, Clone, Error)]
pub enum StageError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Collection(#[from] CollectionError),
}

/// Resolves the resource locator the run will analyze. Any retry policy
/// lives inside the implementation; a returned error means it is exhausted.
#[async_trait]
pub trait DiscoveryCollaborator: Send + Sync {
    async fn find_resource(&self) -> Result<String, DiscoveryError>;
}

/// Fetches the ordered activity batch for a locator. Implementations must
/// bound the result to their configured maximum.
#[async_trait]
pub trait CollectionCollaborator: Send + Sync {
    async fn fetch_records(&self, locator: &str) -> Result<Vec<ActivityRecord>, CollectionError>;
}

/// Renders one chart from a prepared series, returning an opaque reference.
#[async_trait]
pub trait RenderingCollaborator: Send + Sync {
    async fn render(&self, kind: ChartKind, series: &ChartSeries)
        -> Result<ArtifactRef, RenderError>;
}

/// Produces short narrative text for a stage outcome. Optional; absence
/// means stages log state-only summaries.
#[async_trait]
pub trait ReasoningCollaborator: Send + Sync {
    async fn respond(&self, prompt: &str) -> Result<String, ReasoningError>;
}
