//! # RepoPulse Core
//!
//! Pipeline engine and activity analysis for RepoPulse: drives a task
//! through a fixed six-stage pipeline (intake, planning, discovery,
//! collection, analysis, synthesis) over a single shared run state, then
//! classifies and aggregates the collected activity records into a report
//! and rendered artifacts.
//!
//! ## Architecture
//!
//! - `engine/` - stage order, run state, and the stepwise/complete runners
//! - `stages/` - the six stage handlers
//! - `analysis/` - taxonomy, aggregations, highlight composition (pure)
//! - `artifacts` - chart selection and delegation to the renderer
//! - `collab/` - traits for the external capabilities the core consumes
//!
//! ## Usage
//!
//! ```rust,ignore
//! use repopulse_core::{Engine, EngineConfig};
//!
//! let engine = Engine::new(EngineConfig::default(), discovery, collection)
//!     .with_renderer(renderer)
//!     .with_reasoning(reasoning);
//! let state = engine.run_to_completion("analyze the trending repo").await;
//! if state.error.is_none() {
//!     println!("{}", state.report);
//! }
//! ```

pub mod analysis;
pub mod artifacts;
pub mod collab;
pub mod config;
pub mod engine;
pub mod stages;

pub use analysis::{ActivityRecord, Aggregations, Category};
pub use artifacts::{ArtifactRef, ChartKind, ChartSeries};
pub use collab::{
    CollectionCollaborator, CollectionError, DiscoveryCollaborator, DiscoveryError,
    ReasoningCollaborator, ReasoningError, RenderError, RenderingCollaborator, StageError,
};
pub use config::EngineConfig;
pub use engine::{Engine, RunState, Stage, StageMessage, StepwiseRun};
