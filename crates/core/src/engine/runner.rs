//! # Pipeline Engine
//!
//! Drives one run state through the fixed stage order. The engine
//! performs no I/O itself; stages delegate to the collaborators it was
//! constructed with. Which collaborators are present is an explicit
//! construction-time decision: discovery and collection are required,
//! rendering and reasoning are optional.
//!
//! `run_to_completion` is implemented by draining the stepwise run, so
//! both entry points share one halting rule: the first fatal stage error
//! ends the run, later stages never execute, and fields written by
//! earlier stages are kept for diagnostics.

use std::sync::Arc;

use super::state::RunState;
use crate::collab::{
    CollectionCollaborator, DiscoveryCollaborator, ReasoningCollaborator, RenderingCollaborator,
};
use crate::config::EngineConfig;
use crate::stages::{
    AnalysisStage, CollectionStage, DiscoveryStage, IntakeStage, PlanningStage, StageHandler,
    SynthesisStage,
};

/// The pipeline engine
pub struct Engine {
    config: EngineConfig,
    discovery: Arc<dyn DiscoveryCollaborator>,
    collection: Arc<dyn CollectionCollaborator>,
    renderer: Option<Arc<dyn RenderingCollaborator>>,
    reasoning: Option<Arc<dyn ReasoningCollaborator>>,
}

impl Engine {
    /// Create an engine with the required collaborators
    pub fn new(
        config: EngineConfig,
        discovery: Arc<dyn DiscoveryCollaborator>,
        collection: Arc<dyn CollectionCollaborator>,
    ) -> Self {
        Self {
            config,
            discovery,
            collection,
            renderer: None,
            reasoning: None,
        }
    }

    /// Attach a rendering collaborator; without one, runs produce no
    /// artifacts.
    pub fn with_renderer(mut self, renderer: Arc<dyn RenderingCollaborator>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Attach a reasoning collaborator; without one, stages log
    /// state-only narratives.
    pub fn with_reasoning(mut self, reasoning: Arc<dyn ReasoningCollaborator>) -> Self {
        self.reasoning = Some(reasoning);
        self
    }

    /// Build the ordered handler list for one run
    fn handlers(&self) -> Vec<Box<dyn StageHandler>> {
        vec![
            Box::new(IntakeStage::new(self.reasoning.clone())),
            Box::new(PlanningStage::new(self.reasoning.clone())),
            Box::new(DiscoveryStage::new(
                Arc::clone(&self.discovery),
                self.reasoning.clone(),
            )),
            Box::new(CollectionStage::new(
                Arc::clone(&self.collection),
                self.reasoning.clone(),
            )),
            Box::new(AnalysisStage::new(
                self.renderer.clone(),
                self.reasoning.clone(),
            )),
            Box::new(SynthesisStage::new(
                self.config.max_report_records,
                self.reasoning.clone(),
            )),
        ]
    }

    /// Run the whole pipeline and return the final state. Callers must
    /// check `error` before trusting `report`.
    #[tracing::instrument(skip(self), fields(task_preview = %task.chars().take(50).collect::<String>()))]
    pub async fn run_to_completion(&self, task: &str) -> RunState {
        let mut run = self.run_stepwise(task);
        while run.next_stage().await.is_some() {}
        run.into_state()
    }

    /// Start a lazy, finite, non-restartable stepwise run. Each call to
    /// [`StepwiseRun::next_stage`] executes exactly one stage; the caller
    /// cancels by simply not calling again.
    pub fn run_stepwise(&self, task: &str) -> StepwiseRun {
        StepwiseRun {
            handlers: self.handlers(),
            state: RunState::new(task),
            next: 0,
        }
    }
}

/// An in-progress stepwise run. Owns its state and handlers, so it
/// outlives the borrow of the engine that created it.
pub struct StepwiseRun {
    handlers: Vec<Box<dyn StageHandler>>,
    state: RunState,
    next: usize,
}

impl StepwiseRun {
    /// Execute the next stage and return a snapshot of the state after
    /// it completed. `None` once the run has finished or halted; a stage
    /// already started always runs to completion.
    pub async fn next_stage(&mut self) -> Option<RunState> {
        if self.state.is_halted() || self.next >= self.handlers.len() {
            return None;
        }
        let handler = &self.handlers[self.next];
        self.next += 1;

        let stage = handler.stage();
        self.state.current_stage = stage;
        tracing::debug!(stage = stage.agent(), "running stage");

        match handler.run(&mut self.state).await {
            Ok(()) => self.state.advance(),
            Err(e) => {
                tracing::error!(stage = stage.agent(), "stage failed: {e}");
                self.state.fail(stage.agent(), e.to_string());
            }
        }

        Some(self.state.clone())
    }

    /// The state as of the last completed stage
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Consume the run and return the state
    pub fn into_state(self) -> RunState {
        self.state
    }
}
