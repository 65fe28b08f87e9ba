//! # Pipeline Engine
//!
//! Deterministic sequencing of the six fixed stages over one run state:
//!
//! - `pipeline` - the stage order state machine
//! - `state` - the run state threaded stage to stage
//! - `runner` - the engine and its stepwise execution contract

pub mod pipeline;
pub mod runner;
pub mod state;

pub use pipeline::{Stage, STAGE_ORDER};
pub use runner::{Engine, StepwiseRun};
pub use state::{RunState, StageMessage};
