//! The video → transcript → chapters → flashcards derivation pipeline.
//!
//! - `state` - stage, snapshot and request/completion types
//! - `machine` - the pure state machine with edge-triggered reactive rules
//! - `orchestrator` - the async single-writer driver

mod machine;
mod orchestrator;
mod state;

pub use machine::Pipeline;
pub use orchestrator::{execute, Orchestrator, OrchestratorHandle};
pub use state::{
    Generation, PipelineSnapshot, Stage, StageCompletion, StageError, StageOutcome, StageRequest,
};
