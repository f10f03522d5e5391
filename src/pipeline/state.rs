//! Pipeline state types and the immutable snapshot handed to projections.

use crate::backend::{Flashcard, Transcript, VideoSubmission};
use crate::error::Result;
use crate::video::VideoId;
use serde::Serialize;

/// Chain token assigned to each accepted submission.
pub type Generation = u64;

/// Position of the pipeline in the derivation chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Idle,
    VideoSubmitted,
    TranscriptReady,
    ChaptersReady,
    /// Chapter derivation succeeded with no chapters; the chain ends here.
    NoChapters,
    FlashcardsReady,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Idle => write!(f, "idle"),
            Stage::VideoSubmitted => write!(f, "video submitted"),
            Stage::TranscriptReady => write!(f, "transcript ready"),
            Stage::ChaptersReady => write!(f, "chapters ready"),
            Stage::NoChapters => write!(f, "no chapters"),
            Stage::FlashcardsReady => write!(f, "flashcards ready"),
        }
    }
}

/// Failure attached to the stage at which the chain halted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageError {
    pub stage: Stage,
    pub message: String,
}

impl std::fmt::Display for StageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "halted at {}: {}", self.stage, self.message)
    }
}

/// Work the driver must perform on behalf of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageRequest {
    SubmitVideo {
        generation: Generation,
        reference: String,
    },
    DeriveChapters {
        generation: Generation,
        transcript: Transcript,
    },
    DeriveFlashcards {
        generation: Generation,
        chapters: Vec<String>,
    },
}

impl StageRequest {
    pub fn generation(&self) -> Generation {
        match self {
            StageRequest::SubmitVideo { generation, .. }
            | StageRequest::DeriveChapters { generation, .. }
            | StageRequest::DeriveFlashcards { generation, .. } => *generation,
        }
    }

    /// Stage the pipeline is in while this request is outstanding.
    pub fn stage(&self) -> Stage {
        match self {
            StageRequest::SubmitVideo { .. } => Stage::VideoSubmitted,
            StageRequest::DeriveChapters { .. } => Stage::TranscriptReady,
            StageRequest::DeriveFlashcards { .. } => Stage::ChaptersReady,
        }
    }
}

/// Result of a stage call.
#[derive(Debug)]
pub enum StageOutcome {
    Video(Result<VideoSubmission>),
    Chapters(Result<Vec<String>>),
    Flashcards(Result<Vec<Flashcard>>),
}

impl StageOutcome {
    /// Stage whose request produced this outcome.
    pub fn stage(&self) -> Stage {
        match self {
            StageOutcome::Video(_) => Stage::VideoSubmitted,
            StageOutcome::Chapters(_) => Stage::TranscriptReady,
            StageOutcome::Flashcards(_) => Stage::ChaptersReady,
        }
    }
}

/// A stage result tagged with the generation that requested it.
#[derive(Debug)]
pub struct StageCompletion {
    pub generation: Generation,
    pub outcome: StageOutcome,
}

/// Read-only view of the pipeline at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineSnapshot {
    pub generation: Generation,
    pub stage: Stage,
    /// The reference as submitted, trimmed.
    pub reference: Option<String>,
    pub video_id: Option<VideoId>,
    /// None until the transcript stage has succeeded.
    pub transcript: Option<Transcript>,
    pub summary: String,
    pub chapters: Vec<String>,
    pub flashcards: Vec<Flashcard>,
    pub error: Option<StageError>,
    /// Stage whose remote call is outstanding, if any.
    pub in_flight: Option<Stage>,
}

impl PipelineSnapshot {
    /// True when no stage call is outstanding for the current generation.
    pub fn is_settled(&self) -> bool {
        self.in_flight.is_none()
    }
}
