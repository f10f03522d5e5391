//! The derivation state machine.
//!
//! `Pipeline` owns the derived state tuple and the reactive rules that advance
//! it. It performs no I/O: every transition returns the next [`StageRequest`]
//! (if any) and the caller is responsible for executing it and feeding the
//! [`StageCompletion`] back through [`Pipeline::apply`].
//!
//! Reactive rules are edge-triggered. Each committed transcript or chapter list
//! carries a fresh revision, and each rule remembers the last revision it acted
//! on, so re-evaluating with an unchanged value never re-issues a request.

use super::state::{
    Generation, PipelineSnapshot, Stage, StageCompletion, StageError, StageOutcome, StageRequest,
};
use crate::backend::{Flashcard, Transcript};
use crate::error::{Result, ZetaError};
use crate::video::{extract_video_id, VideoId};
use tracing::{debug, info, warn};

/// A value stamped with the revision at which it was committed.
#[derive(Debug, Clone)]
struct Versioned<T> {
    value: T,
    revision: u64,
}

/// Last revision each reactive rule has acted on.
#[derive(Debug, Clone, Default)]
struct SeenRevisions {
    transcript: Option<u64>,
    chapters: Option<u64>,
}

/// Pipeline state plus the transition functions that are its only writers.
#[derive(Debug, Default)]
pub struct Pipeline {
    generation: Generation,
    stage: Stage,
    reference: Option<String>,
    video_id: Option<VideoId>,
    transcript: Option<Versioned<Transcript>>,
    summary: String,
    chapters: Option<Versioned<Vec<String>>>,
    flashcards: Vec<Flashcard>,
    error: Option<StageError>,
    in_flight: Option<Stage>,
    next_revision: u64,
    seen: SeenRevisions,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Start a new chain for `reference`.
    ///
    /// An unrecognized reference is rejected before anything changes, so a
    /// running chain keeps running. Otherwise all derived state from earlier
    /// chains is discarded and the video stage is requested.
    pub fn submit(&mut self, reference: &str) -> Result<StageRequest> {
        let reference = reference.trim();
        let video_id = extract_video_id(reference).ok_or_else(|| {
            ZetaError::Validation(format!(
                "Please enter a valid YouTube URL (got {:?})",
                reference
            ))
        })?;

        self.generation += 1;
        self.reference = Some(reference.to_string());
        self.video_id = Some(video_id);
        self.transcript = None;
        self.summary.clear();
        self.chapters = None;
        self.flashcards.clear();
        self.error = None;
        self.stage = Stage::VideoSubmitted;
        self.in_flight = Some(Stage::VideoSubmitted);

        info!(
            "Chain {} started for video {}",
            self.generation,
            self.video_id.as_ref().map(VideoId::as_str).unwrap_or_default()
        );

        Ok(StageRequest::SubmitVideo {
            generation: self.generation,
            reference: reference.to_string(),
        })
    }

    /// Commit a stage result and run the reactive rules.
    ///
    /// Completions from a superseded generation, or for a stage that is not
    /// outstanding, are dropped without touching state.
    pub fn apply(&mut self, completion: StageCompletion) -> Option<StageRequest> {
        if completion.generation != self.generation {
            debug!(
                "Discarding {} result from chain {} (current chain is {})",
                completion.outcome.stage(),
                completion.generation,
                self.generation
            );
            return None;
        }

        if self.in_flight != Some(completion.outcome.stage()) {
            debug!(
                "Discarding unexpected {} result for chain {}",
                completion.outcome.stage(),
                completion.generation
            );
            return None;
        }
        self.in_flight = None;

        match completion.outcome {
            StageOutcome::Video(Ok(submission)) => {
                info!("Transcript ready ({} entries)", submission.transcript.len());
                self.transcript = Some(self.stamp(submission.transcript));
                self.summary = submission.summary;
                self.stage = Stage::TranscriptReady;
            }
            StageOutcome::Video(Err(e)) => self.fail(Stage::VideoSubmitted, e),
            StageOutcome::Chapters(Ok(chapters)) => {
                info!("Chapters ready ({})", chapters.len());
                self.chapters = Some(self.stamp(chapters));
                self.stage = Stage::ChaptersReady;
            }
            StageOutcome::Chapters(Err(e)) => self.fail(Stage::TranscriptReady, e),
            StageOutcome::Flashcards(Ok(flashcards)) => {
                info!("Flashcards ready ({})", flashcards.len());
                self.flashcards = flashcards;
                self.stage = Stage::FlashcardsReady;
            }
            StageOutcome::Flashcards(Err(e)) => self.fail(Stage::ChaptersReady, e),
        }

        self.poll_rules()
    }

    /// Evaluate the reactive rules against the current state.
    ///
    /// Fires at most once per upstream revision; calling it again with nothing
    /// changed returns `None`.
    pub fn poll_rules(&mut self) -> Option<StageRequest> {
        if let Some(transcript) = &self.transcript {
            if self.seen.transcript != Some(transcript.revision) {
                self.seen.transcript = Some(transcript.revision);
                if transcript.value.is_empty() {
                    info!("Transcript is empty, nothing to segment");
                } else {
                    self.in_flight = Some(Stage::TranscriptReady);
                    return Some(StageRequest::DeriveChapters {
                        generation: self.generation,
                        transcript: transcript.value.clone(),
                    });
                }
            }
        }

        if let Some(chapters) = &self.chapters {
            if self.seen.chapters != Some(chapters.revision) {
                self.seen.chapters = Some(chapters.revision);
                if chapters.value.is_empty() {
                    info!("No chapters derived, flashcards skipped");
                    self.stage = Stage::NoChapters;
                } else {
                    self.in_flight = Some(Stage::ChaptersReady);
                    return Some(StageRequest::DeriveFlashcards {
                        generation: self.generation,
                        chapters: chapters.value.clone(),
                    });
                }
            }
        }

        None
    }

    pub fn snapshot(&self) -> PipelineSnapshot {
        PipelineSnapshot {
            generation: self.generation,
            stage: self.stage,
            reference: self.reference.clone(),
            video_id: self.video_id.clone(),
            transcript: self.transcript.as_ref().map(|t| t.value.clone()),
            summary: self.summary.clone(),
            chapters: self
                .chapters
                .as_ref()
                .map(|c| c.value.clone())
                .unwrap_or_default(),
            flashcards: self.flashcards.clone(),
            error: self.error.clone(),
            in_flight: self.in_flight,
        }
    }

    fn stamp<T>(&mut self, value: T) -> Versioned<T> {
        self.next_revision += 1;
        Versioned {
            value,
            revision: self.next_revision,
        }
    }

    fn fail(&mut self, stage: Stage, error: ZetaError) {
        warn!("Chain {} halted at {}: {}", self.generation, stage, error);
        self.error = Some(StageError {
            stage,
            message: error.to_string(),
        });
    }
}
