//! Wire and domain types shared by the stage clients.

use serde::{Deserialize, Serialize};

/// One timestamped line of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Start time as rendered by the backend (e.g. "1:05").
    pub timestamp: String,
    /// Spoken text.
    pub text: String,
}

impl TranscriptEntry {
    pub fn new(timestamp: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            text: text.into(),
        }
    }
}

/// Ordered transcript of a video.
pub type Transcript = Vec<TranscriptEntry>;

/// A question/answer study card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    #[serde(rename = "Question")]
    pub question: String,
    #[serde(rename = "Answer")]
    pub answer: String,
}

impl Flashcard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Result of the video submission stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSubmission {
    /// Informational status line from the backend.
    pub message: Option<String>,
    pub transcript: Transcript,
    pub summary: String,
}

// === Request/Response Types ===

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitVideoRequest<'a> {
    pub video_url: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitVideoResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub transcription: Transcript,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmitTranscriptionRequest<'a> {
    pub transcription: &'a [TranscriptEntry],
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChaptersResponse {
    #[serde(default)]
    pub chapters: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateFlashcardsRequest<'a> {
    pub chapters: &'a [String],
}

#[derive(Debug, Deserialize)]
pub(crate) struct FlashcardsResponse {
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub query: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HealthResponse {
    #[serde(default)]
    pub message: String,
}

/// Failure body shared by every endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: String,
}
