//! Remote stage clients.
//!
//! Each backend capability is a single request/response call with no retained
//! state. The [`Backend`] trait is the seam the orchestrator and chat session
//! consume; [`HttpBackend`] talks JSON over HTTP.

mod http;
mod models;

pub use http::HttpBackend;
pub use models::{Flashcard, Transcript, TranscriptEntry, VideoSubmission};

use crate::error::RemoteError;
use async_trait::async_trait;

/// Result of a single remote call.
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

/// The remote capabilities the client consumes.
///
/// Implementations make exactly one attempt per call: no retry, no timeout.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Stage 1: download and transcribe the referenced video, and summarize it.
    async fn submit_video(&self, video_reference: &str) -> RemoteResult<VideoSubmission>;

    /// Stage 2: segment a transcript into chapter summaries.
    async fn derive_chapters(&self, transcript: &[TranscriptEntry]) -> RemoteResult<Vec<String>>;

    /// Stage 3: turn chapters into flashcards.
    async fn derive_flashcards(&self, chapters: &[String]) -> RemoteResult<Vec<Flashcard>>;

    /// Ask the conversational assistant a free-form question.
    async fn send_chat_message(&self, query: &str) -> RemoteResult<String>;

    /// Check that the backend is up. Returns its status message.
    async fn health(&self) -> RemoteResult<String>;
}
