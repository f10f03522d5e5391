//! Shared test doubles.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use zeta::backend::{Backend, Flashcard, RemoteResult, TranscriptEntry, VideoSubmission};
use zeta::error::{Endpoint, RemoteError};

pub const URL_A: &str = "https://youtu.be/dQw4w9WgXcQ";
pub const URL_B: &str = "https://www.youtube.com/watch?v=9bZkp7q5F5E";

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SubmitVideo(String),
    DeriveChapters(Vec<TranscriptEntry>),
    DeriveFlashcards(Vec<String>),
    Chat(String),
}

/// In-memory backend whose answers are derived from its inputs.
///
/// - submit_video(url) answers a single transcript line `"transcript of <url>"`
/// - derive_chapters answers one chapter per transcript line, `"chapter: <text>"`
/// - derive_flashcards answers one card per chapter, `Q: <chapter>` / `A: answer`
/// - chat answers `"echo: <query>"`
#[derive(Default)]
pub struct ScriptedBackend {
    calls: Mutex<Vec<Call>>,
    failures: Mutex<HashMap<Endpoint, RemoteError>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    finished_videos: Mutex<HashSet<String>>,
    empty_chapters: Mutex<bool>,
    empty_transcript: Mutex<bool>,
}

impl ScriptedBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every call to `endpoint` fail with `error`.
    pub fn fail(&self, endpoint: Endpoint, error: RemoteError) {
        self.failures.lock().unwrap().insert(endpoint, error);
    }

    pub fn reject(&self, endpoint: Endpoint, message: &str) {
        self.fail(
            endpoint,
            RemoteError::Rejected {
                endpoint,
                status: 500,
                message: message.to_string(),
            },
        );
    }

    pub fn unreachable(&self, endpoint: Endpoint) {
        self.fail(
            endpoint,
            RemoteError::Transport {
                endpoint,
                message: "connection refused".to_string(),
            },
        );
    }

    pub fn answer_no_chapters(&self) {
        *self.empty_chapters.lock().unwrap() = true;
    }

    pub fn answer_empty_transcript(&self) {
        *self.empty_transcript.lock().unwrap() = true;
    }

    /// Hold submit_video for `url` until the returned gate is notified.
    pub fn gate(&self, url: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(url.to_string(), Arc::clone(&gate));
        gate
    }

    /// True once submit_video for `url` has returned.
    pub fn video_finished(&self, url: &str) -> bool {
        self.finished_videos.lock().unwrap().contains(url)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| matches(call)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn failure(&self, endpoint: Endpoint) -> Option<RemoteError> {
        self.failures.lock().unwrap().get(&endpoint).cloned()
    }
}

pub fn transcript_for(url: &str) -> Vec<TranscriptEntry> {
    vec![TranscriptEntry::new("0:00", format!("transcript of {}", url))]
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn submit_video(&self, video_reference: &str) -> RemoteResult<VideoSubmission> {
        self.record(Call::SubmitVideo(video_reference.to_string()));

        let gate = self.gates.lock().unwrap().get(video_reference).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let result = match self.failure(Endpoint::SubmitVideo) {
            Some(error) => Err(error),
            None => {
                let transcript = if *self.empty_transcript.lock().unwrap() {
                    Vec::new()
                } else {
                    transcript_for(video_reference)
                };
                Ok(VideoSubmission {
                    message: Some("Video processed successfully".to_string()),
                    transcript,
                    summary: format!("summary of {}", video_reference),
                })
            }
        };

        self.finished_videos
            .lock()
            .unwrap()
            .insert(video_reference.to_string());
        result
    }

    async fn derive_chapters(&self, transcript: &[TranscriptEntry]) -> RemoteResult<Vec<String>> {
        self.record(Call::DeriveChapters(transcript.to_vec()));

        if let Some(error) = self.failure(Endpoint::SubmitTranscription) {
            return Err(error);
        }
        if *self.empty_chapters.lock().unwrap() {
            return Ok(Vec::new());
        }

        Ok(transcript
            .iter()
            .map(|entry| format!("chapter: {}", entry.text))
            .collect())
    }

    async fn derive_flashcards(&self, chapters: &[String]) -> RemoteResult<Vec<Flashcard>> {
        self.record(Call::DeriveFlashcards(chapters.to_vec()));

        if let Some(error) = self.failure(Endpoint::GenerateFlashcards) {
            return Err(error);
        }

        Ok(chapters
            .iter()
            .map(|chapter| Flashcard::new(format!("Q: {}", chapter), "A: answer"))
            .collect())
    }

    async fn send_chat_message(&self, query: &str) -> RemoteResult<String> {
        self.record(Call::Chat(query.to_string()));

        match self.failure(Endpoint::Chat) {
            Some(error) => Err(error),
            None => Ok(format!("echo: {}", query)),
        }
    }

    async fn health(&self) -> RemoteResult<String> {
        Ok("The site is running!".to_string())
    }
}
