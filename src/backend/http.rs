//! HTTP implementation of the stage clients.

use super::models::{
    ChatRequest, ChatResponse, ChaptersResponse, ErrorResponse, FlashcardsResponse,
    GenerateFlashcardsRequest, HealthResponse, SubmitTranscriptionRequest, SubmitVideoRequest,
    SubmitVideoResponse,
};
use super::{Backend, Flashcard, RemoteResult, TranscriptEntry, VideoSubmission};
use crate::config::Settings;
use crate::error::{Endpoint, RemoteError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Resolved endpoint URLs.
#[derive(Debug, Clone)]
struct Endpoints {
    submit_video: Url,
    submit_transcription: Url,
    generate_flashcards: Url,
    chat: Url,
    health: Url,
}

impl Endpoints {
    fn url(&self, endpoint: Endpoint) -> &Url {
        match endpoint {
            Endpoint::SubmitVideo => &self.submit_video,
            Endpoint::SubmitTranscription => &self.submit_transcription,
            Endpoint::GenerateFlashcards => &self.generate_flashcards,
            Endpoint::Chat => &self.chat,
            Endpoint::Health => &self.health,
        }
    }
}

/// Backend client speaking JSON over HTTP.
pub struct HttpBackend {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpBackend {
    /// Create a client from the backend section of the settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let backend = &settings.backend;
        let endpoints = Endpoints {
            submit_video: settings.endpoint_url(&backend.submit_video)?,
            submit_transcription: settings.endpoint_url(&backend.submit_transcription)?,
            generate_flashcards: settings.endpoint_url(&backend.generate_flashcards)?,
            chat: settings.endpoint_url(&backend.chat)?,
            health: settings.endpoint_url(&backend.health)?,
        };

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(backend.connect_timeout_secs))
            .build()?;

        Ok(Self { client, endpoints })
    }

    /// URL probed by the health check.
    pub fn health_url(&self) -> &str {
        self.endpoints.health.as_str()
    }

    async fn post_json<B, R>(&self, endpoint: Endpoint, body: &B) -> RemoteResult<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoints.url(endpoint);
        debug!("POST {}", url);

        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| transport(endpoint, e))?;

        decode(endpoint, response).await
    }
}

#[async_trait]
impl Backend for HttpBackend {
    #[instrument(skip(self))]
    async fn submit_video(&self, video_reference: &str) -> RemoteResult<VideoSubmission> {
        let response: SubmitVideoResponse = self
            .post_json(
                Endpoint::SubmitVideo,
                &SubmitVideoRequest {
                    video_url: video_reference,
                },
            )
            .await?;

        if let Some(message) = &response.message {
            debug!("Server response: {}", message);
        }

        Ok(VideoSubmission {
            message: response.message,
            transcript: response.transcription,
            summary: response.summary,
        })
    }

    #[instrument(skip(self, transcript), fields(entries = transcript.len()))]
    async fn derive_chapters(&self, transcript: &[TranscriptEntry]) -> RemoteResult<Vec<String>> {
        let response: ChaptersResponse = self
            .post_json(
                Endpoint::SubmitTranscription,
                &SubmitTranscriptionRequest {
                    transcription: transcript,
                },
            )
            .await?;
        Ok(response.chapters)
    }

    #[instrument(skip(self, chapters), fields(chapters = chapters.len()))]
    async fn derive_flashcards(&self, chapters: &[String]) -> RemoteResult<Vec<Flashcard>> {
        let response: FlashcardsResponse = self
            .post_json(
                Endpoint::GenerateFlashcards,
                &GenerateFlashcardsRequest { chapters },
            )
            .await?;
        Ok(response.flashcards)
    }

    #[instrument(skip(self, query))]
    async fn send_chat_message(&self, query: &str) -> RemoteResult<String> {
        let response: ChatResponse = self
            .post_json(Endpoint::Chat, &ChatRequest { query })
            .await?;
        Ok(response.response)
    }

    #[instrument(skip(self))]
    async fn health(&self) -> RemoteResult<String> {
        let response = self
            .client
            .get(self.endpoints.health.clone())
            .send()
            .await
            .map_err(|e| transport(Endpoint::Health, e))?;

        let health: HealthResponse = decode(Endpoint::Health, response).await?;
        Ok(health.message)
    }
}

fn transport(endpoint: Endpoint, error: reqwest::Error) -> RemoteError {
    RemoteError::Transport {
        endpoint,
        message: error.to_string(),
    }
}

/// Turn an HTTP response into the expected payload or a `RemoteError`.
///
/// Non-2xx bodies of the form `{"error": "..."}` surface that text; anything
/// else falls back to the status line.
async fn decode<R: DeserializeOwned>(endpoint: Endpoint, response: reqwest::Response) -> RemoteResult<R> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(|e| transport(endpoint, e))?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorResponse>(&bytes)
            .map(|e| e.error)
            .unwrap_or_else(|_| status.to_string());
        return Err(RemoteError::Rejected {
            endpoint,
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&bytes).map_err(|e| RemoteError::Transport {
        endpoint,
        message: format!("Invalid response body: {}", e),
    })
}
