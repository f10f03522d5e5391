//! Error types for Zeta.

use thiserror::Error;

/// Backend capability an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    SubmitVideo,
    SubmitTranscription,
    GenerateFlashcards,
    Chat,
    Health,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::SubmitVideo => write!(f, "submit-video"),
            Endpoint::SubmitTranscription => write!(f, "submit-transcription"),
            Endpoint::GenerateFlashcards => write!(f, "generate-flashcards"),
            Endpoint::Chat => write!(f, "chat"),
            Endpoint::Health => write!(f, "health"),
        }
    }
}

/// Failure of a single remote call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The backend answered with a non-success status.
    #[error("{endpoint} failed: {message}")]
    Rejected {
        endpoint: Endpoint,
        status: u16,
        message: String,
    },

    /// No usable answer: connection failure, undecodable body, timeout.
    #[error("{endpoint} unreachable: {message}")]
    Transport { endpoint: Endpoint, message: String },
}

impl RemoteError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            RemoteError::Rejected { endpoint, .. } | RemoteError::Transport { endpoint, .. } => {
                *endpoint
            }
        }
    }

    /// The human-readable message without the endpoint prefix.
    pub fn message(&self) -> &str {
        match self {
            RemoteError::Rejected { message, .. } | RemoteError::Transport { message, .. } => {
                message
            }
        }
    }
}

/// Library-level error type for Zeta operations.
#[derive(Error, Debug)]
pub enum ZetaError {
    #[error("Invalid video reference: {0}")]
    Validation(String),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("Stage timed out after {0} seconds")]
    StageTimeout(u64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Pipeline orchestrator has shut down")]
    OrchestratorClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Zeta operations.
pub type Result<T> = std::result::Result<T, ZetaError>;
