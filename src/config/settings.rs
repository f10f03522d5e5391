//! Configuration settings for Zeta.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub backend: BackendSettings,
    pub pipeline: PipelineSettings,
    pub chat: ChatSettings,
}


/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Directory where exported study packs land when given a bare file name.
    pub export_dir: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            export_dir: "~/zeta".to_string(),
        }
    }
}

/// Remote backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Base URL of the backend service.
    pub base_url: String,
    /// Path of the video submission endpoint.
    pub submit_video: String,
    /// Path of the chapter derivation endpoint.
    pub submit_transcription: String,
    /// Path of the flashcard generation endpoint.
    pub generate_flashcards: String,
    /// Path of the chat endpoint.
    pub chat: String,
    /// Path probed by `zeta doctor`.
    pub health: String,
    /// Connection establishment timeout. Requests themselves are not timed out here.
    pub connect_timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            submit_video: "/submit-video".to_string(),
            submit_transcription: "/submit-transcription".to_string(),
            generate_flashcards: "/generate-flashcards".to_string(),
            chat: "/chat".to_string(),
            health: "/".to_string(),
            connect_timeout_secs: 10,
        }
    }
}

/// Pipeline orchestration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PipelineSettings {
    /// Upper bound on a single stage call. None = wait as long as the backend takes.
    pub stage_timeout_secs: Option<u64>,
}


/// Chat sub-session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    /// Greeting printed when a chat session opens.
    pub welcome: String,
    /// Bot message used when the chat backend cannot be reached.
    pub error_fallback: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            welcome: "Welcome to the chat!".to_string(),
            error_fallback: "An error occurred. Please try again later.".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::ZetaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("zeta")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded export directory path.
    pub fn export_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.export_dir)
    }

    /// Resolve an endpoint path against the configured base URL.
    pub fn endpoint_url(&self, path: &str) -> crate::error::Result<Url> {
        let base = Url::parse(&self.backend.base_url)?;
        Ok(base.join(path)?)
    }
}
