//! Video references and identifier extraction.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use regex::Regex;

/// Recognizes the common YouTube URL shapes and captures the 11-character video token.
///
/// Accepted: `youtube.com/watch?v=ID` (with `v` anywhere in the query),
/// `youtube.com/embed/ID`, `youtube.com/e/ID`, `youtube.com/v/ID`,
/// `youtube.com/<segment>/<segment>/ID` and `youtu.be/ID`.
static VIDEO_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?x)
        (?:
            youtube\.com/
            (?:
                [^/\n\s]+/\S+/          # /user/name/ID and similar
                | (?:v|e(?:mbed)?)/     # /v/ID, /e/ID, /embed/ID
                | (?:v=|\S*?[?&]v=)     # watch?v=ID, ?feature=x&v=ID
            )
            | youtu\.be/
        )
        ([^"&?/\s]{11})
    "#,
    )
    .expect("Invalid regex")
});

/// Canonical 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch page for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }

    /// Embeddable player URL with autoplay enabled.
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}?autoplay=1", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the video identifier from a user-entered reference.
///
/// Returns `None` when the reference matches none of the recognized URL shapes.
/// Bare identifiers are not accepted.
pub fn extract_video_id(reference: &str) -> Option<VideoId> {
    VIDEO_ID_REGEX
        .captures(reference.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| VideoId(m.as_str().to_string()))
}
