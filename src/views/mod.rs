//! Presentation projections.
//!
//! Stateless text renderers over slices of a [`PipelineSnapshot`]. The only
//! state kept here is local to the flashcard viewer (current card, flipped).

mod flashcards;

pub use flashcards::FlashcardViewer;

use crate::backend::TranscriptEntry;
use crate::pipeline::{PipelineSnapshot, Stage};

/// Video surface: which video is loaded and where to watch it.
pub fn video(snapshot: &PipelineSnapshot) -> String {
    match &snapshot.video_id {
        Some(id) => format!(
            "Video {}\n  watch: {}\n  embed: {}",
            id,
            id.watch_url(),
            id.embed_url()
        ),
        None => "No video loaded.".to_string(),
    }
}

/// Chapter tab: numbered chapter summaries.
pub fn chapters(chapters: &[String]) -> String {
    if chapters.is_empty() {
        return "No chapters available.".to_string();
    }

    chapters
        .iter()
        .enumerate()
        .map(|(i, chapter)| format!("Chapter {}\n{}", i + 1, chapter))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Transcript tab: one `timestamp: text` line per entry.
pub fn transcript(transcript: Option<&[TranscriptEntry]>) -> String {
    match transcript {
        Some(entries) if !entries.is_empty() => entries
            .iter()
            .map(|e| format!("{}: {}", e.timestamp, e.text))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => "No transcript available.".to_string(),
    }
}

pub fn summary(summary: &str) -> String {
    if summary.trim().is_empty() {
        "Summary will be displayed here once generated.".to_string()
    } else {
        summary.trim().to_string()
    }
}

/// One-line description of where the chain stands.
pub fn status(snapshot: &PipelineSnapshot) -> String {
    let progress = match (snapshot.stage, snapshot.in_flight) {
        (Stage::Idle, _) => "Waiting for a video".to_string(),
        (_, Some(Stage::VideoSubmitted)) => "Transcribing video...".to_string(),
        (_, Some(Stage::TranscriptReady)) => "Transcript ready, deriving chapters...".to_string(),
        (_, Some(Stage::ChaptersReady)) => {
            format!("{} chapters ready, generating flashcards...", snapshot.chapters.len())
        }
        (Stage::NoChapters, None) => "Done: no chapters were derived".to_string(),
        (Stage::FlashcardsReady, None) => {
            format!("Done: {} flashcards", snapshot.flashcards.len())
        }
        (stage, _) => format!("Stopped ({})", stage),
    };

    match &snapshot.error {
        Some(error) => format!("[chain {}] {} - error {}", snapshot.generation, progress, error),
        None => format!("[chain {}] {}", snapshot.generation, progress),
    }
}
