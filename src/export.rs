//! Study pack export (JSON, Markdown).

use crate::backend::{Flashcard, TranscriptEntry};
use crate::error::Result;
use crate::pipeline::PipelineSnapshot;
use serde::Serialize;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(format!("Unknown format: {}. Use json or markdown.", s)),
        }
    }
}

/// Everything a finished chain produced, in exportable form.
#[derive(Debug, Serialize)]
pub struct StudyPack {
    pub video_id: String,
    pub watch_url: String,
    pub summary: String,
    pub transcript: Vec<TranscriptEntry>,
    pub chapters: Vec<String>,
    pub flashcards: Vec<Flashcard>,
}

impl StudyPack {
    /// Build a pack from a snapshot. None if no video was ever accepted.
    pub fn from_snapshot(snapshot: &PipelineSnapshot) -> Option<Self> {
        let video_id = snapshot.video_id.as_ref()?;
        Some(Self {
            video_id: video_id.to_string(),
            watch_url: video_id.watch_url(),
            summary: snapshot.summary.clone(),
            transcript: snapshot.transcript.clone().unwrap_or_default(),
            chapters: snapshot.chapters.clone(),
            flashcards: snapshot.flashcards.clone(),
        })
    }
}

/// Format a study pack for output.
pub fn format_study_pack(pack: &StudyPack, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(pack)?),
        ExportFormat::Markdown => Ok(format_markdown(pack)),
    }
}

fn format_markdown(pack: &StudyPack) -> String {
    let mut output = format!("# {}\n\n<{}>\n\n", pack.video_id, pack.watch_url);

    if !pack.summary.trim().is_empty() {
        output.push_str("## Summary\n\n");
        output.push_str(pack.summary.trim());
        output.push_str("\n\n");
    }

    if !pack.chapters.is_empty() {
        output.push_str("## Chapters\n\n");
        for (i, chapter) in pack.chapters.iter().enumerate() {
            output.push_str(&format!("### Chapter {}\n\n{}\n\n", i + 1, chapter));
        }
    }

    if !pack.flashcards.is_empty() {
        output.push_str("## Flashcards\n\n");
        for card in &pack.flashcards {
            output.push_str(&format!("- **Q:** {}\n  **A:** {}\n", card.question, card.answer));
        }
        output.push('\n');
    }

    if !pack.transcript.is_empty() {
        output.push_str("## Transcript\n\n");
        for entry in &pack.transcript {
            output.push_str(&format!("- {}: {}\n", entry.timestamp, entry.text));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::extract_video_id;

    fn sample_snapshot() -> PipelineSnapshot {
        PipelineSnapshot {
            video_id: extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            transcript: Some(vec![TranscriptEntry::new("0:00", "Never gonna give you up")]),
            summary: "A song.".to_string(),
            chapters: vec!["The promise".to_string()],
            flashcards: vec![Flashcard::new("What is promised?", "Never to give you up")],
            ..Default::default()
        }
    }

    #[test]
    fn test_no_video_no_pack() {
        assert!(StudyPack::from_snapshot(&PipelineSnapshot::default()).is_none());
    }

    #[test]
    fn test_format_json() {
        let pack = StudyPack::from_snapshot(&sample_snapshot()).unwrap();
        let json = format_study_pack(&pack, ExportFormat::Json).unwrap();
        assert!(json.contains("\"video_id\": \"dQw4w9WgXcQ\""));
        assert!(json.contains("\"Question\": \"What is promised?\""));
        assert!(json.contains("\"timestamp\": \"0:00\""));
    }

    #[test]
    fn test_format_markdown() {
        let pack = StudyPack::from_snapshot(&sample_snapshot()).unwrap();
        let md = format_study_pack(&pack, ExportFormat::Markdown).unwrap();
        assert!(md.starts_with("# dQw4w9WgXcQ\n"));
        assert!(md.contains("## Summary\n\nA song."));
        assert!(md.contains("### Chapter 1\n\nThe promise"));
        assert!(md.contains("- **Q:** What is promised?\n  **A:** Never to give you up"));
        assert!(md.contains("- 0:00: Never gonna give you up"));
    }

    #[test]
    fn test_markdown_skips_empty_sections() {
        let snapshot = PipelineSnapshot {
            video_id: extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            ..Default::default()
        };
        let pack = StudyPack::from_snapshot(&snapshot).unwrap();
        let md = format_study_pack(&pack, ExportFormat::Markdown).unwrap();
        assert!(!md.contains("## Chapters"));
        assert!(!md.contains("## Flashcards"));
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("MD".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert!("srt".parse::<ExportFormat>().is_err());
    }
}
