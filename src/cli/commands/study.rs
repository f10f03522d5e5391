//! Study command implementation.

use crate::backend::{Flashcard, HttpBackend};
use crate::cli::Output;
use crate::config::Settings;
use crate::export::{format_study_pack, ExportFormat, StudyPack};
use crate::pipeline::{Orchestrator, PipelineSnapshot, Stage};
use crate::views::{self, FlashcardViewer};
use anyhow::Result;
use std::path::PathBuf;

/// Run the study command.
pub async fn run_study(
    url: &str,
    output: Option<String>,
    format: &str,
    settings: Settings,
) -> Result<()> {
    let export_format: ExportFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let backend = HttpBackend::from_settings(&settings)?;

    Output::info(&format!("Processing: {}", url));

    let spinner = Output::spinner("Submitting video...");
    let result = Orchestrator::run_to_completion(&backend, &settings.pipeline, url, |snapshot| {
        spinner.set_message(views::status(snapshot));
    })
    .await;
    spinner.finish_and_clear();

    let snapshot = match result {
        Ok(snapshot) => snapshot,
        Err(e) => {
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    };

    if let Some(error) = &snapshot.error {
        Output::error(&format!("Error: {}", error.message));
    }

    match output {
        Some(path) => write_pack(&snapshot, &path, export_format, &settings)?,
        None => print_results(&snapshot),
    }

    if snapshot.error.is_some() {
        anyhow::bail!("pipeline halted before completion");
    }

    Ok(())
}

fn print_results(snapshot: &PipelineSnapshot) {
    Output::section("Video", &views::video(snapshot));
    Output::section("Summary", &views::summary(&snapshot.summary));
    Output::section("Chapters", &views::chapters(&snapshot.chapters));
    Output::section("Transcript", &views::transcript(snapshot.transcript.as_deref()));

    Output::section("Flashcards", &format_deck(&snapshot.flashcards));

    match snapshot.stage {
        Stage::FlashcardsReady => Output::success(&format!(
            "Generated {} flashcards from {} chapters",
            snapshot.flashcards.len(),
            snapshot.chapters.len()
        )),
        Stage::NoChapters => Output::warning("The backend found no chapters, so no flashcards were generated."),
        _ => {}
    }
}

/// Both sides of every card; study mode has nothing to flip.
fn format_deck(cards: &[Flashcard]) -> String {
    if cards.is_empty() {
        return FlashcardViewer::new().render(cards);
    }

    cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            format!(
                "Card {}/{}\nQ: {}\nA: {}",
                i + 1,
                cards.len(),
                card.question,
                card.answer
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn write_pack(
    snapshot: &PipelineSnapshot,
    path: &str,
    format: ExportFormat,
    settings: &Settings,
) -> Result<()> {
    let pack = StudyPack::from_snapshot(snapshot)
        .ok_or_else(|| anyhow::anyhow!("no video was loaded, nothing to export"))?;
    let rendered = format_study_pack(&pack, format)?;

    if path == "-" {
        println!("{}", rendered);
        return Ok(());
    }

    let target = resolve_export_path(path, settings);
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&target, &rendered)?;

    Output::success(&format!(
        "Study pack saved to {} ({} chapters, {} flashcards)",
        target.display(),
        pack.chapters.len(),
        pack.flashcards.len()
    ));
    Ok(())
}

/// Bare file names land in the configured export directory; anything with a
/// directory component is used as given (after `~` expansion).
fn resolve_export_path(path: &str, settings: &Settings) -> PathBuf {
    let expanded = Settings::expand_path(path);
    let is_bare = expanded
        .parent()
        .is_some_and(|parent| parent.as_os_str().is_empty());

    if is_bare {
        settings.export_dir().join(expanded)
    } else {
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_name_goes_to_export_dir() {
        let mut settings = Settings::default();
        settings.general.export_dir = "/tmp/zeta-packs".to_string();
        assert_eq!(
            resolve_export_path("pack.json", &settings),
            PathBuf::from("/tmp/zeta-packs/pack.json")
        );
        assert_eq!(
            resolve_export_path("./pack.json", &settings),
            PathBuf::from("./pack.json")
        );
        assert_eq!(
            resolve_export_path("/srv/out/pack.md", &settings),
            PathBuf::from("/srv/out/pack.md")
        );
    }

    #[test]
    fn test_deck_shows_both_sides_verbatim() {
        let cards = vec![
            Flashcard::new("What is a wildcard?", "Card that matches anything"),
            Flashcard::new("Second?", "Yes"),
        ];
        assert_eq!(
            format_deck(&cards),
            "Card 1/2\nQ: What is a wildcard?\nA: Card that matches anything\n\n\
             Card 2/2\nQ: Second?\nA: Yes"
        );
        assert_eq!(format_deck(&[]), "No flashcards available.");
    }

    #[test]
    fn test_write_pack_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out").join("pack.json");

        let snapshot = PipelineSnapshot {
            video_id: crate::video::extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            chapters: vec!["Only chapter".to_string()],
            ..Default::default()
        };

        write_pack(
            &snapshot,
            target.to_str().unwrap(),
            ExportFormat::Json,
            &Settings::default(),
        )
        .unwrap();

        let written = std::fs::read_to_string(&target).unwrap();
        assert!(written.contains("Only chapter"));
    }
}
