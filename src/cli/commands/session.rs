//! Interactive session: one pipeline, one chat, many views.
//!
//! The pipeline runs on its own task, so a video can be processing while the
//! user chats or browses what has arrived so far.

use crate::backend::{Backend, HttpBackend};
use crate::chat::ChatSession;
use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::{Generation, Orchestrator, OrchestratorHandle, PipelineSnapshot};
use crate::views::{self, FlashcardViewer};
use console::style;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

const HELP: &str = "\
load <url>   submit a video (restarts the chain)
ask <text>   ask the assistant
status       show pipeline progress
video        show the loaded video
summary      show the summary
transcript   show the transcript
chapters     show the chapters
cards        show the current flashcard
next, prev   move through the flashcards
flip         turn the current flashcard over
help         show this help
quit         leave the session";

/// A parsed session input line.
#[derive(Debug, PartialEq)]
enum SessionCommand<'a> {
    Load(&'a str),
    Ask(&'a str),
    Status,
    Video,
    Summary,
    Transcript,
    Chapters,
    Cards,
    Next,
    Prev,
    Flip,
    Help,
    Quit,
    Unknown(&'a str),
}

impl<'a> SessionCommand<'a> {
    fn parse(line: &'a str) -> Self {
        let (word, rest) = line
            .trim()
            .split_once(char::is_whitespace)
            .map(|(word, rest)| (word, rest.trim()))
            .unwrap_or((line.trim(), ""));

        match word.to_lowercase().as_str() {
            "load" | "open" => Self::Load(rest),
            "ask" => Self::Ask(rest),
            "status" => Self::Status,
            "video" => Self::Video,
            "summary" => Self::Summary,
            "transcript" => Self::Transcript,
            "chapters" => Self::Chapters,
            "cards" | "card" => Self::Cards,
            "next" | "n" => Self::Next,
            "prev" | "p" => Self::Prev,
            "flip" | "f" => Self::Flip,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(word),
        }
    }
}

/// Flashcard viewer that starts over whenever a new chain replaces the deck.
#[derive(Default)]
struct Deck {
    viewer: FlashcardViewer,
    generation: Generation,
}

impl Deck {
    fn sync(&mut self, snapshot: &PipelineSnapshot) {
        if snapshot.generation != self.generation {
            self.viewer.reset();
            self.generation = snapshot.generation;
        }
    }
}

/// Run the interactive session.
pub async fn run_session(settings: Settings) -> anyhow::Result<()> {
    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::from_settings(&settings)?);
    let pipeline = Orchestrator::spawn(Arc::clone(&backend), &settings.pipeline);
    let mut chat = ChatSession::new(backend, &settings.chat);
    let mut deck = Deck::default();

    let watcher = watch_progress(&pipeline);

    println!("\n{}", style("Zeta Session").bold().cyan());
    println!("{}", style(&settings.chat.welcome).cyan());
    println!("{}\n", style("Type 'help' for commands.").dim());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{} ", style("zeta>").green().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let snapshot = pipeline.snapshot();
        deck.sync(&snapshot);

        match SessionCommand::parse(&line) {
            SessionCommand::Load("") => Output::warning("Usage: load <url>"),
            SessionCommand::Load(url) => match pipeline.submit(url).await {
                Ok(generation) => Output::info(&format!("Started chain {}", generation)),
                Err(e) => Output::error(&format!("{}", e)),
            },
            SessionCommand::Ask("") => Output::warning("Usage: ask <question>"),
            SessionCommand::Ask(question) => {
                if let Some(reply) = chat.submit(question).await {
                    Output::bot(&reply.text);
                }
            }
            SessionCommand::Status => println!("{}", views::status(&snapshot)),
            SessionCommand::Video => Output::section("Video", &views::video(&snapshot)),
            SessionCommand::Summary => {
                Output::section("Summary", &views::summary(&snapshot.summary))
            }
            SessionCommand::Transcript => Output::section(
                "Transcript",
                &views::transcript(snapshot.transcript.as_deref()),
            ),
            SessionCommand::Chapters => {
                Output::section("Chapters", &views::chapters(&snapshot.chapters))
            }
            SessionCommand::Cards => show_card(&deck, &snapshot),
            SessionCommand::Next => {
                deck.viewer.next(&snapshot.flashcards);
                show_card(&deck, &snapshot);
            }
            SessionCommand::Prev => {
                deck.viewer.prev(&snapshot.flashcards);
                show_card(&deck, &snapshot);
            }
            SessionCommand::Flip => {
                deck.viewer.flip();
                show_card(&deck, &snapshot);
            }
            SessionCommand::Help => Output::section("Commands", HELP),
            SessionCommand::Quit => break,
            SessionCommand::Unknown("") => {}
            SessionCommand::Unknown(word) => {
                Output::warning(&format!("Unknown command '{}'. Type 'help'.", word))
            }
        }
    }

    watcher.abort();
    pipeline.shutdown().await;
    Output::info("Goodbye!");

    Ok(())
}

fn show_card(deck: &Deck, snapshot: &PipelineSnapshot) {
    Output::section("Flashcards", &deck.viewer.render(&snapshot.flashcards));
}

/// Print a status line for every published transition.
fn watch_progress(pipeline: &OrchestratorHandle) -> JoinHandle<()> {
    let mut snapshots = pipeline.subscribe();
    tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let line = views::status(&snapshots.borrow_and_update());
            println!("\n{}", style(line).dim());
        }
    })
}
