//! CLI module for Zeta.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Zeta - video study companion
///
/// Turns a YouTube link into a transcript, a summary, chapters and flashcards,
/// and lets you chat with an assistant about the content.
#[derive(Parser, Debug)]
#[command(name = "zeta")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Backend base URL (overrides the configuration file)
    #[arg(long, env = "ZETA_BACKEND_URL", global = true)]
    pub backend: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline for one video and print the results
    Study {
        /// YouTube URL
        url: String,

        /// Write the study pack to a file instead of printing it ("-" for stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Export format when using --output (json, markdown)
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Interactive session: load videos, browse results and chat at the same time
    Session,

    /// Start an interactive chat with the assistant
    Chat,

    /// Print the video ID a URL refers to
    Extract {
        /// YouTube URL
        url: String,
    },

    /// Check that the backend is reachable and show the active configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_study_with_export() {
        let cli = Cli::parse_from([
            "zeta",
            "-vv",
            "study",
            "https://youtu.be/dQw4w9WgXcQ",
            "--output",
            "pack.md",
            "--format",
            "markdown",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Study { url, output, format } => {
                assert_eq!(url, "https://youtu.be/dQw4w9WgXcQ");
                assert_eq!(output.as_deref(), Some("pack.md"));
                assert_eq!(format, "markdown");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_backend_flag_is_global() {
        let cli = Cli::parse_from(["zeta", "chat", "--backend", "http://studybox:8080"]);
        assert_eq!(cli.backend.as_deref(), Some("http://studybox:8080"));
        assert!(matches!(cli.command, Commands::Chat));
    }
}
