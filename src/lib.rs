//! Zeta - video study companion
//!
//! A client for a study backend that turns a YouTube link into a transcript,
//! a summary, chapter summaries and flashcards, with a chat assistant on the
//! side.
//!
//! # Overview
//!
//! Submitting a video starts a chain of three remote stages:
//!
//! 1. submit the video, receiving a transcript and a summary
//! 2. derive chapter summaries from the transcript
//! 3. derive flashcards from the chapters
//!
//! Each stage starts as soon as the previous one commits its output. A new
//! submission replaces the running chain; late results from the old one are
//! dropped.
//!
//! # Architecture
//!
//! - `video` - video URL recognition
//! - `backend` - remote stage clients (`Backend` trait, HTTP implementation)
//! - `pipeline` - pure chain state machine and the async orchestrator around it
//! - `chat` - chat sub-session, independent of the pipeline
//! - `views` - text projections of pipeline snapshots, flashcard viewer
//! - `export` - study pack export (JSON, Markdown)
//! - `config` - configuration management
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use zeta::backend::HttpBackend;
//! use zeta::config::Settings;
//! use zeta::pipeline::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let backend = Arc::new(HttpBackend::from_settings(&settings)?);
//!     let pipeline = Orchestrator::spawn(backend, &settings.pipeline);
//!
//!     let generation = pipeline.submit("https://youtu.be/dQw4w9WgXcQ").await?;
//!     let snapshot = pipeline.settled(generation).await?;
//!     println!("{} flashcards", snapshot.flashcards.len());
//!
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod video;
pub mod views;

pub use error::{Result, ZetaError};
