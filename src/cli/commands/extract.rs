//! Extract command: show which video a URL points at.

use crate::cli::Output;
use crate::video::extract_video_id;
use anyhow::Result;

/// Run the extract command.
pub fn run_extract(url: &str) -> Result<()> {
    match extract_video_id(url) {
        Some(id) => {
            println!("{}", id);
            Output::kv("watch", &id.watch_url());
            Output::kv("embed", &id.embed_url());
            Ok(())
        }
        None => {
            Output::error("Please enter a valid YouTube URL.");
            anyhow::bail!("no video ID found in {:?}", url)
        }
    }
}
