//! Interactive chat command.

use crate::backend::HttpBackend;
use crate::chat::ChatSession;
use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Run the interactive chat command.
pub async fn run_chat(settings: Settings) -> anyhow::Result<()> {
    let backend = Arc::new(HttpBackend::from_settings(&settings)?);
    let mut chat = ChatSession::new(backend, &settings.chat);

    println!("\n{}", style(&settings.chat.welcome).bold().cyan());
    println!(
        "{}\n",
        style("Type your questions, or 'exit' to quit. Use 'clear' to reset conversation.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        if input.eq_ignore_ascii_case("clear") {
            chat.clear();
            Output::info("Conversation history cleared.");
            continue;
        }

        let spinner = Output::spinner("Thinking...");
        let reply = chat.submit(input).await.map(|message| message.text.clone());
        spinner.finish_and_clear();

        if let Some(reply) = reply {
            Output::bot(&reply);
        }
    }

    Ok(())
}
