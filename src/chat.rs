//! Chat sub-session.
//!
//! An append-only conversation with the backend assistant. It is independent
//! of the derivation pipeline and keeps no state beyond its message list.

use crate::backend::Backend;
use crate::config::ChatSettings;
use crate::error::RemoteError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{instrument, warn};

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
    pub sent_at: DateTime<Utc>,
}

/// Conversation with the backend assistant.
///
/// `submit` takes `&mut self`, so one question is answered before the next is
/// sent and replies always follow their question.
pub struct ChatSession {
    backend: Arc<dyn Backend>,
    messages: Vec<ChatMessage>,
    error_fallback: String,
}

impl ChatSession {
    pub fn new(backend: Arc<dyn Backend>, settings: &ChatSettings) -> Self {
        Self {
            backend,
            messages: Vec::new(),
            error_fallback: settings.error_fallback.clone(),
        }
    }

    /// All messages in the order they were appended.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Forget the conversation.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Send a question and append both it and the reply.
    ///
    /// Blank input is ignored and returns `None`. Backend failures never
    /// propagate: they become a bot message instead.
    #[instrument(skip(self, text))]
    pub async fn submit(&mut self, text: &str) -> Option<&ChatMessage> {
        let query = text.trim();
        if query.is_empty() {
            return None;
        }

        self.push(Sender::User, query.to_string());

        let reply = match self.backend.send_chat_message(query).await {
            Ok(response) => response,
            Err(RemoteError::Rejected { message, .. }) => {
                warn!("Chat request rejected: {}", message);
                format!("Error: {}", message)
            }
            Err(e @ RemoteError::Transport { .. }) => {
                warn!("Chat request failed: {}", e);
                self.error_fallback.clone()
            }
        };

        self.push(Sender::Bot, reply);
        self.messages.last()
    }

    fn push(&mut self, sender: Sender, text: String) {
        self.messages.push(ChatMessage {
            text,
            sender,
            sent_at: Utc::now(),
        });
    }
}
