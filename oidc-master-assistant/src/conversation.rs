use tracing::warn;

use crate::relay::{get_oidc_help, TextGenerator};

/// First message of every conversation.
pub const GREETING: &str = "Hello! I am your OIDC expert assistant. \
Paste an error message, ask about claims, or describe an issue with your auth flow.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Transcript of the assistant view.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: vec![Message::assistant(GREETING)],
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Send `input` to `generator` and record both sides of the exchange.
    ///
    /// Blank input is ignored and yields `None`. Otherwise the reply is
    /// returned; a failed call is recorded as the apology message.
    pub async fn ask<G: TextGenerator>(&mut self, generator: &G, input: &str) -> Option<&Message> {
        if input.trim().is_empty() {
            return None;
        }

        self.messages.push(Message::user(input));
        let reply = match get_oidc_help(generator, input, None).await {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "Assistant request failed");
                err.public_message().to_string()
            }
        };
        self.messages.push(Message::assistant(reply));
        self.messages.last()
    }
}
