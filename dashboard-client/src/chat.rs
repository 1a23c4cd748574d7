//! Chat widget state
//!
//! The transcript only grows. While a request is in flight the widget shows a
//! "thinking" indicator; a failed request is answered with a fixed apology.

use chrono::{DateTime, Utc};
use tracing::{debug, error};
use uuid::Uuid;

use crate::client::DashboardApi;
use crate::error::Result;
use crate::types::ChatReply;

pub const CHAT_ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn css_class(self) -> &'static str {
        match self {
            Sender::User => "user-message",
            Sender::Bot => "bot-message",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text: text.into(),
            at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    pub messages: Vec<ChatMessage>,
    pub thinking: bool,
}

impl ChatSession {
    /// Append the user's message and show the indicator
    ///
    /// Returns the trimmed text to send, or `None` for blank input.
    pub fn begin(&mut self, input: &str) -> Option<String> {
        let message = input.trim();
        if message.is_empty() {
            return None;
        }
        self.messages.push(ChatMessage::new(Sender::User, message));
        self.thinking = true;
        Some(message.to_string())
    }

    /// Replace the indicator with the bot's answer
    pub fn finish(&mut self, reply: Result<ChatReply>) -> &ChatMessage {
        self.thinking = false;
        let text = match reply {
            Ok(reply) => {
                debug!("Chat reply ({}): {} chars", reply.kind, reply.response.len());
                reply.response
            }
            Err(e) => {
                error!("Chat request failed: {e}");
                CHAT_ERROR_REPLY.to_string()
            }
        };
        self.messages.push(ChatMessage::new(Sender::Bot, text));
        &self.messages[self.messages.len() - 1]
    }

    /// Send one message and wait for the reply
    pub async fn send(&mut self, api: &dyn DashboardApi, input: &str) -> Option<&ChatMessage> {
        let message = self.begin(input)?;
        let reply = api.chat(&message).await;
        Some(self.finish(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::tests::FakeApi;

    #[tokio::test]
    async fn test_reply_is_appended() {
        let api = FakeApi::healthy();
        *api.chat.lock().unwrap() = Some(ChatReply {
            response: "Diversify.".into(),
            kind: "general".into(),
        });
        let mut chat = ChatSession::default();

        let reply = chat.send(&api, "  what now?  ").await.expect("sent");
        assert_eq!(reply.text, "Diversify.");
        assert_eq!(reply.sender, Sender::Bot);

        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[0].text, "what now?");
        assert_eq!(chat.messages[0].sender, Sender::User);
        assert!(!chat.thinking);
    }

    #[tokio::test]
    async fn test_failure_appends_apology() {
        let api = FakeApi::healthy();
        let mut chat = ChatSession::default();

        let reply = chat.send(&api, "hello").await.expect("sent");
        assert_eq!(reply.text, CHAT_ERROR_REPLY);
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let api = FakeApi::healthy();
        let mut chat = ChatSession::default();
        assert!(chat.send(&api, "   ").await.is_none());
        assert!(chat.messages.is_empty());
    }

    #[test]
    fn test_thinking_while_in_flight() {
        let mut chat = ChatSession::default();
        assert_eq!(chat.begin("hi").as_deref(), Some("hi"));
        assert!(chat.thinking);
        assert_eq!(chat.messages.len(), 1);
    }
}
