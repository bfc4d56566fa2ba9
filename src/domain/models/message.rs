#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Sender;

pub const FAILURE_TEXT: &str = "Sorry, I encountered an error. Please try again.";

/// A single entry of the chat transcript. Messages are never edited once they
/// land in a conversation; `id` is the position they were appended at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: usize,
    pub sender: Sender,
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
}

impl Message {
    pub fn new(sender: Sender, text: &str) -> Message {
        return Message {
            id: 0,
            sender,
            text: text.to_string(),
            created_at: Utc::now(),
            translation: None,
        };
    }

    pub fn with_translation(sender: Sender, text: &str, translation: Option<String>) -> Message {
        let mut msg = Message::new(sender, text);
        msg.translation = translation.filter(|e| return !e.trim().is_empty());
        return msg;
    }

    pub fn failure() -> Message {
        return Message::new(Sender::Assistant, FAILURE_TEXT);
    }

    /// Rewrites the creation time, used when rebuilding messages from stored
    /// history.
    pub fn created(mut self, created_at: DateTime<Utc>) -> Message {
        self.created_at = created_at;
        return self;
    }

    pub fn is_failure(&self) -> bool {
        return self.sender == Sender::Assistant && self.text == FAILURE_TEXT;
    }
}
