#[cfg(test)]
#[path = "history_test.rs"]
mod tests;

use std::sync::Arc;

use super::ConversationStore;
use crate::domain::models::records_to_messages;
use crate::domain::models::BackendBox;
use crate::domain::models::HistoryLoadError;
use crate::domain::models::Message;

/// Result of a history load. `merged` is set when the messages became the
/// transcript.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadedHistory {
    pub messages: Vec<Message>,
    pub merged: bool,
}

impl LoadedHistory {
    /// History that arrived after the user started talking. It is not part of
    /// the transcript and has to be shown some other way.
    pub fn is_late(&self) -> bool {
        return !self.merged && !self.messages.is_empty();
    }
}

/// Best-effort restore of previously stored messages into a conversation.
pub struct HistoryLoader {
    backend: BackendBox,
    conversation: Arc<ConversationStore>,
}

impl HistoryLoader {
    pub fn new(backend: BackendBox, conversation: Arc<ConversationStore>) -> HistoryLoader {
        return HistoryLoader {
            backend,
            conversation,
        };
    }

    pub async fn fetch(&self, user_id: i64) -> Result<Vec<Message>, HistoryLoadError> {
        let records = self
            .backend
            .get_history(user_id)
            .await
            .map_err(|source| return HistoryLoadError { user_id, source })?;

        return Ok(records_to_messages(records));
    }

    /// Fetches the user's history and, if nobody has submitted anything yet,
    /// makes it the transcript. Failures leave the transcript alone and yield
    /// nothing.
    pub async fn load(&self, user_id: i64) -> LoadedHistory {
        let messages = match self.fetch(user_id).await {
            Ok(messages) => messages,
            Err(err) => {
                tracing::warn!(error = ?err, "Chat history unavailable");
                return LoadedHistory::default();
            }
        };

        let merged = self.conversation.replace_if_pristine(messages.clone());
        tracing::debug!(
            user_id,
            count = messages.len(),
            merged,
            "Loaded chat history"
        );

        return LoadedHistory { messages, merged };
    }
}
