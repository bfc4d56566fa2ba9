use std::sync::Arc;

use async_trait::async_trait;

use super::AssistantReply;
use super::AssistantRequest;
use super::HistoryRecord;
use super::TransportError;

#[async_trait]
pub trait Backend {
    /// Used at startup to warn early when the assistant backend can't be
    /// reached. Never affects the transcript.
    async fn health_check(&self) -> Result<(), TransportError>;

    /// Sends one message to the assistant and waits for its reply. Any
    /// non-success outcome, including timeouts and bodies that fail to parse,
    /// is a `TransportError`.
    async fn get_completion(&self, request: AssistantRequest)
        -> Result<AssistantReply, TransportError>;

    /// Fetches previously stored messages for a user, oldest first.
    async fn get_history(&self, user_id: i64) -> Result<Vec<HistoryRecord>, TransportError>;
}

pub type BackendBox = Arc<dyn Backend + Send + Sync>;
