use thiserror::Error;

/// Reasons a submission is turned away before anything is appended.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Message is empty")]
    Validation,

    #[error("A request is already in flight")]
    Busy,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request to the assistant backend failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Assistant backend responded with status {0}")]
    Status(u16),

    #[error("Assistant backend returned a malformed body: {0}")]
    MalformedBody(String),
}

#[derive(Debug, Error)]
#[error("Failed to load chat history for user {user_id}: {source}")]
pub struct HistoryLoadError {
    pub user_id: i64,
    #[source]
    pub source: TransportError,
}
