use super::Message;

/// Change notifications published by the conversation store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    MessageAppended(Message),
    TranscriptReplaced(Vec<Message>),
}
