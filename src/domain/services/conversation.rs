#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use std::sync::Mutex;
use std::sync::MutexGuard;

use anyhow::bail;
use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::Sender;

#[derive(Default)]
struct Transcript {
    messages: Vec<Message>,
    subscribers: Vec<mpsc::UnboundedSender<Event>>,
    seeded: bool,
}

impl Transcript {
    fn publish(&mut self, event: Event) {
        self.subscribers
            .retain(|subscriber| return subscriber.send(event.clone()).is_ok());
    }

    fn push(&mut self, mut message: Message) -> Message {
        message.id = self.messages.len();
        self.messages.push(message.clone());
        self.publish(Event::MessageAppended(message.clone()));

        tracing::debug!(
            id = message.id,
            sender = message.sender.to_string(),
            "Appended message"
        );

        return message;
    }

    fn has_user_messages(&self) -> bool {
        return self
            .messages
            .iter()
            .any(|msg| return msg.sender == Sender::User);
    }
}

/// The visible chat transcript: an append-only, ordered list of messages.
///
/// Reads are open to anyone. Writes are limited to the request dispatcher and
/// the history loader, which live alongside it in `services`. Every change is
/// published to subscribers so a presentation layer can re-render and jump to
/// the newest entry.
#[derive(Default)]
pub struct ConversationStore {
    inner: Mutex<Transcript>,
}

impl ConversationStore {
    pub fn with_greeting(greeting: &str) -> Result<ConversationStore> {
        let store = ConversationStore::default();
        store.seed(Message::new(Sender::Assistant, greeting))?;
        return Ok(store);
    }

    fn lock(&self) -> MutexGuard<'_, Transcript> {
        // Nothing panics while holding the lock, a poisoned transcript is
        // still consistent.
        return self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| return poisoned.into_inner());
    }

    /// Establishes the opening assistant greeting. Only the first call on a
    /// store is accepted.
    pub fn seed(&self, greeting: Message) -> Result<()> {
        let mut transcript = self.lock();
        if transcript.seeded || !transcript.messages.is_empty() {
            bail!("Conversation has already been seeded");
        }

        transcript.seeded = true;
        transcript.push(greeting);
        return Ok(());
    }

    pub(super) fn append(&self, message: Message) -> Message {
        return self.lock().push(message);
    }

    /// Swaps the whole transcript for `messages`, but only while no user has
    /// said anything yet and there is something to show. Returns whether the
    /// swap happened.
    pub(super) fn replace_if_pristine(&self, messages: Vec<Message>) -> bool {
        let mut transcript = self.lock();
        if transcript.has_user_messages() || messages.is_empty() {
            return false;
        }

        transcript.messages = messages
            .into_iter()
            .enumerate()
            .map(|(idx, mut msg)| {
                msg.id = idx;
                return msg;
            })
            .collect();

        let snapshot = transcript.messages.clone();
        transcript.publish(Event::TranscriptReplaced(snapshot));

        return true;
    }

    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<Event> {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();
        self.lock().subscribers.push(tx);
        return rx;
    }

    pub fn all(&self) -> Vec<Message> {
        return self.lock().messages.clone();
    }

    pub fn last(&self) -> Option<Message> {
        return self.lock().messages.last().cloned();
    }

    pub fn len(&self) -> usize {
        return self.lock().messages.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.lock().messages.is_empty();
    }

    pub fn has_user_messages(&self) -> bool {
        return self.lock().has_user_messages();
    }
}
