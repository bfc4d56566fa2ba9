#[cfg(test)]
#[path = "dispatcher_test.rs"]
mod tests;

use std::sync::Arc;

use super::BusyState;
use super::ConversationStore;
use super::TypingIndicator;
use crate::domain::models::AssistantRequest;
use crate::domain::models::BackendBox;
use crate::domain::models::Message;
use crate::domain::models::RequestType;
use crate::domain::models::Sender;
use crate::domain::models::SubmitError;
use crate::domain::models::SubmitOptions;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The assistant replied, the reply is now the last message.
    Answered(Message),
    /// The call failed and the fixed apology was appended instead.
    Apologized(Message),
}

impl Outcome {
    pub fn message(&self) -> &Message {
        match self {
            Outcome::Answered(msg) => return msg,
            Outcome::Apologized(msg) => return msg,
        }
    }
}

/// Turns user input into exactly one call to the assistant backend at a time,
/// and settles every accepted submission into the transcript.
pub struct RequestDispatcher {
    backend: BackendBox,
    busy: BusyState,
    conversation: Arc<ConversationStore>,
    user_id: i64,
}

impl RequestDispatcher {
    pub fn new(
        backend: BackendBox,
        conversation: Arc<ConversationStore>,
        user_id: i64,
    ) -> RequestDispatcher {
        return RequestDispatcher {
            backend,
            busy: BusyState::default(),
            conversation,
            user_id,
        };
    }

    pub fn is_busy(&self) -> bool {
        return self.busy.is_busy();
    }

    pub fn indicator(&self) -> TypingIndicator {
        return self.busy.indicator();
    }

    pub async fn submit(
        &self,
        raw_text: &str,
        request_type: Option<RequestType>,
        options: SubmitOptions,
    ) -> Result<Outcome, SubmitError> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Err(SubmitError::Validation);
        }

        let _guard = match self.busy.try_acquire() {
            Some(guard) => guard,
            None => {
                tracing::debug!("Rejected submission while a request is in flight");
                return Err(SubmitError::Busy);
            }
        };

        self.conversation.append(Message::new(Sender::User, raw_text));

        let request = AssistantRequest::new(self.user_id, text, request_type, &options);
        tracing::debug!(
            user_id = self.user_id,
            request_type = ?request.request_type,
            translate_reply = request.translate_reply,
            "Sending assistant request"
        );

        let outcome = match self.backend.get_completion(request).await {
            Ok(reply) => {
                let msg = self.conversation.append(Message::with_translation(
                    Sender::Assistant,
                    &reply.response,
                    reply.bengali_translation,
                ));
                Outcome::Answered(msg)
            }
            Err(err) => {
                tracing::error!(error = ?err, "Assistant request failed");
                Outcome::Apologized(self.conversation.append(Message::failure()))
            }
        };

        return Ok(outcome);
    }
}
