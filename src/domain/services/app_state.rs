#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;

use super::ConversationStore;
use super::HistoryLoader;
use super::LanguageStore;
use super::LoadedHistory;
use super::Outcome;
use super::RequestDispatcher;
use crate::domain::models::BackendBox;
use crate::domain::models::RequestType;
use crate::domain::models::SubmitError;
use crate::domain::models::SubmitOptions;
use crate::domain::models::TranslationDirection;

pub const GREETING_ENGLISH: &str =
    "Hi there! I'm Curio, your AI assistant. How can I help you today?";
pub const GREETING_BENGALI: &str =
    "হ্যালো! আমি কিউরিও, তোমার এআই সহকারী। আজ আমি তোমাকে কীভাবে সাহায্য করতে পারি?";

/// Everything one chat session needs, wired to a single shared backend.
pub struct AppState {
    pub conversation: Arc<ConversationStore>,
    pub dispatcher: RequestDispatcher,
    pub history: HistoryLoader,
    pub user_id: i64,
}

impl AppState {
    pub fn new(backend: BackendBox, language: &LanguageStore, user_id: i64) -> Result<AppState> {
        let greeting = language.translate(GREETING_ENGLISH, GREETING_BENGALI);
        let conversation = Arc::new(ConversationStore::with_greeting(greeting)?);

        return Ok(AppState {
            dispatcher: RequestDispatcher::new(backend.clone(), conversation.clone(), user_id),
            history: HistoryLoader::new(backend, conversation.clone()),
            conversation,
            user_id,
        });
    }

    pub async fn submit(
        &self,
        text: &str,
        request_type: Option<RequestType>,
        translation_direction: Option<TranslationDirection>,
        translate_reply: bool,
    ) -> Result<Outcome, SubmitError> {
        let options = SubmitOptions {
            translation_direction,
            translate_reply,
        };

        return self.dispatcher.submit(text, request_type, options).await;
    }

    pub async fn load_history(&self) -> LoadedHistory {
        return self.history.load(self.user_id).await;
    }
}
