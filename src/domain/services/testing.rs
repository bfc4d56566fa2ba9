use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::domain::models::AssistantReply;
use crate::domain::models::AssistantRequest;
use crate::domain::models::Backend;
use crate::domain::models::BackendBox;
use crate::domain::models::HistoryRecord;
use crate::domain::models::TransportError;

/// In-memory backend for service tests. Failures are expressed as HTTP status
/// codes so they surface as `TransportError::Status`.
pub struct FakeBackend {
    pub reply: Result<AssistantReply, u16>,
    pub history: Result<Vec<HistoryRecord>, u16>,
    pub requests: Mutex<Vec<AssistantRequest>>,
    pub gate: Option<Arc<Notify>>,
}

impl Default for FakeBackend {
    fn default() -> FakeBackend {
        return FakeBackend {
            reply: Ok(AssistantReply {
                response: "Hello!".to_string(),
                bengali_translation: None,
            }),
            history: Ok(vec![]),
            requests: Mutex::new(vec![]),
            gate: None,
        };
    }
}

impl FakeBackend {
    pub fn replying(response: &str) -> FakeBackend {
        return FakeBackend {
            reply: Ok(AssistantReply {
                response: response.to_string(),
                bengali_translation: None,
            }),
            ..FakeBackend::default()
        };
    }

    pub fn failing(status: u16) -> FakeBackend {
        return FakeBackend {
            reply: Err(status),
            history: Err(status),
            ..FakeBackend::default()
        };
    }

    pub fn with_history(history: Vec<HistoryRecord>) -> FakeBackend {
        return FakeBackend {
            history: Ok(history),
            ..FakeBackend::default()
        };
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> FakeBackend {
        self.gate = Some(gate);
        return self;
    }

    pub fn boxed(self) -> (Arc<FakeBackend>, BackendBox) {
        let fake = Arc::new(self);
        let backend: BackendBox = fake.clone();
        return (fake, backend);
    }

    pub fn sent(&self) -> Vec<AssistantRequest> {
        return self.requests.lock().unwrap().clone();
    }
}

#[async_trait]
impl Backend for FakeBackend {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<(), TransportError> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion(
        &self,
        request: AssistantRequest,
    ) -> Result<AssistantReply, TransportError> {
        self.requests.lock().unwrap().push(request);

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        return match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(status) => Err(TransportError::Status(*status)),
        };
    }

    #[allow(clippy::implicit_return)]
    async fn get_history(&self, _user_id: i64) -> Result<Vec<HistoryRecord>, TransportError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        return match &self.history {
            Ok(records) => Ok(records.clone()),
            Err(status) => Err(TransportError::Status(*status)),
        };
    }
}
