#[cfg(test)]
#[path = "curio_test.rs"]
mod tests;

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AssistantReply;
use crate::domain::models::AssistantRequest;
use crate::domain::models::Backend;
use crate::domain::models::HistoryRecord;
use crate::domain::models::TransportError;

/// Client for the Curio HTTP API. One instance is shared by everything that
/// talks to the assistant.
pub struct Curio {
    client: reqwest::Client,
    url: String,
    timeout: u64,
    health_check_timeout: u64,
}

impl Default for Curio {
    fn default() -> Curio {
        return Curio::new(
            Config::get(ConfigKey::ApiURL),
            Config::get_u64(ConfigKey::RequestTimeout),
            Config::get_u64(ConfigKey::BackendHealthCheckTimeout),
        );
    }
}

impl Curio {
    pub fn new(url: String, timeout: u64, health_check_timeout: u64) -> Curio {
        return Curio {
            client: reqwest::Client::new(),
            url: url.trim_end_matches('/').to_string(),
            timeout,
            health_check_timeout,
        };
    }

    async fn parse_body<T: DeserializeOwned>(
        res: reqwest::Response,
        context: &str,
    ) -> Result<T, TransportError> {
        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), context, "Non-success response");
            return Err(TransportError::Status(res.status().as_u16()));
        }

        let body = res.text().await?;
        let parsed = serde_json::from_str::<T>(&body).map_err(|err| {
            tracing::error!(error = ?err, context, "Failed to parse response body");
            return TransportError::MalformedBody(err.to_string());
        })?;

        return Ok(parsed);
    }
}

#[async_trait]
impl Backend for Curio {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<(), TransportError> {
        let res = self
            .client
            .get(&self.url)
            .timeout(Duration::from_millis(self.health_check_timeout))
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "Curio API is not reachable");
                return Err(TransportError::Request(err));
            }
        };

        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "Curio API health check failed");
            return Err(TransportError::Status(res.status().as_u16()));
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion(
        &self,
        request: AssistantRequest,
    ) -> Result<AssistantReply, TransportError> {
        let res = self
            .client
            .post(format!("{url}/api/chat", url = self.url))
            .timeout(Duration::from_millis(self.timeout))
            .json(&request)
            .send()
            .await?;

        let reply: AssistantReply = Curio::parse_body(res, "chat").await?;
        tracing::debug!(body = ?reply, "Completion response");

        return Ok(reply);
    }

    #[allow(clippy::implicit_return)]
    async fn get_history(&self, user_id: i64) -> Result<Vec<HistoryRecord>, TransportError> {
        let res = self
            .client
            .get(format!("{url}/api/users/{user_id}/chat", url = self.url))
            .timeout(Duration::from_millis(self.timeout))
            .send()
            .await?;

        return Curio::parse_body(res, "history").await;
    }
}
