//! WorkerApiClient - REST client for the routine generation worker.
//!
//! The worker proxies a chat-completions style model. It accepts
//! `{ "messages": [...] }` and answers either with an OpenAI-shaped body
//! (`choices[0].message.content`) or with a flat `{ "result": "..." }`.

use std::time::Duration;

use async_trait::async_trait;
use regimen_core::config::{AppConfig, DEFAULT_TIMEOUT_SECS};
use regimen_core::generation::{GenerationClient, GenerationError};
use regimen_core::session::ChatMessage;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

/// Client for the text-generation worker endpoint.
#[derive(Clone)]
pub struct WorkerApiClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl WorkerApiClient {
    /// Creates a new client for `endpoint` with the default 30 second timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.endpoint_url.clone()).with_timeout(config.timeout())
    }

    /// Overrides the timeout after construction.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the underlying HTTP client (proxy or TLS settings).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send_request(&self, body: &WorkerRequest<'_>) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| GenerationError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Remote {
                status: status.as_u16(),
            });
        }

        let parsed: Value = response
            .json()
            .await
            .map_err(|_| GenerationError::MalformedResponse)?;

        extract_content(&parsed).ok_or(GenerationError::MalformedResponse)
    }
}

#[async_trait]
impl GenerationClient for WorkerApiClient {
    async fn send(&self, messages: &[ChatMessage]) -> Result<String, GenerationError> {
        let request = WorkerRequest { messages };

        // Dropping the request future on expiry cancels the in-flight call.
        let result = match tokio::time::timeout(self.timeout, self.send_request(&request)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout(self.timeout)),
        };

        if let Err(err) = &result {
            tracing::error!(
                endpoint = %self.endpoint,
                kind = err.kind(),
                error = %err,
                "Worker request failed"
            );
        }
        result
    }
}

#[derive(Serialize)]
struct WorkerRequest<'a> {
    messages: &'a [ChatMessage],
}

/// Pulls the generated text from either accepted response shape.
///
/// Missing, non-string and empty values are all treated as absent.
pub fn extract_content(body: &Value) -> Option<String> {
    let choice_content = body
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty());
    let flat_result = || {
        body.get("result")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
    };
    choice_content.or_else(flat_result).map(str::to_string)
}
