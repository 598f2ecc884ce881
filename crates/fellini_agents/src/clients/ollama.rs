//! Ollama-style text completion client.

use crate::LlmConfig;
use async_trait::async_trait;
use fellini_error::{AgentError, AgentErrorKind, FelliniResult};
use fellini_interface::TextModel;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    response: String,
}

/// Client for an Ollama-compatible `/api/generate` endpoint.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    config: LlmConfig,
}

impl OllamaClient {
    /// Create a new client from the given configuration.
    pub fn new(config: LlmConfig) -> Self {
        debug!(endpoint = %config.endpoint, model = %config.model, "Creating Ollama client");
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl TextModel for OllamaClient {
    #[instrument(skip(self, prompt), fields(model = %self.config.model, prompt_length = prompt.len()))]
    async fn complete(&self, prompt: &str) -> FelliniResult<String> {
        debug!("Sending completion request");

        let request = CompletionRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to reach completion endpoint");
                AgentError::new(AgentErrorKind::Unreachable(format!(
                    "{}: {}",
                    self.config.endpoint, e
                )))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Completion endpoint returned error");
            return Err(AgentError::new(AgentErrorKind::ServiceError {
                status: status.as_u16(),
                message: body,
            })
            .into());
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse completion response");
            AgentError::new(AgentErrorKind::ParseError(e.to_string()))
        })?;

        debug!(response_length = completion.response.len(), "Received completion");
        Ok(completion.response)
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }
}
