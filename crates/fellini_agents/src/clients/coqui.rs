//! Coqui-style text-to-speech client.

use crate::TtsConfig;
use async_trait::async_trait;
use fellini_error::{AgentError, AgentErrorKind, FelliniResult};
use fellini_interface::SpeechModel;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, instrument};

#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    speaker_id: &'a str,
    language: &'a str,
    speed: f32,
}

/// Client for a Coqui-style `/api/tts` endpoint returning WAV bytes.
#[derive(Debug, Clone)]
pub struct CoquiTtsClient {
    client: Client,
    config: TtsConfig,
}

impl CoquiTtsClient {
    /// Create a new client from the given configuration.
    pub fn new(config: TtsConfig) -> Self {
        debug!(endpoint = %config.endpoint, "Creating TTS client");
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl SpeechModel for CoquiTtsClient {
    #[instrument(skip(self, text), fields(text_length = text.len(), speaker = %speaker))]
    async fn synthesize(&self, text: &str, speaker: &str) -> FelliniResult<Vec<u8>> {
        let url = format!("{}/api/tts", self.config.endpoint);
        debug!("Sending synthesis request");

        let body = TtsRequest {
            text,
            speaker_id: speaker,
            language: "en",
            speed: self.config.speed,
        };

        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to reach TTS endpoint");
                AgentError::new(AgentErrorKind::Unreachable(format!("{url}: {e}")))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, "TTS endpoint returned error");
            return Err(AgentError::new(AgentErrorKind::ServiceError {
                status: status.as_u16(),
                message: body,
            })
            .into());
        }

        let bytes = response.bytes().await.map_err(|e| {
            error!(error = ?e, "Failed to read TTS audio body");
            AgentError::new(AgentErrorKind::ParseError(e.to_string()))
        })?;

        debug!(size = bytes.len(), "Received synthesized audio");
        Ok(bytes.to_vec())
    }

    fn provider_name(&self) -> &'static str {
        "coqui"
    }
}
