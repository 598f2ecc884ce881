//! Stable Diffusion web-UI image client.

use crate::ImageConfig;
use async_trait::async_trait;
use base64::Engine;
use fellini_error::{AgentError, AgentErrorKind, FelliniResult};
use fellini_interface::{ImageModel, ImageRequest};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

#[derive(Debug, Serialize)]
struct Txt2ImgRequest<'a> {
    prompt: &'a str,
    negative_prompt: &'a str,
    steps: u32,
    width: u32,
    height: u32,
    cfg_scale: f32,
    sampler_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct Txt2ImgResponse {
    images: Vec<String>,
}

/// Client for a Stable Diffusion web UI's `/sdapi/v1/txt2img` endpoint.
#[derive(Debug, Clone)]
pub struct StableDiffusionClient {
    client: Client,
    config: ImageConfig,
}

impl StableDiffusionClient {
    /// Create a new client from the given configuration.
    pub fn new(config: ImageConfig) -> Self {
        debug!(endpoint = %config.endpoint, "Creating Stable Diffusion client");
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ImageModel for StableDiffusionClient {
    #[instrument(skip(self, request), fields(width = request.width, height = request.height))]
    async fn render(&self, request: &ImageRequest) -> FelliniResult<Vec<u8>> {
        let url = format!("{}/sdapi/v1/txt2img", self.config.endpoint);
        debug!("Sending txt2img request");

        let body = Txt2ImgRequest {
            prompt: &request.prompt,
            negative_prompt: &request.negative_prompt,
            steps: request.steps,
            width: request.width,
            height: request.height,
            cfg_scale: 7.0,
            sampler_name: "DPM++ 2M Karras",
        };

        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to reach image endpoint");
                AgentError::new(AgentErrorKind::Unreachable(format!("{url}: {e}")))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, "Image endpoint returned error");
            return Err(AgentError::new(AgentErrorKind::ServiceError {
                status: status.as_u16(),
                message: body,
            })
            .into());
        }

        let parsed: Txt2ImgResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse image response");
            AgentError::new(AgentErrorKind::ParseError(e.to_string()))
        })?;

        let first = parsed.images.first().ok_or_else(|| {
            AgentError::new(AgentErrorKind::ParseError(
                "Response contained no images".to_string(),
            ))
        })?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(first)
            .map_err(|e| {
                AgentError::new(AgentErrorKind::ParseError(format!(
                    "Image payload was not valid base64: {e}"
                )))
            })?;

        debug!(size = bytes.len(), "Decoded generated image");
        Ok(bytes)
    }

    fn provider_name(&self) -> &'static str {
        "stable-diffusion"
    }
}
