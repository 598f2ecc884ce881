//! Agent configuration structures.
//!
//! Every client takes an explicit config struct; no endpoint or credential
//! lives in module scope.

use fellini_error::{AgentError, AgentErrorKind, FelliniResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// LLM endpoint configuration for the script stage.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LlmConfig {
    /// Completion endpoint (Ollama-style `/api/generate`)
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,
    /// Model identifier
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// Sampling temperature
    #[serde(default = "default_llm_temperature")]
    pub temperature: f32,
    /// Per-call timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_endpoint() -> String {
    "http://localhost:11434/api/generate".to_string()
}

fn default_llm_model() -> String {
    "llama3.2".to_string()
}

fn default_llm_temperature() -> f32 {
    0.9
}

fn default_llm_timeout() -> u64 {
    30
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_llm_endpoint(),
            model: default_llm_model(),
            temperature: default_llm_temperature(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// Image-generation endpoint configuration for the visual stage.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImageConfig {
    /// Base URL of a Stable Diffusion web UI
    #[serde(default = "default_image_endpoint")]
    pub endpoint: String,
    /// Per-call timeout in seconds
    #[serde(default = "default_image_timeout")]
    pub timeout_secs: u64,
}

fn default_image_endpoint() -> String {
    "http://localhost:7860".to_string()
}

fn default_image_timeout() -> u64 {
    60
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            endpoint: default_image_endpoint(),
            timeout_secs: default_image_timeout(),
        }
    }
}

/// Text-to-speech endpoint configuration for the voice stage.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TtsConfig {
    /// Base URL of a Coqui-style TTS server
    #[serde(default = "default_tts_endpoint")]
    pub endpoint: String,
    /// Speech rate multiplier
    #[serde(default = "default_tts_speed")]
    pub speed: f32,
    /// Per-call timeout in seconds
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,
}

fn default_tts_endpoint() -> String {
    "http://localhost:5002".to_string()
}

fn default_tts_speed() -> f32 {
    1.1
}

fn default_tts_timeout() -> u64 {
    30
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_tts_endpoint(),
            speed: default_tts_speed(),
            timeout_secs: default_tts_timeout(),
        }
    }
}

/// Video host credentials for the uploader and optimizer stages.
///
/// Client id and secret come from the environment (`YOUTUBE_CLIENT_ID`,
/// `YOUTUBE_CLIENT_SECRET`); tokens persist in the flat token file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct YouTubeConfig {
    /// OAuth2 client id
    #[serde(default)]
    pub client_id: Option<String>,
    /// OAuth2 client secret
    #[serde(default)]
    pub client_secret: Option<String>,
    /// OAuth2 redirect URI
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
}

fn default_redirect_uri() -> String {
    "http://localhost:3000/api/auth/callback".to_string()
}

impl YouTubeConfig {
    /// Read credentials from the process environment.
    pub fn from_env() -> Self {
        Self {
            client_id: std::env::var("YOUTUBE_CLIENT_ID").ok(),
            client_secret: std::env::var("YOUTUBE_CLIENT_SECRET").ok(),
            redirect_uri: std::env::var("YOUTUBE_REDIRECT_URI")
                .unwrap_or_else(|_| default_redirect_uri()),
        }
    }

    /// Whether both client id and secret are present.
    pub fn has_credentials(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }
}

/// Output directories for generated media artifacts.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MediaDirs {
    /// Root directory for generated media
    pub root: PathBuf,
}

impl MediaDirs {
    /// Create media directories rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory for scene images and thumbnails.
    pub fn visuals(&self) -> PathBuf {
        self.root.join("visuals")
    }

    /// Directory for voiceover audio, subtitles, and music.
    pub fn audio(&self) -> PathBuf {
        self.root.join("audio")
    }

    /// Directory for assembled videos and manifests.
    pub fn videos(&self) -> PathBuf {
        self.root.join("videos")
    }

    /// Create all media directories.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory cannot be created.
    pub fn ensure(&self) -> FelliniResult<()> {
        for dir in [self.visuals(), self.audio(), self.videos()] {
            std::fs::create_dir_all(&dir).map_err(|e| {
                AgentError::new(AgentErrorKind::ArtifactWrite(format!(
                    "{}: {}",
                    dir.display(),
                    e
                )))
            })?;
        }
        Ok(())
    }
}
