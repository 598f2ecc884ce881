//! Layered configuration for the pipeline.
//!
//! Precedence, later sources overriding earlier ones:
//! 1. Bundled defaults (`fellini.toml` shipped with the workspace)
//! 2. User config in the home directory (`~/.config/fellini/fellini.toml`)
//! 3. User config in the current directory (`./fellini.toml`)

use config::{Config, File, FileFormat};
use fellini_agents::{ImageConfig, LlmConfig, TtsConfig};
use fellini_error::{ConfigError, FelliniError, FelliniResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Orchestrator pacing knobs.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Pause between batch iterations in seconds
    #[serde(default = "default_batch_delay")]
    pub batch_delay_secs: u64,
    /// Pause before the detached analytics refresh fires, in seconds
    #[serde(default = "default_analytics_delay")]
    pub analytics_delay_secs: u64,
}

fn default_batch_delay() -> u64 {
    30
}

fn default_analytics_delay() -> u64 {
    1
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_delay_secs: default_batch_delay(),
            analytics_delay_secs: default_analytics_delay(),
        }
    }
}

/// Top-level Fellini configuration.
///
/// # Examples
///
/// ```no_run
/// use fellini_pipeline::FelliniConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FelliniConfig::load()?;
/// println!("store at {}", config.store_dir.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FelliniConfig {
    /// Directory holding the JSON record store
    pub store_dir: PathBuf,
    /// Root directory for generated media
    pub media_dir: PathBuf,
    /// Path of the flat OAuth token file
    pub token_file: PathBuf,
    /// LLM endpoint settings
    #[serde(default)]
    pub llm: LlmConfig,
    /// Image endpoint settings
    #[serde(default)]
    pub image: ImageConfig,
    /// TTS endpoint settings
    #[serde(default)]
    pub tts: TtsConfig,
    /// Orchestrator pacing
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl FelliniConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> FelliniResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                FelliniError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                FelliniError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// User config files are optional and silently skipped when absent.
    #[instrument]
    pub fn load() -> FelliniResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        // Bundled default configuration
        const DEFAULT_CONFIG: &str = include_str!("../../../fellini.toml");

        let mut builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/fellini/fellini.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("fellini").required(false));

        builder
            .build()
            .map_err(|e| {
                FelliniError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                FelliniError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_defaults_parse() {
        const DEFAULT_CONFIG: &str = include_str!("../../../fellini.toml");
        let config: FelliniConfig = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.pipeline.batch_delay_secs, 30);
        assert_eq!(config.llm.model, "llama3.2");
        assert_eq!(config.store_dir, PathBuf::from("data"));
    }
}
