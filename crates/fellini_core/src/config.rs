//! Generation configuration.

use crate::Genre;
use serde::{Deserialize, Serialize};

/// Visual style for the image stage.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Default,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VisualStyle {
    /// Cel-shaded anime rendering
    #[default]
    Anime,
    /// Photorealistic rendering
    Realistic,
    /// Semi-realistic illustration
    Mixed,
}

/// Voice selection for the speech stage.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Default,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VoiceType {
    /// Male narrator
    Male,
    /// Female narrator
    Female,
    /// Neutral narrator
    #[default]
    Neutral,
}

/// Knobs for one pipeline run.
///
/// Every field has a serde default so API and CLI callers can supply a
/// partial body; `genre: None` lets the trend stage pick.
///
/// # Examples
///
/// ```
/// use fellini_core::{GenerationConfig, VisualStyle, VoiceType};
///
/// let config = GenerationConfig::default();
/// assert_eq!(config.style, VisualStyle::Anime);
/// assert_eq!(config.voice, VoiceType::Neutral);
/// assert_eq!(config.duration_secs, 60);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Genre override; the trending topic's genre is used when unset
    #[serde(default)]
    pub genre: Option<Genre>,
    /// Visual style for scene images
    #[serde(default)]
    pub style: VisualStyle,
    /// Target video duration in seconds
    #[serde(default = "default_duration")]
    pub duration_secs: u32,
    /// Narrator voice
    #[serde(default, rename = "voiceType")]
    pub voice: VoiceType,
    /// Background music genre
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_genre: Option<String>,
    /// Emotion the run should aim for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_emotion: Option<String>,
}

fn default_duration() -> u32 {
    60
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            genre: None,
            style: VisualStyle::default(),
            duration_secs: default_duration(),
            voice: VoiceType::default(),
            music_genre: None,
            target_emotion: None,
        }
    }
}
