//! Story scripts and their scenes.

use crate::Genre;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One scene of a story script.
///
/// Scenes are owned exclusively by their parent [`StoryScript`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptScene {
    /// Location or setting label (e.g. "rooftop-sunset")
    pub scene: String,
    /// Character dialogue or narration
    pub dialogue: String,
    /// Key visual elements for the image stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_description: Option<String>,
    /// Scene length in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u32>,
    /// Emotion tag steering visuals and delivery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
}

/// Optional script annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ScriptMetadata {
    /// Whether the script came from a trending topic
    #[serde(default)]
    pub trending: bool,
    /// Overall emotional register (e.g. "bittersweet romance")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_tone: Option<String>,
    /// Intended audience description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
}

/// A complete story script.
///
/// Created once by the script stage and read-only afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryScript {
    /// Unique script identifier
    pub id: Uuid,
    /// Display title
    pub title: String,
    /// Genre the script was written for
    pub genre: Genre,
    /// Opening line designed to stop scrolling
    pub hook: String,
    /// Ordered scene list
    pub scenes: Vec<ScriptScene>,
    /// Total target duration in seconds
    pub duration_secs: u32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Optional annotations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ScriptMetadata>,
}
