//! The video project aggregate.

use crate::{ProjectStatus, SeoMetadata, VideoAnalytics};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The mutable record tracking one pipeline run end-to-end.
///
/// This is the single mutable aggregate in the system: the orchestrator
/// updates `status` and accumulates the optional fields as stages complete.
/// `script_id` always references a [`crate::StoryScript`] created earlier in
/// the same run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoProject {
    /// Unique project identifier
    pub id: Uuid,
    /// Script this project renders
    pub script_id: Uuid,
    /// Current lifecycle status
    pub status: ProjectStatus,
    /// Assembled video (or manifest fallback) path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_path: Option<String>,
    /// Thumbnail image path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_path: Option<String>,
    /// Derived SEO metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<SeoMetadata>,
    /// Identifier returned by the video host (simulated ids carry a `sim_`
    /// prefix)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_id: Option<String>,
    /// When the upload was acknowledged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<DateTime<Utc>>,
    /// Last analytics snapshot attached to this project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics: Option<VideoAnalytics>,
}

impl VideoProject {
    /// Create a fresh project for a script, in the given starting status.
    pub fn new(id: Uuid, script_id: Uuid, status: ProjectStatus) -> Self {
        Self {
            id,
            script_id,
            status,
            video_path: None,
            thumbnail_path: None,
            seo: None,
            youtube_id: None,
            uploaded_at: None,
            analytics: None,
        }
    }
}
