//! Video analytics records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw statistics returned by a video host for one video.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct VideoStatistics {
    /// View count
    pub views: u64,
    /// Like count
    pub likes: u64,
    /// Comment count
    pub comments: u64,
}

/// An analytics snapshot for one published (or simulated) video.
///
/// Keyed by the external video identifier, not by project id; reconciling
/// with a [`crate::VideoProject`] requires joining on `youtube_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoAnalytics {
    /// External video identifier
    pub video_id: String,
    /// View count
    pub views: u64,
    /// Like count
    pub likes: u64,
    /// Comment count
    pub comments: u64,
    /// Total watch time in seconds
    pub watch_time_secs: u64,
    /// Click-through rate, 0.0 to 1.0
    pub ctr: f64,
    /// Average retention, 0.0 to 1.0
    pub retention: f64,
    /// Estimated revenue in USD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
    /// Snapshot timestamp
    pub updated_at: DateTime<Utc>,
}
