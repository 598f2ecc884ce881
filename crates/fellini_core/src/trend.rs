//! Trending topics.

use crate::Genre;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A trending topic candidate for the next script.
///
/// Immutable once created; catalogs are ranked by `popularity` descending to
/// pick the best topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingTopic {
    /// Topic headline (e.g. "Time loop confession")
    pub topic: String,
    /// Genre the topic belongs to
    pub genre: Genre,
    /// Popularity score, 0 to 100
    pub popularity: u8,
    /// Ordered keyword list for prompt enrichment
    pub keywords: Vec<String>,
    /// Where the topic came from (e.g. "synthetic")
    pub source: String,
    /// When the topic was observed
    pub timestamp: DateTime<Utc>,
}
