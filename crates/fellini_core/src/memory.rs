//! Persisted agent memory.

use crate::Genre;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Patterns that correlated with good performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SuccessfulPatterns {
    /// Hook phrasings worth reusing
    #[serde(default)]
    pub hooks: Vec<String>,
    /// Story structures worth reusing
    #[serde(default)]
    pub structures: Vec<String>,
    /// Visual styles worth reusing
    #[serde(default)]
    pub visual_styles: Vec<String>,
}

/// Rolling performance aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PerformanceMetrics {
    /// Average click-through rate across analyzed videos
    #[serde(default)]
    pub avg_ctr: f64,
    /// Average retention across analyzed videos
    #[serde(default)]
    pub avg_retention: f64,
    /// Best-performing genres, strongest first
    #[serde(default)]
    pub top_genres: Vec<Genre>,
}

/// A dated batch of insights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningData {
    /// When the insights were recorded
    pub timestamp: DateTime<Utc>,
    /// Free-text insight lines
    pub insights: Vec<String>,
}

/// A named memory blob the optimizer accumulates across runs.
///
/// Stored last-write-wins per name; there is no schema versioning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AgentMemory {
    /// Patterns worth repeating
    #[serde(default)]
    pub successful_patterns: SuccessfulPatterns,
    /// Aggregate metrics
    #[serde(default)]
    pub performance_metrics: PerformanceMetrics,
    /// Dated insight batches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_data: Option<LearningData>,
}
