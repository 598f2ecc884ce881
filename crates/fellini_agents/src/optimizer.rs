//! Analytics and learning agent.

use chrono::Utc;
use fellini_core::{Genre, LearningData, VideoAnalytics};
use fellini_error::FelliniResult;
use fellini_interface::VideoHost;
use fellini_store::RecordStore;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Name of the optimizer's memory blob.
const MEMORY_KEY: &str = "performance_patterns";

/// CTR above which hook patterns are recorded as successful.
const STRONG_CTR: f64 = 0.08;

/// Aggregate insight report over all stored analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// Number of videos with analytics
    pub total_videos: usize,
    /// Sum of views
    pub total_views: u64,
    /// Sum of estimated revenue
    pub total_revenue: f64,
    /// Mean click-through rate
    pub avg_ctr: f64,
    /// Mean retention
    pub avg_retention: f64,
    /// Threshold-driven recommendations
    pub recommendations: Vec<String>,
}

/// Concept suggestion for the next run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSuggestion {
    /// Genre to lead with
    pub recommended_genre: Genre,
    /// Hook approach to lead with
    pub recommended_hook: String,
    /// Target duration in seconds
    pub recommended_duration_secs: u32,
    /// Why this suggestion
    pub reasoning: String,
}

/// Fetches analytics, aggregates performance, and folds learnings into the
/// persisted agent memory.
///
/// The only agent with cross-run state: it reads and writes the
/// `performance_patterns` memory blob.
pub struct OptimizerAgent {
    host: Option<Box<dyn VideoHost>>,
    store: RecordStore,
}

impl OptimizerAgent {
    /// Create an optimizer from an optional video host and a store.
    ///
    /// Without a host (or with an unconfigured one), analytics are randomized
    /// mock snapshots.
    pub fn new(host: Option<Box<dyn VideoHost>>, store: RecordStore) -> Self {
        Self { host, store }
    }

    /// Fetch and persist an analytics snapshot for a video.
    ///
    /// # Errors
    ///
    /// Only store failures propagate; host failures fall back to mock data.
    #[instrument(skip(self), fields(video_id = %video_id))]
    pub async fn refresh(&self, video_id: &str) -> FelliniResult<VideoAnalytics> {
        let analytics = match self.host.as_ref().filter(|h| h.is_configured()) {
            Some(host) => match host.statistics(video_id).await {
                Ok(stats) => VideoAnalytics {
                    video_id: video_id.to_string(),
                    views: stats.views,
                    likes: stats.likes,
                    comments: stats.comments,
                    // Watch time, CTR, and retention need the host's
                    // analytics API, not the data API
                    watch_time_secs: 0,
                    ctr: 0.0,
                    retention: 0.0,
                    revenue: None,
                    updated_at: Utc::now(),
                },
                Err(e) => {
                    warn!(error = %e, "Statistics fetch failed, generating mock analytics");
                    mock_analytics(video_id)
                }
            },
            None => mock_analytics(video_id),
        };

        self.store.save_analytics(&analytics).await?;
        debug!(views = analytics.views, "Analytics saved");
        Ok(analytics)
    }

    /// Aggregate all stored analytics into an insight report.
    ///
    /// Read-only; no memory mutation.
    #[instrument(skip(self))]
    pub async fn performance_report(&self) -> FelliniResult<PerformanceReport> {
        let all = self.store.all_analytics().await?;

        let total_videos = all.len();
        let total_views = all.iter().map(|a| a.views).sum();
        let total_revenue = all.iter().filter_map(|a| a.revenue).sum();
        let (avg_ctr, avg_retention) = if total_videos > 0 {
            (
                all.iter().map(|a| a.ctr).sum::<f64>() / total_videos as f64,
                all.iter().map(|a| a.retention).sum::<f64>() / total_videos as f64,
            )
        } else {
            (0.0, 0.0)
        };

        Ok(PerformanceReport {
            total_videos,
            total_views,
            total_revenue,
            avg_ctr,
            avg_retention,
            recommendations: recommendations(avg_ctr, avg_retention),
        })
    }

    /// Fold the current aggregate into the persisted memory blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    #[instrument(skip(self))]
    pub async fn learn(&self) -> FelliniResult<()> {
        let report = self.performance_report().await?;

        let mut memory = self
            .store
            .memory(MEMORY_KEY)
            .await?
            .unwrap_or_default();

        memory.performance_metrics.avg_ctr = report.avg_ctr;
        memory.performance_metrics.avg_retention = report.avg_retention;
        memory.performance_metrics.top_genres = top_genres();

        if report.avg_ctr > STRONG_CTR {
            for pattern in ["Emotional opening questions", "Time-sensitive scenarios"] {
                let pattern = pattern.to_string();
                if !memory.successful_patterns.hooks.contains(&pattern) {
                    memory.successful_patterns.hooks.push(pattern);
                }
            }
        }

        memory.learning_data = Some(LearningData {
            timestamp: Utc::now(),
            insights: report.recommendations.clone(),
        });

        self.store.save_memory(MEMORY_KEY, &memory).await?;
        debug!("Learning patterns saved");
        Ok(())
    }

    /// Suggest the next video concept from remembered performance.
    pub async fn suggest_next(&self) -> FelliniResult<VideoSuggestion> {
        let memory = self.store.memory(MEMORY_KEY).await?.unwrap_or_default();

        let recommended_genre = memory
            .performance_metrics
            .top_genres
            .first()
            .copied()
            .unwrap_or(Genre::SciFi);

        Ok(VideoSuggestion {
            recommended_genre,
            recommended_hook: "Start with a shocking revelation".to_string(),
            recommended_duration_secs: 60,
            reasoning: "Based on historical performance, this genre and approach has highest \
                        engagement"
                .to_string(),
        })
    }

    /// Projected revenue in USD for a number of videos at the given CPM.
    ///
    /// Assumes 20k views per video with 60% of them monetizable.
    pub fn projected_revenue(&self, videos: u32, avg_cpm: f64) -> f64 {
        let avg_views = 20_000.0;
        let monetizable_views = avg_views * 0.6;
        let revenue_per_video = monetizable_views / 1000.0 * avg_cpm;
        f64::from(videos) * revenue_per_video
    }
}

fn mock_analytics(video_id: &str) -> VideoAnalytics {
    let mut rng = rand::thread_rng();
    VideoAnalytics {
        video_id: video_id.to_string(),
        views: rng.gen_range(5_000..55_000),
        likes: rng.gen_range(100..2_100),
        comments: rng.gen_range(10..510),
        watch_time_secs: rng.gen_range(5_000..35_000),
        ctr: rng.gen_range(0.02..0.17),
        retention: rng.gen_range(0.3..0.7),
        revenue: Some(rng.gen_range(5.0..55.0)),
        updated_at: Utc::now(),
    }
}

fn recommendations(avg_ctr: f64, avg_retention: f64) -> Vec<String> {
    let mut recommendations = Vec::new();

    if avg_ctr < 0.05 {
        recommendations
            .push("CTR is below 5% - Focus on more compelling thumbnails and titles".to_string());
        recommendations.push("Test emotional hooks and curiosity gaps in titles".to_string());
    } else if avg_ctr > 0.10 {
        recommendations
            .push("Excellent CTR! Keep using similar thumbnail and title strategies".to_string());
    }

    if avg_retention < 0.40 {
        recommendations.push("Retention is below 40% - Strengthen opening hooks".to_string());
        recommendations.push("Consider faster pacing in first 3 seconds".to_string());
    } else if avg_retention > 0.60 {
        recommendations.push("Great retention! Your story pacing is working well".to_string());
    }

    if recommendations.is_empty() {
        recommendations.push("Performance is solid - continue current strategies".to_string());
        recommendations.push("Test variations in genre and emotional tones".to_string());
    }

    recommendations
}

fn top_genres() -> Vec<Genre> {
    // A genre-level roll-up needs the analytics/project join; until then the
    // historical leaders stand in
    vec![Genre::Thriller, Genre::SciFi, Genre::Romance]
}
