//! Publishing agent.

use fellini_core::{SeoMetadata, Sourced};
use fellini_error::FelliniResult;
use fellini_interface::VideoHost;
use std::path::Path;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Publishes the assembled video to the video host.
///
/// With usable credentials the agent uploads and attaches the thumbnail
/// (thumbnail failures are logged, never fatal). On any upload failure or
/// missing credentials it returns a simulated id instead, so the pipeline
/// always finishes with a non-empty identifier. Simulated ids are unique per
/// process: two failed uploads never share one.
pub struct UploaderAgent {
    host: Box<dyn VideoHost>,
}

impl UploaderAgent {
    /// Create an uploader from a video host.
    pub fn new(host: Box<dyn VideoHost>) -> Self {
        Self { host }
    }

    /// Publish a video, returning the host id or a simulated one.
    ///
    /// # Errors
    ///
    /// Publishing itself never fails; the `Result` carries through only so
    /// future host preconditions have somewhere to surface.
    #[instrument(skip(self, seo), fields(title = %seo.title, video = %video.display()))]
    pub async fn publish(
        &self,
        video: &Path,
        thumbnail: &Path,
        seo: &SeoMetadata,
    ) -> FelliniResult<Sourced<String>> {
        if !self.host.is_configured() {
            warn!("Video host not configured, simulating upload");
            return Ok(Sourced::Fallback(simulated_id()));
        }

        match self.host.upload(video, seo).await {
            Ok(video_id) => {
                debug!(video_id = %video_id, "Upload acknowledged");

                if let Err(e) = self.host.set_thumbnail(&video_id, thumbnail).await {
                    warn!(video_id = %video_id, error = %e, "Thumbnail upload failed");
                }

                Ok(Sourced::Live(video_id))
            }
            Err(e) => {
                warn!(error = %e, "Upload failed, simulating");
                Ok(Sourced::Fallback(simulated_id()))
            }
        }
    }
}

/// A unique stand-in for a host video id.
fn simulated_id() -> String {
    format!("sim_{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fellini_core::VideoStatistics;
    use fellini_error::{AgentError, AgentErrorKind};

    struct UnconfiguredHost;

    #[async_trait]
    impl VideoHost for UnconfiguredHost {
        async fn upload(&self, _video: &Path, _seo: &SeoMetadata) -> FelliniResult<String> {
            Err(AgentError::new(AgentErrorKind::MissingCredentials(
                "test".to_string(),
            ))
            .into())
        }

        async fn set_thumbnail(&self, _video_id: &str, _thumbnail: &Path) -> FelliniResult<()> {
            Ok(())
        }

        async fn statistics(&self, _video_id: &str) -> FelliniResult<VideoStatistics> {
            Ok(VideoStatistics::default())
        }

        fn is_configured(&self) -> bool {
            false
        }
    }

    fn seo() -> SeoMetadata {
        SeoMetadata {
            title: "T".to_string(),
            description: "D".to_string(),
            tags: vec!["shorts".to_string()],
            category: "Film & Animation".to_string(),
            thumbnail_url: None,
        }
    }

    #[tokio::test]
    async fn unconfigured_host_simulates_with_unique_ids() {
        let agent = UploaderAgent::new(Box::new(UnconfiguredHost));
        let seo = seo();

        let first = agent
            .publish(Path::new("a.mp4"), Path::new("a.svg"), &seo)
            .await
            .unwrap();
        let second = agent
            .publish(Path::new("b.mp4"), Path::new("b.svg"), &seo)
            .await
            .unwrap();

        assert!(first.is_fallback());
        assert!(second.is_fallback());
        assert!(!first.inner().is_empty());
        assert!(first.inner().starts_with("sim_"));
        assert_ne!(first.inner(), second.inner());
    }
}
