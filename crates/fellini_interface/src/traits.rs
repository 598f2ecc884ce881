//! Trait definitions for external capabilities.

use crate::ImageRequest;
use async_trait::async_trait;
use fellini_core::{SeoMetadata, VideoStatistics};
use fellini_error::FelliniResult;
use std::path::Path;

/// A text-completion model used by the script stage.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Generate a completion for the given prompt.
    async fn complete(&self, prompt: &str) -> FelliniResult<String>;

    /// Provider name (e.g. "ollama").
    fn provider_name(&self) -> &'static str;
}

/// A text-to-image model used by the visual stage.
#[async_trait]
pub trait ImageModel: Send + Sync {
    /// Render an image, returning encoded image bytes.
    async fn render(&self, request: &ImageRequest) -> FelliniResult<Vec<u8>>;

    /// Provider name (e.g. "stable-diffusion").
    fn provider_name(&self) -> &'static str;
}

/// A text-to-speech model used by the voice stage.
#[async_trait]
pub trait SpeechModel: Send + Sync {
    /// Synthesize speech for `text`, returning WAV bytes.
    async fn synthesize(&self, text: &str, speaker: &str) -> FelliniResult<Vec<u8>>;

    /// Provider name (e.g. "coqui").
    fn provider_name(&self) -> &'static str;
}

/// An external transcoding tool used by the editor stage.
///
/// The live implementation shells out to `ffmpeg`; each operation reads and
/// writes files on disk rather than streaming bytes.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Whether the tool can be invoked at all.
    async fn available(&self) -> bool;

    /// Build a slideshow video from still images, one fixed-duration clip per
    /// image.
    async fn concat_slideshow(
        &self,
        images: &[std::path::PathBuf],
        output: &Path,
    ) -> FelliniResult<()>;

    /// Mux an audio track onto a video, truncating to the shorter stream.
    async fn mux_audio(&self, video: &Path, audio: &Path, output: &Path) -> FelliniResult<()>;

    /// Burn an SRT subtitle file into a video.
    async fn burn_subtitles(
        &self,
        video: &Path,
        subtitles: &Path,
        output: &Path,
    ) -> FelliniResult<()>;

    /// Draw a watermark text overlay onto a video.
    async fn drawtext_watermark(
        &self,
        video: &Path,
        text: &str,
        output: &Path,
    ) -> FelliniResult<()>;

    /// Re-encode with host-recommended settings and faststart flags.
    async fn remux_faststart(&self, video: &Path, output: &Path) -> FelliniResult<()>;
}

/// A video publishing platform used by the uploader and optimizer stages.
#[async_trait]
pub trait VideoHost: Send + Sync {
    /// Upload a video with its metadata, returning the host's video id.
    async fn upload(
        &self,
        video: &Path,
        seo: &SeoMetadata,
    ) -> FelliniResult<String>;

    /// Attach a thumbnail to an uploaded video.
    async fn set_thumbnail(&self, video_id: &str, thumbnail: &Path) -> FelliniResult<()>;

    /// Fetch current statistics for a video.
    async fn statistics(&self, video_id: &str) -> FelliniResult<VideoStatistics>;

    /// Whether the host has usable credentials.
    fn is_configured(&self) -> bool;
}
