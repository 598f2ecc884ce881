//! Video assembly agent.

use crate::MediaDirs;
use chrono::Utc;
use fellini_core::StoryScript;
use fellini_error::{AgentError, AgentErrorKind, FelliniResult};
use fellini_interface::Transcoder;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// Assembles the final video from scene images, audio clips, and subtitles.
///
/// When the transcoder is unavailable the agent writes a JSON manifest
/// describing the timeline instead, so downstream stages still receive a
/// playable artifact reference. Unlike the generation agents, unexpected
/// errors here abort the pipeline run.
pub struct EditorAgent {
    transcoder: Box<dyn Transcoder>,
    media: MediaDirs,
}

impl EditorAgent {
    /// Create an editor agent from a transcoder and media directories.
    pub fn new(transcoder: Box<dyn Transcoder>, media: MediaDirs) -> Self {
        Self { transcoder, media }
    }

    /// Assemble the video, returning the output path.
    ///
    /// # Errors
    ///
    /// Returns an error if a transcoder step or a filesystem write fails.
    #[instrument(skip_all, fields(title = %script.title, images = images.len(), audio = audio.len()))]
    pub async fn assemble(
        &self,
        script: &StoryScript,
        images: &[PathBuf],
        audio: &[PathBuf],
        subtitles: &Path,
    ) -> FelliniResult<PathBuf> {
        self.media.ensure()?;

        if self.transcoder.available().await {
            self.assemble_with_transcoder(images, audio, subtitles).await
        } else {
            warn!("Transcoder not available, writing timeline manifest");
            self.write_manifest(script, images, audio).await
        }
    }

    async fn assemble_with_transcoder(
        &self,
        images: &[PathBuf],
        audio: &[PathBuf],
        subtitles: &Path,
    ) -> FelliniResult<PathBuf> {
        let stamp = Utc::now().timestamp_millis();
        let slideshow = self.media.videos().join(format!("temp_video_{stamp}.mp4"));
        let with_audio = self.media.videos().join(format!("temp_audio_{stamp}.mp4"));
        let output = self.media.videos().join(format!("video_{stamp}.mp4"));

        self.transcoder.concat_slideshow(images, &slideshow).await?;

        // Timing across clips is settled at the subtitle layer; only the
        // first track is muxed
        match audio.first() {
            Some(track) => {
                self.transcoder
                    .mux_audio(&slideshow, track, &with_audio)
                    .await?;
            }
            None => {
                tokio::fs::copy(&slideshow, &with_audio).await.map_err(|e| {
                    AgentError::new(AgentErrorKind::ArtifactWrite(format!(
                        "{}: {}",
                        with_audio.display(),
                        e
                    )))
                })?;
            }
        }

        self.transcoder
            .burn_subtitles(&with_audio, subtitles, &output)
            .await?;

        tokio::fs::remove_file(&slideshow).await.ok();
        tokio::fs::remove_file(&with_audio).await.ok();

        debug!(path = %output.display(), "Video assembled");
        Ok(output)
    }

    async fn write_manifest(
        &self,
        script: &StoryScript,
        images: &[PathBuf],
        audio: &[PathBuf],
    ) -> FelliniResult<PathBuf> {
        let scenes: Vec<_> = script
            .scenes
            .iter()
            .enumerate()
            .map(|(i, scene)| {
                json!({
                    "dialogue": scene.dialogue,
                    "image": images.get(i).map(|p| p.display().to_string()),
                    "audio": audio.get(i).map(|p| p.display().to_string()),
                    "duration": scene.duration_secs.unwrap_or(10),
                    "emotion": scene.emotion,
                })
            })
            .collect();

        let manifest = json!({
            "id": script.id,
            "title": script.title,
            "genre": script.genre,
            "duration": script.duration_secs,
            "scenes": scenes,
            "createdAt": Utc::now(),
        });

        let path = self.media.videos().join(format!(
            "manifest_{}.json",
            Utc::now().timestamp_millis()
        ));
        let contents = serde_json::to_string_pretty(&manifest).map_err(|e| {
            AgentError::new(AgentErrorKind::ArtifactWrite(e.to_string()))
        })?;
        tokio::fs::write(&path, contents).await.map_err(|e| {
            AgentError::new(AgentErrorKind::ArtifactWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        debug!(path = %path.display(), "Timeline manifest written");
        Ok(path)
    }

    /// Overlay a watermark text on the video.
    ///
    /// Passes the input through unchanged when no transcoder is available.
    #[instrument(skip(self), fields(video = %video.display()))]
    pub async fn watermark(&self, video: &Path, text: &str) -> FelliniResult<PathBuf> {
        if !self.transcoder.available().await {
            return Ok(video.to_path_buf());
        }

        let output = sibling(video, "watermarked");
        self.transcoder
            .drawtext_watermark(video, text, &output)
            .await?;
        Ok(output)
    }

    /// Re-encode the video with host-recommended settings.
    ///
    /// Passes the input through unchanged when no transcoder is available.
    #[instrument(skip(self), fields(video = %video.display()))]
    pub async fn optimize_for_upload(&self, video: &Path) -> FelliniResult<PathBuf> {
        if !self.transcoder.available().await {
            return Ok(video.to_path_buf());
        }

        let output = sibling(video, "optimized");
        self.transcoder.remux_faststart(video, &output).await?;
        Ok(output)
    }
}

fn sibling(video: &Path, prefix: &str) -> PathBuf {
    let name = video
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "video.mp4".to_string());
    video
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!("{prefix}_{name}"))
}
