//! FFmpeg-backed transcoder.

use async_trait::async_trait;
use fellini_error::{AgentError, AgentErrorKind, FelliniResult};
use fellini_interface::Transcoder;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

/// Seconds each still image is held in the slideshow.
const SLIDE_DURATION_SECS: u32 = 10;

/// Transcoder that shells out to the `ffmpeg` binary.
#[derive(Debug, Clone, Default)]
pub struct FfmpegTranscoder;

impl FfmpegTranscoder {
    /// Create a new transcoder.
    pub fn new() -> Self {
        Self
    }

    /// Run ffmpeg with the given arguments, failing on a non-zero exit.
    async fn run(&self, args: &[&str]) -> FelliniResult<()> {
        debug!(args = ?args, "Invoking ffmpeg");

        let output = Command::new("ffmpeg")
            .arg("-y")
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                AgentError::new(AgentErrorKind::ToolFailed(format!(
                    "Failed to spawn ffmpeg: {e}"
                )))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(stderr = %stderr, "ffmpeg exited with failure");
            return Err(AgentError::new(AgentErrorKind::ToolFailed(format!(
                "ffmpeg exited with {}: {}",
                output.status, stderr
            )))
            .into());
        }

        Ok(())
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn available(&self) -> bool {
        Command::new("ffmpeg")
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }

    #[instrument(skip(self, images), fields(image_count = images.len(), output = %output.display()))]
    async fn concat_slideshow(&self, images: &[PathBuf], output: &Path) -> FelliniResult<()> {
        // ffmpeg's concat demuxer reads the clip list from a file
        let concat_file = output.with_extension("concat.txt");
        let mut listing = String::new();
        for image in images {
            listing.push_str(&format!(
                "file '{}'\nduration {}\n",
                image.display(),
                SLIDE_DURATION_SECS
            ));
        }
        tokio::fs::write(&concat_file, listing).await.map_err(|e| {
            AgentError::new(AgentErrorKind::ArtifactWrite(format!(
                "{}: {}",
                concat_file.display(),
                e
            )))
        })?;

        let concat_arg = concat_file.to_string_lossy().to_string();
        let output_arg = output.to_string_lossy().to_string();
        let result = self
            .run(&[
                "-f",
                "concat",
                "-safe",
                "0",
                "-i",
                &concat_arg,
                "-vf",
                "fps=30,scale=1080:1920:force_original_aspect_ratio=decrease,\
                 pad=1080:1920:(ow-iw)/2:(oh-ih)/2",
                "-c:v",
                "libx264",
                "-pix_fmt",
                "yuv420p",
                &output_arg,
            ])
            .await;

        tokio::fs::remove_file(&concat_file).await.ok();
        result
    }

    #[instrument(skip(self), fields(video = %video.display(), audio = %audio.display()))]
    async fn mux_audio(&self, video: &Path, audio: &Path, output: &Path) -> FelliniResult<()> {
        let video_arg = video.to_string_lossy().to_string();
        let audio_arg = audio.to_string_lossy().to_string();
        let output_arg = output.to_string_lossy().to_string();
        self.run(&[
            "-i", &video_arg, "-i", &audio_arg, "-c:v", "copy", "-c:a", "aac", "-shortest",
            &output_arg,
        ])
        .await
    }

    #[instrument(skip(self), fields(video = %video.display(), subtitles = %subtitles.display()))]
    async fn burn_subtitles(
        &self,
        video: &Path,
        subtitles: &Path,
        output: &Path,
    ) -> FelliniResult<()> {
        let filter = format!(
            "subtitles={}:force_style='FontSize=24,PrimaryColour=&H00FFFFFF,\
             OutlineColour=&H00000000,BorderStyle=1,Outline=2,Shadow=1,MarginV=20'",
            subtitles.display()
        );
        let video_arg = video.to_string_lossy().to_string();
        let output_arg = output.to_string_lossy().to_string();
        self.run(&["-i", &video_arg, "-vf", &filter, "-c:a", "copy", &output_arg])
            .await
    }

    #[instrument(skip(self), fields(video = %video.display()))]
    async fn drawtext_watermark(
        &self,
        video: &Path,
        text: &str,
        output: &Path,
    ) -> FelliniResult<()> {
        let filter = format!(
            "drawtext=text='{text}':fontsize=30:fontcolor=white@0.5:x=10:y=10"
        );
        let video_arg = video.to_string_lossy().to_string();
        let output_arg = output.to_string_lossy().to_string();
        self.run(&["-i", &video_arg, "-vf", &filter, "-c:a", "copy", &output_arg])
            .await
    }

    #[instrument(skip(self), fields(video = %video.display()))]
    async fn remux_faststart(&self, video: &Path, output: &Path) -> FelliniResult<()> {
        let video_arg = video.to_string_lossy().to_string();
        let output_arg = output.to_string_lossy().to_string();
        self.run(&[
            "-i",
            &video_arg,
            "-c:v",
            "libx264",
            "-preset",
            "slow",
            "-crf",
            "18",
            "-c:a",
            "aac",
            "-b:a",
            "192k",
            "-ar",
            "48000",
            "-movflags",
            "+faststart",
            &output_arg,
        ])
        .await
    }
}
