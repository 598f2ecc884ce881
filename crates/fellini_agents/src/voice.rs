//! Voiceover and subtitle agent.

use crate::MediaDirs;
use chrono::Utc;
use fellini_core::{GenerationConfig, StoryScript, VoiceType};
use fellini_error::{AgentError, AgentErrorKind, FelliniResult};
use fellini_interface::SpeechModel;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// Length of the silent placeholder clip in seconds.
const SILENT_DURATION_SECS: u32 = 10;
const SAMPLE_RATE: u32 = 44_100;
const CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;

/// Stride between subtitle start times when scenes carry no timing.
const SUBTITLE_STRIDE_SECS: u32 = 15;

/// Synthesizes per-scene voiceover and writes subtitles.
///
/// Each scene gets one attempt against the speech model; a failed scene is
/// replaced by a silent fixed-format WAV clip so the editor always has one
/// audio track per scene.
pub struct VoiceAgent {
    model: Box<dyn SpeechModel>,
    media: MediaDirs,
}

impl VoiceAgent {
    /// Create a voice agent from a speech model and media directories.
    pub fn new(model: Box<dyn SpeechModel>, media: MediaDirs) -> Self {
        Self { model, media }
    }

    /// Synthesize one audio clip per scene, in scene order.
    ///
    /// # Errors
    ///
    /// Only filesystem errors propagate; model failures produce silent clips.
    #[instrument(skip(self, script, config), fields(title = %script.title, scene_count = script.scenes.len()))]
    pub async fn voiceover(
        &self,
        script: &StoryScript,
        config: &GenerationConfig,
    ) -> FelliniResult<Vec<PathBuf>> {
        self.media.ensure()?;
        let speaker = speaker_id(config.voice);

        let mut paths = Vec::with_capacity(script.scenes.len());
        for (index, scene) in script.scenes.iter().enumerate() {
            let path = match self.model.synthesize(&scene.dialogue, speaker).await {
                Ok(bytes) => {
                    let path = self.media.audio().join(format!(
                        "voice_{index}_{}.wav",
                        Utc::now().timestamp_millis()
                    ));
                    self.write_audio(&path, &bytes).await?;
                    path
                }
                Err(e) => {
                    warn!(scene = index, error = %e, "Speech model unavailable, using silent audio");
                    self.write_silent(index).await?
                }
            };
            paths.push(path);
        }

        debug!(count = paths.len(), "Voiceover complete");
        Ok(paths)
    }

    async fn write_silent(&self, index: usize) -> FelliniResult<PathBuf> {
        let path = self.media.audio().join(format!(
            "silent_{index}_{}.wav",
            Utc::now().timestamp_millis()
        ));
        self.write_audio(&path, &silent_wav(SILENT_DURATION_SECS))
            .await?;
        Ok(path)
    }

    async fn write_audio(&self, path: &Path, bytes: &[u8]) -> FelliniResult<()> {
        tokio::fs::write(path, bytes).await.map_err(|e| {
            AgentError::new(AgentErrorKind::ArtifactWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()
        })
    }

    /// Write an SRT subtitle file for the script.
    ///
    /// Start times advance in fixed strides; each cue ends after the scene's
    /// own duration (10 seconds when the scene carries none).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    #[instrument(skip(self, script), fields(title = %script.title))]
    pub async fn subtitles(&self, script: &StoryScript) -> FelliniResult<PathBuf> {
        self.media.ensure()?;

        let mut srt = String::new();
        for (index, scene) in script.scenes.iter().enumerate() {
            let start = index as u32 * SUBTITLE_STRIDE_SECS;
            let end = start + scene.duration_secs.unwrap_or(10);
            srt.push_str(&format!(
                "{}\n{} --> {}\n{}\n\n",
                index + 1,
                format_srt_time(start),
                format_srt_time(end),
                scene.dialogue
            ));
        }

        let path = self.media.audio().join(format!(
            "subtitles_{}.srt",
            Utc::now().timestamp_millis()
        ));
        tokio::fs::write(&path, srt).await.map_err(|e| {
            AgentError::new(AgentErrorKind::ArtifactWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        Ok(path)
    }

    /// Write a background music placeholder for the genre.
    ///
    /// Real music sourcing is an external concern; the placeholder keeps the
    /// assembly manifest shape stable.
    #[instrument(skip(self))]
    pub async fn background_music(&self, genre: &str) -> FelliniResult<PathBuf> {
        self.media.ensure()?;

        let path = self.media.audio().join(format!(
            "music_{genre}_{}.mp3",
            Utc::now().timestamp_millis()
        ));
        tokio::fs::write(&path, b"placeholder").await.map_err(|e| {
            AgentError::new(AgentErrorKind::ArtifactWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        Ok(path)
    }
}

fn speaker_id(voice: VoiceType) -> &'static str {
    match voice {
        VoiceType::Male => "male_1",
        VoiceType::Female => "female_1",
        VoiceType::Neutral => "neutral_1",
    }
}

/// Build a silent PCM WAV clip: 44-byte RIFF/WAVE header followed by zeroed
/// samples. 44.1 kHz, mono, 16-bit, fixed duration regardless of input text.
fn silent_wav(duration_secs: u32) -> Vec<u8> {
    let num_samples = SAMPLE_RATE * duration_secs;
    let data_len = num_samples * 2;
    let byte_rate = SAMPLE_RATE * u32::from(CHANNELS) * u32::from(BITS_PER_SAMPLE) / 8;
    let block_align = CHANNELS * BITS_PER_SAMPLE / 8;

    let mut wav = Vec::with_capacity(44 + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes()); // fmt chunk size
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&CHANNELS.to_le_bytes());
    wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.resize(44 + data_len as usize, 0);
    wav
}

fn format_srt_time(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02},000")
}
