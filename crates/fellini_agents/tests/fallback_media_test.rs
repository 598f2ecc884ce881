//! Integration tests for fallback media artifacts written to disk.

use async_trait::async_trait;
use chrono::Utc;
use fellini_agents::{EditorAgent, MediaDirs, VisualAgent, VoiceAgent};
use fellini_core::{GenerationConfig, Genre, ScriptScene, StoryScript};
use fellini_error::{AgentError, AgentErrorKind, FelliniResult};
use fellini_interface::{ImageModel, ImageRequest, SpeechModel, Transcoder};
use std::path::{Path, PathBuf};
use uuid::Uuid;

struct Down;

#[async_trait]
impl ImageModel for Down {
    async fn render(&self, _request: &ImageRequest) -> FelliniResult<Vec<u8>> {
        Err(AgentError::new(AgentErrorKind::Unreachable("image".to_string())).into())
    }

    fn provider_name(&self) -> &'static str {
        "down"
    }
}

#[async_trait]
impl SpeechModel for Down {
    async fn synthesize(&self, _text: &str, _speaker: &str) -> FelliniResult<Vec<u8>> {
        Err(AgentError::new(AgentErrorKind::Unreachable("tts".to_string())).into())
    }

    fn provider_name(&self) -> &'static str {
        "down"
    }
}

#[async_trait]
impl Transcoder for Down {
    async fn available(&self) -> bool {
        false
    }

    async fn concat_slideshow(&self, _images: &[PathBuf], _output: &Path) -> FelliniResult<()> {
        unreachable!()
    }

    async fn mux_audio(&self, _video: &Path, _audio: &Path, _output: &Path) -> FelliniResult<()> {
        unreachable!()
    }

    async fn burn_subtitles(
        &self,
        _video: &Path,
        _subtitles: &Path,
        _output: &Path,
    ) -> FelliniResult<()> {
        unreachable!()
    }

    async fn drawtext_watermark(
        &self,
        _video: &Path,
        _text: &str,
        _output: &Path,
    ) -> FelliniResult<()> {
        unreachable!()
    }

    async fn remux_faststart(&self, _video: &Path, _output: &Path) -> FelliniResult<()> {
        unreachable!()
    }
}

fn sample_script() -> StoryScript {
    StoryScript {
        id: Uuid::new_v4(),
        title: "They Never Left".to_string(),
        genre: Genre::Horror,
        hook: "I can see them. Why can't you?".to_string(),
        scenes: vec![
            ScriptScene {
                scene: "apartment-dark".to_string(),
                dialogue: "There's someone standing behind you.".to_string(),
                visual_description: Some("Shadow figure in mirror reflection".to_string()),
                duration_secs: Some(10),
                emotion: Some("fear".to_string()),
            },
            ScriptScene {
                scene: "hallway".to_string(),
                dialogue: "They've been here the whole time.".to_string(),
                visual_description: None,
                duration_secs: Some(12),
                emotion: Some("terror".to_string()),
            },
        ],
        duration_secs: 60,
        created_at: Utc::now(),
        metadata: None,
    }
}

#[tokio::test]
async fn storyboard_writes_one_placeholder_per_scene() {
    let dir = tempfile::tempdir().unwrap();
    let agent = VisualAgent::new(Box::new(Down), MediaDirs::new(dir.path()));
    let script = sample_script();

    let images = agent
        .storyboard(&script, &GenerationConfig::default())
        .await
        .unwrap();

    assert_eq!(images.len(), script.scenes.len());
    for image in &images {
        assert!(image.exists());
        assert_eq!(image.extension().unwrap(), "svg");
        let contents = std::fs::read_to_string(image).unwrap();
        assert!(contents.starts_with("<svg"));
    }
}

#[tokio::test]
async fn thumbnail_carries_title_and_genre() {
    let dir = tempfile::tempdir().unwrap();
    let agent = VisualAgent::new(Box::new(Down), MediaDirs::new(dir.path()));
    let script = sample_script();

    let thumbnail = agent.thumbnail(&script).await.unwrap();
    let contents = std::fs::read_to_string(&thumbnail).unwrap();
    assert!(contents.contains("They Never Left"));
    assert!(contents.contains("HORROR"));
}

#[tokio::test]
async fn voiceover_falls_back_to_ten_second_silence() {
    let dir = tempfile::tempdir().unwrap();
    let agent = VoiceAgent::new(Box::new(Down), MediaDirs::new(dir.path()));
    let script = sample_script();

    let audio = agent
        .voiceover(&script, &GenerationConfig::default())
        .await
        .unwrap();

    assert_eq!(audio.len(), script.scenes.len());
    for clip in &audio {
        let bytes = std::fs::read(clip).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        // 44-byte header + 10 s of 16-bit mono samples at 44.1 kHz
        assert_eq!(bytes.len(), 44 + 44_100 * 10 * 2);
    }
}

#[tokio::test]
async fn subtitles_use_srt_cue_format() {
    let dir = tempfile::tempdir().unwrap();
    let agent = VoiceAgent::new(Box::new(Down), MediaDirs::new(dir.path()));
    let script = sample_script();

    let srt_path = agent.subtitles(&script).await.unwrap();
    let contents = std::fs::read_to_string(&srt_path).unwrap();

    assert!(contents.starts_with("1\n00:00:00,000 --> 00:00:10,000\n"));
    assert!(contents.contains("2\n00:00:15,000 --> 00:00:27,000\n"));
    assert!(contents.contains("There's someone standing behind you."));
}

#[tokio::test]
async fn assembly_without_transcoder_writes_a_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let media = MediaDirs::new(dir.path());
    let editor = EditorAgent::new(Box::new(Down), media.clone());
    let script = sample_script();

    let images = vec![PathBuf::from("a.svg"), PathBuf::from("b.svg")];
    let audio = vec![PathBuf::from("a.wav"), PathBuf::from("b.wav")];

    let output = editor
        .assemble(&script, &images, &audio, Path::new("subs.srt"))
        .await
        .unwrap();

    assert_eq!(output.extension().unwrap(), "json");
    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(manifest["title"], "They Never Left");
    assert_eq!(manifest["scenes"].as_array().unwrap().len(), 2);
    assert_eq!(manifest["scenes"][0]["image"], "a.svg");
    assert_eq!(manifest["scenes"][1]["duration"], 12);
}

#[tokio::test]
async fn background_music_writes_a_placeholder_track() {
    let dir = tempfile::tempdir().unwrap();
    let agent = VoiceAgent::new(Box::new(Down), MediaDirs::new(dir.path()));

    let music = agent.background_music("horror").await.unwrap();
    assert!(music.exists());
    assert!(music
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("music_horror_"));
}

#[tokio::test]
async fn watermark_passes_through_without_transcoder() {
    let dir = tempfile::tempdir().unwrap();
    let editor = EditorAgent::new(Box::new(Down), MediaDirs::new(dir.path()));

    let input = Path::new("/tmp/video.mp4");
    let output = editor.watermark(input, "fellini").await.unwrap();
    assert_eq!(output, input);
}
