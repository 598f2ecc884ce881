//! End-to-end pipeline tests using fake capability clients.
//!
//! Every external dependency is faked as unreachable, so the pipeline runs
//! entirely on fallback paths: template scripts, SVG placeholders, silent
//! audio, manifest assembly, and simulated uploads.

use async_trait::async_trait;
use fellini_agents::{
    EditorAgent, MediaDirs, OptimizerAgent, ScriptAgent, SeoAgent, TrendAgent, UploaderAgent,
    VisualAgent, VoiceAgent,
};
use fellini_core::{
    serialized_tag_len, GenerationConfig, ProjectStatus, SeoMetadata, VideoStatistics,
    MAX_TAGS_SERIALIZED_LEN, MAX_TITLE_LEN,
};
use fellini_error::{AgentError, AgentErrorKind, FelliniResult};
use fellini_interface::{ImageModel, ImageRequest, SpeechModel, TextModel, Transcoder, VideoHost};
use fellini_pipeline::{Agents, Orchestrator, PipelineConfig};
use fellini_store::RecordStore;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

struct DownTextModel;

#[async_trait]
impl TextModel for DownTextModel {
    async fn complete(&self, _prompt: &str) -> FelliniResult<String> {
        Err(AgentError::new(AgentErrorKind::Unreachable("llm".to_string())).into())
    }

    fn provider_name(&self) -> &'static str {
        "down"
    }
}

struct DownImageModel;

#[async_trait]
impl ImageModel for DownImageModel {
    async fn render(&self, _request: &ImageRequest) -> FelliniResult<Vec<u8>> {
        Err(AgentError::new(AgentErrorKind::Unreachable("image".to_string())).into())
    }

    fn provider_name(&self) -> &'static str {
        "down"
    }
}

struct DownSpeechModel;

#[async_trait]
impl SpeechModel for DownSpeechModel {
    async fn synthesize(&self, _text: &str, _speaker: &str) -> FelliniResult<Vec<u8>> {
        Err(AgentError::new(AgentErrorKind::Unreachable("tts".to_string())).into())
    }

    fn provider_name(&self) -> &'static str {
        "down"
    }
}

/// Transcoder that is never available, forcing manifest assembly.
struct AbsentTranscoder;

#[async_trait]
impl Transcoder for AbsentTranscoder {
    async fn available(&self) -> bool {
        false
    }

    async fn concat_slideshow(&self, _images: &[PathBuf], _output: &Path) -> FelliniResult<()> {
        unreachable!("assembly must not be attempted when unavailable")
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

/// Transcoder that claims availability and fails on a chosen assembly run.
struct FailOnNthAssembly {
    calls: AtomicUsize,
    fail_on: usize,
}

impl FailOnNthAssembly {
    fn new(fail_on: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_on,
        }
    }

    async fn touch(output: &Path) -> FelliniResult<()> {
        tokio::fs::write(output, b"video").await.map_err(|e| {
            AgentError::new(AgentErrorKind::ArtifactWrite(e.to_string())).into()
        })
    }
}

#[async_trait]
impl Transcoder for FailOnNthAssembly {
    async fn available(&self) -> bool {
        true
    }

    async fn concat_slideshow(&self, _images: &[PathBuf], output: &Path) -> FelliniResult<()> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on {
            return Err(AgentError::new(AgentErrorKind::ToolFailed(format!(
                "forced failure on assembly {call}"
            )))
            .into());
        }
        Self::touch(output).await
    }

    async fn mux_audio(&self, _video: &Path, _audio: &Path, output: &Path) -> FelliniResult<()> {
        Self::touch(output).await
    }

    async fn burn_subtitles(
        &self,
        _video: &Path,
        _subtitles: &Path,
        output: &Path,
    ) -> FelliniResult<()> {
        Self::touch(output).await
    }

    async fn drawtext_watermark(
        &self,
        _video: &Path,
        _text: &str,
        output: &Path,
    ) -> FelliniResult<()> {
        Self::touch(output).await
    }

    async fn remux_faststart(&self, _video: &Path, output: &Path) -> FelliniResult<()> {
        Self::touch(output).await
    }
}

struct UnconfiguredHost;

#[async_trait]
impl VideoHost for UnconfiguredHost {
    async fn upload(&self, _video: &Path, _seo: &SeoMetadata) -> FelliniResult<String> {
        Err(AgentError::new(AgentErrorKind::MissingCredentials("host".to_string())).into())
    }

    async fn set_thumbnail(&self, _video_id: &str, _thumbnail: &Path) -> FelliniResult<()> {
        Ok(())
    }

    async fn statistics(&self, _video_id: &str) -> FelliniResult<VideoStatistics> {
        Err(AgentError::new(AgentErrorKind::MissingCredentials("host".to_string())).into())
    }

    fn is_configured(&self) -> bool {
        false
    }
}

fn build_orchestrator(dir: &Path, transcoder: Box<dyn Transcoder>) -> Orchestrator {
    let store = RecordStore::open(dir.join("data")).unwrap();
    let media = MediaDirs::new(dir.join("generated"));

    let agents = Agents {
        trend: TrendAgent::new(store.clone()),
        script: ScriptAgent::new(Box::new(DownTextModel), store.clone()),
        visual: VisualAgent::new(Box::new(DownImageModel), media.clone()),
        voice: VoiceAgent::new(Box::new(DownSpeechModel), media.clone()),
        editor: EditorAgent::new(transcoder, media),
        seo: SeoAgent::new(),
        uploader: UploaderAgent::new(Box::new(UnconfiguredHost)),
    };
    let optimizer = OptimizerAgent::new(None, store.clone());

    let config = PipelineConfig {
        batch_delay_secs: 0,
        analytics_delay_secs: 0,
    };

    Orchestrator::new(agents, optimizer, store, config)
}

#[tokio::test]
async fn pipeline_publishes_entirely_on_fallbacks() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = build_orchestrator(dir.path(), Box::new(AbsentTranscoder));

    let project = orchestrator
        .produce(&GenerationConfig::default())
        .await
        .unwrap();

    assert_eq!(project.status, ProjectStatus::Published);

    // Simulated upload still yields a non-empty id
    let video_id = project.youtube_id.as_deref().unwrap();
    assert!(video_id.starts_with("sim_"));
    assert!(project.uploaded_at.is_some());

    // Manifest assembly stood in for the transcoder
    let video_path = project.video_path.as_deref().unwrap();
    assert!(video_path.contains("manifest_"));
    assert!(Path::new(video_path).exists());

    // SEO respected the host limits
    let seo = project.seo.as_ref().unwrap();
    assert!(seo.title.chars().count() <= MAX_TITLE_LEN);
    assert!(serialized_tag_len(&seo.tags) <= MAX_TAGS_SERIALIZED_LEN);

    // The script persisted earlier in the same run
    let script = orchestrator
        .store()
        .project(project.id)
        .await
        .unwrap()
        .unwrap()
        .script_id;
    assert!(orchestrator.store().script(script).await.unwrap().is_some());
}

#[tokio::test]
async fn repeated_runs_reuse_the_template_deterministically() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = build_orchestrator(dir.path(), Box::new(AbsentTranscoder));
    let config = GenerationConfig::default();

    let first = orchestrator.produce(&config).await.unwrap();
    let second = orchestrator.produce(&config).await.unwrap();

    let first_script = orchestrator
        .store()
        .script(first.script_id)
        .await
        .unwrap()
        .unwrap();
    let second_script = orchestrator
        .store()
        .script(second.script_id)
        .await
        .unwrap()
        .unwrap();

    // Same topic, same genre, no live model: identical template output
    assert_eq!(first_script.title, second_script.title);
    assert_eq!(first_script.scenes.len(), second_script.scenes.len());
    assert_ne!(first_script.id, second_script.id);

    // Distinct simulated ids per run
    assert_ne!(first.youtube_id, second.youtube_id);
}

#[tokio::test]
async fn assembly_failure_marks_project_failed_and_reraises() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator =
        build_orchestrator(dir.path(), Box::new(FailOnNthAssembly::new(1)));

    let result = orchestrator.produce(&GenerationConfig::default()).await;
    assert!(result.is_err());

    let projects = orchestrator.store().projects().await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].status, ProjectStatus::Failed);
    // The failure hit during assembly, after the Editing persist
    assert!(projects[0].video_path.is_none());
    assert!(projects[0].youtube_id.is_none());
}

#[tokio::test]
async fn batch_isolates_a_mid_batch_failure() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator =
        build_orchestrator(dir.path(), Box::new(FailOnNthAssembly::new(2)));

    let results = orchestrator
        .produce_batch(3, &GenerationConfig::default())
        .await;

    assert_eq!(results.len(), 3);
    assert_eq!(results.iter().filter(|r| r.is_none()).count(), 1);
    assert!(results[0].is_some());
    assert!(results[1].is_none());
    assert!(results[2].is_some());

    for project in results.iter().flatten() {
        assert_eq!(project.status, ProjectStatus::Published);
        assert!(project.youtube_id.is_some());
        assert!(project.seo.is_some());
    }
}

#[tokio::test]
async fn detached_analytics_lands_without_blocking_the_caller() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = build_orchestrator(dir.path(), Box::new(AbsentTranscoder));

    let project = orchestrator
        .produce(&GenerationConfig::default())
        .await
        .unwrap();
    let video_id = project.youtube_id.unwrap();

    // The refresh runs on its own task with no ordering guarantee; poll
    let mut analytics = None;
    for _ in 0..50 {
        analytics = orchestrator.store().analytics(&video_id).await.unwrap();
        if analytics.is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    let analytics = analytics.expect("detached refresh should persist analytics");
    assert_eq!(analytics.video_id, video_id);
    assert!(analytics.views > 0);

    // The learning pass also ran
    let mut memory = None;
    for _ in 0..50 {
        memory = orchestrator
            .store()
            .memory("performance_patterns")
            .await
            .unwrap();
        if memory.is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(memory.is_some());
}

#[tokio::test]
async fn analytics_report_aggregates_stored_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = build_orchestrator(dir.path(), Box::new(AbsentTranscoder));

    orchestrator.optimizer().refresh("vid_a").await.unwrap();
    orchestrator.optimizer().refresh("vid_b").await.unwrap();

    let report = orchestrator.analytics_report().await.unwrap();
    assert_eq!(report.total_videos, 2);
    assert!(report.total_views > 0);
    assert!(report.avg_ctr > 0.0);
    assert!(!report.recommendations.is_empty());
}
