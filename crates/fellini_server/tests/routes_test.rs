//! Router tests over a fallback-only orchestrator.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use fellini_agents::{
    EditorAgent, MediaDirs, OptimizerAgent, ScriptAgent, SeoAgent, TrendAgent, UploaderAgent,
    VisualAgent, VoiceAgent,
};
use fellini_core::{SeoMetadata, VideoStatistics};
use fellini_error::{AgentError, AgentErrorKind, FelliniResult};
use fellini_interface::{ImageModel, ImageRequest, SpeechModel, TextModel, Transcoder, VideoHost};
use fellini_pipeline::{Agents, Orchestrator, PipelineConfig};
use fellini_store::RecordStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower::util::ServiceExt;

struct Down;

#[async_trait]
impl TextModel for Down {
    async fn complete(&self, _prompt: &str) -> FelliniResult<String> {
        Err(AgentError::new(AgentErrorKind::Unreachable("llm".to_string())).into())
    }

    fn provider_name(&self) -> &'static str {
        "down"
    }
}

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

#[async_trait]
impl VideoHost for Down {
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

fn build_orchestrator(dir: &Path) -> Arc<Orchestrator> {
    let store = RecordStore::open(dir.join("data")).unwrap();
    let media = MediaDirs::new(dir.join("generated"));

    let agents = Agents {
        trend: TrendAgent::new(store.clone()),
        script: ScriptAgent::new(Box::new(Down), store.clone()),
        visual: VisualAgent::new(Box::new(Down), media.clone()),
        voice: VoiceAgent::new(Box::new(Down), media.clone()),
        editor: EditorAgent::new(Box::new(Down), media),
        seo: SeoAgent::new(),
        uploader: UploaderAgent::new(Box::new(Down)),
    };
    let optimizer = OptimizerAgent::new(None, store.clone());

    let config = PipelineConfig {
        batch_delay_secs: 0,
        analytics_delay_secs: 0,
    };

    Arc::new(Orchestrator::new(agents, optimizer, store, config))
}

#[tokio::test]
async fn generate_returns_a_published_project() {
    let dir = tempfile::tempdir().unwrap();
    let app = fellini_server::router(build_orchestrator(dir.path()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"style": "anime", "voiceType": "neutral"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let project: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(project["status"], "published");
    assert!(project["youtube_id"].as_str().unwrap().starts_with("sim_"));
}

#[tokio::test]
async fn projects_lists_stored_records() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = build_orchestrator(dir.path());

    orchestrator
        .produce(&fellini_core::GenerationConfig::default())
        .await
        .unwrap();

    let app = fellini_server::router(orchestrator);
    let response = app
        .oneshot(Request::builder().uri("/projects").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let listing: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(listing["projects"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn analytics_returns_the_aggregate_report() {
    let dir = tempfile::tempdir().unwrap();
    let app = fellini_server::router(build_orchestrator(dir.path()));

    let response = app
        .oneshot(Request::builder().uri("/analytics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let report: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(report["total_videos"], 0);
    assert!(report["recommendations"].as_array().is_some());
}
