//! The pipeline orchestrator.
//!
//! Drives the fixed eight-step sequence — trends, script, visuals, voice,
//! assembly, SEO, upload, analytics — persisting the project record after
//! each status change. Strictly sequential: every stage is awaited before the
//! next begins; the only concurrency is the detached analytics refresh, which
//! is spawned without being awaited and carries no ordering guarantee
//! relative to the returned project.

use crate::{FelliniConfig, PipelineConfig};
use fellini_agents::clients::{
    CoquiTtsClient, FfmpegTranscoder, OllamaClient, StableDiffusionClient, YouTubeClient,
};
use fellini_agents::{
    EditorAgent, MediaDirs, OptimizerAgent, PerformanceReport, ScriptAgent, SeoAgent, TrendAgent,
    UploaderAgent, VisualAgent, VoiceAgent, YouTubeConfig,
};
use fellini_core::{GenerationConfig, ProjectStatus, VideoProject};
use fellini_error::{FelliniResult, PipelineError, PipelineErrorKind};
use fellini_store::{RecordStore, TokenStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// The generation agent roster the orchestrator drives.
///
/// The optimizer sits outside the roster: the detached analytics task needs
/// a shared handle to it.
pub struct Agents {
    /// Trend discovery
    pub trend: TrendAgent,
    /// Script writing
    pub script: ScriptAgent,
    /// Scene images and thumbnails
    pub visual: VisualAgent,
    /// Voiceover and subtitles
    pub voice: VoiceAgent,
    /// Video assembly
    pub editor: EditorAgent,
    /// Upload metadata
    pub seo: SeoAgent,
    /// Publishing
    pub uploader: UploaderAgent,
}

/// Drives the fixed video-generation pipeline.
pub struct Orchestrator {
    agents: Agents,
    optimizer: Arc<OptimizerAgent>,
    store: RecordStore,
    config: PipelineConfig,
}

impl Orchestrator {
    /// Create an orchestrator from an agent roster, an optimizer, a store,
    /// and pacing config.
    pub fn new(
        agents: Agents,
        optimizer: OptimizerAgent,
        store: RecordStore,
        config: PipelineConfig,
    ) -> Self {
        Self {
            agents,
            optimizer: Arc::new(optimizer),
            store,
            config,
        }
    }

    /// Wire up the live agents from configuration and environment
    /// credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the store or media directories cannot be created.
    pub fn from_config(config: &FelliniConfig) -> FelliniResult<Self> {
        let store = RecordStore::open(&config.store_dir)?;
        let media = MediaDirs::new(&config.media_dir);
        media.ensure()?;

        let youtube_config = YouTubeConfig::from_env();
        let tokens = TokenStore::new(&config.token_file);

        let agents = Agents {
            trend: TrendAgent::new(store.clone()),
            script: ScriptAgent::new(
                Box::new(OllamaClient::new(config.llm.clone())),
                store.clone(),
            ),
            visual: VisualAgent::new(
                Box::new(StableDiffusionClient::new(config.image.clone())),
                media.clone(),
            ),
            voice: VoiceAgent::new(
                Box::new(CoquiTtsClient::new(config.tts.clone())),
                media.clone(),
            ),
            editor: EditorAgent::new(Box::new(FfmpegTranscoder::new()), media),
            seo: SeoAgent::new(),
            uploader: UploaderAgent::new(Box::new(YouTubeClient::new(
                youtube_config.clone(),
                tokens.clone(),
            ))),
        };

        let optimizer = OptimizerAgent::new(
            Some(Box::new(YouTubeClient::new(youtube_config, tokens))),
            store.clone(),
        );

        Ok(Self::new(agents, optimizer, store, config.pipeline.clone()))
    }

    /// The record store this orchestrator persists to.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// The analytics agent, for report and projection queries.
    pub fn optimizer(&self) -> &OptimizerAgent {
        &self.optimizer
    }

    /// Run the full pipeline once and return the published project.
    ///
    /// All-or-nothing up to publication: any unexpected error aborts the
    /// remaining stages, marks the stored project `failed` (when a record
    /// already exists), and re-raises. The detached analytics refresh never
    /// surfaces its own failures here.
    ///
    /// # Errors
    ///
    /// Returns the first stage or store error encountered.
    #[instrument(skip(self, config))]
    pub async fn produce(&self, config: &GenerationConfig) -> FelliniResult<VideoProject> {
        info!("Starting video generation pipeline");
        let project_id = Uuid::new_v4();

        match self.run_stages(project_id, config).await {
            Ok(project) => {
                info!(
                    project_id = %project.id,
                    video_id = project.youtube_id.as_deref().unwrap_or(""),
                    "Video generation complete"
                );
                Ok(project)
            }
            Err(e) => {
                error!(project_id = %project_id, error = %e, "Pipeline failed");
                self.mark_failed(project_id).await;
                Err(e)
            }
        }
    }

    async fn run_stages(
        &self,
        project_id: Uuid,
        config: &GenerationConfig,
    ) -> FelliniResult<VideoProject> {
        // Step 1: trends
        info!("Step 1/8: Analyzing trends");
        self.agents.trend.scan().await;
        let topic = self.agents.trend.top_topic();
        info!(topic = %topic.topic, genre = %topic.genre, "Selected trend");

        // Step 2: script
        info!("Step 2/8: Generating script");
        let script = self.agents.script.write(&topic).await?.into_inner();
        info!(title = %script.title, "Script created");

        let mut project = VideoProject::new(project_id, script.id, ProjectStatus::Generating);
        self.store.save_project(&project).await?;

        let effective = GenerationConfig {
            genre: Some(config.genre.unwrap_or(script.genre)),
            ..config.clone()
        };

        // Step 3: visuals
        info!("Step 3/8: Generating visuals");
        let images = self.agents.visual.storyboard(&script, &effective).await?;
        let thumbnail = self.agents.visual.thumbnail(&script).await?;
        info!(count = images.len(), "Scene images and thumbnail ready");

        // Step 4: voice
        info!("Step 4/8: Generating voiceover");
        let audio = self.agents.voice.voiceover(&script, &effective).await?;
        let subtitles = self.agents.voice.subtitles(&script).await?;
        info!(count = audio.len(), "Audio clips and subtitles ready");

        // Step 5: assembly
        info!("Step 5/8: Assembling video");
        advance(&mut project, ProjectStatus::Editing)?;
        self.store.save_project(&project).await?;

        let video = self
            .agents
            .editor
            .assemble(&script, &images, &audio, &subtitles)
            .await?;
        info!(path = %video.display(), "Video assembled");

        // Step 6: SEO
        info!("Step 6/8: Generating SEO metadata");
        let seo = self.agents.seo.metadata(&script, &thumbnail);
        info!(title = %seo.title, "Metadata ready");

        project.video_path = Some(video.display().to_string());
        project.thumbnail_path = Some(thumbnail.display().to_string());
        project.seo = Some(seo.clone());
        advance(&mut project, ProjectStatus::Rendering)?;
        self.store.save_project(&project).await?;

        // Step 7: upload
        info!("Step 7/8: Uploading");
        advance(&mut project, ProjectStatus::Uploading)?;
        self.store.save_project(&project).await?;

        let video_id = self
            .agents
            .uploader
            .publish(&video, &thumbnail, &seo)
            .await?
            .into_inner();

        project.youtube_id = Some(video_id.clone());
        project.uploaded_at = Some(chrono::Utc::now());
        advance(&mut project, ProjectStatus::Published)?;
        self.store.save_project(&project).await?;
        info!(video_id = %video_id, "Published");

        // Step 8: detached analytics refresh; failures are logged and
        // swallowed, never surfaced to this caller
        info!("Step 8/8: Scheduling optimization analysis");
        let optimizer = Arc::clone(&self.optimizer);
        let delay = Duration::from_secs(self.config.analytics_delay_secs);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = optimizer.refresh(&video_id).await {
                warn!(video_id = %video_id, error = %e, "Detached analytics refresh failed");
                return;
            }
            if let Err(e) = optimizer.learn().await {
                warn!(video_id = %video_id, error = %e, "Detached learning pass failed");
            }
        });

        Ok(project)
    }

    /// Mark the stored project failed, when a record exists.
    async fn mark_failed(&self, project_id: Uuid) {
        match self.store.project(project_id).await {
            Ok(Some(mut project)) => {
                if project.status.can_advance_to(ProjectStatus::Failed) {
                    project.status = ProjectStatus::Failed;
                    if let Err(e) = self.store.save_project(&project).await {
                        warn!(project_id = %project_id, error = %e, "Could not persist failed status");
                    }
                }
            }
            Ok(None) => {
                debug!(project_id = %project_id, "No project record to mark failed");
            }
            Err(e) => {
                warn!(project_id = %project_id, error = %e, "Could not load project to mark failed");
            }
        }
    }

    /// Run the pipeline `count` times sequentially.
    ///
    /// A failed iteration is recorded as `None` and does not abort the rest;
    /// the configured delay separates iterations to stay under external rate
    /// limits.
    #[instrument(skip(self, config))]
    pub async fn produce_batch(
        &self,
        count: usize,
        config: &GenerationConfig,
    ) -> Vec<Option<VideoProject>> {
        info!(count, "Starting batch generation");
        let mut results = Vec::with_capacity(count);

        for index in 0..count {
            info!(video = index + 1, of = count, "Generating video");
            match self.produce(config).await {
                Ok(project) => results.push(Some(project)),
                Err(e) => {
                    error!(video = index + 1, error = %e, "Batch iteration failed");
                    results.push(None);
                }
            }

            if index + 1 < count && self.config.batch_delay_secs > 0 {
                debug!(
                    seconds = self.config.batch_delay_secs,
                    "Waiting before next generation"
                );
                tokio::time::sleep(Duration::from_secs(self.config.batch_delay_secs)).await;
            }
        }

        let successful = results.iter().filter(|r| r.is_some()).count();
        info!(successful, count, "Batch complete");
        results
    }

    /// Aggregate stored analytics into an insight report.
    ///
    /// Read-only; mutates nothing beyond what the optimizer's fetch does
    /// internally.
    #[instrument(skip(self))]
    pub async fn analytics_report(&self) -> FelliniResult<PerformanceReport> {
        self.optimizer.performance_report().await
    }
}

/// Advance a project's status, enforcing the forward-only ordering.
fn advance(project: &mut VideoProject, next: ProjectStatus) -> FelliniResult<()> {
    if !project.status.can_advance_to(next) {
        return Err(PipelineError::new(PipelineErrorKind::InvalidTransition {
            from: project.status.to_string(),
            to: next.to_string(),
        })
        .into());
    }
    project.status = next;
    Ok(())
}
