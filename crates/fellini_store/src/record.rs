//! The JSON-file-backed record store.

use fellini_core::{AgentMemory, StoryScript, TrendingTopic, VideoAnalytics, VideoProject};
use fellini_error::{FelliniResult, StoreError, StoreErrorKind};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const SCRIPTS_FILE: &str = "scripts.json";
const PROJECTS_FILE: &str = "projects.json";
const ANALYTICS_FILE: &str = "analytics.json";
const TRENDS_FILE: &str = "trends.json";
const MEMORY_DIR: &str = "memory";

/// Record storage for scripts, projects, analytics, trending topics, and
/// named agent-memory blobs.
///
/// # Layout
///
/// ```text
/// {base}/
/// ├── scripts.json     (script id -> StoryScript)
/// ├── projects.json    (project id -> VideoProject)
/// ├── analytics.json   (video id -> VideoAnalytics)
/// ├── trends.json      (TrendingTopic list, append-only)
/// └── memory/
///     └── {name}.json  (AgentMemory blob, last write wins)
/// ```
#[derive(Debug, Clone)]
pub struct RecordStore {
    base_dir: PathBuf,
}

impl RecordStore {
    /// Open a record store rooted at `base_dir`, creating the directory
    /// structure if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories cannot be created.
    #[tracing::instrument(skip(base_dir))]
    pub fn open(base_dir: impl Into<PathBuf>) -> FelliniResult<Self> {
        let base_dir = base_dir.into();

        std::fs::create_dir_all(base_dir.join(MEMORY_DIR)).map_err(|e| {
            StoreError::new(StoreErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_dir.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_dir.display(), "Opened record store");
        Ok(Self { base_dir })
    }

    /// Base directory of this store.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Save a story script.
    #[tracing::instrument(skip(self, script), fields(id = %script.id))]
    pub async fn save_script(&self, script: &StoryScript) -> FelliniResult<()> {
        let mut scripts: HashMap<Uuid, StoryScript> = self.read_or_default(SCRIPTS_FILE).await?;
        scripts.insert(script.id, script.clone());
        self.write(SCRIPTS_FILE, &scripts).await
    }

    /// Look up a script by id.
    pub async fn script(&self, id: Uuid) -> FelliniResult<Option<StoryScript>> {
        let mut scripts: HashMap<Uuid, StoryScript> = self.read_or_default(SCRIPTS_FILE).await?;
        Ok(scripts.remove(&id))
    }

    /// Save (insert or replace) a video project.
    #[tracing::instrument(skip(self, project), fields(id = %project.id, status = %project.status))]
    pub async fn save_project(&self, project: &VideoProject) -> FelliniResult<()> {
        let mut projects: HashMap<Uuid, VideoProject> =
            self.read_or_default(PROJECTS_FILE).await?;
        projects.insert(project.id, project.clone());
        self.write(PROJECTS_FILE, &projects).await
    }

    /// Look up a project by id.
    pub async fn project(&self, id: Uuid) -> FelliniResult<Option<VideoProject>> {
        let mut projects: HashMap<Uuid, VideoProject> =
            self.read_or_default(PROJECTS_FILE).await?;
        Ok(projects.remove(&id))
    }

    /// All stored projects, in no particular order.
    pub async fn projects(&self) -> FelliniResult<Vec<VideoProject>> {
        let projects: HashMap<Uuid, VideoProject> = self.read_or_default(PROJECTS_FILE).await?;
        Ok(projects.into_values().collect())
    }

    /// Save an analytics snapshot, keyed by external video id.
    #[tracing::instrument(skip(self, analytics), fields(video_id = %analytics.video_id))]
    pub async fn save_analytics(&self, analytics: &VideoAnalytics) -> FelliniResult<()> {
        let mut all: HashMap<String, VideoAnalytics> =
            self.read_or_default(ANALYTICS_FILE).await?;
        all.insert(analytics.video_id.clone(), analytics.clone());
        self.write(ANALYTICS_FILE, &all).await
    }

    /// Look up analytics for a video id.
    pub async fn analytics(&self, video_id: &str) -> FelliniResult<Option<VideoAnalytics>> {
        let mut all: HashMap<String, VideoAnalytics> =
            self.read_or_default(ANALYTICS_FILE).await?;
        Ok(all.remove(video_id))
    }

    /// All stored analytics snapshots.
    pub async fn all_analytics(&self) -> FelliniResult<Vec<VideoAnalytics>> {
        let all: HashMap<String, VideoAnalytics> = self.read_or_default(ANALYTICS_FILE).await?;
        Ok(all.into_values().collect())
    }

    /// Append trending topics to the trend log.
    #[tracing::instrument(skip(self, topics), fields(count = topics.len()))]
    pub async fn append_trends(&self, topics: &[TrendingTopic]) -> FelliniResult<()> {
        let mut all: Vec<TrendingTopic> = self.read_or_default(TRENDS_FILE).await?;
        all.extend_from_slice(topics);
        self.write(TRENDS_FILE, &all).await
    }

    /// All logged trending topics, oldest first.
    pub async fn trends(&self) -> FelliniResult<Vec<TrendingTopic>> {
        self.read_or_default(TRENDS_FILE).await
    }

    /// Load a named agent-memory blob.
    pub async fn memory(&self, name: &str) -> FelliniResult<Option<AgentMemory>> {
        let path = self.memory_path(name);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(None);
        }
        let contents = tokio::fs::read_to_string(&path).await.map_err(|e| {
            StoreError::new(StoreErrorKind::FileRead(format!("{}: {}", path.display(), e)))
        })?;
        let memory = serde_json::from_str(&contents).map_err(|e| {
            StoreError::new(StoreErrorKind::Serialization(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        Ok(Some(memory))
    }

    /// Save a named agent-memory blob, replacing any previous value.
    #[tracing::instrument(skip(self, memory))]
    pub async fn save_memory(&self, name: &str, memory: &AgentMemory) -> FelliniResult<()> {
        let path = self.memory_path(name);
        let contents = serde_json::to_string_pretty(memory).map_err(|e| {
            StoreError::new(StoreErrorKind::Serialization(e.to_string()))
        })?;
        write_atomic(&path, contents.as_bytes()).await
    }

    fn memory_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(MEMORY_DIR).join(format!("{name}.json"))
    }

    /// Read a collection file, returning the default value when the file does
    /// not exist yet.
    async fn read_or_default<T>(&self, file: &str) -> FelliniResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.base_dir.join(file);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(T::default());
        }

        let contents = tokio::fs::read_to_string(&path).await.map_err(|e| {
            StoreError::new(StoreErrorKind::FileRead(format!("{}: {}", path.display(), e)))
        })?;

        serde_json::from_str(&contents)
            .map_err(|e| {
                StoreError::new(StoreErrorKind::Serialization(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
                .into()
            })
    }

    /// Serialize and write one collection file.
    async fn write<T: Serialize>(&self, file: &str, value: &T) -> FelliniResult<()> {
        let path = self.base_dir.join(file);
        let contents = serde_json::to_string_pretty(value).map_err(|e| {
            StoreError::new(StoreErrorKind::Serialization(e.to_string()))
        })?;
        write_atomic(&path, contents.as_bytes()).await
    }
}

/// Write to a temp file, then rename over the target.
async fn write_atomic(path: &Path, data: &[u8]) -> FelliniResult<()> {
    let temp_path = path.with_extension("tmp");
    tokio::fs::write(&temp_path, data).await.map_err(|e| {
        StoreError::new(StoreErrorKind::FileWrite(format!(
            "{}: {}",
            temp_path.display(),
            e
        )))
    })?;

    tokio::fs::rename(&temp_path, path).await.map_err(|e| {
        StoreError::new(StoreErrorKind::FileWrite(format!(
            "rename {} to {}: {}",
            temp_path.display(),
            path.display(),
            e
        )))
    })?;

    Ok(())
}
