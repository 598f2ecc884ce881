//! Integration tests for the JSON record store.

use chrono::Utc;
use fellini_core::{
    AgentMemory, Genre, ProjectStatus, ScriptScene, StoryScript, TrendingTopic, VideoAnalytics,
    VideoProject,
};
use fellini_store::RecordStore;
use uuid::Uuid;

fn sample_script() -> StoryScript {
    StoryScript {
        id: Uuid::new_v4(),
        title: "The Warning".to_string(),
        genre: Genre::Thriller,
        hook: "You have 24 hours.".to_string(),
        scenes: vec![ScriptScene {
            scene: "phone-screen".to_string(),
            dialogue: "Message from yourself: Don't trust anyone.".to_string(),
            visual_description: None,
            duration_secs: Some(10),
            emotion: Some("anxiety".to_string()),
        }],
        duration_secs: 60,
        created_at: Utc::now(),
        metadata: None,
    }
}

#[tokio::test]
async fn script_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::open(dir.path()).unwrap();

    let script = sample_script();
    store.save_script(&script).await.unwrap();

    let loaded = store.script(script.id).await.unwrap().unwrap();
    assert_eq!(loaded, script);

    let missing = store.script(Uuid::new_v4()).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn project_save_replaces_prior_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::open(dir.path()).unwrap();

    let mut project = VideoProject::new(Uuid::new_v4(), Uuid::new_v4(), ProjectStatus::Generating);
    store.save_project(&project).await.unwrap();

    project.status = ProjectStatus::Editing;
    project.video_path = Some("videos/out.mp4".to_string());
    store.save_project(&project).await.unwrap();

    let loaded = store.project(project.id).await.unwrap().unwrap();
    assert_eq!(loaded.status, ProjectStatus::Editing);
    assert_eq!(loaded.video_path.as_deref(), Some("videos/out.mp4"));

    let all = store.projects().await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn analytics_keyed_by_video_id() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::open(dir.path()).unwrap();

    let analytics = VideoAnalytics {
        video_id: "sim_abc123".to_string(),
        views: 12_000,
        likes: 500,
        comments: 42,
        watch_time_secs: 9_000,
        ctr: 0.07,
        retention: 0.55,
        revenue: Some(12.5),
        updated_at: Utc::now(),
    };
    store.save_analytics(&analytics).await.unwrap();

    let loaded = store.analytics("sim_abc123").await.unwrap().unwrap();
    assert_eq!(loaded.views, 12_000);
    assert!(store.analytics("other").await.unwrap().is_none());
}

#[tokio::test]
async fn trends_append_preserves_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::open(dir.path()).unwrap();

    let first = TrendingTopic {
        topic: "AI becomes sentient".to_string(),
        genre: Genre::SciFi,
        popularity: 88,
        keywords: vec!["consciousness".to_string()],
        source: "synthetic".to_string(),
        timestamp: Utc::now(),
    };
    let second = TrendingTopic {
        topic: "Time loop confession".to_string(),
        genre: Genre::Romance,
        popularity: 92,
        keywords: vec!["fate".to_string()],
        source: "synthetic".to_string(),
        timestamp: Utc::now(),
    };

    store.append_trends(&[first.clone()]).await.unwrap();
    store.append_trends(&[second.clone()]).await.unwrap();

    let trends = store.trends().await.unwrap();
    assert_eq!(trends.len(), 2);
    assert_eq!(trends[0].topic, first.topic);
    assert_eq!(trends[1].topic, second.topic);
}

#[tokio::test]
async fn memory_blob_is_last_write_wins() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::open(dir.path()).unwrap();

    assert!(store.memory("performance_patterns").await.unwrap().is_none());

    let mut memory = AgentMemory::default();
    memory
        .successful_patterns
        .hooks
        .push("Emotional opening questions".to_string());
    store.save_memory("performance_patterns", &memory).await.unwrap();

    let mut replacement = AgentMemory::default();
    replacement.performance_metrics.avg_ctr = 0.09;
    store
        .save_memory("performance_patterns", &replacement)
        .await
        .unwrap();

    let loaded = store.memory("performance_patterns").await.unwrap().unwrap();
    assert!(loaded.successful_patterns.hooks.is_empty());
    assert!((loaded.performance_metrics.avg_ctr - 0.09).abs() < f64::EPSILON);
}
