//! Route handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use fellini_core::{GenerationConfig, VideoProject};
use fellini_pipeline::{Orchestrator, PerformanceReport};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, instrument};

#[derive(Debug, Serialize)]
struct ProjectListing {
    projects: Vec<VideoProject>,
}

/// Build the API router over a shared orchestrator.
pub fn router(orchestrator: Arc<Orchestrator>) -> Router {
    Router::new()
        .route("/generate", post(generate))
        .route("/projects", get(projects))
        .route("/analytics", get(analytics))
        .with_state(orchestrator)
}

#[instrument(skip_all)]
async fn generate(
    State(orchestrator): State<Arc<Orchestrator>>,
    body: Option<Json<GenerationConfig>>,
) -> Result<Json<VideoProject>, (StatusCode, Json<serde_json::Value>)> {
    let config = body.map(|Json(config)| config).unwrap_or_default();

    orchestrator.produce(&config).await.map(Json).map_err(|e| {
        error!(error = %e, "Generation request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to generate video" })),
        )
    })
}

#[instrument(skip_all)]
async fn projects(
    State(orchestrator): State<Arc<Orchestrator>>,
) -> Result<Json<ProjectListing>, (StatusCode, Json<serde_json::Value>)> {
    orchestrator
        .store()
        .projects()
        .await
        .map(|projects| Json(ProjectListing { projects }))
        .map_err(|e| {
            error!(error = %e, "Project listing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch projects" })),
            )
        })
}

#[instrument(skip_all)]
async fn analytics(
    State(orchestrator): State<Arc<Orchestrator>>,
) -> Result<Json<PerformanceReport>, (StatusCode, Json<serde_json::Value>)> {
    orchestrator.analytics_report().await.map(Json).map_err(|e| {
        error!(error = %e, "Analytics request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to fetch analytics" })),
        )
    })
}
