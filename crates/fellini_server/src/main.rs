//! Fellini HTTP server binary.

use fellini_error::{ServerError, ServerErrorKind};
use fellini_pipeline::{FelliniConfig, Orchestrator};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    let config = FelliniConfig::load()?;
    let orchestrator = Arc::new(Orchestrator::from_config(&config)?);

    let app = fellini_server::router(orchestrator);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = format!("0.0.0.0:{port}");

    info!(addr = %addr, "Starting API server");
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        ServerError::new(ServerErrorKind::Bind {
            addr: addr.clone(),
            message: e.to_string(),
        })
    })?;
    axum::serve(listener, app).await?;

    Ok(())
}
