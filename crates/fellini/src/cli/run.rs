//! Command handlers.

use fellini_core::{GenerationConfig, Genre, VisualStyle, VoiceType};
use fellini_error::FelliniResult;
use fellini_pipeline::{FelliniConfig, Orchestrator};
use tracing::info;

fn build_orchestrator() -> FelliniResult<Orchestrator> {
    let config = FelliniConfig::load()?;
    Orchestrator::from_config(&config)
}

/// Run the pipeline once and print the published project.
pub async fn run_generate(
    genre: Option<Genre>,
    style: VisualStyle,
    voice: VoiceType,
) -> FelliniResult<()> {
    let orchestrator = build_orchestrator()?;

    let config = GenerationConfig {
        genre,
        style,
        voice,
        ..GenerationConfig::default()
    };

    let project = orchestrator.produce(&config).await?;

    println!("Project ID:  {}", project.id);
    if let Some(video_id) = &project.youtube_id {
        println!("Video ID:    {video_id}");
    }
    if let Some(seo) = &project.seo {
        println!("Title:       {}", seo.title);
    }
    println!("Status:      {}", project.status);

    Ok(())
}

/// Run the pipeline `count` times and summarize the batch.
pub async fn run_batch(count: usize) -> FelliniResult<()> {
    let orchestrator = build_orchestrator()?;

    let results = orchestrator
        .produce_batch(count, &GenerationConfig::default())
        .await;

    let successful = results.iter().filter(|r| r.is_some()).count();
    println!("Batch complete: {successful}/{count} successful");

    for (index, result) in results.iter().enumerate() {
        match result {
            Some(project) => println!(
                "  [{}] {} ({})",
                index + 1,
                project.id,
                project.youtube_id.as_deref().unwrap_or("-")
            ),
            None => println!("  [{}] failed", index + 1),
        }
    }

    Ok(())
}

/// Print the aggregate analytics report with revenue projections.
pub async fn run_analytics() -> FelliniResult<()> {
    let orchestrator = build_orchestrator()?;

    info!("Running analytics report");
    let report = orchestrator.analytics_report().await?;

    println!("Performance Summary:");
    println!("  Videos:        {}", report.total_videos);
    println!("  Views:         {}", report.total_views);
    println!("  Revenue:       ${:.2}", report.total_revenue);
    println!("  Avg CTR:       {:.2}%", report.avg_ctr * 100.0);
    println!("  Avg Retention: {:.2}%", report.avg_retention * 100.0);

    println!("\nRecommendations:");
    for recommendation in &report.recommendations {
        println!("  - {recommendation}");
    }

    println!("\nRevenue Projection:");
    println!(
        "  30 videos:  ${:.2}",
        orchestrator.optimizer().projected_revenue(30, 5.0)
    );
    println!(
        "  100 videos: ${:.2}",
        orchestrator.optimizer().projected_revenue(100, 5.0)
    );

    Ok(())
}
