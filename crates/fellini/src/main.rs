//! Fellini CLI binary.
//!
//! Three subcommands, each exiting after completion:
//! - `generate`: run the pipeline once and publish one video
//! - `batch <count>`: run the pipeline repeatedly with rate-limit pauses
//! - `analytics`: print the aggregate performance report

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{run_analytics, run_batch, run_generate, Cli, Commands};

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Generate { genre, style, voice } => {
            run_generate(genre, style, voice).await?;
        }

        Commands::Batch { count } => {
            run_batch(count).await?;
        }

        Commands::Analytics => {
            run_analytics().await?;
        }
    }

    Ok(())
}
