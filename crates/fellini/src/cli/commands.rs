//! CLI command definitions.

use clap::{Parser, Subcommand};
use fellini_core::{Genre, VisualStyle, VoiceType};

/// Fellini - AI micro-drama video pipeline
#[derive(Parser, Debug)]
#[command(name = "fellini")]
#[command(about = "Generate, assemble, and publish AI micro-drama videos", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate and upload one video
    Generate {
        /// Genre override (the trending topic's genre is used when omitted)
        #[arg(long)]
        genre: Option<Genre>,

        /// Visual style for scene images
        #[arg(long, default_value = "anime")]
        style: VisualStyle,

        /// Narrator voice
        #[arg(long, default_value = "neutral")]
        voice: VoiceType,
    },

    /// Generate multiple videos sequentially
    Batch {
        /// Number of videos to generate
        #[arg(default_value = "5")]
        count: usize,
    },

    /// Print the aggregate analytics report
    Analytics,
}
