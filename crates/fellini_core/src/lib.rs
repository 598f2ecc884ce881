//! Core data types for the Fellini video pipeline.
//!
//! This crate defines the records that flow through the pipeline: trending
//! topics, story scripts, video projects and their status machine, SEO
//! metadata, analytics, and the persisted agent memory. It has no I/O of its
//! own.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analytics;
mod config;
mod genre;
mod memory;
mod project;
mod script;
mod seo;
mod sourced;
mod status;
mod trend;

pub use analytics::{VideoAnalytics, VideoStatistics};
pub use config::{GenerationConfig, VisualStyle, VoiceType};
pub use genre::Genre;
pub use memory::{AgentMemory, LearningData, PerformanceMetrics, SuccessfulPatterns};
pub use project::VideoProject;
pub use script::{ScriptMetadata, ScriptScene, StoryScript};
pub use seo::{serialized_tag_len, SeoMetadata, MAX_TAGS_SERIALIZED_LEN, MAX_TITLE_LEN};
pub use sourced::Sourced;
pub use status::ProjectStatus;
pub use trend::TrendingTopic;
