//! Fellini: an AI micro-drama video pipeline.
//!
//! Fellini chains trend analysis, LLM scripting, image generation, speech
//! synthesis, video assembly, SEO derivation, and publishing into one
//! sequential pipeline. Every external dependency degrades to a local
//! fallback, so a machine with none of the services installed still produces
//! a complete (placeholder-media) project.
//!
//! This facade crate re-exports the workspace surface and carries the CLI
//! binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use fellini_agents::{
    EditorAgent, OptimizerAgent, PerformanceReport, ScriptAgent, SeoAgent, TrendAgent,
    UploaderAgent, VisualAgent, VoiceAgent,
};
pub use fellini_core::{
    GenerationConfig, Genre, ProjectStatus, ScriptScene, SeoMetadata, Sourced, StoryScript,
    TrendingTopic, VideoAnalytics, VideoProject, VisualStyle, VoiceType,
};
pub use fellini_error::{FelliniError, FelliniResult};
pub use fellini_interface::{ImageModel, SpeechModel, TextModel, Transcoder, VideoHost};
pub use fellini_pipeline::{Agents, FelliniConfig, Orchestrator, PipelineConfig};
pub use fellini_store::{RecordStore, TokenStore};
