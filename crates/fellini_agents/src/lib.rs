//! Generation agents for the Fellini video pipeline.
//!
//! Each agent wraps one external capability — trend discovery, LLM
//! scripting, image generation, speech synthesis, video assembly, SEO
//! derivation, publishing, and analytics — behind the traits defined in
//! `fellini_interface`. Every agent makes exactly one attempt against its
//! external dependency and then falls back to a deterministic or randomized
//! local substitute, so the pipeline never stalls on a missing service.
//! There are no retries and no backoff.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod clients;
mod config;
mod editor;
mod optimizer;
mod script;
mod seo;
mod trend;
mod uploader;
mod visual;
mod voice;

pub use config::{ImageConfig, LlmConfig, MediaDirs, TtsConfig, YouTubeConfig};
pub use editor::EditorAgent;
pub use optimizer::{OptimizerAgent, PerformanceReport, VideoSuggestion};
pub use script::ScriptAgent;
pub use seo::SeoAgent;
pub use trend::TrendAgent;
pub use uploader::UploaderAgent;
pub use visual::VisualAgent;
pub use voice::VoiceAgent;
