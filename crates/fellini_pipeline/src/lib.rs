//! Pipeline orchestration for Fellini.
//!
//! This crate owns the fixed eight-step generation pipeline, the project
//! status machine it enforces, batch mode with per-iteration failure
//! isolation, and the layered configuration the binaries load.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod orchestrator;

pub use config::{FelliniConfig, PipelineConfig};
pub use fellini_agents::PerformanceReport;
pub use orchestrator::{Agents, Orchestrator};
