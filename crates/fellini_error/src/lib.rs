//! Error types for the Fellini video pipeline.
//!
//! This crate provides the foundation error types used throughout the Fellini
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use fellini_error::{FelliniResult, HttpError};
//!
//! fn fetch_data() -> FelliniResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod agent;
mod builder;
mod config;
mod error;
mod http;
mod json;
mod pipeline;
mod server;
mod store;

pub use agent::{AgentError, AgentErrorKind};
pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{FelliniError, FelliniErrorKind, FelliniResult};
pub use http::HttpError;
pub use json::JsonError;
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use server::{ServerError, ServerErrorKind};
pub use store::{StoreError, StoreErrorKind};
