//! Capability trait definitions for the Fellini video pipeline.
//!
//! Each trait models one external dependency an agent wraps: a text model for
//! scripting, an image model for storyboards, a speech model for voiceover, a
//! transcoder for assembly, and a video host for publishing. Agents hold these
//! as trait objects so tests can inject fakes and no client handle lives in
//! module scope.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{ImageModel, SpeechModel, TextModel, Transcoder, VideoHost};
pub use types::{ImageRequest, ImageRequestBuilder, ImageRequestBuilderError};
