//! JSON record store for the Fellini video pipeline.
//!
//! One JSON file per collection under a base directory: scripts, projects,
//! analytics, trends, and named agent-memory blobs, plus a flat token file
//! for video-host OAuth credentials.
//!
//! Every save is one independent write (read-modify-write of a single
//! collection file, written atomically via temp file + rename). There is no
//! transaction spanning writes: a crash between two pipeline persistence
//! calls can leave a project whose stored status lags its completed stage.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod record;
mod tokens;

pub use record::RecordStore;
pub use tokens::{OAuthTokens, TokenStore};
