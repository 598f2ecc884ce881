//! Live clients for the external services the agents wrap.
//!
//! Each client owns its own HTTP timeout; no timeout spans more than one
//! call, and a timed-out call simply fails into the caller's fallback path.

mod coqui;
mod ffmpeg;
mod ollama;
mod stable_diffusion;
mod youtube;

pub use coqui::CoquiTtsClient;
pub use ffmpeg::FfmpegTranscoder;
pub use ollama::OllamaClient;
pub use stable_diffusion::StableDiffusionClient;
pub use youtube::YouTubeClient;
