//! Request types shared by capability traits.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// A text-to-image request.
///
/// # Examples
///
/// ```
/// use fellini_interface::ImageRequest;
///
/// let request = ImageRequest::builder()
///     .prompt("rooftop at golden hour, anime style")
///     .width(1080u32)
///     .height(1920u32)
///     .build()
///     .unwrap();
/// assert_eq!(request.width, 1080);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(setter(into))]
pub struct ImageRequest {
    /// Positive prompt
    pub prompt: String,
    /// Negative prompt
    #[builder(default = "default_negative_prompt()")]
    #[serde(default = "default_negative_prompt")]
    pub negative_prompt: String,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Sampler steps
    #[builder(default = "20")]
    #[serde(default = "default_steps")]
    pub steps: u32,
}

fn default_negative_prompt() -> String {
    "blurry, low quality, distorted, ugly, watermark".to_string()
}

fn default_steps() -> u32 {
    20
}

impl ImageRequest {
    /// Start building an image request.
    pub fn builder() -> ImageRequestBuilder {
        ImageRequestBuilder::default()
    }
}
