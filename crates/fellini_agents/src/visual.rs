//! Visual generation agent.

use crate::MediaDirs;
use chrono::Utc;
use fellini_core::{GenerationConfig, ScriptScene, StoryScript, VisualStyle};
use fellini_error::{AgentError, AgentErrorKind, BuilderError, BuilderErrorKind, FelliniResult};
use fellini_interface::{ImageModel, ImageRequest};
use std::path::PathBuf;
use tracing::{debug, instrument, warn};

const SCENE_WIDTH: u32 = 1080;
const SCENE_HEIGHT: u32 = 1920;
const THUMB_WIDTH: u32 = 1280;
const THUMB_HEIGHT: u32 = 720;

/// Renders scene images and thumbnails.
///
/// Each scene gets one attempt against the image model; a failed scene is
/// replaced by an SVG gradient placeholder so the storyboard always has one
/// image per scene. The thumbnail is always the locally drawn SVG card.
pub struct VisualAgent {
    model: Box<dyn ImageModel>,
    media: MediaDirs,
}

impl VisualAgent {
    /// Create a visual agent from an image model and media directories.
    pub fn new(model: Box<dyn ImageModel>, media: MediaDirs) -> Self {
        Self { model, media }
    }

    /// Render one image per scene, in scene order.
    ///
    /// # Errors
    ///
    /// Only filesystem errors propagate; model failures produce placeholders.
    #[instrument(skip(self, script, config), fields(title = %script.title, scene_count = script.scenes.len()))]
    pub async fn storyboard(
        &self,
        script: &StoryScript,
        config: &GenerationConfig,
    ) -> FelliniResult<Vec<PathBuf>> {
        self.media.ensure()?;

        let mut paths = Vec::with_capacity(script.scenes.len());
        for (index, scene) in script.scenes.iter().enumerate() {
            let path = match self.render_scene(scene, config, index).await {
                Ok(path) => path,
                Err(e) => {
                    warn!(scene = index, error = %e, "Image model unavailable, writing placeholder");
                    self.write_placeholder(scene, index).await?
                }
            };
            paths.push(path);
        }

        debug!(count = paths.len(), "Storyboard complete");
        Ok(paths)
    }

    async fn render_scene(
        &self,
        scene: &ScriptScene,
        config: &GenerationConfig,
        index: usize,
    ) -> FelliniResult<PathBuf> {
        let request = ImageRequest::builder()
            .prompt(build_prompt(scene, config))
            .width(SCENE_WIDTH)
            .height(SCENE_HEIGHT)
            .build()
            .map_err(|e| BuilderError::new(BuilderErrorKind::MissingField(e.to_string())))?;

        let bytes = self.model.render(&request).await?;

        let path = self.media.visuals().join(format!(
            "scene_{index}_{}.png",
            Utc::now().timestamp_millis()
        ));
        tokio::fs::write(&path, &bytes).await.map_err(|e| {
            AgentError::new(AgentErrorKind::ArtifactWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        Ok(path)
    }

    async fn write_placeholder(
        &self,
        scene: &ScriptScene,
        index: usize,
    ) -> FelliniResult<PathBuf> {
        let svg = placeholder_svg(scene, index);
        let path = self.media.visuals().join(format!(
            "placeholder_scene_{index}_{}.svg",
            Utc::now().timestamp_millis()
        ));
        tokio::fs::write(&path, svg).await.map_err(|e| {
            AgentError::new(AgentErrorKind::ArtifactWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        Ok(path)
    }

    /// Draw the thumbnail card for a script.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    #[instrument(skip(self, script), fields(title = %script.title))]
    pub async fn thumbnail(&self, script: &StoryScript) -> FelliniResult<PathBuf> {
        self.media.ensure()?;

        let svg = thumbnail_svg(script);
        let path = self.media.visuals().join(format!(
            "thumbnail_{}.svg",
            Utc::now().timestamp_millis()
        ));
        tokio::fs::write(&path, svg).await.map_err(|e| {
            AgentError::new(AgentErrorKind::ArtifactWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        debug!(path = %path.display(), "Thumbnail created");
        Ok(path)
    }
}

fn style_modifier(style: VisualStyle) -> &'static str {
    match style {
        VisualStyle::Anime => {
            "anime style, manga art, cel shaded, vibrant colors, detailed anime character design"
        }
        VisualStyle::Realistic => {
            "photorealistic, cinematic lighting, 8k, highly detailed, film photography"
        }
        VisualStyle::Mixed => "semi-realistic anime, Studio Ghibli style, detailed illustration",
    }
}

fn emotion_modifier(emotion: &str) -> &'static str {
    match emotion {
        "fear" => "dark atmosphere, ominous lighting, tense mood",
        "love" => "warm lighting, soft focus, romantic atmosphere",
        "shock" => "dramatic lighting, high contrast, intense focus",
        "wonder" => "ethereal lighting, dreamlike quality, magical atmosphere",
        "dread" => "oppressive darkness, cold tones, horror atmosphere",
        "excitement" => "dynamic composition, vibrant energy, bright colors",
        _ => "",
    }
}

fn build_prompt(scene: &ScriptScene, config: &GenerationConfig) -> String {
    let base = scene
        .visual_description
        .as_deref()
        .unwrap_or(&scene.scene);
    let style = style_modifier(config.style);
    let emotion = scene
        .emotion
        .as_deref()
        .map(emotion_modifier)
        .unwrap_or("");

    format!("{base}, {style}, {emotion}, masterpiece, best quality, professional composition")
}

fn emotion_colors(emotion: Option<&str>) -> (&'static str, &'static str) {
    match emotion {
        Some("fear") => ("#1a0033", "#330066"),
        Some("love") => ("#ff6b6b", "#ffd93d"),
        Some("shock") => ("#000000", "#ff0000"),
        Some("wonder") => ("#4a148c", "#00bcd4"),
        Some("dread") => ("#0d0d0d", "#1a1a1a"),
        Some("excitement") => ("#ff6b35", "#f7931e"),
        _ => ("#1e3a8a", "#3b82f6"),
    }
}

/// Strip characters that would break SVG text nodes.
fn svg_escape(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '<' | '>' | '&' | '"' | '\''))
        .collect()
}

fn placeholder_svg(scene: &ScriptScene, index: usize) -> String {
    let (top, bottom) = emotion_colors(scene.emotion.as_deref());
    let label = svg_escape(&scene.scene);
    let emotion_line = scene
        .emotion
        .as_deref()
        .map(|emotion| {
            format!(
                r##"<text x="540" y="1080" font-size="32" font-style="italic" fill="#ffcc00" text-anchor="middle" font-family="Arial">[{}]</text>"##,
                svg_escape(emotion)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<svg width="1080" height="1920" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <linearGradient id="grad{index}" x1="0%" y1="0%" x2="0%" y2="100%">
      <stop offset="0%" style="stop-color:{top};stop-opacity:1" />
      <stop offset="100%" style="stop-color:{bottom};stop-opacity:1" />
    </linearGradient>
  </defs>
  <rect width="1080" height="1920" fill="url(#grad{index})" />
  <rect x="0" y="800" width="1080" height="320" fill="rgba(0,0,0,0.7)" />
  <text x="540" y="900" font-size="48" font-weight="bold" fill="white" text-anchor="middle" font-family="Arial">Scene {number}</text>
  <text x="540" y="980" font-size="36" fill="white" text-anchor="middle" font-family="Arial">{label}</text>
  {emotion_line}
</svg>"#,
        number = index + 1,
    )
}

fn thumbnail_svg(script: &StoryScript) -> String {
    let title: String = svg_escape(&script.title).chars().take(50).collect();
    let genre = script.genre.to_string().to_uppercase();

    format!(
        r##"<svg width="{THUMB_WIDTH}" height="{THUMB_HEIGHT}" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <radialGradient id="thumbGrad">
      <stop offset="0%" style="stop-color:#667eea;stop-opacity:1" />
      <stop offset="100%" style="stop-color:#764ba2;stop-opacity:1" />
    </radialGradient>
  </defs>
  <rect width="{THUMB_WIDTH}" height="{THUMB_HEIGHT}" fill="url(#thumbGrad)" />
  <text x="640" y="360" font-size="72" font-weight="bold" fill="white" stroke="black" stroke-width="8" text-anchor="middle" font-family="Arial">{title}</text>
  <rect x="50" y="50" width="200" height="60" fill="#ffcc00" />
  <text x="70" y="90" font-size="32" font-weight="bold" fill="black" font-family="Arial">{genre}</text>
  <rect x="1030" y="50" width="200" height="60" fill="#ff4444" />
  <text x="1210" y="90" font-size="32" font-weight="bold" fill="white" text-anchor="end" font-family="Arial">60 SEC</text>
</svg>"##
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(emotion: Option<&str>) -> ScriptScene {
        ScriptScene {
            scene: "rooftop-sunset".to_string(),
            dialogue: "line".to_string(),
            visual_description: Some("Hands reaching, golden hour lighting".to_string()),
            duration_secs: Some(12),
            emotion: emotion.map(|e| e.to_string()),
        }
    }

    #[test]
    fn prompt_includes_style_and_emotion() {
        let config = GenerationConfig {
            style: VisualStyle::Realistic,
            ..GenerationConfig::default()
        };
        let prompt = build_prompt(&scene(Some("love")), &config);
        assert!(prompt.contains("photorealistic"));
        assert!(prompt.contains("romantic atmosphere"));
        assert!(prompt.starts_with("Hands reaching"));
    }

    #[test]
    fn placeholder_strips_markup_characters() {
        let mut s = scene(Some("fear"));
        s.scene = "a<b>&\"c'".to_string();
        let svg = placeholder_svg(&s, 0);
        assert!(svg.contains(">abc</text>"));
        assert!(svg.contains("#1a0033"));
    }

    #[test]
    fn unknown_emotion_uses_default_gradient() {
        assert_eq!(emotion_colors(Some("nostalgia")).0, "#1e3a8a");
        assert_eq!(emotion_colors(None).0, "#1e3a8a");
    }
}
