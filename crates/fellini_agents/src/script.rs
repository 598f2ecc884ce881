//! Script writing agent.

use chrono::Utc;
use fellini_core::{
    Genre, ScriptMetadata, ScriptScene, Sourced, StoryScript, TrendingTopic,
};
use fellini_error::{AgentError, AgentErrorKind, FelliniResult};
use fellini_interface::TextModel;
use fellini_store::RecordStore;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

const TARGET_AUDIENCE: &str = "Gen Z, Millennials";
const SCRIPT_DURATION_SECS: u32 = 60;

/// Shape of the JSON object the model is asked to produce.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScriptDraft {
    title: String,
    hook: String,
    #[serde(default)]
    emotional_tone: Option<String>,
    scenes: Vec<SceneDraft>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SceneDraft {
    scene: String,
    dialogue: String,
    #[serde(default)]
    visual_description: Option<String>,
    #[serde(default)]
    duration: Option<u32>,
    #[serde(default)]
    emotion: Option<String>,
}

/// Writes a story script for a trending topic.
///
/// One attempt against the text model; any failure (unreachable endpoint,
/// unparseable reply) falls back to the per-genre template library, which is
/// deterministic: the same genre always yields the same title shape and
/// scene count.
pub struct ScriptAgent {
    model: Box<dyn TextModel>,
    store: RecordStore,
}

impl ScriptAgent {
    /// Create a script agent from a text model and a store.
    pub fn new(model: Box<dyn TextModel>, store: RecordStore) -> Self {
        Self { model, store }
    }

    /// Write and persist a script for the topic.
    ///
    /// # Errors
    ///
    /// Only store failures propagate; model failures fall back to templates.
    #[instrument(skip(self, topic), fields(topic = %topic.topic, genre = %topic.genre))]
    pub async fn write(&self, topic: &TrendingTopic) -> FelliniResult<Sourced<StoryScript>> {
        let script = match self.draft_with_model(topic).await {
            Ok(draft) => {
                debug!(title = %draft.title, "Model produced a script draft");
                Sourced::Live(from_draft(draft, topic))
            }
            Err(e) => {
                warn!(error = %e, "Text model unavailable, using template generation");
                Sourced::Fallback(fallback_script(topic))
            }
        };

        self.store.save_script(script.inner()).await?;
        Ok(script)
    }

    async fn draft_with_model(&self, topic: &TrendingTopic) -> FelliniResult<ScriptDraft> {
        let prompt = build_prompt(topic);
        let reply = self.model.complete(&prompt).await?;
        parse_draft(&reply)
    }
}

fn build_prompt(topic: &TrendingTopic) -> String {
    format!(
        r#"You are a viral YouTube Shorts scriptwriter. Create a compelling 60-second micro-drama.

Topic: {topic}
Genre: {genre}
Keywords: {keywords}

Requirements:
- Start with a powerful 5-second hook that stops scrolling
- Build emotional intensity quickly
- Include a twist or powerful payoff
- Keep dialogue punchy and cinematic
- Create 4-6 scenes (10-15 seconds each)
- Optimize for mobile viewing and quick pacing

Output as JSON:
{{
  "title": "Engaging title under 60 characters",
  "hook": "Opening line that hooks viewers",
  "emotionalTone": "excitement/suspense/heartbreak/etc",
  "scenes": [
    {{
      "scene": "Location/setting",
      "dialogue": "Character dialogue or narration",
      "visualDescription": "Key visual elements",
      "duration": 12,
      "emotion": "fear/love/shock/etc"
    }}
  ]
}}"#,
        topic = topic.topic,
        genre = topic.genre,
        keywords = topic.keywords.join(", "),
    )
}

/// Extract the first JSON object from a model reply and deserialize it.
fn parse_draft(reply: &str) -> FelliniResult<ScriptDraft> {
    let re = Regex::new(r"(?s)\{.*\}").map_err(|e| {
        AgentError::new(AgentErrorKind::ParseError(format!(
            "Invalid extraction regex: {e}"
        )))
    })?;

    let matched = re.find(reply).ok_or_else(|| {
        AgentError::new(AgentErrorKind::ParseError(
            "Reply contained no JSON object".to_string(),
        ))
    })?;

    serde_json::from_str(matched.as_str()).map_err(|e| {
        AgentError::new(AgentErrorKind::ParseError(format!(
            "Could not parse script draft: {e}"
        )))
        .into()
    })
}

fn from_draft(draft: ScriptDraft, topic: &TrendingTopic) -> StoryScript {
    StoryScript {
        id: Uuid::new_v4(),
        title: draft.title,
        genre: topic.genre,
        hook: draft.hook,
        scenes: draft
            .scenes
            .into_iter()
            .map(|s| ScriptScene {
                scene: s.scene,
                dialogue: s.dialogue,
                visual_description: s.visual_description,
                duration_secs: s.duration,
                emotion: s.emotion,
            })
            .collect(),
        duration_secs: SCRIPT_DURATION_SECS,
        created_at: Utc::now(),
        metadata: Some(ScriptMetadata {
            trending: true,
            emotional_tone: draft.emotional_tone,
            target_audience: Some(TARGET_AUDIENCE.to_string()),
        }),
    }
}

struct Template {
    title: &'static str,
    hook: &'static str,
    emotional_tone: &'static str,
    scenes: &'static [TemplateScene],
}

struct TemplateScene {
    scene: &'static str,
    dialogue: &'static str,
    visual: &'static str,
    duration: u32,
    emotion: &'static str,
}

/// Template-based generation for when no model is reachable.
///
/// Deterministic per genre: same genre, same title shape and scene count.
fn fallback_script(topic: &TrendingTopic) -> StoryScript {
    let template = template_for(topic.genre);

    StoryScript {
        id: Uuid::new_v4(),
        title: format!("{} | {}", template.title, topic.topic),
        genre: topic.genre,
        hook: template.hook.to_string(),
        scenes: template
            .scenes
            .iter()
            .map(|s| ScriptScene {
                scene: s.scene.to_string(),
                dialogue: s.dialogue.to_string(),
                visual_description: Some(s.visual.to_string()),
                duration_secs: Some(s.duration),
                emotion: Some(s.emotion.to_string()),
            })
            .collect(),
        duration_secs: SCRIPT_DURATION_SECS,
        created_at: Utc::now(),
        metadata: Some(ScriptMetadata {
            trending: true,
            emotional_tone: Some(template.emotional_tone.to_string()),
            target_audience: Some(TARGET_AUDIENCE.to_string()),
        }),
    }
}

fn template_for(genre: Genre) -> &'static Template {
    match genre {
        Genre::Romance => &ROMANCE,
        Genre::SciFi => &SCI_FI,
        Genre::Horror => &HORROR,
        _ => &THRILLER,
    }
}

static ROMANCE: Template = Template {
    title: "Love's Final Message",
    hook: "If you're seeing this... I'm already gone.",
    emotional_tone: "bittersweet romance",
    scenes: &[
        TemplateScene {
            scene: "bedroom-night",
            dialogue: "Wake up. You've lived this day before.",
            visual: "Close-up of eyes opening, ethereal glow",
            duration: 10,
            emotion: "confusion",
        },
        TemplateScene {
            scene: "coffee-shop",
            dialogue: "Every time I try to tell you... time resets.",
            visual: "Two people at table, clock spinning backwards",
            duration: 12,
            emotion: "desperation",
        },
        TemplateScene {
            scene: "rooftop-sunset",
            dialogue: "This is my last loop. I'm choosing you.",
            visual: "Hands reaching, golden hour lighting",
            duration: 15,
            emotion: "determination",
        },
        TemplateScene {
            scene: "fade-to-white",
            dialogue: "Will you remember me?",
            visual: "Memory fragments dissolving",
            duration: 13,
            emotion: "bittersweet",
        },
    ],
};

static SCI_FI: Template = Template {
    title: "The Last Upload",
    hook: "Humanity ends in 60 seconds. But I found a way out.",
    emotional_tone: "existential sci-fi",
    scenes: &[
        TemplateScene {
            scene: "lab-emergency-lights",
            dialogue: "All biological life... gone. Except me.",
            visual: "Flickering screens, empty lab",
            duration: 10,
            emotion: "dread",
        },
        TemplateScene {
            scene: "upload-chamber",
            dialogue: "I can upload my mind. But what uploads... is it still me?",
            visual: "Body in scanning pod, neural patterns",
            duration: 15,
            emotion: "existential-fear",
        },
        TemplateScene {
            scene: "digital-space",
            dialogue: "I'm... everywhere. And nowhere.",
            visual: "Abstract digital consciousness",
            duration: 12,
            emotion: "wonder",
        },
        TemplateScene {
            scene: "earth-from-space",
            dialogue: "I'm the last echo of humanity.",
            visual: "Planet Earth, one light remaining",
            duration: 13,
            emotion: "melancholy",
        },
    ],
};

static HORROR: Template = Template {
    title: "They Never Left",
    hook: "I can see them. Why can't you?",
    emotional_tone: "psychological horror",
    scenes: &[
        TemplateScene {
            scene: "apartment-dark",
            dialogue: "There's someone standing behind you.",
            visual: "Shadow figure in mirror reflection",
            duration: 10,
            emotion: "fear",
        },
        TemplateScene {
            scene: "hallway",
            dialogue: "They've been here the whole time.",
            visual: "Multiple shadows, flickering lights",
            duration: 12,
            emotion: "terror",
        },
        TemplateScene {
            scene: "revelation",
            dialogue: "We're the only ones who can't see ourselves.",
            visual: "Mirror shows empty room",
            duration: 15,
            emotion: "shock",
        },
        TemplateScene {
            scene: "fade-to-black",
            dialogue: "We never left.",
            visual: "All lights extinguish",
            duration: 13,
            emotion: "dread",
        },
    ],
};

static THRILLER: Template = Template {
    title: "The Warning",
    hook: "You have 24 hours. This is not a drill.",
    emotional_tone: "paranoid thriller",
    scenes: &[
        TemplateScene {
            scene: "phone-screen",
            dialogue: "Message from yourself: Don't trust anyone.",
            visual: "Cryptic text message, timestamp from future",
            duration: 10,
            emotion: "anxiety",
        },
        TemplateScene {
            scene: "crowded-street",
            dialogue: "They all know something I don't.",
            visual: "Everyone staring, unsettling synchronicity",
            duration: 13,
            emotion: "paranoia",
        },
        TemplateScene {
            scene: "abandoned-building",
            dialogue: "I found where the message came from.",
            visual: "High-tech equipment, your own photo",
            duration: 14,
            emotion: "realization",
        },
        TemplateScene {
            scene: "countdown",
            dialogue: "I am the threat.",
            visual: "Mirror revealing altered reflection",
            duration: 13,
            emotion: "horror",
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(genre: Genre) -> TrendingTopic {
        TrendingTopic {
            topic: "Test topic".to_string(),
            genre,
            popularity: 90,
            keywords: vec!["test".to_string()],
            source: "synthetic".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn fallback_is_deterministic_per_genre() {
        let first = fallback_script(&topic(Genre::Romance));
        let second = fallback_script(&topic(Genre::Romance));

        assert_eq!(first.title, second.title);
        assert_eq!(first.scenes.len(), second.scenes.len());
        assert_eq!(first.hook, second.hook);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn unknown_genres_map_to_thriller_template() {
        let comedy = fallback_script(&topic(Genre::Comedy));
        assert!(comedy.title.starts_with("The Warning"));
        assert_eq!(comedy.genre, Genre::Comedy);
    }

    #[test]
    fn parse_draft_extracts_embedded_json() {
        let reply = r#"Sure! Here is the script:
{"title": "T", "hook": "H", "emotionalTone": "suspense",
 "scenes": [{"scene": "s1", "dialogue": "d1", "visualDescription": "v1",
             "duration": 12, "emotion": "fear"}]}
Hope you like it."#;

        let draft = parse_draft(reply).unwrap();
        assert_eq!(draft.title, "T");
        assert_eq!(draft.scenes.len(), 1);
        assert_eq!(draft.scenes[0].duration, Some(12));
    }

    #[test]
    fn parse_draft_rejects_plain_text() {
        assert!(parse_draft("no json here").is_err());
    }
}
