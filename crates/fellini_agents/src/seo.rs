//! SEO metadata agent.

use fellini_core::{
    serialized_tag_len, Genre, SeoMetadata, StoryScript, MAX_TAGS_SERIALIZED_LEN, MAX_TITLE_LEN,
};
use rand::seq::SliceRandom;
use std::path::Path;
use tracing::{debug, instrument};

const BASE_TAGS: [&str; 10] = [
    "shorts",
    "short film",
    "micro drama",
    "60 seconds",
    "short story",
    "plot twist",
    "viral shorts",
    "must watch",
    "AI generated",
    "storytelling",
];

const TITLE_MODIFIERS: [&str; 6] = [
    "| 60 Second Story",
    "| Micro Drama",
    "| Short Story",
    "| Must Watch",
    "| Plot Twist",
    "#Shorts",
];

const DESCRIPTION_HOOKS: [&str; 5] = [
    "You won't believe what happens...",
    "Wait for the ending...",
    "This will give you goosebumps...",
    "The twist will shock you...",
    "You need to see this...",
];

/// Derives upload metadata from a script.
///
/// Pure and synchronous: no external dependency, no fallback path. Output
/// always satisfies the host limits — title at most 100 characters, tag list
/// at most 500 characters serialized.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeoAgent;

impl SeoAgent {
    /// Create an SEO agent.
    pub fn new() -> Self {
        Self
    }

    /// Derive metadata for a script and its thumbnail.
    #[instrument(skip(self, script), fields(title = %script.title, genre = %script.genre))]
    pub fn metadata(&self, script: &StoryScript, thumbnail: &Path) -> SeoMetadata {
        let metadata = SeoMetadata {
            title: optimize_title(script),
            description: build_description(script),
            tags: build_tags(script),
            category: category_for(script.genre).to_string(),
            thumbnail_url: Some(thumbnail.display().to_string()),
        };

        debug!(title = %metadata.title, tag_count = metadata.tags.len(), "Metadata derived");
        metadata
    }

    /// The fixed hashtag set for a script.
    pub fn hashtags(&self, script: &StoryScript) -> Vec<String> {
        vec![
            "#Shorts".to_string(),
            "#YouTubeShorts".to_string(),
            format!("#{}", script.genre.to_string().replace('-', "")),
            "#ShortFilm".to_string(),
            "#MicroDrama".to_string(),
            "#ViralShorts".to_string(),
            "#StoryTime".to_string(),
            "#PlotTwist".to_string(),
            "#AIGenerated".to_string(),
            "#MustWatch".to_string(),
        ]
    }
}

fn genre_emoji(genre: Genre) -> &'static str {
    match genre {
        Genre::Romance | Genre::Emotional => "\u{1f494}",
        Genre::Horror => "\u{1f631}",
        Genre::SciFi => "\u{1f680}",
        Genre::Thriller => "\u{1f525}",
        Genre::Mystery => "\u{1f50d}",
        Genre::Comedy => "\u{1f602}",
        Genre::Action => "\u{26a1}",
    }
}

/// Front-load the genre emoji, append a viral modifier only when the result
/// still fits, and clamp to the host limit.
fn optimize_title(script: &StoryScript) -> String {
    let mut title = format!("{} {}", genre_emoji(script.genre), script.title);

    let modifier = TITLE_MODIFIERS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(TITLE_MODIFIERS[0]);

    if title.chars().count() + 1 + modifier.chars().count() <= MAX_TITLE_LEN {
        title.push(' ');
        title.push_str(modifier);
    }

    title.chars().take(MAX_TITLE_LEN).collect()
}

fn build_description(script: &StoryScript) -> String {
    let hook = DESCRIPTION_HOOKS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(DESCRIPTION_HOOKS[0]);

    let tone = script
        .metadata
        .as_ref()
        .and_then(|m| m.emotional_tone.clone())
        .unwrap_or_else(|| "Emotional storytelling".to_string());

    format!(
        "{hook}\n\n{script_hook}\n\nA {duration}-second {genre} micro-drama that will keep you \
         on the edge of your seat.\n\n\u{1f3ac} Genre: {genre}\n\u{23f1}\u{fe0f} Duration: \
         {duration} seconds\n\u{1f3ad} {tone}\n\n---\n\nSubscribe for more AI-generated \
         micro-dramas!\n\n#Shorts #MicroDrama #{genre} #ShortFilm #StoryTime #AIGenerated \
         #ViralShorts #MustWatch #PlotTwist #60Seconds",
        script_hook = script.hook,
        duration = script.duration_secs,
        genre = script.genre,
    )
}

fn genre_tags(genre: Genre) -> &'static [&'static str] {
    match genre {
        Genre::Romance => &["love story", "romance", "heartbreak", "emotional", "relationship"],
        Genre::Horror => &["horror", "scary", "creepy", "paranormal", "ghost story", "nightmare"],
        Genre::SciFi => &["sci-fi", "science fiction", "future", "technology", "AI", "space"],
        Genre::Thriller => &["thriller", "suspense", "mystery", "psychological", "intense"],
        Genre::Emotional => &["emotional", "touching", "heartwarming", "feelings", "tears"],
        Genre::Mystery => &["mystery", "detective", "investigation", "whodunit", "clues"],
        Genre::Comedy => &["comedy", "funny", "humor", "laugh", "entertainment"],
        Genre::Action => &["action", "adventure", "excitement", "intense", "thrilling"],
    }
}

/// Collect unique tags and greedily pack them under the serialized limit.
fn build_tags(script: &StoryScript) -> Vec<String> {
    let mut candidates: Vec<String> = BASE_TAGS.iter().map(|t| t.to_string()).collect();
    candidates.extend(genre_tags(script.genre).iter().map(|t| t.to_string()));

    if let Some(audience) = script
        .metadata
        .as_ref()
        .and_then(|m| m.target_audience.as_deref())
    {
        candidates.extend(
            audience
                .to_lowercase()
                .split(',')
                .map(|part| part.trim().to_string())
                .filter(|part| !part.is_empty()),
        );
    }

    candidates.push(script.genre.to_string());

    let mut tags: Vec<String> = Vec::new();
    for tag in candidates {
        if tags.contains(&tag) {
            continue;
        }
        let mut packed = tags.clone();
        packed.push(tag.clone());
        if serialized_tag_len(&packed) > MAX_TAGS_SERIALIZED_LEN {
            break;
        }
        tags.push(tag);
    }

    tags
}

fn category_for(genre: Genre) -> &'static str {
    match genre {
        Genre::Romance | Genre::Horror | Genre::Thriller | Genre::Mystery | Genre::Action => {
            "Film & Animation"
        }
        Genre::SciFi => "Science & Technology",
        Genre::Emotional => "People & Blogs",
        Genre::Comedy => "Comedy",
    }
}
