//! SEO metadata derived from a script.

use serde::{Deserialize, Serialize};

/// Maximum title length accepted by the video host.
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum serialized length of the tag list (tags joined by one separator
/// character each).
pub const MAX_TAGS_SERIALIZED_LEN: usize = 500;

/// Upload metadata derived once from a [`crate::StoryScript`].
///
/// Immutable after derivation. The SEO stage guarantees
/// `title.chars().count() <= MAX_TITLE_LEN` and
/// `serialized_tag_len(&tags) <= MAX_TAGS_SERIALIZED_LEN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoMetadata {
    /// Upload title, at most [`MAX_TITLE_LEN`] characters
    pub title: String,
    /// Upload description
    pub description: String,
    /// Unique tag list, bounded by [`MAX_TAGS_SERIALIZED_LEN`] when serialized
    pub tags: Vec<String>,
    /// Host category name (e.g. "Film & Animation")
    pub category: String,
    /// Path or URL of the thumbnail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// Serialized length of a tag list: each tag's characters plus one separator
/// character per tag.
pub fn serialized_tag_len(tags: &[String]) -> usize {
    tags.iter().map(|t| t.chars().count() + 1).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_len_counts_separators() {
        let tags = vec!["ab".to_string(), "cde".to_string()];
        assert_eq!(serialized_tag_len(&tags), 3 + 4);
        assert_eq!(serialized_tag_len(&[]), 0);
    }
}
