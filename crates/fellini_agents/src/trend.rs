//! Trend discovery agent.

use chrono::Utc;
use fellini_core::{Genre, TrendingTopic};
use fellini_store::RecordStore;
use rand::seq::IteratorRandom;
use strum::IntoEnumIterator;
use tracing::{instrument, warn};

/// Discovers trending topics for the next script.
///
/// The remote trend sources return nothing in this build, so the agent works
/// from a fixed synthetic catalog ranked by popularity. Catalog ordering is
/// deterministic; only the empty-catalog genre fallback is randomized.
pub struct TrendAgent {
    store: RecordStore,
}

impl TrendAgent {
    /// Create a trend agent backed by the given store.
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Discover trending topics, log them to the store, and return them
    /// ranked by popularity descending.
    ///
    /// Persistence failures are logged and do not fail the scan.
    #[instrument(skip(self))]
    pub async fn scan(&self) -> Vec<TrendingTopic> {
        let mut trends = self.remote_trends().await;
        trends.extend(synthetic_catalog());
        trends.sort_by(|a, b| b.popularity.cmp(&a.popularity));

        if let Err(e) = self.store.append_trends(&trends).await {
            warn!(error = %e, "Failed to log trending topics");
        }

        trends
    }

    /// The highest-popularity topic in the catalog.
    pub fn top_topic(&self) -> TrendingTopic {
        let mut catalog = synthetic_catalog();
        catalog.sort_by(|a, b| b.popularity.cmp(&a.popularity));
        match catalog.into_iter().next() {
            Some(topic) => topic,
            None => fallback_topic(),
        }
    }

    /// The genre of the highest-popularity topic, or a random genre when the
    /// catalog is empty.
    pub fn top_genre(&self) -> Genre {
        let mut catalog = synthetic_catalog();
        catalog.sort_by(|a, b| b.popularity.cmp(&a.popularity));
        catalog
            .first()
            .map(|topic| topic.genre)
            .unwrap_or_else(random_genre)
    }

    /// Trends from remote sources (video platforms, forums).
    ///
    /// Returns an empty list in this build; the synthetic catalog carries the
    /// pipeline.
    async fn remote_trends(&self) -> Vec<TrendingTopic> {
        Vec::new()
    }
}

fn random_genre() -> Genre {
    Genre::iter()
        .choose(&mut rand::thread_rng())
        .unwrap_or(Genre::Thriller)
}

fn fallback_topic() -> TrendingTopic {
    TrendingTopic {
        topic: "Untold story".to_string(),
        genre: random_genre(),
        popularity: 50,
        keywords: Vec::new(),
        source: "fallback".to_string(),
        timestamp: Utc::now(),
    }
}

fn entry(topic: &str, genre: Genre, popularity: u8, keywords: &[&str]) -> TrendingTopic {
    TrendingTopic {
        topic: topic.to_string(),
        genre,
        popularity,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        source: "synthetic".to_string(),
        timestamp: Utc::now(),
    }
}

/// The fixed synthetic trend catalog.
fn synthetic_catalog() -> Vec<TrendingTopic> {
    vec![
        entry(
            "Time loop confession",
            Genre::Romance,
            92,
            &["time travel", "confession", "second chance", "fate"],
        ),
        entry(
            "AI becomes sentient",
            Genre::SciFi,
            88,
            &["artificial intelligence", "consciousness", "humanity", "ethics"],
        ),
        entry(
            "Last message from future self",
            Genre::Thriller,
            95,
            &["future", "warning", "destiny", "paradox"],
        ),
        entry(
            "Ghost of lost love returns",
            Genre::Horror,
            85,
            &["ghost", "love", "unfinished business", "supernatural"],
        ),
        entry(
            "Parallel universe doppelganger",
            Genre::SciFi,
            90,
            &["multiverse", "identity", "choice", "alternate reality"],
        ),
        entry(
            "Memory thief steals first kiss",
            Genre::Emotional,
            87,
            &["memory", "theft", "love", "loss"],
        ),
        entry(
            "AI therapist reveals dark secret",
            Genre::Thriller,
            89,
            &["AI", "secrets", "therapy", "betrayal"],
        ),
        entry(
            "Clone falls for original",
            Genre::Romance,
            91,
            &["clone", "identity", "forbidden love", "science"],
        ),
        entry(
            "Last human uploads consciousness",
            Genre::SciFi,
            86,
            &["extinction", "digital immortality", "alone", "upload"],
        ),
        entry(
            "Childhood imaginary friend was real",
            Genre::Mystery,
            93,
            &["childhood", "imagination", "reality", "revelation"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_topic_is_highest_popularity() {
        let catalog = synthetic_catalog();
        let max = catalog.iter().map(|t| t.popularity).max().unwrap();

        let dir = std::env::temp_dir().join("fellini_trend_test");
        let store = RecordStore::open(&dir).unwrap();
        let agent = TrendAgent::new(store);

        let top = agent.top_topic();
        assert_eq!(top.popularity, max);
        assert_eq!(top.topic, "Last message from future self");
        assert_eq!(top.genre, Genre::Thriller);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn scan_ranks_descending_and_logs() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        let agent = TrendAgent::new(store.clone());

        let trends = agent.scan().await;
        assert!(!trends.is_empty());
        assert!(trends.windows(2).all(|w| w[0].popularity >= w[1].popularity));

        let logged = store.trends().await.unwrap();
        assert_eq!(logged.len(), trends.len());
    }
}
