//! Story genres.

use serde::{Deserialize, Serialize};

/// Genres the pipeline can write for.
///
/// The wire form is kebab-case (`"sci-fi"`), matching the genre keys used in
/// trend catalogs and SEO category mappings.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Genre {
    /// Love stories and heartbreak
    Romance,
    /// Supernatural dread
    Horror,
    /// Science fiction
    SciFi,
    /// Suspense and paranoia
    Thriller,
    /// Tearjerkers
    Emotional,
    /// Whodunits and revelations
    Mystery,
    /// Humor
    Comedy,
    /// High-stakes excitement
    Action,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn kebab_case_round_trip() {
        assert_eq!(Genre::SciFi.to_string(), "sci-fi");
        assert_eq!(Genre::from_str("sci-fi").unwrap(), Genre::SciFi);
        assert_eq!(
            serde_json::to_string(&Genre::SciFi).unwrap(),
            "\"sci-fi\""
        );
    }
}
