//! Flat-file OAuth token storage.

use chrono::{DateTime, Utc};
use fellini_error::{FelliniResult, JsonError, StoreError, StoreErrorKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// OAuth2 tokens for the video host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuthTokens {
    /// Bearer token sent with API calls
    pub access_token: String,
    /// Token used to mint fresh access tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// When the access token expires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Reads and writes the single JSON token file.
///
/// # Examples
///
/// ```no_run
/// use fellini_store::TokenStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = TokenStore::new("data/youtube_tokens.json");
/// if let Some(tokens) = store.load()? {
///     println!("token expires at {:?}", tokens.expires_at);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Create a token store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the token file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load tokens, returning `None` when no token file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> FelliniResult<Option<OAuthTokens>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No token file");
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            StoreError::new(StoreErrorKind::FileRead(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;

        let tokens = serde_json::from_str(&contents).map_err(|e| {
            JsonError::new(format!("{}: {}", self.path.display(), e))
        })?;

        Ok(Some(tokens))
    }

    /// Persist tokens, creating parent directories as needed.
    #[tracing::instrument(skip(self, tokens))]
    pub fn save(&self, tokens: &OAuthTokens) -> FelliniResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::new(StoreErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let contents = serde_json::to_string_pretty(tokens).map_err(|e| {
            StoreError::new(StoreErrorKind::Serialization(e.to_string()))
        })?;

        std::fs::write(&self.path, contents).map_err(|e| {
            StoreError::new(StoreErrorKind::FileWrite(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;

        tracing::debug!(path = %self.path.display(), "Saved tokens");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = std::env::temp_dir().join("fellini_token_test_missing");
        let store = TokenStore::new(dir.join("tokens.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = std::env::temp_dir().join("fellini_token_test_rt");
        let store = TokenStore::new(dir.join("tokens.json"));

        let tokens = OAuthTokens {
            access_token: "abc".to_string(),
            refresh_token: Some("def".to_string()),
            expires_at: None,
        };
        store.save(&tokens).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, tokens);

        std::fs::remove_dir_all(&dir).ok();
    }
}
