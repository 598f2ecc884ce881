//! YouTube Data API v3 client with OAuth2 credential exchange.

use crate::YouTubeConfig;
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use fellini_core::{SeoMetadata, VideoStatistics};
use fellini_error::{AgentError, AgentErrorKind, FelliniResult};
use fellini_interface::VideoHost;
use fellini_store::{OAuthTokens, TokenStore};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

const UPLOAD_URL: &str =
    "https://www.googleapis.com/upload/youtube/v3/videos?uploadType=multipart&part=snippet,status";
const THUMBNAIL_URL: &str = "https://www.googleapis.com/upload/youtube/v3/thumbnails/set";
const VIDEOS_URL: &str = "https://www.googleapis.com/youtube/v3/videos";
const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

const SCOPES: [&str; 3] = [
    "https://www.googleapis.com/auth/youtube.upload",
    "https://www.googleapis.com/auth/youtube",
    "https://www.googleapis.com/auth/youtube.force-ssl",
];

const UPLOAD_TIMEOUT_SECS: u64 = 300;
const API_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    statistics: RawStatistics,
}

// The API returns counts as strings
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStatistics {
    #[serde(default)]
    view_count: Option<String>,
    #[serde(default)]
    like_count: Option<String>,
    #[serde(default)]
    comment_count: Option<String>,
}

fn parse_count(raw: &Option<String>) -> u64 {
    raw.as_deref().and_then(|s| s.parse().ok()).unwrap_or(0)
}

/// YouTube Data API client.
///
/// Credentials come from [`YouTubeConfig`]; OAuth tokens persist in the flat
/// token file via [`TokenStore`].
pub struct YouTubeClient {
    client: Client,
    config: YouTubeConfig,
    tokens: TokenStore,
}

impl YouTubeClient {
    /// Create a new client from credentials and a token store.
    pub fn new(config: YouTubeConfig, tokens: TokenStore) -> Self {
        if !config.has_credentials() {
            warn!("YouTube credentials not configured");
        }
        Self {
            client: Client::new(),
            config,
            tokens,
        }
    }

    /// Build the consent URL the operator opens to authorize the app.
    ///
    /// Returns `None` when credentials are not configured.
    pub fn auth_url(&self) -> Option<String> {
        let client_id = self.config.client_id.as_deref()?;
        let scope = SCOPES.join(" ").replace(' ', "%20");
        Some(format!(
            "{AUTH_URL}?client_id={client_id}&redirect_uri={}&response_type=code&access_type=offline&scope={scope}",
            self.config.redirect_uri
        ))
    }

    /// Exchange an authorization code for tokens and persist them.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing, the token endpoint
    /// rejects the code, or the token file cannot be written.
    #[instrument(skip(self, code))]
    pub async fn exchange_code(&self, code: &str) -> FelliniResult<()> {
        let (client_id, client_secret) = self.credentials()?;

        let response = self
            .client
            .post(TOKEN_URL)
            .timeout(Duration::from_secs(API_TIMEOUT_SECS))
            .form(&[
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("code", code),
                ("redirect_uri", &self.config.redirect_uri),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| {
                AgentError::new(AgentErrorKind::Unreachable(format!("{TOKEN_URL}: {e}")))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::new(AgentErrorKind::ServiceError {
                status: status.as_u16(),
                message: body,
            })
            .into());
        }

        let token_response: TokenResponse = response.json().await.map_err(|e| {
            AgentError::new(AgentErrorKind::ParseError(e.to_string()))
        })?;

        self.tokens.save(&to_stored_tokens(token_response, None))?;
        debug!("Stored exchanged tokens");
        Ok(())
    }

    fn credentials(&self) -> FelliniResult<(&str, &str)> {
        match (
            self.config.client_id.as_deref(),
            self.config.client_secret.as_deref(),
        ) {
            (Some(id), Some(secret)) => Ok((id, secret)),
            _ => Err(AgentError::new(AgentErrorKind::MissingCredentials(
                "YouTube client id/secret".to_string(),
            ))
            .into()),
        }
    }

    /// Return a usable access token, refreshing it when expired.
    async fn access_token(&self) -> FelliniResult<String> {
        let tokens = self.tokens.load()?.ok_or_else(|| {
            AgentError::new(AgentErrorKind::MissingCredentials(
                "No stored OAuth tokens".to_string(),
            ))
        })?;

        let expired = tokens
            .expires_at
            .map(|at| at <= Utc::now())
            .unwrap_or(false);

        if !expired {
            return Ok(tokens.access_token);
        }

        let refresh_token = tokens.refresh_token.clone().ok_or_else(|| {
            AgentError::new(AgentErrorKind::MissingCredentials(
                "Access token expired and no refresh token stored".to_string(),
            ))
        })?;

        debug!("Refreshing expired access token");
        let (client_id, client_secret) = self.credentials()?;

        let response = self
            .client
            .post(TOKEN_URL)
            .timeout(Duration::from_secs(API_TIMEOUT_SECS))
            .form(&[
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("refresh_token", refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| {
                AgentError::new(AgentErrorKind::Unreachable(format!("{TOKEN_URL}: {e}")))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::new(AgentErrorKind::ServiceError {
                status: status.as_u16(),
                message: body,
            })
            .into());
        }

        let token_response: TokenResponse = response.json().await.map_err(|e| {
            AgentError::new(AgentErrorKind::ParseError(e.to_string()))
        })?;

        let stored = to_stored_tokens(token_response, Some(refresh_token));
        self.tokens.save(&stored)?;
        Ok(stored.access_token)
    }

    /// Numeric YouTube category id for a category name.
    fn category_id(category: &str) -> &'static str {
        match category {
            "Film & Animation" => "1",
            "Autos & Vehicles" => "2",
            "Music" => "10",
            "Pets & Animals" => "15",
            "Sports" => "17",
            "Travel & Events" => "19",
            "Gaming" => "20",
            "People & Blogs" => "22",
            "Comedy" => "23",
            "Entertainment" => "24",
            "News & Politics" => "25",
            "Howto & Style" => "26",
            "Education" => "27",
            "Science & Technology" => "28",
            "Nonprofits & Activism" => "29",
            _ => "24",
        }
    }
}

fn to_stored_tokens(response: TokenResponse, prior_refresh: Option<String>) -> OAuthTokens {
    OAuthTokens {
        access_token: response.access_token,
        refresh_token: response.refresh_token.or(prior_refresh),
        expires_at: response
            .expires_in
            .map(|secs| Utc::now() + ChronoDuration::seconds(secs)),
    }
}

#[async_trait]
impl VideoHost for YouTubeClient {
    #[instrument(skip(self, seo), fields(title = %seo.title, video = %video.display()))]
    async fn upload(&self, video: &Path, seo: &SeoMetadata) -> FelliniResult<String> {
        let token = self.access_token().await?;

        let video_bytes = tokio::fs::read(video).await.map_err(|e| {
            AgentError::new(AgentErrorKind::ArtifactWrite(format!(
                "{}: {}",
                video.display(),
                e
            )))
        })?;

        let metadata = json!({
            "snippet": {
                "title": seo.title,
                "description": seo.description,
                "tags": seo.tags,
                "categoryId": Self::category_id(&seo.category),
                "defaultLanguage": "en",
                "defaultAudioLanguage": "en",
            },
            "status": {
                "privacyStatus": "public",
                "selfDeclaredMadeForKids": false,
            },
        });

        let form = reqwest::multipart::Form::new()
            .part(
                "metadata",
                reqwest::multipart::Part::text(metadata.to_string())
                    .mime_str("application/json")
                    .map_err(|e| AgentError::new(AgentErrorKind::ParseError(e.to_string())))?,
            )
            .part(
                "media",
                reqwest::multipart::Part::bytes(video_bytes)
                    .mime_str("video/mp4")
                    .map_err(|e| AgentError::new(AgentErrorKind::ParseError(e.to_string())))?,
            );

        let response = self
            .client
            .post(UPLOAD_URL)
            .timeout(Duration::from_secs(UPLOAD_TIMEOUT_SECS))
            .bearer_auth(&token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to reach upload endpoint");
                AgentError::new(AgentErrorKind::Unreachable(format!("{UPLOAD_URL}: {e}")))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Upload rejected");
            return Err(AgentError::new(AgentErrorKind::ServiceError {
                status: status.as_u16(),
                message: body,
            })
            .into());
        }

        let uploaded: UploadResponse = response.json().await.map_err(|e| {
            AgentError::new(AgentErrorKind::ParseError(e.to_string()))
        })?;

        debug!(video_id = %uploaded.id, "Upload acknowledged");
        Ok(uploaded.id)
    }

    #[instrument(skip(self), fields(video_id = %video_id, thumbnail = %thumbnail.display()))]
    async fn set_thumbnail(&self, video_id: &str, thumbnail: &Path) -> FelliniResult<()> {
        let token = self.access_token().await?;

        let bytes = tokio::fs::read(thumbnail).await.map_err(|e| {
            AgentError::new(AgentErrorKind::ArtifactWrite(format!(
                "{}: {}",
                thumbnail.display(),
                e
            )))
        })?;

        let url = format!("{THUMBNAIL_URL}?videoId={video_id}");
        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(API_TIMEOUT_SECS))
            .bearer_auth(&token)
            .header("content-type", "image/png")
            .body(bytes)
            .send()
            .await
            .map_err(|e| {
                AgentError::new(AgentErrorKind::Unreachable(format!("{url}: {e}")))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AgentError::new(AgentErrorKind::ServiceError {
                status: status.as_u16(),
                message: "Thumbnail upload rejected".to_string(),
            })
            .into());
        }

        Ok(())
    }

    #[instrument(skip(self), fields(video_id = %video_id))]
    async fn statistics(&self, video_id: &str) -> FelliniResult<VideoStatistics> {
        let token = self.access_token().await?;

        let url = format!("{VIDEOS_URL}?part=statistics&id={video_id}");
        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(API_TIMEOUT_SECS))
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| {
                AgentError::new(AgentErrorKind::Unreachable(format!("{url}: {e}")))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::new(AgentErrorKind::ServiceError {
                status: status.as_u16(),
                message: body,
            })
            .into());
        }

        let listing: VideoListResponse = response.json().await.map_err(|e| {
            AgentError::new(AgentErrorKind::ParseError(e.to_string()))
        })?;

        let item = listing.items.first().ok_or_else(|| {
            AgentError::new(AgentErrorKind::ParseError(format!(
                "No statistics returned for {video_id}"
            )))
        })?;

        Ok(VideoStatistics {
            views: parse_count(&item.statistics.view_count),
            likes: parse_count(&item.statistics.like_count),
            comments: parse_count(&item.statistics.comment_count),
        })
    }

    fn is_configured(&self) -> bool {
        self.config.has_credentials() && matches!(self.tokens.load(), Ok(Some(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(with_credentials: bool) -> YouTubeConfig {
        YouTubeConfig {
            client_id: with_credentials.then(|| "client-id".to_string()),
            client_secret: with_credentials.then(|| "client-secret".to_string()),
            redirect_uri: "http://localhost:3000/api/auth/callback".to_string(),
        }
    }

    fn token_store(name: &str) -> TokenStore {
        TokenStore::new(std::env::temp_dir().join(name).join("tokens.json"))
    }

    #[test]
    fn auth_url_requires_credentials() {
        let client = YouTubeClient::new(config(false), token_store("fellini_yt_nocred"));
        assert!(client.auth_url().is_none());

        let client = YouTubeClient::new(config(true), token_store("fellini_yt_cred"));
        let url = client.auth_url().unwrap();
        assert!(url.starts_with(AUTH_URL));
        assert!(url.contains("client_id=client-id"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("youtube.upload"));
    }

    #[test]
    fn unconfigured_client_reports_not_configured() {
        let client = YouTubeClient::new(config(true), token_store("fellini_yt_notokens"));
        // Credentials alone are not enough without stored tokens
        assert!(!client.is_configured());
    }

    #[test]
    fn category_ids_default_to_entertainment() {
        assert_eq!(YouTubeClient::category_id("Film & Animation"), "1");
        assert_eq!(YouTubeClient::category_id("Science & Technology"), "28");
        assert_eq!(YouTubeClient::category_id("Unknown Category"), "24");
    }
}
