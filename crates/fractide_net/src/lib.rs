//! # Fractide Net
//!
//! Posting collaborator: publishes an assembled animation with its caption to
//! a Mastodon-compatible instance.
//!
//! The engine's only contract here is a file path and a deterministic caption;
//! this crate does the two-call dance (media upload, then status creation) and
//! surfaces failures as distinct kinds so the caller can decide whether to
//! discard, retry or escalate. Publishing never touches simulated state.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Environment variable overriding the configured token.
pub const TOKEN_ENV: &str = "FRACTIDE_TOKEN";

/// Publish failure kinds.
#[derive(Error, Debug)]
pub enum PostError {
    /// Missing or unusable credentials
    #[error("Credentials error: {0}")]
    Credentials(String),

    /// Transport-level failure (connection, TLS, timeouts)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service rejected the request
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// The animation file could not be read
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),
}

/// Result type alias for posting operations.
pub type Result<T> = std::result::Result<T, PostError>;

/// Instance base URL plus bearer token.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub base_url: String,
    pub token: String,
}

impl Credentials {
    /// Resolves credentials from configuration, letting the `FRACTIDE_TOKEN`
    /// environment variable override the configured token.
    pub fn resolve(base_url: &str, config_token: Option<&str>) -> Result<Self> {
        if base_url.is_empty() {
            return Err(PostError::Credentials("no base URL configured".into()));
        }
        let token = match std::env::var(TOKEN_ENV) {
            Ok(value) if !value.is_empty() => value,
            _ => config_token
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .ok_or_else(|| {
                    PostError::Credentials(format!(
                        "no token configured and {TOKEN_ENV} is unset"
                    ))
                })?,
        };
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }
}

#[derive(Deserialize)]
struct MediaResponse {
    id: String,
}

#[derive(Deserialize)]
struct StatusResponse {
    id: String,
    url: Option<String>,
}

/// Client for the posting service.
pub struct StatusClient {
    http: reqwest::Client,
    credentials: Credentials,
}

impl StatusClient {
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
        }
    }

    /// Uploads the animation and posts a status captioned with `caption`.
    /// Returns the created status id.
    pub async fn publish(&self, animation: &Path, caption: &str) -> Result<String> {
        let media_id = self.upload_media(animation).await?;
        let status = self.create_status(caption, &media_id).await?;
        tracing::info!(status = status.id, url = ?status.url, "Published animation");
        Ok(status.id)
    }

    async fn upload_media(&self, animation: &Path) -> Result<String> {
        let bytes = std::fs::read(animation)?;
        let file_name = animation
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "animation.gif".to_string());
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("image/gif")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/api/v2/media", self.credentials.base_url))
            .bearer_auth(&self.credentials.token)
            .multipart(form)
            .send()
            .await?;
        let media: MediaResponse = Self::expect_ok(response).await?.json().await?;
        Ok(media.id)
    }

    async fn create_status(&self, caption: &str, media_id: &str) -> Result<StatusResponse> {
        let response = self
            .http
            .post(format!("{}/api/v1/statuses", self.credentials.base_url))
            .bearer_auth(&self.credentials.token)
            .json(&serde_json::json!({
                "status": caption,
                "media_ids": [media_id],
            }))
            .send()
            .await?;
        Ok(Self::expect_ok(response).await?.json().await?)
    }

    async fn expect_ok(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(PostError::Api {
            status: status.as_u16(),
            body,
        })
    }
}
