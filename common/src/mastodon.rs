// Mastodon REST API client
//
// Only the two endpoints the bot needs: media upload (v2) and status
// creation (v1). Both authenticate with the configured bearer token.

use crate::config::MastodonConfig;
use crate::errors::MastodonError;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

/// MIME type sent with every media upload
pub const IMAGE_JPEG: &str = "image/jpeg";

/// Visibility of a published status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Unlisted,
    Private,
    Direct,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Unlisted => "unlisted",
            Visibility::Private => "private",
            Visibility::Direct => "direct",
        }
    }
}

/// StatusClient defines the remote capabilities the publishing pipeline needs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusClient: Send + Sync {
    /// Upload an image and return the media attachment id
    async fn upload_media(
        &self,
        bytes: Vec<u8>,
        mime_type: &str,
        alt_text: &str,
    ) -> Result<String, MastodonError>;

    /// Publish a status referencing previously uploaded media and return its id
    async fn create_status(
        &self,
        text: &str,
        media_ids: &[String],
        visibility: Visibility,
        language: &str,
    ) -> Result<String, MastodonError>;
}

#[derive(Debug, Deserialize)]
struct MediaAttachment {
    id: String,
}

#[derive(Debug, Deserialize)]
struct Status {
    id: String,
}

/// StatusClient implementation over the Mastodon HTTP API
pub struct ApiStatusClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl ApiStatusClient {
    /// Create a client for the configured instance.
    ///
    /// The read timeout applies to both endpoints; media uploads on slow
    /// instances can take minutes.
    pub fn new(config: &MastodonConfig) -> Result<Self, MastodonError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.read_timeout_seconds))
            .build()
            .map_err(|e| {
                MastodonError::Transport(format!("Failed to create HTTP client: {e}"))
            })?;

        info!(instance_url = %config.instance_url, "Mastodon client created");

        Ok(Self {
            client,
            base_url: config.instance_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }
}

#[async_trait]
impl StatusClient for ApiStatusClient {
    #[tracing::instrument(skip(self, bytes, alt_text), fields(size = bytes.len()))]
    async fn upload_media(
        &self,
        bytes: Vec<u8>,
        mime_type: &str,
        alt_text: &str,
    ) -> Result<String, MastodonError> {
        let part = Part::bytes(bytes)
            .file_name("image.jpg")
            .mime_str(mime_type)
            .map_err(|e| MastodonError::Transport(format!("Invalid MIME type: {e}")))?;
        let form = Form::new()
            .part("file", part)
            .text("description", alt_text.to_string());

        let response = self
            .client
            .post(format!("{}/api/v2/media", self.base_url))
            .bearer_auth(&self.access_token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| MastodonError::Transport(e.to_string()))?;

        let status = response.status();
        debug!(status = %status, "Media upload response received");

        // 202 means the instance is still processing the attachment; the id
        // is already usable for status creation.
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MastodonError::Upload {
                status: Some(status.as_u16()),
                message: body,
            });
        }

        let attachment: MediaAttachment = response
            .json()
            .await
            .map_err(|e| MastodonError::MalformedResponse(e.to_string()))?;

        Ok(attachment.id)
    }

    #[tracing::instrument(skip(self, text))]
    async fn create_status(
        &self,
        text: &str,
        media_ids: &[String],
        visibility: Visibility,
        language: &str,
    ) -> Result<String, MastodonError> {
        let body = json!({
            "status": text,
            "media_ids": media_ids,
            "visibility": visibility.as_str(),
            "language": language,
        });

        let response = self
            .client
            .post(format!("{}/api/v1/statuses", self.base_url))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| MastodonError::Transport(e.to_string()))?;

        let status = response.status();
        debug!(status = %status, "Status creation response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MastodonError::Publish {
                status: Some(status.as_u16()),
                message: body,
            });
        }

        let posted: Status = response
            .json()
            .await
            .map_err(|e| MastodonError::MalformedResponse(e.to_string()))?;

        Ok(posted.id)
    }
}
