// Error handling framework

use std::path::PathBuf;
use thiserror::Error;

/// Schedule-related errors
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid cron expression '{expression}': {reason}")]
    InvalidCronExpression { expression: String, reason: String },

    #[error("No next execution time available for expression '{expression}'")]
    NoNextExecution { expression: String },
}

/// Content loading errors
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Content resource not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse metadata {path}: {reason}")]
    MetadataParse { path: PathBuf, reason: String },

    #[error("Failed to read {path}: {reason}")]
    Io { path: PathBuf, reason: String },
}

/// Errors from the Mastodon REST API client
#[derive(Error, Debug)]
pub enum MastodonError {
    #[error("Media upload failed with status {status:?}: {message}")]
    Upload { status: Option<u16>, message: String },

    #[error("Status creation failed with status {status:?}: {message}")]
    Publish { status: Option<u16>, message: String },

    #[error("HTTP transport error: {0}")]
    Transport(String),

    #[error("Malformed API response: {0}")]
    MalformedResponse(String),
}

impl MastodonError {
    /// HTTP status code reported by the instance, if the request got that far.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            MastodonError::Upload { status, .. } | MastodonError::Publish { status, .. } => *status,
            _ => None,
        }
    }
}

/// Terminal error of one publishing run
#[derive(Error, Debug)]
pub enum PublishError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Mastodon(#[from] MastodonError),
}
