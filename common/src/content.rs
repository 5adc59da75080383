// Content store for pre-authored image/metadata pairs
//
// Every postable item is a `<id>.jpg` image next to a `<id>.yaml` descriptor
// in the configured content directory. The descriptor carries the attribution
// data needed to compose the status text.

use crate::errors::ContentError;
use async_trait::async_trait;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

/// One postable unit: an image plus its metadata descriptor
#[derive(Debug, Clone)]
pub struct ContentItem {
    pub id: String,
    pub image_path: PathBuf,
    pub metadata_path: PathBuf,
}

impl ContentItem {
    /// Resolve the resource paths of an item inside the content directory
    pub fn in_dir<P: AsRef<Path>>(dir: P, id: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            id: id.to_string(),
            image_path: dir.join(format!("{id}.jpg")),
            metadata_path: dir.join(format!("{id}.yaml")),
        }
    }
}

/// Attribution metadata of a content item, read from its YAML descriptor
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ContentMetadata {
    pub author: String,
    pub url: String,
    pub description: String,
    pub license: License,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct License {
    pub name: String,
    pub url: String,
}

/// ContentStore provides read access to content item resources
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Load and decode the metadata descriptor of an item
    async fn load_metadata(&self, item: &ContentItem) -> Result<ContentMetadata, ContentError>;

    /// Load the raw image bytes of an item
    async fn load_image(&self, item: &ContentItem) -> Result<Vec<u8>, ContentError>;
}

/// Filesystem-backed content store
pub struct FileContentStore;

impl FileContentStore {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileContentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn map_io_error(path: &Path, err: std::io::Error) -> ContentError {
    if err.kind() == ErrorKind::NotFound {
        ContentError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        ContentError::Io {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }
}

#[async_trait]
impl ContentStore for FileContentStore {
    async fn load_metadata(&self, item: &ContentItem) -> Result<ContentMetadata, ContentError> {
        let raw = tokio::fs::read_to_string(&item.metadata_path)
            .await
            .map_err(|e| map_io_error(&item.metadata_path, e))?;

        serde_yaml::from_str(&raw).map_err(|e| ContentError::MetadataParse {
            path: item.metadata_path.clone(),
            reason: e.to_string(),
        })
    }

    async fn load_image(&self, item: &ContentItem) -> Result<Vec<u8>, ContentError> {
        tokio::fs::read(&item.image_path)
            .await
            .map_err(|e| map_io_error(&item.image_path, e))
    }
}

/// Count the `.jpg` files in the content directory.
///
/// Startup diagnostic only; an unreadable directory logs a warning and
/// reports zero instead of aborting the process.
pub async fn count_images<P: AsRef<Path>>(dir: P) -> usize {
    let dir = dir.as_ref();
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "Failed to read content directory");
            return 0;
        }
    };

    let mut count = 0;
    while let Ok(Some(entry)) = entries.next_entry().await {
        if entry.path().extension().is_some_and(|ext| ext == "jpg") {
            count += 1;
        }
    }
    count
}
