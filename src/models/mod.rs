use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::errors::FileAccessError;

/// Resume positions keyed by video URL, in elapsed seconds.
pub type PlayHistory = HashMap<String, f64>;

/// One entry in the playlist. Identity is the `url`, which is also the key
/// into the play-history map. The URL is either a local file path or an
/// absolute network address; either way it is self-sufficient for playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoItem {
    pub title: String,
    pub url: String,
}

impl VideoItem {
    /// A blank title defaults to the URL itself.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        let title = title.into();
        let title = if title.trim().is_empty() {
            url.clone()
        } else {
            title
        };
        Self { title, url }
    }

    /// Builds an entry for a local media file, using the file name as title.
    pub fn from_local_file(path: impl AsRef<Path>) -> Result<Self, FileAccessError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let metadata = std::fs::metadata(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FileAccessError::NotFound {
                    path: display.clone(),
                }
            } else {
                FileAccessError::Unreadable {
                    path: display.clone(),
                    source: e,
                }
            }
        })?;

        if !metadata.is_file() {
            return Err(FileAccessError::NotAFile { path: display });
        }

        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| display.clone());

        Ok(Self::new(title, display))
    }
}

/// A configured WebDAV server connection. Serialized field names match the
/// stored document layout (`{title, serverUrl, userName, password}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebDavServer {
    pub title: String,
    pub server_url: String,
    pub user_name: String,
    pub password: String,
}

/// One resource from a WebDAV directory listing. Not persisted; lives only
/// for the duration of one listing render.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteResource {
    /// Absolute URL of the resource.
    pub uri: String,
    pub display_name: String,
    pub is_collection: bool,
    pub content_length: Option<u64>,
    pub last_modified: Option<DateTime<Utc>>,
}
