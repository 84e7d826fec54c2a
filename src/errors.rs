use thiserror::Error;

/// Errors from the local key/value persistence layer.
///
/// Load paths recover from these by falling back to an empty default; they
/// are logged but never surfaced as a user-facing failure. The one exception
/// is `IndexOutOfRange`, which is reported to the caller of a removal.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("storage I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode or decode stored document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors from a WebDAV directory listing or resource conversion.
///
/// Surfaced to the caller as-is; a listing is a single attempt and the
/// caller decides whether to retry.
#[derive(Error, Debug)]
pub enum RemoteListingError {
    #[error("transport failure talking to '{url}': {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("server returned status {status} for '{url}'")]
    Status { url: String, status: u16 },

    #[error("unparseable listing response from '{url}': {details}")]
    InvalidResponse { url: String, details: String },

    #[error("invalid server configuration: {details}")]
    InvalidConfiguration { details: String },

    #[error("resource '{uri}' is not a collection")]
    NotACollection { uri: String },

    #[error("resource '{uri}' is not a file")]
    NotAFile { uri: String },
}

/// Errors while picking up a local media file.
#[derive(Error, Debug)]
pub enum FileAccessError {
    #[error("file not found: {path}")]
    NotFound { path: String },

    #[error("not a regular file: {path}")]
    NotAFile { path: String },

    #[error("cannot read '{path}': {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
