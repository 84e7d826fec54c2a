use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, warn};

use crate::storage::StorageBackend;

pub mod playlist;
pub mod servers;

pub use playlist::PlaylistRepository;
pub use servers::WebDavServerRegistry;

/// Reads one persisted JSON document. A missing key, an unreadable store or
/// malformed data all fall back to the empty default; the caller never fails.
pub(crate) fn read_document<T: DeserializeOwned + Default>(
    storage: &dyn StorageBackend,
    key: &str,
) -> T {
    match storage.get(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("malformed '{}' document, falling back to empty: {}", key, e);
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            warn!("failed to read '{}' document: {}", key, e);
            T::default()
        }
    }
}

/// Writes one persisted JSON document, last-write-wins. A failed write is
/// logged and the in-memory state stays authoritative until the next save.
pub(crate) fn write_document<T: Serialize + ?Sized>(
    storage: &dyn StorageBackend,
    key: &str,
    value: &T,
) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            error!("failed to serialize '{}' document: {}", key, e);
            return;
        }
    };

    if let Err(e) = storage.set(key, &raw) {
        warn!("failed to persist '{}' document: {}", key, e);
    }
}
