use std::sync::Arc;

use crate::errors::PersistenceError;
use crate::models::{PlayHistory, VideoItem};
use crate::storage::StorageBackend;

use super::{read_document, write_document};

pub const PLAYLIST_KEY: &str = "playlist";
pub const PLAY_HISTORY_KEY: &str = "play_history";

/// Owns the ordered playlist and fronts the play-history document.
///
/// Playlist and history are two independently persisted documents, so a
/// corrupt or reset history never threatens the playlist and vice versa.
/// Every mutation persists immediately (last-write-wins, no merge).
pub struct PlaylistRepository {
    storage: Arc<dyn StorageBackend>,
    items: Vec<VideoItem>,
}

impl PlaylistRepository {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        let items = read_document(&*storage, PLAYLIST_KEY);
        Self { storage, items }
    }

    /// Re-reads the playlist document from storage. Missing or malformed
    /// data yields an empty list, never an error.
    pub fn load(&self) -> Vec<VideoItem> {
        read_document(&*self.storage, PLAYLIST_KEY)
    }

    /// Persists the full ordered sequence.
    pub fn save(&self, items: &[VideoItem]) {
        write_document(&*self.storage, PLAYLIST_KEY, items);
    }

    pub fn items(&self) -> &[VideoItem] {
        &self.items
    }

    pub fn append(&mut self, item: VideoItem) {
        self.items.push(item);
        self.save(&self.items);
    }

    /// Removes the entry at `index` and persists. Out of range is reported,
    /// not fatal; nothing changes.
    pub fn remove_at(&mut self, index: usize) -> Result<VideoItem, PersistenceError> {
        if index >= self.items.len() {
            return Err(PersistenceError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }

        let removed = self.items.remove(index);
        self.save(&self.items);
        Ok(removed)
    }

    pub fn load_history(&self) -> PlayHistory {
        read_document(&*self.storage, PLAY_HISTORY_KEY)
    }

    pub fn save_history(&self, history: &PlayHistory) {
        write_document(&*self.storage, PLAY_HISTORY_KEY, history);
    }
}
