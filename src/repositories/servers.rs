use std::sync::Arc;

use crate::errors::PersistenceError;
use crate::models::WebDavServer;
use crate::storage::StorageBackend;

use super::{read_document, write_document};

pub const WEBDAV_SERVERS_KEY: &str = "webdav_servers";

/// Owns the ordered list of configured WebDAV servers.
pub struct WebDavServerRegistry {
    storage: Arc<dyn StorageBackend>,
    servers: Vec<WebDavServer>,
}

impl WebDavServerRegistry {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        let servers = read_document(&*storage, WEBDAV_SERVERS_KEY);
        Self { storage, servers }
    }

    pub fn load(&self) -> Vec<WebDavServer> {
        read_document(&*self.storage, WEBDAV_SERVERS_KEY)
    }

    pub fn save(&self, servers: &[WebDavServer]) {
        write_document(&*self.storage, WEBDAV_SERVERS_KEY, servers);
    }

    pub fn servers(&self) -> &[WebDavServer] {
        &self.servers
    }

    /// Adds a server and persists. A blank title defaults to the server URL.
    pub fn add(&mut self, mut server: WebDavServer) {
        if server.title.trim().is_empty() {
            server.title = server.server_url.clone();
        }
        self.servers.push(server);
        self.save(&self.servers);
    }

    pub fn remove_at(&mut self, index: usize) -> Result<WebDavServer, PersistenceError> {
        if index >= self.servers.len() {
            return Err(PersistenceError::IndexOutOfRange {
                index,
                len: self.servers.len(),
            });
        }

        let removed = self.servers.remove(index);
        self.save(&self.servers);
        Ok(removed)
    }

    /// Normalized connection base for a server: trailing slash enforced.
    pub fn url_for(&self, server: &WebDavServer) -> String {
        let mut url = server.server_url.trim_end_matches('/').to_string();
        url.push('/');
        url
    }
}
