use std::time::Duration;

use crate::models::WebDavServer;

/// Connection settings for one WebDAV server.
#[derive(Debug, Clone)]
pub struct WebDavConnectionConfig {
    pub server_url: String,
    pub user_name: String,
    pub password: String,
    pub timeout_seconds: u64,
}

impl WebDavConnectionConfig {
    pub fn from_server(server: &WebDavServer, timeout_seconds: u64) -> Self {
        Self {
            server_url: server.server_url.clone(),
            user_name: server.user_name.clone(),
            password: server.password.clone(),
            timeout_seconds,
        }
    }

    /// Validates the configuration. Credentials may be empty (anonymous
    /// servers exist); the URL may not.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server_url.is_empty() {
            return Err(anyhow::anyhow!("Server URL cannot be empty"));
        }

        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            return Err(anyhow::anyhow!("Server URL must start with http:// or https://"));
        }

        Ok(())
    }

    /// Connection base with a trailing slash enforced.
    pub fn base_url(&self) -> String {
        let mut url = self.server_url.trim_end_matches('/').to_string();
        url.push('/');
        url
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
