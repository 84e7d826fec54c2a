use reqwest::{Client, Method};
use tracing::{debug, warn};

use crate::errors::RemoteListingError;

use super::config::WebDavConnectionConfig;

const PROPFIND_BODY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<D:propfind xmlns:D="DAV:">
    <D:prop>
        <D:displayname/>
        <D:resourcetype/>
        <D:getcontentlength/>
        <D:getlastmodified/>
    </D:prop>
</D:propfind>"#;

/// Authenticated HTTP client for one WebDAV server.
pub struct WebDavConnection {
    client: Client,
    config: WebDavConnectionConfig,
}

impl WebDavConnection {
    pub fn new(config: WebDavConnectionConfig) -> Result<Self, RemoteListingError> {
        config
            .validate()
            .map_err(|e| RemoteListingError::InvalidConfiguration {
                details: e.to_string(),
            })?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| RemoteListingError::InvalidConfiguration {
                details: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { client, config })
    }

    /// Issues one PROPFIND Depth-1 request against `url` and returns the raw
    /// multistatus body. Single attempt; the caller decides whether to retry.
    pub async fn propfind(&self, url: &str) -> Result<String, RemoteListingError> {
        debug!("PROPFIND {}", url);

        let method = Method::from_bytes(b"PROPFIND").expect("PROPFIND is a valid method token");
        let mut request = self
            .client
            .request(method, url)
            .header("Depth", "1")
            .header("Content-Type", "application/xml")
            .body(PROPFIND_BODY);

        if !self.config.user_name.is_empty() {
            request = request.basic_auth(&self.config.user_name, Some(&self.config.password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| RemoteListingError::Transport {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !(status.is_success() || status.as_u16() == 207) {
            warn!("PROPFIND {} failed with status {}", url, status);
            return Err(RemoteListingError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| RemoteListingError::Transport {
                url: url.to_string(),
                source: e,
            })
    }
}
