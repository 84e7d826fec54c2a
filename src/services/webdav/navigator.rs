use tracing::debug;
use url::Url;

use crate::errors::RemoteListingError;
use crate::models::{RemoteResource, VideoItem};

use super::config::WebDavConnectionConfig;
use super::connection::WebDavConnection;
use super::xml_parser::parse_propfind_response;

/// One directory level of a WebDAV browse.
///
/// Navigation pushes a fresh navigator with an extended path; an existing
/// navigator is never rewound or mutated in place. All state mutation happens
/// on the caller's coordinating thread; `list` is the only suspending call
/// and one call per navigator should be outstanding at a time.
pub struct WebDavNavigator {
    config: WebDavConnectionConfig,
    connection: WebDavConnection,
    current_path: String,
}

impl WebDavNavigator {
    pub fn new(
        config: WebDavConnectionConfig,
        path: impl Into<String>,
    ) -> Result<Self, RemoteListingError> {
        let connection = WebDavConnection::new(config.clone())?;

        let path = path.into();
        let current_path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };

        Ok(Self {
            config,
            connection,
            current_path,
        })
    }

    /// Navigator for the server's root directory.
    pub fn root(config: WebDavConnectionConfig) -> Result<Self, RemoteListingError> {
        Self::new(config, "/")
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Composes the server base (trailing slash enforced) with the current
    /// path (leading slash stripped). Idempotent for fixed inputs.
    pub fn resolve_absolute_url(&self) -> String {
        let base = self.config.base_url();
        let path = self.current_path.trim_start_matches('/');
        format!("{base}{path}")
    }

    /// Lists the current directory: one PROPFIND round trip, then filter and
    /// sort. The entry for the directory itself and entries without a display
    /// name are dropped; collections sort before files, then display name
    /// ascending (stable, so equal names keep arrival order). An empty
    /// listing is a valid empty vec, not an error.
    pub async fn list(&self) -> Result<Vec<RemoteResource>, RemoteListingError> {
        let url = self.resolve_absolute_url();

        let body = self.connection.propfind(&url).await?;

        let raw = parse_propfind_response(&body).map_err(|e| {
            RemoteListingError::InvalidResponse {
                url: url.clone(),
                details: e.to_string(),
            }
        })?;

        let base = Url::parse(&url).map_err(|e| RemoteListingError::InvalidConfiguration {
            details: format!("cannot parse '{url}': {e}"),
        })?;

        let mut resources: Vec<RemoteResource> = raw
            .into_iter()
            .filter_map(|mut resource| {
                // Servers return hrefs as paths or full URLs; either way the
                // resource ends up with one absolute URL.
                resource.uri = base.join(&resource.uri).ok()?.to_string();
                Some(resource)
            })
            .filter(|r| r.uri.trim_end_matches('/') != url.trim_end_matches('/'))
            .filter(|r| !r.display_name.is_empty())
            .collect();

        resources.sort_by(|a, b| {
            b.is_collection
                .cmp(&a.is_collection)
                .then_with(|| a.display_name.cmp(&b.display_name))
        });

        debug!("listed {} resources under {}", resources.len(), url);
        Ok(resources)
    }

    /// Relative path of a child directory, usable as the path of the next
    /// navigator. Strips only the path portion of the server base from the
    /// resource URI, normalized to a leading slash.
    pub fn child_path(&self, resource: &RemoteResource) -> Result<String, RemoteListingError> {
        if !resource.is_collection {
            return Err(RemoteListingError::NotACollection {
                uri: resource.uri.clone(),
            });
        }

        let base =
            Url::parse(&self.config.base_url()).map_err(|e| {
                RemoteListingError::InvalidConfiguration {
                    details: format!("cannot parse server URL: {e}"),
                }
            })?;

        let resource_url =
            Url::parse(&resource.uri).map_err(|e| RemoteListingError::InvalidResponse {
                url: resource.uri.clone(),
                details: format!("resource URI is not absolute: {e}"),
            })?;

        let base_path = base.path().trim_end_matches('/');
        let resource_path = resource_url.path();
        // Only strip the base on a segment boundary; "/davx/y" is not under
        // a "/dav" base.
        let relative = match resource_path.strip_prefix(base_path) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => resource_path,
        };

        Ok(format!("/{}", relative.trim_start_matches('/')))
    }

    /// New navigator one level down, for a collection resource.
    pub fn descend(&self, resource: &RemoteResource) -> Result<Self, RemoteListingError> {
        let path = self.child_path(resource)?;
        Self::new(self.config.clone(), path)
    }

    /// Converts a file resource into a playlist entry. The full absolute URI
    /// becomes the playable URL, since playback happens outside the
    /// navigator's context and needs a self-sufficient address.
    pub fn to_playlist_entry(
        &self,
        resource: &RemoteResource,
    ) -> Result<VideoItem, RemoteListingError> {
        if resource.is_collection {
            return Err(RemoteListingError::NotAFile {
                uri: resource.uri.clone(),
            });
        }

        Ok(VideoItem::new(
            resource.display_name.clone(),
            resource.uri.clone(),
        ))
    }
}
