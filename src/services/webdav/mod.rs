// WebDAV browsing modules organized by functionality

pub mod config;
pub mod connection;
pub mod navigator;
pub mod xml_parser;

// Re-export main types for convenience
pub use config::WebDavConnectionConfig;
pub use connection::WebDavConnection;
pub use navigator::WebDavNavigator;
