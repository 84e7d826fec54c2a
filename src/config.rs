use anyhow::Result;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub data_path: String,
    pub webdav_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            data_path: env::var("DAVPLAY_DATA_PATH")
                .unwrap_or_else(|_| "./davplay_store.json".to_string()),
            webdav_timeout_seconds: env::var("WEBDAV_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }
}
