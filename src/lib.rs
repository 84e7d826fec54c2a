pub mod config;
pub mod errors;
pub mod models;
pub mod playback;
pub mod repositories;
pub mod services;
pub mod storage;
