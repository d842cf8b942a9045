use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// REST API connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL, e.g. "https://api.bishnoi.example".
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Connection timeout in seconds (default: 10).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Platform name sent with the version check.
    #[serde(default = "default_platform")]
    pub platform: String,
}

/// Read-only content feed settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_feed_base_url")]
    pub base_url: String,
    /// Articles per page, 1..=100 (default: 10).
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Minimum password length (default: 8).
    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Where the auth token is persisted. Kept in memory when unset.
    #[serde(default)]
    pub token_file: Option<PathBuf>,
}

fn default_api_base_url() -> String {
    "https://api.bishnoi.example".to_string()
}

fn default_feed_base_url() -> String {
    "https://news.bishnoi.example".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("bishnoi-client/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_platform() -> String {
    std::env::consts::OS.to_string()
}

fn default_per_page() -> u32 {
    10
}

fn default_password_min_length() -> usize {
    8
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            user_agent: default_user_agent(),
            platform: default_platform(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: default_feed_base_url(),
            per_page: default_per_page(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            password_min_length: default_password_min_length(),
        }
    }
}
