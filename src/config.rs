//! Runtime configuration, read from `BOARD_*` environment variables
//! (a `.env` file is honored).

use crate::errors::{BoardError, Result};
use serde::Deserialize;

const ENV_PREFIX: &str = "BOARD_";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HMAC secret for bearer tokens
    pub jwt_secret: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Store collection holding posts
    #[serde(default = "default_posts_collection")]
    pub posts_collection: String,
    /// Store collection holding comments
    #[serde(default = "default_comments_collection")]
    pub comments_collection: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_posts_collection() -> String {
    "items".to_string()
}

fn default_comments_collection() -> String {
    "comments".to_string()
}

fn default_token_ttl_hours() -> i64 {
    24
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_max_concurrent_requests() -> usize {
    256
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        envy::prefixed(ENV_PREFIX)
            .from_env()
            .map_err(|e| BoardError::Internal(format!("Invalid configuration: {}", e)))
    }

    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter(pairs)
            .map_err(|e| BoardError::Internal(format!("Invalid configuration: {}", e)))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
