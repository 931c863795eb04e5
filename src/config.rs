use std::env;

use anyhow::Result;

use crate::sources::client::DEFAULT_RAPIDAPI_HOST;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file is
/// loaded automatically at startup via dotenvy.
pub struct Config {
    /// RapidAPI key for the Twitter endpoints
    pub rapidapi_key: String,
    /// RapidAPI host (defaults to the twitter-api45 instance)
    pub rapidapi_host: String,
    pub db_path: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Only the db path and host have defaults: the RapidAPI key is
    /// required for anything that fetches data.
    pub fn load() -> Result<Self> {
        Ok(Self {
            rapidapi_key: env::var("RAPIDAPI_KEY").unwrap_or_default(),
            rapidapi_host: env::var("RAPIDAPI_HOST")
                .unwrap_or_else(|_| DEFAULT_RAPIDAPI_HOST.to_string()),
            db_path: env::var("AKARI_DB_PATH").unwrap_or_else(|_| "./akari.db".to_string()),
        })
    }

    /// Check that the RapidAPI key is configured.
    /// Call this before any operation that fetches from Twitter.
    pub fn require_rapidapi(&self) -> Result<()> {
        if self.rapidapi_key.is_empty() {
            anyhow::bail!(
                "RAPIDAPI_KEY not set. Add it to your .env file.\n\
                 Only `init`, `tiers` and `status` work without it."
            );
        }
        Ok(())
    }
}
