// RapidAPI Twitter client: a thin reqwest wrapper.
//
// All reads go through one generic GET helper that attaches the RapidAPI
// auth headers and deserializes into serde_json::Value. Normalization
// into typed records happens in the per-endpoint modules, because the
// upstream shapes vary too much to deserialize directly.

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

/// Default RapidAPI host for the Twitter endpoints.
pub const DEFAULT_RAPIDAPI_HOST: &str = "twitter-api45.p.rapidapi.com";

pub struct TwitterClient {
    client: reqwest::Client,
    host: String,
    api_key: String,
}

impl TwitterClient {
    /// Create a client for the given RapidAPI host and key.
    pub fn new(host: &str, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("akari/0.1")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            host: host.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Make a GET request to an endpoint and return the raw JSON.
    ///
    /// `endpoint` is the path (e.g. "screenname.php"); `params` are query
    /// string key-value pairs.
    pub async fn get_json(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value> {
        let url = format!("https://{}/{}", self.host, endpoint);

        debug!(endpoint = endpoint, "RapidAPI GET request");

        let response = self
            .client
            .get(&url)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.host)
            .query(params)
            .send()
            .await
            .with_context(|| format!("Request failed: {endpoint}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("{endpoint} returned {status}: {body}");
        }

        response
            .json::<Value>()
            .await
            .with_context(|| format!("Failed to deserialize {endpoint} response"))
    }
}
