// Account fetching and normalization.
//
// The upstream profile payloads are not stable across endpoints: counts
// show up under different key names depending on which API variant
// served the request. The normalizer probes the known aliases and gives
// up (returns None) when the record has no usable identity.

use anyhow::Result;
use serde_json::Value;
use tracing::info;

use super::client::TwitterClient;

/// A normalized account record: just the fields the engine needs.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub handle: String,
    pub followers: u64,
    pub following: u64,
    pub bio: Option<String>,
    pub is_blue_verified: bool,
    /// Creation timestamp as the upstream provided it (RFC 3339 or the
    /// legacy "Thu Apr 06 15:24:15 +0000 2017" shape)
    pub created_at: Option<String>,
    pub tweet_count: u64,
    pub avatar: Option<String>,
}

/// First matching u64 among the given keys, defaulting to 0.
fn u64_field(value: &Value, keys: &[&str]) -> u64 {
    keys.iter()
        .find_map(|key| value.get(key).and_then(Value::as_u64))
        .unwrap_or(0)
}

fn str_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn bool_field(value: &Value, keys: &[&str]) -> bool {
    keys.iter()
        .find_map(|key| value.get(key).and_then(Value::as_bool))
        .unwrap_or(false)
}

/// Normalize one raw profile payload into an AccountRecord.
///
/// Returns None when the record carries no handle: a profile we can't
/// identify is a profile we don't score.
pub fn normalize_account(value: &Value) -> Option<AccountRecord> {
    let handle = str_field(value, &["screen_name", "username", "profile"])?;

    Some(AccountRecord {
        handle,
        followers: u64_field(value, &["followers_count", "sub_count", "followers"]),
        following: u64_field(value, &["friends_count", "friends", "following"]),
        bio: str_field(value, &["description", "desc", "bio"]),
        is_blue_verified: bool_field(value, &["blue_verified", "is_blue_verified", "verified"]),
        created_at: str_field(value, &["created_at", "creation_date"]),
        tweet_count: u64_field(value, &["statuses_count", "tweet_count", "number_of_tweets"]),
        avatar: str_field(value, &["avatar", "profile_image_url", "image"]),
    })
}

/// Fetch one account's profile. Returns None for unknown handles or
/// payloads the normalizer rejects.
pub async fn fetch_account(client: &TwitterClient, handle: &str) -> Result<Option<AccountRecord>> {
    let payload = client
        .get_json("screenname.php", &[("screenname", handle)])
        .await?;

    let record = normalize_account(&payload);
    if let Some(ref account) = record {
        info!(
            handle = account.handle,
            followers = account.followers,
            "Fetched account"
        );
    }
    Ok(record)
}
