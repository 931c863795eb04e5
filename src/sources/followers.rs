// Follower sample fetching and normalization.
//
// The engine only ever needs a sample of a project's followers, enough
// to estimate follower quality and count verified followers. It never
// needs the complete list.

use anyhow::Result;
use serde_json::Value;
use tracing::info;

use super::client::TwitterClient;

/// A normalized follower: the fields the quality heuristics read.
#[derive(Debug, Clone)]
pub struct FollowerRecord {
    pub handle: String,
    pub followers: u64,
    pub following: u64,
    pub is_verified: bool,
    pub bio: Option<String>,
}

/// Normalize one raw follower entry. Returns None without a handle.
pub fn normalize_follower(value: &Value) -> Option<FollowerRecord> {
    let handle = value
        .get("screen_name")
        .or_else(|| value.get("username"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())?
        .to_string();

    let u64_field = |keys: &[&str]| {
        keys.iter()
            .find_map(|key| value.get(key).and_then(Value::as_u64))
            .unwrap_or(0)
    };

    Some(FollowerRecord {
        handle,
        followers: u64_field(&["followers_count", "sub_count", "followers"]),
        following: u64_field(&["friends_count", "friends", "following"]),
        is_verified: value
            .get("blue_verified")
            .or_else(|| value.get("verified"))
            .and_then(Value::as_bool)
            .unwrap_or(false),
        bio: value
            .get("description")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    })
}

/// Fetch a sample of an account's followers, up to `max_followers`.
pub async fn fetch_follower_sample(
    client: &TwitterClient,
    handle: &str,
    max_followers: usize,
) -> Result<Vec<FollowerRecord>> {
    let payload = client
        .get_json("followers.php", &[("screenname", handle)])
        .await?;

    let followers: Vec<FollowerRecord> = payload
        .get("followers")
        .or_else(|| payload.get("users"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
        .iter()
        .filter_map(normalize_follower)
        .take(max_followers)
        .collect();

    info!(
        count = followers.len(),
        handle = handle,
        "Collected follower sample"
    );
    Ok(followers)
}
