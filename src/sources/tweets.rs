// Tweet fetching and normalization: timelines and mention search.

use anyhow::Result;
use serde_json::Value;
use tracing::info;

use super::client::TwitterClient;

/// A normalized tweet: just the fields the engine needs.
#[derive(Debug, Clone)]
pub struct TweetRecord {
    pub text: String,
    pub likes: u64,
    pub retweets: u64,
    pub replies: u64,
    pub quotes: u64,
    pub is_retweet: bool,
    pub created_at: Option<String>,
    pub author_handle: Option<String>,
    pub author_avatar: Option<String>,
}

fn u64_field(value: &Value, keys: &[&str]) -> u64 {
    keys.iter()
        .find_map(|key| value.get(key).and_then(Value::as_u64))
        .unwrap_or(0)
}

/// Normalize one raw tweet payload. Returns None for records without
/// text (media-only entries, tombstones): there is nothing to classify.
pub fn normalize_tweet(value: &Value) -> Option<TweetRecord> {
    let text = value
        .get("text")
        .or_else(|| value.get("full_text"))
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())?
        .to_string();

    // Retweets surface either as an embedded original or an RT prefix
    let is_retweet = value.get("retweeted_tweet").is_some_and(|v| !v.is_null())
        || text.starts_with("RT @");

    let author = value.get("author").or_else(|| value.get("user"));

    Some(TweetRecord {
        text,
        likes: u64_field(value, &["favorites", "favorite_count", "likes"]),
        retweets: u64_field(value, &["retweets", "retweet_count"]),
        replies: u64_field(value, &["replies", "reply_count"]),
        quotes: u64_field(value, &["quotes", "quote_count"]),
        is_retweet,
        created_at: value
            .get("created_at")
            .and_then(Value::as_str)
            .map(str::to_string),
        author_handle: author
            .and_then(|a| a.get("screen_name").or_else(|| a.get("username")))
            .and_then(Value::as_str)
            .map(str::to_string),
        author_avatar: author
            .and_then(|a| a.get("avatar").or_else(|| a.get("profile_image_url")))
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

/// Extract the tweet array from a payload, wherever this endpoint put it.
fn tweet_array(payload: &Value) -> &[Value] {
    payload
        .get("timeline")
        .or_else(|| payload.get("tweets"))
        .or_else(|| payload.get("results"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Fetch an account's recent tweets, newest first, up to `max_tweets`.
/// Unparseable entries are dropped, not propagated.
pub async fn fetch_recent_tweets(
    client: &TwitterClient,
    handle: &str,
    max_tweets: usize,
) -> Result<Vec<TweetRecord>> {
    let payload = client
        .get_json("timeline.php", &[("screenname", handle)])
        .await?;

    let tweets: Vec<TweetRecord> = tweet_array(&payload)
        .iter()
        .filter_map(normalize_tweet)
        .take(max_tweets)
        .collect();

    info!(count = tweets.len(), handle = handle, "Collected tweets");
    Ok(tweets)
}

/// Search recent mentions of a query (project handle or cashtag).
pub async fn fetch_mentions(
    client: &TwitterClient,
    query: &str,
    max_tweets: usize,
) -> Result<Vec<TweetRecord>> {
    let payload = client
        .get_json("search.php", &[("query", query), ("search_type", "Latest")])
        .await?;

    let mentions: Vec<TweetRecord> = tweet_array(&payload)
        .iter()
        .filter_map(normalize_tweet)
        .take(max_tweets)
        .collect();

    info!(count = mentions.len(), query = query, "Collected mentions");
    Ok(mentions)
}
