// Single-account scoring pipeline.
//
// Given a handle, this module:
// 1. Fetches the account record
// 2. Fetches its recent tweets and a follower sample
// 3. Runs the sentiment provider over the tweet texts
// 4. Builds the metrics snapshot and runs the full profile scorer
// 5. Returns a ProfileScoreResult ready for storage

use anyhow::{Context, Result};
use tracing::info;

use crate::db::models::ProfileScoreResult;
use crate::scoring::profile::{self, AccountMetrics, TWEET_SAMPLE_SIZE};
use crate::sentiment::traits::SentimentProvider;
use crate::sources::client::TwitterClient;
use crate::sources::{followers, profiles, tweets};

/// How many followers to sample for quality/verification estimates.
pub const FOLLOWER_SAMPLE_SIZE: usize = 100;

/// Build a complete profile score for a single account.
pub async fn score_account(
    client: &TwitterClient,
    sentiment: &dyn SentimentProvider,
    handle: &str,
) -> Result<ProfileScoreResult> {
    let account = profiles::fetch_account(client, handle)
        .await?
        .with_context(|| format!("No profile found for @{handle}"))?;
    score_fetched_account(client, sentiment, &account).await
}

/// Score an already-fetched account record. Callers that need the raw
/// record (follower counts, bio) fetch it themselves and come in here.
pub async fn score_fetched_account(
    client: &TwitterClient,
    sentiment: &dyn SentimentProvider,
    account: &profiles::AccountRecord,
) -> Result<ProfileScoreResult> {
    let handle = account.handle.as_str();
    let account_tweets = tweets::fetch_recent_tweets(client, handle, TWEET_SAMPLE_SIZE).await?;
    let follower_sample =
        followers::fetch_follower_sample(client, handle, FOLLOWER_SAMPLE_SIZE).await?;

    let texts: Vec<String> = account_tweets.iter().map(|t| t.text.clone()).collect();
    let sentiments = sentiment.score_batch(&texts).await?;

    let metrics = AccountMetrics::from_record(account, &account_tweets);
    let result = profile::score_profile(
        &account.handle,
        &metrics,
        &account_tweets,
        &follower_sample,
        &sentiments,
    );

    info!(
        handle = result.handle.as_str(),
        akari = result.akari_profile_score,
        authenticity = result.authenticity_score,
        influence = result.influence_score,
        signal = result.signal_density_score,
        farm_risk = result.farm_risk_score,
        "Scored account"
    );

    Ok(result)
}
