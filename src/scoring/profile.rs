// Profile scoring: the four sub-scores and the 0-1000 Akari composite.
//
// Two entry points share one composite formula:
// - `score_profile`: the canonical tweet-content-aware scorer
// - `score_profile_quick`: a metrics-only estimate for bulk paths
//   (scoring an entire follower list). Its sub-scores are cheaper
//   proxies, never interchangeable with full results: the `basis`
//   field on the result records which path produced it.

use chrono::{DateTime, Utc};

use crate::db::models::{ProfileScoreResult, ScoreBasis};
use crate::scoring::rules::ContentStats;
use crate::sources::followers::FollowerRecord;
use crate::sources::profiles::AccountRecord;
use crate::sources::tweets::TweetRecord;

/// How many recent tweets the full scorer samples.
pub const TWEET_SAMPLE_SIZE: usize = 50;

/// Immutable snapshot of one account's metrics, produced fresh per scoring
/// run. Optional upstream fields land here with their neutral defaults.
#[derive(Debug, Clone)]
pub struct AccountMetrics {
    pub followers: u64,
    pub following: u64,
    /// Age in years; None when the creation date was missing or unparseable
    pub account_age_years: Option<f64>,
    /// Mean per-post counts (from the sampled tweets, or upstream estimates)
    pub avg_likes: f64,
    pub avg_replies: f64,
    pub avg_retweets: f64,
    /// Std dev of per-post engagement; 0 when unavailable
    pub engagement_std_dev: f64,
    /// Follower-quality sample on a 0-100 scale; 50 (neutral) when unavailable
    pub follower_quality_sample: f64,
    /// Number of posts the averages were computed over
    pub sample_size: u32,
    pub is_blue_verified: bool,
    pub tweet_count: u64,
}

impl Default for AccountMetrics {
    fn default() -> Self {
        Self {
            followers: 0,
            following: 0,
            account_age_years: None,
            avg_likes: 0.0,
            avg_replies: 0.0,
            avg_retweets: 0.0,
            engagement_std_dev: 0.0,
            follower_quality_sample: 50.0,
            sample_size: 0,
            is_blue_verified: false,
            tweet_count: 0,
        }
    }
}

impl AccountMetrics {
    /// Build a metrics snapshot from a normalized account record and its
    /// sampled tweets.
    pub fn from_record(record: &AccountRecord, tweets: &[TweetRecord]) -> Self {
        let n = tweets.len().max(1) as f64;
        let avg_likes = tweets.iter().map(|t| t.likes as f64).sum::<f64>() / n;
        let avg_replies = tweets.iter().map(|t| t.replies as f64).sum::<f64>() / n;
        let avg_retweets = tweets.iter().map(|t| t.retweets as f64).sum::<f64>() / n;

        let account_age_years = record
            .created_at
            .as_deref()
            .and_then(parse_account_age_years);

        Self {
            followers: record.followers,
            following: record.following,
            account_age_years,
            avg_likes,
            avg_replies,
            avg_retweets,
            engagement_std_dev: engagement_std_dev(tweets),
            sample_size: tweets.len() as u32,
            is_blue_verified: record.is_blue_verified,
            tweet_count: record.tweet_count,
            ..Self::default()
        }
    }
}

/// Authenticity: start at 100, apply independent penalties, clamp to [0,100].
///
/// `engagement_rate` is mean per-tweet engagement divided by followers,
/// `account_age_days` is the account age in days; both are None when they
/// were never measured, which skips their penalties rather than treating
/// the account as dead or brand new. `follower_quality_ratio` and
/// `retweet_ratio` are 0-1 fractions.
pub fn authenticity_score(
    followers: u64,
    engagement_rate: Option<f64>,
    follower_quality_ratio: f64,
    retweet_ratio: f64,
    account_age_days: Option<f64>,
) -> f64 {
    let mut score: f64 = 100.0;

    // Big account with almost no engagement: likely bought followers
    if let Some(rate) = engagement_rate {
        if followers > 100_000 && rate < 0.0005 {
            score -= (1.0 - rate / 0.0005) * 40.0;
        }
    }

    // Low-quality follower base
    if follower_quality_ratio < 0.4 {
        score -= (1.0 - follower_quality_ratio / 0.4) * 30.0;
    }

    // Mostly-retweets timeline
    if retweet_ratio > 0.8 {
        score -= ((retweet_ratio - 0.8) / 0.2 * 10.0).min(10.0);
    }

    // Very young account
    if let Some(age_days) = account_age_days {
        if age_days < 90.0 {
            score -= (1.0 - age_days / 90.0) * 10.0;
        }
    }

    score.clamp(0.0, 100.0)
}

/// Influence: log-scaled follower reach (capped at 70) plus verification
/// bonuses. Well-defined at followers = 0 (log10(1) = 0).
pub fn influence_score(followers: u64, is_blue_verified: bool, verified_followers: u32) -> f64 {
    let follower_component = (((followers + 1) as f64).log10() / 6.0).min(1.0) * 70.0;
    let verified_bonus = if is_blue_verified { 10.0 } else { 0.0 };
    let network_bonus = (2.0 * verified_followers as f64).min(20.0);

    (follower_component + verified_bonus + network_bonus).clamp(0.0, 100.0)
}

/// Signal density: reward analysis/update content, penalize farming and
/// shilling, with an extra penalty for retweet-heavy timelines.
pub fn signal_density_score(stats: &ContentStats) -> f64 {
    let mut score = 100.0 * stats.signal_ratio()
        - 60.0 * stats.farming_ratio()
        - 40.0 * stats.shill_ratio();

    let retweet_ratio = stats.retweet_ratio();
    if retweet_ratio > 0.5 {
        score -= (retweet_ratio - 0.5) * 40.0;
    }

    score.clamp(0.0, 100.0)
}

/// Coefficient of variation of per-tweet engagement (likes+retweets+replies).
///
/// CV near zero means unnaturally uniform engagement: the signature of an
/// engagement pod. Defined as 1.0 when fewer than 2 tweets or mean is 0.
pub fn engagement_cv(tweets: &[TweetRecord]) -> f64 {
    if tweets.len() < 2 {
        return 1.0;
    }
    let values: Vec<f64> = tweets
        .iter()
        .map(|t| (t.likes + t.retweets + t.replies) as f64)
        .collect();
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    if mean == 0.0 {
        return 1.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt() / mean
}

// Endpoints disagree on timestamp formats: some return RFC 3339, the
// legacy ones return "Thu Apr 06 15:24:15 +0000 2017".
fn parse_account_age_years(ts: &str) -> Option<f64> {
    let created = DateTime::parse_from_rfc3339(ts)
        .or_else(|_| DateTime::parse_from_str(ts, "%a %b %d %H:%M:%S %z %Y"))
        .ok()?;
    let days = (Utc::now() - created.with_timezone(&Utc)).num_days();
    Some((days.max(0) as f64) / 365.0)
}

fn engagement_std_dev(tweets: &[TweetRecord]) -> f64 {
    if tweets.len() < 2 {
        return 0.0;
    }
    let values: Vec<f64> = tweets
        .iter()
        .map(|t| (t.likes + t.retweets + t.replies) as f64)
        .collect();
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Farm risk: 0-100 estimate of artificial engagement activity.
pub fn farm_risk_score(tweets: &[TweetRecord], engagement_rate: f64, followers: u64) -> f64 {
    // Rank by raw reach and take the top 5; too few tweets means there is
    // nothing to judge, so the risk is 0 rather than a guess.
    let mut by_reach: Vec<&TweetRecord> = tweets.iter().collect();
    by_reach.sort_by_key(|t| std::cmp::Reverse(t.likes + t.retweets));
    let top: Vec<&TweetRecord> = by_reach.into_iter().take(5).collect();
    if top.len() < 2 {
        return 0.0;
    }

    let mut risk: f64 = 0.0;

    // Implausibly high engagement on a small account
    if engagement_rate > 0.05 && followers < 5_000 {
        risk += 20.0;
    }

    // Unnaturally uniform engagement across a meaningful sample
    if engagement_cv(tweets) < 0.1 && tweets.len() > 10 {
        risk += 15.0;
    }

    risk.clamp(0.0, 100.0)
}

/// The shared composite formula. Farm risk discounts authenticity (each
/// risk point costs half an authenticity percent), then the three factors
/// combine 35/35/30 and scale to 0-1000.
///
/// Returns (composite on the 0-100 scale, rounded Akari score).
pub fn compose_akari(
    authenticity: f64,
    signal_density: f64,
    influence: f64,
    farm_risk: f64,
) -> (f64, u32) {
    let auth_final = authenticity * (1.0 - farm_risk * 0.5 / 100.0);
    let composite = 0.35 * auth_final + 0.35 * signal_density + 0.30 * influence;
    let akari = (composite * 10.0).clamp(0.0, 1000.0).round() as u32;
    (composite, akari)
}

/// Fraction of a follower sample that looks real: ≥200 followers or verified.
pub fn follower_quality_ratio(sample: &[FollowerRecord]) -> f64 {
    if sample.is_empty() {
        return 0.5; // neutral default when no sample was fetched
    }
    let quality = sample
        .iter()
        .filter(|f| f.followers >= 200 || f.is_verified)
        .count();
    quality as f64 / sample.len() as f64
}

fn mean_engagement_rate(tweets: &[TweetRecord], followers: u64) -> f64 {
    if followers == 0 {
        return 0.0;
    }
    let n = tweets.len().max(1) as f64;
    let mean = tweets
        .iter()
        .map(|t| (t.likes + t.replies + t.retweets + t.quotes) as f64)
        .sum::<f64>()
        / n;
    mean / followers as f64
}

/// The canonical full scorer: tweet-content-aware.
///
/// `sentiments` is the externally supplied per-tweet sentiment (0-100),
/// aligned with `tweets`; missing entries fall back to the neutral 50.
pub fn score_profile(
    handle: &str,
    metrics: &AccountMetrics,
    tweets: &[TweetRecord],
    follower_sample: &[FollowerRecord],
    sentiments: &[f64],
) -> ProfileScoreResult {
    let sampled: Vec<&TweetRecord> = tweets.iter().take(TWEET_SAMPLE_SIZE).collect();

    let stats = ContentStats::from_samples(sampled.iter().enumerate().map(|(i, t)| {
        (
            t.text.as_str(),
            sentiments.get(i).copied().unwrap_or(50.0),
            t.is_retweet,
        )
    }));

    let engagement_rate = mean_engagement_rate(tweets, metrics.followers);
    let quality_ratio = if follower_sample.is_empty() {
        metrics.follower_quality_sample / 100.0
    } else {
        follower_quality_ratio(follower_sample)
    };
    let verified_followers = follower_sample.iter().filter(|f| f.is_verified).count() as u32;

    let authenticity = authenticity_score(
        metrics.followers,
        (!tweets.is_empty()).then_some(engagement_rate),
        quality_ratio,
        stats.retweet_ratio(),
        metrics.account_age_years.map(|years| years * 365.0),
    );
    let influence = influence_score(metrics.followers, metrics.is_blue_verified, verified_followers);
    let signal_density = signal_density_score(&stats);
    let farm_risk = farm_risk_score(tweets, engagement_rate, metrics.followers);

    let (_, akari) = compose_akari(authenticity, signal_density, influence, farm_risk);

    ProfileScoreResult {
        handle: handle.to_string(),
        authenticity_score: authenticity,
        influence_score: influence,
        signal_density_score: signal_density,
        farm_risk_score: farm_risk,
        akari_profile_score: akari,
        engagement_rate,
        retweet_ratio: stats.retweet_ratio(),
        follower_quality_ratio: quality_ratio,
        tweets_analyzed: sampled.len() as u32,
        basis: ScoreBasis::Full,
        scored_at: String::new(),
    }
}

/// The quick scorer: estimates the four sub-scores from metrics alone.
///
/// Used for high-volume bulk scoring where fetching every account's
/// timeline is not affordable. Estimation differences from the full path:
/// - engagement rate comes from the per-post averages when a sample fed
///   them; without one the rate counts as unmeasured, not zero
/// - follower quality uses the upstream 0-100 sample field
/// - no retweet-ratio penalty (timeline composition unknown)
/// - no verified-follower bonus (no follower sample)
/// - signal density is a follow-graph/volume heuristic
/// - the farm-risk CV uses the upstream engagement std-dev field
///
/// The composite formula is identical to the full path.
pub fn score_profile_quick(handle: &str, metrics: &AccountMetrics) -> ProfileScoreResult {
    let mean_engagement = metrics.avg_likes + metrics.avg_replies + metrics.avg_retweets;
    // Per-post averages only exist when a tweet sample produced the
    // metrics; the bulk endpoints leave them at 0
    let engagement_rate = (metrics.sample_size > 0 && metrics.followers > 0)
        .then(|| mean_engagement / metrics.followers as f64);
    let quality_ratio = metrics.follower_quality_sample / 100.0;

    let authenticity = authenticity_score(
        metrics.followers,
        engagement_rate,
        quality_ratio,
        0.0,
        metrics.account_age_years.map(|years| years * 365.0),
    );
    let influence = influence_score(metrics.followers, metrics.is_blue_verified, 0);
    let signal_density = estimate_signal_density(metrics);
    let farm_risk = estimate_farm_risk(metrics, engagement_rate.unwrap_or(0.0), mean_engagement);

    let (_, akari) = compose_akari(authenticity, signal_density, influence, farm_risk);

    ProfileScoreResult {
        handle: handle.to_string(),
        authenticity_score: authenticity,
        influence_score: influence,
        signal_density_score: signal_density,
        farm_risk_score: farm_risk,
        akari_profile_score: akari,
        engagement_rate: engagement_rate.unwrap_or(0.0),
        retweet_ratio: 0.0,
        follower_quality_ratio: quality_ratio,
        tweets_analyzed: 0,
        basis: ScoreBasis::Quick,
        scored_at: String::new(),
    }
}

/// Metrics-only signal density estimate, anchored at the neutral 50.
///
/// An account followed by far more people than it follows tends to be a
/// content producer; a heavy follow-for-follow pattern tends not to be.
fn estimate_signal_density(metrics: &AccountMetrics) -> f64 {
    let mut score: f64 = 50.0;

    let follow_ratio = metrics.followers as f64 / metrics.following.max(1) as f64;
    if follow_ratio >= 10.0 {
        score += 20.0;
    } else if follow_ratio >= 2.0 {
        score += 10.0;
    }

    // Follow-for-follow pattern; the volume guard keeps tiny new accounts
    // from being punished for following a few dozen people
    if metrics.following > 100 && metrics.following > metrics.followers.saturating_mul(3) {
        score -= 15.0;
    }

    if metrics.tweet_count >= 1_000 {
        score += 10.0;
    } else if metrics.tweet_count < 50 {
        score -= 10.0;
    }

    score.clamp(0.0, 100.0)
}

fn estimate_farm_risk(metrics: &AccountMetrics, engagement_rate: f64, mean_engagement: f64) -> f64 {
    let mut risk: f64 = 0.0;

    if engagement_rate > 0.05 && metrics.followers < 5_000 {
        risk += 20.0;
    }

    if mean_engagement > 0.0 {
        let cv = metrics.engagement_std_dev / mean_engagement;
        if cv < 0.1 && metrics.sample_size > 10 {
            risk += 15.0;
        }
    }

    risk.clamp(0.0, 100.0)
}
