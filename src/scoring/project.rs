// Project scoring: the 0-1000 Akari project composite.
//
// Combines the official account's profile score, a weighted KOL average,
// externally supplied sentiment and CT-heat scores, and inner-circle and
// community statistics with fixed weights. A simplified variant exists
// for projects with sparse tweet history.

use crate::db::models::ProjectScoreResult;

/// Everything the project scorer needs, already fetched and computed.
#[derive(Debug, Clone, Default)]
pub struct ProjectScoreInputs {
    /// The official account's Akari profile score, 0-1000
    pub official_profile_score: u32,
    /// (KOL Akari score 0-1000, circle weight) pairs
    pub kol_scores: Vec<(u32, f64)>,
    /// Aggregated mention sentiment, 0-100
    pub sentiment_score: f64,
    /// CT Heat for the window, 0-100
    pub ct_heat_score: f64,
    pub inner_circle_count: usize,
    /// Sum of influence scores over the inner circle
    pub inner_circle_power: f64,
    /// Fraction of quality followers, 0-1
    pub quality_follower_ratio: f64,
    pub follower_delta: i64,
    pub previous_followers: i64,
    /// Current follower count, carried into the result so the next run
    /// can compute the delta
    pub followers: u64,
}

/// Compute the full project score from its inputs.
pub fn score_project(project_id: &str, inputs: &ProjectScoreInputs) -> ProjectScoreResult {
    let official = (inputs.official_profile_score as f64 / 10.0).round();
    let kol_average = kol_average_score(&inputs.kol_scores);
    let circle_impact = inner_circle_impact(inputs.inner_circle_count, inputs.inner_circle_power);
    let community = community_quality(
        inputs.quality_follower_ratio,
        inputs.follower_delta,
        inputs.previous_followers,
    );

    let combined = 0.30 * official
        + 0.20 * kol_average
        + 0.15 * inputs.sentiment_score
        + 0.15 * inputs.ct_heat_score
        + 0.10 * circle_impact
        + 0.10 * community;
    let akari = (combined * 10.0).clamp(0.0, 1000.0).round() as u32;

    ProjectScoreResult {
        project_id: project_id.to_string(),
        akari_project_score: akari,
        official_score: official as u32,
        kol_average: kol_average as u32,
        inner_circle_impact: circle_impact as u32,
        community_quality: community as u32,
        sentiment_score: inputs.sentiment_score.round() as u32,
        ct_heat_score: inputs.ct_heat_score.round() as u32,
        followers: inputs.followers,
        scored_at: String::new(),
    }
}

/// Weighted average of KOL scores on the 0-100 scale.
/// Defaults to the neutral 50 when there are no KOLs or no weight.
pub fn kol_average_score(kol_scores: &[(u32, f64)]) -> f64 {
    let total_weight: f64 = kol_scores.iter().map(|(_, w)| w).sum();
    if kol_scores.is_empty() || total_weight == 0.0 {
        return 50.0;
    }
    let weighted: f64 = kol_scores
        .iter()
        .map(|(score, weight)| *score as f64 / 10.0 * weight)
        .sum();
    (weighted / total_weight).clamp(0.0, 100.0).round()
}

/// Inner-circle impact: 30 members saturates the count term, 5000 total
/// influence saturates the power term.
pub fn inner_circle_impact(count: usize, power: f64) -> f64 {
    let count_term = (count as f64 / 30.0).min(1.0) * 60.0;
    let power_term = (power / 5000.0).min(1.0) * 40.0;
    (count_term + power_term).clamp(0.0, 100.0).round()
}

/// Community quality: follower quality plus a growth term that saturates
/// at 10% growth over the previous follower count. Growth is 0 when there
/// is no meaningful previous count.
pub fn community_quality(quality_ratio: f64, follower_delta: i64, previous_followers: i64) -> f64 {
    let growth = if previous_followers <= 0 {
        0.0
    } else {
        let rate = follower_delta as f64 / previous_followers as f64;
        (rate / 0.1).max(0.0).min(1.0)
    };
    (quality_ratio * 80.0 + growth * 20.0).clamp(0.0, 100.0).round()
}

/// Fixed likes/replies/retweets split the simplified pipeline uses when
/// only one averaged-engagement figure is available.
const SPARSE_SPLIT_LIKES: f64 = 0.70;
const SPARSE_SPLIT_REPLIES: f64 = 0.10;
const SPARSE_SPLIT_RETWEETS: f64 = 0.20;

/// Engagement rate at which the simplified engagement component saturates.
const SPARSE_RATE_CAP: f64 = 0.03;

/// Reserved floor score for zero-follower accounts in the simplified path.
pub const ZERO_FOLLOWER_SCORE: u32 = 100;

/// Inputs for the simplified sparse-history pipeline: one averaged
/// engagement figure instead of a tweet sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct SparseAccountInputs {
    pub followers: u64,
    /// Mean total engagement per post (likes + replies + retweets combined)
    pub avg_engagement: f64,
    pub account_age_years: f64,
    pub tweet_count: u64,
}

/// Simplified top-level score for projects with sparse tweet history
/// (fewer than 5 sampled tweets).
///
/// This is a documented shortcut, not part of the canonical profile
/// contract: per-type engagement is derived from the single averaged
/// figure with a fixed 70/10/20 likes/replies/retweets split, and
/// zero-follower accounts return the reserved floor of 100 directly.
pub fn compute_akari_score(inputs: &SparseAccountInputs) -> u32 {
    if inputs.followers == 0 {
        return ZERO_FOLLOWER_SCORE;
    }

    let likes = inputs.avg_engagement * SPARSE_SPLIT_LIKES;
    let replies = inputs.avg_engagement * SPARSE_SPLIT_REPLIES;
    let retweets = inputs.avg_engagement * SPARSE_SPLIT_RETWEETS;
    let rate = (likes + replies + retweets) / inputs.followers as f64;

    // Each component on the 0-1000 scale
    let engagement = (rate / SPARSE_RATE_CAP).min(1.0) * 1000.0;
    let reach = (((inputs.followers + 1) as f64).log10() / 6.0).min(1.0) * 1000.0;
    let maturity = (inputs.account_age_years / 2.0).min(1.0) * 1000.0;
    let activity = (inputs.tweet_count as f64 / 1000.0).min(1.0) * 1000.0;

    let combined = 0.45 * engagement + 0.30 * reach + 0.15 * maturity + 0.10 * activity;
    combined.clamp(0.0, 1000.0).round() as u32
}
