// Scoring engine tests: bounds, determinism and worked examples for
// the pure scoring functions, exercised through the public crate API.

use akari::scoring::heat::{compute_ct_heat_score, MentionWindow};
use akari::scoring::profile::{
    authenticity_score, compose_akari, farm_risk_score, influence_score, score_profile,
    score_profile_quick, signal_density_score, AccountMetrics,
};
use akari::scoring::project::{
    compute_akari_score, score_project, ProjectScoreInputs, SparseAccountInputs,
};
use akari::scoring::rules::ContentStats;
use akari::scoring::sentiment::{aggregate_sentiment_score, SentimentObservation};
use akari::scoring::tier::{assign_tier, Tier};
use akari::sources::tweets::TweetRecord;

fn tweet(text: &str, likes: u64, retweets: u64, replies: u64) -> TweetRecord {
    TweetRecord {
        text: text.to_string(),
        likes,
        retweets,
        replies,
        quotes: 0,
        is_retweet: false,
        created_at: None,
        author_handle: None,
        author_avatar: None,
    }
}

// ============================================================
// Tiers: every score has exactly one tier
// ============================================================

#[test]
fn every_score_maps_to_exactly_one_tier() {
    for score in 0..=1000u32 {
        let tier = Tier::from_score(score);
        let (lo, hi) = tier.range();
        assert!(
            (lo..=hi).contains(&score),
            "{score} landed outside its tier band {lo}-{hi}"
        );
        let others = Tier::all()
            .iter()
            .filter(|t| {
                let (lo, hi) = t.range();
                (lo..=hi).contains(&score)
            })
            .count();
        assert_eq!(others, 1, "{score} matched {others} tiers");
    }
}

#[test]
fn tier_band_edges() {
    assert_eq!(Tier::from_score(0), Tier::Shadow);
    assert_eq!(Tier::from_score(399), Tier::Shadow);
    assert_eq!(Tier::from_score(400), Tier::Nomad);
    assert_eq!(Tier::from_score(549), Tier::Nomad);
    assert_eq!(Tier::from_score(550), Tier::Ranger);
    assert_eq!(Tier::from_score(749), Tier::Ranger);
    assert_eq!(Tier::from_score(750), Tier::Vanguard);
    assert_eq!(Tier::from_score(899), Tier::Vanguard);
    assert_eq!(Tier::from_score(900), Tier::Celestial);
    assert_eq!(Tier::from_score(1000), Tier::Celestial);
}

#[test]
fn missing_score_is_shadow_unranked() {
    let assignment = assign_tier(None);
    assert_eq!(assignment.tier, Tier::Shadow);
    assert!(assignment.description.contains("Unranked"));
}

// ============================================================
// Sub-scores: extreme inputs stay in range
// ============================================================

#[test]
fn authenticity_bounded_under_extreme_inputs() {
    let cases = [
        (0u64, Some(0.0), 0.0, 0.0, Some(0.0)),
        (u64::MAX / 2, Some(0.0), 0.0, 1.0, Some(0.0)),
        (1_000_000, Some(10.0), 1.0, 0.0, Some(10_000.0)),
        (u64::MAX / 2, None, 0.0, 1.0, None),
    ];
    for (followers, rate, quality, rt, age) in cases {
        let score = authenticity_score(followers, rate, quality, rt, age);
        assert!(
            (0.0..=100.0).contains(&score),
            "authenticity out of range: {score}"
        );
    }
}

#[test]
fn quick_path_penalizes_only_measured_engagement() {
    // A bulk fetch carries no per-post averages: the bought-follower
    // penalty must wait for real data instead of assuming zero engagement
    let unmeasured = AccountMetrics {
        followers: 500_000,
        following: 1_200,
        account_age_years: Some(3.0),
        tweet_count: 8_000,
        ..Default::default()
    };
    let result = score_profile_quick("big", &unmeasured);
    assert_eq!(result.authenticity_score, 100.0);

    // The same account with a measured near-zero rate is penalized
    let measured = AccountMetrics {
        avg_likes: 5.0,
        sample_size: 20,
        ..unmeasured
    };
    let penalized = score_profile_quick("big", &measured);
    assert!(penalized.authenticity_score < result.authenticity_score);
}

#[test]
fn influence_bounded_and_monotone() {
    assert_eq!(influence_score(0, false, 0), 0.0);
    assert!(influence_score(u64::MAX / 2, true, u32::MAX) <= 100.0);

    let mut prev = 0.0;
    for exp in 0..12 {
        let score = influence_score(10u64.pow(exp), false, 0);
        assert!(score >= prev);
        prev = score;
    }
}

#[test]
fn signal_density_bounded() {
    // All farming and shill: floor at 0
    let bad = ContentStats::from_samples(
        std::iter::repeat(("airdrop giveaway, use my code", 50.0, true)).take(20),
    );
    assert_eq!(signal_density_score(&bad), 0.0);

    // All signal: ceiling at 100
    let good = ContentStats::from_samples(
        std::iter::repeat(("deep dive thread on sequencer design", 50.0, false)).take(20),
    );
    assert_eq!(signal_density_score(&good), 100.0);
}

#[test]
fn farm_risk_gates() {
    // Fewer than 2 scored tweets: nothing to judge
    assert_eq!(farm_risk_score(&[], 0.5, 10), 0.0);
    assert_eq!(farm_risk_score(&[tweet("one", 9, 9, 9)], 0.5, 10), 0.0);

    // Both risk conditions together
    let pod: Vec<TweetRecord> = (0..12).map(|_| tweet("gm", 80, 10, 10)).collect();
    assert_eq!(farm_risk_score(&pod, 0.10, 1_000), 35.0);

    // Same pattern on a big account: the small-account condition drops
    assert_eq!(farm_risk_score(&pod, 0.10, 500_000), 15.0);
}

// ============================================================
// Composite: 0-1000, monotone in farm risk
// ============================================================

#[test]
fn composite_bounds() {
    assert_eq!(compose_akari(100.0, 100.0, 100.0, 0.0).1, 1000);
    assert_eq!(compose_akari(0.0, 0.0, 0.0, 0.0).1, 0);
    // Max sub-scores with max farm risk: authenticity halves
    // 0.35*50 + 0.35*100 + 0.30*100 = 82.5 -> 825
    assert_eq!(compose_akari(100.0, 100.0, 100.0, 100.0).1, 825);
}

#[test]
fn full_scorer_stays_bounded_on_degenerate_inputs() {
    let result = score_profile("empty", &AccountMetrics::default(), &[], &[], &[]);
    assert!(result.akari_profile_score <= 1000);

    let flood: Vec<TweetRecord> = (0..500)
        .map(|i| tweet(&format!("airdrop {i}"), u64::MAX / 4, 0, 0))
        .collect();
    let metrics = AccountMetrics {
        followers: 1,
        ..Default::default()
    };
    let sentiments = vec![100.0; 500];
    let result = score_profile("flood", &metrics, &flood, &[], &sentiments);
    assert!(result.akari_profile_score <= 1000);
}

#[test]
fn quick_and_full_report_their_basis() {
    let quick = score_profile_quick("h", &AccountMetrics::default());
    let full = score_profile("h", &AccountMetrics::default(), &[], &[], &[]);
    assert_ne!(quick.basis, full.basis);
}

// ============================================================
// CT Heat
// ============================================================

#[test]
fn heat_zero_window_scores_zero() {
    assert_eq!(compute_ct_heat_score(&MentionWindow::default()), 0);
}

#[test]
fn heat_saturated_window_scores_100() {
    let window = MentionWindow {
        mentions_count: 1_000,
        avg_likes: 80.0,
        avg_retweets: 20.0,
        unique_authors: 100,
        influencer_mentions: 10,
    };
    assert_eq!(compute_ct_heat_score(&window), 100);
}

#[test]
fn heat_monotone_in_mentions() {
    let mut prev = 0;
    for mentions in [0u32, 5, 10, 50, 100, 500, 1_000, 10_000] {
        let score = compute_ct_heat_score(&MentionWindow {
            mentions_count: mentions,
            ..Default::default()
        });
        assert!(score >= prev, "heat dropped at {mentions} mentions");
        prev = score;
    }
}

// ============================================================
// Sentiment aggregation
// ============================================================

#[test]
fn sentiment_empty_is_neutral() {
    assert_eq!(aggregate_sentiment_score(&[]), 50);
}

#[test]
fn sentiment_engagement_weighting() {
    // A viral positive mention outweighs several quiet negative ones
    let observations = vec![
        SentimentObservation {
            sentiment_score: 90.0,
            likes: 96,
            retweets: 2,
            replies: 1,
        },
        SentimentObservation {
            sentiment_score: 10.0,
            likes: 0,
            retweets: 0,
            replies: 0,
        },
    ];
    // (90*100 + 10*1) / 101 = 89.2 -> 89
    assert_eq!(aggregate_sentiment_score(&observations), 89);
}

// ============================================================
// Project composite and the sparse shortcut
// ============================================================

#[test]
fn project_score_bounds() {
    let maxed = ProjectScoreInputs {
        official_profile_score: 1000,
        kol_scores: vec![(1000, 1.0)],
        sentiment_score: 100.0,
        ct_heat_score: 100.0,
        inner_circle_count: 100,
        inner_circle_power: 10_000.0,
        quality_follower_ratio: 1.0,
        follower_delta: 10_000,
        previous_followers: 10_000,
        followers: 20_000,
    };
    assert_eq!(score_project("p", &maxed).akari_project_score, 1000);
    assert!(score_project("p", &ProjectScoreInputs::default()).akari_project_score <= 1000);
}

#[test]
fn sparse_zero_follower_floor() {
    let inputs = SparseAccountInputs {
        followers: 0,
        avg_engagement: 9_999.0,
        account_age_years: 10.0,
        tweet_count: 1_000_000,
    };
    assert_eq!(compute_akari_score(&inputs), 100);
}

#[test]
fn sparse_worked_example() {
    // 1000 followers, 30 avg engagement (3% rate), brand new, no tweets:
    // 0.45*1000 + 0.30*(log10(1001)/6*1000) = 600 after rounding
    let inputs = SparseAccountInputs {
        followers: 1_000,
        avg_engagement: 30.0,
        account_age_years: 0.0,
        tweet_count: 0,
    };
    assert_eq!(compute_akari_score(&inputs), 600);
}
