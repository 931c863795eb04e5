// Composition tests: verifying that the pure stages chain together:
//
//   tweets -> profile score -> tier -> circle selection -> membership
//   weights -> overlap -> project score
//
// plus the async database round trips the pipelines rely on. No network
// calls anywhere.

use std::collections::HashSet;

use akari::circle::selection::{select_circle, CircleCandidate, MIN_AKARI_SCORE};
use akari::circle::weight::compute_project_circle_weight;
use akari::db::models::{ProjectCircleMembership, ScoreBasis, TopicScore};
use akari::db::Database;
use akari::scoring::profile::{score_profile, AccountMetrics};
use akari::scoring::project::{score_project, ProjectScoreInputs};
use akari::scoring::tier::{assign_tier, Tier};
use akari::sources::followers::FollowerRecord;
use akari::sources::tweets::TweetRecord;
use akari::topics::classifier::{score_topics, Topic};

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

fn quality_follower(handle: &str) -> FollowerRecord {
    FollowerRecord {
        handle: handle.to_string(),
        followers: 5_000,
        following: 400,
        is_verified: true,
        bio: Some("defi researcher".to_string()),
    }
}

fn strong_account_tweets() -> Vec<TweetRecord> {
    (0..20)
        .map(|i| {
            tweet(
                &format!("Deep dive thread on rollup economics, part {i}"),
                200 + i * 17,
                40 + i * 3,
                25 + i,
            )
        })
        .collect()
}

// ============================================================
// Chain: tweets -> profile score -> tier -> circle
// ============================================================

#[test]
fn strong_account_scores_into_a_qualifying_tier() {
    let metrics = AccountMetrics {
        followers: 800_000,
        following: 500,
        account_age_years: Some(4.0),
        is_blue_verified: true,
        ..Default::default()
    };
    let tweets = strong_account_tweets();
    let followers: Vec<FollowerRecord> = (0..20)
        .map(|i| quality_follower(&format!("f{i}")))
        .collect();
    let sentiments = vec![65.0; tweets.len()];

    let result = score_profile("strong", &metrics, &tweets, &followers, &sentiments);

    assert!(result.akari_profile_score <= 1000);
    assert!(
        result.akari_profile_score >= MIN_AKARI_SCORE,
        "expected a circle-grade score, got {}",
        result.akari_profile_score
    );
    assert_eq!(result.basis, ScoreBasis::Full);

    let tier = assign_tier(Some(result.akari_profile_score)).tier;
    assert!(tier >= Tier::Vanguard);

    // The same result feeds circle selection
    let circle = select_circle(vec![CircleCandidate {
        profile_id: result.handle.clone(),
        akari_profile_score: Some(result.akari_profile_score),
        influence_score: Some(result.influence_score),
        authenticity_score: Some(result.authenticity_score),
        signal_density_score: Some(result.signal_density_score),
        segment: "defi".to_string(),
    }]);
    assert_eq!(circle.len(), 1);
    assert_eq!(circle[0].profile_id, "strong");
}

#[test]
fn farming_account_scores_below_circle_grade() {
    let metrics = AccountMetrics {
        followers: 900,
        following: 4_800,
        account_age_years: Some(0.1),
        ..Default::default()
    };
    let tweets: Vec<TweetRecord> = (0..20)
        .map(|_| tweet("airdrop giveaway! tag 3 friends and use my code", 120, 120, 12))
        .collect();
    let sentiments = vec![50.0; tweets.len()];

    let result = score_profile("farmer", &metrics, &tweets, &[], &sentiments);

    assert!(result.akari_profile_score < MIN_AKARI_SCORE);
    assert_eq!(result.signal_density_score, 0.0);
    assert!(result.farm_risk_score > 0.0);
}

// ============================================================
// Chain: circle members -> membership weights -> project score
// ============================================================

#[test]
fn circle_weights_feed_the_kol_average() {
    // Two KOLs with different recency produce different weights, and the
    // project composite consumes them directly
    let fresh = compute_project_circle_weight(900, true, false, 0.0);
    let stale = compute_project_circle_weight(900, true, false, 90.0);
    assert!(fresh > stale);

    let inputs = ProjectScoreInputs {
        official_profile_score: 800,
        kol_scores: vec![(900, fresh), (900, stale)],
        sentiment_score: 60.0,
        ct_heat_score: 40.0,
        inner_circle_count: 2,
        inner_circle_power: 160.0,
        quality_follower_ratio: 0.7,
        follower_delta: 0,
        previous_followers: 0,
        followers: 120_000,
    };
    let result = score_project("proj", &inputs);
    // Equal KOL scores: the weighted average is exactly 90 regardless of
    // the weights' magnitudes
    assert_eq!(result.kol_average, 90);
    assert!(result.akari_project_score <= 1000);
}

// ============================================================
// Database round trips used by the pipelines
// ============================================================

#[tokio::test]
async fn profile_scores_feed_ranked_selection() {
    let db = Database::open_in_memory().unwrap();

    let tweets = strong_account_tweets();
    let sentiments = vec![65.0; tweets.len()];
    for (i, handle) in ["alice", "bob", "carol"].iter().enumerate() {
        let metrics = AccountMetrics {
            followers: 100_000 * (i as u64 + 1),
            following: 300,
            account_age_years: Some(3.0),
            is_blue_verified: true,
            ..Default::default()
        };
        let followers: Vec<FollowerRecord> =
            (0..10).map(|j| quality_follower(&format!("{handle}{j}"))).collect();
        let score = score_profile(handle, &metrics, &tweets, &followers, &sentiments);
        db.upsert_profile_score(&score).await.unwrap();
    }

    let ranked = db.get_ranked_profiles(0).await.unwrap();
    assert_eq!(ranked.len(), 3);
    for pair in ranked.windows(2) {
        assert!(pair[0].akari_profile_score >= pair[1].akari_profile_score);
    }

    // Stored rows reconstruct circle candidates losslessly enough to select
    let candidates: Vec<CircleCandidate> = ranked
        .iter()
        .map(|p| CircleCandidate {
            profile_id: p.handle.clone(),
            akari_profile_score: Some(p.akari_profile_score),
            influence_score: Some(p.influence_score),
            authenticity_score: Some(p.authenticity_score),
            signal_density_score: Some(p.signal_density_score),
            segment: "general".to_string(),
        })
        .collect();
    let circle = select_circle(candidates);
    db.replace_circle_members(&circle).await.unwrap();
    assert_eq!(db.get_circle_members().await.unwrap().len(), circle.len());
}

#[tokio::test]
async fn memberships_produce_circles_and_kol_scores() {
    let db = Database::open_in_memory().unwrap();

    // Two circle members with stored profile scores
    let tweets = strong_account_tweets();
    let sentiments = vec![65.0; tweets.len()];
    for handle in ["kol_a", "kol_b"] {
        let metrics = AccountMetrics {
            followers: 500_000,
            following: 200,
            account_age_years: Some(5.0),
            is_blue_verified: true,
            ..Default::default()
        };
        let followers: Vec<FollowerRecord> =
            (0..10).map(|j| quality_follower(&format!("{handle}{j}"))).collect();
        let score = score_profile(handle, &metrics, &tweets, &followers, &sentiments);
        db.upsert_profile_score(&score).await.unwrap();
    }
    let ranked = db.get_ranked_profiles(MIN_AKARI_SCORE).await.unwrap();
    let circle = select_circle(
        ranked
            .iter()
            .map(|p| CircleCandidate {
                profile_id: p.handle.clone(),
                akari_profile_score: Some(p.akari_profile_score),
                influence_score: Some(p.influence_score),
                authenticity_score: Some(p.authenticity_score),
                signal_density_score: Some(p.signal_density_score),
                segment: "general".to_string(),
            })
            .collect(),
    );
    assert_eq!(circle.len(), 2);
    db.replace_circle_members(&circle).await.unwrap();

    // Memberships across two projects
    for (project, member) in [("proj_x", "kol_a"), ("proj_x", "kol_b"), ("proj_y", "kol_b")] {
        let akari = db
            .get_profile_score(member)
            .await
            .unwrap()
            .unwrap()
            .akari_profile_score;
        db.upsert_membership(&ProjectCircleMembership {
            profile_id: member.to_string(),
            project_id: project.to_string(),
            is_follower: true,
            is_author: false,
            weight: compute_project_circle_weight(akari, true, false, 0.0),
            last_interaction_at: "2026-08-28T00:00:00Z".to_string(),
        })
        .await
        .unwrap();
    }

    let circle_x = db.get_project_circle("proj_x").await.unwrap();
    let circle_y = db.get_project_circle("proj_y").await.unwrap();
    assert_eq!(circle_x.len(), 2);
    assert_eq!(circle_y.len(), 1);

    // KOL scores join memberships with circle seats
    let kols = db.get_project_kol_scores("proj_x").await.unwrap();
    assert_eq!(kols.len(), 2);
    assert!(kols.iter().all(|(score, weight)| *score >= MIN_AKARI_SCORE && *weight > 0.0));

    // Overlap across the two projects: kol_b is shared
    let influence = db.get_influence_map().await.unwrap();
    let result = akari::circle::overlap::common_circle(&circle_x, &circle_y, &influence);
    assert_eq!(result.common_count, 1);
    assert_eq!(result.common_members, vec!["kol_b".to_string()]);
    let expected: HashSet<&str> = ["kol_a", "kol_b"].into();
    assert_eq!(result.similarity_score, 1.0 / expected.len() as f64);
}

#[tokio::test]
async fn topic_scores_round_trip_per_window() {
    let db = Database::open_in_memory().unwrap();

    let tweets = vec![
        tweet("zk rollup mainnet date announced", 300, 60, 20),
        tweet("dao governance vote tonight", 12, 1, 4),
    ];
    let scores = score_topics(&tweets);
    assert!(!scores.is_empty());

    db.replace_topic_scores("proj", "7d", &scores).await.unwrap();
    let loaded = db.get_topic_scores("proj", "7d").await.unwrap();
    assert_eq!(loaded.len(), scores.len());
    assert_eq!(loaded[0].topic, Topic::Infrastructure);
    assert_eq!(loaded[0].score, 100);

    // Replacing the same window drops the previous rows
    let fewer = vec![TopicScore {
        topic: Topic::Community,
        score: 100,
        tweet_count: 1,
        weighted_score: 1.5,
    }];
    db.replace_topic_scores("proj", "7d", &fewer).await.unwrap();
    assert_eq!(db.get_topic_scores("proj", "7d").await.unwrap().len(), 1);

    // Other windows are untouched
    assert!(db.get_topic_scores("proj", "30d").await.unwrap().is_empty());
}

#[tokio::test]
async fn project_score_round_trip() {
    let db = Database::open_in_memory().unwrap();
    let inputs = ProjectScoreInputs {
        official_profile_score: 820,
        kol_scores: vec![(900, 1.0)],
        sentiment_score: 64.0,
        ct_heat_score: 58.0,
        inner_circle_count: 12,
        inner_circle_power: 950.0,
        quality_follower_ratio: 0.66,
        follower_delta: 0,
        previous_followers: 0,
        followers: 52_000,
    };
    let mut score = score_project("proj", &inputs);
    score.scored_at = "2026-08-28T00:00:00Z".to_string();
    db.upsert_project_score(&score).await.unwrap();

    let loaded = db.get_project_score("proj").await.unwrap().unwrap();
    assert_eq!(loaded.akari_project_score, score.akari_project_score);
    assert_eq!(loaded.ct_heat_score, 58);
    assert_eq!(loaded.sentiment_score, 64);
    assert_eq!(loaded.followers, 52_000);
}

#[tokio::test]
async fn stored_follower_counts_feed_the_growth_term() {
    let db = Database::open_in_memory().unwrap();

    let mut first = score_project(
        "proj",
        &ProjectScoreInputs {
            quality_follower_ratio: 0.5,
            followers: 10_000,
            ..Default::default()
        },
    );
    first.scored_at = "2026-08-01T00:00:00Z".to_string();
    db.upsert_project_score(&first).await.unwrap();
    // No previous run: the growth term contributes nothing
    assert_eq!(first.community_quality, 40);

    // The next refresh diffs against the stored count
    let previous = db.get_project_score("proj").await.unwrap().unwrap();
    assert_eq!(previous.followers, 10_000);

    let second = score_project(
        "proj",
        &ProjectScoreInputs {
            quality_follower_ratio: 0.5,
            followers: 11_000,
            follower_delta: 11_000 - previous.followers as i64,
            previous_followers: previous.followers as i64,
            ..Default::default()
        },
    );
    // 10% growth saturates the 20-point term: 0.5*80 + 20 = 60
    assert_eq!(second.community_quality, 60);
}
