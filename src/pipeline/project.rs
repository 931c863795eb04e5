// Full project refresh: the end-to-end pipeline behind `akari project`.
//
// One refresh run:
// 1. Full-scores the project's official account
// 2. Quick-scores a sample of its followers
// 3. Rebuilds the global inner circle from everything scored so far
// 4. Records project circle memberships (followers + mention authors)
// 5. Pulls recent mentions and derives CT heat, sentiment and topics
// 6. Combines it all into the 0-1000 project score and persists it

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use crate::circle::overlap::{self, DEFAULT_TOP_K};
use crate::circle::segment::classify_segment;
use crate::circle::selection::{self, CircleCandidate, MIN_AKARI_SCORE};
use crate::circle::weight::compute_project_circle_weight;
use crate::db::models::{
    CommonCircleResult, ProjectCircleMembership, ProjectScoreResult, TopicScore,
};
use crate::db::Database;
use crate::pipeline::{bulk, profile};
use crate::scoring::heat::{compute_ct_heat_score, MentionWindow};
use crate::scoring::profile::follower_quality_ratio;
use crate::scoring::project::{score_project, ProjectScoreInputs};
use crate::scoring::sentiment::{aggregate_sentiment_score, SentimentObservation};
use crate::sentiment::traits::SentimentProvider;
use crate::sources::client::TwitterClient;
use crate::sources::followers::fetch_follower_sample;
use crate::sources::profiles::fetch_account;
use crate::sources::tweets::fetch_mentions;
use crate::topics::classifier::score_topics;

/// How many followers to quick-score per refresh.
pub const FOLLOWER_SCORE_SAMPLE: usize = 50;

/// How many mentions to analyze per refresh.
pub const MENTION_LIMIT: usize = 100;

/// Concurrent profile fetches during the follower sweep.
const SWEEP_CONCURRENCY: usize = 8;

/// The topic window tag stored alongside topic scores.
pub const TOPIC_WINDOW: &str = "7d";

/// Everything a refresh run produced, for display.
pub struct ProjectRefreshReport {
    pub score: ProjectScoreResult,
    pub topics: Vec<TopicScore>,
    pub competitors: Vec<(String, CommonCircleResult)>,
    pub circle_size: usize,
    pub mentions_analyzed: usize,
}

/// Run a full refresh for a project identified by its official handle.
pub async fn refresh_project(
    client: &TwitterClient,
    sentiment: &dyn SentimentProvider,
    db: &Database,
    handle: &str,
) -> Result<ProjectRefreshReport> {
    let project_id = handle.to_lowercase();
    let now = Utc::now().to_rfc3339();

    // 1. Full score for the official account. The raw record is kept
    // around: its follower count feeds the growth term in step 6.
    let account = fetch_account(client, handle)
        .await?
        .with_context(|| format!("No profile found for @{handle}"))?;
    let mut official = profile::score_fetched_account(client, sentiment, &account).await?;
    official.scored_at = now.clone();
    db.upsert_profile_score(&official).await?;

    // 2. Quick-score a follower sample. Bios are kept around for
    // segment classification later.
    let follower_sample = fetch_follower_sample(client, handle, FOLLOWER_SCORE_SAMPLE).await?;
    let mut bios: HashMap<String, String> = HashMap::new();
    for follower in &follower_sample {
        if let Some(bio) = &follower.bio {
            bios.insert(follower.handle.to_lowercase(), bio.clone());
        }
    }
    let follower_handles: Vec<String> =
        follower_sample.iter().map(|f| f.handle.clone()).collect();
    let mut quick_scores =
        bulk::quick_score_handles(client, &follower_handles, SWEEP_CONCURRENCY).await?;
    for score in &mut quick_scores {
        score.scored_at = now.clone();
        db.upsert_profile_score(score).await?;
    }

    // 3. Rebuild the global inner circle from every stored profile that
    // could plausibly qualify
    let ranked = db.get_ranked_profiles(MIN_AKARI_SCORE).await?;
    let candidates: Vec<CircleCandidate> = ranked
        .iter()
        .map(|p| {
            let bio = bios.get(&p.handle.to_lowercase()).map(String::as_str);
            CircleCandidate {
                profile_id: p.handle.clone(),
                akari_profile_score: Some(p.akari_profile_score),
                influence_score: Some(p.influence_score),
                authenticity_score: Some(p.authenticity_score),
                signal_density_score: Some(p.signal_density_score),
                segment: classify_segment(bio.unwrap_or(""), &[]).as_str().to_string(),
            }
        })
        .collect();
    let circle = selection::select_circle(candidates);
    db.replace_circle_members(&circle).await?;
    info!(members = circle.len(), "Rebuilt global inner circle");

    // 4. Project circle memberships. The official account is the author;
    // sampled followers join as followers with their stored quick score.
    let official_membership = ProjectCircleMembership {
        profile_id: official.handle.clone(),
        project_id: project_id.clone(),
        is_follower: false,
        is_author: true,
        weight: compute_project_circle_weight(official.akari_profile_score, false, true, 0.0),
        last_interaction_at: now.clone(),
    };
    db.upsert_membership(&official_membership).await?;
    for score in &quick_scores {
        let membership = ProjectCircleMembership {
            profile_id: score.handle.clone(),
            project_id: project_id.clone(),
            is_follower: true,
            is_author: false,
            weight: compute_project_circle_weight(score.akari_profile_score, true, false, 0.0),
            last_interaction_at: now.clone(),
        };
        db.upsert_membership(&membership).await?;
    }

    // 5. Mentions: heat, sentiment, topics. Mention authors with a stored
    // circle seat count as influencer mentions and join the project circle
    // as authors.
    let mentions = fetch_mentions(client, handle, MENTION_LIMIT).await?;
    let circle_ids: HashSet<String> = circle
        .iter()
        .map(|m| m.profile_id.to_lowercase())
        .collect();

    let mut unique_authors: HashSet<String> = HashSet::new();
    let mut influencer_mentions = 0u32;
    let mut total_likes = 0u64;
    let mut total_retweets = 0u64;
    for mention in &mentions {
        total_likes += mention.likes;
        total_retweets += mention.retweets;
        if let Some(author) = &mention.author_handle {
            let author_id = author.to_lowercase();
            if circle_ids.contains(&author_id) {
                influencer_mentions += 1;
                let membership = ProjectCircleMembership {
                    profile_id: author.clone(),
                    project_id: project_id.clone(),
                    is_follower: false,
                    is_author: true,
                    weight: compute_project_circle_weight(
                        db.get_profile_score(author)
                            .await?
                            .map(|p| p.akari_profile_score)
                            .unwrap_or(0),
                        false,
                        true,
                        0.0,
                    ),
                    last_interaction_at: now.clone(),
                };
                db.upsert_membership(&membership).await?;
            }
            unique_authors.insert(author_id);
        }
    }

    let mention_count = mentions.len();
    let window = MentionWindow {
        mentions_count: mention_count as u32,
        avg_likes: total_likes as f64 / mention_count.max(1) as f64,
        avg_retweets: total_retweets as f64 / mention_count.max(1) as f64,
        unique_authors: unique_authors.len() as u32,
        influencer_mentions,
    };
    let ct_heat = compute_ct_heat_score(&window);

    let mention_texts: Vec<String> = mentions.iter().map(|m| m.text.clone()).collect();
    let mention_sentiments = sentiment.score_batch(&mention_texts).await?;
    let observations: Vec<SentimentObservation> = mentions
        .iter()
        .zip(&mention_sentiments)
        .map(|(m, s)| SentimentObservation {
            sentiment_score: *s,
            likes: m.likes,
            retweets: m.retweets,
            replies: m.replies,
        })
        .collect();
    let sentiment_score = aggregate_sentiment_score(&observations);

    let topic_scores = score_topics(&mentions);
    db.replace_topic_scores(&project_id, TOPIC_WINDOW, &topic_scores)
        .await?;

    // 6. Combine. Inner-circle stats come from the intersection of the
    // project circle with the global circle; follower growth diffs the
    // current count against the one stored by the previous refresh.
    let previous = db.get_project_score(&project_id).await?;
    let (follower_delta, previous_followers) = previous
        .map(|p| {
            (
                account.followers as i64 - p.followers as i64,
                p.followers as i64,
            )
        })
        .unwrap_or((0, 0));

    let influence_map = db.get_influence_map().await?;
    let project_circle = db.get_project_circle(&project_id).await?;
    let circle_overlap: Vec<&String> = project_circle
        .iter()
        .filter(|id| circle_ids.contains(&id.to_lowercase()))
        .collect();
    let inner_circle_power: f64 = circle_overlap
        .iter()
        .map(|id| influence_map.get(*id).copied().unwrap_or(0.0))
        .sum();

    let inputs = ProjectScoreInputs {
        official_profile_score: official.akari_profile_score,
        kol_scores: db.get_project_kol_scores(&project_id).await?,
        sentiment_score: sentiment_score as f64,
        ct_heat_score: ct_heat as f64,
        inner_circle_count: circle_overlap.len(),
        inner_circle_power,
        quality_follower_ratio: follower_quality_ratio(&follower_sample),
        follower_delta,
        previous_followers,
        followers: account.followers,
    };
    let mut score = score_project(&project_id, &inputs);
    score.scored_at = now;
    db.upsert_project_score(&score).await?;

    let other_circles = db.get_other_project_circles(&project_id).await?;
    let competitors = overlap::rank_competitors(
        &project_circle,
        &other_circles,
        &influence_map,
        DEFAULT_TOP_K,
    );

    info!(
        project = project_id.as_str(),
        akari = score.akari_project_score,
        heat = ct_heat,
        sentiment = sentiment_score,
        "Scored project"
    );

    Ok(ProjectRefreshReport {
        score,
        topics: topic_scores,
        competitors,
        circle_size: circle.len(),
        mentions_analyzed: mention_count,
    })
}
