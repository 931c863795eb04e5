// Data models: the value objects that flow through the engine and map
// to database rows.
//
// They're separate from the queries so the scoring modules can use them
// without depending on rusqlite. Every one of these is recomputed fresh
// per scoring run; the database only ever holds the latest result.

use serde::{Deserialize, Serialize};

use crate::topics::classifier::Topic;

/// Which scoring path produced a result. Quick scores are cheaper proxies
/// and must never be silently treated as full scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBasis {
    Full,
    Quick,
}

impl ScoreBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreBasis::Full => "full",
            ScoreBasis::Quick => "quick",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "quick" => ScoreBasis::Quick,
            _ => ScoreBasis::Full,
        }
    }
}

/// A scored account: the four 0-100 sub-scores, the 0-1000 composite,
/// and the supporting ratios that fed them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileScoreResult {
    pub handle: String,
    pub authenticity_score: f64,
    pub influence_score: f64,
    pub signal_density_score: f64,
    pub farm_risk_score: f64,
    pub akari_profile_score: u32,
    pub engagement_rate: f64,
    pub retweet_ratio: f64,
    pub follower_quality_ratio: f64,
    pub tweets_analyzed: u32,
    pub basis: ScoreBasis,
    /// Set by the persistence layer, not the scorer (scorers stay
    /// deterministic over their inputs)
    pub scored_at: String,
}

/// A member of the global (or a per-project) inner circle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InnerCircleMember {
    pub profile_id: String,
    pub akari_profile_score: u32,
    pub influence_score: f64,
    pub segment: String,
}

/// A profile's membership in one project's circle. The weight is derived
/// from the other fields plus the member's Akari score: recomputing from
/// the same inputs reproduces the same weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCircleMembership {
    pub profile_id: String,
    pub project_id: String,
    pub is_follower: bool,
    pub is_author: bool,
    pub weight: f64,
    pub last_interaction_at: String,
}

/// The overlap between two project circles. Transient: always recomputed
/// from the two membership sets, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonCircleResult {
    pub common_count: usize,
    /// Sum of influence scores over the shared members
    pub common_power: f64,
    /// Jaccard index rounded to 4 decimals, 0-1
    pub similarity_score: f64,
    pub common_members: Vec<String>,
}

/// A scored project: the 0-1000 composite plus the component scores that
/// went into the weighted sum (all on the 0-100 scale).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectScoreResult {
    pub project_id: String,
    pub akari_project_score: u32,
    pub official_score: u32,
    pub kol_average: u32,
    pub inner_circle_impact: u32,
    pub community_quality: u32,
    pub sentiment_score: u32,
    pub ct_heat_score: u32,
    /// Official-account follower count at scoring time; the next refresh
    /// diffs against it for the community growth term
    pub followers: u64,
    pub scored_at: String,
}

/// One topic's score for a (project, window). Fully recomputable from the
/// window's tweet set: never incrementally updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicScore {
    pub topic: Topic,
    /// 0-100, normalized against the window's top topic
    pub score: u32,
    pub tweet_count: u32,
    pub weighted_score: f64,
}
