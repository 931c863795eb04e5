// Keyword-rule topic classifier.
//
// Topics are a fixed, ordered set, each with a keyword list. Declaration
// order doubles as the tie-break order: when two topics match a text
// with equal keyword counts, the earlier topic wins.
//
// Matching rule: keywords of length <= 3 match on word boundaries (so
// "ai" doesn't fire inside "chain"); longer keywords match by substring.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::db::models::TopicScore;
use crate::sources::tweets::TweetRecord;

/// The fixed topic set, in declaration (tie-break) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    Defi,
    Nft,
    Gaming,
    Ai,
    Infrastructure,
    Memecoins,
    Trading,
    Security,
    Regulation,
    Community,
}

impl Topic {
    pub fn all() -> [Topic; 10] {
        [
            Topic::Defi,
            Topic::Nft,
            Topic::Gaming,
            Topic::Ai,
            Topic::Infrastructure,
            Topic::Memecoins,
            Topic::Trading,
            Topic::Security,
            Topic::Regulation,
            Topic::Community,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Defi => "defi",
            Topic::Nft => "nft",
            Topic::Gaming => "gaming",
            Topic::Ai => "ai",
            Topic::Infrastructure => "infrastructure",
            Topic::Memecoins => "memecoins",
            Topic::Trading => "trading",
            Topic::Security => "security",
            Topic::Regulation => "regulation",
            Topic::Community => "community",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Topic::Defi => &[
                "defi", "yield", "liquidity", "amm", "dex", "staking", "lending",
                "tvl", "stablecoin", "perps",
            ],
            Topic::Nft => &[
                "nft", "mint", "pfp", "collection", "opensea", "royalties",
                "generative art", "floor price",
            ],
            Topic::Gaming => &[
                "gaming", "play to earn", "p2e", "metaverse", "guild", "in-game",
                "playtest",
            ],
            Topic::Ai => &[
                "ai", "llm", "agents", "inference", "machine learning", "gpu",
                "training run",
            ],
            Topic::Infrastructure => &[
                "l2", "zk", "rollup", "validator", "mainnet", "testnet", "bridge",
                "sequencer", "evm", "node operator",
            ],
            Topic::Memecoins => &[
                "memecoin", "pump", "degen", "moon", "ape", "100x", "meme season",
            ],
            Topic::Trading => &[
                "ta", "chart", "support", "resistance", "breakout", "liquidation",
                "long", "short", "entry",
            ],
            Topic::Security => &[
                "exploit", "hack", "audit", "vulnerability", "rug", "phishing",
                "drained",
            ],
            Topic::Regulation => &[
                "sec", "etf", "regulation", "lawsuit", "compliance", "sanctions",
            ],
            Topic::Community => &[
                "dao", "governance", "proposal", "vote", "grant", "community call",
            ],
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::all()
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown topic: {s}"))
    }
}

/// Whole-word containment check used for short keywords.
///
/// A match counts when the keyword occurrence is not flanked by
/// alphanumeric characters on either side.
fn contains_word(text: &str, word: &str) -> bool {
    let mut search_from = 0;
    while let Some(pos) = text[search_from..].find(word) {
        let start = search_from + pos;
        let end = start + word.len();
        let before_ok = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = text[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        search_from = end;
    }
    false
}

fn keyword_matches(lower: &str, keyword: &str) -> bool {
    if keyword.chars().count() <= 3 {
        contains_word(lower, keyword)
    } else {
        lower.contains(keyword)
    }
}

/// Count keyword matches per topic and return up to the top 2 labels.
///
/// Topics with zero matches are dropped; ties break by declaration order
/// because the sort is stable over `Topic::all()`.
pub fn classify_text(text: &str) -> Vec<Topic> {
    let lower = text.to_lowercase();

    let mut matched: Vec<(Topic, usize)> = Topic::all()
        .into_iter()
        .filter_map(|topic| {
            let count = topic
                .keywords()
                .iter()
                .filter(|kw| keyword_matches(&lower, kw))
                .count();
            (count > 0).then_some((topic, count))
        })
        .collect();

    matched.sort_by(|a, b| b.1.cmp(&a.1));
    matched.into_iter().take(2).map(|(topic, _)| topic).collect()
}

/// Engagement weight for one tweet: 1 + log10(1 + (likes + 2rt + 3re)/10).
///
/// The log damps viral outliers: the weight stays in roughly 1-5 even
/// for very large counts.
pub fn engagement_weight(tweet: &TweetRecord) -> f64 {
    let engagement = (tweet.likes + 2 * tweet.retweets + 3 * tweet.replies) as f64;
    1.0 + (1.0 + engagement / 10.0).log10()
}

/// Aggregate topic scores over a tweet set.
///
/// For each topic: the count of tweets assigned to it and the sum of
/// those tweets' engagement weights. Scores normalize against the
/// highest weighted topic (denominator floored at 1) and sort descending.
pub fn score_topics(tweets: &[TweetRecord]) -> Vec<TopicScore> {
    let mut counts: HashMap<Topic, u32> = HashMap::new();
    let mut weights: HashMap<Topic, f64> = HashMap::new();

    for tweet in tweets {
        let weight = engagement_weight(tweet);
        for topic in classify_text(&tweet.text) {
            *counts.entry(topic).or_insert(0) += 1;
            *weights.entry(topic).or_insert(0.0) += weight;
        }
    }

    let max_weight = weights.values().cloned().fold(0.0f64, f64::max).max(1.0);

    // Iterate topics in declared order so equal scores keep a stable order
    let mut scores: Vec<TopicScore> = Topic::all()
        .into_iter()
        .filter_map(|topic| {
            let count = *counts.get(&topic)?;
            let weighted = weights[&topic];
            Some(TopicScore {
                topic,
                score: (weighted / max_weight * 100.0).round() as u32,
                tweet_count: count,
                weighted_score: weighted,
            })
        })
        .collect();

    scores.sort_by(|a, b| b.score.cmp(&a.score));
    scores
}
