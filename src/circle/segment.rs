// Audience segmentation: which corner of crypto Twitter a profile
// belongs to, from its bio and recent topic tags.
//
// A fixed-priority pattern list: the first matching segment wins, and
// profiles matching nothing fall into General. Patterns compile once at
// startup.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Audience segments in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    Defi,
    Nft,
    Gaming,
    Infrastructure,
    Ai,
    Investor,
    Builder,
    General,
}

impl Segment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Defi => "defi",
            Segment::Nft => "nft",
            Segment::Gaming => "gaming",
            Segment::Infrastructure => "infrastructure",
            Segment::Ai => "ai",
            Segment::Investor => "investor",
            Segment::Builder => "builder",
            Segment::General => "general",
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static SEGMENT_PATTERNS: LazyLock<Vec<(Segment, Regex)>> = LazyLock::new(|| {
    // Priority order matters: the first match wins
    [
        (
            Segment::Defi,
            r"\b(defi|yield|liquidity|dex|amm|staking|stablecoin|perps?)\b",
        ),
        (
            Segment::Nft,
            r"\b(nfts?|pfp|mint(ing)?|collector|generative|1/1s?)\b",
        ),
        (
            Segment::Gaming,
            r"\b(gam(e|ing|er)|p2e|metaverse|guild|esports)\b",
        ),
        (
            Segment::Infrastructure,
            r"\b(l2|rollups?|zk|validator|node|protocol|evm|infra(structure)?)\b",
        ),
        (
            Segment::Ai,
            r"\b(ai|ml|llms?|agents?|machine learning|neural)\b",
        ),
        (
            Segment::Investor,
            r"\b(investor|vc|venture|fund|capital|angel|portfolio|lp)\b",
        ),
        (
            Segment::Builder,
            r"\b(builder|building|founder|dev(eloper)?|engineer|shipping)\b",
        ),
    ]
    .into_iter()
    .map(|(segment, pattern)| {
        let regex = Regex::new(&format!("(?i){pattern}")).expect("segment pattern must compile");
        (segment, regex)
    })
    .collect()
});

/// Classify a profile from its bio and recent topic tags.
pub fn classify_segment(bio: &str, topic_tags: &[String]) -> Segment {
    let haystack = format!("{} {}", bio, topic_tags.join(" "));

    for (segment, regex) in SEGMENT_PATTERNS.iter() {
        if regex.is_match(&haystack) {
            return *segment;
        }
    }
    Segment::General
}
