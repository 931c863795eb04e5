// Content classification rules: static keyword tables for tweet categories.
//
// A tweet can match any number of categories (they are not mutually
// exclusive). The tables are plain const data: matching is lowercase
// substring containment, which is what the patterns are written for.

/// Categories a single tweet can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCategory {
    /// Long-form analysis, threads, research
    Signal,
    /// Shipping/launch/roadmap announcements: counts toward the signal ratio
    ProjectUpdate,
    /// Airdrop/giveaway/whitelist engagement farming
    Farming,
    /// Referral links and hype shilling
    Shill,
}

/// Thread/analysis markers. Any hit makes a tweet Signal.
pub const SIGNAL_KEYWORDS: &[&str] = &[
    "thread",
    "🧵",
    "deep dive",
    "analysis",
    "breakdown",
    "explained",
    "how it works",
    "takeaways",
    "research",
    "my thesis",
    "post-mortem",
];

/// Shipping/announcement markers. Counts toward the signal numerator.
pub const PROJECT_UPDATE_KEYWORDS: &[&str] = &[
    "shipped",
    "we launched",
    "now live",
    "mainnet is live",
    "release notes",
    "changelog",
    "roadmap update",
    "milestone",
    "new feature",
];

/// Engagement-farming markers.
pub const FARMING_KEYWORDS: &[&str] = &[
    "airdrop",
    "giveaway",
    "whitelist",
    "allowlist",
    "wl spot",
    "free mint",
    "tag 3 friends",
    "retweet to win",
    "follow and rt",
    "drop your wallet",
    "like + rt",
];

/// Referral/hype markers.
pub const SHILL_KEYWORDS: &[&str] = &[
    "referral",
    "ref link",
    "use my code",
    "100x gem",
    "next 100x",
    "don't miss",
    "dont miss",
    "last chance",
    "buy now",
    "to the moon",
    "guaranteed gains",
];

/// Text length above which a positive-sentiment tweet counts as Signal
/// even without a keyword hit (long original commentary).
const LONG_FORM_CHARS: usize = 200;

/// Sentiment threshold for the long-form Signal rule.
const LONG_FORM_SENTIMENT: f64 = 60.0;

fn contains_any(lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| lower.contains(kw))
}

/// Classify one tweet's text into zero or more categories.
///
/// `sentiment` is the externally supplied 0-100 sentiment for the text
/// (neutral default 50 when unavailable). Categories are independent: a
/// tweet can be both Farming and Shill, for example.
pub fn classify_tweet(text: &str, sentiment: f64) -> Vec<ContentCategory> {
    let lower = text.to_lowercase();
    let mut categories = Vec::new();

    let long_form = text.chars().count() > LONG_FORM_CHARS && sentiment > LONG_FORM_SENTIMENT;
    if contains_any(&lower, SIGNAL_KEYWORDS) || long_form {
        categories.push(ContentCategory::Signal);
    }
    if contains_any(&lower, PROJECT_UPDATE_KEYWORDS) {
        categories.push(ContentCategory::ProjectUpdate);
    }
    if contains_any(&lower, FARMING_KEYWORDS) {
        categories.push(ContentCategory::Farming);
    }
    if contains_any(&lower, SHILL_KEYWORDS) {
        categories.push(ContentCategory::Shill);
    }

    categories
}

/// Aggregated category counts over a sampled tweet set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentStats {
    pub sampled: usize,
    /// Tweets that matched Signal or ProjectUpdate
    pub signal: usize,
    pub farming: usize,
    pub shill: usize,
    pub retweets: usize,
}

impl ContentStats {
    /// Tally category counts over (text, sentiment, is_retweet) samples.
    pub fn from_samples<'a, I>(samples: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64, bool)>,
    {
        let mut stats = ContentStats::default();
        for (text, sentiment, is_retweet) in samples {
            stats.sampled += 1;
            if is_retweet {
                stats.retweets += 1;
            }
            let categories = classify_tweet(text, sentiment);
            if categories.contains(&ContentCategory::Signal)
                || categories.contains(&ContentCategory::ProjectUpdate)
            {
                stats.signal += 1;
            }
            if categories.contains(&ContentCategory::Farming) {
                stats.farming += 1;
            }
            if categories.contains(&ContentCategory::Shill) {
                stats.shill += 1;
            }
        }
        stats
    }

    /// Denominator floored at 1 so empty samples divide cleanly to 0.
    fn denominator(&self) -> f64 {
        self.sampled.max(1) as f64
    }

    pub fn signal_ratio(&self) -> f64 {
        self.signal as f64 / self.denominator()
    }

    pub fn farming_ratio(&self) -> f64 {
        self.farming as f64 / self.denominator()
    }

    pub fn shill_ratio(&self) -> f64 {
        self.shill as f64 / self.denominator()
    }

    pub fn retweet_ratio(&self) -> f64 {
        self.retweets as f64 / self.denominator()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_keyword() {
        let cats = classify_tweet("A thread on validator economics", 50.0);
        assert!(cats.contains(&ContentCategory::Signal));
    }

    #[test]
    fn test_long_positive_text_is_signal() {
        let text = "x".repeat(250);
        assert!(classify_tweet(&text, 75.0).contains(&ContentCategory::Signal));
        // Same length with neutral sentiment is not signal
        assert!(classify_tweet(&text, 50.0).is_empty());
        // Short positive text is not signal either
        assert!(classify_tweet("great stuff", 90.0).is_empty());
    }

    #[test]
    fn test_farming_and_shill_can_overlap() {
        let cats = classify_tweet("AIRDROP! use my code for guaranteed gains", 50.0);
        assert!(cats.contains(&ContentCategory::Farming));
        assert!(cats.contains(&ContentCategory::Shill));
    }

    #[test]
    fn test_project_update_counts_toward_signal_ratio() {
        let stats = ContentStats::from_samples([("we launched v2 today", 50.0, false)]);
        assert_eq!(stats.signal, 1);
        assert!((stats.signal_ratio() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_sample_ratios_are_zero() {
        let stats = ContentStats::from_samples([]);
        assert_eq!(stats.signal_ratio(), 0.0);
        assert_eq!(stats.farming_ratio(), 0.0);
        assert_eq!(stats.shill_ratio(), 0.0);
        assert_eq!(stats.retweet_ratio(), 0.0);
    }

    #[test]
    fn test_case_insensitive_matching() {
        let cats = classify_tweet("GIVEAWAY: Retweet To Win a WL spot", 50.0);
        assert!(cats.contains(&ContentCategory::Farming));
    }
}
