// Lexicon sentiment provider: deterministic keyword-based scoring.
//
// Counts positive and negative lexicon hits and maps the balance onto
// the 0-100 scale, 10 points per net hit, clamped to [10, 90] so a
// keyword heuristic never claims maximal confidence.

use anyhow::Result;
use async_trait::async_trait;

use super::traits::{SentimentProvider, NEUTRAL};

const POSITIVE_WORDS: &[&str] = &[
    "bullish",
    "great",
    "excellent",
    "impressive",
    "solid",
    "strong",
    "win",
    "growth",
    "excited",
    "love",
    "shipped",
    "milestone",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bearish",
    "scam",
    "rug",
    "dump",
    "exploit",
    "hack",
    "fud",
    "dead",
    "terrible",
    "broken",
    "lawsuit",
    "drained",
];

pub struct LexiconSentiment;

impl LexiconSentiment {
    fn score(&self, text: &str) -> f64 {
        let lower = text.to_lowercase();
        let positive = POSITIVE_WORDS.iter().filter(|w| lower.contains(*w)).count() as f64;
        let negative = NEGATIVE_WORDS.iter().filter(|w| lower.contains(*w)).count() as f64;

        if positive == 0.0 && negative == 0.0 {
            return NEUTRAL;
        }
        (NEUTRAL + (positive - negative) * 10.0).clamp(10.0, 90.0)
    }
}

#[async_trait]
impl SentimentProvider for LexiconSentiment {
    async fn score_text(&self, text: &str) -> Result<f64> {
        Ok(self.score(text))
    }
}
