// Sentiment provider trait: the swap-ready abstraction.
//
// The scoring engine treats sentiment as an external function
// text -> [0, 100]. The default implementation is a keyword lexicon;
// a hosted model can slot in behind the same trait.

use anyhow::Result;
use async_trait::async_trait;

/// Neutral sentiment, returned for texts the provider can't judge.
pub const NEUTRAL: f64 = 50.0;

/// Trait for scoring text sentiment on a 0-100 scale. Implementations
/// may be remote services, so the methods are async.
#[async_trait]
pub trait SentimentProvider: Send + Sync {
    /// Score a single text. 0 is maximally negative, 100 maximally
    /// positive, 50 neutral.
    async fn score_text(&self, text: &str) -> Result<f64>;

    /// Score multiple texts, returning scores in the same order.
    /// Default implementation calls score_text sequentially: providers
    /// can override for batching if they support it.
    async fn score_batch(&self, texts: &[String]) -> Result<Vec<f64>> {
        let mut scores = Vec::with_capacity(texts.len());
        for text in texts {
            scores.push(self.score_text(text).await?);
        }
        Ok(scores)
    }
}

/// Provider that returns the neutral 50 for everything. Used where
/// sentiment isn't wanted but the pipeline signature requires a provider.
pub struct NeutralSentiment;

#[async_trait]
impl SentimentProvider for NeutralSentiment {
    async fn score_text(&self, _text: &str) -> Result<f64> {
        Ok(NEUTRAL)
    }
}
