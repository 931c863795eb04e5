// Sentiment aggregation: engagement-weighted reduction of per-text
// sentiment observations into one 0-100 score.
//
// Every observation carries weight 1 + likes + retweets + replies, so
// zero-engagement texts still count instead of dividing by zero.

/// One (text sentiment, engagement) observation from the mention stream.
#[derive(Debug, Clone, Copy)]
pub struct SentimentObservation {
    /// Externally supplied sentiment for the text, 0-100
    pub sentiment_score: f64,
    pub likes: u64,
    pub retweets: u64,
    pub replies: u64,
}

/// Neutral default returned for an empty observation set.
pub const NEUTRAL_SENTIMENT: u32 = 50;

/// Reduce a set of observations to a single engagement-weighted score.
pub fn aggregate_sentiment_score(observations: &[SentimentObservation]) -> u32 {
    if observations.is_empty() {
        return NEUTRAL_SENTIMENT;
    }

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for obs in observations {
        let weight = 1.0 + (obs.likes + obs.retweets + obs.replies) as f64;
        weighted_sum += obs.sentiment_score * weight;
        total_weight += weight;
    }

    (weighted_sum / total_weight).round() as u32
}
