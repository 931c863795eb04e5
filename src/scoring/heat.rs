// CT Heat: social buzz for a project over a mention window.
//
// Four independently bucketed piecewise-linear components, each 0-100,
// combined with fixed weights: volume 0.40, engagement 0.30, author
// diversity 0.20, influencer mentions 0.10.

/// Aggregated mention statistics for one project over one time window.
#[derive(Debug, Clone, Copy, Default)]
pub struct MentionWindow {
    pub mentions_count: u32,
    /// Mean likes per mention
    pub avg_likes: f64,
    /// Mean retweets per mention
    pub avg_retweets: f64,
    pub unique_authors: u32,
    pub influencer_mentions: u32,
}

/// Compute the 0-100 CT Heat score for a mention window.
pub fn compute_ct_heat_score(window: &MentionWindow) -> u32 {
    let volume = volume_component(window.mentions_count as f64);
    let engagement = engagement_component(window.avg_likes + window.avg_retweets);
    let diversity = diversity_component(window.unique_authors as f64);
    let influencer = influencer_component(window.influencer_mentions as f64);

    let combined = 0.40 * volume + 0.30 * engagement + 0.20 * diversity + 0.10 * influencer;
    combined.clamp(0.0, 100.0).round() as u32
}

fn volume_component(mentions: f64) -> f64 {
    if mentions >= 1000.0 {
        100.0
    } else if mentions >= 100.0 {
        50.0 + (mentions - 100.0) / 900.0 * 50.0
    } else if mentions >= 10.0 {
        20.0 + (mentions - 10.0) / 90.0 * 30.0
    } else {
        mentions / 10.0 * 20.0
    }
}

fn engagement_component(engagement: f64) -> f64 {
    if engagement >= 100.0 {
        100.0
    } else if engagement >= 20.0 {
        50.0 + (engagement - 20.0) / 80.0 * 50.0
    } else if engagement >= 5.0 {
        20.0 + (engagement - 5.0) / 15.0 * 30.0
    } else {
        engagement / 5.0 * 20.0
    }
}

fn diversity_component(authors: f64) -> f64 {
    if authors >= 100.0 {
        100.0
    } else if authors >= 20.0 {
        50.0 + (authors - 20.0) / 80.0 * 50.0
    } else {
        authors / 20.0 * 50.0
    }
}

fn influencer_component(mentions: f64) -> f64 {
    if mentions >= 10.0 {
        100.0
    } else if mentions >= 3.0 {
        50.0 + (mentions - 3.0) / 7.0 * 50.0
    } else {
        mentions / 3.0 * 50.0
    }
}
