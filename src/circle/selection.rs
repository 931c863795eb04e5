// Global inner-circle selection.
//
// A profile qualifies only when all four score thresholds hold at once;
// a missing score is treated as 0 and therefore disqualifies. Qualifiers
// rank by influence and the circle is capped at a fixed maximum size.

use crate::db::models::InnerCircleMember;

/// Maximum number of members in the global circle.
pub const MAX_CIRCLE_SIZE: usize = 2000;

/// Qualification thresholds.
pub const MIN_AKARI_SCORE: u32 = 750;
pub const MIN_INFLUENCE: f64 = 70.0;
pub const MIN_AUTHENTICITY: f64 = 60.0;
pub const MIN_SIGNAL_DENSITY: f64 = 60.0;

/// A scored profile as seen by the selector. Optional fields model
/// profiles whose scoring runs were partial.
#[derive(Debug, Clone)]
pub struct CircleCandidate {
    pub profile_id: String,
    pub akari_profile_score: Option<u32>,
    pub influence_score: Option<f64>,
    pub authenticity_score: Option<f64>,
    pub signal_density_score: Option<f64>,
    pub segment: String,
}

/// Whether a candidate clears all four thresholds (missing values are 0).
pub fn qualifies(candidate: &CircleCandidate) -> bool {
    candidate.akari_profile_score.unwrap_or(0) >= MIN_AKARI_SCORE
        && candidate.influence_score.unwrap_or(0.0) >= MIN_INFLUENCE
        && candidate.authenticity_score.unwrap_or(0.0) >= MIN_AUTHENTICITY
        && candidate.signal_density_score.unwrap_or(0.0) >= MIN_SIGNAL_DENSITY
}

/// Select the global inner circle: filter, sort by influence descending,
/// truncate to the maximum size.
pub fn select_circle(candidates: Vec<CircleCandidate>) -> Vec<InnerCircleMember> {
    let mut qualifying: Vec<CircleCandidate> =
        candidates.into_iter().filter(qualifies).collect();

    qualifying.sort_by(|a, b| {
        b.influence_score
            .unwrap_or(0.0)
            .partial_cmp(&a.influence_score.unwrap_or(0.0))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    qualifying.truncate(MAX_CIRCLE_SIZE);

    qualifying
        .into_iter()
        .map(|c| InnerCircleMember {
            profile_id: c.profile_id,
            akari_profile_score: c.akari_profile_score.unwrap_or(0),
            influence_score: c.influence_score.unwrap_or(0.0),
            segment: c.segment,
        })
        .collect()
}
