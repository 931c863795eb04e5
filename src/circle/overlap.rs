// Audience overlap between project circles.
//
// Two circles are compared as sets of profile IDs: the Jaccard index
// |A∩B| / |A∪B| is the similarity, and the shared members' influence sums
// to the "common power". Competitor discovery ranks every other project
// by similarity and keeps the top K.

use std::collections::{HashMap, HashSet};

use crate::db::models::CommonCircleResult;

/// Default number of competitors returned by `rank_competitors`.
pub const DEFAULT_TOP_K: usize = 5;

/// Compare two circles. `influence_by_id` supplies the influence score
/// per profile for the common-power sum; unknown profiles count as 0.
pub fn common_circle(
    circle_a: &HashSet<String>,
    circle_b: &HashSet<String>,
    influence_by_id: &HashMap<String, f64>,
) -> CommonCircleResult {
    let mut common_members: Vec<String> = circle_a.intersection(circle_b).cloned().collect();
    common_members.sort();

    let common_power: f64 = common_members
        .iter()
        .map(|id| influence_by_id.get(id).copied().unwrap_or(0.0))
        .sum();

    let union_size = circle_a.union(circle_b).count();
    let similarity_score = if union_size == 0 {
        0.0
    } else {
        let jaccard = common_members.len() as f64 / union_size as f64;
        (jaccard * 10_000.0).round() / 10_000.0
    };

    CommonCircleResult {
        common_count: common_members.len(),
        common_power,
        similarity_score,
        common_members,
    }
}

/// Rank other projects by circle similarity against `own_circle`.
///
/// Only projects sharing at least one member are eligible. Returns at
/// most `top_k` (project_id, result) pairs, most similar first; equal
/// similarities break by project id so the ranking is stable.
pub fn rank_competitors(
    own_circle: &HashSet<String>,
    other_circles: &[(String, HashSet<String>)],
    influence_by_id: &HashMap<String, f64>,
    top_k: usize,
) -> Vec<(String, CommonCircleResult)> {
    let mut ranked: Vec<(String, CommonCircleResult)> = other_circles
        .iter()
        .map(|(project_id, circle)| {
            (
                project_id.clone(),
                common_circle(own_circle, circle, influence_by_id),
            )
        })
        .filter(|(_, result)| result.common_count > 0)
        .collect();

    ranked.sort_by(|a, b| {
        b.1.similarity_score
            .partial_cmp(&a.1.similarity_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked.truncate(top_k);
    ranked
}
