// Per-project circle member weight.
//
// The weight is derived, never stored independently of its inputs:
// recomputing from the same four inputs must reproduce the same value.
// Base weight is the member's Akari score scaled to 0-1, boosted for
// authored content and for following the project, then decayed by half
// every 30 days since the last interaction. Rounded to 4 decimals.

/// Multiplier for members who authored content for the project.
pub const AUTHOR_BOOST: f64 = 1.5;

/// Multiplier for members who follow the project.
pub const FOLLOWER_BOOST: f64 = 1.25;

/// Decay half-life in days.
pub const DECAY_HALF_LIFE_DAYS: f64 = 30.0;

/// Compute a member's weight within a project circle.
pub fn compute_project_circle_weight(
    akari_profile_score: u32,
    is_follower: bool,
    is_author: bool,
    days_since_interaction: f64,
) -> f64 {
    let mut weight = akari_profile_score as f64 / 1000.0;
    if is_author {
        weight *= AUTHOR_BOOST;
    }
    if is_follower {
        weight *= FOLLOWER_BOOST;
    }
    weight *= 0.5f64.powf(days_since_interaction / DECAY_HALF_LIFE_DAYS);

    (weight * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_weight() {
        // 1.0 * 1.5 * 1.25 * 0.5 = 0.9375
        let weight = compute_project_circle_weight(1000, true, true, 30.0);
        assert_eq!(weight, 0.9375);
    }

    #[test]
    fn test_no_boosts_no_decay() {
        assert_eq!(compute_project_circle_weight(800, false, false, 0.0), 0.8);
    }

    #[test]
    fn test_decay_halves_every_30_days() {
        let fresh = compute_project_circle_weight(1000, false, false, 0.0);
        let one_month = compute_project_circle_weight(1000, false, false, 30.0);
        let two_months = compute_project_circle_weight(1000, false, false, 60.0);
        assert_eq!(fresh, 1.0);
        assert_eq!(one_month, 0.5);
        assert_eq!(two_months, 0.25);
    }

    #[test]
    fn test_rounded_to_four_decimals() {
        // Decay at 10 days: 0.5^(1/3) = 0.7937005... -> 0.7937
        let weight = compute_project_circle_weight(1000, false, false, 10.0);
        assert_eq!(weight, 0.7937);
    }

    #[test]
    fn test_deterministic() {
        for _ in 0..3 {
            assert_eq!(
                compute_project_circle_weight(873, true, false, 47.5),
                compute_project_circle_weight(873, true, false, 47.5)
            );
        }
    }
}
