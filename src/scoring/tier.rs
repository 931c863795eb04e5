// Akari tiers: the five credibility bands over the 0-1000 score range.
//
// Tier boundaries are a stable public contract: display logic downstream
// depends on the exact values, so the ranges here are inclusive on both
// ends and partition [0, 1000] with no gap or overlap.

use serde::{Deserialize, Serialize};

/// The five ordered credibility tiers, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Shadow,
    Nomad,
    Ranger,
    Vanguard,
    Celestial,
}

impl Tier {
    /// Determine the tier from an Akari score (0-1000).
    ///
    /// Scores above 1000 should never reach this function (every scorer
    /// clamps first), but the >= arms make the mapping total anyway.
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 900 => Tier::Celestial,
            s if s >= 750 => Tier::Vanguard,
            s if s >= 550 => Tier::Ranger,
            s if s >= 400 => Tier::Nomad,
            _ => Tier::Shadow,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Shadow => "Shadow",
            Tier::Nomad => "Nomad",
            Tier::Ranger => "Ranger",
            Tier::Vanguard => "Vanguard",
            Tier::Celestial => "Celestial",
        }
    }

    /// The inclusive score range for this tier.
    pub fn range(&self) -> (u32, u32) {
        match self {
            Tier::Shadow => (0, 399),
            Tier::Nomad => (400, 549),
            Tier::Ranger => (550, 749),
            Tier::Vanguard => (750, 899),
            Tier::Celestial => (900, 1000),
        }
    }

    /// All tiers in ascending order.
    pub fn all() -> [Tier; 5] {
        [
            Tier::Shadow,
            Tier::Nomad,
            Tier::Ranger,
            Tier::Vanguard,
            Tier::Celestial,
        ]
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tier assignment with its display description. Unscored accounts get
/// Shadow with a distinct "unranked" description rather than a fake zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierAssignment {
    pub tier: Tier,
    pub description: &'static str,
}

/// Map an optional Akari score to a tier assignment.
pub fn assign_tier(score: Option<u32>) -> TierAssignment {
    match score {
        Some(s) => TierAssignment {
            tier: Tier::from_score(s),
            description: tier_description(Tier::from_score(s)),
        },
        None => TierAssignment {
            tier: Tier::Shadow,
            description: "Unranked: no score computed yet",
        },
    }
}

fn tier_description(tier: Tier) -> &'static str {
    match tier {
        Tier::Shadow => "Low credibility or insufficient signal",
        Tier::Nomad => "Emerging account, some credible activity",
        Tier::Ranger => "Established voice with consistent signal",
        Tier::Vanguard => "High-credibility account, strong influence",
        Tier::Celestial => "Top-tier account, exceptional across all factors",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_values() {
        assert_eq!(Tier::from_score(0), Tier::Shadow);
        assert_eq!(Tier::from_score(399), Tier::Shadow);
        assert_eq!(Tier::from_score(400), Tier::Nomad);
        assert_eq!(Tier::from_score(549), Tier::Nomad);
        assert_eq!(Tier::from_score(550), Tier::Ranger);
        assert_eq!(Tier::from_score(749), Tier::Ranger);
        assert_eq!(Tier::from_score(750), Tier::Vanguard);
        assert_eq!(Tier::from_score(899), Tier::Vanguard);
        assert_eq!(Tier::from_score(900), Tier::Celestial);
        assert_eq!(Tier::from_score(1000), Tier::Celestial);
    }

    #[test]
    fn test_every_score_maps_to_exactly_one_tier() {
        // The ranges must partition [0, 1000]: each integer falls inside
        // exactly one tier's inclusive range, and from_score agrees.
        for score in 0..=1000u32 {
            let matching: Vec<Tier> = Tier::all()
                .into_iter()
                .filter(|t| {
                    let (lo, hi) = t.range();
                    score >= lo && score <= hi
                })
                .collect();
            assert_eq!(matching.len(), 1, "score {score} matched {matching:?}");
            assert_eq!(Tier::from_score(score), matching[0]);
        }
    }

    #[test]
    fn test_unranked_maps_to_shadow() {
        let assignment = assign_tier(None);
        assert_eq!(assignment.tier, Tier::Shadow);
        assert!(assignment.description.contains("Unranked"));
        // A genuine zero score gets the normal Shadow description instead
        let zero = assign_tier(Some(0));
        assert_eq!(zero.tier, Tier::Shadow);
        assert!(!zero.description.contains("Unranked"));
    }

    #[test]
    fn test_tier_ordering() {
        assert!(Tier::Shadow < Tier::Nomad);
        assert!(Tier::Nomad < Tier::Ranger);
        assert!(Tier::Ranger < Tier::Vanguard);
        assert!(Tier::Vanguard < Tier::Celestial);
    }
}
