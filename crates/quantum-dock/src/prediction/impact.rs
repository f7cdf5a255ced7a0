use serde::{Deserialize, Serialize};

use super::constants::{HIGH_IMPACT_CEILING_NM, MODERATE_IMPACT_CEILING_NM};

/// Three-bucket classification of a binding affinity.
///
/// The same thresholds drive the disease-impact narrative and the color badges shown
/// next to results, so both always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    High,
    Moderate,
    Low,
}

/// Color used when rendering an [`ImpactLevel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactBadge {
    Green,
    Yellow,
    Red,
}

impl ImpactLevel {
    /// `< 10` is high, `10..=100` is moderate, anything else (including NaN) is low.
    pub fn classify(binding_affinity: f64) -> Self {
        if binding_affinity < HIGH_IMPACT_CEILING_NM {
            ImpactLevel::High
        } else if binding_affinity <= MODERATE_IMPACT_CEILING_NM {
            ImpactLevel::Moderate
        } else {
            ImpactLevel::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ImpactLevel::High => "High",
            ImpactLevel::Moderate => "Moderate",
            ImpactLevel::Low => "Low",
        }
    }

    pub const fn badge(self) -> ImpactBadge {
        match self {
            ImpactLevel::High => ImpactBadge::Green,
            ImpactLevel::Moderate => ImpactBadge::Yellow,
            ImpactLevel::Low => ImpactBadge::Red,
        }
    }

    /// Therapeutic-impact sentence for `disease` against `target_name`.
    pub fn narrative(self, disease: &str, target_name: &str) -> String {
        match self {
            ImpactLevel::High => format!(
                "High therapeutic potential for {disease} via strong modulation of '{target_name}'."
            ),
            ImpactLevel::Moderate => {
                format!("Moderate potential for {disease}. Further optimization recommended.")
            }
            ImpactLevel::Low => format!(
                "Low affinity suggests limited therapeutic effect for {disease} without structural improvement."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_inclusive_on_the_moderate_side() {
        assert_eq!(ImpactLevel::classify(9.9999), ImpactLevel::High);
        assert_eq!(ImpactLevel::classify(10.0), ImpactLevel::Moderate);
        assert_eq!(ImpactLevel::classify(100.0), ImpactLevel::Moderate);
        assert_eq!(ImpactLevel::classify(100.0001), ImpactLevel::Low);
    }

    #[test]
    fn degenerate_affinities_fall_through_to_low() {
        assert_eq!(ImpactLevel::classify(f64::NAN), ImpactLevel::Low);
        assert_eq!(ImpactLevel::classify(f64::INFINITY), ImpactLevel::Low);
        assert_eq!(ImpactLevel::classify(f64::NEG_INFINITY), ImpactLevel::High);
    }

    #[test]
    fn badges_follow_levels() {
        assert_eq!(ImpactLevel::High.badge(), ImpactBadge::Green);
        assert_eq!(ImpactLevel::Moderate.badge(), ImpactBadge::Yellow);
        assert_eq!(ImpactLevel::Low.badge(), ImpactBadge::Red);
    }

    #[test]
    fn only_high_narrative_names_the_target() {
        let high = ImpactLevel::High.narrative("Alzheimer's Disease", "BACE1");
        assert_eq!(
            high,
            "High therapeutic potential for Alzheimer's Disease via strong modulation of 'BACE1'."
        );

        let moderate = ImpactLevel::Moderate.narrative("Alzheimer's Disease", "BACE1");
        assert!(moderate.contains("Alzheimer's Disease"));
        assert!(!moderate.contains("BACE1"));

        let low = ImpactLevel::Low.narrative("Alzheimer's Disease", "BACE1");
        assert!(low.starts_with("Low affinity suggests"));
    }
}
