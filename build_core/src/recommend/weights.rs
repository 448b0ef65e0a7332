//! Scoring weights for the matchup recommender

use crate::catalog::{load_toml, parse_toml, CatalogError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable recommender weights
///
/// Every field is optional in TOML; missing fields keep their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Points per weakness star when the weapon element matches
    #[serde(default = "default_element")]
    pub element: f64,
    /// Points per affinity percent
    #[serde(default = "default_affinity")]
    pub affinity: f64,
    /// Points per max level of a granted skill
    #[serde(default = "default_skill")]
    pub skill: f64,
    /// Points per resistance point against the monster's element
    #[serde(default = "default_resistance_positive")]
    pub resistance_positive: f64,
    /// Points per point of negative resistance against the monster's element
    #[serde(default = "default_resistance_negative")]
    pub resistance_negative: f64,
    /// Bonus per charm skill the chosen armor also grants
    #[serde(default = "default_synergy")]
    pub synergy: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        ScoringWeights {
            element: 30.0,
            affinity: 0.25,
            skill: 10.0,
            resistance_positive: 15.0,
            resistance_negative: 30.0,
            synergy: 25.0,
        }
    }
}

fn default_element() -> f64 {
    30.0
}
fn default_affinity() -> f64 {
    0.25
}
fn default_skill() -> f64 {
    10.0
}
fn default_resistance_positive() -> f64 {
    15.0
}
fn default_resistance_negative() -> f64 {
    30.0
}
fn default_synergy() -> f64 {
    25.0
}

impl ScoringWeights {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        load_toml(path)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        parse_toml(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let weights = ScoringWeights::from_toml_str("").unwrap();
        assert_eq!(weights, ScoringWeights::default());
    }

    #[test]
    fn test_partial_override() {
        let weights = ScoringWeights::from_toml_str("synergy = 40.0\nelement = 10").unwrap();
        assert_eq!(weights.synergy, 40.0);
        assert_eq!(weights.element, 10.0);
        assert_eq!(weights.skill, 10.0);
    }

    #[test]
    fn test_bad_value_rejected() {
        assert!(ScoringWeights::from_toml_str("skill = \"lots\"").is_err());
    }
}
