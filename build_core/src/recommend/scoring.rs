//! Per-item matchup scores

use super::ScoringWeights;
use crate::catalog::{Armor, Monster, Skill, Weapon};
use crate::defense::Element;
use std::collections::HashSet;

/// Weakness kind that element scoring looks at
const ELEMENT_WEAKNESS: &str = "element";

/// Raw attack, plus element weakness stars and affinity
pub fn score_weapon(monster: &Monster, weapon: &Weapon, weights: &ScoringWeights) -> f64 {
    let mut score = weapon.attack_raw() as f64;

    if let Some(element) = weapon.element_type() {
        for weakness in &monster.weaknesses {
            if weakness.kind == ELEMENT_WEAKNESS && weakness.name.eq_ignore_ascii_case(element) {
                score += weakness.stars() as f64 * weights.element;
            }
        }
    }

    score + weapon.affinity() as f64 * weights.affinity
}

/// Max defense, granted skill caps and resistance to the monster's element
pub fn score_armor(monster: &Monster, armor: &Armor, skills: &[&Skill], weights: &ScoringWeights) -> f64 {
    let defense = armor.defense_max() as f64;
    let skill_levels = skills
        .iter()
        .map(|s| s.level_cap())
        .fold(0i64, i64::saturating_add);

    let resistance = monster
        .primary_element
        .as_deref()
        .and_then(|e| e.parse::<Element>().ok())
        .map(|element| {
            let value = element.resistance_of(armor) as f64;
            if value >= 0.0 {
                value * weights.resistance_positive
            } else {
                value * weights.resistance_negative
            }
        })
        .unwrap_or(0.0);

    defense + skill_levels as f64 * weights.skill + resistance
}

/// Granted skill caps, plus a bonus for each skill the armor also grants
pub fn score_charm(skills: &[&Skill], armor_skill_names: &HashSet<&str>, weights: &ScoringWeights) -> f64 {
    skills
        .iter()
        .map(|skill| {
            let base = skill.level_cap() as f64 * weights.skill;
            if armor_skill_names.contains(skill.name.as_str()) {
                base + weights.synergy
            } else {
                base
            }
        })
        .sum()
}
