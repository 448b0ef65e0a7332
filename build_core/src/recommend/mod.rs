//! Recommend - Monster matchup build recommender
//!
//! Picks the best-scoring weapon, the best piece for every armor slot, then
//! the charm that best complements the chosen armor. Candidates are scored
//! in row id order and a later candidate only wins with a strictly higher
//! score.

mod scoring;
mod weights;

pub use scoring::{score_armor, score_charm, score_weapon};
pub use weights::ScoringWeights;

use crate::catalog::{Armor, BuildSnapshot, Catalog, CatalogLookup, Charm, Monster, Skill, Weapon};
use crate::types::{ArmorId, ArmorType, BuildId, CharmId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use thiserror::Error;
use tracing::debug;

/// Error returned by the recommender
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    #[error("Monster not found: {0}")]
    MonsterNotFound(String),
}

/// A chosen catalog item and its score
#[derive(Debug, Clone)]
pub struct Pick<'a, T> {
    pub item: &'a T,
    pub score: f64,
}

/// Best picks against one monster
#[derive(Debug, Clone)]
pub struct Recommendation<'a> {
    pub monster: &'a Monster,
    pub weapon: Option<Pick<'a, Weapon>>,
    /// Best piece per slot; slots without candidates are absent
    pub armor: BTreeMap<ArmorType, Pick<'a, Armor>>,
    pub charm: Option<Pick<'a, Charm>>,
}

/// Item names of a recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSummary {
    pub monster: String,
    pub weapon: Option<String>,
    pub armor: BTreeMap<ArmorType, String>,
    pub charm: Option<String>,
}

impl<'a> Recommendation<'a> {
    pub fn armor_for(&self, slot: ArmorType) -> Option<&'a Armor> {
        self.armor.get(&slot).map(|p| p.item)
    }

    pub fn summary(&self) -> RecommendationSummary {
        RecommendationSummary {
            monster: self.monster.name.clone(),
            weapon: self.weapon.as_ref().map(|p| p.item.name.clone()),
            armor: self
                .armor
                .iter()
                .map(|(slot, pick)| (*slot, pick.item.name.clone()))
                .collect(),
            charm: self.charm.as_ref().map(|p| p.item.name.clone()),
        }
    }

    /// The recommended loadout as an unsaved build
    pub fn to_snapshot(&self, id: BuildId) -> BuildSnapshot {
        let mut build = BuildSnapshot::new(id);
        if let Some(ref weapon) = self.weapon {
            build = build.with_weapon(weapon.item.clone());
        }
        for pick in self.armor.values() {
            build = build.with_armor(pick.item.clone());
        }
        if let Some(ref charm) = self.charm {
            build = build.with_charm(charm.item.clone());
        }
        build
    }
}

/// Skills granted per armor piece and per charm
struct GrantedSkills<'a> {
    armor: HashMap<ArmorId, Vec<&'a Skill>>,
    charm: HashMap<CharmId, Vec<&'a Skill>>,
}

impl<'a> GrantedSkills<'a> {
    fn new(catalog: &'a Catalog) -> Self {
        let mut armor: HashMap<ArmorId, Vec<&'a Skill>> = HashMap::new();
        for row in &catalog.data().armor_skills {
            if let Some(skill) = catalog.skill(row.skill_id) {
                armor.entry(row.armor_id).or_default().push(skill);
            }
        }

        let mut charm: HashMap<CharmId, Vec<&'a Skill>> = HashMap::new();
        for row in &catalog.data().charm_skills {
            if let Some(skill) = catalog.skill(row.skill_id) {
                charm.entry(row.charm_id).or_default().push(skill);
            }
        }

        GrantedSkills { armor, charm }
    }

    fn of_armor(&self, id: ArmorId) -> &[&'a Skill] {
        self.armor.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn of_charm(&self, id: CharmId) -> &[&'a Skill] {
        self.charm.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Highest-scoring candidate; the first one wins ties
fn best_of<'a, T>(candidates: &[&'a T], mut score: impl FnMut(&T) -> f64) -> Option<Pick<'a, T>> {
    let mut best: Option<Pick<'a, T>> = None;
    for &item in candidates {
        let value = score(item);
        if best.as_ref().map_or(true, |b| value > b.score) {
            best = Some(Pick { item, score: value });
        }
    }
    best
}

/// Pick the best loadout against a monster, looked up by exact name
pub fn recommend_build<'a>(
    catalog: &'a Catalog,
    monster_name: &str,
    weights: &ScoringWeights,
) -> Result<Recommendation<'a>, RecommendError> {
    let monster = catalog
        .monster_by_name(monster_name)
        .ok_or_else(|| RecommendError::MonsterNotFound(monster_name.to_string()))?;
    let granted = GrantedSkills::new(catalog);

    let mut weapons: Vec<&Weapon> = catalog.weapons().iter().collect();
    weapons.sort_by_key(|w| w.id);
    let weapon = best_of(&weapons, |w| score_weapon(monster, w, weights));

    let mut armor = BTreeMap::new();
    for &slot in ArmorType::all() {
        let mut pieces: Vec<&Armor> = catalog
            .armors()
            .iter()
            .filter(|a| a.armor_type == slot)
            .collect();
        pieces.sort_by_key(|a| a.id);
        if let Some(pick) = best_of(&pieces, |a| {
            score_armor(monster, a, granted.of_armor(a.id), weights)
        }) {
            debug!(%slot, armor = %pick.item.name, score = pick.score, "armor picked");
            armor.insert(slot, pick);
        }
    }

    let armor_skill_names: HashSet<&str> = armor
        .values()
        .flat_map(|pick| granted.of_armor(pick.item.id))
        .map(|skill| skill.name.as_str())
        .collect();

    let mut charms: Vec<&Charm> = catalog.charms().iter().collect();
    charms.sort_by_key(|c| c.id);
    let charm = best_of(&charms, |c| {
        score_charm(granted.of_charm(c.id), &armor_skill_names, weights)
    });

    debug!(
        monster = %monster.name,
        weapon = weapon.as_ref().map(|p| p.item.name.as_str()),
        charm = charm.as_ref().map(|p| p.item.name.as_str()),
        "build recommended"
    );

    Ok(Recommendation {
        monster,
        weapon,
        armor,
        charm,
    })
}
