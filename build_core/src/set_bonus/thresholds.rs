//! Threshold rows and unlocked set bonus skills

use super::SetPieceCounts;
use crate::catalog::{CatalogLookup, RankView};
use crate::types::{SetBonusExternalId, SkillExternalId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// One set bonus threshold as shown in a stats report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetBonusRow {
    pub name: String,
    pub pieces: i64,
    pub active: bool,
}

impl SetBonusRow {
    fn inactive(name: &str, pieces: i64) -> Self {
        SetBonusRow {
            name: name.to_string(),
            pieces,
            active: false,
        }
    }
}

/// Fetch ranks for every observed bonus in one lookup, grouped by bonus id
fn ranks_by_bonus<'c, C>(
    catalog: &'c C,
    bonus_ids: &[SetBonusExternalId],
) -> BTreeMap<SetBonusExternalId, Vec<RankView<'c>>>
where
    C: CatalogLookup + ?Sized,
{
    let mut out: BTreeMap<SetBonusExternalId, Vec<RankView<'c>>> = BTreeMap::new();
    if bonus_ids.is_empty() {
        return out;
    }
    for rank in catalog.set_bonus_ranks(bonus_ids) {
        out.entry(rank.bonus_id()).or_default().push(rank);
    }
    out
}

/// Evaluate piece thresholds for every equipped set group
///
/// Rows are ordered by name (case-insensitive), then pieces.
pub fn evaluate_thresholds<C>(catalog: &C, counts: &SetPieceCounts) -> Vec<SetBonusRow>
where
    C: CatalogLookup + ?Sized,
{
    let ranks = ranks_by_bonus(catalog, &counts.bonus_ids());

    let mut groups: Vec<_> = counts.groups().iter().collect();
    groups.sort_by(|a, b| {
        b.pieces
            .cmp(&a.pieces)
            .then_with(|| a.name().to_lowercase().cmp(&b.name().to_lowercase()))
            .then(a.seq.cmp(&b.seq))
    });

    let mut rows = Vec::new();
    for group in groups {
        let bonus_ranks = group
            .key
            .bonus_id
            .and_then(|id| ranks.get(&id))
            .filter(|r| !r.is_empty());

        let Some(bonus_ranks) = bonus_ranks else {
            rows.push(SetBonusRow::inactive(group.name(), group.pieces));
            continue;
        };

        let bonus_name = bonus_ranks[0].set_bonus.name.as_str();
        let mut thresholds: Vec<i64> = bonus_ranks
            .iter()
            .map(|r| r.pieces())
            .filter(|&p| p > 0)
            .collect();
        thresholds.sort_unstable();
        thresholds.dedup();

        if thresholds.is_empty() {
            rows.push(SetBonusRow::inactive(bonus_name, group.pieces));
            continue;
        }

        for threshold in thresholds {
            rows.push(SetBonusRow {
                name: bonus_name.to_string(),
                pieces: threshold,
                active: group.pieces >= threshold,
            });
        }
    }

    rows.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then(a.pieces.cmp(&b.pieces))
    });
    rows
}

/// Best skill level granted by satisfied set bonus ranks, keyed by skill external id
///
/// When several satisfied ranks grant the same skill the highest level wins.
pub fn unlocked_skill_levels<C>(catalog: &C, counts: &SetPieceCounts) -> BTreeMap<SkillExternalId, i64>
where
    C: CatalogLookup + ?Sized,
{
    let equipped = counts.pieces_per_bonus();
    let mut best: BTreeMap<SkillExternalId, i64> = BTreeMap::new();
    if equipped.is_empty() {
        return best;
    }

    let bonus_ids: Vec<SetBonusExternalId> = equipped.keys().copied().collect();
    for rank in catalog.set_bonus_ranks(&bonus_ids) {
        let pieces = equipped.get(&rank.bonus_id()).copied().unwrap_or(0);
        if pieces < rank.pieces() {
            continue;
        }

        let Some(skill) = rank.skill else {
            debug!(bonus = rank.bonus_id().0, "set bonus rank has no skill, skipped");
            continue;
        };
        let level = rank.level();
        if skill.external_id.0 <= 0 || level <= 0 {
            debug!(
                bonus = rank.bonus_id().0,
                skill = skill.external_id.0,
                level,
                "invalid set bonus rank skipped"
            );
            continue;
        }

        let entry = best.entry(skill.external_id).or_insert(level);
        if level > *entry {
            *entry = level;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BuildLoader, Catalog};
    use crate::set_bonus::count_equipped_set_pieces;
    use crate::types::BuildId;

    const CATALOG: &str = r#"
[[skills]]
id = 1
external_id = 15
name = "Attack Boost"
max_level = 7

[[skills]]
id = 2
external_id = 0
name = "Broken Skill"

[[set_bonuses]]
id = 1
external_id = 200
name = "Leather Mastery"

[[set_bonuses]]
id = 2
external_id = 300
name = "Empty Bonus"

[[set_bonuses]]
id = 3
external_id = 500
name = "Rankless Bonus"

[[set_bonus_ranks]]
set_bonus_id = 1
pieces = 2
skill_id = 1
level = 1

[[set_bonus_ranks]]
set_bonus_id = 1
pieces = 4
skill_id = 1
level = 2

[[set_bonus_ranks]]
set_bonus_id = 1
pieces = 4
skill_id = 2
level = 1

[[set_bonus_ranks]]
set_bonus_id = 2
pieces = 0
skill_id = 1
level = 1

[[armors]]
id = 1
name = "Leather Headgear"
armor_type = "head"
armor_set_bonus_external_id = 200
armor_set_name = "Leather"

[[armors]]
id = 2
name = "Leather Mail"
armor_type = "chest"
armor_set_bonus_external_id = 200
armor_set_name = "Leather"

[[armors]]
id = 3
name = "Leather Gloves"
armor_type = "gloves"
armor_set_bonus_external_id = 200
armor_set_name = "Leather"

[[armors]]
id = 4
name = "Leather Belt"
armor_type = "waist"
armor_set_bonus_external_id = 200
armor_set_name = "Leather"

[[armors]]
id = 5
name = "Bone Greaves"
armor_type = "legs"
armor_set_external_id = 9
armor_set_name = "Bone"

[[armors]]
id = 6
name = "Odd Greaves"
armor_type = "legs"
armor_set_bonus_external_id = 300
armor_set_name = "Odd"

[[armors]]
id = 7
name = "Ghost Helm"
armor_type = "head"
armor_set_bonus_external_id = 400
armor_set_name = "Ghost"

[[armors]]
id = 8
name = "Ghost Mail"
armor_type = "chest"
armor_set_bonus_external_id = 400
armor_set_name = "Ghost"

[[armors]]
id = 9
name = "Plain Gloves"
armor_type = "gloves"
armor_set_bonus_external_id = 500
armor_set_name = "Plain"

[[armors]]
id = 10
name = "Nameless Coil"
armor_type = "waist"
armor_set_external_id = 11

[[builds]]
id = 1

[[builds.armor_pieces]]
slot = "head"
armor_id = 1

[[builds.armor_pieces]]
slot = "chest"
armor_id = 2

[[builds.armor_pieces]]
slot = "gloves"
armor_id = 3

[[builds.armor_pieces]]
slot = "waist"
armor_id = 4

[[builds.armor_pieces]]
slot = "legs"
armor_id = 5

[[builds]]
id = 2

[[builds.armor_pieces]]
slot = "head"
armor_id = 1

[[builds.armor_pieces]]
slot = "chest"
armor_id = 2

[[builds.armor_pieces]]
slot = "legs"
armor_id = 6

[[builds]]
id = 3

[[builds.armor_pieces]]
slot = "head"
armor_id = 7

[[builds.armor_pieces]]
slot = "chest"
armor_id = 8

[[builds.armor_pieces]]
slot = "gloves"
armor_id = 9

[[builds.armor_pieces]]
slot = "waist"
armor_id = 10
"#;

    fn counts_for(catalog: &Catalog, build: i64) -> SetPieceCounts {
        let snapshot = catalog.load_build(BuildId(build)).unwrap();
        count_equipped_set_pieces(&snapshot)
    }

    #[test]
    fn test_threshold_rows() {
        let catalog = Catalog::from_toml_str(CATALOG).unwrap();
        let rows = evaluate_thresholds(&catalog, &counts_for(&catalog, 1));

        assert_eq!(
            rows,
            vec![
                SetBonusRow::inactive("Bone", 1),
                SetBonusRow {
                    name: "Leather Mastery".to_string(),
                    pieces: 2,
                    active: true,
                },
                SetBonusRow {
                    name: "Leather Mastery".to_string(),
                    pieces: 4,
                    active: true,
                },
            ]
        );
    }

    #[test]
    fn test_partial_set_and_placeholder_row() {
        let catalog = Catalog::from_toml_str(CATALOG).unwrap();
        let rows = evaluate_thresholds(&catalog, &counts_for(&catalog, 2));

        // bonus 300 only has a zero-piece rank
        assert_eq!(
            rows,
            vec![
                SetBonusRow::inactive("Empty Bonus", 1),
                SetBonusRow {
                    name: "Leather Mastery".to_string(),
                    pieces: 2,
                    active: true,
                },
                SetBonusRow::inactive("Leather Mastery", 4),
            ]
        );
    }

    #[test]
    fn test_bonus_without_ranks_uses_group_name() {
        let catalog = Catalog::from_toml_str(CATALOG).unwrap();
        let counts = counts_for(&catalog, 3);
        let rows = evaluate_thresholds(&catalog, &counts);

        // 400 is not in the catalog, 500 has no ranks, the waist piece only has a set id
        assert_eq!(
            rows,
            vec![
                SetBonusRow::inactive("Ghost", 2),
                SetBonusRow::inactive("Plain", 1),
                SetBonusRow::inactive(crate::set_bonus::UNKNOWN_SET, 1),
            ]
        );
        assert!(unlocked_skill_levels(&catalog, &counts).is_empty());
    }

    #[test]
    fn test_best_threshold_level_wins() {
        let catalog = Catalog::from_toml_str(CATALOG).unwrap();
        let unlocked = unlocked_skill_levels(&catalog, &counts_for(&catalog, 1));

        // 2p grants level 1 and 4p grants level 2: not summed
        assert_eq!(unlocked.get(&SkillExternalId(15)), Some(&2));
        // skill with external id 0 is discarded
        assert_eq!(unlocked.len(), 1);
    }

    #[test]
    fn test_unsatisfied_threshold_not_unlocked() {
        let catalog = Catalog::from_toml_str(CATALOG).unwrap();
        let unlocked = unlocked_skill_levels(&catalog, &counts_for(&catalog, 2));

        // 2 Leather pieces satisfy 2p (level 1); bonus 300's zero-piece rank also grants level 1
        assert_eq!(unlocked.get(&SkillExternalId(15)), Some(&1));
    }

    #[test]
    fn test_no_sets_equipped() {
        let catalog = Catalog::from_toml_str(CATALOG).unwrap();
        let counts = SetPieceCounts::default();
        assert!(evaluate_thresholds(&catalog, &counts).is_empty());
        assert!(unlocked_skill_levels(&catalog, &counts).is_empty());
    }
}
