//! Set bonuses - Counting equipped set pieces
//!
//! Armor pieces are grouped by [`SetGroupKey`]. The counts feed two passes:
//! - [`evaluate_thresholds`]: one display row per piece threshold
//! - [`unlocked_skill_levels`]: skills granted by satisfied thresholds

mod thresholds;

pub use thresholds::{evaluate_thresholds, unlocked_skill_levels, SetBonusRow};

use crate::catalog::{Armor, BuildSnapshot};
use crate::types::SetBonusExternalId;
use std::collections::BTreeMap;

/// Display name for a group whose pieces carry no set name
pub const UNKNOWN_SET: &str = "Unknown Set";

/// Grouping key for armor pieces of the same set
///
/// Two pieces belong to the same group only when all three parts match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SetGroupKey {
    pub bonus_id: Option<SetBonusExternalId>,
    pub set_id: Option<i64>,
    pub set_name: String,
}

impl SetGroupKey {
    /// Key for an armor piece, or `None` for a set-less piece
    pub fn for_armor(armor: &Armor) -> Option<Self> {
        let set_name = armor.armor_set_name.as_deref().unwrap_or("").trim();
        let bonus_id = armor.armor_set_bonus_external_id;
        let set_id = armor.armor_set_external_id;

        if bonus_id.is_none() && set_id.is_none() && set_name.is_empty() {
            return None;
        }

        let set_name = if set_name.is_empty() {
            UNKNOWN_SET.to_string()
        } else {
            set_name.to_string()
        };

        Some(SetGroupKey {
            bonus_id,
            set_id,
            set_name,
        })
    }
}

/// Equipped pieces of one set group
#[derive(Debug, Clone, PartialEq)]
pub struct SetGroup {
    pub key: SetGroupKey,
    pub pieces: i64,
    /// Position in first-seen order
    pub seq: usize,
    /// Rank label of the first piece seen in this group
    pub rank: Option<String>,
}

impl SetGroup {
    pub fn name(&self) -> &str {
        &self.key.set_name
    }
}

/// Piece counts per set group, in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetPieceCounts {
    groups: Vec<SetGroup>,
}

impl SetPieceCounts {
    /// Count pieces per group; set-less pieces are skipped
    pub fn count<'a>(armors: impl IntoIterator<Item = &'a Armor>) -> Self {
        let mut groups: Vec<SetGroup> = Vec::new();

        for armor in armors {
            let Some(key) = SetGroupKey::for_armor(armor) else {
                continue;
            };

            match groups.iter_mut().find(|g| g.key == key) {
                Some(group) => group.pieces = group.pieces.saturating_add(1),
                None => {
                    let seq = groups.len();
                    groups.push(SetGroup {
                        key,
                        pieces: 1,
                        seq,
                        rank: armor.armor_set_rank.clone(),
                    });
                }
            }
        }

        SetPieceCounts { groups }
    }

    pub fn groups(&self) -> &[SetGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Pieces equipped per set bonus, summed over every group sharing the bonus
    pub fn pieces_per_bonus(&self) -> BTreeMap<SetBonusExternalId, i64> {
        let mut out = BTreeMap::new();
        for group in &self.groups {
            if let Some(bonus_id) = group.key.bonus_id {
                let total = out.entry(bonus_id).or_insert(0i64);
                *total = total.saturating_add(group.pieces);
            }
        }
        out
    }

    /// Distinct observed bonus ids, ascending
    pub fn bonus_ids(&self) -> Vec<SetBonusExternalId> {
        self.pieces_per_bonus().into_keys().collect()
    }
}

/// Count equipped set pieces of a build
pub fn count_equipped_set_pieces(build: &BuildSnapshot) -> SetPieceCounts {
    SetPieceCounts::count(build.equipped_armor())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ArmorId, ArmorType};

    fn armor(id: i64, bonus: Option<i64>, set_id: Option<i64>, name: Option<&str>) -> Armor {
        Armor {
            id: ArmorId(id),
            external_id: id,
            name: format!("Piece {id}"),
            armor_type: ArmorType::all()[(id as usize) % 5],
            rarity: None,
            defense_base: None,
            defense_max: None,
            defense_augmented: None,
            res_fire: None,
            res_water: None,
            res_thunder: None,
            res_ice: None,
            res_dragon: None,
            slot_1: None,
            slot_2: None,
            slot_3: None,
            armor_set_external_id: set_id,
            armor_set_name: name.map(str::to_string),
            armor_set_rank: None,
            armor_set_bonus_external_id: bonus.map(SetBonusExternalId),
        }
    }

    #[test]
    fn test_set_less_piece_has_no_key() {
        assert!(SetGroupKey::for_armor(&armor(1, None, None, Some("   "))).is_none());
    }

    #[test]
    fn test_unknown_set_fallback() {
        let key = SetGroupKey::for_armor(&armor(1, None, Some(7), None)).unwrap();
        assert_eq!(key.set_name, UNKNOWN_SET);
        assert_eq!(key.set_id, Some(7));
    }

    #[test]
    fn test_count_groups_in_first_seen_order() {
        let pieces = [
            armor(1, Some(200), Some(1), Some("Leather")),
            armor(2, None, None, None),
            armor(3, None, Some(9), Some("Bone")),
            armor(4, Some(200), Some(1), Some("Leather ")),
        ];
        let counts = SetPieceCounts::count(pieces.iter());

        let summary: Vec<(&str, i64, usize)> = counts
            .groups()
            .iter()
            .map(|g| (g.name(), g.pieces, g.seq))
            .collect();
        assert_eq!(summary, vec![("Leather", 2, 0), ("Bone", 1, 1)]);
    }

    #[test]
    fn test_differing_names_split_groups_but_share_bonus() {
        let pieces = [
            armor(1, Some(200), Some(1), Some("Leather α")),
            armor(2, Some(200), Some(1), Some("Leather β")),
        ];
        let counts = SetPieceCounts::count(pieces.iter());
        assert_eq!(counts.groups().len(), 2);
        assert_eq!(
            counts.pieces_per_bonus().get(&SetBonusExternalId(200)),
            Some(&2)
        );
        assert_eq!(counts.bonus_ids(), vec![SetBonusExternalId(200)]);
    }

    #[test]
    fn test_first_rank_label_wins() {
        let mut first = armor(1, Some(200), None, Some("Leather"));
        first.armor_set_rank = Some("low".to_string());
        let mut second = armor(2, Some(200), None, Some("Leather"));
        second.armor_set_rank = Some("high".to_string());

        let counts = SetPieceCounts::count([first, second].iter());
        assert_eq!(counts.groups()[0].rank.as_deref(), Some("low"));
    }
}
