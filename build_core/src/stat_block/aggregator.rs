//! SkillAccumulator - Collects skill contributions before finalizing the skill list

use crate::catalog::Skill;
use crate::types::{SkillExternalId, SourceTag};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

/// One aggregated skill in a stats report
///
/// `level` is capped at `max_level`; `sources` keeps the uncapped
/// contribution of every equipment category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRow {
    pub skill_id: SkillExternalId,
    pub name: String,
    pub level: i64,
    pub max_level: i64,
    pub sources: BTreeMap<SourceTag, i64>,
}

impl SkillRow {
    /// Sum of all per-source contributions
    pub fn raw_level(&self) -> i64 {
        self.sources.values().fold(0, |acc, v| acc.saturating_add(*v))
    }
}

#[derive(Debug, Clone)]
struct PendingSkill {
    row: SkillRow,
    /// Order in which the skill was first merged
    seq: usize,
}

/// Accumulates skill levels from every source, keyed by skill external id
///
/// Owned by one stats computation, handed to each source by `&mut`, then
/// consumed by [`SkillAccumulator::finish`].
#[derive(Debug, Clone, Default)]
pub struct SkillAccumulator {
    rows: BTreeMap<SkillExternalId, PendingSkill>,
}

impl SkillAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one contribution. Returns `false` when it was skipped.
    pub fn merge(&mut self, skill: &Skill, level: i64, source: SourceTag) -> bool {
        let skill_id = skill.external_id;
        if skill_id.0 <= 0 || level <= 0 {
            trace!(skill = skill_id.0, level, %source, "contribution skipped");
            return false;
        }

        let max_level = skill.level_cap();
        let seq = self.rows.len();
        let pending = self.rows.entry(skill_id).or_insert_with(|| PendingSkill {
            row: SkillRow {
                skill_id,
                name: skill.name.clone(),
                level: 0,
                max_level,
                sources: BTreeMap::new(),
            },
            seq,
        });

        let row = &mut pending.row;
        if row.name != skill.name {
            row.name = skill.name.clone();
        }
        row.max_level = row.max_level.max(max_level);
        let from_source = row.sources.entry(source).or_insert(0);
        *from_source = from_source.saturating_add(level);
        row.level = row.level.saturating_add(level);

        trace!(skill = skill_id.0, level, total = row.level, %source, "skill merged");
        true
    }

    /// Uncapped running level of a skill
    pub fn level_of(&self, skill_id: SkillExternalId) -> Option<i64> {
        self.rows.get(&skill_id).map(|p| p.row.level)
    }

    /// Clamp every level to its cap and order the list
    ///
    /// Order: level descending, then name (case-insensitive), then first seen.
    pub fn finish(self) -> Vec<SkillRow> {
        let mut pending: Vec<PendingSkill> = self.rows.into_values().collect();
        for p in &mut pending {
            if p.row.level > p.row.max_level {
                p.row.level = p.row.max_level;
            }
        }

        pending.sort_by(|a, b| {
            b.row
                .level
                .cmp(&a.row.level)
                .then_with(|| a.row.name.to_lowercase().cmp(&b.row.name.to_lowercase()))
                .then(a.seq.cmp(&b.seq))
        });
        pending.into_iter().map(|p| p.row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SkillRowId;

    fn skill(external_id: i64, name: &str, max_level: i64) -> Skill {
        Skill {
            id: SkillRowId(external_id + 1000),
            external_id: SkillExternalId(external_id),
            name: name.to_string(),
            description: String::new(),
            max_level: Some(max_level.into()),
        }
    }

    #[test]
    fn test_levels_clamped_sources_raw() {
        let guard = skill(10, "Guard", 3);
        let mut acc = SkillAccumulator::new();
        acc.merge(&guard, 2, SourceTag::Armor);
        acc.merge(&guard, 2, SourceTag::Decoration);

        let rows = acc.finish();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].level, 3);
        assert_eq!(rows[0].raw_level(), 4);
        assert_eq!(rows[0].sources.get(&SourceTag::Armor), Some(&2));
        assert_eq!(rows[0].sources.get(&SourceTag::Decoration), Some(&2));
    }

    #[test]
    fn test_invalid_contributions_skipped() {
        let mut acc = SkillAccumulator::new();
        assert!(!acc.merge(&skill(0, "Nothing", 1), 1, SourceTag::Armor));
        assert!(!acc.merge(&skill(5, "Guard", 5), 0, SourceTag::Charm));
        assert!(acc.finish().is_empty());
    }

    #[test]
    fn test_huge_levels_saturate() {
        let guard = skill(10, "Guard", 5);
        let mut acc = SkillAccumulator::new();
        acc.merge(&guard, i64::MAX, SourceTag::Armor);
        acc.merge(&guard, i64::MAX, SourceTag::Armor);
        acc.merge(&guard, 1, SourceTag::Charm);

        assert_eq!(acc.level_of(SkillExternalId(10)), Some(i64::MAX));
        let rows = acc.finish();
        assert_eq!(rows[0].level, 5);
        assert_eq!(rows[0].sources.get(&SourceTag::Armor), Some(&i64::MAX));
        assert_eq!(rows[0].raw_level(), i64::MAX);
    }

    #[test]
    fn test_max_level_raised_and_name_refreshed() {
        let mut acc = SkillAccumulator::new();
        acc.merge(&skill(7, "Old Name", 2), 1, SourceTag::Armor);
        acc.merge(&skill(7, "New Name", 5), 3, SourceTag::Charm);

        assert_eq!(acc.level_of(SkillExternalId(7)), Some(4));
        let rows = acc.finish();
        assert_eq!(rows[0].name, "New Name");
        assert_eq!(rows[0].max_level, 5);
        assert_eq!(rows[0].level, 4);
    }

    #[test]
    fn test_finish_ordering() {
        let mut acc = SkillAccumulator::new();
        acc.merge(&skill(3, "weakness exploit", 3), 1, SourceTag::Armor);
        acc.merge(&skill(1, "Attack Boost", 7), 1, SourceTag::Armor);
        acc.merge(&skill(2, "Critical Eye", 7), 2, SourceTag::Armor);
        // same lowercase name as skill 1, seen later
        acc.merge(&skill(4, "attack boost", 7), 1, SourceTag::Charm);

        let ids: Vec<i64> = acc.finish().iter().map(|r| r.skill_id.0).collect();
        assert_eq!(ids, vec![2, 1, 4, 3]);
    }

    #[test]
    fn test_sources_serialize_in_fixed_order() {
        let guard = skill(10, "Guard", 5);
        let mut acc = SkillAccumulator::new();
        acc.merge(&guard, 1, SourceTag::SetBonus);
        acc.merge(&guard, 1, SourceTag::Armor);

        let json = serde_json::to_string(&acc.finish()[0].sources).unwrap();
        assert_eq!(json, r#"{"armor":1,"set_bonus":1}"#);
    }
}
