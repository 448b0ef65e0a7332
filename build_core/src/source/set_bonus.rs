//! SetBonusSkillSource - Skills unlocked by equipped set pieces

use crate::catalog::{CatalogLookup, Skill};
use crate::set_bonus::{unlocked_skill_levels, SetPieceCounts};
use crate::source::SkillSource;
use crate::stat_block::SkillAccumulator;
use crate::types::{SkillExternalId, SourceTag};
use tracing::debug;

/// Skills granted by satisfied set bonus thresholds
///
/// Unlocked levels are keyed by skill external id and re-resolved to full
/// skills through the catalog before merging.
pub struct SetBonusSkillSource<'a> {
    unlocked: Vec<(&'a Skill, i64)>,
}

impl<'a> SetBonusSkillSource<'a> {
    pub fn new<C: CatalogLookup + ?Sized>(catalog: &'a C, counts: &SetPieceCounts) -> Self {
        let levels = unlocked_skill_levels(catalog, counts);
        if levels.is_empty() {
            return SetBonusSkillSource {
                unlocked: Vec::new(),
            };
        }

        let ids: Vec<SkillExternalId> = levels.keys().copied().collect();
        let skills = catalog.skills_by_external_id(&ids);

        let mut unlocked = Vec::with_capacity(levels.len());
        for (skill_id, level) in levels {
            match skills.iter().find(|s| s.external_id == skill_id) {
                Some(skill) => unlocked.push((*skill, level.max(1))),
                None => debug!(skill = skill_id.0, "unlocked set bonus skill not in catalog"),
            }
        }
        SetBonusSkillSource { unlocked }
    }

    /// Unlocked skills with the level they contribute
    pub fn unlocked(&self) -> &[(&'a Skill, i64)] {
        &self.unlocked
    }
}

impl SkillSource for SetBonusSkillSource<'_> {
    fn tag(&self) -> SourceTag {
        SourceTag::SetBonus
    }

    fn priority(&self) -> i32 {
        300
    }

    fn apply(&self, skills: &mut SkillAccumulator) {
        for (skill, level) in &self.unlocked {
            skills.merge(skill, *level, self.tag());
        }
    }
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

[[set_bonuses]]
id = 1
external_id = 200
name = "Leather Mastery"

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

[[armors]]
id = 1
name = "Leather Headgear"
armor_type = "head"
armor_set_bonus_external_id = 200

[[armors]]
id = 2
name = "Leather Mail"
armor_type = "chest"
armor_set_bonus_external_id = 200

[[armors]]
id = 3
name = "Leather Gloves"
armor_type = "gloves"
armor_set_bonus_external_id = 200

[[armors]]
id = 4
name = "Leather Belt"
armor_type = "waist"
armor_set_bonus_external_id = 200

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
"#;

    #[test]
    fn test_four_pieces_grant_best_level() {
        let catalog = Catalog::from_toml_str(CATALOG).unwrap();
        let build = catalog.load_build(BuildId(1)).unwrap();
        let counts = count_equipped_set_pieces(&build);
        let source = SetBonusSkillSource::new(&catalog, &counts);

        let mut skills = SkillAccumulator::new();
        source.apply(&mut skills);
        assert_eq!(skills.level_of(SkillExternalId(15)), Some(2));
    }

    #[test]
    fn test_nothing_unlocked_without_sets() {
        let catalog = Catalog::from_toml_str(CATALOG).unwrap();
        let source = SetBonusSkillSource::new(&catalog, &SetPieceCounts::default());
        assert!(source.unlocked().is_empty());
    }
}
