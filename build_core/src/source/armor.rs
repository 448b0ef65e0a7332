//! ArmorSkillSource - Skills from equipped armor pieces

use crate::catalog::{BuildSnapshot, CatalogLookup, SkillLink};
use crate::source::{apply_links, SkillSource};
use crate::stat_block::SkillAccumulator;
use crate::types::{ArmorId, SourceTag};

/// Skills granted by every equipped armor piece
pub struct ArmorSkillSource<'a> {
    links: Vec<SkillLink<'a>>,
}

impl<'a> ArmorSkillSource<'a> {
    /// Look up the skill rows of every equipped piece in one batch
    pub fn new<C: CatalogLookup + ?Sized>(catalog: &'a C, build: &BuildSnapshot) -> Self {
        let armor_ids: Vec<ArmorId> = build.equipped_armor().map(|a| a.id).collect();
        let links = if armor_ids.is_empty() {
            Vec::new()
        } else {
            catalog.armor_skills(&armor_ids)
        };
        ArmorSkillSource { links }
    }

    pub fn links(&self) -> &[SkillLink<'a>] {
        &self.links
    }
}

impl SkillSource for ArmorSkillSource<'_> {
    fn tag(&self) -> SourceTag {
        SourceTag::Armor
    }

    fn priority(&self) -> i32 {
        0
    }

    fn apply(&self, skills: &mut SkillAccumulator) {
        apply_links(&self.links, self.tag(), skills);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BuildLoader, Catalog};
    use crate::types::{BuildId, SkillExternalId};

    const CATALOG: &str = r#"
[[skills]]
id = 1
external_id = 429
name = "Hunger Resistance"
max_level = 3

[[armors]]
id = 1
name = "Leather Headgear"
armor_type = "head"

[[armors]]
id = 2
name = "Leather Mail"
armor_type = "chest"

[[armor_skills]]
armor_id = 1
skill_id = 1
level = 1

[[armor_skills]]
armor_id = 2
skill_id = 1

[[builds]]
id = 1

[[builds.armor_pieces]]
slot = "head"
armor_id = 1

[[builds.armor_pieces]]
slot = "chest"
armor_id = 2

[[builds]]
id = 2
"#;

    #[test]
    fn test_armor_source_merges_every_piece() {
        let catalog = Catalog::from_toml_str(CATALOG).unwrap();
        let build = catalog.load_build(BuildId(1)).unwrap();
        let source = ArmorSkillSource::new(&catalog, &build);
        assert_eq!(source.links().len(), 2);

        let mut skills = SkillAccumulator::new();
        source.apply(&mut skills);
        // missing level on the chest row counts as 1
        assert_eq!(skills.level_of(SkillExternalId(429)), Some(2));
    }

    #[test]
    fn test_no_armor_no_links() {
        let catalog = Catalog::from_toml_str(CATALOG).unwrap();
        let build = catalog.load_build(BuildId(2)).unwrap();
        let source = ArmorSkillSource::new(&catalog, &build);
        assert!(source.links().is_empty());
        assert_eq!(source.tag(), SourceTag::Armor);
    }
}
