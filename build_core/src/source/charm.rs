//! CharmSkillSource - Skills from the build's charm

use crate::catalog::{BuildSnapshot, CatalogLookup, SkillLink};
use crate::source::{apply_links, SkillSource};
use crate::stat_block::SkillAccumulator;
use crate::types::SourceTag;

pub struct CharmSkillSource<'a> {
    links: Vec<SkillLink<'a>>,
}

impl<'a> CharmSkillSource<'a> {
    pub fn new<C: CatalogLookup + ?Sized>(catalog: &'a C, build: &BuildSnapshot) -> Self {
        let links = match build.charm {
            Some(ref charm) => catalog.charm_skills(charm.id),
            None => Vec::new(),
        };
        CharmSkillSource { links }
    }

    pub fn links(&self) -> &[SkillLink<'a>] {
        &self.links
    }
}

impl SkillSource for CharmSkillSource<'_> {
    fn tag(&self) -> SourceTag {
        SourceTag::Charm
    }

    fn priority(&self) -> i32 {
        100
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
external_id = 15
name = "Attack Boost"
max_level = 7

[[charms]]
id = 3
name = "Power Charm II"

[[charm_skills]]
charm_id = 3
skill_id = 1
level = 2

[[builds]]
id = 1
charm_id = 3

[[builds]]
id = 2
"#;

    #[test]
    fn test_charm_source() {
        let catalog = Catalog::from_toml_str(CATALOG).unwrap();
        let build = catalog.load_build(BuildId(1)).unwrap();
        let source = CharmSkillSource::new(&catalog, &build);

        let mut skills = SkillAccumulator::new();
        source.apply(&mut skills);
        assert_eq!(skills.level_of(SkillExternalId(15)), Some(2));
        assert_eq!(source.priority(), 100);
    }

    #[test]
    fn test_build_without_charm() {
        let catalog = Catalog::from_toml_str(CATALOG).unwrap();
        let build = catalog.load_build(BuildId(2)).unwrap();
        assert!(CharmSkillSource::new(&catalog, &build).links().is_empty());
    }
}
