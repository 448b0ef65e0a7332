//! DecorationSkillSource - Skills from socketed decorations

use crate::catalog::{BuildSnapshot, CatalogLookup, SkillLink};
use crate::source::{apply_links, SkillSource};
use crate::stat_block::SkillAccumulator;
use crate::types::SourceTag;

/// Skills granted by the distinct decorations socketed in a build
///
/// A decoration socketed more than once contributes its skills once.
pub struct DecorationSkillSource<'a> {
    links: Vec<SkillLink<'a>>,
}

impl<'a> DecorationSkillSource<'a> {
    pub fn new<C: CatalogLookup + ?Sized>(catalog: &'a C, build: &BuildSnapshot) -> Self {
        let decoration_ids = build.distinct_decoration_ids();
        let links = if decoration_ids.is_empty() {
            Vec::new()
        } else {
            catalog.decoration_skills(&decoration_ids)
        };
        DecorationSkillSource { links }
    }

    pub fn links(&self) -> &[SkillLink<'a>] {
        &self.links
    }
}

impl SkillSource for DecorationSkillSource<'_> {
    fn tag(&self) -> SourceTag {
        SourceTag::Decoration
    }

    fn priority(&self) -> i32 {
        200
    }

    fn apply(&self, skills: &mut SkillAccumulator) {
        apply_links(&self.links, self.tag(), skills);
    }
}
