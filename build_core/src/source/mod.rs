//! SkillSource - Trait and implementations for skill providers

mod armor;
mod charm;
mod decoration;
mod set_bonus;

pub use armor::ArmorSkillSource;
pub use charm::CharmSkillSource;
pub use decoration::DecorationSkillSource;
pub use set_bonus::SetBonusSkillSource;

use crate::catalog::SkillLink;
use crate::stat_block::SkillAccumulator;
use crate::types::{coerce_int, IntLike, SourceTag};

/// Trait for any equipment category that contributes skill levels
pub trait SkillSource: Send + Sync {
    /// Tag recorded in each skill's `sources` breakdown
    fn tag(&self) -> SourceTag;

    /// Priority for application order (higher = applied later)
    /// Default priority is 0.
    /// Priorities used by the built-in sources:
    /// - Armor: 0
    /// - Charm: 100
    /// - Decoration: 200
    /// - Set bonus: 300
    fn priority(&self) -> i32 {
        0
    }

    /// Merge this source's skills into the accumulator
    fn apply(&self, skills: &mut SkillAccumulator);
}

/// Level granted by a join row; missing or non-positive levels count as 1
pub fn granted_level(level: Option<&IntLike>) -> i64 {
    coerce_int(level, 1).max(1)
}

/// Merge every join-row link at its granted level
fn apply_links(links: &[SkillLink<'_>], tag: SourceTag, skills: &mut SkillAccumulator) {
    for link in links {
        skills.merge(link.skill, granted_level(link.level), tag);
    }
}
