//! Stats report - The serialized result of a build stats computation
//!
//! Field names and nesting are a public contract:
//!
//! ```text
//! {
//!   build_id,
//!   stats: { attack: {raw, display}, affinity, element: {type, value},
//!            defense, resistances: {fire, water, thunder, ice, dragon} },
//!   skills: [ {skill_id, name, level, max_level, sources} ],
//!   set_bonuses: [ {name, pieces, active} ]
//! }
//! ```

use crate::defense::Resistances;
use crate::set_bonus::SetBonusRow;
use crate::stat_block::{AttackStats, ElementStats, SkillRow};
use crate::types::BuildId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsBlock {
    pub attack: AttackStats,
    pub affinity: i64,
    pub element: ElementStats,
    pub defense: i64,
    pub resistances: Resistances,
}

/// Aggregate stats of one build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStatsReport {
    pub build_id: BuildId,
    pub stats: StatsBlock,
    pub skills: Vec<SkillRow>,
    pub set_bonuses: Vec<SetBonusRow>,
}

impl BuildStatsReport {
    /// Skill row by external id
    pub fn skill(&self, skill_id: i64) -> Option<&SkillRow> {
        self.skills.iter().find(|s| s.skill_id.0 == skill_id)
    }

    /// Set bonus rows that are currently active
    pub fn active_set_bonuses(&self) -> impl Iterator<Item = &SetBonusRow> {
        self.set_bonuses.iter().filter(|b| b.active)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
