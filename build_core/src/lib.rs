//! build_core - Build stats engine for Monster Hunter World loadouts
//!
//! This library provides:
//! - Catalog: game data snapshot with typed lookups and list queries
//! - BuildStatsEngine: attack, defense, resistances, set bonuses and skills of a build
//! - SkillAccumulator: deduplicated, capped, per-source skill totals
//! - Recommender: best loadout against a monster

pub mod catalog;
pub mod defense;
pub mod prelude;
pub mod recommend;
pub mod set_bonus;
pub mod source;
pub mod stat_block;
pub mod types;

// Re-export core types for convenience
pub use catalog::{BuildLoader, BuildSnapshot, Catalog, CatalogError, CatalogLookup};
pub use defense::{Element, Resistances};
pub use recommend::{recommend_build, Recommendation, RecommendError, ScoringWeights};
pub use set_bonus::{SetBonusRow, SetGroupKey, SetPieceCounts};
pub use source::{
    ArmorSkillSource, CharmSkillSource, DecorationSkillSource, SetBonusSkillSource, SkillSource,
};
pub use stat_block::{
    compute_build_stats, BuildStatsEngine, BuildStatsError, BuildStatsReport, SkillAccumulator,
    SkillRow, StatsBlock,
};
pub use types::{
    coerce_int, ArmorType, BuildId, IntLike, SkillExternalId, SkillRowId, SocketSlot, SourceTag,
};
