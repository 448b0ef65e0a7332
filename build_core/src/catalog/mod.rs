//! Catalog - Game data the stats engine reads from
//!
//! The engine only talks to the catalog through two seams:
//! - [`CatalogLookup`]: entities and join rows by identifier
//! - [`BuildLoader`]: a build snapshot by id
//!
//! [`Catalog`] is the in-memory implementation, loaded from a TOML or JSON
//! snapshot file.

mod entities;
pub mod query;
mod snapshot;
mod store;

pub use entities::{
    Armor, ArmorSkill, BuildArmorPiece, BuildDecoration, BuildRecord, Charm, CharmSkill,
    Decoration, DecorationSkill, Monster, MonsterWeakness, SetBonus, SetBonusRank, Skill, Weapon,
};
pub use snapshot::{BuildSnapshot, EquippedArmor, SocketedDecoration};
pub use store::{Catalog, CatalogData};

use crate::types::{
    ArmorId, BuildId, CharmId, DecorationId, IntLike, SetBonusExternalId, SkillExternalId,
    SkillRowId, WeaponId,
};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Catalog loading error
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),
    #[error("Catalog validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let content = fs::read_to_string(path)?;
    parse_toml(&content)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, CatalogError> {
    let value: T = toml::from_str(content)?;
    Ok(value)
}

/// Load a JSON file and deserialize it
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let content = fs::read_to_string(path)?;
    let value: T = serde_json::from_str(&content)?;
    Ok(value)
}

/// A skill granted by a piece of equipment, with its stored level
#[derive(Debug, Clone, Copy)]
pub struct SkillLink<'a> {
    pub skill: &'a Skill,
    pub level: Option<&'a IntLike>,
}

/// A set bonus rank joined with its set bonus and (if resolvable) its skill
#[derive(Debug, Clone, Copy)]
pub struct RankView<'a> {
    pub set_bonus: &'a SetBonus,
    pub rank: &'a SetBonusRank,
    pub skill: Option<&'a Skill>,
}

impl RankView<'_> {
    pub fn bonus_id(&self) -> SetBonusExternalId {
        self.set_bonus.external_id
    }

    pub fn pieces(&self) -> i64 {
        self.rank.pieces()
    }

    pub fn level(&self) -> i64 {
        self.rank.level()
    }
}

/// Read access to catalog entities and join rows
///
/// Batched methods take id sets so an implementation backed by a database
/// can answer each category with a single query. Join rows whose skill no
/// longer exists are left out of the results.
pub trait CatalogLookup {
    fn skill(&self, id: SkillRowId) -> Option<&Skill>;

    /// Skills by external id; unknown ids are skipped
    fn skills_by_external_id(&self, ids: &[SkillExternalId]) -> Vec<&Skill>;

    fn weapon(&self, id: WeaponId) -> Option<&Weapon>;

    fn armor(&self, id: ArmorId) -> Option<&Armor>;

    fn charm(&self, id: CharmId) -> Option<&Charm>;

    fn decoration(&self, id: DecorationId) -> Option<&Decoration>;

    /// Skill rows of every listed armor piece
    fn armor_skills(&self, armor_ids: &[ArmorId]) -> Vec<SkillLink<'_>>;

    /// Skill rows of one charm
    fn charm_skills(&self, charm_id: CharmId) -> Vec<SkillLink<'_>>;

    /// Skill rows of every listed decoration
    fn decoration_skills(&self, decoration_ids: &[DecorationId]) -> Vec<SkillLink<'_>>;

    /// Ranks of every listed set bonus, ordered by
    /// (bonus external id, pieces, skill name, level)
    fn set_bonus_ranks(&self, bonus_ids: &[SetBonusExternalId]) -> Vec<RankView<'_>>;
}

/// Loads fully resolved build snapshots
pub trait BuildLoader {
    fn load_build(&self, id: BuildId) -> Option<BuildSnapshot>;
}
