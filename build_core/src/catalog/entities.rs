//! Catalog entity definitions
//!
//! Field names follow the catalog snapshot format. Numeric fields that come
//! from imported game data are kept as [`IntLike`] and read through the typed
//! accessors below, which apply [`coerce_int`] with the right default.

use crate::types::{
    coerce_int, ArmorId, ArmorType, BuildId, CharmId, DecorationId, IntLike, MonsterId,
    SetBonusExternalId, SetBonusRowId, SkillExternalId, SkillRowId, SocketSlot, WeaponId,
};
use serde::{Deserialize, Serialize};

/// A skill definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillRowId,
    pub external_id: SkillExternalId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub max_level: Option<IntLike>,
}

impl Skill {
    /// Highest level this skill can reach (at least 1)
    pub fn level_cap(&self) -> i64 {
        coerce_int(self.max_level.as_ref(), 1).max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub id: WeaponId,
    #[serde(default)]
    pub external_id: i64,
    pub name: String,
    #[serde(default)]
    pub weapon_type: String,
    #[serde(default)]
    pub rarity: Option<IntLike>,
    #[serde(default)]
    pub attack_raw: Option<IntLike>,
    #[serde(default)]
    pub attack_display: Option<IntLike>,
    #[serde(default)]
    pub affinity: Option<IntLike>,
    /// Element type, e.g. "fire"
    #[serde(default)]
    pub element: Option<String>,
    #[serde(default)]
    pub element_damage: Option<IntLike>,
    #[serde(default)]
    pub elderseal: Option<String>,
}

impl Weapon {
    pub fn rarity(&self) -> i64 {
        coerce_int(self.rarity.as_ref(), 0)
    }

    pub fn attack_raw(&self) -> i64 {
        coerce_int(self.attack_raw.as_ref(), 0)
    }

    /// Display attack, falling back to raw attack when missing or invalid
    pub fn attack_display(&self) -> i64 {
        coerce_int(self.attack_display.as_ref(), self.attack_raw())
    }

    pub fn affinity(&self) -> i64 {
        coerce_int(self.affinity.as_ref(), 0)
    }

    /// Element type; an empty string means no element
    pub fn element_type(&self) -> Option<&str> {
        self.element.as_deref().filter(|e| !e.is_empty())
    }

    pub fn element_damage(&self) -> i64 {
        coerce_int(self.element_damage.as_ref(), 0)
    }
}

/// An armor piece
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Armor {
    pub id: ArmorId,
    #[serde(default)]
    pub external_id: i64,
    pub name: String,
    pub armor_type: ArmorType,
    #[serde(default)]
    pub rarity: Option<IntLike>,

    // === Defense ===
    #[serde(default)]
    pub defense_base: Option<IntLike>,
    #[serde(default)]
    pub defense_max: Option<IntLike>,
    #[serde(default)]
    pub defense_augmented: Option<IntLike>,

    // === Resistances ===
    #[serde(default)]
    pub res_fire: Option<IntLike>,
    #[serde(default)]
    pub res_water: Option<IntLike>,
    #[serde(default)]
    pub res_thunder: Option<IntLike>,
    #[serde(default)]
    pub res_ice: Option<IntLike>,
    #[serde(default)]
    pub res_dragon: Option<IntLike>,

    // === Decoration slots (slot rank, 0 = none) ===
    #[serde(default)]
    pub slot_1: Option<IntLike>,
    #[serde(default)]
    pub slot_2: Option<IntLike>,
    #[serde(default)]
    pub slot_3: Option<IntLike>,

    // === Set membership ===
    #[serde(default)]
    pub armor_set_external_id: Option<i64>,
    #[serde(default)]
    pub armor_set_name: Option<String>,
    /// Rank label of the set, e.g. "low" / "high" / "master"
    #[serde(default)]
    pub armor_set_rank: Option<String>,
    #[serde(default)]
    pub armor_set_bonus_external_id: Option<SetBonusExternalId>,
}

impl Armor {
    pub fn rarity(&self) -> i64 {
        coerce_int(self.rarity.as_ref(), 0)
    }

    pub fn defense_base(&self) -> i64 {
        coerce_int(self.defense_base.as_ref(), 0)
    }

    pub fn defense_max(&self) -> i64 {
        coerce_int(self.defense_max.as_ref(), 0)
    }

    pub fn defense_augmented(&self) -> i64 {
        coerce_int(self.defense_augmented.as_ref(), 0)
    }

    pub fn res_fire(&self) -> i64 {
        coerce_int(self.res_fire.as_ref(), 0)
    }

    pub fn res_water(&self) -> i64 {
        coerce_int(self.res_water.as_ref(), 0)
    }

    pub fn res_thunder(&self) -> i64 {
        coerce_int(self.res_thunder.as_ref(), 0)
    }

    pub fn res_ice(&self) -> i64 {
        coerce_int(self.res_ice.as_ref(), 0)
    }

    pub fn res_dragon(&self) -> i64 {
        coerce_int(self.res_dragon.as_ref(), 0)
    }

    /// Decoration slot rank by position (1..=3)
    pub fn slot_rank(&self, position: usize) -> i64 {
        let slot = match position {
            1 => &self.slot_1,
            2 => &self.slot_2,
            3 => &self.slot_3,
            _ => return 0,
        };
        coerce_int(slot.as_ref(), 0)
    }
}

/// Skill granted by an armor piece
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorSkill {
    pub armor_id: ArmorId,
    pub skill_id: SkillRowId,
    #[serde(default)]
    pub level: Option<IntLike>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Charm {
    pub id: CharmId,
    #[serde(default)]
    pub external_id: i64,
    pub name: String,
    #[serde(default)]
    pub rarity: Option<IntLike>,
}

impl Charm {
    pub fn rarity(&self) -> i64 {
        coerce_int(self.rarity.as_ref(), 0)
    }
}

/// Skill granted by a charm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharmSkill {
    pub charm_id: CharmId,
    pub skill_id: SkillRowId,
    #[serde(default)]
    pub level: Option<IntLike>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    pub id: DecorationId,
    #[serde(default)]
    pub external_id: i64,
    pub name: String,
    #[serde(default)]
    pub rarity: Option<IntLike>,
}

impl Decoration {
    pub fn rarity(&self) -> i64 {
        coerce_int(self.rarity.as_ref(), 0)
    }
}

/// Skill granted by a decoration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorationSkill {
    pub decoration_id: DecorationId,
    pub skill_id: SkillRowId,
    #[serde(default)]
    pub level: Option<IntLike>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetBonus {
    pub id: SetBonusRowId,
    pub external_id: SetBonusExternalId,
    pub name: String,
}

/// One piece-count threshold of a set bonus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetBonusRank {
    pub set_bonus_id: SetBonusRowId,
    #[serde(default)]
    pub pieces: Option<IntLike>,
    #[serde(default)]
    pub skill_id: Option<SkillRowId>,
    #[serde(default)]
    pub level: Option<IntLike>,
}

impl SetBonusRank {
    pub fn pieces(&self) -> i64 {
        coerce_int(self.pieces.as_ref(), 0)
    }

    pub fn level(&self) -> i64 {
        coerce_int(self.level.as_ref(), 0)
    }
}

/// Armor assigned to one slot of a build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildArmorPiece {
    pub slot: ArmorType,
    #[serde(default)]
    pub armor_id: Option<ArmorId>,
}

/// Decoration placed in one socket of a build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildDecoration {
    pub slot: SocketSlot,
    #[serde(default)]
    pub socket_index: u8,
    #[serde(default)]
    pub decoration_id: Option<DecorationId>,
}

/// A saved build as stored, referencing equipment by row id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildRecord {
    pub id: BuildId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub weapon_id: Option<WeaponId>,
    #[serde(default)]
    pub charm_id: Option<CharmId>,
    #[serde(default)]
    pub armor_pieces: Vec<BuildArmorPiece>,
    #[serde(default)]
    pub decorations: Vec<BuildDecoration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterWeakness {
    /// Weakness category, e.g. "element" or "ailment"
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub stars: Option<IntLike>,
    #[serde(default)]
    pub condition: Option<String>,
}

impl MonsterWeakness {
    /// Star rating, treating missing or zero as 1
    pub fn stars(&self) -> i64 {
        match coerce_int(self.stars.as_ref(), 0) {
            0 => 1,
            n => n,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub id: MonsterId,
    #[serde(default)]
    pub external_id: i64,
    pub name: String,
    #[serde(default)]
    pub monster_type: String,
    #[serde(default)]
    pub is_elder_dragon: bool,
    #[serde(default)]
    pub primary_element: Option<String>,
    #[serde(default)]
    pub weaknesses: Vec<MonsterWeakness>,
}
