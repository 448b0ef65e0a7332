//! Core types shared across the build engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                $name(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

row_id!(
    /// Storage row id of a weapon
    WeaponId
);
row_id!(
    /// Storage row id of an armor piece
    ArmorId
);
row_id!(
    /// Storage row id of a charm
    CharmId
);
row_id!(
    /// Storage row id of a decoration
    DecorationId
);
row_id!(
    /// Storage row id of a skill. Never exposed in the stats report.
    SkillRowId
);
row_id!(
    /// Stable skill identifier from the game-data source.
    ///
    /// This is the only skill identifier that appears in a stats report as
    /// `skill_id`; join rows reference skills by [`SkillRowId`] instead.
    SkillExternalId
);
row_id!(
    /// Storage row id of a set bonus
    SetBonusRowId
);
row_id!(
    /// Stable set bonus identifier, referenced by armor pieces
    SetBonusExternalId
);
row_id!(
    /// Storage row id of a saved build
    BuildId
);
row_id!(
    /// Storage row id of a monster
    MonsterId
);

/// Armor slot a piece occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorType {
    Head,
    Chest,
    Gloves,
    Waist,
    Legs,
}

impl ArmorType {
    /// Get all armor slots in display order
    pub fn all() -> &'static [ArmorType] {
        &[
            ArmorType::Head,
            ArmorType::Chest,
            ArmorType::Gloves,
            ArmorType::Waist,
            ArmorType::Legs,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArmorType::Head => "head",
            ArmorType::Chest => "chest",
            ArmorType::Gloves => "gloves",
            ArmorType::Waist => "waist",
            ArmorType::Legs => "legs",
        }
    }
}

impl fmt::Display for ArmorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArmorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ArmorType::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown armor type: {s}"))
    }
}

/// Equipment a decoration socket belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocketSlot {
    Weapon,
    Head,
    Chest,
    Gloves,
    Waist,
    Legs,
}

/// Equipment category a skill level came from
///
/// Declaration order is the order keys appear in a serialized `sources` map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    Armor,
    Charm,
    Decoration,
    SetBonus,
}

impl SourceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::Armor => "armor",
            SourceTag::Charm => "charm",
            SourceTag::Decoration => "decoration",
            SourceTag::SetBonus => "set_bonus",
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A numeric field as it arrives from imported game data.
///
/// Imported values are not always clean integers: some carry floats, numeric
/// strings, or garbage. Read them through [`coerce_int`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntLike {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl From<i64> for IntLike {
    fn from(value: i64) -> Self {
        IntLike::Int(value)
    }
}

impl From<&str> for IntLike {
    fn from(value: &str) -> Self {
        IntLike::Text(value.to_string())
    }
}

/// Convert a loosely typed value to an integer, falling back to `default`.
///
/// - integers pass through
/// - finite floats truncate toward zero
/// - strings are trimmed and parsed as base-10 integers
/// - booleans become 0 or 1
/// - anything else (missing, NaN, unparsable text) yields `default`
pub fn coerce_int(value: Option<&IntLike>, default: i64) -> i64 {
    match value {
        None => default,
        Some(IntLike::Int(v)) => *v,
        Some(IntLike::Float(v)) => {
            let truncated = v.trunc();
            if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated <= i64::MAX as f64 {
                truncated as i64
            } else {
                default
            }
        }
        Some(IntLike::Text(s)) => s.trim().parse::<i64>().unwrap_or(default),
        Some(IntLike::Bool(b)) => i64::from(*b),
    }
}
