//! Catalog list queries - filtering and ordering of catalog tables
//!
//! Order strings use the `field` / `-field` convention. Unknown fields fall
//! back to ordering by row id. Ties are always broken by row id ascending.

use super::{Armor, BuildRecord, Catalog, CatalogLookup, Charm, Decoration, Monster, Skill, Weapon};
use crate::types::{coerce_int, ArmorType};
use std::cmp::Ordering;
use std::str::FromStr;

/// Requested ordering for a list query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderBy<F> {
    pub field: F,
    pub descending: bool,
}

impl<F: FromStr + Default> OrderBy<F> {
    /// Parse `field` or `-field`; unknown fields order by id ascending
    pub fn parse(spec: &str) -> Self {
        let spec = spec.trim();
        let (descending, name) = match spec.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, spec),
        };
        match name.parse::<F>() {
            Ok(field) => OrderBy { field, descending },
            Err(_) => OrderBy::default(),
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

macro_rules! order_fields {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub enum $name {
            #[default]
            $($variant),+
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(format!("unknown order field: {other}")),
                }
            }
        }
    };
}

order_fields!(WeaponOrder {
    Id => "id",
    Name => "name",
    WeaponType => "weapon_type",
    Rarity => "rarity",
    AttackRaw => "attack_raw",
    Affinity => "affinity",
    Element => "element",
});

order_fields!(ArmorOrder {
    Id => "id",
    Name => "name",
    ArmorType => "armor_type",
    Rarity => "rarity",
    DefenseBase => "defense_base",
    DefenseMax => "defense_max",
    DefenseAugmented => "defense_augmented",
    Slot1 => "slot_1",
    Slot2 => "slot_2",
    Slot3 => "slot_3",
});

order_fields!(SkillOrder {
    Id => "id",
    Name => "name",
    MaxLevel => "max_level",
});

order_fields!(ItemOrder {
    Id => "id",
    Name => "name",
    Rarity => "rarity",
});

order_fields!(MonsterOrder {
    Id => "id",
    Name => "name",
    MonsterType => "monster_type",
    IsElderDragon => "is_elder_dragon",
});

order_fields!(BuildOrder {
    Id => "id",
    Name => "name",
});

/// Parse a loose boolean flag: true/1/yes or false/0/no, anything else is `None`
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Exact / minimum / maximum rarity filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RarityRange {
    pub exact: Option<i64>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl RarityRange {
    pub fn matches(&self, rarity: i64) -> bool {
        self.exact.map_or(true, |r| rarity == r)
            && self.min.map_or(true, |r| rarity >= r)
            && self.max.map_or(true, |r| rarity <= r)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}

#[derive(Debug, Clone, Default)]
pub struct WeaponQuery {
    pub weapon_type: Option<String>,
    pub element: Option<String>,
    pub rarity: RarityRange,
    pub min_attack: Option<i64>,
    pub order_by: OrderBy<WeaponOrder>,
}

impl WeaponQuery {
    pub fn matches(&self, weapon: &Weapon) -> bool {
        if let Some(ref wanted) = self.weapon_type {
            if weapon.weapon_type != wanted.trim() {
                return false;
            }
        }
        if let Some(ref wanted) = self.element {
            match weapon.element {
                Some(ref element) if element.eq_ignore_ascii_case(wanted.trim()) => {}
                _ => return false,
            }
        }
        self.rarity.matches(weapon.rarity())
            && self.min_attack.map_or(true, |min| weapon.attack_raw() >= min)
    }

    pub fn run<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Weapon> {
        let mut out: Vec<&Weapon> = catalog.weapons().iter().filter(|w| self.matches(w)).collect();
        out.sort_by(|a, b| {
            let ordering = match self.order_by.field {
                WeaponOrder::Id => a.id.cmp(&b.id),
                WeaponOrder::Name => a.name.cmp(&b.name),
                WeaponOrder::WeaponType => a.weapon_type.cmp(&b.weapon_type),
                WeaponOrder::Rarity => a.rarity().cmp(&b.rarity()),
                WeaponOrder::AttackRaw => a.attack_raw().cmp(&b.attack_raw()),
                WeaponOrder::Affinity => a.affinity().cmp(&b.affinity()),
                WeaponOrder::Element => a.element.cmp(&b.element),
            };
            self.order_by.apply(ordering).then(a.id.cmp(&b.id))
        });
        out
    }
}

#[derive(Debug, Clone, Default)]
pub struct ArmorQuery {
    pub armor_type: Option<ArmorType>,
    pub rarity: RarityRange,
    pub min_defense: Option<i64>,
    /// Substring of the name of a skill the piece grants
    pub has_skill: Option<String>,
    pub order_by: OrderBy<ArmorOrder>,
}

impl ArmorQuery {
    pub fn matches(&self, catalog: &Catalog, armor: &Armor) -> bool {
        if self.armor_type.is_some_and(|t| t != armor.armor_type) {
            return false;
        }
        if !self.rarity.matches(armor.rarity()) {
            return false;
        }
        if self.min_defense.is_some_and(|min| armor.defense_base() < min) {
            return false;
        }
        match self.has_skill {
            Some(ref needle) => catalog
                .armor_skills(&[armor.id])
                .iter()
                .any(|link| contains_ignore_case(&link.skill.name, needle)),
            None => true,
        }
    }

    pub fn run<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Armor> {
        let mut out: Vec<&Armor> = catalog
            .armors()
            .iter()
            .filter(|a| self.matches(catalog, a))
            .collect();
        out.sort_by(|a, b| {
            let ordering = match self.order_by.field {
                ArmorOrder::Id => a.id.cmp(&b.id),
                ArmorOrder::Name => a.name.cmp(&b.name),
                ArmorOrder::ArmorType => a.armor_type.as_str().cmp(b.armor_type.as_str()),
                ArmorOrder::Rarity => a.rarity().cmp(&b.rarity()),
                ArmorOrder::DefenseBase => a.defense_base().cmp(&b.defense_base()),
                ArmorOrder::DefenseMax => a.defense_max().cmp(&b.defense_max()),
                ArmorOrder::DefenseAugmented => a.defense_augmented().cmp(&b.defense_augmented()),
                ArmorOrder::Slot1 => a.slot_rank(1).cmp(&b.slot_rank(1)),
                ArmorOrder::Slot2 => a.slot_rank(2).cmp(&b.slot_rank(2)),
                ArmorOrder::Slot3 => a.slot_rank(3).cmp(&b.slot_rank(3)),
            };
            self.order_by.apply(ordering).then(a.id.cmp(&b.id))
        });
        out
    }
}

#[derive(Debug, Clone, Default)]
pub struct SkillQuery {
    pub name: Option<String>,
    /// Minimum max level
    pub min_level: Option<i64>,
    pub order_by: OrderBy<SkillOrder>,
}

impl SkillQuery {
    pub fn matches(&self, skill: &Skill) -> bool {
        self.name.as_deref().map_or(true, |n| contains_ignore_case(&skill.name, n))
            && self.min_level.map_or(true, |min| skill.level_cap() >= min)
    }

    pub fn run<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Skill> {
        let mut out: Vec<&Skill> = catalog.skills().iter().filter(|s| self.matches(s)).collect();
        out.sort_by(|a, b| {
            let ordering = match self.order_by.field {
                SkillOrder::Id => a.id.cmp(&b.id),
                SkillOrder::Name => a.name.cmp(&b.name),
                SkillOrder::MaxLevel => a.level_cap().cmp(&b.level_cap()),
            };
            self.order_by.apply(ordering).then(a.id.cmp(&b.id))
        });
        out
    }
}

/// Name and rarity filter shared by charms and decorations
#[derive(Debug, Clone, Default)]
pub struct ItemQuery {
    pub name: Option<String>,
    pub rarity: RarityRange,
    pub order_by: OrderBy<ItemOrder>,
}

impl ItemQuery {
    fn matches(&self, name: &str, rarity: i64) -> bool {
        self.name.as_deref().map_or(true, |n| contains_ignore_case(name, n))
            && self.rarity.matches(rarity)
    }

    /// Compare `(id, name, rarity)` keys, ties broken by id ascending
    fn compare(&self, a: (i64, &str, i64), b: (i64, &str, i64)) -> Ordering {
        let ordering = match self.order_by.field {
            ItemOrder::Id => a.0.cmp(&b.0),
            ItemOrder::Name => a.1.cmp(b.1),
            ItemOrder::Rarity => a.2.cmp(&b.2),
        };
        self.order_by.apply(ordering).then(a.0.cmp(&b.0))
    }

    pub fn charms<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Charm> {
        let mut out: Vec<&Charm> = catalog
            .charms()
            .iter()
            .filter(|c| self.matches(&c.name, c.rarity()))
            .collect();
        out.sort_by(|a, b| {
            self.compare((a.id.0, &a.name, a.rarity()), (b.id.0, &b.name, b.rarity()))
        });
        out
    }

    pub fn decorations<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Decoration> {
        let mut out: Vec<&Decoration> = catalog
            .decorations()
            .iter()
            .filter(|d| self.matches(&d.name, d.rarity()))
            .collect();
        out.sort_by(|a, b| {
            self.compare((a.id.0, &a.name, a.rarity()), (b.id.0, &b.name, b.rarity()))
        });
        out
    }
}

/// Weakness kind matched by the monster element filter
const ELEMENT_WEAKNESS: &str = "element";

/// Star range accepted by the monster `min_stars` filter
const STAR_RANGE: std::ops::RangeInclusive<i64> = 1..=3;

#[derive(Debug, Clone, Default)]
pub struct MonsterQuery {
    pub is_elder_dragon: Option<bool>,
    /// Element weakness, case-insensitive
    pub element: Option<String>,
    /// Minimum stars of the element weakness; ignored without `element` or outside 1..=3
    pub min_stars: Option<i64>,
    pub order_by: OrderBy<MonsterOrder>,
}

impl MonsterQuery {
    pub fn matches(&self, monster: &Monster) -> bool {
        if self.is_elder_dragon.is_some_and(|e| e != monster.is_elder_dragon) {
            return false;
        }
        let Some(element) = self.element.as_deref().map(str::trim).filter(|e| !e.is_empty()) else {
            return true;
        };
        let min_stars = self.min_stars.filter(|s| STAR_RANGE.contains(s));
        monster.weaknesses.iter().any(|w| {
            w.kind == ELEMENT_WEAKNESS
                && w.name.eq_ignore_ascii_case(element)
                && min_stars.map_or(true, |min| coerce_int(w.stars.as_ref(), 0) >= min)
        })
    }

    pub fn run<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Monster> {
        let mut out: Vec<&Monster> = catalog.monsters().iter().filter(|m| self.matches(m)).collect();
        out.sort_by(|a, b| {
            let ordering = match self.order_by.field {
                MonsterOrder::Id => a.id.cmp(&b.id),
                MonsterOrder::Name => a.name.cmp(&b.name),
                MonsterOrder::MonsterType => a.monster_type.cmp(&b.monster_type),
                MonsterOrder::IsElderDragon => a.is_elder_dragon.cmp(&b.is_elder_dragon),
            };
            self.order_by.apply(ordering).then(a.id.cmp(&b.id))
        });
        out
    }
}

#[derive(Debug, Clone, Default)]
pub struct BuildQuery {
    /// Substring of the build name
    pub name: Option<String>,
    /// Exact weapon type of the build's weapon
    pub weapon_type: Option<String>,
    pub order_by: OrderBy<BuildOrder>,
}

impl BuildQuery {
    pub fn matches(&self, catalog: &Catalog, build: &BuildRecord) -> bool {
        if let Some(ref needle) = self.name {
            if !contains_ignore_case(&build.name, needle) {
                return false;
            }
        }
        match self.weapon_type {
            Some(ref wanted) => build
                .weapon_id
                .and_then(|id| catalog.weapon(id))
                .is_some_and(|w| w.weapon_type == wanted.trim()),
            None => true,
        }
    }

    pub fn run<'a>(&self, catalog: &'a Catalog) -> Vec<&'a BuildRecord> {
        let mut out: Vec<&BuildRecord> = catalog
            .builds()
            .iter()
            .filter(|b| self.matches(catalog, b))
            .collect();
        out.sort_by(|a, b| {
            let ordering = match self.order_by.field {
                BuildOrder::Id => a.id.cmp(&b.id),
                BuildOrder::Name => a.name.cmp(&b.name),
            };
            self.order_by.apply(ordering).then(a.id.cmp(&b.id))
        });
        out
    }
}
