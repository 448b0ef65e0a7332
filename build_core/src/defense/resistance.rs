//! Resistance - Elemental resistance totals
//!
//! Every total is reported, including zeros. Negative totals are kept as-is.

use crate::catalog::Armor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Elements a piece of armor can resist
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Fire,
    Water,
    Thunder,
    Ice,
    Dragon,
}

impl Element {
    pub fn all() -> &'static [Element] {
        &[
            Element::Fire,
            Element::Water,
            Element::Thunder,
            Element::Ice,
            Element::Dragon,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Fire => "fire",
            Element::Water => "water",
            Element::Thunder => "thunder",
            Element::Ice => "ice",
            Element::Dragon => "dragon",
        }
    }

    /// Resistance of one armor piece against this element
    pub fn resistance_of(&self, armor: &Armor) -> i64 {
        match self {
            Element::Fire => armor.res_fire(),
            Element::Water => armor.res_water(),
            Element::Thunder => armor.res_thunder(),
            Element::Ice => armor.res_ice(),
            Element::Dragon => armor.res_dragon(),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Element {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Element::all()
            .iter()
            .copied()
            .find(|e| e.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown element: {s}"))
    }
}

/// Resistance totals, always carrying all five elements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resistances {
    pub fire: i64,
    pub water: i64,
    pub thunder: i64,
    pub ice: i64,
    pub dragon: i64,
}

impl Resistances {
    pub fn get(&self, element: Element) -> i64 {
        match element {
            Element::Fire => self.fire,
            Element::Water => self.water,
            Element::Thunder => self.thunder,
            Element::Ice => self.ice,
            Element::Dragon => self.dragon,
        }
    }

    fn add(&mut self, armor: &Armor) {
        self.fire = self.fire.saturating_add(armor.res_fire());
        self.water = self.water.saturating_add(armor.res_water());
        self.thunder = self.thunder.saturating_add(armor.res_thunder());
        self.ice = self.ice.saturating_add(armor.res_ice());
        self.dragon = self.dragon.saturating_add(armor.res_dragon());
    }
}

/// Sum each resistance independently over the given pieces
pub fn total_resistances<'a>(armors: impl IntoIterator<Item = &'a Armor>) -> Resistances {
    let mut totals = Resistances::default();
    for armor in armors {
        totals.add(armor);
    }
    totals
}
