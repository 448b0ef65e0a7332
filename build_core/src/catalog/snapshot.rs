//! BuildSnapshot - A build with every equipment reference resolved

use crate::catalog::{Armor, Charm, Decoration, Weapon};
use crate::types::{ArmorType, BuildId, DecorationId, SocketSlot};

/// Armor slot of a build; `armor` is `None` for an empty slot
#[derive(Debug, Clone, PartialEq)]
pub struct EquippedArmor {
    pub slot: ArmorType,
    pub armor: Option<Armor>,
}

/// Decoration socket of a build; `decoration` is `None` for an empty socket
#[derive(Debug, Clone, PartialEq)]
pub struct SocketedDecoration {
    pub slot: SocketSlot,
    pub socket_index: u8,
    pub decoration: Option<Decoration>,
}

/// A fully materialized build, as read by the stats engine
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSnapshot {
    pub id: BuildId,
    pub weapon: Option<Weapon>,
    pub charm: Option<Charm>,
    pub armor_pieces: Vec<EquippedArmor>,
    pub decorations: Vec<SocketedDecoration>,
}

impl BuildSnapshot {
    /// Create an empty build
    pub fn new(id: BuildId) -> Self {
        BuildSnapshot {
            id,
            weapon: None,
            charm: None,
            armor_pieces: Vec::new(),
            decorations: Vec::new(),
        }
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_charm(mut self, charm: Charm) -> Self {
        self.charm = Some(charm);
        self
    }

    /// Equip an armor piece in its own slot, replacing what was there
    pub fn with_armor(mut self, armor: Armor) -> Self {
        let slot = armor.armor_type;
        self.armor_pieces.retain(|p| p.slot != slot);
        self.armor_pieces.push(EquippedArmor {
            slot,
            armor: Some(armor),
        });
        self
    }

    pub fn with_decoration(mut self, slot: SocketSlot, socket_index: u8, decoration: Decoration) -> Self {
        self.decorations.push(SocketedDecoration {
            slot,
            socket_index,
            decoration: Some(decoration),
        });
        self
    }

    /// Armor pieces actually assigned to a slot
    pub fn equipped_armor(&self) -> impl Iterator<Item = &Armor> {
        self.armor_pieces.iter().filter_map(|p| p.armor.as_ref())
    }

    /// Ids of the distinct decorations socketed in this build, in first-seen order
    pub fn distinct_decoration_ids(&self) -> Vec<DecorationId> {
        let mut ids = Vec::new();
        for socket in &self.decorations {
            if let Some(ref decoration) = socket.decoration {
                if !ids.contains(&decoration.id) {
                    ids.push(decoration.id);
                }
            }
        }
        ids
    }
}
