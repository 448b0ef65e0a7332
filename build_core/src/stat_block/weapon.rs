//! Weapon stats - Attack, affinity and element from the equipped weapon

use crate::catalog::Weapon;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackStats {
    pub raw: i64,
    pub display: i64,
}

/// Weapon element; `type` is null and `value` is 0 when there is none
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementStats {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub value: i64,
}

/// Everything the weapon contributes to a stats report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeaponStats {
    pub attack: AttackStats,
    pub affinity: i64,
    pub element: ElementStats,
}

impl WeaponStats {
    /// Stats of an optional weapon; no weapon yields all zeros
    pub fn from_weapon(weapon: Option<&Weapon>) -> Self {
        let Some(weapon) = weapon else {
            return WeaponStats::default();
        };

        let element = match weapon.element_type() {
            Some(kind) => ElementStats {
                kind: Some(kind.to_string()),
                value: weapon.element_damage(),
            },
            None => ElementStats::default(),
        };

        WeaponStats {
            attack: AttackStats {
                raw: weapon.attack_raw(),
                display: weapon.attack_display(),
            },
            affinity: weapon.affinity(),
            element,
        }
    }
}
