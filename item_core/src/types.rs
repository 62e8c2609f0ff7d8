use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind-specific payload of an item
///
/// Serialized inline with the owning item under a `type` tag, so a weapon
/// reads as `{ "type": "weapon", "damage": 3 }`. A variant missing its
/// payload field is rejected during deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    Weapon { damage: u32 },
    Armor { defense: u32 },
    Consumable { heal: u32 },
    Accessory,
    KeyItem,
    Achievement,
}

impl ItemKind {
    /// Damage added to attack power when equipped as a weapon
    pub fn damage_bonus(&self) -> u32 {
        match self {
            ItemKind::Weapon { damage } => *damage,
            _ => 0,
        }
    }

    /// Defense added to defense power when equipped as armor
    pub fn defense_bonus(&self) -> u32 {
        match self {
            ItemKind::Armor { defense } => *defense,
            _ => 0,
        }
    }

    /// Health restored when consumed, if this is a consumable
    pub fn heal_amount(&self) -> Option<u32> {
        match self {
            ItemKind::Consumable { heal } => Some(*heal),
            _ => None,
        }
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self, ItemKind::Weapon { .. })
    }

    pub fn is_armor(&self) -> bool {
        matches!(self, ItemKind::Armor { .. })
    }

    pub fn is_consumable(&self) -> bool {
        matches!(self, ItemKind::Consumable { .. })
    }

    /// Snake-case label matching the serialized tag
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Weapon { .. } => "weapon",
            ItemKind::Armor { .. } => "armor",
            ItemKind::Consumable { .. } => "consumable",
            ItemKind::Accessory => "accessory",
            ItemKind::KeyItem => "key_item",
            ItemKind::Achievement => "achievement",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Weapon { .. } => write!(f, "Weapon"),
            ItemKind::Armor { .. } => write!(f, "Armor"),
            ItemKind::Consumable { .. } => write!(f, "Consumable"),
            ItemKind::Accessory => write!(f, "Accessory"),
            ItemKind::KeyItem => write!(f, "Key Item"),
            ItemKind::Achievement => write!(f, "Achievement"),
        }
    }
}
