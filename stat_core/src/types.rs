//! Core types shared by characters and combat

use serde::{Deserialize, Serialize};
use std::fmt;

/// Character class, fixing base stats at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
    /// Anything that is not one of the named classes
    Balanced,
}

/// Starting attributes for a class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseStats {
    pub health: u32,
    pub strength: u32,
    pub magic: u32,
    pub defense: u32,
    pub agility: u32,
}

impl CharacterClass {
    /// Parse a class name, ignoring case; unknown names are `Balanced`
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "warrior" => CharacterClass::Warrior,
            "mage" => CharacterClass::Mage,
            "rogue" => CharacterClass::Rogue,
            _ => CharacterClass::Balanced,
        }
    }

    pub fn base_stats(&self) -> BaseStats {
        match self {
            CharacterClass::Warrior => BaseStats {
                health: 120,
                strength: 15,
                magic: 5,
                defense: 12,
                agility: 8,
            },
            CharacterClass::Mage => BaseStats {
                health: 80,
                strength: 6,
                magic: 18,
                defense: 6,
                agility: 12,
            },
            CharacterClass::Rogue => BaseStats {
                health: 100,
                strength: 12,
                magic: 8,
                defense: 8,
                agility: 16,
            },
            CharacterClass::Balanced => BaseStats {
                health: 100,
                strength: 10,
                magic: 10,
                defense: 10,
                agility: 10,
            },
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterClass::Warrior => write!(f, "Warrior"),
            CharacterClass::Mage => write!(f, "Mage"),
            CharacterClass::Rogue => write!(f, "Rogue"),
            CharacterClass::Balanced => write!(f, "Adventurer"),
        }
    }
}

/// Equipment slot for gear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipmentSlot::Weapon => write!(f, "Weapon"),
            EquipmentSlot::Armor => write!(f, "Armor"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!(CharacterClass::parse("Warrior"), CharacterClass::Warrior);
        assert_eq!(CharacterClass::parse("MAGE"), CharacterClass::Mage);
        assert_eq!(CharacterClass::parse(" rogue "), CharacterClass::Rogue);
        assert_eq!(CharacterClass::parse("bard"), CharacterClass::Balanced);
        assert_eq!(CharacterClass::parse(""), CharacterClass::Balanced);
    }

    #[test]
    fn test_base_stat_table() {
        let warrior = CharacterClass::Warrior.base_stats();
        assert_eq!((warrior.health, warrior.strength, warrior.defense), (120, 15, 12));

        let mage = CharacterClass::Mage.base_stats();
        assert_eq!((mage.health, mage.magic, mage.agility), (80, 18, 12));

        let rogue = CharacterClass::Rogue.base_stats();
        assert_eq!((rogue.health, rogue.agility), (100, 16));

        let balanced = CharacterClass::Balanced.base_stats();
        assert_eq!(
            (balanced.strength, balanced.magic, balanced.defense, balanced.agility),
            (10, 10, 10, 10)
        );
    }
}
