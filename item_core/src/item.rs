use crate::types::ItemKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An item as carried, equipped or awarded
///
/// Items have no identity of their own; two items with the same fields are
/// interchangeable and removal from an inventory matches by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Display name
    pub name: String,
    /// Flavor text shown in listings
    pub description: String,
    /// Kind and kind-specific payload
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl Item {
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: ItemKind) -> Self {
        Item {
            name: name.into(),
            description: description.into(),
            kind,
        }
    }

    pub fn weapon(name: impl Into<String>, description: impl Into<String>, damage: u32) -> Self {
        Self::new(name, description, ItemKind::Weapon { damage })
    }

    pub fn armor(name: impl Into<String>, description: impl Into<String>, defense: u32) -> Self {
        Self::new(name, description, ItemKind::Armor { defense })
    }

    pub fn consumable(name: impl Into<String>, description: impl Into<String>, heal: u32) -> Self {
        Self::new(name, description, ItemKind::Consumable { heal })
    }

    pub fn accessory(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, ItemKind::Accessory)
    }

    pub fn key_item(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, ItemKind::KeyItem)
    }

    pub fn achievement(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, ItemKind::Achievement)
    }

    /// Case-insensitive name comparison used for removal
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// One-line summary with the kind bonus, e.g. `Iron Sword (+8 damage)`
    pub fn summary(&self) -> String {
        match self.kind {
            ItemKind::Weapon { damage } => format!("{} (+{} damage)", self.name, damage),
            ItemKind::Armor { defense } => format!("{} (+{} defense)", self.name, defense),
            ItemKind::Consumable { heal } => format!("{} (restores {} HP)", self.name, heal),
            _ => self.name.clone(),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.summary(), self.description)
    }
}
