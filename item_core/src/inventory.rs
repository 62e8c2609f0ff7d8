//! Ordered item storage with duplicates allowed

use crate::item::Item;
use serde::{Deserialize, Serialize};

/// A character's bag of items
///
/// Order is insertion order. Filtered listings return the inventory
/// position alongside each item so a caller can `take` the exact entry it
/// displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item at the end
    pub fn push(&mut self, item: Item) {
        tracing::debug!(item = %item.name, "inventory add");
        self.items.push(item);
    }

    /// Remove the first item whose name matches, ignoring case
    pub fn remove_by_name(&mut self, name: &str) -> Option<Item> {
        let position = self.items.iter().position(|item| item.name_matches(name))?;
        Some(self.items.remove(position))
    }

    /// Remove the item at `index`, if any
    pub fn take(&mut self, index: usize) -> Option<Item> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Weapons with their inventory positions
    pub fn weapons(&self) -> Vec<(usize, &Item)> {
        self.filtered(|item| item.kind.is_weapon())
    }

    /// Armor with their inventory positions
    pub fn armor(&self) -> Vec<(usize, &Item)> {
        self.filtered(|item| item.kind.is_armor())
    }

    /// Consumables with their inventory positions
    pub fn consumables(&self) -> Vec<(usize, &Item)> {
        self.filtered(|item| item.kind.is_consumable())
    }

    fn filtered(&self, keep: impl Fn(&Item) -> bool) -> Vec<(usize, &Item)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| keep(item))
            .collect()
    }
}

impl From<Vec<Item>> for Inventory {
    fn from(items: Vec<Item>) -> Self {
        Inventory { items }
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
