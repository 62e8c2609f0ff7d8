use item_core::Item;
use serde::Deserialize;
use std::collections::HashMap;

/// Key used when an unknown enemy type is requested
pub const FALLBACK_ENEMY: &str = "goblin";

/// Level-1 definition of an enemy archetype
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnemyTemplate {
    /// Lookup key, e.g. `orc`
    pub id: String,
    /// Display name, e.g. `Orc Warrior`
    pub name: String,
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    /// Experience awarded on defeat
    pub experience: u32,
    /// Gold awarded on defeat
    pub gold: u32,
    #[serde(default)]
    pub loot: Vec<Item>,
}

/// Enemy templates keyed by id, with a guaranteed fallback
#[derive(Debug, Clone)]
pub struct EnemyTable {
    templates: HashMap<String, EnemyTemplate>,
    fallback: EnemyTemplate,
}

impl EnemyTable {
    /// Build a table; `None` if the fallback template is missing
    pub(crate) fn new(templates: HashMap<String, EnemyTemplate>) -> Option<Self> {
        let fallback = templates.get(FALLBACK_ENEMY)?.clone();
        Some(EnemyTable {
            templates,
            fallback,
        })
    }

    /// Template for `key`, or the goblin template when the key is unknown
    pub fn get(&self, key: &str) -> &EnemyTemplate {
        match self.templates.get(key) {
            Some(template) => template,
            None => {
                tracing::debug!(key, "unknown enemy type, using fallback");
                &self.fallback
            }
        }
    }

    /// Whether `key` has its own template
    pub fn contains(&self, key: &str) -> bool {
        self.templates.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
