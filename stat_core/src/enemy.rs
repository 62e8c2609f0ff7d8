//! Enemies and the level-scaling factory that creates them

use crate::character::mitigate;
use crate::config::constants;
use content_core::{EnemyTable, EnemyTemplate};
use item_core::Item;
use rand::Rng;

/// A live enemy for one encounter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    /// Template key this enemy was built from
    pub key: String,
    pub name: String,
    pub max_health: u32,
    pub current_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub experience_reward: u32,
    pub gold_reward: u32,
    /// Own copy of the template's loot table
    pub loot: Vec<Item>,
}

impl Enemy {
    /// Apply a raw hit, returning the damage actually taken
    pub fn take_damage(&mut self, raw: i64) -> u32 {
        let actual = mitigate(raw, self.defense);
        self.current_health = self.current_health.saturating_sub(actual);
        actual
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Roll a raw attack in `[attack - spread, attack + spread]`
    pub fn roll_attack<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        let spread = constants().combat.roll_spread as i64;
        let attack = self.attack as i64;
        rng.gen_range(attack - spread..=attack + spread)
    }
}

/// Stat multiplier for a player level: `1 + (level - 1) * per_level`
pub fn scaling_multiplier(player_level: u32) -> f64 {
    1.0 + player_level.saturating_sub(1) as f64 * constants().scaling.per_level
}

/// Builds enemies from templates, scaled to the player's level
#[derive(Debug, Clone, Copy)]
pub struct EnemyFactory<'a> {
    table: &'a EnemyTable,
}

impl<'a> EnemyFactory<'a> {
    pub fn new(table: &'a EnemyTable) -> Self {
        EnemyFactory { table }
    }

    /// Create an enemy of `key`, falling back to the goblin for unknown keys
    pub fn create_enemy(&self, key: &str, player_level: u32) -> Enemy {
        scale_template(self.table.get(key), player_level)
    }
}

/// Scale each stat independently, truncating toward zero
pub fn scale_template(template: &EnemyTemplate, player_level: u32) -> Enemy {
    let multiplier = scaling_multiplier(player_level);
    let scale = |value: u32| (value as f64 * multiplier) as u32;
    let health = scale(template.health);

    tracing::debug!(
        key = %template.id,
        player_level,
        multiplier,
        health,
        "enemy created"
    );

    Enemy {
        key: template.id.clone(),
        name: template.name.clone(),
        max_health: health,
        current_health: health,
        attack: scale(template.attack),
        defense: scale(template.defense),
        experience_reward: scale(template.experience),
        gold_reward: scale(template.gold),
        loot: template.loot.clone(),
    }
}
