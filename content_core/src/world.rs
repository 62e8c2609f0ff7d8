//! Exploration table - what happens when the player wanders off

use crate::config::{EncounterConfig, ExplorationConfig};
use rand::seq::SliceRandom;
use rand::Rng;

/// Result of one exploration roll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exploration {
    /// Fight the enemy with this key
    Encounter(String),
    /// Peaceful walk that turned up some gold
    Gold(u32),
}

#[derive(Debug, Clone)]
struct EncounterPool {
    max_level: Option<u32>,
    enemies: Vec<String>,
}

/// Encounter odds, level-banded enemy pools and peaceful gold range
#[derive(Debug, Clone)]
pub struct ExplorationTable {
    encounter_chance: f64,
    gold_min: u32,
    gold_max: u32,
    pools: Vec<EncounterPool>,
}

impl ExplorationTable {
    pub(crate) fn from_config(
        config: ExplorationConfig,
        encounters: Vec<EncounterConfig>,
    ) -> Result<Self, String> {
        if !(0.0..=1.0).contains(&config.encounter_chance) {
            return Err(format!(
                "encounter_chance must be within [0, 1], got {}",
                config.encounter_chance
            ));
        }
        let (gold_min, gold_max) = (config.gold_found.min(), config.gold_found.max());
        if gold_min > gold_max {
            return Err(format!("gold_found range [{}, {}] is inverted", gold_min, gold_max));
        }
        if encounters.is_empty() {
            return Err("no encounter pools defined".to_string());
        }
        if let Some(empty) = encounters.iter().position(|e| e.enemies.is_empty()) {
            return Err(format!("encounter pool {} has no enemies", empty));
        }

        Ok(ExplorationTable {
            encounter_chance: config.encounter_chance,
            gold_min,
            gold_max,
            pools: encounters
                .into_iter()
                .map(|e| EncounterPool {
                    max_level: e.max_level,
                    enemies: e.enemies,
                })
                .collect(),
        })
    }

    pub fn encounter_chance(&self) -> f64 {
        self.encounter_chance
    }

    /// Enemy keys that can appear at `level`
    ///
    /// The first pool whose `max_level` covers the level wins; if none does,
    /// the last pool is used.
    pub fn enemy_pool(&self, level: u32) -> &[String] {
        self.pools
            .iter()
            .find(|pool| pool.max_level.map_or(true, |max| level <= max))
            .or_else(|| self.pools.last())
            .map(|pool| pool.enemies.as_slice())
            .unwrap_or(&[])
    }

    /// All enemy keys referenced by any pool
    pub fn referenced_enemies(&self) -> impl Iterator<Item = &str> {
        self.pools
            .iter()
            .flat_map(|pool| pool.enemies.iter().map(|s| s.as_str()))
    }

    /// Roll one exploration step for a player of `level`
    pub fn roll<R: Rng + ?Sized>(&self, level: u32, rng: &mut R) -> Exploration {
        if rng.gen::<f64>() < self.encounter_chance {
            if let Some(key) = self.enemy_pool(level).choose(rng) {
                return Exploration::Encounter(key.clone());
            }
        }
        Exploration::Gold(rng.gen_range(self.gold_min..=self.gold_max))
    }
}
