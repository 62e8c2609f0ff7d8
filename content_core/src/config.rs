use crate::enemy::EnemyTemplate;
use crate::quest::{DailyQuestTemplate, QuestTemplate};
use serde::Deserialize;

/// TOML layout of a content file
///
/// Every section is optional so content can be split across files; the
/// registry merges them and validates the result as a whole.
#[derive(Debug, Default, Deserialize)]
pub struct ContentFileConfig {
    #[serde(default)]
    pub enemies: Vec<EnemyTemplate>,
    #[serde(default)]
    pub quests: Vec<QuestTemplate>,
    #[serde(default)]
    pub daily_quests: Vec<DailyQuestTemplate>,
    #[serde(default)]
    pub exploration: Option<ExplorationConfig>,
    #[serde(default)]
    pub encounters: Vec<EncounterConfig>,
}

/// Odds and payouts of a single exploration step
#[derive(Debug, Clone, Deserialize)]
pub struct ExplorationConfig {
    pub encounter_chance: f64,
    pub gold_found: GoldConfig,
}

/// Gold can be a single value or a range [min, max]
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum GoldConfig {
    Single(u32),
    Range([u32; 2]),
}

impl GoldConfig {
    pub fn min(&self) -> u32 {
        match self {
            GoldConfig::Single(v) => *v,
            GoldConfig::Range([min, _]) => *min,
        }
    }

    pub fn max(&self) -> u32 {
        match self {
            GoldConfig::Single(v) => *v,
            GoldConfig::Range([_, max]) => *max,
        }
    }
}

/// Enemy pool used up to (and including) `max_level`
#[derive(Debug, Clone, Deserialize)]
pub struct EncounterConfig {
    #[serde(default)]
    pub max_level: Option<u32>,
    pub enemies: Vec<String>,
}
