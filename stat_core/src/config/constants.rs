//! Game constants configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

use super::ConfigError;

/// Global game constants instance
static GAME_CONSTANTS: OnceLock<GameConstants> = OnceLock::new();

/// Initialize the global game constants from a TOML file
///
/// Call once at startup, before any character is created.
/// Returns error if already initialized or if loading fails.
pub fn init_constants(path: &Path) -> Result<(), ConfigError> {
    let constants = GameConstants::load_from_path(path)?;
    constants.validate().map_err(|error| error.at(path))?;
    GAME_CONSTANTS
        .set(constants)
        .map_err(|_| ConfigError::validation("GameConstants already initialized"))
}

/// Initialize the global game constants with default values
pub fn init_constants_default() -> Result<(), ConfigError> {
    GAME_CONSTANTS
        .set(GameConstants::default())
        .map_err(|_| ConfigError::validation("GameConstants already initialized"))
}

/// Get a reference to the global game constants
///
/// Falls back to the defaults if nothing was initialized.
pub fn constants() -> &'static GameConstants {
    GAME_CONSTANTS.get_or_init(GameConstants::default)
}

/// Tunable game constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub progression: ProgressionConstants,
    #[serde(default)]
    pub combat: CombatConstants,
    #[serde(default)]
    pub scaling: ScalingConstants,
}

impl GameConstants {
    /// Load constants from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        super::load_toml(path)
    }

    /// Parse constants from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        super::parse_toml(content)
    }

    /// Reject values that would break progression or combat invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.progression.base_experience_to_next == 0 {
            return Err(ConfigError::validation(
                "progression.base_experience_to_next must be positive",
            ));
        }
        if self.progression.experience_growth < 1.0 {
            return Err(ConfigError::validation(format!(
                "progression.experience_growth must be >= 1.0, got {}",
                self.progression.experience_growth
            )));
        }
        if !(0.0..=1.0).contains(&self.combat.loot_chance) {
            return Err(ConfigError::validation(format!(
                "combat.loot_chance must be within [0, 1], got {}",
                self.combat.loot_chance
            )));
        }
        if self.scaling.per_level < 0.0 {
            return Err(ConfigError::validation(format!(
                "scaling.per_level must not be negative, got {}",
                self.scaling.per_level
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionConstants {
    /// Experience needed to leave level 1
    #[serde(default = "default_base_experience")]
    pub base_experience_to_next: u32,
    /// Threshold multiplier applied on each level-up (result truncated)
    #[serde(default = "default_experience_growth")]
    pub experience_growth: f64,
    #[serde(default = "default_health_per_level")]
    pub health_per_level: u32,
    #[serde(default = "default_two")]
    pub strength_per_level: u32,
    #[serde(default = "default_two")]
    pub magic_per_level: u32,
    #[serde(default = "default_one")]
    pub defense_per_level: u32,
    #[serde(default = "default_one")]
    pub agility_per_level: u32,
    #[serde(default = "default_starting_gold")]
    pub starting_gold: u32,
}

impl Default for ProgressionConstants {
    fn default() -> Self {
        ProgressionConstants {
            base_experience_to_next: 100,
            experience_growth: 1.5,
            health_per_level: 20,
            strength_per_level: 2,
            magic_per_level: 2,
            defense_per_level: 1,
            agility_per_level: 1,
            starting_gold: 50,
        }
    }
}

fn default_base_experience() -> u32 {
    100
}
fn default_experience_growth() -> f64 {
    1.5
}
fn default_health_per_level() -> u32 {
    20
}
fn default_two() -> u32 {
    2
}
fn default_one() -> u32 {
    1
}
fn default_starting_gold() -> u32 {
    50
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Physical rolls land within power +/- spread
    #[serde(default = "default_roll_spread")]
    pub roll_spread: u32,
    /// Magic rolls land within [magic, magic + width]
    #[serde(default = "default_magic_roll_width")]
    pub magic_roll_width: u32,
    /// Magic needed to cast at all
    #[serde(default = "default_min_magic")]
    pub min_magic: u32,
    /// Every hit deals at least this much
    #[serde(default = "default_min_damage")]
    pub min_damage: u32,
    /// Chance of a loot drop on victory
    #[serde(default = "default_loot_chance")]
    pub loot_chance: f64,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            roll_spread: 2,
            magic_roll_width: 5,
            min_magic: 5,
            min_damage: 1,
            loot_chance: 0.3,
        }
    }
}

fn default_roll_spread() -> u32 {
    2
}
fn default_magic_roll_width() -> u32 {
    5
}
fn default_min_magic() -> u32 {
    5
}
fn default_min_damage() -> u32 {
    1
}
fn default_loot_chance() -> f64 {
    0.3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalingConstants {
    /// Enemy stat multiplier gained per player level above 1
    #[serde(default = "default_per_level")]
    pub per_level: f64,
}

impl Default for ScalingConstants {
    fn default() -> Self {
        ScalingConstants { per_level: 0.3 }
    }
}

fn default_per_level() -> f64 {
    0.3
}
