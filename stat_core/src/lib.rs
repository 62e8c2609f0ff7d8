//! stat_core - Character progression, enemies and combat
//!
//! This library provides:
//! - Character: stats, leveling, equipment, inventory and quest log
//! - EnemyFactory: level-scaled enemies built from content templates
//! - Combat resolution: the round loop between a character and an enemy
//! - GameConstants: every tunable number, optionally loaded from TOML
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use stat_core::prelude::*;
//! use content_core::ContentRegistry;
//!
//! let content = ContentRegistry::builtin()?;
//! let mut player = Character::new("Aria", CharacterClass::Warrior);
//!
//! let mut orc = EnemyFactory::new(content.enemies()).create_enemy("orc", player.level);
//! let report = run_encounter(&mut player, &mut orc, &mut my_input);
//! if report.is_victory() {
//!     println!("Gained {} experience", report.experience_gained);
//! }
//! ```

pub mod character;
pub mod combat;
pub mod config;
pub mod enemy;
pub mod prelude;
pub mod types;

// Core API - what most users need
pub use character::{Character, StatSheet};
pub use combat::{
    run_encounter, run_encounter_with_rng, CombatAction, CombatEvent, CombatInput, CombatOutcome,
    CombatReport, CombatState, Encounter,
};
pub use enemy::{scaling_multiplier, Enemy, EnemyFactory};
pub use types::{BaseStats, CharacterClass, EquipmentSlot};

// Configuration
pub use config::{constants, init_constants, init_constants_default, ConfigError, GameConstants};

// Re-export commonly needed item_core types
pub use item_core::{Inventory, Item, ItemKind};
