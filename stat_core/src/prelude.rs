//! Prelude module for convenient imports
//!
//! ```rust
//! use stat_core::prelude::*;
//! ```

// Core types
pub use crate::character::{Character, StatSheet};
pub use crate::types::{CharacterClass, EquipmentSlot};

// Enemies
pub use crate::enemy::{Enemy, EnemyFactory};

// Combat
pub use crate::combat::{
    run_encounter, run_encounter_with_rng, CombatAction, CombatEvent, CombatInput, CombatOutcome,
    CombatReport,
};

// Config
pub use crate::config::{init_constants, init_constants_default};

// Re-exports from item_core
pub use item_core::{Inventory, Item, ItemKind};
