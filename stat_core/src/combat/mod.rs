//! Turn-based combat between the player and one enemy

mod action;
mod resolution;
mod result;

pub use action::{CombatAction, CombatInput};
pub use resolution::{run_encounter, run_encounter_with_rng, Encounter};
pub use result::{CombatEvent, CombatOutcome, CombatReport, CombatState};
