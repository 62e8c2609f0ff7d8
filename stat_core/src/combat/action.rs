use crate::character::Character;
use crate::combat::CombatEvent;
use crate::enemy::Enemy;
use item_core::Item;
use serde::{Deserialize, Serialize};

/// What the player does on their turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatAction {
    Attack,
    MagicAttack,
    UseItem,
    Flee,
}

impl CombatAction {
    pub fn all() -> &'static [CombatAction] {
        &[
            CombatAction::Attack,
            CombatAction::MagicAttack,
            CombatAction::UseItem,
            CombatAction::Flee,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            CombatAction::Attack => "Attack",
            CombatAction::MagicAttack => "Magic Attack",
            CombatAction::UseItem => "Use Item",
            CombatAction::Flee => "Flee",
        }
    }
}

/// Source of player decisions during an encounter
///
/// Implementations handle their own re-prompting for malformed input; the
/// resolver only sees valid actions. Any event the resolver emits is passed
/// to `notify` as it happens.
pub trait CombatInput {
    /// Pick the next action
    fn choose_action(&mut self, player: &Character, enemy: &Enemy) -> CombatAction;

    /// Pick one of `options` by index, or `None` to cancel
    ///
    /// An out-of-range index is treated as an invalid choice and costs no
    /// turn.
    fn choose_consumable(&mut self, options: &[&Item]) -> Option<usize>;

    fn notify(&mut self, _event: &CombatEvent) {}
}
