use item_core::Item;
use std::fmt;

/// How an encounter ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatOutcome {
    PlayerVictory,
    PlayerDefeat,
    PlayerFled,
}

/// Encounter state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatState {
    Ongoing,
    Over(CombatOutcome),
}

impl CombatState {
    pub fn is_over(&self) -> bool {
        matches!(self, CombatState::Over(_))
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        match self {
            CombatState::Ongoing => None,
            CombatState::Over(outcome) => Some(*outcome),
        }
    }
}

/// Something that happened during an encounter, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatEvent {
    EncounterStarted {
        enemy: String,
        health: u32,
        max_health: u32,
    },
    PlayerAttack {
        damage: u32,
    },
    MagicAttack {
        damage: u32,
    },
    NotEnoughMagic {
        magic: u32,
        required: u32,
    },
    NoConsumables,
    InvalidItemChoice,
    ItemUsed {
        item: String,
        healed: u32,
    },
    FleeSucceeded,
    FleeFailed,
    EnemyAttack {
        enemy: String,
        damage: u32,
    },
    EnemyDefeated {
        enemy: String,
    },
    PlayerDefeated,
    Rewards {
        experience: u32,
        gold: u32,
    },
    LevelUp {
        level: u32,
    },
    LootFound {
        item: Item,
    },
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatEvent::EncounterStarted {
                enemy,
                health,
                max_health,
            } => write!(f, "A wild {} appears! ({}/{} HP)", enemy, health, max_health),
            CombatEvent::PlayerAttack { damage } => write!(f, "You attack for {} damage!", damage),
            CombatEvent::MagicAttack { damage } => {
                write!(f, "Your magic attack deals {} damage!", damage)
            }
            CombatEvent::NotEnoughMagic { magic, required } => write!(
                f,
                "You don't have enough magic power! ({} of {} needed)",
                magic, required
            ),
            CombatEvent::NoConsumables => write!(f, "You have no consumable items!"),
            CombatEvent::InvalidItemChoice => write!(f, "Invalid choice!"),
            CombatEvent::ItemUsed { item, healed } => {
                write!(f, "You used {} and recovered {} HP!", item, healed)
            }
            CombatEvent::FleeSucceeded => write!(f, "You successfully fled from battle!"),
            CombatEvent::FleeFailed => write!(f, "You couldn't escape!"),
            CombatEvent::EnemyAttack { enemy, damage } => {
                write!(f, "{} attacks you for {} damage!", enemy, damage)
            }
            CombatEvent::EnemyDefeated { enemy } => write!(f, "You defeated the {}!", enemy),
            CombatEvent::PlayerDefeated => write!(f, "You have been defeated!"),
            CombatEvent::Rewards { experience, gold } => {
                write!(f, "Gained {} gold and {} experience!", gold, experience)
            }
            CombatEvent::LevelUp { level } => write!(f, "You reached level {}!", level),
            CombatEvent::LootFound { item } => write!(f, "You found: {}!", item.name),
        }
    }
}

/// Summary of a finished encounter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatReport {
    pub outcome: CombatOutcome,
    /// Rounds in which the player's action was resolved
    pub rounds: u32,
    pub experience_gained: u32,
    pub gold_gained: u32,
    pub levels_gained: u32,
    pub loot: Option<Item>,
    pub events: Vec<CombatEvent>,
}

impl CombatReport {
    pub fn is_victory(&self) -> bool {
        self.outcome == CombatOutcome::PlayerVictory
    }
}
