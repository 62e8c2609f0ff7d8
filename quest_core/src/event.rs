use std::fmt;

/// A player action reported to the quest ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestEvent {
    /// Enemies of type `target` defeated
    Kill { target: String, amount: u32 },
    /// Gold received, counted by amount rather than running total
    GoldGained { amount: u32 },
    WeaponEquipped,
    /// The character's level changed; `reach_level` quests re-read it
    LevelUp,
}

impl QuestEvent {
    /// A single kill of `target`
    pub fn kill(target: impl Into<String>) -> Self {
        QuestEvent::Kill {
            target: target.into(),
            amount: 1,
        }
    }

    pub fn gold(amount: u32) -> Self {
        QuestEvent::GoldGained { amount }
    }
}

impl fmt::Display for QuestEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestEvent::Kill { target, amount } => write!(f, "kill {} x{}", target, amount),
            QuestEvent::GoldGained { amount } => write!(f, "gold +{}", amount),
            QuestEvent::WeaponEquipped => write!(f, "weapon equipped"),
            QuestEvent::LevelUp => write!(f, "level up"),
        }
    }
}
