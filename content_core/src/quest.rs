use item_core::Item;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a quest, stable across saves
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestId(pub String);

impl QuestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QuestId {
    fn from(s: &str) -> Self {
        QuestId(s.to_string())
    }
}

impl From<String> for QuestId {
    fn from(s: String) -> Self {
        QuestId(s)
    }
}

impl fmt::Display for QuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Offer tier of a quest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestCategory {
    Starter,
    Intermediate,
    Advanced,
    Story,
    /// Generated on demand from a daily template
    Daily,
}

/// Which player actions advance a quest
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestKind {
    /// Defeat enemies of one type
    Kill { target: String },
    /// Defeat enemies of any type
    KillAny,
    /// Gain gold; each gain counts by amount, not running total
    CollectGold,
    EquipWeapon,
    /// Progress mirrors the character's level
    ReachLevel,
    /// Narrative quest keyed by a story beat
    Story { target: String },
}

impl QuestKind {
    /// Flat tag such as `kill_goblin` or `collect_gold`
    pub fn type_tag(&self) -> String {
        match self {
            QuestKind::Kill { target } => format!("kill_{}", target),
            QuestKind::KillAny => "kill_any".to_string(),
            QuestKind::CollectGold => "collect_gold".to_string(),
            QuestKind::EquipWeapon => "equip_weapon".to_string(),
            QuestKind::ReachLevel => "reach_level".to_string(),
            QuestKind::Story { .. } => "story".to_string(),
        }
    }

    pub fn is_story(&self) -> bool {
        matches!(self, QuestKind::Story { .. })
    }
}

/// Static definition of a quest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestTemplate {
    pub id: QuestId,
    pub category: QuestCategory,
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub kind: QuestKind,
    #[serde(default = "default_target_amount")]
    pub target_amount: u32,
    #[serde(default)]
    pub reward_experience: u32,
    #[serde(default)]
    pub reward_gold: u32,
    #[serde(default)]
    pub reward_items: Vec<Item>,
}

fn default_target_amount() -> u32 {
    1
}

/// Repeatable quest archetype with three difficulty tiers
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DailyQuestTemplate {
    pub name: String,
    /// `{amount}` is replaced by the tier's target amount
    pub description: String,
    #[serde(flatten)]
    pub kind: QuestKind,
    pub amounts: Vec<u32>,
    pub experience: Vec<u32>,
    pub gold: Vec<u32>,
}

impl DailyQuestTemplate {
    /// Tier index for a player level: `min(level / 3, tiers - 1)`
    pub fn tier_for_level(&self, level: u32) -> usize {
        let tiers = self
            .amounts
            .len()
            .min(self.experience.len())
            .min(self.gold.len());
        (level as usize / 3).min(tiers.saturating_sub(1))
    }

    /// Concrete quest template for the given id and player level
    pub fn instantiate(&self, id: QuestId, level: u32) -> QuestTemplate {
        let tier = self.tier_for_level(level);
        let amount = self.amounts.get(tier).copied().unwrap_or(1);

        QuestTemplate {
            id,
            category: QuestCategory::Daily,
            name: self.name.clone(),
            description: self.description.replace("{amount}", &amount.to_string()),
            kind: self.kind.clone(),
            target_amount: amount.max(1),
            reward_experience: self.experience.get(tier).copied().unwrap_or(0),
            reward_gold: self.gold.get(tier).copied().unwrap_or(0),
            reward_items: Vec::new(),
        }
    }
}
