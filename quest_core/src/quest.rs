use content_core::{QuestCategory, QuestId, QuestKind, QuestTemplate};
use item_core::Item;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A quest instance with its progress
///
/// `current_progress` only grows until the quest completes, and
/// `completed` never flips back to false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: QuestId,
    pub category: QuestCategory,
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub kind: QuestKind,
    pub target_amount: u32,
    #[serde(default)]
    pub current_progress: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub reward_experience: u32,
    #[serde(default)]
    pub reward_gold: u32,
    #[serde(default)]
    pub reward_items: Vec<Item>,
}

impl Quest {
    /// Fresh, unprogressed instance of a template
    pub fn from_template(template: &QuestTemplate) -> Self {
        Quest {
            id: template.id.clone(),
            category: template.category,
            name: template.name.clone(),
            description: template.description.clone(),
            kind: template.kind.clone(),
            target_amount: template.target_amount,
            current_progress: 0,
            completed: false,
            reward_experience: template.reward_experience,
            reward_gold: template.reward_gold,
            reward_items: template.reward_items.clone(),
        }
    }

    /// Add progress; returns true when this call completes the quest
    ///
    /// No-op once completed.
    pub fn update_progress(&mut self, amount: u32) -> bool {
        if self.completed {
            return false;
        }
        self.current_progress = self.current_progress.saturating_add(amount);
        self.check_completion()
    }

    /// Raise progress to an absolute value (level-tracking quests)
    pub fn set_progress(&mut self, value: u32) -> bool {
        if self.completed {
            return false;
        }
        self.current_progress = self.current_progress.max(value);
        self.check_completion()
    }

    fn check_completion(&mut self) -> bool {
        if self.current_progress >= self.target_amount {
            self.completed = true;
            true
        } else {
            false
        }
    }

    /// `75 EXP, 50 Gold, Health Potion`, or `None` when there is no reward
    pub fn reward_text(&self) -> String {
        let mut rewards = Vec::new();
        if self.reward_experience > 0 {
            rewards.push(format!("{} EXP", self.reward_experience));
        }
        if self.reward_gold > 0 {
            rewards.push(format!("{} Gold", self.reward_gold));
        }
        rewards.extend(self.reward_items.iter().map(|item| item.name.clone()));

        if rewards.is_empty() {
            "None".to_string()
        } else {
            rewards.join(", ")
        }
    }

    pub fn progress_text(&self) -> String {
        if self.completed {
            "Complete".to_string()
        } else {
            format!("Progress: {}/{}", self.current_progress, self.target_amount)
        }
    }
}

impl fmt::Display for Quest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.progress_text())
    }
}
