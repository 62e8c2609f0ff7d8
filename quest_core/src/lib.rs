//! quest_core - Quest tracking for the adventure
//!
//! This library provides:
//! - Quest: a live quest instance with progress and rewards
//! - QuestEvent: player actions that can advance quests
//! - QuestLedger: the id-keyed store of every quest in a session, with
//!   availability by level, progress dispatch and reward payout
//!
//! Characters only hold quest ids; the ledger owns the records, so a
//! progress update is visible wherever the quest is looked up.

mod event;
mod ledger;
mod quest;

pub use event::QuestEvent;
pub use ledger::{QuestCompletion, QuestLedger};
pub use quest::Quest;

// Re-export the content types callers need alongside the ledger
pub use content_core::{QuestCategory, QuestId, QuestKind};
