//! Game session - ties the character, combat and the quest ledger together
//!
//! Every action that changes the character reports what happened to the
//! quest ledger, and any level gained along the way (from combat or from
//! quest rewards) is reported as a `LevelUp` until the level settles.

use crate::error::SessionError;
use content_core::{ContentRegistry, Exploration, QuestId};
use item_core::Item;
use quest_core::{Quest, QuestCompletion, QuestEvent, QuestLedger};
use rand::Rng;
use stat_core::{run_encounter_with_rng, Character, CombatInput, CombatReport, EnemyFactory};

/// What an exploration step turned up
#[derive(Debug, Clone, PartialEq)]
pub enum Discovery {
    Fight(CombatReport),
    Gold(u32),
}

/// Result of exploring or fighting
#[derive(Debug, Clone, PartialEq)]
pub struct ExploreReport {
    pub discovery: Discovery,
    /// Quests completed as a consequence, in payout order
    pub completions: Vec<QuestCompletion>,
}

impl ExploreReport {
    pub fn combat(&self) -> Option<&CombatReport> {
        match &self.discovery {
            Discovery::Fight(report) => Some(report),
            Discovery::Gold(_) => None,
        }
    }
}

/// One player's game: their character, the quest ledger and the content
/// both were built from
#[derive(Debug, Clone)]
pub struct GameSession {
    character: Character,
    ledger: QuestLedger,
    content: ContentRegistry,
}

impl GameSession {
    /// Start a new game with a fresh ledger
    pub fn new(character: Character, content: ContentRegistry) -> Self {
        let ledger = QuestLedger::new(&content);
        tracing::info!(name = %character.name, class = %character.class, "new game");
        GameSession {
            character,
            ledger,
            content,
        }
    }

    /// Reassemble a session from saved parts
    pub fn from_parts(character: Character, ledger: QuestLedger, content: ContentRegistry) -> Self {
        GameSession {
            character,
            ledger,
            content,
        }
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    pub fn ledger(&self) -> &QuestLedger {
        &self.ledger
    }

    pub fn content(&self) -> &ContentRegistry {
        &self.content
    }

    pub fn is_game_over(&self) -> bool {
        !self.character.is_alive()
    }

    fn ensure_alive(&self) -> Result<(), SessionError> {
        if self.is_game_over() {
            return Err(SessionError::PlayerDefeated(self.character.name.clone()));
        }
        Ok(())
    }

    /// Wander off: either an encounter from the level's enemy pool or a
    /// handful of gold
    pub fn explore<I, R>(&mut self, input: &mut I, rng: &mut R) -> Result<ExploreReport, SessionError>
    where
        I: CombatInput + ?Sized,
        R: Rng + ?Sized,
    {
        self.ensure_alive()?;

        match self.content.exploration().roll(self.character.level, rng) {
            Exploration::Encounter(key) => self.fight(&key, input, rng),
            Exploration::Gold(amount) => {
                let level_before = self.character.level;
                self.character.add_gold(amount);
                tracing::info!(amount, "found gold while exploring");

                let completions = self.report(&[QuestEvent::gold(amount)], level_before);
                Ok(ExploreReport {
                    discovery: Discovery::Gold(amount),
                    completions,
                })
            }
        }
    }

    /// Fight an enemy of type `key`, scaled to the character's level
    pub fn fight<I, R>(
        &mut self,
        key: &str,
        input: &mut I,
        rng: &mut R,
    ) -> Result<ExploreReport, SessionError>
    where
        I: CombatInput + ?Sized,
        R: Rng + ?Sized,
    {
        self.ensure_alive()?;

        let mut enemy =
            EnemyFactory::new(self.content.enemies()).create_enemy(key, self.character.level);
        let level_before = self.character.level;
        let report = run_encounter_with_rng(&mut self.character, &mut enemy, input, rng);

        let mut events = Vec::new();
        if report.is_victory() {
            events.push(QuestEvent::kill(enemy.key.as_str()));
            // Gold looted from the enemy counts toward gold quests, the same
            // as gold found while exploring. Quest reward gold does not.
            if report.gold_gained > 0 {
                events.push(QuestEvent::gold(report.gold_gained));
            }
        }
        let completions = self.report(&events, level_before);

        Ok(ExploreReport {
            discovery: Discovery::Fight(report),
            completions,
        })
    }

    /// Equip the weapon at `index` of the inventory's weapon listing
    pub fn equip_weapon(&mut self, index: usize) -> Result<Vec<QuestCompletion>, SessionError> {
        let weapons = self.character.inventory.weapons();
        if weapons.is_empty() {
            return Err(SessionError::NoWeapons);
        }
        let position = weapons
            .get(index)
            .map(|(position, _)| *position)
            .ok_or(SessionError::InvalidChoice)?;
        let weapon = self
            .character
            .inventory
            .take(position)
            .ok_or(SessionError::InvalidChoice)?;

        let level_before = self.character.level;
        self.character.equip_weapon(weapon);
        Ok(self.report(&[QuestEvent::WeaponEquipped], level_before))
    }

    /// Equip the armor at `index` of the inventory's armor listing
    pub fn equip_armor(&mut self, index: usize) -> Result<(), SessionError> {
        let armor = self.character.inventory.armor();
        if armor.is_empty() {
            return Err(SessionError::NoArmor);
        }
        let position = armor
            .get(index)
            .map(|(position, _)| *position)
            .ok_or(SessionError::InvalidChoice)?;
        let armor = self
            .character
            .inventory
            .take(position)
            .ok_or(SessionError::InvalidChoice)?;

        self.character.equip_armor(armor);
        Ok(())
    }

    /// Use the consumable at `index` of the consumable listing, returning
    /// the item and the health recovered
    pub fn use_item(&mut self, index: usize) -> Result<(Item, u32), SessionError> {
        let consumables = self.character.inventory.consumables();
        if consumables.is_empty() {
            return Err(SessionError::NoConsumables);
        }
        let position = consumables
            .get(index)
            .map(|(position, _)| *position)
            .ok_or(SessionError::InvalidChoice)?;
        let item = self
            .character
            .inventory
            .take(position)
            .ok_or(SessionError::InvalidChoice)?;

        let healed = item
            .kind
            .heal_amount()
            .map_or(0, |amount| self.character.heal(amount));
        tracing::debug!(item = %item.name, healed, "item used");
        Ok((item, healed))
    }

    /// Quests currently on offer, in listing order
    pub fn available_quests(&self) -> Vec<&Quest> {
        self.ledger.get_available_quests(self.character.level)
    }

    pub fn active_quests(&self) -> Vec<&Quest> {
        self.ledger.active_quests(&self.character)
    }

    pub fn completed_quests(&self) -> Vec<&Quest> {
        self.ledger.completed_quests(&self.character)
    }

    /// Accept the quest at `index` of `available_quests()`
    pub fn accept_quest(&mut self, index: usize) -> bool {
        self.ledger.assign_quest(&mut self.character, index)
    }

    /// Add a daily quest suited to the character's level
    pub fn request_daily_quest<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<QuestId> {
        self.ledger.generate_daily_quest(self.character.level, rng)
    }

    /// Feed events to the ledger, then keep reporting level-ups until no
    /// new level was reached
    fn report(&mut self, events: &[QuestEvent], level_before: u32) -> Vec<QuestCompletion> {
        let mut completions = Vec::new();
        for event in events {
            completions.extend(self.ledger.update_quest_progress(&mut self.character, event));
        }

        let mut reported_level = level_before;
        while self.character.level > reported_level {
            reported_level = self.character.level;
            completions.extend(
                self.ledger
                    .update_quest_progress(&mut self.character, &QuestEvent::LevelUp),
            );
        }
        completions
    }
}
