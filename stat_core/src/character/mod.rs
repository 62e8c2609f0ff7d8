//! Character - the player's stat block, equipment, inventory and quest log

mod progression;

use crate::config::constants;
use crate::types::{CharacterClass, EquipmentSlot};
use content_core::QuestId;
use item_core::{Inventory, Item};
use serde::{Deserialize, Serialize};

/// The player character
///
/// `current_health` never exceeds `max_health`; a character at 0 health is
/// dead and cannot act. Quests are held by id; the quest ledger owns the
/// records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next_level: u32,
    pub max_health: u32,
    pub current_health: u32,
    pub strength: u32,
    pub magic: u32,
    pub defense: u32,
    pub agility: u32,
    pub gold: u32,
    #[serde(default)]
    pub inventory: Inventory,
    #[serde(default)]
    pub equipped_weapon: Option<Item>,
    #[serde(default)]
    pub equipped_armor: Option<Item>,
    /// Accepted, unfinished quests (unique)
    #[serde(default)]
    pub active_quests: Vec<QuestId>,
    /// Finished quests in completion order
    #[serde(default)]
    pub completed_quests: Vec<QuestId>,
}

/// Display snapshot of a character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatSheet {
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub health: (u32, u32),
    pub experience: (u32, u32),
    pub strength: u32,
    pub magic: u32,
    /// Defense including armor bonus
    pub defense: u32,
    pub agility: u32,
    pub gold: u32,
    pub weapon: Option<String>,
    pub armor: Option<String>,
}

impl Character {
    /// Create a fresh level-1 character with the class's base stats
    pub fn new(name: impl Into<String>, class: CharacterClass) -> Self {
        let base = class.base_stats();
        let progression = &constants().progression;

        Character {
            name: name.into(),
            class,
            level: 1,
            experience: 0,
            experience_to_next_level: progression.base_experience_to_next,
            max_health: base.health,
            current_health: base.health,
            strength: base.strength,
            magic: base.magic,
            defense: base.defense,
            agility: base.agility,
            gold: progression.starting_gold,
            inventory: Inventory::new(),
            equipped_weapon: None,
            equipped_armor: None,
            active_quests: Vec::new(),
            completed_quests: Vec::new(),
        }
    }

    /// Apply a raw hit, returning the damage actually taken
    ///
    /// Mitigated by the raw `defense` attribute only; equipped armor does
    /// not reduce incoming damage. At least `min_damage` always lands.
    pub fn take_damage(&mut self, raw: i64) -> u32 {
        let actual = mitigate(raw, self.defense);
        self.current_health = self.current_health.saturating_sub(actual);
        actual
    }

    /// Restore health up to the maximum, returning the amount healed
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.current_health;
        self.current_health = self.current_health.saturating_add(amount).min(self.max_health);
        self.current_health - before
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Strength plus equipped weapon damage
    pub fn get_attack_power(&self) -> u32 {
        let bonus = self
            .equipped_weapon
            .as_ref()
            .map_or(0, |weapon| weapon.kind.damage_bonus());
        self.strength.saturating_add(bonus)
    }

    /// Defense plus equipped armor bonus (display only, see `take_damage`)
    pub fn get_defense_power(&self) -> u32 {
        let bonus = self
            .equipped_armor
            .as_ref()
            .map_or(0, |armor| armor.kind.defense_bonus());
        self.defense.saturating_add(bonus)
    }

    /// Equip a weapon, returning any previous weapon to the inventory
    ///
    /// The item kind is not checked.
    pub fn equip_weapon(&mut self, weapon: Item) {
        self.equip(EquipmentSlot::Weapon, weapon);
    }

    /// Equip armor, returning any previous armor to the inventory
    ///
    /// The item kind is not checked.
    pub fn equip_armor(&mut self, armor: Item) {
        self.equip(EquipmentSlot::Armor, armor);
    }

    /// Put an item into a slot; the previous occupant goes to the inventory
    pub fn equip(&mut self, slot: EquipmentSlot, item: Item) {
        let target = match slot {
            EquipmentSlot::Weapon => &mut self.equipped_weapon,
            EquipmentSlot::Armor => &mut self.equipped_armor,
        };
        tracing::debug!(%slot, item = %item.name, "equip");
        if let Some(previous) = target.replace(item) {
            self.inventory.push(previous);
        }
    }

    pub fn equipped(&self, slot: EquipmentSlot) -> Option<&Item> {
        match slot {
            EquipmentSlot::Weapon => self.equipped_weapon.as_ref(),
            EquipmentSlot::Armor => self.equipped_armor.as_ref(),
        }
    }

    pub fn add_item(&mut self, item: Item) {
        self.inventory.push(item);
    }

    /// Remove the first inventory item with this name (case-insensitive)
    pub fn remove_item(&mut self, name: &str) -> Option<Item> {
        self.inventory.remove_by_name(name)
    }

    pub fn has_active_quest(&self, id: &QuestId) -> bool {
        self.active_quests.contains(id)
    }

    pub fn stat_sheet(&self) -> StatSheet {
        StatSheet {
            name: self.name.clone(),
            class: self.class,
            level: self.level,
            health: (self.current_health, self.max_health),
            experience: (self.experience, self.experience_to_next_level),
            strength: self.strength,
            magic: self.magic,
            defense: self.get_defense_power(),
            agility: self.agility,
            gold: self.gold,
            weapon: self.equipped_weapon.as_ref().map(Item::summary),
            armor: self.equipped_armor.as_ref().map(Item::summary),
        }
    }
}

/// `max(min_damage, raw - defense)`
pub(crate) fn mitigate(raw: i64, defense: u32) -> u32 {
    let floor = constants().combat.min_damage as i64;
    let actual = (raw - defense as i64).max(floor);
    u32::try_from(actual).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn warrior() -> Character {
        Character::new("Aria", CharacterClass::Warrior)
    }

    #[test]
    fn test_new_warrior() {
        let aria = warrior();
        assert_eq!(aria.max_health, 120);
        assert_eq!(aria.current_health, 120);
        assert_eq!(aria.strength, 15);
        assert_eq!(aria.gold, 50);
        assert_eq!(aria.level, 1);
        assert_eq!(aria.experience_to_next_level, 100);
        assert!(aria.inventory.is_empty());
        assert!(aria.equipped_weapon.is_none());
        assert!(aria.active_quests.is_empty());
    }

    #[test]
    fn test_take_damage_subtracts_defense() {
        let mut aria = warrior();
        let actual = aria.take_damage(20);
        assert_eq!(actual, 8);
        assert_eq!(aria.current_health, 112);
    }

    #[test]
    fn test_take_damage_minimum_one() {
        let mut aria = warrior();
        assert_eq!(aria.take_damage(5), 1);
        assert_eq!(aria.take_damage(-3), 1);
        assert_eq!(aria.current_health, 118);
    }

    #[test]
    fn test_take_damage_floors_at_zero() {
        let mut aria = warrior();
        aria.take_damage(1000);
        assert_eq!(aria.current_health, 0);
        assert!(!aria.is_alive());
    }

    #[test]
    fn test_armor_does_not_mitigate() {
        let mut aria = warrior();
        aria.equip_armor(Item::armor("Dragon Scale Armor", "Scales", 15));
        assert_eq!(aria.get_defense_power(), 27);

        let actual = aria.take_damage(20);
        assert_eq!(actual, 8);
    }

    #[test]
    fn test_power_saturates() {
        let mut aria = warrior();
        aria.strength = u32::MAX - 1;
        aria.defense = u32::MAX - 1;
        aria.equip_weapon(Item::weapon("Iron Sword", "A sturdy iron blade", 8));
        aria.equip_armor(Item::armor("Leather Armor", "Basic leather protection", 5));

        assert_eq!(aria.get_attack_power(), u32::MAX);
        assert_eq!(aria.get_defense_power(), u32::MAX);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut aria = warrior();
        aria.take_damage(32);
        assert_eq!(aria.current_health, 100);
        assert_eq!(aria.heal(50), 20);
        assert_eq!(aria.current_health, 120);
        assert_eq!(aria.heal(10), 0);
    }

    #[test]
    fn test_attack_power_includes_weapon() {
        let mut aria = warrior();
        assert_eq!(aria.get_attack_power(), 15);
        aria.equip_weapon(Item::weapon("Iron Sword", "A sturdy iron blade", 8));
        assert_eq!(aria.get_attack_power(), 23);
    }

    #[test]
    fn test_equip_returns_previous_to_inventory() {
        let mut aria = warrior();
        let dagger = Item::weapon("Rusty Dagger", "A worn dagger", 3);
        let sword = Item::weapon("Iron Sword", "A sturdy iron blade", 8);

        aria.equip_weapon(dagger.clone());
        assert!(aria.inventory.is_empty());

        aria.equip_weapon(sword.clone());
        assert_eq!(aria.equipped_weapon, Some(sword));
        assert_eq!(aria.inventory.len(), 1);
        assert_eq!(aria.inventory.get(0), Some(&dagger));
    }

    #[test]
    fn test_equip_slot_is_not_validated() {
        let mut aria = warrior();
        aria.equip_weapon(Item::consumable("Health Potion", "Restores 30 HP", 30));
        assert_eq!(aria.get_attack_power(), 15);
        assert!(aria.equipped(EquipmentSlot::Weapon).is_some());
    }

    #[test]
    fn test_remove_item() {
        let mut aria = warrior();
        aria.add_item(Item::consumable("Health Potion", "Restores 30 HP", 30));
        assert!(aria.remove_item("nothing").is_none());
        assert_eq!(aria.remove_item("health POTION").unwrap().name, "Health Potion");
        assert!(aria.inventory.is_empty());
    }

    #[test]
    fn test_stat_sheet_shows_armored_defense() {
        let mut aria = warrior();
        aria.equip_armor(Item::armor("Leather Armor", "Basic leather protection", 5));
        let sheet = aria.stat_sheet();
        assert_eq!(sheet.defense, 17);
        assert_eq!(sheet.armor.as_deref(), Some("Leather Armor (+5 defense)"));
        assert_eq!(sheet.health, (120, 120));
    }

    #[test]
    fn test_json_round_trip_keeps_everything() {
        let mut aria = warrior();
        aria.add_item(Item::accessory("Lucky Charm", "Increases gold find chance"));
        aria.equip_weapon(Item::weapon("Iron Sword", "A sturdy iron blade", 8));
        aria.active_quests.push(QuestId::from("first_blood"));
        aria.completed_quests.push(QuestId::from("equipment_upgrade"));

        let json = serde_json::to_string(&aria).unwrap();
        let loaded: Character = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, aria);
    }

    proptest! {
        #[test]
        fn prop_damage_is_floored_difference(raw in -50i64..500, defense in 0u32..100) {
            let mut character = warrior();
            character.defense = defense;
            let before = character.current_health;
            let actual = character.take_damage(raw);

            prop_assert_eq!(actual as i64, (raw - defense as i64).max(1));
            prop_assert_eq!(character.current_health, before.saturating_sub(actual));
        }

        #[test]
        fn prop_heal_never_exceeds_max(damage in 0i64..200, amount in 0u32..500) {
            let mut character = warrior();
            character.take_damage(damage);
            let before = character.current_health;
            let healed = character.heal(amount);

            prop_assert!(character.current_health <= character.max_health);
            prop_assert_eq!(character.current_health, before + healed);
        }
    }
}
