//! Experience and leveling

use super::Character;
use crate::config::constants;

impl Character {
    /// Add experience, leveling up if the threshold is reached
    ///
    /// The threshold is checked once per call: an award worth several levels
    /// still grants a single level, and the overshoot is discarded when
    /// experience resets. Returns whether a level was gained.
    pub fn add_experience(&mut self, amount: u32) -> bool {
        self.experience = self.experience.saturating_add(amount);
        if self.experience >= self.experience_to_next_level {
            self.level_up();
            true
        } else {
            false
        }
    }

    /// Advance one level: reset experience, grow the threshold, raise stats
    /// and restore health to the new maximum
    pub fn level_up(&mut self) {
        let progression = &constants().progression;

        self.level += 1;
        self.experience = 0;
        self.experience_to_next_level =
            (self.experience_to_next_level as f64 * progression.experience_growth) as u32;

        self.max_health += progression.health_per_level;
        self.current_health = self.max_health;
        self.strength += progression.strength_per_level;
        self.magic += progression.magic_per_level;
        self.defense += progression.defense_per_level;
        self.agility += progression.agility_per_level;

        tracing::info!(
            name = %self.name,
            level = self.level,
            max_health = self.max_health,
            "level up"
        );
    }
}
