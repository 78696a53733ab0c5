//! Creature attributes.

use serde::{Deserialize, Serialize};

/// Base attributes and current pools of a creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub health: i32,
    pub mana: i32,
}

impl Stats {
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn damage(&mut self, amount: i32) {
        self.health = self.health.saturating_sub(amount.max(0));
    }
}
