//! Creature family - monsters, NPCs and the player.

use crate::value_objects::{Body, Inventory, LazyBody, ScriptHooks, Shape, Stats};
use crate::EntityUid;

#[derive(Debug, Clone, PartialEq)]
pub struct Creature {
    uid: EntityUid,
    pub resource_id: String,
    pub name: Option<String>,
    pub faction: Option<String>,
    pub stats: Stats,
    pub inventory: Inventory,
    shape: Shape,
    pub scripts: ScriptHooks,
    body: LazyBody,
}

impl Creature {
    pub fn new(uid: EntityUid, resource_id: impl Into<String>) -> Self {
        Self {
            uid,
            resource_id: resource_id.into(),
            name: None,
            faction: None,
            stats: Stats::default(),
            inventory: Inventory::default(),
            shape: Shape::default(),
            scripts: ScriptHooks::default(),
            body: LazyBody::new(),
        }
    }

    pub fn uid(&self) -> EntityUid {
        self.uid
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Collision body, built from the current shape on first use.
    pub fn body(&self) -> &Body {
        self.body.get_or_build(&self.shape)
    }

    /// Move the creature and discard the stale body.
    pub fn move_to(&mut self, shape: Shape) {
        self.shape = shape;
        self.body.invalidate();
    }
}

/// The player's creature plus progression.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub creature: Creature,
    pub experience: i64,
    pub level: i16,
}

impl Player {
    pub fn new(creature: Creature) -> Self {
        Self {
            creature,
            experience: 0,
            level: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_rebuilds_the_body() {
        let mut rat = Creature::new(EntityUid::new(1), "creature.rat");
        rat.move_to(Shape::at(2, 2, 0));
        assert!(rat.body().contains(2, 2));

        rat.move_to(Shape::at(8, 3, 0));
        assert_eq!(rat.shape(), &Shape::at(8, 3, 0));
        assert!(!rat.body().contains(2, 2));
        assert!(rat.body().contains(8, 3));
    }
}
