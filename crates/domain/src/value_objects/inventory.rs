//! Carried items, referenced by identifier.

use serde::{Deserialize, Serialize};

use crate::EntityUid;

/// Items are held by reference; the items themselves live in the world store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub items: Vec<EntityUid>,
    pub money: i32,
}

impl Inventory {
    pub fn add(&mut self, item: EntityUid) {
        if !self.items.contains(&item) {
            self.items.push(item);
        }
    }

    pub fn remove(&mut self, item: EntityUid) -> bool {
        let before = self.items.len();
        self.items.retain(|i| *i != item);
        self.items.len() != before
    }

    pub fn contains(&self, item: EntityUid) -> bool {
        self.items.contains(&item)
    }
}
