//! Item family - things that can be carried, wielded, worn or opened.
//!
//! Every member of the family wraps a base [`Item`], which owns the entity
//! identifier and the shared [`ItemProperties`].

use crate::value_objects::{Inventory, ScriptHooks, Shape};
use crate::EntityUid;

/// Properties shared by every item kind.
///
/// # Simple Data Struct
///
/// All fields are public; there is no combination of values that breaks an
/// invariant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemProperties {
    /// Resource definition this item was instantiated from
    pub resource_id: String,
    /// Display name override, `None` to use the resource's name
    pub name: Option<String>,
    pub weight: i32,
    pub price: i32,
    pub shape: Shape,
    pub scripts: ScriptHooks,
}

impl ItemProperties {
    pub fn new(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            ..Self::default()
        }
    }
}

/// A plain item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    uid: EntityUid,
    pub properties: ItemProperties,
}

impl Item {
    pub fn new(uid: EntityUid, properties: ItemProperties) -> Self {
        Self { uid, properties }
    }

    pub fn uid(&self) -> EntityUid {
        self.uid
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weapon {
    pub item: Item,
    pub damage: i32,
    /// Reach in tiles; 1 for melee
    pub range: i16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Armor {
    pub item: Item,
    pub rating: i32,
    /// Equipment slot the armor occupies
    pub slot: i16,
}

/// An item that holds other items (bags, chests, corpses).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub item: Item,
    pub contents: Inventory,
    /// Maximum number of items, `None` for unlimited
    pub capacity: Option<i32>,
}

impl Container {
    pub fn is_full(&self) -> bool {
        self.capacity
            .is_some_and(|cap| self.contents.items.len() >= cap.max(0) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_capacity_is_checked() {
        let mut chest = Container {
            item: Item::new(EntityUid::new(3), ItemProperties::new("item.chest")),
            contents: Inventory::default(),
            capacity: Some(1),
        };
        assert!(!chest.is_full());
        chest.contents.add(EntityUid::new(9));
        assert!(chest.is_full());
    }

    #[test]
    fn unlimited_container_is_never_full() {
        let bag = Container {
            item: Item::new(EntityUid::new(4), ItemProperties::new("item.bag")),
            contents: Inventory {
                items: (1..50).map(EntityUid::new).collect(),
                money: 0,
            },
            capacity: None,
        };
        assert!(!bag.is_full());
    }
}
