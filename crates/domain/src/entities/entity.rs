//! The polymorphic entity record.
//!
//! Entities form a closed family: a tagged variant per concrete kind, each
//! holding its own components. The persisted form writes [`EntityKind::tag`]
//! first so a reader can dispatch before decoding the body.

use std::fmt;

use crate::entities::{Armor, Container, Creature, Item, Player, Weapon};
use crate::value_objects::{Body, Shape};
use crate::{DomainError, EntityUid};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Item,
    Weapon,
    Armor,
    Container,
    Creature,
    Player,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Item,
        EntityKind::Weapon,
        EntityKind::Armor,
        EntityKind::Container,
        EntityKind::Creature,
        EntityKind::Player,
    ];

    /// Persisted discriminant. Values are part of the file format.
    pub fn tag(self) -> i16 {
        match self {
            EntityKind::Item => 1,
            EntityKind::Weapon => 2,
            EntityKind::Armor => 3,
            EntityKind::Container => 4,
            EntityKind::Creature => 10,
            EntityKind::Player => 11,
        }
    }

    pub fn from_tag(tag: i16) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| DomainError::unknown_kind("entity", tag))
    }

    pub fn is_item(self) -> bool {
        matches!(
            self,
            EntityKind::Item | EntityKind::Weapon | EntityKind::Armor | EntityKind::Container
        )
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Item => "item",
            EntityKind::Weapon => "weapon",
            EntityKind::Armor => "armor",
            EntityKind::Container => "container",
            EntityKind::Creature => "creature",
            EntityKind::Player => "player",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Item(Item),
    Weapon(Weapon),
    Armor(Armor),
    Container(Container),
    Creature(Creature),
    Player(Player),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Item(_) => EntityKind::Item,
            Entity::Weapon(_) => EntityKind::Weapon,
            Entity::Armor(_) => EntityKind::Armor,
            Entity::Container(_) => EntityKind::Container,
            Entity::Creature(_) => EntityKind::Creature,
            Entity::Player(_) => EntityKind::Player,
        }
    }

    /// Identifier assigned at creation. There is no way to change it.
    pub fn uid(&self) -> EntityUid {
        match self {
            Entity::Item(item) => item.uid(),
            Entity::Weapon(weapon) => weapon.item.uid(),
            Entity::Armor(armor) => armor.item.uid(),
            Entity::Container(container) => container.item.uid(),
            Entity::Creature(creature) => creature.uid(),
            Entity::Player(player) => player.creature.uid(),
        }
    }

    pub fn base_item(&self) -> Option<&Item> {
        match self {
            Entity::Item(item) => Some(item),
            Entity::Weapon(weapon) => Some(&weapon.item),
            Entity::Armor(armor) => Some(&armor.item),
            Entity::Container(container) => Some(&container.item),
            Entity::Creature(_) | Entity::Player(_) => None,
        }
    }

    pub fn creature(&self) -> Option<&Creature> {
        match self {
            Entity::Creature(creature) => Some(creature),
            Entity::Player(player) => Some(&player.creature),
            _ => None,
        }
    }

    pub fn shape(&self) -> &Shape {
        match self {
            Entity::Item(item) => &item.properties.shape,
            Entity::Weapon(weapon) => &weapon.item.properties.shape,
            Entity::Armor(armor) => &armor.item.properties.shape,
            Entity::Container(container) => &container.item.properties.shape,
            Entity::Creature(creature) => creature.shape(),
            Entity::Player(player) => player.creature.shape(),
        }
    }

    /// Collision body for creatures; items are not simulated.
    pub fn body(&self) -> Option<&Body> {
        self.creature().map(Creature::body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ItemProperties;

    #[test]
    fn tags_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_tag(kind.tag()), Ok(kind));
        }
    }

    #[test]
    fn unknown_tag_is_an_error() {
        assert_eq!(
            EntityKind::from_tag(7),
            Err(DomainError::unknown_kind("entity", 7))
        );
    }

    #[test]
    fn uid_comes_from_the_base_record() {
        let sword = Entity::Weapon(Weapon {
            item: Item::new(EntityUid::new(77), ItemProperties::new("item.sword")),
            damage: 6,
            range: 1,
        });
        assert_eq!(sword.uid(), EntityUid::new(77));
        assert_eq!(sword.kind(), EntityKind::Weapon);
        assert!(sword.kind().is_item());
        assert!(sword.body().is_none());

        let orc = Entity::Creature(Creature::new(EntityUid::new(78), "creature.orc"));
        assert_eq!(orc.uid(), EntityUid::new(78));
        assert!(orc.body().is_some());
    }
}
