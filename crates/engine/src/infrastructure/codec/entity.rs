//! Polymorphic entity codec.
//!
//! Layout: `i16` kind tag, `u64` identifier, then the body of that kind.
//! Item kinds share the [`ItemPropertiesCodec`] prefix; players extend the
//! creature body.

use std::mem::size_of;

use delve_domain::{
    Armor, Container, Creature, Entity, EntityKind, EntityUid, Item, Player, Weapon,
};

use super::{
    Codec, CodecError, EntityUidCodec, InventoryCodec, ItemPropertiesCodec, OptionalStringCodec,
    ReadBuffer, ScriptHooksCodec, ShapeCodec, StatsCodec, StringCodec, WriteBuffer,
};

#[derive(Debug, Clone, Default)]
pub struct EntityCodec {
    inventory: InventoryCodec,
}

impl EntityCodec {
    pub fn new() -> Self {
        Self::default()
    }

    fn write_creature(&self, buf: &mut WriteBuffer, creature: &Creature) -> Result<(), CodecError> {
        StringCodec.write(buf, &creature.resource_id)?;
        OptionalStringCodec.write(buf, &creature.name)?;
        OptionalStringCodec.write(buf, &creature.faction)?;
        StatsCodec.write(buf, &creature.stats)?;
        self.inventory.write(buf, &creature.inventory)?;
        ShapeCodec.write(buf, creature.shape())?;
        ScriptHooksCodec.write(buf, &creature.scripts)
    }

    fn read_creature(&self, buf: &mut ReadBuffer<'_>, uid: EntityUid) -> Result<Creature, CodecError> {
        let mut creature = Creature::new(uid, StringCodec.read(buf)?);
        creature.name = OptionalStringCodec.read(buf)?;
        creature.faction = OptionalStringCodec.read(buf)?;
        creature.stats = StatsCodec.read(buf)?;
        creature.inventory = self.inventory.read(buf)?;
        creature.move_to(ShapeCodec.read(buf)?);
        creature.scripts = ScriptHooksCodec.read(buf)?;
        Ok(creature)
    }

    fn creature_estimate(&self, creature: &Creature) -> usize {
        StringCodec.memory_estimate(&creature.resource_id)
            + OptionalStringCodec.memory_estimate(&creature.name)
            + OptionalStringCodec.memory_estimate(&creature.faction)
            + self.inventory.memory_estimate(&creature.inventory)
            + ScriptHooksCodec.memory_estimate(&creature.scripts)
    }
}

impl Codec<Entity> for EntityCodec {
    fn write(&self, buf: &mut WriteBuffer, value: &Entity) -> Result<(), CodecError> {
        buf.put_i16(value.kind().tag());
        EntityUidCodec.write(buf, &value.uid())?;
        match value {
            Entity::Item(item) => ItemPropertiesCodec.write(buf, &item.properties),
            Entity::Weapon(weapon) => {
                ItemPropertiesCodec.write(buf, &weapon.item.properties)?;
                buf.put_i32(weapon.damage);
                buf.put_i16(weapon.range);
                Ok(())
            }
            Entity::Armor(armor) => {
                ItemPropertiesCodec.write(buf, &armor.item.properties)?;
                buf.put_i32(armor.rating);
                buf.put_i16(armor.slot);
                Ok(())
            }
            Entity::Container(container) => {
                ItemPropertiesCodec.write(buf, &container.item.properties)?;
                self.inventory.write(buf, &container.contents)?;
                // -1 marks an unlimited container
                buf.put_i32(container.capacity.unwrap_or(-1));
                Ok(())
            }
            Entity::Creature(creature) => self.write_creature(buf, creature),
            Entity::Player(player) => {
                self.write_creature(buf, &player.creature)?;
                buf.put_i64(player.experience);
                buf.put_i16(player.level);
                Ok(())
            }
        }
    }

    fn read(&self, buf: &mut ReadBuffer<'_>) -> Result<Entity, CodecError> {
        let kind = EntityKind::from_tag(buf.get_i16()?)?;
        let uid = EntityUidCodec.read(buf)?;
        let entity = match kind {
            EntityKind::Item => Entity::Item(Item::new(uid, ItemPropertiesCodec.read(buf)?)),
            EntityKind::Weapon => Entity::Weapon(Weapon {
                item: Item::new(uid, ItemPropertiesCodec.read(buf)?),
                damage: buf.get_i32()?,
                range: buf.get_i16()?,
            }),
            EntityKind::Armor => Entity::Armor(Armor {
                item: Item::new(uid, ItemPropertiesCodec.read(buf)?),
                rating: buf.get_i32()?,
                slot: buf.get_i16()?,
            }),
            EntityKind::Container => {
                let item = Item::new(uid, ItemPropertiesCodec.read(buf)?);
                let contents = self.inventory.read(buf)?;
                let capacity = match buf.get_i32()? {
                    -1 => None,
                    cap if cap >= 0 => Some(cap),
                    other => return Err(CodecError::invalid_length("container capacity", other)),
                };
                Entity::Container(Container {
                    item,
                    contents,
                    capacity,
                })
            }
            EntityKind::Creature => Entity::Creature(self.read_creature(buf, uid)?),
            EntityKind::Player => {
                let creature = self.read_creature(buf, uid)?;
                Entity::Player(Player {
                    creature,
                    experience: buf.get_i64()?,
                    level: buf.get_i16()?,
                })
            }
        };
        Ok(entity)
    }

    fn memory_estimate(&self, value: &Entity) -> usize {
        let body = match value.base_item() {
            Some(item) => ItemPropertiesCodec.memory_estimate(&item.properties),
            None => value.creature().map_or(0, |c| self.creature_estimate(c)),
        };
        let contents = match value {
            Entity::Container(container) => self.inventory.memory_estimate(&container.contents),
            _ => 0,
        };
        size_of::<Entity>() + body + contents
    }
}
