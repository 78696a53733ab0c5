//! Codecs for identifiers and the components entities are built from.

use std::mem::size_of;

use delve_domain::{
    EntityUid, Inventory, ItemProperties, MapUid, ModUid, ScriptHooks, Shape, Stats,
};

use super::{
    Codec, CodecError, ListCodec, OptionalStringCodec, ReadBuffer, StringCodec, WriteBuffer,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct EntityUidCodec;

impl Codec<EntityUid> for EntityUidCodec {
    fn write(&self, buf: &mut WriteBuffer, value: &EntityUid) -> Result<(), CodecError> {
        buf.put_u64(value.get());
        Ok(())
    }

    fn read(&self, buf: &mut ReadBuffer<'_>) -> Result<EntityUid, CodecError> {
        buf.get_u64().map(EntityUid::new)
    }

    fn memory_estimate(&self, _value: &EntityUid) -> usize {
        size_of::<EntityUid>()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MapUidCodec;

impl Codec<MapUid> for MapUidCodec {
    fn write(&self, buf: &mut WriteBuffer, value: &MapUid) -> Result<(), CodecError> {
        buf.put_u16(value.get());
        Ok(())
    }

    fn read(&self, buf: &mut ReadBuffer<'_>) -> Result<MapUid, CodecError> {
        buf.get_u16().map(MapUid::new)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ModUidCodec;

impl Codec<ModUid> for ModUidCodec {
    fn write(&self, buf: &mut WriteBuffer, value: &ModUid) -> Result<(), CodecError> {
        buf.put_u16(value.get());
        Ok(())
    }

    fn read(&self, buf: &mut ReadBuffer<'_>) -> Result<ModUid, CodecError> {
        buf.get_u16().map(ModUid::new)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeCodec;

impl Codec<Shape> for ShapeCodec {
    fn write(&self, buf: &mut WriteBuffer, value: &Shape) -> Result<(), CodecError> {
        buf.put_i32(value.x);
        buf.put_i32(value.y);
        buf.put_i32(value.z);
        buf.put_i32(value.radius);
        Ok(())
    }

    fn read(&self, buf: &mut ReadBuffer<'_>) -> Result<Shape, CodecError> {
        Ok(Shape {
            x: buf.get_i32()?,
            y: buf.get_i32()?,
            z: buf.get_i32()?,
            radius: buf.get_i32()?,
        })
    }

    fn memory_estimate(&self, _value: &Shape) -> usize {
        size_of::<Shape>()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StatsCodec;

impl Codec<Stats> for StatsCodec {
    fn write(&self, buf: &mut WriteBuffer, value: &Stats) -> Result<(), CodecError> {
        for stat in [
            value.strength,
            value.dexterity,
            value.constitution,
            value.intelligence,
            value.health,
            value.mana,
        ] {
            buf.put_i32(stat);
        }
        Ok(())
    }

    fn read(&self, buf: &mut ReadBuffer<'_>) -> Result<Stats, CodecError> {
        Ok(Stats {
            strength: buf.get_i32()?,
            dexterity: buf.get_i32()?,
            constitution: buf.get_i32()?,
            intelligence: buf.get_i32()?,
            health: buf.get_i32()?,
            mana: buf.get_i32()?,
        })
    }

    fn memory_estimate(&self, _value: &Stats) -> usize {
        size_of::<Stats>()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InventoryCodec {
    items: ListCodec<EntityUidCodec>,
}

impl Codec<Inventory> for InventoryCodec {
    fn write(&self, buf: &mut WriteBuffer, value: &Inventory) -> Result<(), CodecError> {
        self.items.write(buf, &value.items)?;
        buf.put_i32(value.money);
        Ok(())
    }

    fn read(&self, buf: &mut ReadBuffer<'_>) -> Result<Inventory, CodecError> {
        Ok(Inventory {
            items: self.items.read(buf)?,
            money: buf.get_i32()?,
        })
    }

    fn memory_estimate(&self, value: &Inventory) -> usize {
        self.items.memory_estimate(&value.items) + size_of::<i32>()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptHooksCodec;

impl Codec<ScriptHooks> for ScriptHooksCodec {
    fn write(&self, buf: &mut WriteBuffer, value: &ScriptHooks) -> Result<(), CodecError> {
        OptionalStringCodec.write(buf, &value.on_use)?;
        OptionalStringCodec.write(buf, &value.on_equip)?;
        OptionalStringCodec.write(buf, &value.on_death)
    }

    fn read(&self, buf: &mut ReadBuffer<'_>) -> Result<ScriptHooks, CodecError> {
        Ok(ScriptHooks {
            on_use: OptionalStringCodec.read(buf)?,
            on_equip: OptionalStringCodec.read(buf)?,
            on_death: OptionalStringCodec.read(buf)?,
        })
    }

    fn memory_estimate(&self, value: &ScriptHooks) -> usize {
        [&value.on_use, &value.on_equip, &value.on_death]
            .into_iter()
            .map(|hook| OptionalStringCodec.memory_estimate(hook))
            .sum()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ItemPropertiesCodec;

impl Codec<ItemProperties> for ItemPropertiesCodec {
    fn write(&self, buf: &mut WriteBuffer, value: &ItemProperties) -> Result<(), CodecError> {
        StringCodec.write(buf, &value.resource_id)?;
        OptionalStringCodec.write(buf, &value.name)?;
        buf.put_i32(value.weight);
        buf.put_i32(value.price);
        ShapeCodec.write(buf, &value.shape)?;
        ScriptHooksCodec.write(buf, &value.scripts)
    }

    fn read(&self, buf: &mut ReadBuffer<'_>) -> Result<ItemProperties, CodecError> {
        Ok(ItemProperties {
            resource_id: StringCodec.read(buf)?,
            name: OptionalStringCodec.read(buf)?,
            weight: buf.get_i32()?,
            price: buf.get_i32()?,
            shape: ShapeCodec.read(buf)?,
            scripts: ScriptHooksCodec.read(buf)?,
        })
    }

    fn memory_estimate(&self, value: &ItemProperties) -> usize {
        StringCodec.memory_estimate(&value.resource_id)
            + OptionalStringCodec.memory_estimate(&value.name)
            + 2 * size_of::<i32>()
            + ShapeCodec.memory_estimate(&value.shape)
            + ScriptHooksCodec.memory_estimate(&value.scripts)
    }
}
