//! Codecs for the world model: regions, zones, maps and the small records
//! the world store keeps beside them.

use std::mem::size_of;
use std::sync::Arc;

use delve_domain::{
    Map, MapKind, MapPath, ModDescriptor, Region, ResourceKind, Schedule, ScriptSchedule, Zone,
};

use super::{
    Codec, CodecError, EntityUidCodec, ListCodec, MapUidCodec, ModUidCodec, OptionalStringCodec,
    ReadBuffer, StringCodec, WriteBuffer,
};
use crate::infrastructure::ports::ResourceLookup;

/// Regions reference their terrain and theme by resource id. Decoding
/// resolves the ids through the resource lookup; an id the lookup does not
/// know fails the read.
#[derive(Clone)]
pub struct RegionCodec {
    resources: Arc<dyn ResourceLookup>,
    scripts: ListCodec<StringCodec>,
}

impl RegionCodec {
    pub fn new(resources: Arc<dyn ResourceLookup>) -> Self {
        Self {
            resources,
            scripts: ListCodec(StringCodec),
        }
    }
}

impl std::fmt::Debug for RegionCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionCodec").finish_non_exhaustive()
    }
}

impl Codec<Region> for RegionCodec {
    fn write(&self, buf: &mut WriteBuffer, value: &Region) -> Result<(), CodecError> {
        buf.put_i32(value.x);
        buf.put_i32(value.y);
        buf.put_i32(value.z);
        buf.put_i32(value.width);
        buf.put_i32(value.height);
        StringCodec.write(buf, &value.terrain().id)?;
        OptionalStringCodec.write(buf, &value.theme().map(|theme| theme.id.clone()))?;
        OptionalStringCodec.write(buf, &value.label)?;
        self.scripts.write(buf, &value.scripts)
    }

    fn read(&self, buf: &mut ReadBuffer<'_>) -> Result<Region, CodecError> {
        let x = buf.get_i32()?;
        let y = buf.get_i32()?;
        let z = buf.get_i32()?;
        let width = buf.get_i32()?;
        let height = buf.get_i32()?;

        let terrain_id = StringCodec.read(buf)?;
        let terrain = self
            .resources
            .get_resource_of(&terrain_id, ResourceKind::Terrain)
            .ok_or_else(|| CodecError::unresolved(ResourceKind::Terrain, terrain_id))?;
        let theme = match OptionalStringCodec.read(buf)? {
            Some(theme_id) => Some(
                self.resources
                    .get_resource_of(&theme_id, ResourceKind::Theme)
                    .ok_or_else(|| CodecError::unresolved(ResourceKind::Theme, theme_id))?,
            ),
            None => None,
        };

        let mut region = Region::new(x, y, width, height, terrain)?.with_theme(theme);
        region.z = z;
        region.label = OptionalStringCodec.read(buf)?;
        region.scripts = self.scripts.read(buf)?;
        Ok(region)
    }

    fn memory_estimate(&self, value: &Region) -> usize {
        size_of::<Region>()
            + OptionalStringCodec.memory_estimate(&value.label)
            + self.scripts.memory_estimate(&value.scripts)
    }
}

#[derive(Debug, Clone)]
pub struct ZoneCodec {
    regions: ListCodec<RegionCodec>,
    entities: ListCodec<EntityUidCodec>,
}

impl ZoneCodec {
    pub fn new(regions: RegionCodec) -> Self {
        Self {
            regions: ListCodec(regions),
            entities: ListCodec(EntityUidCodec),
        }
    }
}

impl Codec<Zone> for ZoneCodec {
    fn write(&self, buf: &mut WriteBuffer, value: &Zone) -> Result<(), CodecError> {
        MapUidCodec.write(buf, &value.map())?;
        buf.put_i32(value.level());
        OptionalStringCodec.write(buf, &value.name)?;
        self.regions.write(buf, &value.regions)?;
        self.entities.write(buf, &value.entities)
    }

    fn read(&self, buf: &mut ReadBuffer<'_>) -> Result<Zone, CodecError> {
        let map = MapUidCodec.read(buf)?;
        let level = buf.get_i32()?;
        let mut zone = Zone::new(map, level);
        zone.name = OptionalStringCodec.read(buf)?;
        zone.regions = self.regions.read(buf)?;
        zone.entities = self.entities.read(buf)?;
        Ok(zone)
    }

    fn memory_estimate(&self, value: &Zone) -> usize {
        size_of::<Zone>()
            + OptionalStringCodec.memory_estimate(&value.name)
            + self.regions.memory_estimate(&value.regions)
            + self.entities.memory_estimate(&value.entities)
    }
}

/// Layout: uid, kind tag, name, zone list. World maps are checked on read
/// to hold exactly their one implicit zone.
#[derive(Debug, Clone)]
pub struct MapCodec {
    zone: ZoneCodec,
}

impl MapCodec {
    pub fn new(zone: ZoneCodec) -> Self {
        Self { zone }
    }
}

impl Codec<Map> for MapCodec {
    fn write(&self, buf: &mut WriteBuffer, value: &Map) -> Result<(), CodecError> {
        MapUidCodec.write(buf, &value.uid())?;
        buf.put_i16(value.kind().tag());
        StringCodec.write(buf, &value.name)?;

        let count = value.zones().count();
        let count = i32::try_from(count)
            .map_err(|_| CodecError::invalid_length("zone list", count as i64))?;
        buf.put_i32(count);
        for zone in value.zones() {
            self.zone.write(buf, zone)?;
        }
        Ok(())
    }

    fn read(&self, buf: &mut ReadBuffer<'_>) -> Result<Map, CodecError> {
        let uid = MapUidCodec.read(buf)?;
        let kind = MapKind::from_tag(buf.get_i16()?)?;
        let name = StringCodec.read(buf)?;
        let zones = ListCodec(self.zone.clone()).read(buf)?;
        Ok(Map::from_parts(uid, name, kind, zones)?)
    }

    fn memory_estimate(&self, value: &Map) -> usize {
        size_of::<Map>()
            + value.name.len()
            + value
                .zones()
                .map(|zone| self.zone.memory_estimate(zone))
                .sum::<usize>()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ModCodec;

impl Codec<ModDescriptor> for ModCodec {
    fn write(&self, buf: &mut WriteBuffer, value: &ModDescriptor) -> Result<(), CodecError> {
        ModUidCodec.write(buf, &value.uid)?;
        StringCodec.write(buf, &value.name)
    }

    fn read(&self, buf: &mut ReadBuffer<'_>) -> Result<ModDescriptor, CodecError> {
        let uid = ModUidCodec.read(buf)?;
        Ok(ModDescriptor::new(uid, StringCodec.read(buf)?))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MapPathCodec;

impl Codec<MapPath> for MapPathCodec {
    fn write(&self, buf: &mut WriteBuffer, value: &MapPath) -> Result<(), CodecError> {
        MapUidCodec.write(buf, &value.map)?;
        StringCodec.write(buf, &value.resource_path)?;
        StringCodec.write(buf, &value.storage_path)
    }

    fn read(&self, buf: &mut ReadBuffer<'_>) -> Result<MapPath, CodecError> {
        Ok(MapPath {
            map: MapUidCodec.read(buf)?,
            resource_path: StringCodec.read(buf)?,
            storage_path: StringCodec.read(buf)?,
        })
    }
}

/// Script id, period, then the stop tick with `0` standing for "no stop".
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptScheduleCodec;

impl Codec<ScriptSchedule> for ScriptScheduleCodec {
    fn write(&self, buf: &mut WriteBuffer, value: &ScriptSchedule) -> Result<(), CodecError> {
        StringCodec.write(buf, &value.script)?;
        buf.put_u64(value.schedule.period());
        buf.put_u64(value.schedule.stop().unwrap_or(0));
        Ok(())
    }

    fn read(&self, buf: &mut ReadBuffer<'_>) -> Result<ScriptSchedule, CodecError> {
        let script = StringCodec.read(buf)?;
        let period = buf.get_u64()?;
        let stop = buf.get_u64()?;
        let schedule = Schedule::new(period, Some(stop))?;
        Ok(ScriptSchedule::new(script, schedule))
    }
}
