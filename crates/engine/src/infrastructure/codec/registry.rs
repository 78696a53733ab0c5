use std::sync::Arc;

use super::{
    EntityCodec, ListCodec, MapCodec, MapPathCodec, ModCodec, RegionCodec, ScriptScheduleCodec,
    ZoneCodec,
};
use crate::infrastructure::ports::ResourceLookup;

/// The codec tree for everything the world store persists.
///
/// Built once per store. Only the region codec needs the resource lookup,
/// but it sits under the zone and map codecs, so the registry threads the
/// lookup down when it assembles them.
#[derive(Debug, Clone)]
pub struct CodecRegistry {
    entity: EntityCodec,
    zone: ZoneCodec,
    map: MapCodec,
    schedules: ListCodec<ScriptScheduleCodec>,
}

impl CodecRegistry {
    pub fn new(resources: Arc<dyn ResourceLookup>) -> Self {
        let zone = ZoneCodec::new(RegionCodec::new(resources));
        Self {
            entity: EntityCodec::new(),
            map: MapCodec::new(zone.clone()),
            zone,
            schedules: ListCodec(ScriptScheduleCodec),
        }
    }

    pub fn entity(&self) -> &EntityCodec {
        &self.entity
    }

    pub fn zone(&self) -> &ZoneCodec {
        &self.zone
    }

    pub fn map(&self) -> &MapCodec {
        &self.map
    }

    pub fn map_path(&self) -> MapPathCodec {
        MapPathCodec
    }

    pub fn mod_descriptor(&self) -> ModCodec {
        ModCodec
    }

    /// Scheduled scripts sharing one due tick.
    pub fn schedules(&self) -> &ListCodec<ScriptScheduleCodec> {
        &self.schedules
    }
}
