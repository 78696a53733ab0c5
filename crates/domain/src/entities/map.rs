//! Map - a world map or a multi-level dungeon.
//!
//! A world (overworld) map owns exactly one zone, at level 0. A dungeon owns
//! any number of zones indexed by level. Every zone's owning map identifier
//! must equal the map's own.

use std::collections::BTreeMap;
use std::fmt;

use crate::entities::Zone;
use crate::{DomainError, MapUid};

/// Level of the single zone of a world map.
pub const WORLD_LEVEL: i32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKind {
    World,
    Dungeon,
}

impl MapKind {
    /// Persisted discriminant.
    pub fn tag(self) -> i16 {
        match self {
            MapKind::World => 1,
            MapKind::Dungeon => 2,
        }
    }

    pub fn from_tag(tag: i16) -> Result<Self, DomainError> {
        match tag {
            1 => Ok(MapKind::World),
            2 => Ok(MapKind::Dungeon),
            other => Err(DomainError::unknown_kind("map", other)),
        }
    }
}

impl fmt::Display for MapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKind::World => f.write_str("world"),
            MapKind::Dungeon => f.write_str("dungeon"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    uid: MapUid,
    pub name: String,
    kind: MapKind,
    zones: BTreeMap<i32, Zone>,
}

impl Map {
    pub fn world(uid: MapUid, name: impl Into<String>) -> Self {
        let name = name.into();
        let mut zone = Zone::new(uid, WORLD_LEVEL);
        zone.name = Some(name.clone());
        Self {
            uid,
            name,
            kind: MapKind::World,
            zones: BTreeMap::from([(WORLD_LEVEL, zone)]),
        }
    }

    pub fn dungeon(uid: MapUid, name: impl Into<String>) -> Self {
        Self {
            uid,
            name: name.into(),
            kind: MapKind::Dungeon,
            zones: BTreeMap::new(),
        }
    }

    /// Rebuild a map from stored parts, checking every zone invariant.
    pub fn from_parts(
        uid: MapUid,
        name: String,
        kind: MapKind,
        zones: Vec<Zone>,
    ) -> Result<Self, DomainError> {
        if kind == MapKind::World
            && (zones.len() != 1 || zones[0].level() != WORLD_LEVEL)
        {
            return Err(DomainError::constraint(format!(
                "world map {uid} must own exactly one zone at level {WORLD_LEVEL}"
            )));
        }
        let mut map = Self {
            uid,
            name,
            kind,
            zones: BTreeMap::new(),
        };
        for zone in zones {
            map.check_owner(&zone)?;
            let level = zone.level();
            if map.zones.insert(level, zone).is_some() {
                return Err(DomainError::constraint(format!(
                    "map {uid} has two zones at level {level}"
                )));
            }
        }
        Ok(map)
    }

    pub fn uid(&self) -> MapUid {
        self.uid
    }

    pub fn kind(&self) -> MapKind {
        self.kind
    }

    /// Add or replace a dungeon level. World maps cannot gain zones.
    pub fn add_zone(&mut self, zone: Zone) -> Result<Option<Zone>, DomainError> {
        if self.kind == MapKind::World {
            return Err(DomainError::constraint(format!(
                "world map {} owns a single implicit zone",
                self.uid
            )));
        }
        self.check_owner(&zone)?;
        Ok(self.zones.insert(zone.level(), zone))
    }

    pub fn zone(&self, level: i32) -> Option<&Zone> {
        self.zones.get(&level)
    }

    pub fn zone_mut(&mut self, level: i32) -> Option<&mut Zone> {
        self.zones.get_mut(&level)
    }

    /// Zones in ascending level order.
    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.zones.values()
    }

    pub fn levels(&self) -> Vec<i32> {
        self.zones.keys().copied().collect()
    }

    fn check_owner(&self, zone: &Zone) -> Result<(), DomainError> {
        if zone.map() != self.uid {
            return Err(DomainError::constraint(format!(
                "zone at level {} belongs to map {}, not {}",
                zone.level(),
                zone.map(),
                self.uid
            )));
        }
        Ok(())
    }
}
