//! Zone - the contents of one level of a map.

use crate::entities::Region;
use crate::{EntityUid, MapUid};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    map: MapUid,
    level: i32,
    pub name: Option<String>,
    pub regions: Vec<Region>,
    /// Entities placed in this zone; the records live in the world store
    pub entities: Vec<EntityUid>,
}

impl Zone {
    /// The owning map is fixed here and cannot change afterwards.
    pub fn new(map: MapUid, level: i32) -> Self {
        Self {
            map,
            level,
            name: None,
            regions: Vec::new(),
            entities: Vec::new(),
        }
    }

    pub fn map(&self) -> MapUid {
        self.map
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn region_at(&self, x: i32, y: i32) -> Option<&Region> {
        // Topmost layer wins.
        self.regions
            .iter()
            .filter(|r| r.contains(x, y))
            .max_by_key(|r| r.z)
    }

    pub fn place(&mut self, entity: EntityUid) {
        if !self.entities.contains(&entity) {
            self.entities.push(entity);
        }
    }

    pub fn take(&mut self, entity: EntityUid) -> bool {
        let before = self.entities.len();
        self.entities.retain(|e| *e != entity);
        before != self.entities.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::value_objects::{Resource, ResourceKind};

    #[test]
    fn topmost_region_wins() {
        let terrain = Arc::new(Resource::new("terrain.floor", ResourceKind::Terrain, "Floor"));
        let mut zone = Zone::new(MapUid::new(1), -2);
        let floor = Region::new(0, 0, 10, 10, terrain.clone()).unwrap();
        let mut rug = Region::new(2, 2, 2, 2, terrain).unwrap();
        rug.z = 1;
        rug.label = Some("rug".to_string());
        zone.regions = vec![floor, rug];

        assert_eq!(zone.region_at(3, 3).and_then(|r| r.label.as_deref()), Some("rug"));
        assert_eq!(zone.region_at(8, 8).map(|r| r.z), Some(0));
        assert!(zone.region_at(20, 0).is_none());
    }

    #[test]
    fn placing_twice_keeps_one_entry() {
        let mut zone = Zone::new(MapUid::new(1), 0);
        zone.place(EntityUid::new(5));
        zone.place(EntityUid::new(5));
        assert_eq!(zone.entities.len(), 1);
        assert!(zone.take(EntityUid::new(5)));
        assert!(!zone.take(EntityUid::new(5)));
    }
}
