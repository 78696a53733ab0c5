//! Common test helpers: a small resource set, sample entities and maps, and
//! world stores opened in throwaway directories.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{open_world, orc};
//!
//! #[test]
//! fn test_orc_survives() {
//!     let (_dir, world) = open_world();
//!     world.add_entity(orc(world.create_entity_uid().unwrap())).unwrap();
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use delve_domain::{
    Creature, Entity, EntityUid, Item, ItemProperties, Map, MapUid, Region, Resource,
    ResourceKind, Shape, Weapon, Zone,
};

use crate::context::GameContext;
use crate::infrastructure::clock::FixedClock;
use crate::infrastructure::ports::{ResourceLookup, ScriptExecutor};
use crate::infrastructure::resources::InMemoryResources;
use crate::stores::WorldStore;

pub const UID_ATTEMPTS: usize = 64;

pub fn resources() -> Arc<dyn ResourceLookup> {
    Arc::new(InMemoryResources::with_resources([
        Resource::new("terrain.stone", ResourceKind::Terrain, "Stone"),
        Resource::new("terrain.water", ResourceKind::Terrain, "Water"),
        Resource::new("theme.crypt", ResourceKind::Theme, "Crypt"),
    ]))
}

/// World store in a fresh temporary directory. Keep the directory alive for
/// as long as the store is used.
pub fn open_world() -> (tempfile::TempDir, WorldStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let world = reopen_world(dir.path());
    (dir, world)
}

pub fn reopen_world(path: &Path) -> WorldStore {
    WorldStore::open(path, resources(), UID_ATTEMPTS).expect("open world store")
}

pub fn orc(uid: EntityUid) -> Entity {
    let mut orc = Creature::new(uid, "creature.orc");
    orc.name = Some("Grub".to_string());
    orc.stats.health = 12;
    orc.move_to(Shape::at(3, 4, 0));
    Entity::Creature(orc)
}

pub fn sword(uid: EntityUid) -> Entity {
    let mut properties = ItemProperties::new("item.sword");
    properties.weight = 30;
    Entity::Weapon(Weapon {
        item: Item::new(uid, properties),
        damage: 7,
        range: 1,
    })
}

/// Dungeon with a zone at each of `levels`, one stone region per zone.
pub fn crypt(uid: MapUid, levels: &[i32]) -> Map {
    let stone = resources()
        .get_resource_of("terrain.stone", ResourceKind::Terrain)
        .expect("stone terrain");
    let mut map = Map::dungeon(uid, "Crypt");
    for &level in levels {
        let mut zone = Zone::new(uid, level);
        zone.regions
            .push(Region::new(0, 0, 16, 16, Arc::clone(&stone)).expect("region"));
        map.add_zone(zone).expect("zone");
    }
    map
}

/// Context over `world` with the clock fixed at tick 0.
pub fn context(world: WorldStore, scripts: Arc<dyn ScriptExecutor>) -> GameContext {
    GameContext::new(Arc::new(world), resources(), Arc::new(FixedClock(0)), scripts)
}
