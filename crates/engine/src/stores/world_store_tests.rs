use std::collections::HashSet;

use delve_domain::{EntityUid, Map, MapUid, Schedule, ScriptSchedule, Zone};

use crate::infrastructure::persistence::StoreError;
use crate::stores::WorldStore;
use crate::test_fixtures::{crypt, open_world, orc, reopen_world, resources, sword};

#[test]
fn entity_uids_are_distinct_and_avoid_persisted_keys() {
    let (_dir, world) = open_world();
    world.add_entity(orc(EntityUid::new(1))).unwrap();
    world.add_entity(orc(EntityUid::new(3))).unwrap();

    let mut seen = HashSet::new();
    for _ in 0..200 {
        let uid = world.create_entity_uid().unwrap();
        assert!(seen.insert(uid), "uid {uid} handed out twice");
        assert!(world.get_entity(uid).unwrap().is_none());
    }
}

#[test]
fn get_entity_returns_what_was_added() {
    let (_dir, world) = open_world();
    let uid = world.create_entity_uid().unwrap();
    world.add_entity(sword(uid)).unwrap();

    let found = world.get_entity(uid).unwrap().expect("sword");
    assert_eq!(*found, sword(uid));
    assert!(world.get_entity(EntityUid::new(999_999)).unwrap().is_none());
}

#[test]
fn add_entity_overwrites_last_write_wins() {
    let (_dir, world) = open_world();
    let uid = world.create_entity_uid().unwrap();
    world.add_entity(orc(uid)).unwrap();
    world.add_entity(sword(uid)).unwrap();

    assert_eq!(*world.get_entity(uid).unwrap().unwrap(), sword(uid));
    world.evict_entity(uid);
    assert_eq!(*world.get_entity(uid).unwrap().unwrap(), sword(uid));
}

#[test]
fn removed_entity_is_truly_absent() {
    let (_dir, world) = open_world();
    let uid = world.create_entity_uid().unwrap();
    world.add_entity(orc(uid)).unwrap();

    assert!(world.remove_entity(uid).unwrap());
    assert!(world.get_entity(uid).unwrap().is_none());
    assert!(!world.remove_entity(uid).unwrap());
}

#[test]
fn concurrent_read_never_reinstates_a_removed_entity() {
    let (_dir, world) = open_world();
    for _ in 0..500 {
        let uid = world.create_entity_uid().unwrap();
        world.add_entity(orc(uid)).unwrap();
        world.evict_entity(uid);

        std::thread::scope(|scope| {
            let reader = scope.spawn(|| world.get_entity(uid).unwrap());
            assert!(world.remove_entity(uid).unwrap());
            reader.join().unwrap();
        });

        assert!(world.get_entity(uid).unwrap().is_none(), "uid {uid} came back");
        assert_eq!(world.cached_entities(), 0);
    }
}

#[test]
fn concurrent_read_never_overwrites_a_newer_entity() {
    let (_dir, world) = open_world();
    for _ in 0..500 {
        let uid = world.create_entity_uid().unwrap();
        world.add_entity(orc(uid)).unwrap();
        world.evict_entity(uid);

        std::thread::scope(|scope| {
            let reader = scope.spawn(|| world.get_entity(uid).unwrap());
            world.add_entity(sword(uid)).unwrap();
            reader.join().unwrap();
        });

        assert_eq!(*world.get_entity(uid).unwrap().unwrap(), sword(uid));
    }
}

#[test]
fn evicted_entity_is_decoded_again() {
    let (_dir, world) = open_world();
    let uid = world.create_entity_uid().unwrap();
    world.add_entity(orc(uid)).unwrap();
    assert!(world.cached_bytes() > 0);

    assert!(world.evict_entity(uid));
    assert_eq!(world.cached_entities(), 0);
    assert_eq!(world.cached_bytes(), 0);
    assert_eq!(*world.get_entity(uid).unwrap().unwrap(), orc(uid));
    assert_eq!(world.cached_entities(), 1);
}

#[test]
fn committed_world_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (uid, map_uid) = {
        let world = reopen_world(dir.path());
        let uid = world.create_entity_uid().unwrap();
        world.add_entity(orc(uid)).unwrap();
        let map_uid = world.create_map_uid().unwrap();
        world.add_map(map_uid, "maps/crypt.xml", "saves/crypt.map").unwrap();
        world.save_tick(17).unwrap();
        world.close().unwrap();
        (uid, map_uid)
    };

    let world = reopen_world(dir.path());
    assert_eq!(*world.get_entity(uid).unwrap().unwrap(), orc(uid));
    let path = world.get_map_path(map_uid).unwrap().unwrap();
    assert_eq!(path.resource_path, "maps/crypt.xml");
    assert_eq!(world.last_tick().unwrap(), 17);

    // counters resume above what was persisted
    assert!(world.create_entity_uid().unwrap() > uid);
    assert!(world.create_map_uid().unwrap() > map_uid);
}

#[test]
fn closed_store_fails_fast() {
    let (_dir, world) = open_world();
    let uid = world.create_entity_uid().unwrap();
    world.add_entity(orc(uid)).unwrap();
    world.close().unwrap();

    assert!(world.is_closed());
    assert!(matches!(world.get_entity(uid), Err(StoreError::Closed)));
    assert!(matches!(world.add_entity(orc(uid)), Err(StoreError::Closed)));
    assert!(matches!(world.commit(), Err(StoreError::Closed)));
    assert!(matches!(world.create_entity_uid(), Err(StoreError::Closed)));
    assert!(matches!(world.get_map_path(MapUid::new(1)), Err(StoreError::Closed)));
    assert!(matches!(world.close(), Err(StoreError::Closed)));
}

#[test]
fn map_path_is_independent_of_residency() {
    let (_dir, world) = open_world();
    let uid = world.create_map_uid().unwrap();
    world.add_map(uid, "a", "b").unwrap();

    assert!(!world.is_map_resident(uid));
    let path = world.get_map_path(uid).unwrap().unwrap();
    assert_eq!((path.resource_path.as_str(), path.storage_path.as_str()), ("a", "b"));

    world.save_map(&crypt(uid, &[1])).unwrap();
    assert!(world.evict_map(uid));
    assert!(world.get_map_path(uid).unwrap().is_some());
}

#[test]
fn evicted_map_reloads_from_store() {
    let (_dir, world) = open_world();
    let uid = world.create_map_uid().unwrap();
    let map = crypt(uid, &[-1, 1, 2]);
    world.save_map(&map).unwrap();
    assert!(world.is_map_resident(uid));

    world.evict_map(uid);
    assert!(!world.is_map_resident(uid));
    let loaded = world.get_map(uid).unwrap().expect("map");
    assert_eq!(*loaded, map);
    assert!(world.is_map_resident(uid));
    assert!(world.get_map(MapUid::new(999)).unwrap().is_none());
}

#[test]
fn zones_stream_one_level_at_a_time() {
    let (_dir, world) = open_world();
    let uid = world.create_map_uid().unwrap();
    let other = world.create_map_uid().unwrap();
    let map = crypt(uid, &[3, -2, 0]);
    for zone in map.zones() {
        world.save_zone(zone).unwrap();
    }
    world.save_zone(&Zone::new(other, 5)).unwrap();

    assert_eq!(world.zone_levels(uid).unwrap(), vec![-2, 0, 3]);
    assert_eq!(world.load_zone(uid, -2).unwrap().as_ref(), map.zone(-2));
    assert!(world.load_zone(uid, 7).unwrap().is_none());
}

#[test]
fn map_uids_skip_maps_that_only_have_saved_zones() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let world = reopen_world(dir.path());
        world.save_zone(&Zone::new(MapUid::new(1), 0)).unwrap();
        let fresh = world.create_map_uid().unwrap();
        assert_ne!(fresh, MapUid::new(1));
        assert!(world.zone_levels(fresh).unwrap().is_empty());

        world.save_zone(&Zone::new(MapUid::new(40), -3)).unwrap();
        world.close().unwrap();
    }

    // counters resume above the highest map that owns zones
    let world = reopen_world(dir.path());
    assert!(world.create_map_uid().unwrap() > MapUid::new(40));
}

#[test]
fn mods_get_distinct_uids() {
    let (_dir, world) = open_world();
    let base = world.add_mod("base").unwrap();
    let extra = world.add_mod("extra").unwrap();
    assert_ne!(base.uid, extra.uid);
    assert_eq!(world.get_mod(extra.uid).unwrap(), Some(extra.clone()));
    assert_eq!(world.mods().unwrap(), vec![base, extra]);
}

#[test]
fn narrow_space_exhaustion_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let world = WorldStore::open(dir.path(), resources(), 8).unwrap();
    for raw in 1..=8u16 {
        world.add_map(MapUid::new(raw), "r", "s").unwrap();
    }

    // The counter starts at 1 and all eight candidates it may try are taken.
    let err = world.create_map_uid().unwrap_err();
    assert!(err.is_exhausted());
    assert!(matches!(
        err,
        StoreError::IdentifierExhausted { space: "map", attempts: 8 }
    ));
}

#[test]
fn scheduled_scripts_round_trip_through_the_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let entries = vec![
        (10, ScriptSchedule::new("rain", Schedule::new(5, Some(40)).unwrap())),
        (4, ScriptSchedule::new("tide", Schedule::unbounded(3).unwrap())),
        (10, ScriptSchedule::new("wind", Schedule::unbounded(1).unwrap())),
    ];
    {
        let world = reopen_world(dir.path());
        assert_eq!(world.save_scheduled_scripts(entries.clone()).unwrap(), 3);
        world.close().unwrap();
    }

    let world = reopen_world(dir.path());
    let loaded = world.load_scheduled_scripts().unwrap();
    assert_eq!(loaded, vec![entries[1].clone(), entries[0].clone(), entries[2].clone()]);

    world.save_scheduled_scripts(Vec::new()).unwrap();
    assert!(world.load_scheduled_scripts().unwrap().is_empty());
}

#[test]
fn world_map_round_trips_through_the_store() {
    let (_dir, world) = open_world();
    let uid = world.create_map_uid().unwrap();
    let map = Map::world(uid, "Overworld");
    world.save_map(&map).unwrap();
    world.evict_map(uid);
    assert_eq!(world.get_map(uid).unwrap().as_deref(), Some(&map));
}
