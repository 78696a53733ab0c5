//! Persistent world state.
//!
//! The world store owns the identifier spaces and every persisted map of the
//! world: entities, map path records, mod descriptors, whole maps, single
//! zones, scheduled scripts and the turn reached. Decoded entities and maps
//! are cached in memory. The cache is not written through: callers persist
//! changes with `add_entity`/`save_map` before committing.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use delve_domain::{
    Entity, EntityUid, Map, MapPath, MapUid, ModDescriptor, ModUid, ScriptSchedule, Tick, Zone,
};

use crate::infrastructure::codec::{
    Codec, CodecRegistry, EntityCodec, ListCodec, MapCodec, MapPathCodec, ModCodec,
    ScriptScheduleCodec, U64Codec, ZoneCodec,
};
use crate::infrastructure::persistence::{PagedStore, StoreError, TypedMap, ZoneKey};
use crate::infrastructure::ports::ResourceLookup;
use crate::stores::UidSpace;

const TICK_KEY: &str = "tick";

pub struct WorldStore {
    store: PagedStore,
    codecs: CodecRegistry,
    entities: TypedMap<EntityUid, Entity, EntityCodec>,
    map_paths: TypedMap<MapUid, MapPath, MapPathCodec>,
    mods: TypedMap<ModUid, ModDescriptor, ModCodec>,
    maps: TypedMap<MapUid, Map, MapCodec>,
    zones: TypedMap<ZoneKey, Zone, ZoneCodec>,
    tasks: TypedMap<Tick, Vec<ScriptSchedule>, ListCodec<ScriptScheduleCodec>>,
    session: TypedMap<String, u64, U64Codec>,
    entity_cache: DashMap<EntityUid, Arc<Entity>>,
    resident_maps: DashMap<MapUid, Arc<Map>>,
    entity_uids: UidSpace,
    map_uids: UidSpace,
    mod_uids: UidSpace,
}

impl WorldStore {
    pub fn open(
        path: impl AsRef<Path>,
        resources: Arc<dyn ResourceLookup>,
        uid_attempts: usize,
    ) -> Result<Self, StoreError> {
        let store = PagedStore::open(path)?;
        let codecs = CodecRegistry::new(resources);

        let entities: TypedMap<EntityUid, Entity, _> =
            store.open_map("entities", codecs.entity().clone())?;
        let map_paths: TypedMap<MapUid, MapPath, _> =
            store.open_map("map_paths", codecs.map_path())?;
        let mods: TypedMap<ModUid, ModDescriptor, _> =
            store.open_map("mods", codecs.mod_descriptor())?;
        let maps: TypedMap<MapUid, Map, _> = store.open_map("maps", codecs.map().clone())?;
        let zones: TypedMap<ZoneKey, Zone, _> = store.open_map("zones", codecs.zone().clone())?;
        let tasks: TypedMap<Tick, Vec<ScriptSchedule>, _> =
            store.open_map("tasks", codecs.schedules().clone())?;
        let session: TypedMap<String, u64, _> = store.open_map("session", U64Codec)?;

        let last_entity = entities.last_key()?.map_or(0, EntityUid::get);
        let last_map = [
            map_paths.last_key()?,
            maps.last_key()?,
            zones.last_key()?.map(|key| key.map),
        ]
        .into_iter()
            .flatten()
            .max()
            .map_or(0, MapUid::get);
        let last_mod = mods.last_key()?.map_or(0, ModUid::get);

        tracing::info!(
            entities = entities.len()?,
            maps = map_paths.len()?,
            mods = mods.len()?,
            "Opened world store"
        );

        Ok(Self {
            entity_uids: UidSpace::new("entity", EntityUid::MAX.get(), last_entity, uid_attempts),
            map_uids: UidSpace::new(
                "map",
                u64::from(MapUid::MAX.get()),
                u64::from(last_map),
                uid_attempts,
            ),
            mod_uids: UidSpace::new(
                "mod",
                u64::from(ModUid::MAX.get()),
                u64::from(last_mod),
                uid_attempts,
            ),
            store,
            codecs,
            entities,
            map_paths,
            mods,
            maps,
            zones,
            tasks,
            session,
            entity_cache: DashMap::new(),
            resident_maps: DashMap::new(),
        })
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.store.is_closed() {
            return Err(StoreError::Closed);
        }
        Ok(())
    }

    // =========================================================================
    // Identifiers
    // =========================================================================

    /// Allocate an entity identifier not handed out before by this store and
    /// not present in the persisted entity map.
    pub fn create_entity_uid(&self) -> Result<EntityUid, StoreError> {
        self.ensure_open()?;
        self.entity_uids
            .allocate(|raw| self.entities.contains_key(&EntityUid::new(raw)))
            .map(EntityUid::new)
    }

    /// Allocate a map identifier unused by path records, stored maps and
    /// standalone zones.
    pub fn create_map_uid(&self) -> Result<MapUid, StoreError> {
        self.ensure_open()?;
        self.map_uids
            .allocate(|raw| {
                let uid = narrow(raw)?;
                Ok(self.map_paths.contains_key(&uid)?
                    || self.maps.contains_key(&uid)?
                    || self.has_zones(uid)?)
            })
            .and_then(narrow)
    }

    fn has_zones(&self, map: MapUid) -> Result<bool, StoreError> {
        Ok(self
            .zones
            .range(ZoneKey::new(map, i32::MIN)..=ZoneKey::new(map, i32::MAX))?
            .next()
            .transpose()?
            .is_some())
    }

    pub fn create_mod_uid(&self) -> Result<ModUid, StoreError> {
        self.ensure_open()?;
        self.mod_uids
            .allocate(|raw| self.mods.contains_key(&narrow(raw)?))
            .and_then(narrow)
    }

    // =========================================================================
    // Entities
    // =========================================================================

    /// Persist `entity` under its own identifier. Overwriting an existing
    /// entry is allowed but logged, since it usually means a stale uid.
    ///
    /// Entity operations hold the cache entry for their uid across both the
    /// persisted access and the cache update.
    pub fn add_entity(&self, entity: Entity) -> Result<Arc<Entity>, StoreError> {
        let uid = entity.uid();
        let slot = self.entity_cache.entry(uid);
        if self.entities.insert(&uid, &entity)?.is_some() {
            tracing::warn!(entity_uid = %uid, kind = %entity.kind(), "Overwrote existing entity");
        }
        self.entity_uids.settle(uid.get());

        let entity = Arc::new(entity);
        slot.insert(Arc::clone(&entity));
        Ok(entity)
    }

    /// `Ok(None)` when no entity has this identifier.
    pub fn get_entity(&self, uid: EntityUid) -> Result<Option<Arc<Entity>>, StoreError> {
        self.ensure_open()?;
        if let Some(entity) = self.entity_cache.get(&uid) {
            return Ok(Some(Arc::clone(entity.value())));
        }

        match self.entity_cache.entry(uid) {
            Entry::Occupied(cached) => Ok(Some(Arc::clone(cached.get()))),
            Entry::Vacant(slot) => {
                let Some(entity) = self.entities.get(&uid)? else {
                    return Ok(None);
                };
                tracing::debug!(entity_uid = %uid, "Entity cache miss, decoded from store");
                let entity = Arc::new(entity);
                slot.insert(Arc::clone(&entity));
                Ok(Some(entity))
            }
        }
    }

    /// Delete the entity from the cache and the persisted map. Returns
    /// whether anything was removed.
    pub fn remove_entity(&self, uid: EntityUid) -> Result<bool, StoreError> {
        self.ensure_open()?;
        let slot = self.entity_cache.entry(uid);
        let persisted = self.entities.remove(&uid)?.is_some();
        let cached = match slot {
            Entry::Occupied(cached) => {
                cached.remove();
                true
            }
            Entry::Vacant(_) => false,
        };
        self.entity_uids.settle(uid.get());
        Ok(cached || persisted)
    }

    /// Drop the cached copy only. The next `get_entity` decodes it again.
    pub fn evict_entity(&self, uid: EntityUid) -> bool {
        self.entity_cache.remove(&uid).is_some()
    }

    pub fn cached_entities(&self) -> usize {
        self.entity_cache.len()
    }

    /// Approximate memory held by cached entities.
    pub fn cached_bytes(&self) -> usize {
        self.entity_cache
            .iter()
            .map(|entry| self.codecs.entity().memory_estimate(entry.value()))
            .sum()
    }

    // =========================================================================
    // Maps and mods
    // =========================================================================

    /// Register where a map's definition and saved contents live. The
    /// record stays even while the map itself is not resident.
    pub fn add_map(
        &self,
        uid: MapUid,
        resource_path: impl Into<String>,
        storage_path: impl Into<String>,
    ) -> Result<(), StoreError> {
        let record = MapPath::new(uid, resource_path, storage_path);
        if self.map_paths.insert(&uid, &record)?.is_some() {
            tracing::warn!(map_uid = %uid, "Replaced map path record");
        }
        self.map_uids.settle(u64::from(uid.get()));
        Ok(())
    }

    pub fn get_map_path(&self, uid: MapUid) -> Result<Option<MapPath>, StoreError> {
        self.map_paths.get(&uid)
    }

    /// Persist a whole map and keep it resident.
    pub fn save_map(&self, map: &Map) -> Result<(), StoreError> {
        let uid = map.uid();
        self.maps.insert(&uid, map)?;
        self.map_uids.settle(u64::from(uid.get()));
        self.resident_maps.insert(uid, Arc::new(map.clone()));
        Ok(())
    }

    /// Resident copy if there is one, otherwise decode from the store.
    pub fn get_map(&self, uid: MapUid) -> Result<Option<Arc<Map>>, StoreError> {
        self.ensure_open()?;
        if let Some(map) = self.resident_maps.get(&uid) {
            return Ok(Some(Arc::clone(map.value())));
        }
        let Some(map) = self.maps.get(&uid)? else {
            return Ok(None);
        };
        tracing::debug!(map_uid = %uid, zones = map.levels().len(), "Loaded map");
        let map = Arc::new(map);
        self.resident_maps.insert(uid, Arc::clone(&map));
        Ok(Some(map))
    }

    pub fn evict_map(&self, uid: MapUid) -> bool {
        self.resident_maps.remove(&uid).is_some()
    }

    pub fn is_map_resident(&self, uid: MapUid) -> bool {
        self.resident_maps.contains_key(&uid)
    }

    /// Persist one zone on its own, keyed by owning map and level.
    pub fn save_zone(&self, zone: &Zone) -> Result<(), StoreError> {
        self.zones
            .insert(&ZoneKey::new(zone.map(), zone.level()), zone)
            .map(|_| ())
    }

    pub fn load_zone(&self, map: MapUid, level: i32) -> Result<Option<Zone>, StoreError> {
        self.zones.get(&ZoneKey::new(map, level))
    }

    /// Levels of the zones saved for `map`, shallowest (lowest) first.
    pub fn zone_levels(&self, map: MapUid) -> Result<Vec<i32>, StoreError> {
        self.zones
            .range(ZoneKey::new(map, i32::MIN)..=ZoneKey::new(map, i32::MAX))?
            .map(|entry| entry.map(|(key, _)| key.level))
            .collect()
    }

    pub fn add_mod(&self, name: impl Into<String>) -> Result<ModDescriptor, StoreError> {
        let descriptor = ModDescriptor::new(self.create_mod_uid()?, name);
        self.mods.insert(&descriptor.uid, &descriptor)?;
        self.mod_uids.settle(u64::from(descriptor.uid.get()));
        tracing::info!(mod_uid = %descriptor.uid, name = %descriptor.name, "Registered mod");
        Ok(descriptor)
    }

    pub fn get_mod(&self, uid: ModUid) -> Result<Option<ModDescriptor>, StoreError> {
        self.mods.get(&uid)
    }

    pub fn mods(&self) -> Result<Vec<ModDescriptor>, StoreError> {
        self.mods
            .iter()?
            .map(|entry| entry.map(|(_, descriptor)| descriptor))
            .collect()
    }

    // =========================================================================
    // Scheduled scripts and turn state
    // =========================================================================

    /// Replace the persisted scheduled scripts with `entries`.
    pub fn save_scheduled_scripts(
        &self,
        entries: impl IntoIterator<Item = (Tick, ScriptSchedule)>,
    ) -> Result<usize, StoreError> {
        let mut by_tick: BTreeMap<Tick, Vec<ScriptSchedule>> = BTreeMap::new();
        for (tick, schedule) in entries {
            by_tick.entry(tick).or_default().push(schedule);
        }

        self.tasks.clear()?;
        let mut saved = 0;
        for (tick, schedules) in &by_tick {
            saved += schedules.len();
            self.tasks.insert(tick, schedules)?;
        }
        tracing::debug!(saved, ticks = by_tick.len(), "Saved scheduled scripts");
        Ok(saved)
    }

    /// Scheduled scripts in due-tick order, each tick's entries in the order
    /// they were saved.
    pub fn load_scheduled_scripts(&self) -> Result<Vec<(Tick, ScriptSchedule)>, StoreError> {
        let mut entries = Vec::new();
        for entry in self.tasks.iter()? {
            let (tick, schedules) = entry?;
            entries.extend(schedules.into_iter().map(|schedule| (tick, schedule)));
        }
        Ok(entries)
    }

    pub fn save_tick(&self, tick: Tick) -> Result<(), StoreError> {
        self.session.insert(&TICK_KEY.to_string(), &tick).map(|_| ())
    }

    /// Last tick saved with [`save_tick`](Self::save_tick), `0` for a new world.
    pub fn last_tick(&self) -> Result<Tick, StoreError> {
        Ok(self.session.get(&TICK_KEY.to_string())?.unwrap_or(0))
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    pub fn commit(&self) -> Result<u64, StoreError> {
        self.store.commit()
    }

    /// Commit and close. Every later call fails with [`StoreError::Closed`].
    pub fn close(&self) -> Result<(), StoreError> {
        self.store.close()?;
        self.entity_cache.clear();
        self.resident_maps.clear();
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.store.is_closed()
    }
}

fn narrow<U: From<u16>>(raw: u64) -> Result<U, StoreError> {
    u16::try_from(raw)
        .map(U::from)
        .map_err(|_| StoreError::Invalid(format!("identifier {raw} outside the 16-bit space")))
}
