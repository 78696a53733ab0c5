//! Delve domain model.
//!
//! Pure types shared by the engine: identifiers, the entity family, the
//! map/zone/region hierarchy, game time and events. Nothing here touches
//! storage; persistence lives in `delve-engine`.

pub mod entities;
pub mod error;
pub mod events;
pub mod game_time;
pub mod ids;
pub mod value_objects;

pub use entities::{
    Armor, Container, Creature, Entity, EntityKind, Item, ItemProperties, Map, MapKind, MapPath,
    ModDescriptor, Player, Region, Weapon, Zone, WORLD_LEVEL,
};
pub use error::DomainError;
pub use events::{EventKind, GameEvent};
pub use game_time::{Schedule, ScriptSchedule, Tick};
pub use ids::{EntityUid, MapUid, ModUid};
pub use value_objects::{
    Body, Inventory, LazyBody, Resource, ResourceKind, ScriptHooks, Shape, Stats,
};
