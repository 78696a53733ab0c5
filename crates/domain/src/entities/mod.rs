//! Entities and world structure persisted by the engine's world store.

mod creature;
mod entity;
mod item;
mod map;
mod map_path;
mod mod_descriptor;
mod region;
mod zone;

pub use creature::{Creature, Player};
pub use entity::{Entity, EntityKind};
pub use item::{Armor, Container, Item, ItemProperties, Weapon};
pub use map::{Map, MapKind, WORLD_LEVEL};
pub use map_path::MapPath;
pub use mod_descriptor::ModDescriptor;
pub use region::Region;
pub use zone::Zone;
