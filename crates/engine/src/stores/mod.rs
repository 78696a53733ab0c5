//! Persistent state stores.
//!
//! - `WorldStore` - entities, maps, mods and scheduled scripts on disk
//! - `UidSpace` - identifier allocation for the world store

pub mod uid_space;
pub mod world_store;

#[cfg(test)]
mod world_store_tests;

pub use uid_space::UidSpace;
pub use world_store::WorldStore;
