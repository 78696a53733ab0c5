//! Value objects - Components owned by entities and references to resources

mod inventory;
mod resource;
mod script_hooks;
mod shape;
mod stats;

pub use inventory::Inventory;
pub use resource::{Resource, ResourceKind};
pub use script_hooks::ScriptHooks;
pub use shape::{Body, LazyBody, Shape};
pub use stats::Stats;
