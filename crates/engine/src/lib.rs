//! Delve engine library.
//!
//! Persistent world state and turn scheduling for the Delve roguelike.
//!
//! ## Structure
//!
//! - `infrastructure/` - Codecs, the paged store, ports and their implementations
//! - `stores/` - The world store and identifier allocation
//! - `use_cases/` - The task queue
//! - `context` - What scheduled actions receive
//! - `app` - Application composition

pub mod app;
pub mod context;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

/// Test fixtures module for integration testing.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
pub use context::GameContext;
