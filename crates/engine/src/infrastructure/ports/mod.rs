//! Port traits for the engine's collaborators.
//!
//! These are the only abstractions in the engine. Everything else is
//! concrete types. Ports exist for:
//! - Resource definitions (loaded elsewhere, looked up by id)
//! - Script execution (scripts are opaque ids to the engine)
//! - The turn clock (for testing)

mod error;
mod external;
mod testing;

pub use error::ActionError;
pub use external::{ResourceLookup, ScriptExecutor};
pub use testing::TurnClock;

#[cfg(test)]
pub use external::{MockResourceLookup, MockScriptExecutor};
#[cfg(test)]
pub use testing::MockTurnClock;
