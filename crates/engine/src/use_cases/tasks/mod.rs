//! Task queue use cases.
//!
//! Deferred work comes in two shapes, kept in two independent indexes:
//! - one-shot actions registered under an event description, fired every
//!   time an event with that description is posted
//! - repeat entries keyed by the tick they are next due, fired as the turn
//!   clock reaches them and rescheduled by their period until their stop tick

mod error;
mod queue;
mod types;

pub use error::{TaskError, TaskFailure};
pub use queue::TaskQueue;
pub use types::{action_fn, Action, RepeatEntry, TaskSource};
