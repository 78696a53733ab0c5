//! Testability port for injecting game time.

use delve_domain::Tick;

#[cfg_attr(test, mockall::automock)]
pub trait TurnClock: Send + Sync {
    fn current_tick(&self) -> Tick;
}
