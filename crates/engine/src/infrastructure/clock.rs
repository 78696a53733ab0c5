//! Turn clock implementations.

use std::sync::atomic::{AtomicU64, Ordering};

use delve_domain::Tick;

use crate::infrastructure::ports::TurnClock;

/// Turn counter driven by the runner. Starts at the last tick the world
/// reached; the first [`advance`](Self::advance) moves to the next one.
#[derive(Debug, Default)]
pub struct TurnCounter(AtomicU64);

impl TurnCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(tick: Tick) -> Self {
        Self(AtomicU64::new(tick))
    }

    pub fn advance(&self) -> Tick {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }
}

impl TurnClock for TurnCounter {
    fn current_tick(&self) -> Tick {
        self.0.load(Ordering::Acquire)
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub Tick);

#[cfg(test)]
impl TurnClock for FixedClock {
    fn current_tick(&self) -> Tick {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_returns_the_new_tick() {
        let clock = TurnCounter::starting_at(41);
        assert_eq!(clock.current_tick(), 41);
        assert_eq!(clock.advance(), 42);
        assert_eq!(clock.current_tick(), 42);
    }
}
