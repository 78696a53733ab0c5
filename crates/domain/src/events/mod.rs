//! Domain Events
//!
//! Events are posted by gameplay code onto the engine's event bus. The task
//! queue matches one-shot registrations against an event's description and
//! treats turn-advance events as the clock moving forward.

use serde::{Deserialize, Serialize};

use crate::game_time::Tick;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Something happened in the world ("door.open", "creature.died", ...).
    Domain,
    /// The turn clock reached `tick`.
    TurnAdvance,
}

/// An event as seen by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    description: String,
    tick: Tick,
    kind: EventKind,
}

impl GameEvent {
    pub fn new(description: impl Into<String>, tick: Tick) -> Self {
        Self {
            description: description.into(),
            tick,
            kind: EventKind::Domain,
        }
    }

    pub fn turn_advance(tick: Tick) -> Self {
        Self {
            description: "turn.advance".to_string(),
            tick,
            kind: EventKind::TurnAdvance,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn is_turn_advance(&self) -> bool {
        self.kind == EventKind::TurnAdvance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_event_keeps_description() {
        let event = GameEvent::new("door.open", 7);
        assert_eq!(event.description(), "door.open");
        assert_eq!(event.tick(), 7);
        assert!(!event.is_turn_advance());
    }

    #[test]
    fn turn_advance_is_flagged() {
        let event = GameEvent::turn_advance(12);
        assert!(event.is_turn_advance());
        assert_eq!(event.kind(), EventKind::TurnAdvance);
    }
}
