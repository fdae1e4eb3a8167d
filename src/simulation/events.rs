//! Outbound events from the simulation core.
//!
//! The engine and the evolution controller push events into an
//! [`EventQueue`]; the host drains it after each frame instead of the core
//! calling back into UI code.

use super::genetics::DeadAgent;

/// Why a bird died.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// Touched the floor or the ceiling.
    Bounds,
    /// Overlapped a pipe.
    Pipe,
}

/// Something the host may want to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    /// A bird collided and left the live set.
    BirdDied {
        /// The bird's label, if any.
        label: Option<String>,
        /// Score at death.
        score: u32,
        /// What it hit.
        cause: DeathCause,
    },
    /// The human player died in play mode; scheduling has stopped.
    GameOver {
        /// The player's final score.
        final_score: u32,
    },
    /// Every training bird is dead; the engine waits to be reseeded.
    GenerationEnded {
        /// All birds that died during the generation, in death order.
        dead: Vec<DeadAgent>,
    },
    /// The best score of the current training run went up.
    BestScoreImproved {
        /// The new best score.
        score: u32,
    },
}

/// Queue of events waiting to be drained by the host.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<SimulationEvent>,
}

impl EventQueue {
    /// Creates an empty event queue.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Adds an event to the queue.
    pub fn push(&mut self, event: SimulationEvent) {
        self.events.push(event);
    }

    /// Drains all events from the queue.
    pub fn drain(&mut self) -> std::vec::Drain<'_, SimulationEvent> {
        self.events.drain(..)
    }

    /// Discards all queued events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
