//! Session Events
//!
//! Tick-stamped notifications generated by the session loop, consumed by
//! replay drivers, logs and tests. Purely observational: nothing reads
//! them back into the simulation.

use serde::{Serialize, Deserialize};

use crate::core::coord::Coord;
use crate::game::player::Motion;

/// Something observable that happened during a tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A move was committed.
    Moved {
        /// Tick when the move was committed.
        tick: u64,
        /// The resolved motion.
        motion: Motion,
        /// The committed position.
        to: Coord,
    },

    /// A move was rejected; the position is unchanged.
    Blocked {
        /// Tick when the move was rejected.
        tick: u64,
        /// The rejected motion.
        motion: Motion,
        /// The occupied or out-of-bounds candidate cell.
        at: Coord,
    },

    /// A dimension rotation was executed.
    Rotated {
        /// Tick when the rotation was applied.
        tick: u64,
        /// Rotation direction.
        forward: bool,
        /// Display counter after the rotation, in `[0, N-2)`.
        rotation: u32,
    },

    /// The player reached the goal.
    Won {
        /// Tick of the victory check.
        tick: u64,
    },

    /// The session stopped for good.
    Stopped {
        /// Tick when the stop was processed.
        tick: u64,
    },
}

impl GameEvent {
    /// Tick the event was generated on.
    pub fn tick(&self) -> u64 {
        match self {
            GameEvent::Moved { tick, .. }
            | GameEvent::Blocked { tick, .. }
            | GameEvent::Rotated { tick, .. }
            | GameEvent::Won { tick }
            | GameEvent::Stopped { tick } => *tick,
        }
    }
}
