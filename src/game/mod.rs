//! Game Logic Module
//!
//! The integrated maze core. All simulation here is deterministic: exact
//! integer lattice state, BTree containers, no wall-clock reads.
//!
//! ## Module Structure
//!
//! - `grid`: the sparse occupancy grid and its occlusion query
//! - `player`: position, pending motion, move animation
//! - `input`: binding tables and the per-session input state
//! - `session`: the tick loop and scripted replay driver
//! - `events`: tick-stamped observations for logs and tests

pub mod grid;
pub mod player;
pub mod input;
pub mod session;
pub mod events;

// Re-export key types
pub use grid::{Labyrinth, ValidationError};
pub use player::{Animation, Motion, Player};
pub use input::{Action, Bindings, InputState, Key};
pub use session::{GameSession, InputEvent, SessionConfig, SessionPhase, TickResult};
pub use events::GameEvent;
