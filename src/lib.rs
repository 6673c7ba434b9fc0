//! # Chroma Maze
//!
//! Deterministic core of an N-dimensional labyrinth game: two of the axes
//! are drawn on screen, every further axis is rendered as a color channel.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        CHROMA MAZE                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                 │
//! │  ├── coord.rs    - N-dimensional lattice coordinates        │
//! │  └── rotation.rs - Cyclic dimension permutation             │
//! │                                                             │
//! │  game/           - Game logic (deterministic)               │
//! │  ├── grid.rs     - Occupancy grid and occlusion query       │
//! │  ├── player.rs   - Position, motion intent, move animation  │
//! │  ├── input.rs    - Binding tables and input state           │
//! │  ├── session.rs  - Tick loop and scripted replay            │
//! │  └── events.rs   - Tick-stamped observations                │
//! │                                                             │
//! │  level/          - Text formats (level files, scenarios)    │
//! │  render/         - Snapshot types for the rendering sink    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are 100% deterministic:
//! - Integer lattice arithmetic only; the one fractional value
//!   (animation completion) is consumed by rendering alone
//! - BTree containers for sorted iteration
//! - No system time dependencies; everything is tick-indexed
//!
//! Given the same level and input script, a session produces identical
//! results on any platform.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod level;
pub mod render;

// Re-export commonly used types
pub use crate::core::coord::Coord;
pub use crate::core::rotation::{rotate_components, rotate_dim_index, SPATIAL_DIMS};
pub use crate::game::grid::{Labyrinth, ValidationError};
pub use crate::game::input::{Bindings, InputState, Key};
pub use crate::game::player::{Animation, Motion, Player};
pub use crate::game::session::{
    replay, GameSession, InputEvent, SessionConfig, SessionPhase, TickResult,
};
pub use crate::game::events::GameEvent;
pub use crate::level::{load_level, parse_level, FormatError};
pub use crate::render::{ColorMap, RenderFrame};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;

/// Frames one move animation spans (a third of a second)
pub const MOVE_FRAMES: u32 = TICK_RATE / 3;
