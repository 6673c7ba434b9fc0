//! Core deterministic primitives.
//!
//! Pure value types and transforms with no game state attached. Everything
//! here is exact integer arithmetic, so identical inputs give identical
//! results on any platform.

pub mod coord;
pub mod rotation;

// Re-export core types
pub use coord::Coord;
pub use rotation::{rotate_components, rotate_dim_index, SPATIAL_DIMS};
