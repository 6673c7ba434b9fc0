//! N-Dimensional Lattice Coordinate
//!
//! Ordered tuple of integers, one per dimension. Components are 1-based:
//! a coordinate is inside a grid of extent `s` along a dimension when its
//! component lies in `[1, s]`. Indices 0 and 1 are the spatial axes, every
//! index from 2 up is a color axis.

use std::fmt;
use serde::{Serialize, Deserialize};

use super::rotation::{self, SPATIAL_DIMS};

/// A position (or extent vector) in an N-dimensional lattice.
///
/// Implements `Ord` so coordinates can key a `BTreeSet` with deterministic
/// iteration order.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord(Vec<i32>);

impl Coord {
    /// Create a coordinate from its components.
    #[inline]
    pub fn new(components: Vec<i32>) -> Self {
        Self(components)
    }

    /// Create a coordinate with every component set to `value`.
    #[inline]
    pub fn uniform(ndim: usize, value: i32) -> Self {
        Self(vec![value; ndim])
    }

    /// Number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    /// All components, spatial first.
    #[inline]
    pub fn components(&self) -> &[i32] {
        &self.0
    }

    /// Component along one dimension.
    #[inline]
    pub fn component(&self, dim: usize) -> i32 {
        self.0[dim]
    }

    /// Overwrite the component along one dimension.
    #[inline]
    pub fn set_component(&mut self, dim: usize, value: i32) {
        self.0[dim] = value;
    }

    /// The two spatial components `(x, y)`.
    #[inline]
    pub fn spatial(&self) -> (i32, i32) {
        (self.0[0], self.0[1])
    }

    /// The color components (everything past the spatial axes).
    #[inline]
    pub fn color_components(&self) -> &[i32] {
        &self.0[SPATIAL_DIMS..]
    }

    /// A copy of this coordinate displaced by `step` along `dim`.
    pub fn offset(&self, dim: usize, step: i32) -> Self {
        let mut moved = self.clone();
        moved.0[dim] += step;
        moved
    }

    /// Permute the components under one dimension rotation.
    pub fn rotate(&mut self, forward: bool) {
        rotation::rotate_components(&mut self.0, forward);
    }

    /// Consuming variant of [`rotate`](Self::rotate).
    pub fn rotated(mut self, forward: bool) -> Self {
        self.rotate(forward);
        self
    }
}

impl<const K: usize> From<[i32; K]> for Coord {
    fn from(components: [i32; K]) -> Self {
        Self(components.to_vec())
    }
}

impl std::ops::Index<usize> for Coord {
    type Output = i32;

    #[inline]
    fn index(&self, dim: usize) -> &i32 {
        &self.0[dim]
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
