//! Labyrinth Grid
//!
//! Sparse N-dimensional occupancy grid. Owns the extent vector, the set of
//! occupied cells and the single goal cell, and answers the occlusion query
//! that tells a rendering sink which stacked layer is visible at a screen
//! column. Uses a BTreeSet so iteration order is deterministic.

use std::collections::BTreeSet;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::coord::Coord;
use crate::core::rotation::{self, SPATIAL_DIMS};

/// Grid invariant violated at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Fewer than three dimensions were declared.
    #[error("a labyrinth needs at least 3 dimensions, got {0}")]
    TooFewDimensions(usize),

    /// A dimension was declared with a non-positive extent.
    #[error("dimension {dim} has non-positive size {size}")]
    BadDimensionSize {
        /// Index of the offending dimension.
        dim: usize,
        /// The declared extent.
        size: i32,
    },

    /// An occupied cell has the wrong number of components.
    #[error("block {block} has {got} components, expected {expected}")]
    WrongBlockLength {
        /// The offending cell.
        block: Coord,
        /// Its component count.
        got: usize,
        /// The declared dimension count.
        expected: usize,
    },

    /// An occupied cell lies outside the declared bounds.
    #[error("block {0} is not within the labyrinth")]
    BlockOutOfBounds(Coord),

    /// The goal lies outside the declared bounds.
    #[error("goal {0} is not within the labyrinth")]
    GoalOutOfBounds(Coord),

    /// The goal cell is occupied.
    #[error("block at goal position {0}")]
    GoalOccupied(Coord),
}

/// Sparse N-dimensional maze: bounds, occupied cells and one goal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labyrinth {
    size: Vec<i32>,
    occupied: BTreeSet<Coord>,
    goal: Coord,
}

impl Labyrinth {
    /// Build a labyrinth and check every invariant.
    ///
    /// Fails when fewer than three dimensions are declared, a dimension has
    /// a non-positive extent, a block has the wrong length or lies out of
    /// bounds, or the goal is out of bounds or occupied.
    pub fn new(size: Vec<i32>, blocks: Vec<Coord>, goal: Coord) -> Result<Self, ValidationError> {
        let ndim = size.len();
        if ndim < SPATIAL_DIMS + 1 {
            return Err(ValidationError::TooFewDimensions(ndim));
        }
        for (dim, &extent) in size.iter().enumerate() {
            if extent < 1 {
                return Err(ValidationError::BadDimensionSize { dim, size: extent });
            }
        }

        let lab = Self {
            size,
            occupied: blocks.iter().cloned().collect(),
            goal,
        };

        for block in &blocks {
            if block.ndim() != ndim {
                return Err(ValidationError::WrongBlockLength {
                    block: block.clone(),
                    got: block.ndim(),
                    expected: ndim,
                });
            }
            if !lab.is_within(block) {
                return Err(ValidationError::BlockOutOfBounds(block.clone()));
            }
        }
        if !lab.is_within(&lab.goal) {
            return Err(ValidationError::GoalOutOfBounds(lab.goal.clone()));
        }
        if lab.occupied.contains(&lab.goal) {
            return Err(ValidationError::GoalOccupied(lab.goal.clone()));
        }

        Ok(lab)
    }

    /// Number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.size.len()
    }

    /// Extent along every dimension.
    #[inline]
    pub fn size(&self) -> &[i32] {
        &self.size
    }

    /// The unique goal cell.
    #[inline]
    pub fn goal(&self) -> &Coord {
        &self.goal
    }

    /// Number of occupied cells.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.occupied.len()
    }

    /// Iterate the occupied cells in deterministic order.
    pub fn blocks(&self) -> impl Iterator<Item = &Coord> {
        self.occupied.iter()
    }

    /// Is `pos` inside the bounds? Every component must lie in `[1, size]`.
    pub fn is_within(&self, pos: &Coord) -> bool {
        if pos.ndim() != self.ndim() {
            return false;
        }
        pos.components()
            .iter()
            .zip(&self.size)
            .all(|(&c, &extent)| c >= 1 && c <= extent)
    }

    /// Is `pos` inside the bounds and unoccupied?
    pub fn is_free(&self, pos: &Coord) -> bool {
        self.is_within(pos) && !self.occupied.contains(pos)
    }

    /// Is `pos` an occupied cell?
    #[inline]
    pub fn is_occupied(&self, pos: &Coord) -> bool {
        self.occupied.contains(pos)
    }

    /// Visible layer along color axis `dim` at screen column `(x, y)`.
    ///
    /// The observer contributes its color components; the probe cell is the
    /// column at the observer's color position. From a free probe cell the
    /// scan walks down to the first obstruction and returns its layer, or 0
    /// when only bare floor lies beneath. From an obstructed probe cell the
    /// scan walks up to the first opening and returns the layer just below
    /// it, or `size[dim]` when the column is solid to the ceiling.
    pub fn occlusion_height(&self, x: i32, y: i32, observer: &Coord, dim: usize) -> i32 {
        debug_assert!(dim >= SPATIAL_DIMS && dim < self.ndim());
        let mut probe = observer.clone();
        probe.set_component(0, x);
        probe.set_component(1, y);

        if self.is_free(&probe) {
            let below = probe.component(dim) - 1;
            for layer in (1..=below).rev() {
                probe.set_component(dim, layer);
                if !self.is_free(&probe) {
                    return layer;
                }
            }
            0
        } else {
            let above = probe.component(dim) + 1;
            for layer in above..=self.size[dim] {
                probe.set_component(dim, layer);
                if self.is_free(&probe) {
                    return layer - 1;
                }
            }
            self.size[dim]
        }
    }

    /// The composed topmost-visible coordinate at screen column `(x, y)`.
    ///
    /// Spatial components are the column itself; every color component is
    /// the [`occlusion_height`](Self::occlusion_height) along that axis.
    pub fn full_occlusion(&self, x: i32, y: i32, observer: &Coord) -> Coord {
        let mut top = Coord::new(self.size.clone());
        top.set_component(0, x);
        top.set_component(1, y);
        for dim in SPATIAL_DIMS..self.ndim() {
            top.set_component(dim, self.occlusion_height(x, y, observer, dim));
        }
        top
    }

    /// Apply one dimension rotation to the whole grid.
    ///
    /// Permutes the extent vector, every occupied cell and the goal with
    /// the same transform. A bijection on cells: nothing gained or lost.
    pub fn rotate(&mut self, forward: bool) {
        let cells = self.occupied.len();
        rotation::rotate_components(&mut self.size, forward);
        self.occupied = std::mem::take(&mut self.occupied)
            .into_iter()
            .map(|cell| cell.rotated(forward))
            .collect();
        self.goal.rotate(forward);
        debug_assert_eq!(self.occupied.len(), cells);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn lab_3x3x2() -> Labyrinth {
        Labyrinth::new(
            vec![3, 3, 2],
            vec![Coord::from([2, 2, 1])],
            Coord::from([3, 3, 1]),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_too_few_dimensions() {
        let err = Labyrinth::new(vec![3, 3], vec![], Coord::from([1, 1])).unwrap_err();
        assert_eq!(err, ValidationError::TooFewDimensions(2));
    }

    #[test]
    fn test_rejects_non_positive_extent() {
        let err = Labyrinth::new(vec![3, 0, 2], vec![], Coord::from([1, 1, 1])).unwrap_err();
        assert_eq!(err, ValidationError::BadDimensionSize { dim: 1, size: 0 });
    }

    #[test]
    fn test_rejects_wrong_block_length() {
        let err = Labyrinth::new(
            vec![3, 3, 2],
            vec![Coord::from([2, 2])],
            Coord::from([3, 3, 1]),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::WrongBlockLength { got: 2, expected: 3, .. }));
    }

    #[test]
    fn test_rejects_block_out_of_bounds() {
        let err = Labyrinth::new(
            vec![3, 3, 2],
            vec![Coord::from([4, 1, 1])],
            Coord::from([3, 3, 1]),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::BlockOutOfBounds(Coord::from([4, 1, 1])));
    }

    #[test]
    fn test_rejects_goal_out_of_bounds() {
        let err = Labyrinth::new(vec![3, 3, 2], vec![], Coord::from([0, 1, 1])).unwrap_err();
        assert_eq!(err, ValidationError::GoalOutOfBounds(Coord::from([0, 1, 1])));
    }

    #[test]
    fn test_rejects_occupied_goal() {
        let err = Labyrinth::new(
            vec![3, 3, 2],
            vec![Coord::from([3, 3, 1])],
            Coord::from([3, 3, 1]),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::GoalOccupied(Coord::from([3, 3, 1])));
    }

    #[test]
    fn test_is_free_matches_within_and_occupancy() {
        let lab = lab_3x3x2();
        assert!(lab.is_free(&Coord::from([1, 1, 1])));
        assert!(!lab.is_free(&Coord::from([2, 2, 1])));
        assert!(!lab.is_free(&Coord::from([0, 1, 1])));
        assert!(!lab.is_free(&Coord::from([1, 4, 1])));
        // goal is free by construction
        assert!(lab.is_free(lab.goal()));
    }

    #[test]
    fn test_occlusion_from_free_cell_scans_down() {
        // Observer floats at layer 1 over an empty column: bare floor.
        let lab = Labyrinth::new(
            vec![3, 3, 2],
            vec![Coord::from([1, 1, 2])],
            Coord::from([3, 3, 1]),
        )
        .unwrap();
        let observer = Coord::from([2, 2, 1]);
        assert_eq!(lab.occlusion_height(1, 1, &observer, 2), 0);
        assert_eq!(lab.occlusion_height(3, 3, &observer, 2), 0);
    }

    #[test]
    fn test_occlusion_from_occupied_cell_scans_up() {
        // Observer at layer 2 sits inside the block at (1,1,2): the scan
        // up runs off the ceiling, so the whole column reads solid.
        let lab = Labyrinth::new(
            vec![3, 3, 2],
            vec![Coord::from([1, 1, 2])],
            Coord::from([3, 3, 1]),
        )
        .unwrap();
        let observer = Coord::from([2, 2, 2]);
        assert_eq!(lab.occlusion_height(1, 1, &observer, 2), 2);
    }

    #[test]
    fn test_occlusion_finds_first_obstruction_below() {
        let lab = Labyrinth::new(
            vec![2, 2, 4],
            vec![Coord::from([1, 1, 2])],
            Coord::from([2, 2, 1]),
        )
        .unwrap();
        // Observer at layer 4, column (1,1) free there; layer 2 is the
        // first obstruction on the way down.
        let observer = Coord::from([2, 2, 4]);
        assert_eq!(lab.occlusion_height(1, 1, &observer, 2), 2);
    }

    #[test]
    fn test_occlusion_surfaces_a_buried_observer() {
        // Stack occupying layers 1..=3 of column (1,1); observer buried at
        // layer 1 sees the stack's surface at 3, not the ceiling.
        let blocks = vec![
            Coord::from([1, 1, 1]),
            Coord::from([1, 1, 2]),
            Coord::from([1, 1, 3]),
        ];
        let lab = Labyrinth::new(vec![2, 2, 4], blocks, Coord::from([2, 2, 1])).unwrap();
        let observer = Coord::from([2, 2, 1]);
        assert_eq!(lab.occlusion_height(1, 1, &observer, 2), 3);
    }

    #[test]
    fn test_occlusion_solid_column_reads_full_extent() {
        let blocks = (1..=4).map(|layer| Coord::from([1, 1, layer])).collect();
        let lab = Labyrinth::new(vec![2, 2, 4], blocks, Coord::from([2, 2, 1])).unwrap();
        let observer = Coord::from([2, 2, 2]);
        assert_eq!(lab.occlusion_height(1, 1, &observer, 2), 4);
    }

    #[test]
    fn test_full_occlusion_composes_color_axes() {
        let lab = Labyrinth::new(
            vec![3, 3, 2, 3],
            vec![Coord::from([1, 1, 2, 2])],
            Coord::from([3, 3, 1, 1]),
        )
        .unwrap();
        let observer = Coord::from([2, 2, 2, 3]);
        let top = lab.full_occlusion(1, 1, &observer);
        assert_eq!(top.spatial(), (1, 1));
        // dim 2: free at layer 2, nothing below -> 0
        assert_eq!(top.component(2), 0);
        // dim 3: free at layer 3, block at layer 2 -> 2
        assert_eq!(top.component(3), 2);
    }

    #[test]
    fn test_rotate_permutes_size_blocks_and_goal() {
        let mut lab = Labyrinth::new(
            vec![3, 4, 2, 5],
            vec![Coord::from([1, 2, 1, 4])],
            Coord::from([3, 4, 2, 5]),
        )
        .unwrap();
        lab.rotate(true);
        assert_eq!(lab.size(), &[3, 4, 5, 2]);
        assert!(lab.is_occupied(&Coord::from([1, 2, 4, 1])));
        assert_eq!(lab.goal(), &Coord::from([3, 4, 5, 2]));
        assert_eq!(lab.block_count(), 1);
    }

    #[test]
    fn test_rotate_backward_inverts_forward() {
        let original = lab_3x3x2();
        let mut lab = original.clone();
        lab.rotate(true);
        lab.rotate(false);
        assert_eq!(lab, original);
    }

    #[test]
    fn test_rotation_cycles_after_n_minus_2_steps() {
        let original = Labyrinth::new(
            vec![3, 3, 2, 4, 5],
            vec![Coord::from([1, 1, 2, 3, 4]), Coord::from([2, 3, 1, 4, 1])],
            Coord::from([3, 3, 2, 4, 5]),
        )
        .unwrap();
        let mut lab = original.clone();
        for _ in 0..original.ndim() - 2 {
            lab.rotate(true);
        }
        assert_eq!(lab, original);
    }

    proptest! {
        #[test]
        fn prop_rotation_preserves_occupancy_through_a_cycle(
            cells in proptest::collection::btree_set(
                proptest::collection::vec(1i32..=3, 4),
                0..20,
            )
        ) {
            let blocks: Vec<Coord> = cells
                .into_iter()
                .map(Coord::new)
                .filter(|c| c != &Coord::from([1, 1, 1, 1]))
                .collect();
            let original = Labyrinth::new(
                vec![3, 3, 3, 3],
                blocks,
                Coord::from([1, 1, 1, 1]),
            ).unwrap();

            let mut lab = original.clone();
            lab.rotate(true);
            prop_assert_eq!(lab.block_count(), original.block_count());
            lab.rotate(false);
            prop_assert_eq!(&lab, &original);
            lab.rotate(true);
            lab.rotate(true);
            prop_assert_eq!(&lab, &original);
        }
    }
}
