//! Render Snapshot and Color Mapping
//!
//! The one-way data push towards the rendering collaborator. A
//! [`RenderFrame`] is plain serializable data: the sink gets values, never
//! callbacks into the core. [`ColorMap`] is the explicit resource handle a
//! sink keeps for turning color-axis layers into channel intensities.

use serde::{Serialize, Deserialize};

use crate::core::coord::Coord;
use crate::core::rotation::{self, SPATIAL_DIMS};
use crate::game::grid::Labyrinth;
use crate::game::input::InputState;
use crate::game::player::{Motion, Player};

/// In-flight move data for interpolated drawing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnimationView {
    /// Position the move started from.
    pub start: Coord,
    /// The motion being interpolated.
    pub motion: Motion,
    /// Progress in `[0, 1)`.
    pub completion: f32,
}

/// Player data as the sink sees it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerView {
    /// Committed position.
    pub position: Coord,
    /// In-flight animation, if a move is being smoothed.
    pub animation: Option<AnimationView>,
}

/// One screen column and its topmost visible layers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnView {
    /// Column X, 1-based.
    pub x: i32,
    /// Column Y, 1-based.
    pub y: i32,
    /// Composed occlusion result for the column.
    pub top: Coord,
}

/// Everything a sink needs to draw one tick.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RenderFrame {
    /// Tick this frame snapshots.
    pub tick: u64,
    /// Victory flag; sticky once set.
    pub won: bool,
    /// Current extent vector (changes under rotation).
    pub size: Vec<i32>,
    /// Player position and interpolation data.
    pub player: PlayerView,
    /// Occlusion results for every on-screen column, row-major.
    pub columns: Vec<ColumnView>,
    /// The goal cell.
    pub goal: Coord,
    /// Whether the goal is visible: nothing stacks over it and the player
    /// shares its color coordinates.
    pub goal_visible: bool,
    /// The color axis currently selected for color motion.
    pub active_color_dim: usize,
    /// Filter display down to the active color axis.
    pub filtering: bool,
    /// Rotation display counter, in `[0, N-2)`.
    pub rotation: u32,
}

impl RenderFrame {
    /// Snapshot the session state for the sink.
    pub fn capture(
        tick: u64,
        won: bool,
        grid: &Labyrinth,
        player: &Player,
        input: &InputState,
        rotation: u32,
    ) -> Self {
        let observer = player.position();
        let (width, height) = (grid.size()[0], grid.size()[1]);
        let mut columns = Vec::with_capacity((width * height) as usize);
        for y in 1..=height {
            for x in 1..=width {
                columns.push(ColumnView {
                    x,
                    y,
                    top: grid.full_occlusion(x, y, observer),
                });
            }
        }

        Self {
            tick,
            won,
            size: grid.size().to_vec(),
            player: PlayerView {
                position: observer.clone(),
                animation: player.animation().map(|animation| AnimationView {
                    start: animation.start().clone(),
                    motion: animation.motion(),
                    completion: animation.completion(),
                }),
            },
            columns,
            goal: grid.goal().clone(),
            goal_visible: goal_visible(grid, observer),
            active_color_dim: input.active_color_dim(),
            filtering: input.filtering(),
            rotation,
        }
    }
}

/// The goal shows through only when no layer stacks over it along any
/// color axis and the player shares every one of its color coordinates.
fn goal_visible(grid: &Labyrinth, observer: &Coord) -> bool {
    let goal = grid.goal();
    let (gx, gy) = goal.spatial();
    let at_goal = grid.full_occlusion(gx, gy, observer);
    for dim in SPATIAL_DIMS..grid.ndim() {
        if at_goal.component(dim) >= goal.component(dim)
            || goal.component(dim) != observer.component(dim)
        {
            return false;
        }
    }
    true
}

/// Per-dimension intensity scale for a rendering sink.
///
/// Holds one step per dimension (`255 / extent`), spatial slots included
/// so the whole vector can be permuted alongside the grid on rotation. At
/// most the first three color axes are mapped onto the RGB channels; a
/// sink that wants to visualize more dimensions brings its own policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorMap {
    steps: Vec<i32>,
}

/// Number of color channels a [`ColorMap`] can populate.
pub const COLOR_CHANNELS: usize = 3;

impl ColorMap {
    /// Build the scale for a grid extent vector.
    pub fn new(size: &[i32]) -> Self {
        Self {
            steps: size.iter().map(|&extent| 255 / extent.max(1)).collect(),
        }
    }

    /// Step of one layer along `dim`, in channel units.
    #[inline]
    pub fn step(&self, dim: usize) -> i32 {
        self.steps[dim]
    }

    /// Channel intensities for a color position (the color components of
    /// some coordinate). `filter` masks every channel except the one fed
    /// by the selected axis.
    pub fn color(&self, color_components: &[i32], filter: Option<usize>) -> [u8; 3] {
        let mut rgb = [0u8; 3];
        for (channel, &layer) in color_components.iter().take(COLOR_CHANNELS).enumerate() {
            let dim = SPATIAL_DIMS + channel;
            if filter.is_some_and(|selected| selected != dim) {
                continue;
            }
            rgb[channel] = (self.steps[dim] * layer).clamp(0, 255) as u8;
        }
        rgb
    }

    /// Color of a player mid-move along a color axis: the start cell's
    /// color nudged by the travelled fraction of one layer step.
    pub fn interpolated(
        &self,
        start_colors: &[i32],
        motion: Motion,
        completion: f32,
        filter: Option<usize>,
    ) -> [u8; 3] {
        let mut rgb = self.color(start_colors, filter);
        if motion.dim >= SPATIAL_DIMS {
            let channel = motion.dim - SPATIAL_DIMS;
            if channel < COLOR_CHANNELS {
                let travelled = (completion * self.steps[motion.dim] as f32) as i32 * motion.step;
                rgb[channel] = (rgb[channel] as i32 + travelled).clamp(0, 255) as u8;
            }
        }
        rgb
    }

    /// Permute the scale alongside a grid rotation.
    pub fn rotate(&mut self, forward: bool) {
        rotation::rotate_components(&mut self.steps, forward);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_scales_layers_per_axis() {
        // size (3, 3, 2, 4): steps 127 and 63 on the color axes
        let map = ColorMap::new(&[3, 3, 2, 4]);
        assert_eq!(map.color(&[1, 1], None), [127, 63, 0]);
        assert_eq!(map.color(&[2, 4], None), [254, 252, 0]);
        assert_eq!(map.color(&[0, 0], None), [0, 0, 0]);
    }

    #[test]
    fn test_filter_masks_other_channels() {
        let map = ColorMap::new(&[3, 3, 2, 4]);
        assert_eq!(map.color(&[2, 4], Some(2)), [254, 0, 0]);
        assert_eq!(map.color(&[2, 4], Some(3)), [0, 252, 0]);
    }

    #[test]
    fn test_interpolated_moves_one_channel() {
        let map = ColorMap::new(&[3, 3, 2]);
        // One layer is 127 units; half a layer up from layer 1.
        let rgb = map.interpolated(&[1], Motion::new(2, 1), 0.5, None);
        assert_eq!(rgb, [127 + 63, 0, 0]);
        let rgb = map.interpolated(&[1], Motion::new(2, -1), 0.5, None);
        assert_eq!(rgb, [127 - 63, 0, 0]);
    }

    #[test]
    fn test_interpolated_clamps_at_channel_bounds() {
        let map = ColorMap::new(&[3, 3, 2]);
        let rgb = map.interpolated(&[2], Motion::new(2, 1), 0.99, None);
        assert_eq!(rgb, [255, 0, 0]);
    }

    #[test]
    fn test_spatial_motion_does_not_touch_color() {
        let map = ColorMap::new(&[3, 3, 2]);
        let rgb = map.interpolated(&[1], Motion::new(0, 1), 0.5, None);
        assert_eq!(rgb, map.color(&[1], None));
    }

    #[test]
    fn test_rotate_follows_the_grid() {
        let mut map = ColorMap::new(&[3, 3, 2, 4]);
        map.rotate(true);
        assert_eq!(map, ColorMap::new(&[3, 3, 4, 2]));
        map.rotate(false);
        assert_eq!(map, ColorMap::new(&[3, 3, 2, 4]));
    }

    #[test]
    fn test_dimensions_beyond_rgb_are_ignored() {
        let map = ColorMap::new(&[2, 2, 2, 2, 2, 2, 2]);
        let rgb = map.color(&[1, 1, 1, 1, 1], None);
        assert_eq!(rgb, [127, 127, 127]);
    }
}
