//! Player State and Move Animation
//!
//! The player is a position plus at most one pending motion intent and at
//! most one in-flight animation. Every position commit flows through the
//! session's movement resolution; this module never decides whether a move
//! is legal.

use serde::{Serialize, Deserialize};

use crate::core::coord::Coord;
use crate::core::rotation;

/// A motion intent: one step along one dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motion {
    /// Dimension index the step applies to.
    pub dim: usize,
    /// Signed step, `-1` or `+1`.
    pub step: i32,
}

impl Motion {
    /// Create a motion intent.
    #[inline]
    pub const fn new(dim: usize, step: i32) -> Self {
        Self { dim, step }
    }

    /// The same physical motion after one dimension rotation.
    pub(crate) fn rotated(self, ndim: usize, forward: bool) -> Self {
        Self {
            dim: rotation::rotate_dim_index(self.dim, ndim, forward),
            step: self.step,
        }
    }
}

/// Frame-counted interpolation of a single already-committed move.
///
/// Exists only while the visual transition is in flight; the logical
/// position commits the instant the animation starts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Animation {
    start: Coord,
    motion: Motion,
    frame: u32,
    max_frames: u32,
}

impl Animation {
    fn new(start: Coord, motion: Motion, max_frames: u32) -> Self {
        debug_assert!(max_frames > 0);
        Self {
            start,
            motion,
            frame: 0,
            max_frames,
        }
    }

    /// Advance one frame. Returns `true` once the animation has finished;
    /// the owner must then drop it.
    pub fn iterate(&mut self) -> bool {
        self.frame += 1;
        self.frame >= self.max_frames
    }

    /// Progress of the visual transition, in `[0, 1)` while the animation
    /// is alive. Consumed by rendering only.
    #[inline]
    pub fn completion(&self) -> f32 {
        self.frame as f32 / self.max_frames as f32
    }

    /// Position snapshot taken when the move was dispatched.
    #[inline]
    pub fn start(&self) -> &Coord {
        &self.start
    }

    /// The motion being interpolated.
    #[inline]
    pub fn motion(&self) -> Motion {
        self.motion
    }
}

/// The single player: position, pending intent, in-flight animation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    position: Coord,
    motion: Option<Motion>,
    animation: Option<Animation>,
}

impl Player {
    /// Create a player at a starting position.
    pub fn new(position: Coord) -> Self {
        Self {
            position,
            motion: None,
            animation: None,
        }
    }

    /// Current committed position.
    #[inline]
    pub fn position(&self) -> &Coord {
        &self.position
    }

    /// The pending motion intent, if any.
    #[inline]
    pub fn pending_motion(&self) -> Option<Motion> {
        self.motion
    }

    /// The in-flight animation, if any.
    #[inline]
    pub fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    /// Record a motion intent. Last call wins.
    pub fn set_motion(&mut self, motion: Motion) {
        self.motion = Some(motion);
    }

    /// Clear the pending intent, but only if it is exactly `motion`.
    ///
    /// A stale key-release for some other direction must not cancel the
    /// motion currently held.
    pub fn stop(&mut self, motion: Motion) {
        if self.motion == Some(motion) {
            self.motion = None;
        }
    }

    /// Advance the player's state by one tick.
    ///
    /// An in-flight animation is advanced (and dropped once finished) and
    /// nothing is returned: its move was already dispatched. Otherwise a
    /// pending motion starts a fresh animation from the current position
    /// and the intent is returned exactly once, for the session to resolve.
    pub fn animate(&mut self, max_frames: u32) -> Option<Motion> {
        if let Some(animation) = &mut self.animation {
            if animation.iterate() {
                self.animation = None;
            }
            return None;
        }
        let motion = self.motion?;
        self.animation = Some(Animation::new(self.position.clone(), motion, max_frames));
        Some(motion)
    }

    /// Commit a resolved move. Session-only.
    pub(crate) fn commit_position(&mut self, position: Coord) {
        self.position = position;
    }

    /// Abort the in-flight animation after a rejected move. Session-only.
    pub(crate) fn cancel_animation(&mut self) {
        self.animation = None;
    }

    /// Reindex position and pending intent under one dimension rotation.
    ///
    /// Never called while an animation is in flight; the session defers
    /// rotation until the move lands.
    pub(crate) fn apply_rotation(&mut self, forward: bool) {
        debug_assert!(self.animation.is_none());
        let ndim = self.position.ndim();
        self.position.rotate(forward);
        self.motion = self.motion.map(|m| m.rotated(ndim, forward));
    }
}
