//! Input Bindings and Motion Intake
//!
//! Maps abstract key events onto motion intents, color-dimension selection,
//! the filter toggle and the rotation request. A binding profile is a plain
//! table value; alternate layouts are alternate tables, never alternate
//! behaviors.

use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

use crate::core::rotation::{self, SPATIAL_DIMS};
use crate::game::player::{Motion, Player};

/// Abstract key identifier delivered by the input source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Tab key (right shoulder on a handheld).
    Tab,
    /// Backspace key (left shoulder on a handheld).
    Backspace,
    /// Left control (the A button).
    LeftCtrl,
    /// Left alt (the B button).
    LeftAlt,
    /// Space bar (the X button).
    Space,
    /// Left shift (the Y button).
    LeftShift,
    /// Letter A.
    A,
    /// Letter E.
    E,
    /// Letter S.
    S,
    /// Letter Z.
    Z,
}

/// What a bound key does when pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Step along a spatial axis.
    Move(Motion),
    /// Step along the active color axis.
    ColorMove(i32),
    /// Select the next (or previous) color axis.
    CycleColor(i32),
    /// Filter the display down to the active color axis while held.
    Filter,
    /// Request a dimension rotation.
    Rotate,
}

/// Immutable key-to-action table.
///
/// Profiles are pure data: construct one of the named layouts (or build a
/// map by hand) and hand it to the session config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bindings(BTreeMap<Key, Action>);

impl Bindings {
    /// The handheld-console layout: arrows move, shoulders step through
    /// color layers, A/B select the color axis, X filters, Y rotates.
    pub fn gcw_zero() -> Self {
        let mut table = BTreeMap::new();
        table.insert(Key::Left, Action::Move(Motion::new(0, -1)));
        table.insert(Key::Right, Action::Move(Motion::new(0, 1)));
        table.insert(Key::Up, Action::Move(Motion::new(1, -1)));
        table.insert(Key::Down, Action::Move(Motion::new(1, 1)));
        table.insert(Key::Tab, Action::ColorMove(-1));
        table.insert(Key::Backspace, Action::ColorMove(1));
        table.insert(Key::LeftCtrl, Action::CycleColor(1));
        table.insert(Key::LeftAlt, Action::CycleColor(-1));
        table.insert(Key::Space, Action::Filter);
        table.insert(Key::LeftShift, Action::Rotate);
        Self(table)
    }

    /// AZERTY keyboard layout: arrows and space as in the default, with
    /// the A/E/S/Z letter cluster covering the color actions.
    pub fn azerty() -> Self {
        let mut profile = Self::gcw_zero();
        profile.0.remove(&Key::Tab);
        profile.0.remove(&Key::Backspace);
        profile.0.remove(&Key::LeftCtrl);
        profile.0.remove(&Key::LeftAlt);
        profile.0.insert(Key::S, Action::ColorMove(-1));
        profile.0.insert(Key::Z, Action::ColorMove(1));
        profile.0.insert(Key::E, Action::CycleColor(1));
        profile.0.insert(Key::A, Action::CycleColor(-1));
        Self(profile.0)
    }

    /// Action bound to `key`, if any.
    #[inline]
    pub fn action(&self, key: Key) -> Option<Action> {
        self.0.get(&key).copied()
    }
}

impl Default for Bindings {
    fn default() -> Self {
        Self::gcw_zero()
    }
}

/// Per-session input state: the binding table plus the selection, filter
/// and rotation latches the bound actions operate on.
#[derive(Clone, Debug)]
pub struct InputState {
    bindings: Bindings,
    ndim: usize,
    active_color_dim: usize,
    filtering: bool,
    rotate_requested: bool,
}

impl InputState {
    /// Create input state for a grid of `ndim` dimensions.
    pub fn new(ndim: usize, bindings: Bindings) -> Self {
        debug_assert!(ndim > SPATIAL_DIMS);
        Self {
            bindings,
            ndim,
            active_color_dim: SPATIAL_DIMS,
            filtering: false,
            rotate_requested: false,
        }
    }

    /// The color axis color-motion keys currently act on, in `[2, ndim)`.
    #[inline]
    pub fn active_color_dim(&self) -> usize {
        self.active_color_dim
    }

    /// Is the display filtered down to the active color axis?
    #[inline]
    pub fn filtering(&self) -> bool {
        self.filtering
    }

    /// Has a rotation been requested and not yet executed?
    ///
    /// The latch stays set until the session performs the rotation, so a
    /// request made mid-animation survives the deferral.
    #[inline]
    pub fn rotate_requested(&self) -> bool {
        self.rotate_requested
    }

    /// A key went down: route its action.
    pub fn key_down(&mut self, key: Key, player: &mut Player) {
        if let Some(motion) = self.motion_for(key) {
            player.set_motion(motion);
            return;
        }
        match self.bindings.action(key) {
            Some(Action::CycleColor(step)) => self.cycle_color(step),
            Some(Action::Filter) => self.filtering = true,
            Some(Action::Rotate) => self.rotate_requested = true,
            _ => {}
        }
    }

    /// A key came up: release whatever it was holding.
    pub fn key_up(&mut self, key: Key, player: &mut Player) {
        if let Some(motion) = self.motion_for(key) {
            player.stop(motion);
            return;
        }
        if let Some(Action::Filter) = self.bindings.action(key) {
            self.filtering = false;
        }
    }

    /// Consume the rotation request after the session executed it.
    pub(crate) fn clear_rotate_request(&mut self) {
        self.rotate_requested = false;
    }

    /// Keep the selected color axis pointing at the same physical axis
    /// across a dimension rotation.
    pub(crate) fn apply_rotation(&mut self, forward: bool) {
        self.active_color_dim =
            rotation::rotate_dim_index(self.active_color_dim, self.ndim, forward);
    }

    /// The motion a key maps to, with color motions resolved against the
    /// active color axis.
    fn motion_for(&self, key: Key) -> Option<Motion> {
        match self.bindings.action(key)? {
            Action::Move(motion) => Some(motion),
            Action::ColorMove(step) => Some(Motion::new(self.active_color_dim, step)),
            _ => None,
        }
    }

    fn cycle_color(&mut self, step: i32) {
        let span = (self.ndim - SPATIAL_DIMS) as i32;
        let offset = (self.active_color_dim - SPATIAL_DIMS) as i32;
        self.active_color_dim = SPATIAL_DIMS + (offset + step).rem_euclid(span) as usize;
    }
}
