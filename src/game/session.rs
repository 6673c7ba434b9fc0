//! Session Tick Loop
//!
//! The cooperative loop that owns the grid, the player and the input
//! state. One call to [`GameSession::tick`] performs, in order: the
//! victory check, the input drain, the (possibly deferred) rotation, the
//! animation step with movement resolution, and the render snapshot.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::MOVE_FRAMES;
use crate::core::coord::Coord;
use crate::core::rotation::SPATIAL_DIMS;
use crate::game::events::GameEvent;
use crate::game::grid::Labyrinth;
use crate::game::input::{Bindings, InputState, Key};
use crate::game::player::Player;
use crate::render::RenderFrame;

/// Lifecycle of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Accepting input, resolving moves.
    Running,
    /// Goal reached; sticky until a key press dismisses the session.
    Won,
    /// Terminal. No further ticks are processed.
    Stopped,
}

/// One discrete input event delivered to a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// A key was pressed.
    KeyDown(Key),
    /// A key was released.
    KeyUp(Key),
    /// External quit signal.
    Quit,
}

/// Immutable per-session configuration, built once and passed down.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Key binding profile.
    pub bindings: Bindings,
    /// Frames one move animation spans.
    pub move_frames: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bindings: Bindings::default(),
            move_frames: MOVE_FRAMES,
        }
    }
}

/// What one tick produced.
#[derive(Clone, Debug)]
pub struct TickResult {
    /// Snapshot for the rendering sink.
    pub frame: RenderFrame,
    /// Events generated this tick.
    pub events: Vec<GameEvent>,
}

/// The integrated maze session: grid, player, input, phase.
#[derive(Clone, Debug)]
pub struct GameSession {
    grid: Labyrinth,
    player: Player,
    input: InputState,
    phase: SessionPhase,
    tick: u64,
    rotation: u32,
    config: SessionConfig,
}

impl GameSession {
    /// Start a session on a grid. The player spawns at the all-ones
    /// corner, the conventional entry cell of every level.
    pub fn new(grid: Labyrinth, config: SessionConfig) -> Self {
        let ndim = grid.ndim();
        let input = InputState::new(ndim, config.bindings.clone());
        Self {
            grid,
            player: Player::new(Coord::uniform(ndim, 1)),
            input,
            phase: SessionPhase::Running,
            tick: 0,
            rotation: 0,
            config,
        }
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Ticks processed so far.
    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// The grid (read-only; rotation goes through [`tick`](Self::tick)).
    #[inline]
    pub fn grid(&self) -> &Labyrinth {
        &self.grid
    }

    /// The player (read-only; moves go through [`tick`](Self::tick)).
    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The input state.
    #[inline]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Rotation display counter, in `[0, N-2)`.
    #[inline]
    pub fn rotation(&self) -> u32 {
        self.rotation
    }

    /// Snapshot the current state without advancing it.
    pub fn frame(&self) -> RenderFrame {
        RenderFrame::capture(
            self.tick,
            self.phase == SessionPhase::Won,
            &self.grid,
            &self.player,
            &self.input,
            self.rotation,
        )
    }

    /// Advance the session by one tick, draining `events` into it.
    pub fn tick(&mut self, events: impl IntoIterator<Item = InputEvent>) -> TickResult {
        let mut produced = Vec::new();
        self.tick += 1;

        // 1. Victory check: only between moves, and sticky once reached.
        if self.phase == SessionPhase::Running
            && self.player.animation().is_none()
            && self.player.position() == self.grid.goal()
        {
            self.phase = SessionPhase::Won;
            produced.push(GameEvent::Won { tick: self.tick });
            debug!(tick = self.tick, "goal reached");
        }

        // 2. Drain all queued input.
        for event in events {
            match event {
                InputEvent::Quit => {
                    if self.phase != SessionPhase::Stopped {
                        self.phase = SessionPhase::Stopped;
                        produced.push(GameEvent::Stopped { tick: self.tick });
                    }
                }
                InputEvent::KeyDown(key) => match self.phase {
                    SessionPhase::Running => self.input.key_down(key, &mut self.player),
                    // Any key dismisses a won session.
                    SessionPhase::Won => {
                        self.phase = SessionPhase::Stopped;
                        produced.push(GameEvent::Stopped { tick: self.tick });
                    }
                    SessionPhase::Stopped => {}
                },
                InputEvent::KeyUp(key) => {
                    if self.phase == SessionPhase::Running {
                        self.input.key_up(key, &mut self.player);
                    }
                }
            }
        }

        // 3. Rotation, deferred while a move is mid-flight: permuting axes
        // under an interpolated slide is ill-defined.
        if self.phase == SessionPhase::Running
            && self.input.rotate_requested()
            && self.player.animation().is_none()
        {
            self.rotate(true);
            self.input.clear_rotate_request();
            produced.push(GameEvent::Rotated {
                tick: self.tick,
                forward: true,
                rotation: self.rotation,
            });
        }

        // 4. Animation step and movement resolution.
        if self.phase == SessionPhase::Running {
            if let Some(motion) = self.player.animate(self.config.move_frames) {
                let candidate = self.player.position().offset(motion.dim, motion.step);
                if self.grid.is_free(&candidate) {
                    debug!(tick = self.tick, to = %candidate, "move committed");
                    self.player.commit_position(candidate.clone());
                    produced.push(GameEvent::Moved {
                        tick: self.tick,
                        motion,
                        to: candidate,
                    });
                } else {
                    debug!(tick = self.tick, at = %candidate, "move blocked");
                    self.player.cancel_animation();
                    produced.push(GameEvent::Blocked {
                        tick: self.tick,
                        motion,
                        at: candidate,
                    });
                }
            }
        }

        // 5. Snapshot for the sink.
        TickResult {
            frame: self.frame(),
            events: produced,
        }
    }

    /// Execute one rotation as an indivisible unit: grid, player position,
    /// pending motion and active color axis all permute together.
    fn rotate(&mut self, forward: bool) {
        debug_assert!(self.player.animation().is_none());
        self.grid.rotate(forward);
        self.player.apply_rotation(forward);
        self.input.apply_rotation(forward);
        let span = (self.grid.ndim() - SPATIAL_DIMS) as u32;
        self.rotation = if forward {
            (self.rotation + 1) % span
        } else {
            (self.rotation + span - 1) % span
        };
        debug!(rotation = self.rotation, "dimensions rotated");
    }
}

/// Drive a session from a recorded input script.
///
/// Script entries are `(tick, event)` pairs delivered on the named tick.
/// Runs until the session stops or `max_ticks` elapse; returns the final
/// session and every event generated along the way.
pub fn replay(
    grid: Labyrinth,
    config: SessionConfig,
    script: &[(u64, InputEvent)],
    max_ticks: u64,
) -> (GameSession, Vec<GameEvent>) {
    let mut session = GameSession::new(grid, config);
    let mut produced = Vec::new();

    while session.tick_count() < max_ticks && session.phase() != SessionPhase::Stopped {
        let upcoming = session.tick_count() + 1;
        let events: Vec<InputEvent> = script
            .iter()
            .filter(|(tick, _)| *tick == upcoming)
            .map(|(_, event)| *event)
            .collect();
        let result = session.tick(events);
        produced.extend(result.events);
    }

    (session, produced)
}
