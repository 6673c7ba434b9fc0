//! Chroma Maze Demo Driver
//!
//! Loads a scenario (or a single level) and runs each maze through a
//! scripted session, logging what happens. Stands in for the interactive
//! front end: same core API, recorded inputs instead of a keyboard.

use std::path::Path;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use chroma_maze::{
    level::{self, scenario::{self, Stage}},
    replay, GameEvent, InputEvent, Key, SessionConfig, SessionPhase,
    MOVE_FRAMES, TICK_RATE, VERSION,
};

/// Tick limit for one scripted maze run.
const MAX_TICKS: u64 = 600;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Chroma Maze v{}", VERSION);
    info!("Tick rate: {} Hz, {} frames per move", TICK_RATE, MOVE_FRAMES);

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "scenario/intro.scn".to_string());
    let path = Path::new(&path);

    if path.extension().is_some_and(|ext| ext == "scn") {
        run_scenario(path)
    } else {
        run_maze(path)
    }
}

/// Dispatch a scenario's stages in order.
fn run_scenario(path: &Path) -> anyhow::Result<()> {
    let stages = scenario::load_scenario(path)
        .with_context(|| format!("loading scenario {}", path.display()))?;
    let root = path
        .parent()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new("."));
    info!("=== Scenario: {} stages ===", stages.len());

    for stage in &stages {
        match stage {
            // Page display belongs to the rendering collaborator; the
            // driver only sequences.
            Stage::Text(_) | Stage::Image(_) => {
                info!("(page) {}", stage.path(root).display());
            }
            Stage::Labyrinth(_) => run_maze(&stage.path(root))?,
        }
    }
    Ok(())
}

/// Load one level and run the scripted demo session on it.
fn run_maze(path: &Path) -> anyhow::Result<()> {
    let lab = level::load_level(path)
        .with_context(|| format!("loading level {}", path.display()))?;
    info!(
        "=== Maze {:?}: {} blocks, goal {} ===",
        lab.size(),
        lab.block_count(),
        lab.goal()
    );

    let script = demo_script(lab.ndim());
    let (session, events) = replay(lab, SessionConfig::default(), &script, MAX_TICKS);

    for event in &events {
        match event {
            GameEvent::Moved { tick, to, .. } => info!("tick {tick}: moved to {to}"),
            GameEvent::Blocked { tick, at, .. } => info!("tick {tick}: bumped into {at}"),
            GameEvent::Rotated { tick, rotation, .. } => {
                info!("tick {tick}: dimensions rotated (counter {rotation})")
            }
            GameEvent::Won { tick } => info!("tick {tick}: reached the goal!"),
            GameEvent::Stopped { tick } => info!("tick {tick}: session over"),
        }
    }

    info!(
        "Finished after {} ticks in phase {:?}",
        session.tick_count(),
        session.phase()
    );
    let frame = session.frame();
    info!("Final frame: {}", serde_json::to_string(&frame)?);
    Ok(())
}

/// The recorded inputs for a demo run: two steps right, two steps down
/// (which solves the bundled pillar level), then a rotation and a color
/// move on levels deep enough to show them off.
fn demo_script(ndim: usize) -> Vec<(u64, InputEvent)> {
    let mut script = Vec::new();
    let mut tick = 1;
    let two_moves = 2 * (MOVE_FRAMES as u64 + 1);

    for key in [Key::Right, Key::Down] {
        script.push((tick, InputEvent::KeyDown(key)));
        tick += two_moves;
        script.push((tick, InputEvent::KeyUp(key)));
        tick += 2;
    }

    if ndim > 3 {
        script.push((tick, InputEvent::KeyDown(Key::LeftShift)));
        script.push((tick + 1, InputEvent::KeyUp(Key::LeftShift)));
        tick += 4;
        script.push((tick, InputEvent::KeyDown(Key::Backspace)));
        tick += MOVE_FRAMES as u64 + 2;
        script.push((tick, InputEvent::KeyUp(Key::Backspace)));
    }

    // Dismiss the victory screen if the walk won, then leave for sure.
    script.push((MAX_TICKS - 200, InputEvent::KeyDown(Key::Space)));
    script.push((MAX_TICKS - 199, InputEvent::KeyUp(Key::Space)));
    script.push((MAX_TICKS - 150, InputEvent::Quit));
    script
}
