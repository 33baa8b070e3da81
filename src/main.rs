//! Brick Pong headless driver
//!
//! Runs the simulation and scene builder frame by frame with both paddles on
//! autopilot. Pass a tuning JSON file as the first argument to override the
//! default balance.

use brick_pong::consts::FRAME_DT;
use brick_pong::renderer::{HeadlessBackend, draw};
use brick_pong::sim::{GameEvent, GameState, TickInput, tick};
use brick_pong::Tuning;
use glam::UVec2;

/// Give up after ten simulated minutes
const MAX_FRAMES: u64 = 60 * 60 * 10;
const DRAWABLE_SIZE: UVec2 = UVec2::new(1280, 720);

fn load_state() -> Result<GameState, Box<dyn std::error::Error>> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(GameState::new());
    };
    let json = std::fs::read_to_string(&path)?;
    let tuning = Tuning::from_json(&json)?;
    log::info!("Loaded tuning from {}", path);
    Ok(GameState::with_tuning(tuning)?)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brick Pong (headless) starting...");

    let mut state = match load_state() {
        Ok(state) => state,
        Err(e) => {
            log::error!("Could not load tuning: {e}");
            std::process::exit(1);
        }
    };

    let mut backend = HeadlessBackend::new();
    let mut misses = 0u32;
    let mut frame = 0u64;

    while frame < MAX_FRAMES && !state.is_game_over() {
        let input = TickInput::autopilot(&state);
        for event in tick(&mut state, &input, FRAME_DT) {
            if let GameEvent::BackWallMiss { .. } = event {
                misses += 1;
            }
        }
        draw(&state, DRAWABLE_SIZE, &mut backend);
        frame += 1;

        if frame % 600 == 0 {
            log::info!(
                "t={:.0}s score={} bricks left={}",
                frame as f32 * FRAME_DT,
                state.score,
                state.bricks_remaining()
            );
        }
    }

    log::info!(
        "Finished after {} frames: score {}, {} bricks broken, {} misses, {} vertices in last frame",
        frame,
        state.score,
        state.blocks_broken,
        misses,
        backend.vertices.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless driver on the web
}
