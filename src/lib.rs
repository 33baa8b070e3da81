//! Brick Pong - two paddles, two balls, one shared brick grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddles, balls, bricks, scoring)
//! - `renderer`: Vertex generation, court-to-clip transform, WebGPU backend
//! - `tuning`: Data-driven game balance

pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Bricks per row and per column
    pub const GRID_SIZE: usize = 8;
    /// Bricks in a fresh grid; breaking all of them ends the game
    pub const TOTAL_BRICKS: u32 = (GRID_SIZE * GRID_SIZE) as u32;

    /// Frame step used by the headless driver (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Half-thickness of the court walls
    pub const WALL_RADIUS: f32 = 0.05;
    /// Drop shadows are drawn this far below their object
    pub const SHADOW_OFFSET: f32 = 0.07;
    /// Gap between the outside of the walls and the edge of the window
    pub const SCENE_PADDING: f32 = 0.14;
    /// Half-extents of one score pip
    pub const SCORE_RADIUS: [f32; 2] = [0.07, 0.1];
    /// Pips per row in the end-of-game tally
    pub const TALLY_COLUMNS: u32 = 10;
}
