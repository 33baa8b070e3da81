//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied elapsed time only
//! - Stable iteration order (row-major grid, left side before right)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, BounceAxis, Deflection, Obstacle, Overlap, ball_box_collision};
pub use state::{Ball, Brick, BrickGrid, GameState, Paddle, Side};
pub use tick::{GameEvent, KeySnapshot, TickInput, tick};
