//! Turns game state into a triangle list
//!
//! Draw order is back to front: shadows, walls, paddles, balls, bricks,
//! score pips, then the game-over overlay and tally.

use glam::{UVec2, Vec2};

use super::shapes::{RECT_VERTICES, rectangle};
use super::transform::CourtTransform;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{GameState, Side};

/// Everything the backend needs to draw one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub vertices: Vec<Vertex>,
    pub transform: CourtTransform,
}

impl Frame {
    pub fn triangle_count(&self) -> u32 {
        (self.vertices.len() / 3) as u32
    }
}

fn side_colors(side: Side) -> ([u8; 4], [u8; 4]) {
    match side {
        Side::Left => (colors::LEFT, colors::LEFT_SHADOW),
        Side::Right => (colors::RIGHT, colors::RIGHT_SHADOW),
    }
}

/// Accumulates rectangles into one vertex list
struct Painter {
    vertices: Vec<Vertex>,
}

impl Painter {
    fn rect(&mut self, center: Vec2, radius: Vec2, color: [u8; 4]) {
        self.vertices.extend_from_slice(&rectangle(center, radius, color));
    }
}

/// The four court walls as (center, half-extent); side walls run past the
/// corners so the border closes
fn walls(court: Vec2) -> [(Vec2, Vec2); 4] {
    let side = Vec2::new(WALL_RADIUS, court.y + 2.0 * WALL_RADIUS);
    let cap = Vec2::new(court.x, WALL_RADIUS);
    [
        (Vec2::new(-court.x - WALL_RADIUS, 0.0), side),
        (Vec2::new(court.x + WALL_RADIUS, 0.0), side),
        (Vec2::new(0.0, -court.y - WALL_RADIUS), cap),
        (Vec2::new(0.0, court.y + WALL_RADIUS), cap),
    ]
}

/// Build the vertex list and transform for the current state
pub fn build_frame(state: &GameState, drawable_size: UVec2) -> Frame {
    let tuning = &state.tuning;
    let court = tuning.court_radius;
    let score_radius = Vec2::from(SCORE_RADIUS);
    let shadow = Vec2::new(0.0, -SHADOW_OFFSET);

    let bricks = state.bricks.remaining();
    let mut estimate = 2 * (4 + 2 + 2 + bricks) + state.score as usize;
    if state.is_game_over() {
        estimate += 1 + state.score as usize;
    }
    let mut painter = Painter {
        vertices: Vec::with_capacity(estimate * RECT_VERTICES),
    };

    // Shadows for everything
    for (center, radius) in walls(court) {
        painter.rect(center + shadow, radius, colors::WALL_SHADOW);
    }
    for side in Side::BOTH {
        let (_, shade) = side_colors(side);
        painter.rect(state.paddle(side).pos + shadow, tuning.paddle_radius, shade);
    }
    for side in Side::BOTH {
        let (_, shade) = side_colors(side);
        painter.rect(state.ball(side).pos + shadow, tuning.ball_radius, shade);
    }
    for (row, col, brick) in state.bricks.iter() {
        if let Some(side) = brick.owner() {
            let (_, shade) = side_colors(side);
            painter.rect(state.brick_loc(row, col) + shadow, tuning.brick_radius, shade);
        }
    }

    // Solid objects
    for (center, radius) in walls(court) {
        painter.rect(center, radius, colors::FOREGROUND);
    }
    for side in Side::BOTH {
        let (color, _) = side_colors(side);
        painter.rect(state.paddle(side).pos, tuning.paddle_radius, color);
    }
    for side in Side::BOTH {
        let (color, _) = side_colors(side);
        painter.rect(state.ball(side).pos, tuning.ball_radius, color);
    }
    for (row, col, brick) in state.bricks.iter() {
        if let Some(side) = brick.owner() {
            let (color, _) = side_colors(side);
            painter.rect(state.brick_loc(row, col), tuning.brick_radius, color);
        }
    }

    // Score pips along the top wall
    let pip_y = court.y + 2.0 * WALL_RADIUS + 2.0 * score_radius.y;
    for i in 0..state.score {
        let x = -court.x + (2.0 + 2.0 * i as f32) * (score_radius.x + 0.02);
        painter.rect(Vec2::new(x, pip_y), score_radius, colors::FOREGROUND);
    }

    if state.is_game_over() {
        painter.rect(Vec2::ZERO, court + 2.0 * WALL_RADIUS, colors::SHADE);

        // Final tally: rows of up to ten, centered vertically
        let rows = state.score.div_ceil(TALLY_COLUMNS);
        for n in 0..state.score {
            let (row, col) = ((n / TALLY_COLUMNS) as f32, (n % TALLY_COLUMNS) as f32);
            let center = Vec2::new(
                4.0 * (col - 5.0) * (score_radius.x + 0.03),
                4.0 * (row - rows as f32 / 2.0) * (score_radius.y + 0.05),
            );
            painter.rect(center, 2.0 * score_radius, colors::FOREGROUND);
        }
    }

    Frame {
        vertices: painter.vertices,
        transform: CourtTransform::new(court, drawable_size),
    }
}
