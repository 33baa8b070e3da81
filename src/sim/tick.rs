//! Per-frame simulation update
//!
//! Advances paddles from input, moves both balls, then resolves paddle,
//! brick and wall collisions in that order.

use glam::Vec2;

use super::collision::{Obstacle, ball_box_collision};
use super::state::{Ball, Brick, GameState, Side};
use crate::tuning::Tuning;

/// Movement keys held during a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySnapshot {
    pub w: bool,
    pub s: bool,
    pub up: bool,
    pub down: bool,
}

/// Paddle commands for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// -1 (down), 0 or +1 (up)
    pub left_paddle: f32,
    /// -1 (down), 0 or +1 (up)
    pub right_paddle: f32,
}

impl TickInput {
    /// W/S drive the left paddle, Up/Down the right one
    pub fn from_keys(keys: &KeySnapshot) -> Self {
        let axis = |pos: bool, neg: bool| f32::from(u8::from(pos)) - f32::from(u8::from(neg));
        Self {
            left_paddle: axis(keys.w, keys.s),
            right_paddle: axis(keys.up, keys.down),
        }
    }

    /// Idle/demo mode: each paddle chases its own ball
    pub fn autopilot(state: &GameState) -> Self {
        // Don't jitter around a ball that is already centered
        let dead_zone = state.tuning.paddle_radius.y * 0.25;
        let steer = |side: Side| {
            let offset = state.ball(side).pos.y - state.paddle(side).pos.y;
            if offset > dead_zone {
                1.0
            } else if offset < -dead_zone {
                -1.0
            } else {
                0.0
            }
        };
        Self {
            left_paddle: steer(Side::Left),
            right_paddle: steer(Side::Right),
        }
    }

    /// Velocity signal for one paddle, clamped to [-1, 1]
    pub fn paddle_velocity(&self, side: Side) -> f32 {
        let raw = match side {
            Side::Left => self.left_paddle,
            Side::Right => self.right_paddle,
        };
        if raw.is_nan() { 0.0 } else { raw.clamp(-1.0, 1.0) }
    }
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PaddleHit { side: Side },
    BrickDestroyed { row: usize, col: usize, side: Side },
    /// A ball reached the wall behind its own paddle
    BackWallMiss { side: Side },
    /// The last brick was broken; the game is now frozen
    BricksCleared,
}

/// Advance the game by `elapsed` seconds.
///
/// Does nothing once every brick has been broken.
pub fn tick(state: &mut GameState, input: &TickInput, elapsed: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.is_game_over() {
        return events;
    }
    let tuning = state.tuning;

    // Paddles
    let (min_y, max_y) = tuning.paddle_y_range();
    for side in Side::BOTH {
        let paddle = &mut state.paddles[side.index()];
        paddle.pos.y += input.paddle_velocity(side) * tuning.paddle_speed * elapsed;
        paddle.pos.y = paddle.pos.y.clamp(min_y, max_y);
    }

    // Balls
    let speed = tuning.effective_ball_speed();
    for ball in &mut state.balls {
        ball.pos += ball.vel * speed * elapsed;
    }

    // Each ball only answers to its own paddle
    for side in Side::BOTH {
        let paddle = Obstacle::paddle(
            state.paddle(side).pos,
            tuning.paddle_radius,
            tuning.paddle_aim_mix,
        );
        if ball_box_collision(state.ball_mut(side), tuning.ball_radius, &paddle).is_some() {
            events.push(GameEvent::PaddleHit { side });
        }
    }

    resolve_bricks(state, &mut events);
    resolve_walls(state, &mut events);

    if state.is_game_over() {
        log::info!("All bricks cleared, final score {}", state.score);
        events.push(GameEvent::BricksCleared);
    }

    events
}

fn brick_vs_ball(tuning: &Tuning, row: usize, col: usize, ball: &mut Ball) -> bool {
    let brick = Obstacle::brick(
        tuning.brick_loc(row, col),
        tuning.brick_radius,
        tuning.brick_hitbox_scale,
    );
    ball_box_collision(ball, tuning.ball_radius, &brick).is_some()
}

/// Two passes over the grid.
///
/// Pass 1 lets each ball destroy at most one brick of its own color (first
/// hit in row-major order), marking it `PendingDelete`. Once a ball has broken
/// a brick it skips the rest of pass 1, bounces included. Pass 2 bounces both
/// balls off every non-empty cell, pending ones included, and only then
/// clears pending cells. A brick therefore still deflects balls during the
/// frame it is destroyed in.
fn resolve_bricks(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let tuning = state.tuning;
    let cells: Vec<(usize, usize)> = state.bricks.iter().map(|(r, c, _)| (r, c)).collect();

    let mut spent = [false; 2];
    for &(row, col) in &cells {
        let Some(side) = state.bricks.get(row, col).and_then(Brick::owner) else {
            continue;
        };
        if spent[side.index()] {
            continue;
        }
        if brick_vs_ball(&tuning, row, col, state.ball_mut(side)) {
            spent[side.index()] = true;
            state.score += 1;
            state.blocks_broken += 1;
            state.bricks.set(row, col, Brick::PendingDelete);
            log::debug!("{side:?} ball broke brick ({row}, {col}), score {}", state.score);
            events.push(GameEvent::BrickDestroyed { row, col, side });
        }
    }

    for &(row, col) in &cells {
        let Some(brick) = state.bricks.get(row, col) else {
            continue;
        };
        if !brick.is_empty() {
            for ball in &mut state.balls {
                brick_vs_ball(&tuning, row, col, ball);
            }
        }
        if brick == Brick::PendingDelete {
            state.bricks.set(row, col, Brick::Empty);
        }
    }
}

/// Keep balls inside the court.
///
/// A ball past a wall is clamped back to it; its velocity only flips if it
/// was still heading into the wall. Reaching the wall behind its own paddle
/// costs a point.
fn resolve_walls(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let limit: Vec2 = state.tuning.court_radius - state.tuning.ball_radius;

    for side in Side::BOTH {
        let ball = &mut state.balls[side.index()];

        if ball.pos.y > limit.y {
            ball.pos.y = limit.y;
            if ball.vel.y > 0.0 {
                ball.vel.y = -ball.vel.y;
            }
        }
        if ball.pos.y < -limit.y {
            ball.pos.y = -limit.y;
            if ball.vel.y < 0.0 {
                ball.vel.y = -ball.vel.y;
            }
        }

        let mut missed = false;
        if ball.pos.x > limit.x {
            ball.pos.x = limit.x;
            if ball.vel.x > 0.0 {
                ball.vel.x = -ball.vel.x;
                missed = side == Side::Right;
            }
        }
        if ball.pos.x < -limit.x {
            ball.pos.x = -limit.x;
            if ball.vel.x < 0.0 {
                ball.vel.x = -ball.vel.x;
                missed = side == Side::Left;
            }
        }

        if missed {
            state.score = state.score.saturating_sub(1);
            log::debug!("{side:?} ball reached its back wall, score {}", state.score);
            events.push(GameEvent::BackWallMiss { side });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FRAME_DT, TOTAL_BRICKS};
    use crate::sim::state::BrickGrid;
    use proptest::prelude::*;

    /// Default game with the balls parked far from everything
    fn quiet_state() -> GameState {
        let mut state = GameState::new();
        state.balls[0] = Ball {
            pos: Vec2::new(-4.0, 4.5),
            vel: Vec2::ZERO,
        };
        state.balls[1] = Ball {
            pos: Vec2::new(4.0, 4.5),
            vel: Vec2::ZERO,
        };
        state
    }

    #[test]
    fn test_keys_to_input() {
        let keys = KeySnapshot {
            w: true,
            s: false,
            up: true,
            down: true,
        };
        let input = TickInput::from_keys(&keys);
        assert_eq!(input.left_paddle, 1.0);
        assert_eq!(input.right_paddle, 0.0);

        let input = TickInput::from_keys(&KeySnapshot {
            down: true,
            ..Default::default()
        });
        assert_eq!(input.right_paddle, -1.0);
    }

    #[test]
    fn test_paddle_moves_and_clamps() {
        let mut state = quiet_state();
        let input = TickInput {
            left_paddle: 1.0,
            right_paddle: -1.0,
        };

        tick(&mut state, &input, 0.1);
        assert!((state.paddle(Side::Left).pos.y - 0.5).abs() < 1e-5);
        assert!((state.paddle(Side::Right).pos.y + 0.5).abs() < 1e-5);

        tick(&mut state, &input, 10.0);
        assert_eq!(state.paddle(Side::Left).pos.y, 4.0);
        assert_eq!(state.paddle(Side::Right).pos.y, -4.0);
    }

    #[test]
    fn test_oversized_input_is_clamped() {
        let mut state = quiet_state();
        let input = TickInput {
            left_paddle: 30.0,
            right_paddle: f32::NAN,
        };
        tick(&mut state, &input, 0.1);
        assert!((state.paddle(Side::Left).pos.y - 0.5).abs() < 1e-5);
        assert_eq!(state.paddle(Side::Right).pos.y, 0.0);
    }

    #[test]
    fn test_ball_bounces_off_paddle() {
        let mut state = GameState::new();
        state.bricks = BrickGrid::empty();
        assert_eq!(state.paddle(Side::Right).pos.x, 6.5);
        state.balls[0] = Ball {
            pos: Vec2::new(-1.0, 0.0),
            vel: Vec2::ZERO,
        };
        state.balls[1] = Ball {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 0.0),
        };

        // Lands the ball at x = 6.35, overlapping the paddle's face
        let events = tick(&mut state, &TickInput::default(), 6.35 / 6.0);

        let ball = state.ball(Side::Right);
        assert!((ball.pos.x - 6.1).abs() < 1e-4);
        assert!(ball.vel.x < 0.0);
        assert!(events.contains(&GameEvent::PaddleHit { side: Side::Right }));
    }

    #[test]
    fn test_brick_destruction() {
        let mut state = quiet_state();
        let center = state.brick_loc(0, 0);
        assert_eq!(state.bricks.get(0, 0), Some(Brick::LeftColor));
        state.balls[0] = Ball {
            pos: center,
            vel: Vec2::new(1.0, 0.0),
        };

        let events = tick(&mut state, &TickInput::default(), 0.0);

        assert_eq!(state.bricks.get(0, 0), Some(Brick::Empty));
        assert_eq!(state.score, 1);
        assert_eq!(state.blocks_broken, 1);
        assert_eq!(state.bricks_remaining(), 63);
        assert!(events.contains(&GameEvent::BrickDestroyed {
            row: 0,
            col: 0,
            side: Side::Left
        }));
    }

    #[test]
    fn test_ball_only_breaks_its_own_color() {
        let mut state = quiet_state();
        // (0, 1) is right-colored; the left ball bounces but doesn't break it
        state.balls[0] = Ball {
            pos: state.brick_loc(0, 1) - Vec2::new(0.0, 0.55),
            vel: Vec2::new(0.0, 1.0),
        };

        tick(&mut state, &TickInput::default(), 0.0);

        assert_eq!(state.bricks.get(0, 1), Some(Brick::RightColor));
        assert_eq!(state.score, 0);
        assert!(state.ball(Side::Left).vel.y < 0.0);
    }

    #[test]
    fn test_one_brick_per_ball_per_frame() {
        let mut state = quiet_state();
        // Corner between (0, 0) and (1, 1), both left-colored
        state.balls[0] = Ball {
            pos: state.brick_loc(0, 0) + state.tuning.brick_radius,
            vel: Vec2::new(1.0, 1.0),
        };

        tick(&mut state, &TickInput::default(), 0.0);

        assert_eq!(state.blocks_broken, 1);
        assert_eq!(state.score, 1);
        assert_eq!(state.bricks.get(0, 0), Some(Brick::Empty));
        assert_eq!(state.bricks.get(1, 1), Some(Brick::LeftColor));
    }

    #[test]
    fn test_destroyed_brick_still_deflects_other_ball() {
        let mut state = quiet_state();
        let center = state.brick_loc(0, 0);
        state.balls[0] = Ball {
            pos: center - Vec2::new(0.3, 0.0),
            vel: Vec2::new(1.0, 0.0),
        };
        // Right ball grazes the same brick from below
        state.balls[1] = Ball {
            pos: center - Vec2::new(0.0, 0.55),
            vel: Vec2::new(0.0, 1.0),
        };

        tick(&mut state, &TickInput::default(), 0.0);

        assert_eq!(state.bricks.get(0, 0), Some(Brick::Empty));
        let right = state.ball(Side::Right);
        assert!(right.vel.y < 0.0);
        assert!((right.pos.y - (center.y - 0.7)).abs() < 1e-5);
    }

    #[test]
    fn test_back_wall_costs_a_point() {
        let mut state = quiet_state();
        state.score = 3;
        state.balls[0] = Ball {
            pos: Vec2::new(-7.3, 3.0),
            vel: Vec2::new(-1.0, 0.0),
        };

        let events = tick(&mut state, &TickInput::default(), 0.0);

        let ball = state.ball(Side::Left);
        assert_eq!(state.score, 2);
        assert!((ball.pos.x - -6.8).abs() < 1e-5);
        assert!(ball.vel.x > 0.0);
        assert!(events.contains(&GameEvent::BackWallMiss { side: Side::Left }));
    }

    #[test]
    fn test_far_wall_is_free() {
        let mut state = quiet_state();
        state.score = 3;
        // Left ball hitting the right wall is a plain bounce
        state.balls[0] = Ball {
            pos: Vec2::new(7.3, 3.0),
            vel: Vec2::new(1.0, 0.0),
        };
        state.balls[1] = Ball {
            pos: Vec2::new(7.3, -3.0),
            vel: Vec2::new(1.0, 0.0),
        };

        tick(&mut state, &TickInput::default(), 0.0);

        assert_eq!(state.score, 2);
        assert!(state.ball(Side::Left).vel.x < 0.0);
    }

    #[test]
    fn test_ball_leaving_wall_is_only_clamped() {
        let mut state = quiet_state();
        state.score = 2;
        // Past the left and top walls but already heading back in
        state.balls[0] = Ball {
            pos: Vec2::new(-7.3, 5.3),
            vel: Vec2::new(1.0, -1.0),
        };

        let events = tick(&mut state, &TickInput::default(), 0.0);

        let ball = state.ball(Side::Left);
        assert!((ball.pos - Vec2::new(-6.8, 4.8)).length() < 1e-5);
        assert_eq!(ball.vel, Vec2::new(1.0, -1.0));
        assert_eq!(state.score, 2);
        assert!(events.is_empty());
    }

    #[test]
    fn test_top_and_bottom_walls_flip_vertical_velocity() {
        let mut state = quiet_state();
        state.score = 2;
        state.balls[0] = Ball {
            pos: Vec2::new(2.0, 5.3),
            vel: Vec2::new(0.5, 1.0),
        };
        state.balls[1] = Ball {
            pos: Vec2::new(-2.0, -5.3),
            vel: Vec2::new(0.0, -1.0),
        };

        let events = tick(&mut state, &TickInput::default(), 0.0);

        let top = state.ball(Side::Left);
        assert!((top.pos.y - 4.8).abs() < 1e-5);
        assert_eq!(top.pos.x, 2.0);
        assert_eq!(top.vel, Vec2::new(0.5, -1.0));

        let bottom = state.ball(Side::Right);
        assert!((bottom.pos.y - -4.8).abs() < 1e-5);
        assert_eq!(bottom.vel, Vec2::new(0.0, 1.0));

        assert_eq!(state.score, 2);
        assert!(events.is_empty());
    }

    #[test]
    fn test_serve_touches_no_brick() {
        let mut state = GameState::new();
        let events = tick(&mut state, &TickInput::default(), 0.0);
        assert!(events.is_empty());
        assert_eq!(state.bricks_remaining(), 64);
        assert_eq!(state.ball(Side::Left).vel, Vec2::new(-1.0, 0.0));
        assert_eq!(state.ball(Side::Right).vel, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_score_never_drops_below_zero() {
        let mut state = quiet_state();
        state.balls[0] = Ball {
            pos: Vec2::new(-7.3, 3.0),
            vel: Vec2::new(-1.0, 0.0),
        };
        state.balls[1] = Ball {
            pos: Vec2::new(7.3, -3.0),
            vel: Vec2::new(1.0, 0.0),
        };

        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_cleared_grid_freezes_state() {
        let mut state = GameState::new();
        state.bricks = BrickGrid::empty();
        state.blocks_broken = TOTAL_BRICKS;
        let frozen = state.clone();

        let input = TickInput {
            left_paddle: 1.0,
            right_paddle: -1.0,
        };
        for _ in 0..10 {
            assert!(tick(&mut state, &input, FRAME_DT).is_empty());
        }
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_last_brick_reports_cleared() {
        let mut state = quiet_state();
        state.bricks = BrickGrid::empty();
        state.bricks.set(0, 0, Brick::LeftColor);
        state.blocks_broken = TOTAL_BRICKS - 1;
        state.balls[0].pos = state.brick_loc(0, 0);

        let events = tick(&mut state, &TickInput::default(), 0.0);

        assert!(state.is_game_over());
        assert_eq!(events.last(), Some(&GameEvent::BricksCleared));
    }

    #[test]
    fn test_autopilot_follows_ball() {
        let mut state = quiet_state();
        state.balls[1].pos.y = -3.0;
        let input = TickInput::autopilot(&state);
        assert_eq!(input.left_paddle, 1.0);
        assert_eq!(input.right_paddle, -1.0);
    }

    fn frame_input() -> impl Strategy<Value = (TickInput, f32)> {
        (-1i8..=1, -1i8..=1, 0.0f32..0.05).prop_map(|(l, r, dt)| {
            (
                TickInput {
                    left_paddle: f32::from(l),
                    right_paddle: f32::from(r),
                },
                dt,
            )
        })
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_every_frame(frames in prop::collection::vec(frame_input(), 1..200)) {
            let mut state = GameState::new();
            let (min_y, max_y) = state.tuning.paddle_y_range();
            let limit = state.tuning.court_radius - state.tuning.ball_radius;

            for (input, dt) in &frames {
                tick(&mut state, input, *dt);

                for side in Side::BOTH {
                    let y = state.paddle(side).pos.y;
                    prop_assert!(y >= min_y && y <= max_y);
                    let ball = state.ball(side).pos;
                    prop_assert!(ball.x.abs() <= limit.x && ball.y.abs() <= limit.y);
                }
                prop_assert!(!state.bricks.has_pending());
                prop_assert_eq!(
                    state.bricks.remaining() as u32 + state.blocks_broken,
                    TOTAL_BRICKS
                );
            }
        }
    }
}
