//! Data-driven game balance
//!
//! Every gameplay dimension and speed lives here so a session can be
//! reconfigured from JSON without touching the simulation.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::GRID_SIZE;
use crate::sim::Side;

/// Why a tuning could not be used
#[derive(Debug)]
pub enum TuningError {
    /// Input was not valid tuning JSON
    Json(serde_json::Error),
    /// A size or speed that must be strictly positive was not
    NonPositive { field: &'static str, value: f32 },
    /// A factor fell outside (0, 1]
    OutOfRange { field: &'static str, value: f32 },
    /// An object would not fit inside the court
    DoesNotFit { what: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid tuning JSON: {err}"),
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive and finite, got {value}")
            }
            Self::OutOfRange { field, value } => {
                write!(f, "{field} must be in (0, 1], got {value}")
            }
            Self::DoesNotFit { what } => write!(f, "{what} does not fit inside the court"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Game balance parameters (all lengths are half-extents in court units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playable area, centered on the origin
    pub court_radius: Vec2,
    pub paddle_radius: Vec2,
    /// Distance from each side wall to its paddle's center
    pub paddle_inset: f32,
    /// Shared by both balls
    pub ball_radius: Vec2,
    pub brick_radius: Vec2,
    /// X of the first brick column's center
    pub brick_grid_left: f32,
    /// Gap between a freshly served ball and its paddle's face
    pub serve_gap: f32,
    /// Paddle travel per second at full input
    pub paddle_speed: f32,
    /// Ball speed multiplier
    pub ball_speed: f32,
    /// Upper bound on `ball_speed` (balls tunnel through paddles above this)
    pub ball_speed_cap: f32,
    /// How strongly a side hit re-aims the ball by its offset from paddle center
    pub paddle_aim_mix: f32,
    /// Brick boxes are shrunk by this factor when detecting hits
    pub brick_hitbox_scale: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            court_radius: Vec2::new(7.0, 5.0),
            paddle_radius: Vec2::new(0.2, 1.0),
            paddle_inset: 0.5,
            ball_radius: Vec2::new(0.2, 0.2),
            brick_radius: Vec2::new(0.25, 0.5),
            brick_grid_left: 1.0,
            serve_gap: 0.6,
            paddle_speed: 5.0,
            ball_speed: 6.0,
            ball_speed_cap: 10.0,
            paddle_aim_mix: 0.75,
            brick_hitbox_scale: 0.95,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every dimension is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let extents = [
            ("court_radius.x", self.court_radius.x),
            ("court_radius.y", self.court_radius.y),
            ("paddle_radius.x", self.paddle_radius.x),
            ("paddle_radius.y", self.paddle_radius.y),
            ("ball_radius.x", self.ball_radius.x),
            ("ball_radius.y", self.ball_radius.y),
            ("brick_radius.x", self.brick_radius.x),
            ("brick_radius.y", self.brick_radius.y),
            ("serve_gap", self.serve_gap),
            ("paddle_speed", self.paddle_speed),
            ("ball_speed", self.ball_speed),
            ("ball_speed_cap", self.ball_speed_cap),
        ];
        for (field, value) in extents {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::NonPositive { field, value });
            }
        }

        for (field, value) in [
            ("paddle_aim_mix", self.paddle_aim_mix),
            ("brick_hitbox_scale", self.brick_hitbox_scale),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(TuningError::OutOfRange { field, value });
            }
        }

        if self.paddle_radius.y > self.court_radius.y
            || self.paddle_inset < self.paddle_radius.x
            || self.paddle_inset > self.court_radius.x
        {
            return Err(TuningError::DoesNotFit { what: "paddle" });
        }
        if self.ball_radius.x > self.court_radius.x || self.ball_radius.y > self.court_radius.y {
            return Err(TuningError::DoesNotFit { what: "ball" });
        }
        let (grid_min, grid_max) = self.brick_grid_bounds();
        if !(grid_min.is_finite() && grid_max.is_finite())
            || grid_min.x < -self.court_radius.x
            || grid_max.x > self.court_radius.x
            || grid_max.y > self.court_radius.y
        {
            return Err(TuningError::DoesNotFit { what: "brick grid" });
        }
        for side in Side::BOTH {
            let serve = self.serve_position(side);
            let in_court = serve.x.abs() + self.ball_radius.x <= self.court_radius.x;
            let clear_of_grid = serve.x + self.ball_radius.x < grid_min.x
                || serve.x - self.ball_radius.x > grid_max.x;
            if !in_court || !clear_of_grid {
                return Err(TuningError::DoesNotFit { what: "serve" });
            }
        }

        Ok(())
    }

    /// Fixed x position of a paddle, against its own side wall
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => -self.court_radius.x + self.paddle_inset,
            Side::Right => self.court_radius.x - self.paddle_inset,
        }
    }

    /// Where a side's ball starts: level with the court center, `serve_gap`
    /// in front of its own paddle
    pub fn serve_position(&self, side: Side) -> Vec2 {
        let offset = self.paddle_radius.x + self.serve_gap + self.ball_radius.x;
        let x = match side {
            Side::Left => self.paddle_x(side) + offset,
            Side::Right => self.paddle_x(side) - offset,
        };
        Vec2::new(x, 0.0)
    }

    /// Range a paddle center may occupy vertically
    pub fn paddle_y_range(&self) -> (f32, f32) {
        let limit = self.court_radius.y - self.paddle_radius.y;
        (-limit, limit)
    }

    /// Center of brick (row, col); rows run bottom to top.
    ///
    /// x = brick_grid_left + 2·col·r.x, y = 2·(row − 3.5)·r.y
    pub fn brick_loc(&self, row: usize, col: usize) -> Vec2 {
        debug_assert!(row < GRID_SIZE && col < GRID_SIZE);
        let mid = (GRID_SIZE as f32 - 1.0) / 2.0;
        Vec2::new(
            self.brick_grid_left + 2.0 * col as f32 * self.brick_radius.x,
            2.0 * (row as f32 - mid) * self.brick_radius.y,
        )
    }

    /// Outer corners of the brick grid (full brick extents, not hitboxes)
    pub fn brick_grid_bounds(&self) -> (Vec2, Vec2) {
        let last = GRID_SIZE - 1;
        (
            self.brick_loc(0, 0) - self.brick_radius,
            self.brick_loc(last, last) + self.brick_radius,
        )
    }

    /// Speed multiplier applied to ball velocities.
    ///
    /// The cap never engages with the default multiplier; it guards retuned
    /// speeds against tunneling.
    pub fn effective_ball_speed(&self) -> f32 {
        self.ball_speed.min(self.ball_speed_cap)
    }
}
