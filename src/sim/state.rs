//! Game state and core simulation types
//!
//! One `GameState` owns everything that changes between frames. The
//! simulation mutates it; the renderer only reads it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::{Tuning, TuningError};

/// Which player an object belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Both sides, in update order
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// State of one brick grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Brick {
    #[default]
    Empty,
    LeftColor,
    RightColor,
    /// Destroyed this frame, cleared before the frame ends
    PendingDelete,
}

impl Brick {
    /// The side whose ball can destroy this brick
    pub fn owner(self) -> Option<Side> {
        match self {
            Brick::LeftColor => Some(Side::Left),
            Brick::RightColor => Some(Side::Right),
            Brick::Empty | Brick::PendingDelete => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Brick::Empty
    }
}

/// Fixed 8x8 grid of bricks, indexed `[row][col]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrickGrid {
    cells: [[Brick; GRID_SIZE]; GRID_SIZE],
}

impl Default for BrickGrid {
    fn default() -> Self {
        Self::checkerboard()
    }
}

impl BrickGrid {
    /// Alternating colors: even `row + col` is left-colored
    pub fn checkerboard() -> Self {
        let mut cells = [[Brick::Empty; GRID_SIZE]; GRID_SIZE];
        for (row, line) in cells.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                *cell = if (row + col) % 2 == 0 {
                    Brick::LeftColor
                } else {
                    Brick::RightColor
                };
            }
        }
        Self { cells }
    }

    /// A grid with no bricks left in it
    pub fn empty() -> Self {
        Self {
            cells: [[Brick::Empty; GRID_SIZE]; GRID_SIZE],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Brick> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Overwrite a cell; returns false if the index is off the grid
    pub fn set(&mut self, row: usize, col: usize, brick: Brick) -> bool {
        match self.cells.get_mut(row).and_then(|line| line.get_mut(col)) {
            Some(cell) => {
                *cell = brick;
                true
            }
            None => false,
        }
    }

    /// All cells in row-major order as `(row, col, brick)`
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Brick)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .map(move |(col, brick)| (row, col, *brick))
        })
    }

    /// Cells that still hold a colored brick
    pub fn remaining(&self) -> usize {
        self.iter().filter(|(_, _, b)| b.owner().is_some()).count()
    }

    pub fn has_pending(&self) -> bool {
        self.iter().any(|(_, _, b)| b == Brick::PendingDelete)
    }
}

/// A paddle; only `pos.y` moves, x stays against its wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
}

/// A ball entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Direction scaled by the tuning's speed multiplier each frame
    pub vel: Vec2,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    /// Indexed by `Side::index`
    pub paddles: [Paddle; 2],
    /// Indexed by `Side::index`
    pub balls: [Ball; 2],
    pub bricks: BrickGrid,
    pub score: u32,
    pub blocks_broken: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh game with default tuning
    pub fn new() -> Self {
        Self::from_valid_tuning(Tuning::default())
    }

    /// Fresh game with custom tuning
    pub fn with_tuning(tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::from_valid_tuning(tuning))
    }

    fn from_valid_tuning(tuning: Tuning) -> Self {
        log::info!(
            "New game: court {:?}, {} bricks",
            tuning.court_radius,
            TOTAL_BRICKS
        );
        Self {
            paddles: Side::BOTH.map(|side| Paddle {
                pos: Vec2::new(tuning.paddle_x(side), 0.0),
            }),
            balls: [
                Ball {
                    pos: tuning.serve_position(Side::Left),
                    vel: Vec2::new(-1.0, 0.0),
                },
                Ball {
                    pos: tuning.serve_position(Side::Right),
                    vel: Vec2::new(1.0, 0.0),
                },
            ],
            bricks: BrickGrid::checkerboard(),
            score: 0,
            blocks_broken: 0,
            tuning,
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        &self.paddles[side.index()]
    }

    pub fn ball(&self, side: Side) -> &Ball {
        &self.balls[side.index()]
    }

    pub fn ball_mut(&mut self, side: Side) -> &mut Ball {
        &mut self.balls[side.index()]
    }

    /// Every brick has been broken; the simulation is frozen
    pub fn is_game_over(&self) -> bool {
        self.blocks_broken >= TOTAL_BRICKS
    }

    pub fn bricks_remaining(&self) -> usize {
        self.bricks.remaining()
    }

    /// Center of brick (row, col)
    pub fn brick_loc(&self, row: usize, col: usize) -> Vec2 {
        self.tuning.brick_loc(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_grid_is_checkerboard() {
        let grid = BrickGrid::checkerboard();
        assert_eq!(grid.get(0, 0), Some(Brick::LeftColor));
        assert_eq!(grid.get(0, 1), Some(Brick::RightColor));
        for (row, col, brick) in grid.iter() {
            let expected = if (row + col) % 2 == 0 {
                Brick::LeftColor
            } else {
                Brick::RightColor
            };
            assert_eq!(brick, expected, "cell ({row}, {col})");
        }
        assert_eq!(grid.remaining(), 64);
        assert!(!grid.has_pending());
    }

    #[test]
    fn test_grid_rejects_out_of_range() {
        let mut grid = BrickGrid::checkerboard();
        assert_eq!(grid.get(GRID_SIZE, 0), None);
        assert_eq!(grid.get(0, GRID_SIZE), None);
        assert!(!grid.set(GRID_SIZE, 3, Brick::Empty));
        assert!(grid.set(7, 7, Brick::Empty));
        assert_eq!(grid.remaining(), 63);
    }

    #[test]
    fn test_iter_is_row_major() {
        let grid = BrickGrid::empty();
        let order: Vec<_> = grid.iter().take(3).map(|(r, c, _)| (r, c)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn test_new_game_layout() {
        let state = GameState::new();
        assert_eq!(state.score, 0);
        assert_eq!(state.blocks_broken, 0);
        assert!(!state.is_game_over());
        assert!(state.paddle(Side::Left).pos.x < 0.0);
        assert!(state.paddle(Side::Right).pos.x > 0.0);
        assert!(state.ball(Side::Left).vel.x < 0.0);
        assert!(state.ball(Side::Right).vel.x > 0.0);
    }

    #[test]
    fn test_with_tuning_validates() {
        let tuning = Tuning {
            court_radius: Vec2::new(-1.0, 5.0),
            ..Default::default()
        };
        assert!(GameState::with_tuning(tuning).is_err());
    }

    #[test]
    fn test_brick_owner() {
        assert_eq!(Brick::LeftColor.owner(), Some(Side::Left));
        assert_eq!(Brick::RightColor.owner(), Some(Side::Right));
        assert_eq!(Brick::PendingDelete.owner(), None);
        assert!(Brick::default().is_empty());
    }
}
