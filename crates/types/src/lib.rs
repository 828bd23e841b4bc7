//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no I/O, making them usable in any context
//! (core logic, terminal rendering, input mapping, persistence).
//!
//! # Grid Dimensions
//!
//! The playfield is a fixed 4x4 square:
//!
//! - **Rows**: indexed 0-3, top to bottom
//! - **Columns**: indexed 0-3, left to right
//! - **Storage**: row-major, `row * GRID_SIZE + col`
//!
//! # Spawn Rules
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SPAWN_LOW_VALUE` | 2 | Tile spawned most of the time |
//! | `SPAWN_HIGH_VALUE` | 4 | Tile spawned occasionally |
//! | `SPAWN_FOUR_PROBABILITY` | 0.1 | Chance of spawning a 4 |
//! | `INITIAL_TILES` | 2 | Tiles placed on start and restart |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameAction, GRID_SIZE};
//!
//! let dir: Direction = "left".parse().unwrap();
//! assert_eq!(dir, Direction::Left);
//! assert!("sideways".parse::<Direction>().is_err());
//!
//! assert_eq!(GameAction::from_str("up"), Some(GameAction::Move(Direction::Up)));
//! assert_eq!(GRID_SIZE, 4);
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Grid side length (4x4)
pub const GRID_SIZE: usize = 4;

/// Total number of cells on the grid
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Value of the common spawned tile
pub const SPAWN_LOW_VALUE: Cell = 2;

/// Value of the rare spawned tile
pub const SPAWN_HIGH_VALUE: Cell = 4;

/// Probability that a spawned tile is a 4 rather than a 2
pub const SPAWN_FOUR_PROBABILITY: f64 = 0.1;

/// Tiles placed on an empty grid when a game starts or restarts
pub const INITIAL_TILES: usize = 2;

/// The classic target tile. Tiles above it share a single "super" style.
pub const WINNING_TILE: Cell = 2048;

/// Minimum swipe length, in device-independent pixels, that counts as a move.
pub const MIN_SWIPE_DISTANCE: f32 = 30.0;

/// A cell on the grid
///
/// - `0`: empty
/// - otherwise: a power of two (2, 4, 8, ...)
pub type Cell = u32;

/// Move directions
///
/// A direction picks the axis that is compacted and the edge tiles slide towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a stable order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Convert to lowercase string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::Up.as_str(), "up");
    /// assert_eq!(Direction::Right.as_str(), "right");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// True for left/right, which operate on rows.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// True when lines are read from the far edge (right/down).
    pub fn is_reversed(&self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name one of the four directions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized direction: {0:?}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Parse direction from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!("UP".parse::<Direction>(), Ok(Direction::Up));
    /// assert!("north".parse::<Direction>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// Player actions produced by input adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Slide every tile towards one edge
    Move(Direction),
    /// Throw away the current game and start a new one
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// Direction names map to moves; `restart` and `new` map to a restart.
    ///
    /// ```
    /// use tui_2048_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("Down"), Some(GameAction::Move(Direction::Down)));
    /// assert_eq!(GameAction::from_str("restart"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("undo"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "restart" | "new" => Some(GameAction::Restart),
            other => other.parse().ok().map(GameAction::Move),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Move(dir) => dir.as_str(),
            GameAction::Restart => "restart",
        }
    }
}
