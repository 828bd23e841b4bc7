use serde::Serialize;

use crate::types::{Cell, GRID_SIZE};

/// Read-only view of the engine, handed to renderers after every state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct GridSnapshot {
    pub grid: [[Cell; GRID_SIZE]; GRID_SIZE],
    pub score: u32,
    pub max_tile: Cell,
    pub empty_count: u32,
    /// Successful moves in the current episode.
    pub moves: u32,
    /// Monotonic episode id (increments on restart).
    pub episode_id: u32,
    pub game_over: bool,
}

impl GridSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.grid[row][col]
    }
}
