//! Grid module - manages the 4x4 tile matrix
//!
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (row, col) where both range 0..4, row 0 at the top.
//! A value of 0 is an empty cell; anything else is a power-of-two tile.

use arrayvec::ArrayVec;

use crate::types::{Cell, Direction, CELL_COUNT, GRID_SIZE};

/// One row or column, in extraction order.
pub type Line = [Cell; GRID_SIZE];

/// The game grid - 4 rows x 4 columns using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (row * GRID_SIZE + col)
    pub(crate) cells: [Cell; CELL_COUNT],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [0; CELL_COUNT],
        }
    }

    /// Build a grid from rows (top to bottom)
    ///
    /// Every value must be 0 or a power of two of at least 2.
    pub fn from_rows(rows: [[Cell; GRID_SIZE]; GRID_SIZE]) -> Self {
        let mut grid = Self::new();
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                debug_assert!(is_valid_tile(value), "invalid tile {value} at ({row}, {col})");
                grid.cells[row * GRID_SIZE + col] = value;
            }
        }
        grid
    }

    /// Calculate flat index from (row, col)
    #[inline(always)]
    fn index(row: usize, col: usize) -> Option<usize> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return None;
        }
        Some(row * GRID_SIZE + col)
    }

    pub fn size(&self) -> usize {
        GRID_SIZE
    }

    /// Get cell at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: usize, col: usize, value: Cell) -> bool {
        debug_assert!(is_valid_tile(value), "invalid tile {value} at ({row}, {col})");
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    pub fn is_empty_at(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(0))
    }

    /// Coordinates of every empty cell, in row-major order.
    ///
    /// Stack-only; never allocates.
    pub fn empty_cells(&self) -> ArrayVec<(usize, usize), CELL_COUNT> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == 0)
            .map(|(i, _)| (i / GRID_SIZE, i % GRID_SIZE))
            .collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    pub fn occupied_count(&self) -> usize {
        CELL_COUNT - self.empty_count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    /// True if any two horizontally or vertically adjacent cells hold the same tile.
    ///
    /// Empty cells are ignored, so this only answers "is there a merge available".
    pub fn has_adjacent_pair(&self) -> bool {
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let v = self.cells[row * GRID_SIZE + col];
                if v == 0 {
                    continue;
                }
                if col + 1 < GRID_SIZE && self.cells[row * GRID_SIZE + col + 1] == v {
                    return true;
                }
                if row + 1 < GRID_SIZE && self.cells[(row + 1) * GRID_SIZE + col] == v {
                    return true;
                }
            }
        }
        false
    }

    /// Sum of every tile value on the grid
    pub fn sum(&self) -> u64 {
        self.cells.iter().map(|&v| v as u64).sum()
    }

    /// Largest tile on the grid (0 when empty)
    pub fn max_tile(&self) -> Cell {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Read line `index` in extraction order for `dir`.
    ///
    /// Left reads a row left to right, right reads it right to left,
    /// up reads a column top to bottom, down reads it bottom to top.
    pub fn line(&self, dir: Direction, index: usize) -> Line {
        let mut line = [0; GRID_SIZE];
        for (k, slot) in line.iter_mut().enumerate() {
            let (row, col) = line_coord(dir, index, k);
            *slot = self.cells[row * GRID_SIZE + col];
        }
        line
    }

    /// Write a line produced in extraction order back to its row/column.
    pub fn write_line(&mut self, dir: Direction, index: usize, line: &Line) {
        for (k, &value) in line.iter().enumerate() {
            let (row, col) = line_coord(dir, index, k);
            self.cells[row * GRID_SIZE + col] = value;
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Copy out as rows (top to bottom)
    pub fn rows(&self) -> [[Cell; GRID_SIZE]; GRID_SIZE] {
        let mut rows = [[0; GRID_SIZE]; GRID_SIZE];
        for (row, out) in rows.iter_mut().enumerate() {
            out.copy_from_slice(&self.cells[row * GRID_SIZE..(row + 1) * GRID_SIZE]);
        }
        rows
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

/// Grid coordinate of the `k`-th cell of line `index` when read towards `dir`.
#[inline(always)]
fn line_coord(dir: Direction, index: usize, k: usize) -> (usize, usize) {
    let along = if dir.is_reversed() { GRID_SIZE - 1 - k } else { k };
    if dir.is_horizontal() {
        (index, along)
    } else {
        (along, index)
    }
}

/// 0 (empty) or a power of two no smaller than 2.
pub fn is_valid_tile(value: Cell) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}
