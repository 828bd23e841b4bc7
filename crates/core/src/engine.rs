//! Grid engine - owns the complete game state
//!
//! This module ties together the grid, the merge rules and the spawn RNG.
//! It handles directional moves, tile spawning, score accumulation and the
//! PLAYING -> TERMINAL lifecycle. There is no I/O here; renderers read a
//! [`GridSnapshot`] and persistence lives in the store crate.

use log::{debug, info};
use rand::Rng;

use crate::grid::{is_valid_tile, Grid};
use crate::merge::merge_line;
use crate::rng::{new_rng, pick_index, spawn_value, GameRng};
use crate::snapshot::GridSnapshot;
use crate::types::{Cell, Direction, GameAction, ParseDirectionError, GRID_SIZE, INITIAL_TILES};

/// Engine lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Playing,
    /// Grid full with no merge left. Only a restart leaves this state.
    Terminal,
}

/// A tile placed by [`GridEngine::spawn_tile`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpawnedTile {
    pub row: usize,
    pub col: usize,
    pub value: Cell,
}

/// Result of sliding the whole grid once (no spawn)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveResult {
    pub moved: bool,
    pub score_gained: u32,
    pub merges: u32,
}

/// Result of one full turn: move, spawn, terminal check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TurnOutcome {
    pub moved: bool,
    pub score_gained: u32,
    pub merges: u32,
    pub spawned: Option<SpawnedTile>,
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GridEngine<R = GameRng> {
    grid: Grid,
    score: u32,
    phase: Phase,
    /// Successful moves in the current episode.
    moves: u32,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    rng: R,
}

impl GridEngine<GameRng> {
    /// Create a new game driven by a seeded generator
    pub fn with_seed(seed: u64) -> Self {
        Self::new(new_rng(Some(seed)))
    }

    /// Create a new game seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(new_rng(None))
    }
}

impl<R: Rng> GridEngine<R> {
    /// Create a new game: empty grid plus the two opening tiles
    pub fn new(rng: R) -> Self {
        let mut engine = Self::from_grid(Grid::new(), 0, rng);
        engine.seed_opening_tiles();
        engine
    }

    /// Wrap an existing grid without spawning anything.
    ///
    /// The terminal flag is derived from the grid immediately.
    pub fn from_grid(grid: Grid, score: u32, rng: R) -> Self {
        debug_assert!(
            grid.cells().iter().all(|&v| is_valid_tile(v)),
            "grid holds a tile that is not a power of two"
        );
        let mut engine = Self {
            grid,
            score,
            phase: Phase::Playing,
            moves: 0,
            episode_id: 0,
            rng,
        };
        engine.refresh_phase();
        engine
    }

    /// Reset to an empty grid with zero score. Spawns nothing.
    pub fn initialize(&mut self) {
        self.grid.clear();
        self.score = 0;
        self.moves = 0;
        self.phase = Phase::Playing;
    }

    /// Start a new episode: initialize, then place the two opening tiles
    pub fn restart(&mut self) {
        self.episode_id = self.episode_id.wrapping_add(1);
        self.initialize();
        self.seed_opening_tiles();
        debug!("restart: episode {}", self.episode_id);
    }

    fn seed_opening_tiles(&mut self) {
        for _ in 0..INITIAL_TILES {
            self.spawn_tile();
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Terminal
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn snapshot_into(&self, out: &mut GridSnapshot) {
        out.grid = self.grid.rows();
        out.score = self.score;
        out.max_tile = self.grid.max_tile();
        out.empty_count = self.grid.empty_count() as u32;
        out.moves = self.moves;
        out.episode_id = self.episode_id;
        out.game_over = self.is_over();
    }

    pub fn snapshot(&self) -> GridSnapshot {
        let mut s = GridSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Place a 2 (90%) or 4 (10%) on a uniformly chosen empty cell.
    ///
    /// No-op on a full grid. The terminal flag is recomputed after a spawn.
    pub fn spawn_tile(&mut self) -> Option<SpawnedTile> {
        let empty = self.grid.empty_cells();
        if empty.is_empty() {
            return None;
        }

        let (row, col) = empty[pick_index(&mut self.rng, empty.len())];
        let value = spawn_value(&mut self.rng);
        self.grid.set(row, col, value);
        debug!("spawn {value} at ({row}, {col})");

        self.refresh_phase();
        Some(SpawnedTile { row, col, value })
    }

    /// Slide every line towards `dir`, merging equal neighbours once.
    ///
    /// Returns whether any cell changed. Never spawns.
    pub fn move_tiles(&mut self, dir: Direction) -> bool {
        self.slide(dir).moved
    }

    /// String entry point for [`move_tiles`](Self::move_tiles).
    ///
    /// Unknown direction names are rejected instead of being ignored.
    pub fn move_named(&mut self, dir: &str) -> Result<bool, ParseDirectionError> {
        let dir: Direction = dir.parse()?;
        Ok(self.move_tiles(dir))
    }

    /// Like [`move_tiles`](Self::move_tiles) but reports score and merge counts.
    pub fn slide(&mut self, dir: Direction) -> MoveResult {
        let mut result = MoveResult::default();

        for index in 0..GRID_SIZE {
            let before = self.grid.line(dir, index);
            let merged = merge_line(&before);
            if merged.changed(&before) {
                self.grid.write_line(dir, index, &merged.line);
                result.moved = true;
            }
            result.score_gained = result.score_gained.saturating_add(merged.score);
            result.merges += merged.merges;
        }

        self.score = self.score.saturating_add(result.score_gained);
        if result.moved {
            self.moves = self.moves.wrapping_add(1);
        }
        result
    }

    /// True iff the grid is full and no two adjacent cells are equal.
    ///
    /// Pure: does not touch the latched phase.
    pub fn is_terminal(&self) -> bool {
        self.grid.is_full() && !self.grid.has_adjacent_pair()
    }

    fn refresh_phase(&mut self) {
        if self.phase == Phase::Playing && self.is_terminal() {
            self.phase = Phase::Terminal;
            info!("game over: score {}, best tile {}", self.score, self.grid.max_tile());
        }
    }

    /// One player turn: move, spawn on success, then latch game over.
    ///
    /// Input is ignored once the game is over.
    pub fn play_turn(&mut self, dir: Direction) -> TurnOutcome {
        if self.is_over() {
            return TurnOutcome {
                game_over: true,
                ..TurnOutcome::default()
            };
        }

        let slid = self.slide(dir);
        let spawned = if slid.moved { self.spawn_tile() } else { None };

        TurnOutcome {
            moved: slid.moved,
            score_gained: slid.score_gained,
            merges: slid.merges,
            spawned,
            game_over: self.is_over(),
        }
    }

    /// Apply a player action. Returns true if the state changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Move(dir) => self.play_turn(dir).moved,
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Directions that would change the grid right now.
    pub fn legal_moves(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(move |&dir| {
            (0..GRID_SIZE).any(|index| {
                let line = self.grid.line(dir, index);
                merge_line(&line).changed(&line)
            })
        })
    }
}

impl Default for GridEngine<GameRng> {
    fn default() -> Self {
        Self::with_seed(1)
    }
}
