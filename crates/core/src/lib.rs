//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the 2048 rules: grid storage, line slide/merge,
//! tile spawning and the game lifecycle. It has **zero dependencies** on
//! rendering, input or persistence, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Unit tests next to every rule
//! - **Portable**: Can run in any environment (terminal, headless, benches)
//! - **Fast**: Stack-only grid and line operations
//!
//! # Module Structure
//!
//! - [`grid`]: 4x4 flat-array grid with line extraction per direction
//! - [`merge`]: slide + single-pass merge of one line
//! - [`engine`]: [`GridEngine`] owning grid, score and lifecycle
//! - [`rng`]: injectable tile-spawn randomness
//! - [`snapshot`]: read-only state handed to renderers
//!
//! # Game Rules
//!
//! - Every move compacts each line towards the chosen edge, then merges equal
//!   neighbours once per pass, starting from that edge
//! - Each merge adds the new tile's value to the score
//! - After a move that changed the grid a 2 (90%) or 4 (10%) spawns on a
//!   random empty cell
//! - The game is over when the grid is full and no neighbours are equal
//!
//! # Example
//!
//! ```
//! use tui_2048_core::GridEngine;
//! use tui_2048_types::Direction;
//!
//! let mut game = GridEngine::with_seed(12345);
//! assert_eq!(game.grid().occupied_count(), 2);
//!
//! let outcome = game.play_turn(Direction::Left);
//! if outcome.moved {
//!     assert_eq!(game.grid().occupied_count() + outcome.merges as usize, 3);
//! }
//! ```

pub mod engine;
pub mod grid;
pub mod merge;
pub mod rng;
pub mod snapshot;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use engine::{GridEngine, MoveResult, Phase, SpawnedTile, TurnOutcome};
pub use grid::{is_valid_tile, Grid, Line};
pub use merge::{merge_line, LineMerge};
pub use rng::{new_rng, GameRng};
pub use snapshot::GridSnapshot;
