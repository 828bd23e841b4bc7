//! RNG module - random tile placement
//!
//! Spawning picks one empty cell uniformly at random and drops a 2 there
//! (90%) or a 4 (10%). The generator is injected so tests and replays can
//! run from a fixed seed while normal play draws from OS entropy.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{Cell, SPAWN_FOUR_PROBABILITY, SPAWN_HIGH_VALUE, SPAWN_LOW_VALUE};

/// Default generator used by the engine.
pub type GameRng = StdRng;

/// Create a generator from a seed, or from OS entropy when `None`.
pub fn new_rng(seed: Option<u64>) -> GameRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Draw the value of a freshly spawned tile.
#[inline]
pub fn spawn_value<R: Rng + ?Sized>(rng: &mut R) -> Cell {
    if rng.gen_bool(SPAWN_FOUR_PROBABILITY) {
        SPAWN_HIGH_VALUE
    } else {
        SPAWN_LOW_VALUE
    }
}

/// Pick an index in `[0, count)` uniformly. `count` must be non-zero.
#[inline]
pub fn pick_index<R: Rng + ?Sized>(rng: &mut R, count: usize) -> usize {
    rng.gen_range(0..count)
}
