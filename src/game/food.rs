//! Random placement of food on free board cells

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::grid::{Board, Position};

/// Rejection-sampling attempts before falling back to a scan of free cells
const MAX_SAMPLE_ATTEMPTS: usize = 64;

/// Picks food positions that avoid an occupied set
pub struct FoodPlacer {
    rng: StdRng,
}

impl FoodPlacer {
    /// Placer seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Placer with a fixed seed, for reproducible games
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick a uniformly random cell not in `occupied`
    ///
    /// Samples the whole board first, which is cheap while the board is
    /// mostly empty. After [`MAX_SAMPLE_ATTEMPTS`] misses it collects the
    /// free cells and picks one of them, so a nearly full board still
    /// terminates. Returns `None` when no cell is free.
    pub fn place(&mut self, board: Board, occupied: &HashSet<Position>) -> Option<Position> {
        let size = board.size() as i32;
        if size == 0 {
            return None;
        }

        for _ in 0..MAX_SAMPLE_ATTEMPTS {
            let pos = Position::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size));
            if !occupied.contains(&pos) {
                return Some(pos);
            }
        }

        let free: Vec<Position> = board.cells().filter(|p| !occupied.contains(p)).collect();
        free.choose(&mut self.rng).copied()
    }
}

impl Default for FoodPlacer {
    fn default() -> Self {
        Self::new()
    }
}
