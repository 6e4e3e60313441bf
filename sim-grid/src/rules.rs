use std::fmt::Debug;

use rand::distr::uniform::{SampleRange, SampleUniform};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::EngineError;
use crate::grid::Loc;
use crate::neighborhood::Neighborhood;

/// Anything storable in a [`Grid`](crate::grid::Grid). The bounds are what
/// double buffering and parallel stepping need; the engine attaches no
/// meaning to the value itself.
pub trait Cell: Copy + Default + Debug + PartialEq + Send + Sync {}

impl<T> Cell for T where T: Copy + Default + Debug + PartialEq + Send + Sync {}

/// The transition capability: one tick of one cell, computed from the
/// pre-tick neighborhood snapshot.
///
/// Implementations take the cell by value and the neighborhood by shared
/// reference, so they cannot mutate the grid they were resolved against.
/// They must be total over every reachable cell value; a gap is reported as
/// [`EngineError::UnhandledTransition`], never papered over with a default.
pub trait RuleSet<C: Cell>: Send + Sync {
    fn next_state(
        &self,
        cell: C,
        neighbors: &Neighborhood<'_, C>,
        rng: &mut CellRng,
    ) -> Result<C, EngineError>;
}

/// Deterministic randomness for stochastic rules.
///
/// Each transition gets its own stream keyed by `(world_seed, tick, loc)`,
/// so a tick's outcome is independent of traversal order and replays
/// exactly. Stream 0 is reserved for initial world seeding; step N draws
/// from stream N.
#[derive(Clone, Debug)]
pub struct CellRng {
    rng: ChaCha8Rng,
}

impl CellRng {
    pub fn for_cell(world_seed: u64, tick: u64, loc: Loc) -> Self {
        let mut key = mix(world_seed, tick);
        key = mix(key, u64::from(loc.col));
        key = mix(key, u64::from(loc.row));
        Self {
            rng: ChaCha8Rng::seed_from_u64(key),
        }
    }

    pub fn next_bool(&mut self, p: f64) -> bool {
        self.rng.random_bool(p.clamp(0.0, 1.0))
    }

    pub fn next_in_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.rng.random_range(range)
    }
}

/// SplitMix64 finalizer (Vigna), absorbing one value per call.
fn mix(state: u64, value: u64) -> u64 {
    let mut z = state
        .rotate_left(25)
        .wrapping_add(value)
        .wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
