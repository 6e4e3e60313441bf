//! The tick engine. Each tick computes every cell's next state from the
//! committed pre-tick snapshot, stages it into a back buffer, and commits
//! by swapping buffers, so no transition ever observes a same-tick update
//! and a failed tick leaves the committed grid untouched.

use std::mem;

use log::trace;
use rayon::prelude::*;

use crate::error::EngineError;
use crate::grid::Grid;
use crate::neighborhood::Neighborhood;
use crate::rules::{Cell, CellRng, RuleSet};

#[derive(Clone, Debug)]
pub struct Simulation<C: Cell, R: RuleSet<C>> {
    cells: Grid<C>,
    next_cells: Grid<C>,
    rules: R,
    seed: u64,
    tick: u64,
}

impl<C: Cell, R: RuleSet<C>> Simulation<C, R> {
    pub fn new(grid: Grid<C>, rules: R, seed: u64) -> Self {
        let next_cells = grid.clone();
        Self {
            cells: grid,
            next_cells,
            rules,
            seed,
            tick: 0,
        }
    }

    /// The committed grid; the read-only view renderers consume between
    /// ticks.
    pub fn grid(&self) -> &Grid<C> {
        &self.cells
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of committed ticks.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Advances the world by one tick, or fails with the grid unchanged.
    pub fn step(&mut self) -> Result<(), EngineError> {
        let stream = self.tick + 1;
        let size = self.cells.size();
        for index in 0..size.num_cells() {
            let loc = size.loc_of(index);
            let neighbors = Neighborhood::around(&self.cells, loc);
            let mut rng = CellRng::for_cell(self.seed, stream, loc);
            let next = self.rules.next_state(self.cells[loc], &neighbors, &mut rng)?;
            self.next_cells.as_mut_slice()[index] = next;
        }
        self.commit();
        Ok(())
    }

    /// `step` sharded across rayon workers. Transitions read only the
    /// frozen primary buffer and write disjoint back-buffer slots, and
    /// every cell's randomness is keyed by coordinate, so the result is
    /// identical to the sequential path.
    pub fn par_step(&mut self) -> Result<(), EngineError> {
        let stream = self.tick + 1;
        let size = self.cells.size();
        let Self {
            cells,
            next_cells,
            rules,
            seed,
            ..
        } = self;
        let cells: &Grid<C> = cells;
        let rules: &R = rules;
        let seed = *seed;

        next_cells
            .as_mut_slice()
            .par_iter_mut()
            .enumerate()
            .try_for_each(|(index, slot)| {
                let loc = size.loc_of(index);
                let neighbors = Neighborhood::around(cells, loc);
                let mut rng = CellRng::for_cell(seed, stream, loc);
                *slot = rules.next_state(cells[loc], &neighbors, &mut rng)?;
                Ok(())
            })?;

        self.commit();
        Ok(())
    }

    fn commit(&mut self) {
        mem::swap(&mut self.cells, &mut self.next_cells);
        self.tick += 1;
        trace!("tick {} committed", self.tick);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridSize, Loc};

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    enum TestKind {
        #[default]
        B,
        A,
    }

    /// A cell becomes A when any of its 8 neighbors is A.
    #[derive(Clone, Copy, Debug)]
    struct SpreadRules;

    impl RuleSet<TestKind> for SpreadRules {
        fn next_state(
            &self,
            cell: TestKind,
            neighbors: &Neighborhood<'_, TestKind>,
            _rng: &mut CellRng,
        ) -> Result<TestKind, EngineError> {
            if cell == TestKind::A || neighbors.cells().any(|n| *n == TestKind::A) {
                Ok(TestKind::A)
            } else {
                Ok(TestKind::B)
            }
        }
    }

    /// A cell becomes A when any cardinal neighbor is A.
    #[derive(Clone, Copy, Debug)]
    struct CardinalSpreadRules;

    impl RuleSet<TestKind> for CardinalSpreadRules {
        fn next_state(
            &self,
            cell: TestKind,
            neighbors: &Neighborhood<'_, TestKind>,
            _rng: &mut CellRng,
        ) -> Result<TestKind, EngineError> {
            let caught = neighbors
                .iter()
                .any(|(direction, n)| direction.is_cardinal() && *n == TestKind::A);
            if cell == TestKind::A || caught {
                Ok(TestKind::A)
            } else {
                Ok(TestKind::B)
            }
        }
    }

    /// Handles A cells only; a B cell is an unhandled transition.
    #[derive(Clone, Copy, Debug)]
    struct PartialRules;

    impl RuleSet<TestKind> for PartialRules {
        fn next_state(
            &self,
            cell: TestKind,
            _neighbors: &Neighborhood<'_, TestKind>,
            _rng: &mut CellRng,
        ) -> Result<TestKind, EngineError> {
            match cell {
                TestKind::A => Ok(TestKind::A),
                TestKind::B => Err(EngineError::unhandled_transition(cell)),
            }
        }
    }

    /// Stochastic rules, to pin down order-independence of the RNG streams.
    #[derive(Clone, Copy, Debug)]
    struct CoinFlipRules;

    impl RuleSet<TestKind> for CoinFlipRules {
        fn next_state(
            &self,
            _cell: TestKind,
            _neighbors: &Neighborhood<'_, TestKind>,
            rng: &mut CellRng,
        ) -> Result<TestKind, EngineError> {
            Ok(if rng.next_bool(0.5) {
                TestKind::A
            } else {
                TestKind::B
            })
        }
    }

    fn grid_with_seed_at(size: GridSize, seeded: Loc) -> Grid<TestKind> {
        let mut grid = Grid::new(size, TestKind::B).unwrap();
        grid.set(seeded, TestKind::A).unwrap();
        grid
    }

    #[test]
    fn cardinal_contagion_on_two_by_two_sees_the_pre_tick_snapshot() {
        let grid = grid_with_seed_at(GridSize::new(2, 2), Loc::new(0, 0));
        let mut sim = Simulation::new(grid, CardinalSpreadRules, 0);
        sim.step().unwrap();

        // (1, 1) only borders the seed diagonally; its cardinal neighbors
        // were still B in the snapshot this tick read from.
        assert_eq!(sim.grid()[Loc::new(0, 0)], TestKind::A);
        assert_eq!(sim.grid()[Loc::new(1, 0)], TestKind::A);
        assert_eq!(sim.grid()[Loc::new(0, 1)], TestKind::A);
        assert_eq!(sim.grid()[Loc::new(1, 1)], TestKind::B);
    }

    #[test]
    fn contagion_reaches_diagonal_neighbors() {
        let grid = grid_with_seed_at(GridSize::new(3, 3), Loc::new(0, 0));
        let mut sim = Simulation::new(grid, SpreadRules, 0);
        sim.step().unwrap();

        for (loc, cell) in sim.grid().iter() {
            let adjacent_to_seed = loc.col <= 1 && loc.row <= 1;
            let expected = if adjacent_to_seed {
                TestKind::A
            } else {
                TestKind::B
            };
            assert_eq!(*cell, expected, "at ({}, {})", loc.col, loc.row);
        }
    }

    #[test]
    fn failed_tick_reports_the_gap_and_commits_nothing() {
        let grid = grid_with_seed_at(GridSize::new(3, 2), Loc::new(1, 1));
        let mut sim = Simulation::new(grid.clone(), PartialRules, 0);

        let err = sim.step().unwrap_err();
        assert!(matches!(err, EngineError::UnhandledTransition { .. }));
        assert_eq!(sim.grid(), &grid);
        assert_eq!(sim.tick(), 0);
    }

    #[test]
    fn step_preserves_dimensions_and_counts_ticks() {
        let grid = Grid::new(GridSize::new(5, 4), TestKind::B).unwrap();
        let mut sim = Simulation::new(grid, SpreadRules, 0);
        sim.step().unwrap();
        sim.step().unwrap();

        assert_eq!(sim.grid().size(), GridSize::new(5, 4));
        assert_eq!(sim.tick(), 2);
    }

    #[test]
    fn par_step_matches_step_even_for_stochastic_rules() {
        let grid = Grid::new(GridSize::new(16, 12), TestKind::B).unwrap();
        let mut sequential = Simulation::new(grid.clone(), CoinFlipRules, 99);
        let mut parallel = Simulation::new(grid, CoinFlipRules, 99);

        for _ in 0..5 {
            sequential.step().unwrap();
            parallel.par_step().unwrap();
        }
        assert_eq!(sequential.grid(), parallel.grid());
    }

    #[test]
    fn identical_seeds_replay_identically() {
        let grid = Grid::new(GridSize::new(8, 8), TestKind::B).unwrap();
        let mut first = Simulation::new(grid.clone(), CoinFlipRules, 7);
        let mut second = Simulation::new(grid, CoinFlipRules, 7);

        for _ in 0..10 {
            first.step().unwrap();
            second.step().unwrap();
        }
        assert_eq!(first.grid(), second.grid());
    }

    #[test]
    fn different_seeds_diverge() {
        let grid = Grid::new(GridSize::new(8, 8), TestKind::B).unwrap();
        let mut first = Simulation::new(grid.clone(), CoinFlipRules, 7);
        let mut second = Simulation::new(grid, CoinFlipRules, 8);

        first.step().unwrap();
        second.step().unwrap();
        assert_ne!(first.grid(), second.grid());
    }
}
