use sim_grid::{CellRng, EngineError, Grid, GridSize, Neighborhood, RuleSet};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LifeCell {
    pub alive: bool,
}

/// Conway's B3/S23.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LifeRules;

impl RuleSet<LifeCell> for LifeRules {
    fn next_state(
        &self,
        cell: LifeCell,
        neighbors: &Neighborhood<'_, LifeCell>,
        _rng: &mut CellRng,
    ) -> Result<LifeCell, EngineError> {
        let live = neighbors.cells().filter(|n| n.alive).count();
        let alive = if cell.alive {
            (2..=3).contains(&live)
        } else {
            live == 3
        };
        Ok(LifeCell { alive })
    }
}

/// Fills a grid from per-cell draws on the seeding stream, so the same seed
/// always produces the same starting world.
pub fn seed_life_grid(
    size: GridSize,
    seed: u64,
    density: f64,
) -> Result<Grid<LifeCell>, EngineError> {
    Grid::from_fn(size, |loc| LifeCell {
        alive: CellRng::for_cell(seed, 0, loc).next_bool(density),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_grid::{Loc, Simulation};

    fn world_with_live_cells(live: &[Loc]) -> Simulation<LifeCell, LifeRules> {
        let mut grid = Grid::new(GridSize::new(5, 5), LifeCell::default()).unwrap();
        for loc in live {
            grid.set(*loc, LifeCell { alive: true }).unwrap();
        }
        Simulation::new(grid, LifeRules, 0)
    }

    fn live_cells(sim: &Simulation<LifeCell, LifeRules>) -> Vec<Loc> {
        sim.grid()
            .iter()
            .filter(|(_, cell)| cell.alive)
            .map(|(loc, _)| loc)
            .collect()
    }

    #[test]
    fn blinker_oscillates() {
        let mut sim =
            world_with_live_cells(&[Loc::new(1, 2), Loc::new(2, 2), Loc::new(3, 2)]);
        sim.step().unwrap();
        assert_eq!(
            live_cells(&sim),
            vec![Loc::new(2, 1), Loc::new(2, 2), Loc::new(2, 3)]
        );

        sim.step().unwrap();
        assert_eq!(
            live_cells(&sim),
            vec![Loc::new(1, 2), Loc::new(2, 2), Loc::new(3, 2)]
        );
    }

    #[test]
    fn block_is_a_still_life() {
        let block = [
            Loc::new(1, 1),
            Loc::new(2, 1),
            Loc::new(1, 2),
            Loc::new(2, 2),
        ];
        let mut sim = world_with_live_cells(&block);
        let before = sim.grid().clone();
        sim.step().unwrap();
        assert_eq!(sim.grid(), &before);
    }

    #[test]
    fn lonely_cell_dies() {
        let mut sim = world_with_live_cells(&[Loc::new(2, 2)]);
        sim.step().unwrap();
        assert!(live_cells(&sim).is_empty());
    }

    #[test]
    fn seeding_is_deterministic_and_roughly_at_density() {
        let size = GridSize::new(20, 20);
        let first = seed_life_grid(size, 12345, 0.5).unwrap();
        let second = seed_life_grid(size, 12345, 0.5).unwrap();
        assert_eq!(first, second);

        let population = first.cells_iter().filter(|cell| cell.alive).count();
        assert!(population > 100 && population < 300);

        let other = seed_life_grid(size, 54321, 0.5).unwrap();
        assert_ne!(first, other);
    }
}
