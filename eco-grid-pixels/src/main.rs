#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod palette;
mod render;

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use eco_grid::{
    BiomeCell, BiomeKind, BiomeRules, LifeCell, LifeRules, ThresholdMap, seed_biome_grid,
    seed_life_grid,
};
use log::{error, info};
use sim_grid::{BlobField, EngineError, Simulation};
use winit::dpi::PhysicalSize;

use crate::config::{RuleChoice, SimConfig};
use crate::palette::Palette;
use crate::render::{World, animate};

const LIFE_SEED_DENSITY: f64 = 0.3;

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), EngineError> {
    let config = SimConfig::from_args(env::args().skip(1))?;
    let grid_size = config.grid_size();
    info!(
        "starting {:?} world: {}x{} cells of {} px, seed {}",
        config.rules, grid_size.width, grid_size.height, config.cell_size, config.seed
    );

    match config.rules {
        RuleChoice::Biome => run_biome(&config),
        RuleChoice::Life => run_life(&config),
    }
}

fn run_biome(config: &SimConfig) -> Result<(), EngineError> {
    let field = BlobField::generate(
        config.grid_size(),
        config.seed,
        config.blob_centers,
        config.influence_radius,
    )?;
    let rules = BiomeRules::default();
    let grid = seed_biome_grid(&field, &ThresholdMap::default(), &rules)?;
    let world = BiomeWorld {
        sim: Simulation::new(grid, rules, config.seed),
        palette: biome_palette(),
    };
    animate("eco-grid", window_size(config), tick_interval(config), world);
    Ok(())
}

fn run_life(config: &SimConfig) -> Result<(), EngineError> {
    let grid = seed_life_grid(config.grid_size(), config.seed, LIFE_SEED_DENSITY)?;
    let world = LifeWorld {
        sim: Simulation::new(grid, LifeRules, config.seed),
        palette: life_palette(),
    };
    animate("eco-grid", window_size(config), tick_interval(config), world);
    Ok(())
}

fn window_size(config: &SimConfig) -> PhysicalSize<u32> {
    PhysicalSize::new(config.window_width, config.window_height)
}

fn tick_interval(config: &SimConfig) -> Duration {
    Duration::from_millis(config.tick_millis)
}

fn biome_palette() -> Palette<BiomeKind> {
    Palette::new([0, 0, 0])
        .with(BiomeKind::Dirt, [150, 70, 70])
        .with(BiomeKind::Grass, [70, 150, 70])
        .with(BiomeKind::Prey, [70, 70, 150])
}

fn life_palette() -> Palette<bool> {
    Palette::new([0x00, 0x00, 0x40]).with(true, [0x80, 0x80, 0x80])
}

struct BiomeWorld {
    sim: Simulation<BiomeCell, BiomeRules>,
    palette: Palette<BiomeKind>,
}

impl World for BiomeWorld {
    fn grid_width(&self) -> u32 {
        self.sim.grid().width()
    }

    fn grid_height(&self) -> u32 {
        self.sim.grid().height()
    }

    fn num_cells(&self) -> usize {
        self.sim.grid().num_cells()
    }

    fn advance(&mut self) -> Result<(), EngineError> {
        self.sim.step()
    }

    fn draw(&self, frame: &mut [u8]) {
        for (cell, pixel) in self.sim.grid().cells_iter().zip(frame.chunks_exact_mut(4)) {
            pixel.copy_from_slice(&self.palette.color_rgba(cell.kind));
        }
    }
}

struct LifeWorld {
    sim: Simulation<LifeCell, LifeRules>,
    palette: Palette<bool>,
}

impl World for LifeWorld {
    fn grid_width(&self) -> u32 {
        self.sim.grid().width()
    }

    fn grid_height(&self) -> u32 {
        self.sim.grid().height()
    }

    fn num_cells(&self) -> usize {
        self.sim.grid().num_cells()
    }

    fn advance(&mut self) -> Result<(), EngineError> {
        self.sim.step()
    }

    fn draw(&self, frame: &mut [u8]) {
        for (cell, pixel) in self.sim.grid().cells_iter().zip(frame.chunks_exact_mut(4)) {
            pixel.copy_from_slice(&self.palette.color_rgba(cell.alive));
        }
    }
}
