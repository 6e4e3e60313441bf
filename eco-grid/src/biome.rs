//! The dirt/grass/prey ecosystem.
//!
//! Grass sprouts on dirt bordering grass, prey converts adjacent grass, and
//! prey cut off from grass burns energy until it starves back to dirt. All
//! odds are per adjacent cell of the triggering kind, so denser fronts
//! advance faster.

use log::debug;

use sim_grid::{BlobField, CellRng, EngineError, Grid, Neighborhood, RuleSet};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BiomeKind {
    #[default]
    Dirt,
    Grass,
    Prey,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BiomeCell {
    pub kind: BiomeKind,
    /// Ticks a prey cell can survive with no grass in reach; unused by the
    /// other kinds.
    pub energy: u8,
}

impl BiomeCell {
    pub fn dirt() -> Self {
        Self {
            kind: BiomeKind::Dirt,
            energy: 0,
        }
    }

    pub fn grass() -> Self {
        Self {
            kind: BiomeKind::Grass,
            energy: 0,
        }
    }

    pub fn prey(energy: u8) -> Self {
        Self {
            kind: BiomeKind::Prey,
            energy,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeRules {
    /// Odds per adjacent grass cell that dirt sprouts.
    pub sprout_odds: f64,
    /// Odds per adjacent prey cell that grass is taken over.
    pub graze_odds: f64,
    /// Energy granted to a cell when prey claims it.
    pub prey_energy: u8,
}

impl Default for BiomeRules {
    fn default() -> Self {
        Self {
            sprout_odds: 0.04,
            graze_odds: 0.1,
            prey_energy: 4,
        }
    }
}

impl RuleSet<BiomeCell> for BiomeRules {
    fn next_state(
        &self,
        cell: BiomeCell,
        neighbors: &Neighborhood<'_, BiomeCell>,
        rng: &mut CellRng,
    ) -> Result<BiomeCell, EngineError> {
        match cell.kind {
            BiomeKind::Dirt => {
                let grass = count_kind(neighbors, BiomeKind::Grass);
                if grass > 0 && rng.next_bool(self.sprout_odds * grass as f64) {
                    Ok(BiomeCell::grass())
                } else {
                    Ok(cell)
                }
            }
            BiomeKind::Grass => {
                let prey = count_kind(neighbors, BiomeKind::Prey);
                if prey > 0 && rng.next_bool(self.graze_odds * prey as f64) {
                    Ok(BiomeCell::prey(self.prey_energy))
                } else {
                    Ok(cell)
                }
            }
            BiomeKind::Prey => {
                if count_kind(neighbors, BiomeKind::Grass) > 0 {
                    Ok(BiomeCell::prey(self.prey_energy))
                } else if cell.energy == 0 {
                    Ok(BiomeCell::dirt())
                } else {
                    Ok(BiomeCell::prey(cell.energy - 1))
                }
            }
        }
    }
}

fn count_kind(neighbors: &Neighborhood<'_, BiomeCell>, kind: BiomeKind) -> usize {
    neighbors.cells().filter(|cell| cell.kind == kind).count()
}

/// Density bands mapping noise values to kinds. Bands are checked in
/// insertion order; the first whose minimum the density reaches wins, and
/// anything below every band falls back.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdMap {
    bands: Vec<(f32, BiomeKind)>,
    fallback: BiomeKind,
}

impl ThresholdMap {
    pub fn new(fallback: BiomeKind) -> Self {
        Self {
            bands: Vec::new(),
            fallback,
        }
    }

    pub fn band(mut self, min_density: f32, kind: BiomeKind) -> Self {
        self.bands.push((min_density, kind));
        self
    }

    pub fn kind_for(&self, density: f32) -> BiomeKind {
        self.bands
            .iter()
            .find(|(min_density, _)| density >= *min_density)
            .map(|(_, kind)| *kind)
            .unwrap_or(self.fallback)
    }
}

impl Default for ThresholdMap {
    /// Prey at blob cores, grass around them, dirt elsewhere.
    fn default() -> Self {
        Self::new(BiomeKind::Dirt)
            .band(0.85, BiomeKind::Prey)
            .band(0.5, BiomeKind::Grass)
    }
}

pub fn seed_biome_grid(
    field: &BlobField,
    map: &ThresholdMap,
    rules: &BiomeRules,
) -> Result<Grid<BiomeCell>, EngineError> {
    let grid = Grid::from_fn(field.size(), |loc| match map.kind_for(field.value_at(loc)) {
        BiomeKind::Dirt => BiomeCell::dirt(),
        BiomeKind::Grass => BiomeCell::grass(),
        BiomeKind::Prey => BiomeCell::prey(rules.prey_energy),
    })?;
    debug!(
        "seeded {}x{} biome grid",
        field.size().width,
        field.size().height
    );
    Ok(grid)
}
