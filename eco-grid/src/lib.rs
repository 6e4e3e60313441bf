#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Concrete rule sets for the sim-grid engine: a dirt/grass/prey ecosystem
//! and Conway life, plus the noise-threshold seeding that builds their
//! starting worlds.

pub mod biome;
pub mod life;

pub use biome::{BiomeCell, BiomeKind, BiomeRules, ThresholdMap, seed_biome_grid};
pub use life::{LifeCell, LifeRules, seed_life_grid};
