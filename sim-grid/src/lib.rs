#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Core engine for noise-seeded cellular simulations: a dense 2D grid of
//! typed cells, a deterministic blob-noise generator for initial seeding,
//! an 8-connected neighborhood resolver, a pluggable rule-set capability,
//! and a double-buffered tick scheduler.

pub mod error;
pub mod grid;
pub mod neighborhood;
pub mod noise;
pub mod rules;
pub mod scheduler;

pub use error::EngineError;
pub use grid::{Grid, GridSize, Loc};
pub use neighborhood::{Direction, Neighborhood};
pub use noise::BlobField;
pub use rules::{Cell, CellRng, RuleSet};
pub use scheduler::Simulation;
