use std::fmt::Debug;

use thiserror::Error;

/// Every variant is a configuration or rule-set defect, never a transient
/// condition; nothing in the engine retries.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("cell ({col}, {row}) is out of bounds for a {width}x{height} grid")]
    OutOfBounds {
        col: u32,
        row: u32,
        width: u32,
        height: u32,
    },

    #[error("rule set has no transition for {cell}")]
    UnhandledTransition { cell: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

impl EngineError {
    pub fn unhandled_transition(cell: impl Debug) -> Self {
        Self::UnhandledTransition {
            cell: format!("{cell:?}"),
        }
    }

    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
