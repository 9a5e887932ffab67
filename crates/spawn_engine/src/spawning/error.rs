//! Spawn errors

use crate::pool::{InstantiationError, PoolError, TemplateError};
use crate::spawning::SelectionError;

/// Errors that can occur while spawning
///
/// Everything except [`SpawnError::Instantiation`] is detected before any
/// entity is touched.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SpawnError {
    /// Unknown template or region, or an unusable position or weight
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Repeat count was zero or negative
    #[error("Count must be greater than 0, got {0}")]
    InvalidCount(i32),

    /// A selection was requested from an empty candidate set
    #[error("Cannot select a template from an empty candidate set")]
    EmptyInput,

    /// Every candidate weight is zero
    #[error("All {candidates} candidate weights are zero")]
    DegenerateDistribution {
        /// Number of candidates
        candidates: usize,
    },

    /// The backend failed to create an entity
    ///
    /// Entities spawned earlier in the same request stay spawned.
    #[error("Instantiation failed after {spawned_before} spawns: {source}")]
    Instantiation {
        /// Entities successfully spawned by this request before the failure
        spawned_before: usize,
        /// Backend error
        #[source]
        source: InstantiationError,
    },
}

impl From<SelectionError> for SpawnError {
    fn from(error: SelectionError) -> Self {
        match error {
            SelectionError::EmptyInput => Self::EmptyInput,
            SelectionError::DegenerateDistribution { candidates } => Self::DegenerateDistribution { candidates },
            SelectionError::InvalidWeight { .. } | SelectionError::WeightOverflow { .. } => {
                Self::InvalidArgument(error.to_string())
            }
        }
    }
}

impl From<TemplateError> for SpawnError {
    fn from(error: TemplateError) -> Self {
        Self::InvalidArgument(error.to_string())
    }
}

impl From<PoolError> for SpawnError {
    fn from(error: PoolError) -> Self {
        Self::InvalidArgument(error.to_string())
    }
}
