use thiserror::Error;

use crate::network::NetworkKind;

/// Top-level error type for the corridor router.
#[derive(Debug, Error)]
pub enum CorridorError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl CorridorError {
    /// Returns `true` when the caller may skip the failed network and carry on
    /// with the rest of a batch.
    ///
    /// Configuration errors are never skippable.
    #[must_use]
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::Routing(RoutingError::Infeasible { .. }))
    }
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised by geometry operations such as curve offsetting.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Search outcomes that did not produce a result.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RoutingError {
    #[error("no feasible route for network {network:?}")]
    Infeasible { network: NetworkKind },

    #[error("no feasible arrangement of the requested networks")]
    NoFeasibleArrangement,
}

/// Errors in the host-supplied configuration. These are fatal to the
/// operation that triggered them.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("layer {0:?} is not mapped to a network kind or building category")]
    UnknownLayer(String),

    #[error("parameter {name} = {value} is invalid: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Convenience type alias for results using [`CorridorError`].
pub type Result<T> = std::result::Result<T, CorridorError>;
