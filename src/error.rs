use thiserror::Error;

/// Top-level error type for roof generation.
#[derive(Debug, Error)]
pub enum RoofgenError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors raised while laying out roof axes.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("part length {0} is not positive")]
    DegenerateAxis(f64),

    #[error("bound_idx {bound_idx} points past the {parts} existing parts")]
    ParentOutOfRange { bound_idx: usize, parts: usize },
}

/// Errors related to the pitch arena.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors raised by roof operations on malformed input.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),

    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`RoofgenError`].
pub type Result<T> = std::result::Result<T, RoofgenError>;
