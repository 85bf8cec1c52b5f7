//! Error types for laminate and sizing calculations

use thiserror::Error;

/// Main error type for laminate analysis and sizing operations.
///
/// A failing margin of safety is *not* an error: the engine reports it as a
/// normal result. These variants cover "could not compute" conditions only.
#[derive(Error, Debug)]
pub enum LaminateError {
    #[error("Invalid material: {0}")]
    InvalidMaterial(String),

    #[error("Laminate has no plies")]
    EmptyLaminate,

    #[error("Singular laminate stiffness - no resistance in at least one deformation direction")]
    SingularLaminate,

    #[error("Material '{0}' not found in model")]
    MaterialNotFound(String),

    #[error("Duplicate name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Sizing failed to converge after {0} iterations")]
    ConvergenceFailed(usize),
}

/// Result type for laminate operations
pub type LaminateResult<T> = Result<T, LaminateError>;
