//! MultiMeshError: Unified error type for multimesh public APIs
//!
//! This error type is used throughout the multimesh library to provide robust,
//! non-panicking error handling for all public APIs.

use thiserror::Error;

/// Unified error type for multimesh operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MultiMeshError {
    /// Invalid geometric input (degenerate cells, bad extents, bad indices).
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    /// A mesh or build call was given an unexpected dimension.
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// A post-build accessor was called before `MultiMesh::build`.
    #[error("MultiMesh has not been built; call build() first")]
    NotBuilt,
    /// A part index was out of range.
    #[error("Part index {part} out of bounds ({num_parts} parts)")]
    PartOutOfBounds { part: usize, num_parts: usize },
    /// A cell index was out of range within a part.
    #[error("Cell index {cell} out of bounds in part {part} ({num_cells} cells)")]
    CellOutOfBounds {
        part: usize,
        cell: usize,
        num_cells: usize,
    },
    /// `Scalar::apply` received an operand it does not recognize.
    #[error("Unknown apply operation `{0}` (expected \"add\")")]
    UnknownApplyOperation(String),
    /// The communication backend could not be initialized.
    #[error("Communicator initialization failed: {0}")]
    CommInit(String),
    /// No reference quadrature rule is available for the requested degree.
    #[error("Unsupported quadrature degree {0}")]
    UnsupportedQuadratureDegree(usize),
}
