//! Error types for Haar-unitary generation

use thiserror::Error;

/// Errors raised while building or validating unitary matrices
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HaarError {
    /// Zero-sized matrix requested
    #[error("unitary size must be at least 1")]
    EmptySize,

    /// R factor kept a zero (or non-finite) diagonal entry after every resample
    #[error("QR factor R has a degenerate diagonal entry at index {index}")]
    DegenerateDiagonal { index: usize },

    /// Matrix is not square
    #[error("expected a square matrix, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// Operands of a product have different sizes
    #[error("size mismatch: {left}x{left} times {right}x{right}")]
    SizeMismatch { left: usize, right: usize },

    /// U·U† is too far from the identity
    #[error("matrix is not unitary, max |UU† - I| = {deviation:e}")]
    NotUnitary { deviation: f64 },
}

/// Result type for Haar-unitary operations
pub type Result<T> = std::result::Result<T, HaarError>;
