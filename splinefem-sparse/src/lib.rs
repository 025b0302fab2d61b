//! Sparse linear algebra for B-spline finite element assembly.
//!
//! The central type is [`CsrMatrix`], a square compressed-sparse-row matrix
//! whose nonzero structure is derived once from element-to-dof connectivity
//! (the location maps of a patch) and never changes afterwards. Assembly then
//! accumulates element matrices into the fixed structure through
//! [`CsrMatrix::add_element_matrix`], which treats an entry outside the
//! pattern as a fatal inconsistency rather than ignoring it.

use std::fmt;
use std::fmt::{Display, Formatter};

mod csr;

pub use csr::{CsrMatrix, SparsityPattern};

/// Library-wide error type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A row or column index lies outside the matrix dimensions.
    IndexOutOfBounds { index: usize, size: usize },
    /// The element matrix passed to a scatter operation is not square.
    NonSquareElementMatrix { nrows: usize, ncols: usize },
    /// The location map length does not match the element matrix dimension.
    LocationMapSizeMismatch { map_len: usize, matrix_dim: usize },
    /// A vector operand does not match the matrix size.
    VectorSizeMismatch { expected: usize, actual: usize },
    /// A dof in the index range is not referenced by any location map.
    UnconnectedDof { dof: usize },
    /// A scattered entry is absent from the sparsity pattern. The pattern is
    /// derived from the same location maps that drive assembly, so this
    /// signals inconsistent connectivity, never a recoverable condition.
    EntryNotInPattern { row: usize, col: usize },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, size } => {
                write!(f, "index {} is out of bounds for matrix size {}", index, size)
            }
            Self::NonSquareElementMatrix { nrows, ncols } => {
                write!(f, "element matrix is not square ({} x {})", nrows, ncols)
            }
            Self::LocationMapSizeMismatch { map_len, matrix_dim } => {
                write!(
                    f,
                    "location map has {} entries but the element matrix dimension is {}",
                    map_len, matrix_dim
                )
            }
            Self::VectorSizeMismatch { expected, actual } => {
                write!(f, "expected a vector of length {}, got {}", expected, actual)
            }
            Self::UnconnectedDof { dof } => {
                write!(f, "dof {} is not connected to any element", dof)
            }
            Self::EntryNotInPattern { row, col } => {
                write!(f, "entry ({}, {}) is not present in the sparsity pattern", row, col)
            }
        }
    }
}

impl std::error::Error for Error {}
