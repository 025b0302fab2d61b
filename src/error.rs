//! Error type for patch construction and evaluation.

use std::fmt;
use std::fmt::{Display, Formatter};

/// Errors arising from invalid patch parameters or evaluation requests.
///
/// Every variant is an immediate contract violation; no operation returns a
/// partial result alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// An axis has zero elements.
    ZeroElementCount,
    /// An axis has polynomial degree zero.
    ZeroPolynomialDegree,
    /// Continuity must be strictly less than the polynomial degree.
    ContinuityNotBelowDegree { degree: usize, continuity: usize },
    /// Basis derivatives are only available up to first order.
    UnsupportedDiffOrder { order: usize },
    /// A degree-zero basis function has no derivative.
    DegreeZeroDerivative,
    /// A span search over zero subdivisions.
    EmptySpanSearch,
    /// The dof vector length does not match the patch dof count.
    DofCountMismatch { expected: usize, actual: usize },
    /// The boundary side name is not one of left, right, bottom, top.
    UnknownSide { name: String },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroElementCount => {
                write!(f, "the number of elements per axis must be nonzero")
            }
            Self::ZeroPolynomialDegree => {
                write!(f, "the polynomial degree per axis must be nonzero")
            }
            Self::ContinuityNotBelowDegree { degree, continuity } => {
                write!(
                    f,
                    "continuity {} is not strictly below polynomial degree {}",
                    continuity, degree
                )
            }
            Self::UnsupportedDiffOrder { order } => {
                write!(f, "derivatives of order {} are not supported", order)
            }
            Self::DegreeZeroDerivative => {
                write!(f, "degree-zero basis functions have no derivative")
            }
            Self::EmptySpanSearch => {
                write!(f, "cannot locate a span among zero subdivisions")
            }
            Self::DofCountMismatch { expected, actual } => {
                write!(f, "expected {} dof values, got {}", expected, actual)
            }
            Self::UnknownSide { name } => {
                write!(f, "unknown boundary side '{}'", name)
            }
        }
    }
}

impl std::error::Error for Error {}
