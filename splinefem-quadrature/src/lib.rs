//! Quadrature rules for the one-dimensional reference interval `[-1, 1]`.
//!
//! The main purpose of this crate is to supply integration points for the
//! `splinefem` assembly routines, which combine two univariate rules into a
//! tensor-product rule per element. It has no dependency on the rest of the
//! workspace and may be used on its own.

use std::fmt;
use std::fmt::{Display, Formatter};

pub mod univariate;

/// Library-wide error type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Indicates that no rule with the requested number of points is available.
    NoRuleAvailable { num_points: usize },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRuleAvailable { num_points } => {
                write!(
                    f,
                    "there is no quadrature rule with {} points available",
                    num_points
                )
            }
        }
    }
}

impl std::error::Error for Error {}

/// A univariate quadrature rule, stored as parallel `(weights, points)` vectors.
pub type Rule1d = (Vec<f64>, Vec<f64>);

/// Approximates the integral of `f` over `[-1, 1]` with the given rule.
pub fn integrate(rule: &Rule1d, f: impl Fn(f64) -> f64) -> f64 {
    let (weights, points) = rule;
    weights
        .iter()
        .zip(points)
        .map(|(w, &x)| w * f(x))
        .sum()
}
