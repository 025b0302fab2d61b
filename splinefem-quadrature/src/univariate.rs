//! Gauss-Legendre rules on the reference interval `[-1, 1]`.

use crate::{Error, Rule1d};
use std::f64::consts::PI;

/// Evaluates the degree-`n` Legendre polynomial and its first derivative at `x`
/// through the three-term recurrence
/// `m P_m(x) = (2m - 1) x P_{m-1}(x) - (m - 1) P_{m-2}(x)`.
///
/// The derivative formula divides by `x^2 - 1` and is therefore only valid in
/// the open interval `(-1, 1)`. All Legendre roots lie strictly inside it, so
/// the Newton iterates in [`gauss`] never leave that range.
fn legendre_with_derivative(n: usize, x: f64) -> (f64, f64) {
    let mut current = 1.0;
    let mut previous = 0.0;

    for m in 1..=n {
        let m = m as f64;
        let next = ((2.0 * m - 1.0) * x * current - (m - 1.0) * previous) / m;
        previous = current;
        current = next;
    }

    let derivative = n as f64 * (x * current - previous) / (x * x - 1.0);
    (current, derivative)
}

/// Returns the [Gauss-Legendre rule] with the given number of points.
///
/// The `n`-point rule integrates polynomials of degree up to `2n - 1` exactly.
/// Roots of the degree-`n` Legendre polynomial are found by Newton iteration
/// from a Chebyshev-based initial guess; since the roots come in symmetric
/// pairs, only the non-negative half is computed and the rest is mirrored.
///
/// # Errors
///
/// Fails with [`Error::NoRuleAvailable`] if zero points are requested. Rules
/// of every positive size are available.
///
/// [Gauss-Legendre rule]: https://en.wikipedia.org/wiki/Gaussian_quadrature
pub fn gauss(num_points: usize) -> Result<Rule1d, Error> {
    let n = num_points;
    if n == 0 {
        return Err(Error::NoRuleAvailable { num_points });
    }

    let half = (n + 1) / 2;

    let mut weights = Vec::with_capacity(n);
    let mut points = Vec::with_capacity(n);

    for i in 0..half {
        let mut x = (PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();

        loop {
            let (p, dp) = legendre_with_derivative(n, x);
            let dx = -p / dp;
            x += dx;
            if dx.abs() <= 1e-15 {
                break;
            }
        }

        // With a converged root, the weight follows from the derivative alone
        let (_, dp) = legendre_with_derivative(n, x);
        weights.push(2.0 / ((1.0 - x * x) * dp * dp));
        points.push(x);
    }

    for i in half..n {
        let mirror = n - i - 1;
        weights.push(weights[mirror]);
        points.push(-points[mirror]);
    }

    debug_assert_eq!(points.len(), n);
    Ok((weights, points))
}
