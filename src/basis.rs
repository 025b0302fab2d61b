//! One-dimensional B-spline basis functions.

use crate::error::Error;

/// Absolute tolerance for degenerate knot spans and for closing the basis at
/// the final knot during evaluation.
pub const EVAL_TOL: f64 = 1e-12;

/// Absolute tolerance below which a derivative denominator is treated as zero.
pub const DERIV_TOL: f64 = 1e-10;

/// Evaluates the `i`-th B-spline basis function of degree `p` at `t` by the
/// Cox-de Boor recursion.
///
/// Degree-zero functions are indicators of the half-open knot span
/// `[knot_vector[i], knot_vector[i + 1])`, with one exception: when `t` equals
/// the final knot (within [`EVAL_TOL`]) the last span is treated as closed, so
/// the rightmost basis function reaches one at the upper domain boundary. A
/// recursion term whose knot-span width falls below [`EVAL_TOL`] is dropped,
/// which handles the repeated knots of a clamped knot vector without dividing
/// by zero.
///
/// # Panics
///
/// Panics if `knot_vector` has fewer than `i + p + 2` entries.
pub fn evaluate(t: f64, i: usize, p: usize, knot_vector: &[f64]) -> f64 {
    if p == 0 {
        let last = knot_vector[knot_vector.len() - 1];
        let in_span = t >= knot_vector[i] && t < knot_vector[i + 1];
        let closes_domain =
            (t - knot_vector[i + 1]).abs() < EVAL_TOL && (t - last).abs() < EVAL_TOL;
        return if in_span || closes_domain { 1.0 } else { 0.0 };
    }

    let mut result = 0.0;

    let left_width = knot_vector[i + p] - knot_vector[i];
    if left_width.abs() > EVAL_TOL {
        result += (t - knot_vector[i]) / left_width * evaluate(t, i, p - 1, knot_vector);
    }

    let right_width = knot_vector[i + p + 1] - knot_vector[i + 1];
    if right_width.abs() > EVAL_TOL {
        result += (knot_vector[i + p + 1] - t) / right_width * evaluate(t, i + 1, p - 1, knot_vector);
    }

    result
}

/// Evaluates the `i`-th basis function of degree `p` at `t`, differentiated
/// `order` times.
///
/// Order zero delegates to [`evaluate`]. Order one uses the standard
/// derivative recursion over two degree-`p - 1` functions, where a term whose
/// denominator magnitude is below [`DERIV_TOL`] contributes zero.
///
/// # Errors
///
/// Fails with [`Error::DegreeZeroDerivative`] when a first derivative of a
/// degree-zero function is requested, and with
/// [`Error::UnsupportedDiffOrder`] for any order above one.
///
/// # Panics
///
/// Panics if `knot_vector` has fewer than `i + p + 2` entries.
pub fn derivative(
    t: f64,
    i: usize,
    p: usize,
    knot_vector: &[f64],
    order: usize,
) -> Result<f64, Error> {
    match order {
        0 => Ok(evaluate(t, i, p, knot_vector)),
        1 => {
            if p == 0 {
                return Err(Error::DegreeZeroDerivative);
            }

            let mut result = 0.0;

            let left_width = knot_vector[i + p] - knot_vector[i];
            if left_width.abs() > DERIV_TOL {
                result += p as f64 / left_width * evaluate(t, i, p - 1, knot_vector);
            }

            let right_width = knot_vector[i + p + 1] - knot_vector[i + 1];
            if right_width.abs() > DERIV_TOL {
                result -= p as f64 / right_width * evaluate(t, i + 1, p - 1, knot_vector);
            }

            Ok(result)
        }
        _ => Err(Error::UnsupportedDiffOrder { order }),
    }
}
