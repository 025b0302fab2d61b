//! Construction of the tensor-product patch structure: clamped knot vectors
//! and element-to-dof location maps.

use crate::error::Error;

/// A non-decreasing sequence of parameter breakpoints along one axis.
pub type KnotVector = Vec<f64>;

/// The ordered global dof indices supported on one element.
pub type LocationMap = Vec<usize>;

/// Constructs the open (clamped) knot vector for one axis.
///
/// Both domain endpoints are repeated `degree + 1` times and every interior
/// element boundary `degree - continuity` times. Interior boundaries are
/// uniformly spaced: boundary `k` sits at `origin + k * length / num_elements`.
///
/// # Errors
///
/// Fails with [`Error::ContinuityNotBelowDegree`] unless
/// `continuity < degree`.
pub fn open_knot_vector(
    num_elements: usize,
    degree: usize,
    continuity: usize,
    length: f64,
    origin: f64,
) -> Result<KnotVector, Error> {
    if continuity >= degree {
        return Err(Error::ContinuityNotBelowDegree { degree, continuity });
    }

    let multiplicity = degree - continuity;
    let mut knots = Vec::with_capacity(2 * (degree + 1) + num_elements.saturating_sub(1) * multiplicity);

    knots.extend(std::iter::repeat(origin).take(degree + 1));

    let element_width = length / num_elements as f64;
    for boundary in 1..num_elements {
        let knot = boundary as f64 * element_width + origin;
        knots.extend(std::iter::repeat(knot).take(multiplicity));
    }

    knots.extend(std::iter::repeat(origin + length).take(degree + 1));

    Ok(knots)
}

/// Computes, for every element of the grid in row-major order (axis 0 outer),
/// the global indices of the dofs supported on that element.
///
/// Dofs are numbered row-major over the (axis 0, axis 1) dof grid, where axis
/// `a` carries `num_elements[a] * (degrees[a] - continuities[a]) +
/// continuities[a] + 1` dofs. Within a map, entries are ordered with the
/// axis-0 local index outermost, matching the order in which tensor-product
/// basis values are produced.
///
/// # Errors
///
/// Fails if an axis has zero elements or degree zero, or if a continuity is
/// not strictly below its degree.
pub fn location_maps(
    num_elements: [usize; 2],
    degrees: [usize; 2],
    continuities: [usize; 2],
) -> Result<Vec<LocationMap>, Error> {
    if num_elements[0] == 0 || num_elements[1] == 0 {
        return Err(Error::ZeroElementCount);
    }
    if degrees[0] == 0 || degrees[1] == 0 {
        return Err(Error::ZeroPolynomialDegree);
    }
    for axis in 0..2 {
        if continuities[axis] >= degrees[axis] {
            return Err(Error::ContinuityNotBelowDegree {
                degree: degrees[axis],
                continuity: continuities[axis],
            });
        }
    }

    let strides = [degrees[0] - continuities[0], degrees[1] - continuities[1]];
    let num_dofs_axis1 = num_elements[1] * strides[1] + continuities[1] + 1;

    let mut maps = Vec::with_capacity(num_elements[0] * num_elements[1]);
    for i_element in 0..num_elements[0] {
        for j_element in 0..num_elements[1] {
            let mut map = Vec::with_capacity((degrees[0] + 1) * (degrees[1] + 1));
            for local_i in 0..=degrees[0] {
                for local_j in 0..=degrees[1] {
                    let global_i = local_i + i_element * strides[0];
                    let global_j = local_j + j_element * strides[1];
                    map.push(global_i * num_dofs_axis1 + global_j);
                }
            }
            maps.push(map);
        }
    }

    Ok(maps)
}

/// Locates the uniform subdivision of `[min, max]` that contains `x`.
///
/// `x == min` maps to the first span and `x == max` to the last, so both
/// domain endpoints resolve to a valid span index.
///
/// # Errors
///
/// Fails with [`Error::EmptySpanSearch`] if `num_spans` is zero.
pub fn find_knot_span(min: f64, max: f64, num_spans: usize, x: f64) -> Result<usize, Error> {
    if num_spans == 0 {
        return Err(Error::EmptySpanSearch);
    }

    let index = if x == min {
        0
    } else if x == max {
        num_spans - 1
    } else {
        let spacing = (max - min) / num_spans as f64;
        ((x - min) / spacing).floor() as usize
    };

    Ok(index)
}
