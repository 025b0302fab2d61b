//! Tensor-product B-spline patches over axis-aligned rectangular domains.

use crate::basis;
use crate::error::Error;
use crate::mesh::{self, KnotVector, LocationMap};

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use std::str::FromStr;

/// The defining parameters of a [`BsplinePatch`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatchParameters {
    /// Number of elements per axis.
    pub num_elements: [usize; 2],
    /// Polynomial degree per axis.
    pub degrees: [usize; 2],
    /// Continuity enforced at interior element boundaries, per axis.
    pub continuities: [usize; 2],
    /// Domain edge length per axis.
    pub lengths: [f64; 2],
    /// Domain corner with the smallest coordinates.
    pub origin: [f64; 2],
}

/// A named edge of the rectangular domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Bottom,
    Top,
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Error> {
        match name {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "bottom" => Ok(Self::Bottom),
            "top" => Ok(Self::Top),
            _ => Err(Error::UnknownSide {
                name: name.to_string(),
            }),
        }
    }
}

/// A 2D B-spline finite element patch.
///
/// The knot vectors and element-to-dof location maps are computed once at
/// construction and cached; every operation afterwards is read-only. The
/// quadrature provider `P` is consulted during element integration.
#[derive(Debug, Clone)]
pub struct BsplinePatch<P> {
    parameters: PatchParameters,
    knot_vectors: [KnotVector; 2],
    location_maps: Vec<LocationMap>,
    integration_points: P,
}

impl<P> BsplinePatch<P> {
    /// Validates the parameters and builds the patch, deriving its knot
    /// vectors and location maps.
    ///
    /// # Errors
    ///
    /// Fails if an axis has zero elements or degree zero, or if a continuity
    /// is not strictly below its degree.
    pub fn new(parameters: PatchParameters, integration_points: P) -> Result<Self, Error> {
        let location_maps = mesh::location_maps(
            parameters.num_elements,
            parameters.degrees,
            parameters.continuities,
        )?;

        let knot_vector_for_axis = |axis: usize| {
            mesh::open_knot_vector(
                parameters.num_elements[axis],
                parameters.degrees[axis],
                parameters.continuities[axis],
                parameters.lengths[axis],
                parameters.origin[axis],
            )
        };
        let knot_vectors = [knot_vector_for_axis(0)?, knot_vector_for_axis(1)?];

        Ok(Self {
            parameters,
            knot_vectors,
            location_maps,
            integration_points,
        })
    }

    pub fn parameters(&self) -> &PatchParameters {
        &self.parameters
    }

    pub fn knot_vectors(&self) -> &[KnotVector; 2] {
        &self.knot_vectors
    }

    /// The location maps of all elements, in row-major element order.
    pub fn location_maps(&self) -> &[LocationMap] {
        &self.location_maps
    }

    pub fn integration_point_provider(&self) -> &P {
        &self.integration_points
    }

    /// Number of dofs along each axis of the dof grid.
    pub fn num_dofs_per_axis(&self) -> [usize; 2] {
        [
            self.knot_vectors[0].len() - self.parameters.degrees[0] - 1,
            self.knot_vectors[1].len() - self.parameters.degrees[1] - 1,
        ]
    }

    /// Total number of dofs in the patch.
    pub fn num_dofs(&self) -> usize {
        let [num_axis0, num_axis1] = self.num_dofs_per_axis();
        num_axis0 * num_axis1
    }

    /// Number of dofs supported on a single element.
    pub fn num_element_dofs(&self) -> usize {
        (self.parameters.degrees[0] + 1) * (self.parameters.degrees[1] + 1)
    }

    /// Maps reference coordinates in `[-1, 1]^2` to global coordinates on the
    /// given element through the per-axis affine map.
    pub fn map_to_global(&self, local: [f64; 2], element_indices: [usize; 2]) -> [f64; 2] {
        let mut global = [0.0; 2];
        for axis in 0..2 {
            let element_width =
                self.parameters.lengths[axis] / self.parameters.num_elements[axis] as f64;
            global[axis] = ((local[axis] + 1.0) / 2.0 + element_indices[axis] as f64)
                * element_width
                + self.parameters.origin[axis];
        }
        global
    }

    /// Evaluates all basis functions with support at `global_coordinates`,
    /// differentiated `diff_orders[axis]` times per axis.
    ///
    /// The owning element is located by a uniform-spacing span search per
    /// axis. The `(degrees[0] + 1) * (degrees[1] + 1)` tensor-product values
    /// are returned with the axis-0 local index outermost, so they line up
    /// with the element's location map.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnsupportedDiffOrder`] for any order above one.
    pub fn evaluate_active_basis_at(
        &self,
        global_coordinates: [f64; 2],
        diff_orders: [usize; 2],
    ) -> Result<Vec<f64>, Error> {
        let element_indices = self.owning_element(global_coordinates);
        let [p0, p1] = self.parameters.degrees;
        let first = self.first_active_dof(element_indices);

        let mut values = Vec::with_capacity(self.num_element_dofs());
        for i in 0..=p0 {
            let basis_axis0 = basis::derivative(
                global_coordinates[0],
                first[0] + i,
                p0,
                &self.knot_vectors[0],
                diff_orders[0],
            )?;
            for j in 0..=p1 {
                let basis_axis1 = basis::derivative(
                    global_coordinates[1],
                    first[1] + j,
                    p1,
                    &self.knot_vectors[1],
                    diff_orders[1],
                )?;
                values.push(basis_axis0 * basis_axis1);
            }
        }
        Ok(values)
    }

    /// The global dof indices lying on the given edge of the domain, ordered
    /// by increasing index along the edge.
    pub fn boundary_dofs(&self, side: Side) -> Vec<usize> {
        let [num_axis0, num_axis1] = self.num_dofs_per_axis();
        match side {
            Side::Left => (0..num_axis1).collect(),
            Side::Right => (0..num_axis1)
                .map(|j| (num_axis0 - 1) * num_axis1 + j)
                .collect(),
            Side::Bottom => (0..num_axis0).map(|i| i * num_axis1).collect(),
            Side::Top => (0..num_axis0)
                .map(|i| i * num_axis1 + num_axis1 - 1)
                .collect(),
        }
    }

    /// Returns a field evaluator for the discrete solution defined by the
    /// given dof values.
    ///
    /// The returned function locates the element owning the query point,
    /// evaluates the active basis functions there and contracts them with the
    /// dofs selected by the element's location map.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DofCountMismatch`] if the vector length differs
    /// from the patch dof count.
    pub fn solution_evaluator(
        &self,
        dofs: DVector<f64>,
    ) -> Result<impl Fn(f64, f64) -> f64 + '_, Error> {
        if dofs.len() != self.num_dofs() {
            return Err(Error::DofCountMismatch {
                expected: self.num_dofs(),
                actual: dofs.len(),
            });
        }

        Ok(move |x: f64, y: f64| {
            let element_indices = self.owning_element([x, y]);
            let values = self.active_basis_values(element_indices, [x, y]);
            let location_map = &self.location_maps[self.element_offset(element_indices)];

            values
                .iter()
                .zip(location_map)
                .map(|(value, &dof)| value * dofs[dof])
                .sum()
        })
    }

    /// Position of an element's location map within the row-major map list.
    pub(crate) fn element_offset(&self, element_indices: [usize; 2]) -> usize {
        element_indices[0] * self.parameters.num_elements[1] + element_indices[1]
    }

    /// The first active local-to-global basis index per axis.
    fn first_active_dof(&self, element_indices: [usize; 2]) -> [usize; 2] {
        let strides = [
            self.parameters.degrees[0] - self.parameters.continuities[0],
            self.parameters.degrees[1] - self.parameters.continuities[1],
        ];
        [
            element_indices[0] * strides[0],
            element_indices[1] * strides[1],
        ]
    }

    /// The element containing the given global coordinates.
    fn owning_element(&self, global_coordinates: [f64; 2]) -> [usize; 2] {
        let span = |axis: usize| {
            let origin = self.parameters.origin[axis];
            let length = self.parameters.lengths[axis];
            mesh::find_knot_span(
                origin,
                origin + length,
                self.parameters.num_elements[axis],
                global_coordinates[axis],
            )
            .expect("element counts are validated at construction")
        };
        [span(0), span(1)]
    }

    /// Order-(0, 0) tensor-product basis values on a known element.
    fn active_basis_values(&self, element_indices: [usize; 2], coordinates: [f64; 2]) -> Vec<f64> {
        let [p0, p1] = self.parameters.degrees;
        let first = self.first_active_dof(element_indices);

        let mut values = Vec::with_capacity(self.num_element_dofs());
        for i in 0..=p0 {
            let basis_axis0 = basis::evaluate(coordinates[0], first[0] + i, p0, &self.knot_vectors[0]);
            for j in 0..=p1 {
                let basis_axis1 =
                    basis::evaluate(coordinates[1], first[1] + j, p1, &self.knot_vectors[1]);
                values.push(basis_axis0 * basis_axis1);
            }
        }
        values
    }
}
