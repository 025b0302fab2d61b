//! Element-level integration and assembly of the global linear system.

use crate::patch::BsplinePatch;
use crate::quadrature::IntegrationPointProvider;

use itertools::izip;
use nalgebra::{DMatrix, DVector};
use splinefem_sparse::CsrMatrix;

/// The local stiffness matrix and load vector of a single element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSystem {
    pub matrix: DMatrix<f64>,
    pub vector: DVector<f64>,
}

/// The assembled global stiffness matrix and load vector.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalSystem {
    pub matrix: CsrMatrix,
    pub rhs: DVector<f64>,
}

impl<P: IntegrationPointProvider> BsplinePatch<P> {
    /// Integrates the stiffness matrix of the Laplace bilinear form and the
    /// load vector of the given source term over one element.
    ///
    /// Quadrature runs over the tensor product of two univariate rules with
    /// `degree + 1` points per axis, requested from the patch's integration
    /// point provider. Reference coordinates map to the element through the
    /// per-axis affine map, whose Jacobian determinant is constant per
    /// element.
    ///
    /// # Errors
    ///
    /// Fails if the provider cannot supply a requested rule, or if basis
    /// evaluation rejects the derivative orders.
    pub fn integrate_element_system(
        &self,
        element_indices: [usize; 2],
        source: impl Fn(f64, f64) -> f64,
    ) -> eyre::Result<ElementSystem> {
        let parameters = self.parameters();
        let [p0, p1] = parameters.degrees;
        let num_element_dofs = self.num_element_dofs();

        let mut stiffness = DMatrix::zeros(num_element_dofs, num_element_dofs);
        let mut load = DVector::zeros(num_element_dofs);

        let provider = self.integration_point_provider();
        let (weights_axis0, points_axis0) = provider.integration_points(p0 + 1)?;
        let (weights_axis1, points_axis1) = provider.integration_points(p1 + 1)?;

        let det_j = 0.25
            * (parameters.lengths[0] / parameters.num_elements[0] as f64)
            * (parameters.lengths[1] / parameters.num_elements[1] as f64);

        for (weight_axis0, &r) in izip!(&weights_axis0, &points_axis0) {
            for (weight_axis1, &s) in izip!(&weights_axis1, &points_axis1) {
                let weight = weight_axis0 * weight_axis1;
                let [x, y] = self.map_to_global([r, s], element_indices);

                let values = self.evaluate_active_basis_at([x, y], [0, 0])?;
                let gradients_x = self.evaluate_active_basis_at([x, y], [1, 0])?;
                let gradients_y = self.evaluate_active_basis_at([x, y], [0, 1])?;
                let source_value = source(x, y);

                for i in 0..num_element_dofs {
                    for j in 0..num_element_dofs {
                        stiffness[(i, j)] += (gradients_x[i] * gradients_x[j]
                            + gradients_y[i] * gradients_y[j])
                            * weight
                            * det_j;
                    }
                    load[i] += values[i] * source_value * weight * det_j;
                }
            }
        }

        Ok(ElementSystem {
            matrix: stiffness,
            vector: load,
        })
    }

    /// Assembles the global stiffness matrix and load vector over all
    /// elements in row-major element order.
    ///
    /// The sparsity pattern is derived once from the cached location maps;
    /// every element system is then scattered into the fixed pattern and its
    /// load entries added onto the global vector.
    ///
    /// # Errors
    ///
    /// Fails on provider or basis evaluation errors as in
    /// [`Self::integrate_element_system`], and propagates any scatter failure
    /// from the sparse engine.
    pub fn assemble_global_system(
        &self,
        source: impl Fn(f64, f64) -> f64,
    ) -> eyre::Result<GlobalSystem> {
        let mut matrix = CsrMatrix::from_location_maps(self.location_maps())?;
        let mut rhs = DVector::zeros(matrix.size());

        let num_elements = self.parameters().num_elements;
        for i_element in 0..num_elements[0] {
            for j_element in 0..num_elements[1] {
                let element_indices = [i_element, j_element];
                let element_system = self.integrate_element_system(element_indices, &source)?;

                let location_map = &self.location_maps()[self.element_offset(element_indices)];
                matrix.add_element_matrix(&element_system.matrix, location_map)?;
                for (&dof, &load) in izip!(location_map, element_system.vector.iter()) {
                    rhs[dof] += load;
                }
            }
        }

        log::debug!(
            "assembled global system: {} dofs, {} nonzeros, {} elements",
            matrix.size(),
            matrix.nnz(),
            self.location_maps().len()
        );

        Ok(GlobalSystem { matrix, rhs })
    }
}
