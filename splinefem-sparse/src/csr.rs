use crate::Error;

use itertools::izip;
use nalgebra::{DMatrix, DVector};

use std::sync::Arc;

/// The fixed nonzero structure of a square CSR matrix.
///
/// `row_offsets` has length `size + 1` and is monotonically non-decreasing;
/// the column indices of row `i` occupy
/// `column_indices[row_offsets[i] .. row_offsets[i + 1]]` and are sorted
/// strictly ascending, so every row is duplicate-free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparsityPattern {
    row_offsets: Vec<usize>,
    column_indices: Vec<usize>,
}

impl SparsityPattern {
    /// Derives the pattern induced by element-to-dof connectivity.
    ///
    /// An entry (i, j) is structurally nonzero exactly when some element
    /// supports both dofs `i` and `j`. Row `i` is therefore the sorted union
    /// of the location maps of every element connected to dof `i`. The matrix
    /// size is one plus the largest dof index appearing in any map.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnconnectedDof`] if some dof below the largest
    /// index never appears in a location map; such a hole means the
    /// connectivity the maps came from is malformed.
    pub fn from_location_maps(location_maps: &[Vec<usize>]) -> Result<Self, Error> {
        let size = location_maps
            .iter()
            .flatten()
            .max()
            .map_or(0, |&max_dof| max_dof + 1);

        // Invert the element-to-dof maps into dof-to-element coupling
        let mut connected_elements = vec![Vec::new(); size];
        for (element, location_map) in location_maps.iter().enumerate() {
            for &dof in location_map {
                connected_elements[dof].push(element);
            }
        }

        let mut row_offsets = Vec::with_capacity(size + 1);
        let mut column_indices = Vec::new();
        let mut row_workspace = Vec::new();

        row_offsets.push(0);
        for (dof, elements) in connected_elements.iter().enumerate() {
            if elements.is_empty() {
                return Err(Error::UnconnectedDof { dof });
            }

            row_workspace.clear();
            for &element in elements {
                row_workspace.extend_from_slice(&location_maps[element]);
            }
            row_workspace.sort_unstable();
            row_workspace.dedup();

            column_indices.extend_from_slice(&row_workspace);
            row_offsets.push(column_indices.len());
        }

        Ok(Self {
            row_offsets,
            column_indices,
        })
    }

    pub fn size(&self) -> usize {
        self.row_offsets.len() - 1
    }

    pub fn nnz(&self) -> usize {
        self.column_indices.len()
    }

    pub fn row_offsets(&self) -> &[usize] {
        &self.row_offsets
    }

    pub fn column_indices(&self) -> &[usize] {
        &self.column_indices
    }

    /// The sorted column indices of row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.size()`.
    pub fn row(&self, i: usize) -> &[usize] {
        &self.column_indices[self.row_offsets[i]..self.row_offsets[i + 1]]
    }
}

/// A square CSR matrix with a fixed sparsity pattern and mutable values.
///
/// The pattern is shared behind an [`Arc`] and never mutated; only the value
/// buffer changes, and only through [`CsrMatrix::add_element_matrix`].
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix {
    pattern: Arc<SparsityPattern>,
    values: Vec<f64>,
}

impl CsrMatrix {
    /// Builds a zero-valued matrix with the pattern induced by the given
    /// location maps. See [`SparsityPattern::from_location_maps`].
    pub fn from_location_maps(location_maps: &[Vec<usize>]) -> Result<Self, Error> {
        let pattern = SparsityPattern::from_location_maps(location_maps)?;
        log::debug!(
            "derived sparsity pattern from {} location maps: {} dofs, {} nonzeros",
            location_maps.len(),
            pattern.size(),
            pattern.nnz()
        );
        let values = vec![0.0; pattern.nnz()];
        Ok(Self::from_pattern_and_values(Arc::new(pattern), values))
    }

    /// Wraps an existing pattern and value buffer.
    ///
    /// # Panics
    ///
    /// Panics if the value buffer length differs from the pattern's nonzero
    /// count.
    pub fn from_pattern_and_values(pattern: Arc<SparsityPattern>, values: Vec<f64>) -> Self {
        assert_eq!(
            pattern.nnz(),
            values.len(),
            "value buffer length must equal the pattern's nonzero count"
        );
        Self { pattern, values }
    }

    pub fn size(&self) -> usize {
        self.pattern.size()
    }

    pub fn nnz(&self) -> usize {
        self.pattern.nnz()
    }

    pub fn row_offsets(&self) -> &[usize] {
        self.pattern.row_offsets()
    }

    pub fn column_indices(&self) -> &[usize] {
        self.pattern.column_indices()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn pattern(&self) -> Arc<SparsityPattern> {
        Arc::clone(&self.pattern)
    }

    /// Returns the entry at `(i, j)`, or `0.0` for a structural zero.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexOutOfBounds`] if either index is not below
    /// the matrix size.
    pub fn get(&self, i: usize, j: usize) -> Result<f64, Error> {
        let size = self.size();
        if i >= size {
            return Err(Error::IndexOutOfBounds { index: i, size });
        }
        if j >= size {
            return Err(Error::IndexOutOfBounds { index: j, size });
        }

        let row_begin = self.pattern.row_offsets()[i];
        Ok(match self.pattern.row(i).binary_search(&j) {
            Ok(local) => self.values[row_begin + local],
            Err(_) => 0.0,
        })
    }

    /// Computes the matrix-vector product `A x`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::VectorSizeMismatch`] if `x` does not match the
    /// matrix size.
    pub fn mul_vector(&self, x: &DVector<f64>) -> Result<DVector<f64>, Error> {
        if x.len() != self.size() {
            return Err(Error::VectorSizeMismatch {
                expected: self.size(),
                actual: x.len(),
            });
        }

        let offsets = self.pattern.row_offsets();
        let mut result = DVector::zeros(self.size());
        for i in 0..self.size() {
            let range = offsets[i]..offsets[i + 1];
            let mut dot = 0.0;
            for (&j, value) in izip!(&self.pattern.column_indices()[range.clone()], &self.values[range]) {
                dot += value * x[j];
            }
            result[i] = dot;
        }
        Ok(result)
    }

    /// Accumulates a dense element matrix into the global matrix at the
    /// positions given by the location map ("scatter"). Values add onto the
    /// existing entries; the structure is untouched.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NonSquareElementMatrix`] or
    /// [`Error::LocationMapSizeMismatch`] for inconsistent operands, with
    /// [`Error::IndexOutOfBounds`] if the map references a dof outside the
    /// matrix, and with [`Error::EntryNotInPattern`] if a target entry is not
    /// structurally present. The latter means the scattered connectivity
    /// disagrees with the connectivity the pattern was derived from.
    pub fn add_element_matrix(
        &mut self,
        element_matrix: &DMatrix<f64>,
        location_map: &[usize],
    ) -> Result<(), Error> {
        if element_matrix.nrows() != element_matrix.ncols() {
            return Err(Error::NonSquareElementMatrix {
                nrows: element_matrix.nrows(),
                ncols: element_matrix.ncols(),
            });
        }
        if location_map.len() != element_matrix.nrows() {
            return Err(Error::LocationMapSizeMismatch {
                map_len: location_map.len(),
                matrix_dim: element_matrix.nrows(),
            });
        }

        let size = self.size();
        for (local_i, &global_i) in location_map.iter().enumerate() {
            if global_i >= size {
                return Err(Error::IndexOutOfBounds {
                    index: global_i,
                    size,
                });
            }

            let row_begin = self.pattern.row_offsets()[global_i];
            for (local_j, &global_j) in location_map.iter().enumerate() {
                let local = self
                    .pattern
                    .row(global_i)
                    .binary_search(&global_j)
                    .map_err(|_| Error::EntryNotInPattern {
                        row: global_i,
                        col: global_j,
                    })?;
                self.values[row_begin + local] += element_matrix[(local_i, local_j)];
            }
        }
        Ok(())
    }

    /// Copies the matrix into a [`nalgebra_sparse::CsrMatrix`].
    ///
    /// This is the sanctioned boundary for handing the assembled system to
    /// foreign consumers; the structural buffers are only read.
    pub fn to_nalgebra_csr(&self) -> nalgebra_sparse::CsrMatrix<f64> {
        nalgebra_sparse::CsrMatrix::try_from_csr_data(
            self.size(),
            self.size(),
            self.row_offsets().to_vec(),
            self.column_indices().to_vec(),
            self.values().to_vec(),
        )
        .expect("pattern invariants guarantee valid CSR data")
    }
}
