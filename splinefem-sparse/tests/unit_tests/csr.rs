use splinefem_sparse::{CsrMatrix, Error, SparsityPattern};

use matrixcompare::assert_scalar_eq;
use nalgebra::{DMatrix, DVector};
use proptest::prelude::*;

use std::sync::Arc;

// Elements:       A     B     C
// Dofs:        0-----1-----2-----3
//                    |
//                    |  Element: D
//                    |
//                    4
fn chain_location_maps() -> Vec<Vec<usize>> {
    vec![vec![0, 1], vec![1, 2], vec![2, 3], vec![1, 4]]
}

/// The chain matrix with values 0.5, 1.5, ... written into the nonzeros.
fn chain_matrix_with_counted_values() -> CsrMatrix {
    let pattern = SparsityPattern::from_location_maps(&chain_location_maps()).unwrap();
    let values = (0..pattern.nnz()).map(|k| k as f64 + 0.5).collect();
    CsrMatrix::from_pattern_and_values(Arc::new(pattern), values)
}

#[test]
fn pattern_from_location_maps_matches_dof_coupling() {
    let matrix = CsrMatrix::from_location_maps(&chain_location_maps()).unwrap();

    assert_eq!(matrix.size(), 5);
    assert_eq!(matrix.nnz(), 13);
    assert_eq!(matrix.row_offsets(), &[0, 2, 6, 9, 11, 13]);
    assert_eq!(
        matrix.column_indices(),
        &[0, 1, 0, 1, 2, 4, 1, 2, 3, 2, 3, 1, 4]
    );
    assert!(matrix.values().iter().all(|&value| value == 0.0));
}

#[test]
fn reads_return_stored_values_and_structural_zeros() {
    let matrix = chain_matrix_with_counted_values();

    #[rustfmt::skip]
    let expected = [
        0.5,  1.5,  0.0,  0.0,  0.0,
        2.5,  3.5,  4.5,  0.0,  5.5,
        0.0,  6.5,  7.5,  8.5,  0.0,
        0.0,  0.0,  9.5, 10.5,  0.0,
        0.0, 11.5,  0.0,  0.0, 12.5,
    ];

    for i in 0..5 {
        for j in 0..5 {
            assert_eq!(matrix.get(i, j), Ok(expected[i * 5 + j]));
        }
    }

    assert_eq!(matrix.get(5, 0), Err(Error::IndexOutOfBounds { index: 5, size: 5 }));
    assert_eq!(matrix.get(0, 5), Err(Error::IndexOutOfBounds { index: 5, size: 5 }));
    assert_eq!(matrix.get(5, 5), Err(Error::IndexOutOfBounds { index: 5, size: 5 }));
}

#[test]
fn matrix_vector_product_over_the_pattern() {
    let matrix = chain_matrix_with_counted_values();

    let x = DVector::from_vec(vec![-1.4, 4.2, 0.7, -3.1, 1.5]);
    let expected = [5.6, 22.6, 6.2, -25.9, 67.05];

    let product = matrix.mul_vector(&x).unwrap();

    assert_eq!(product.len(), 5);
    for (&computed, &reference) in product.iter().zip(&expected) {
        assert_scalar_eq!(computed, reference, comp = abs, tol = 1e-12);
    }

    assert_eq!(
        matrix.mul_vector(&DVector::zeros(4)),
        Err(Error::VectorSizeMismatch {
            expected: 5,
            actual: 4
        })
    );
}

#[test]
fn multiplying_by_ones_yields_row_sums() {
    let matrix = chain_matrix_with_counted_values();

    let ones = DVector::from_element(5, 1.0);
    let product = matrix.mul_vector(&ones).unwrap();

    let offsets = matrix.row_offsets();
    for i in 0..matrix.size() {
        let row_sum: f64 = matrix.values()[offsets[i]..offsets[i + 1]].iter().sum();
        assert_eq!(product[i], row_sum);
    }
}

#[test]
fn scatter_accumulates_element_matrices() {
    let mut matrix = CsrMatrix::from_location_maps(&chain_location_maps()).unwrap();

    let element_matrix = |value: f64| {
        DMatrix::from_row_slice(2, 2, &[value, -value, -value, value])
    };

    matrix.add_element_matrix(&element_matrix(1.0), &[0, 1]).unwrap();
    matrix.add_element_matrix(&element_matrix(2.0), &[1, 2]).unwrap();
    matrix.add_element_matrix(&element_matrix(3.0), &[2, 3]).unwrap();
    matrix.add_element_matrix(&element_matrix(4.0), &[1, 4]).unwrap();

    // The structure is untouched, only values accumulate
    assert_eq!(matrix.row_offsets(), &[0, 2, 6, 9, 11, 13]);
    assert_eq!(
        matrix.column_indices(),
        &[0, 1, 0, 1, 2, 4, 1, 2, 3, 2, 3, 1, 4]
    );

    let expected = [
        1.0, -1.0, -1.0, 7.0, -2.0, -4.0, -2.0, 5.0, -3.0, -3.0, 3.0, -4.0, 4.0,
    ];
    for (&computed, &reference) in matrix.values().iter().zip(&expected) {
        assert_scalar_eq!(computed, reference, comp = abs, tol = 1e-14);
    }
}

#[test]
fn scatter_rejects_inconsistent_operands() {
    let mut matrix = CsrMatrix::from_location_maps(&chain_location_maps()).unwrap();

    assert_eq!(
        matrix.add_element_matrix(&DMatrix::zeros(2, 1), &[1, 2]),
        Err(Error::NonSquareElementMatrix { nrows: 2, ncols: 1 })
    );
    assert_eq!(
        matrix.add_element_matrix(&DMatrix::zeros(1, 2), &[1, 2]),
        Err(Error::NonSquareElementMatrix { nrows: 1, ncols: 2 })
    );
    assert_eq!(
        matrix.add_element_matrix(&DMatrix::zeros(2, 2), &[1, 3, 4]),
        Err(Error::LocationMapSizeMismatch {
            map_len: 3,
            matrix_dim: 2
        })
    );
    assert_eq!(
        matrix.add_element_matrix(&DMatrix::zeros(2, 2), &[5, 0]),
        Err(Error::IndexOutOfBounds { index: 5, size: 5 })
    );

    // Dofs 1 and 3 never share an element, so (1, 3) is structurally zero
    assert_eq!(
        matrix.add_element_matrix(&DMatrix::zeros(2, 2), &[1, 3]),
        Err(Error::EntryNotInPattern { row: 1, col: 3 })
    );
}

#[test]
fn repeated_scatter_is_linear() {
    let maps = chain_location_maps();
    let mut once = CsrMatrix::from_location_maps(&maps).unwrap();
    let mut thrice = CsrMatrix::from_location_maps(&maps).unwrap();

    let element_matrix = DMatrix::from_row_slice(2, 2, &[2.0, -0.5, -0.5, 2.0]);

    once.add_element_matrix(&element_matrix, &[1, 2]).unwrap();
    for _ in 0..3 {
        thrice.add_element_matrix(&element_matrix, &[1, 2]).unwrap();
    }

    for (&single, &triple) in once.values().iter().zip(thrice.values()) {
        assert_scalar_eq!(3.0 * single, triple, comp = abs, tol = 1e-14);
    }

    // Scattering zeros changes nothing
    let before = once.values().to_vec();
    once.add_element_matrix(&DMatrix::zeros(2, 2), &[1, 2]).unwrap();
    assert_eq!(once.values(), before.as_slice());
}

#[test]
fn every_dof_must_connect_to_an_element() {
    let maps = vec![vec![0, 1], vec![3, 4]];
    assert_eq!(
        CsrMatrix::from_location_maps(&maps),
        Err(Error::UnconnectedDof { dof: 2 })
    );
}

#[test]
fn empty_map_collections_yield_empty_matrices() {
    let matrix = CsrMatrix::from_location_maps(&[]).unwrap();
    assert_eq!(matrix.size(), 0);
    assert_eq!(matrix.nnz(), 0);
    assert_eq!(matrix.row_offsets(), &[0]);
}

#[test]
fn conversion_to_nalgebra_preserves_buffers() {
    let matrix = chain_matrix_with_counted_values();
    let converted = matrix.to_nalgebra_csr();

    assert_eq!(converted.nrows(), matrix.size());
    assert_eq!(converted.ncols(), matrix.size());
    assert_eq!(converted.row_offsets(), matrix.row_offsets());
    assert_eq!(converted.col_indices(), matrix.column_indices());
    assert_eq!(converted.values(), matrix.values());
}

fn overlapping_chain() -> impl Strategy<Value = Vec<(usize, usize)>> {
    // (element width, forward step <= width) keeps consecutive elements
    // connected and leaves no dof uncovered
    proptest::collection::vec((2usize..=5).prop_flat_map(|width| (Just(width), 1..=width)), 1..16)
}

proptest! {
    #[test]
    fn derived_patterns_satisfy_csr_invariants(chain in overlapping_chain()) {
        let mut maps = Vec::new();
        let mut start = 0;
        for &(width, step) in &chain {
            maps.push((start..start + width).collect::<Vec<_>>());
            start += step;
        }

        let matrix = CsrMatrix::from_location_maps(&maps).unwrap();

        let offsets = matrix.row_offsets();
        prop_assert_eq!(offsets.len(), matrix.size() + 1);
        prop_assert_eq!(offsets[matrix.size()], matrix.nnz());
        prop_assert_eq!(matrix.values().len(), matrix.nnz());
        prop_assert!(offsets.windows(2).all(|pair| pair[0] <= pair[1]));

        for i in 0..matrix.size() {
            let row = &matrix.column_indices()[offsets[i]..offsets[i + 1]];
            prop_assert!(!row.is_empty());
            prop_assert!(row.windows(2).all(|pair| pair[0] < pair[1]));
            // Self-coupling always exists
            prop_assert!(row.binary_search(&i).is_ok());
        }
    }
}
