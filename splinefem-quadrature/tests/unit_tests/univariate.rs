use splinefem_quadrature::univariate::gauss;
use splinefem_quadrature::{integrate, Error};

use matrixcompare::assert_scalar_eq;

#[test]
fn gauss_rules_satisfy_expected_accuracy() {
    for n in 1..=32 {
        let expected_polynomial_degree = 2 * n - 1;
        let rule = gauss(n).unwrap();

        assert_eq!(rule.0.len(), n);
        assert_eq!(rule.1.len(), n);

        // Weights of a Gauss rule are all positive
        assert!(rule.0.iter().all(|&w| w > 0.0));

        // Integrate all monomials the rule should handle exactly
        for alpha in 0..=expected_polynomial_degree as i32 {
            let monomial_integral = (1.0 - (-1.0f64).powi(alpha + 1)) / (alpha as f64 + 1.0);
            let estimated_integral = integrate(&rule, |x| x.powi(alpha));

            assert_scalar_eq!(estimated_integral, monomial_integral, comp = abs, tol = 1e-14);
        }
    }
}

#[test]
fn small_rules_match_tabulated_values() {
    let (weights, points) = gauss(1).unwrap();
    assert_scalar_eq!(weights[0], 2.0, comp = abs, tol = 1e-15);
    assert_scalar_eq!(points[0], 0.0, comp = abs, tol = 1e-15);

    let (weights, points) = gauss(2).unwrap();
    let node = 1.0 / 3.0f64.sqrt();
    let mut sorted: Vec<_> = points.iter().copied().collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_scalar_eq!(sorted[0], -node, comp = abs, tol = 1e-15);
    assert_scalar_eq!(sorted[1], node, comp = abs, tol = 1e-15);
    assert!(weights.iter().all(|&w| (w - 1.0).abs() < 1e-15));

    let (weights, points) = gauss(3).unwrap();
    let node = (3.0f64 / 5.0).sqrt();
    let mut rule: Vec<_> = points.iter().copied().zip(weights).collect();
    rule.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
    let expected = [(-node, 5.0 / 9.0), (0.0, 8.0 / 9.0), (node, 5.0 / 9.0)];
    for ((point, weight), (expected_point, expected_weight)) in rule.into_iter().zip(expected) {
        assert_scalar_eq!(point, expected_point, comp = abs, tol = 1e-15);
        assert_scalar_eq!(weight, expected_weight, comp = abs, tol = 1e-15);
    }
}

#[test]
fn rules_are_symmetric() {
    for n in 1..=12 {
        let (weights, points) = gauss(n).unwrap();
        for i in 0..n {
            let mirror = n - i - 1;
            assert_scalar_eq!(points[i], -points[mirror], comp = abs, tol = 1e-15);
            assert_scalar_eq!(weights[i], weights[mirror], comp = abs, tol = 1e-15);
        }
    }
}

#[test]
fn zero_point_rules_are_unavailable() {
    assert_eq!(gauss(0), Err(Error::NoRuleAvailable { num_points: 0 }));
}
