//! Integration point providers for element quadrature.

pub use splinefem_quadrature::Rule1d;

/// A source of univariate quadrature rules on the reference interval
/// `[-1, 1]`.
///
/// Element integration requests one rule per axis with `degree + 1` points.
/// Implementations must fail for point counts they cannot supply rather than
/// silently degrading the integration order.
pub trait IntegrationPointProvider {
    /// Returns the rule with the given number of points as parallel
    /// `(weights, points)` vectors.
    fn integration_points(&self, num_points: usize) -> eyre::Result<Rule1d>;
}

impl<F> IntegrationPointProvider for F
where
    F: Fn(usize) -> eyre::Result<Rule1d>,
{
    fn integration_points(&self, num_points: usize) -> eyre::Result<Rule1d> {
        self(num_points)
    }
}

/// Gauss-Legendre rules of any positive size, computed on demand.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussLegendre;

impl IntegrationPointProvider for GaussLegendre {
    fn integration_points(&self, num_points: usize) -> eyre::Result<Rule1d> {
        Ok(splinefem_quadrature::univariate::gauss(num_points)?)
    }
}
