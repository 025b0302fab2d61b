//! Isogeometric finite element assembly on tensor-product B-spline patches.
//!
//! A [`BsplinePatch`] discretizes an axis-aligned rectangular 2D domain with
//! tensor-product B-spline basis functions of per-axis degree and continuity.
//! At construction it derives the clamped knot vectors and the element-to-dof
//! location maps; afterwards it can evaluate active basis functions and their
//! first derivatives at arbitrary points, integrate per-element stiffness and
//! load contributions with pluggable quadrature, and assemble them into a
//! sparsity-aware global system backed by [`splinefem_sparse::CsrMatrix`].
//!
//! Solving the assembled system is out of scope: the crate produces the
//! sparse matrix and right-hand side, plus a field evaluator for externally
//! computed dof values.

pub mod assembly;
pub mod basis;
pub mod error;
pub mod mesh;
pub mod patch;
pub mod quadrature;

pub use assembly::{ElementSystem, GlobalSystem};
pub use error::Error;
pub use patch::{BsplinePatch, PatchParameters, Side};
pub use quadrature::{GaussLegendre, IntegrationPointProvider};

pub extern crate nalgebra;
pub extern crate nalgebra_sparse;

pub mod sparse {
    pub use splinefem_sparse::*;
}
