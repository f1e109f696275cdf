use rand::{Rng, RngCore};

use super::{Diagnostic, Optimum, RatioProblem};
use crate::math::linalg::{
    generalized_rayleigh_quotient, is_hermitian, max_eigenpair, rayleigh_quotient, CMatrix,
    CVector, CholeskyReduction, HERMITIAN_TOL,
};
use crate::math::sample::{gaussian_matrix, gaussian_vector, CandidateKind};

/// `f(w) = w^H A w / w^H B w` for Hermitian `A` and positive definite `B`.
///
/// Solved through `B = C C^H`: with `y = C^H w` the ratio becomes the
/// standard quotient `g(y) = y^H D y / y^H y`, `D = C^-1 A C^-H`.
#[derive(Debug, Clone)]
pub struct GeneralizedProblem {
    pub a: CMatrix,
    pub b: CMatrix,
    reduction: CholeskyReduction,
}

impl GeneralizedProblem {
    pub fn new(a: CMatrix, b: CMatrix) -> anyhow::Result<Self> {
        anyhow::ensure!(is_hermitian(&a, HERMITIAN_TOL), "A must be Hermitian");
        anyhow::ensure!(is_hermitian(&b, HERMITIAN_TOL), "B must be Hermitian");
        let reduction = CholeskyReduction::new(&a, &b)?;
        Ok(Self { a, b, reduction })
    }

    /// `A = A0 A0^H`, `B = B0 B0^H` with Gaussian `A0`, `B0`.
    ///
    /// `B` is singular only on a measure-zero set, so the factorization
    /// failing is reported rather than retried.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> anyhow::Result<Self> {
        let a0 = gaussian_matrix(rng);
        let b0 = gaussian_matrix(rng);
        Self::new(a0 * a0.adjoint(), b0 * b0.adjoint())
    }

    pub fn reduction(&self) -> &CholeskyReduction {
        &self.reduction
    }

    /// `g(y) = y^H D y / y^H y`
    pub fn transformed_objective(&self, y: &CVector) -> f64 {
        rayleigh_quotient(&self.reduction.d, y)
    }
}

impl RatioProblem for GeneralizedProblem {
    fn name(&self) -> &'static str {
        "ex2"
    }

    fn candidate_kind(&self) -> CandidateKind {
        CandidateKind::Complex
    }

    fn objective(&self, w: &CVector) -> f64 {
        generalized_rayleigh_quotient(&self.a, &self.b, w)
    }

    fn target(&self) -> &CMatrix {
        &self.reduction.d
    }

    fn solve(&self) -> anyhow::Result<Optimum> {
        let (eigenvalue, y_opt) = max_eigenpair(&self.reduction.d)?;
        let vector = self.reduction.from_reduced(&y_opt).normalize();
        let objective = self.objective(&vector);
        tracing::debug!(problem = self.name(), eigenvalue, objective, "solved");
        Ok(Optimum { eigenvalue, vector, objective })
    }

    fn diagnostics(&self, optimum: &Optimum, rng: &mut dyn RngCore) -> Vec<Diagnostic> {
        let w = gaussian_vector(rng, CandidateKind::Complex);
        let y = self.reduction.to_reduced(&w);
        let y_opt = self.reduction.to_reduced(&optimum.vector);
        vec![
            Diagnostic::new("f_w", self.objective(&w)),
            Diagnostic::new("g_y", self.transformed_objective(&y)),
            Diagnostic::new("g_y_opt", self.transformed_objective(&y_opt)),
            Diagnostic::new("f_w_opt", optimum.objective),
        ]
    }
}
