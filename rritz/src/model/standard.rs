use rand::Rng;

use super::{Optimum, RatioProblem};
use crate::math::linalg::{is_hermitian, max_eigenpair, rayleigh_quotient, CMatrix, CVector, HERMITIAN_TOL};
use crate::math::sample::{gaussian_matrix, CandidateKind};

/// `f(w) = w^H M w / w^H w` for Hermitian `M`.
///
/// The maximum over unit vectors is the largest eigenvalue of `M`, attained
/// at its eigenvector. Candidates are real-valued.
#[derive(Debug, Clone)]
pub struct StandardProblem {
    pub m: CMatrix,
}

impl StandardProblem {
    pub fn new(m: CMatrix) -> anyhow::Result<Self> {
        anyhow::ensure!(is_hermitian(&m, HERMITIAN_TOL), "M must be Hermitian");
        Ok(Self { m })
    }

    /// `M = A^H A` with Gaussian `A`, Hermitian positive semidefinite.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let a = gaussian_matrix(rng);
        Self { m: a.adjoint() * a }
    }
}

impl RatioProblem for StandardProblem {
    fn name(&self) -> &'static str {
        "ex1"
    }

    fn candidate_kind(&self) -> CandidateKind {
        CandidateKind::Real
    }

    fn objective(&self, w: &CVector) -> f64 {
        rayleigh_quotient(&self.m, w)
    }

    fn target(&self) -> &CMatrix {
        &self.m
    }

    fn solve(&self) -> anyhow::Result<Optimum> {
        let (eigenvalue, vector) = max_eigenpair(&self.m)?;
        let objective = self.objective(&vector);
        tracing::debug!(problem = self.name(), eigenvalue, objective, "solved");
        Ok(Optimum { eigenvalue, vector, objective })
    }

    fn bound(&self, optimum: &Optimum) -> f64 {
        optimum.objective
    }
}
