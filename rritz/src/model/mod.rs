pub mod generalized;
pub mod shifted;
pub mod standard;

use rand::RngCore;
use serde::Serialize;

use crate::math::linalg::{CMatrix, CVector};
use crate::math::sample::CandidateKind;

/// Maximizer of a ratio objective over unit-norm vectors.
#[derive(Debug, Clone)]
pub struct Optimum {
    /// Largest eigenvalue of the problem's Hermitian matrix.
    pub eigenvalue: f64,
    /// Unit-norm maximizer.
    pub vector: CVector,
    /// Objective evaluated at `vector`.
    pub objective: f64,
}

/// Named intermediate quantity carried into the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub name: String,
    pub value: f64,
}

impl Diagnostic {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self { name: name.into(), value }
    }
}

/// A quadratic-form ratio whose maximum over the unit sphere is given by an
/// eigenvalue.
pub trait RatioProblem {
    fn name(&self) -> &'static str;

    fn candidate_kind(&self) -> CandidateKind;

    /// Objective at `w`; callers normalize `w` where the constraint requires it.
    fn objective(&self, w: &CVector) -> f64;

    /// Matrix whose dominant eigenvalue is the maximum of the objective.
    fn target(&self) -> &CMatrix;

    fn solve(&self) -> anyhow::Result<Optimum>;

    /// Value each Monte Carlo trial is compared against.
    fn bound(&self, optimum: &Optimum) -> f64 {
        optimum.eigenvalue
    }

    fn diagnostics(&self, _optimum: &Optimum, _rng: &mut dyn RngCore) -> Vec<Diagnostic> {
        Vec::new()
    }
}
