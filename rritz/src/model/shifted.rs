use anyhow::Context;
use num_complex::Complex64;
use rand::{Rng, RngCore};

use super::{Diagnostic, Optimum, RatioProblem};
use crate::math::linalg::{
    is_hermitian, max_eigenpair, outer_hermitian, quadratic_form, real_part, CMatrix, CVector,
    CholeskyReduction, HERMITIAN_TOL,
};
use crate::math::sample::{gaussian_vector, CandidateKind};

pub const DEFAULT_ALPHA: f64 = 10.0;

/// `f(w) = (1 + alpha w^H A w) / (1 + alpha w^H B w)` for rank-one Hermitian
/// `A = u u^H`, `B = v v^H`.
///
/// On the unit sphere `f(w) = w^H (A + I/alpha) w / w^H (B + I/alpha) w`, so
/// the maximum is the largest eigenvalue of
/// `D = (B + I/alpha)^-1 (A + I/alpha)`.
#[derive(Debug, Clone)]
pub struct ShiftedProblem {
    pub alpha: f64,
    pub a: CMatrix,
    pub b: CMatrix,
    d: CMatrix,
    reduction: CholeskyReduction,
}

impl ShiftedProblem {
    pub fn new(a: CMatrix, b: CMatrix, alpha: f64) -> anyhow::Result<Self> {
        anyhow::ensure!(alpha.is_finite() && alpha > 0.0, "alpha must be positive, got {alpha}");
        anyhow::ensure!(is_hermitian(&a, HERMITIAN_TOL), "A must be Hermitian");
        anyhow::ensure!(is_hermitian(&b, HERMITIAN_TOL), "B must be Hermitian");

        let shift = CMatrix::identity() * Complex64::new(1.0 / alpha, 0.0);
        let a_shifted = a + shift;
        let b_shifted = b + shift;
        let b_shifted_inv = b_shifted
            .try_inverse()
            .context("B + I/alpha is singular")?;
        let d = b_shifted_inv * a_shifted;
        let reduction = CholeskyReduction::new(&a_shifted, &b_shifted)?;
        Ok(Self { alpha, a, b, d, reduction })
    }

    /// `A = u u^H`, `B = v v^H` with Gaussian `u`, `v`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, alpha: f64) -> anyhow::Result<Self> {
        let u = gaussian_vector(rng, CandidateKind::Complex);
        let v = gaussian_vector(rng, CandidateKind::Complex);
        Self::new(outer_hermitian(&u), outer_hermitian(&v), alpha)
    }

    /// `(B + I/alpha)^-1 (A + I/alpha)`, not Hermitian in general.
    pub fn d(&self) -> &CMatrix {
        &self.d
    }

    /// `|| D w - lambda w ||`
    pub fn eigen_residual(&self, lambda: f64, w: &CVector) -> f64 {
        (self.d * w - w.scale(lambda)).norm()
    }
}

impl RatioProblem for ShiftedProblem {
    fn name(&self) -> &'static str {
        "ex4"
    }

    fn candidate_kind(&self) -> CandidateKind {
        CandidateKind::Complex
    }

    fn objective(&self, w: &CVector) -> f64 {
        let one = Complex64::new(1.0, 0.0);
        let num = one + quadratic_form(&self.a, w) * self.alpha;
        let den = one + quadratic_form(&self.b, w) * self.alpha;
        real_part(num / den)
    }

    fn target(&self) -> &CMatrix {
        &self.d
    }

    // D is similar to the Hermitian C^-1 (A + I/alpha) C^-H, which is what
    // gets decomposed; w_opt = C^-H y_opt is then an eigenvector of D.
    fn solve(&self) -> anyhow::Result<Optimum> {
        let (eigenvalue, y_opt) = max_eigenpair(&self.reduction.d)?;
        let vector = self.reduction.from_reduced(&y_opt).normalize();
        let objective = self.objective(&vector);
        tracing::debug!(problem = self.name(), alpha = self.alpha, eigenvalue, objective, "solved");
        Ok(Optimum { eigenvalue, vector, objective })
    }

    fn diagnostics(&self, optimum: &Optimum, _rng: &mut dyn RngCore) -> Vec<Diagnostic> {
        vec![
            Diagnostic::new("f(eig_vec_max)", optimum.objective),
            Diagnostic::new("eig_residual", self.eigen_residual(optimum.eigenvalue, &optimum.vector)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rank_one_inputs_are_hermitian() {
        let p = ShiftedProblem::random(&mut StdRng::seed_from_u64(41), DEFAULT_ALPHA).unwrap();
        assert!(is_hermitian(&p.a, HERMITIAN_TOL));
        assert!(is_hermitian(&p.b, HERMITIAN_TOL));
        let (largest, _) = max_eigenpair(&p.a).unwrap();
        // rank one: trace equals the only non-zero eigenvalue
        let trace: f64 = p.a.diagonal().iter().map(|z| z.re).sum();
        assert!((largest - trace).abs() <= 1e-9 * trace);
    }

    #[test]
    fn optimum_is_eigenvector_of_d() {
        let p = ShiftedProblem::random(&mut StdRng::seed_from_u64(42), DEFAULT_ALPHA).unwrap();
        let opt = p.solve().unwrap();
        assert!((opt.objective - opt.eigenvalue).abs() <= 1e-6 * opt.eigenvalue);
        assert!(p.eigen_residual(opt.eigenvalue, &opt.vector) < 1e-8 * opt.eigenvalue.max(1.0));
    }

    #[test]
    fn rejects_non_positive_alpha() {
        let a = CMatrix::identity();
        assert!(ShiftedProblem::new(a, a, 0.0).is_err());
        assert!(ShiftedProblem::new(a, a, -1.0).is_err());
    }

    #[test]
    fn identical_pair_has_unit_optimum() {
        let u = CVector::new(
            Complex64::new(1.0, 0.5),
            Complex64::new(0.0, -1.0),
            Complex64::new(2.0, 0.0),
        );
        let a = outer_hermitian(&u);
        let p = ShiftedProblem::new(a, a, DEFAULT_ALPHA).unwrap();
        let opt = p.solve().unwrap();
        assert!((opt.eigenvalue - 1.0).abs() < 1e-9);
    }
}
