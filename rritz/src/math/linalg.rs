use anyhow::Context;
use nalgebra::{Cholesky, Matrix3, SymmetricEigen, Vector3};
use num_complex::Complex64;

/// 3x3 complex matrix used by every problem variant.
pub type CMatrix = Matrix3<Complex64>;
/// 3x1 complex column vector.
pub type CVector = Vector3<Complex64>;

/// Tolerance for the Hermitian invariant `M == M^H`.
pub const HERMITIAN_TOL: f64 = 1e-9;

/// Imaginary residue (relative) above which a quadratic form is reported.
const IMAG_RESIDUE_TOL: f64 = 1e-9;

pub fn is_hermitian(m: &CMatrix, tol: f64) -> bool {
    (m - m.adjoint()).iter().all(|z| z.norm() <= tol)
}

/// `(M + M^H) / 2`, the nearest Hermitian matrix.
pub fn hermitian_part(m: &CMatrix) -> CMatrix {
    (m + m.adjoint()) * Complex64::new(0.5, 0.0)
}

/// `w^H M w`, complex in general.
pub fn quadratic_form(m: &CMatrix, w: &CVector) -> Complex64 {
    w.dotc(&(m * w))
}

/// Real part of a value that is real in exact arithmetic.
pub fn real_part(z: Complex64) -> f64 {
    if z.im.abs() > IMAG_RESIDUE_TOL * z.re.abs().max(1.0) {
        tracing::trace!(re = z.re, im = z.im, "discarding imaginary residue");
    }
    z.re
}

/// `w^H M w / w^H w`. `w` need not be normalized.
pub fn rayleigh_quotient(m: &CMatrix, w: &CVector) -> f64 {
    real_part(quadratic_form(m, w) / w.dotc(w))
}

/// `w^H A w / w^H B w`.
pub fn generalized_rayleigh_quotient(a: &CMatrix, b: &CMatrix, w: &CVector) -> f64 {
    real_part(quadratic_form(a, w) / quadratic_form(b, w))
}

/// `u u^H`, a rank-one Hermitian matrix.
pub fn outer_hermitian(u: &CVector) -> CMatrix {
    u * u.adjoint()
}

/// Largest eigenvalue of a Hermitian matrix and its unit-norm eigenvector.
///
/// The input is symmetrized before the decomposition so rounding residue in
/// the upper triangle cannot leak into the result; the eigenvalues of a
/// Hermitian matrix are real, so the argmax is a plain `f64` comparison.
pub fn max_eigenpair(m: &CMatrix) -> anyhow::Result<(f64, CVector)> {
    let eigen = SymmetricEigen::new(hermitian_part(m));
    let (index, value) = eigen
        .eigenvalues
        .iter()
        .copied()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .context("eigendecomposition returned no eigenvalues")?;
    let vector: CVector = eigen.eigenvectors.column(index).into_owned();
    Ok((value, vector.normalize()))
}

/// Reduction of the pencil `(A, B)` to a standard Hermitian problem.
///
/// With `B = C C^H` (C lower-triangular), `D = C^-1 A C^-H` and
/// `y = C^H w` give `w^H A w / w^H B w = y^H D y / y^H y`.
#[derive(Debug, Clone)]
pub struct CholeskyReduction {
    pub c: CMatrix,
    pub c_h: CMatrix,
    pub c_h_inv: CMatrix,
    pub d: CMatrix,
}

impl CholeskyReduction {
    pub fn new(a: &CMatrix, b: &CMatrix) -> anyhow::Result<Self> {
        let c = Cholesky::new(*b)
            .context("Cholesky factorization failed: B is not positive definite")?
            .l();
        // complex square roots of a negative pivot land on the imaginary axis
        anyhow::ensure!(
            c.diagonal().iter().all(|z| z.re > 0.0 && z.im.abs() <= HERMITIAN_TOL * z.re),
            "Cholesky factorization failed: B is not positive definite"
        );
        let c_inv = c.try_inverse().context("Cholesky factor C is singular")?;
        let c_h = c.adjoint();
        let c_h_inv = c_inv.adjoint();
        let d = c_inv * a * c_h_inv;
        Ok(Self { c, c_h, c_h_inv, d })
    }

    /// `y = C^H w`
    pub fn to_reduced(&self, w: &CVector) -> CVector {
        self.c_h * w
    }

    /// `w = C^-H y`
    pub fn from_reduced(&self, y: &CVector) -> CVector {
        self.c_h_inv * y
    }
}

/// Power iteration estimate of the dominant eigenvalue of a square complex
/// matrix, used as an independent check on the eigen-solver.
pub fn dominant_eigenvalue_power_iteration(m: &CMatrix, max_iter: usize, tol: f64) -> f64 {
    let mut x = CVector::repeat(Complex64::new(1.0 / 3f64.sqrt(), 0.0));
    let mut lambda_old = 0.0;

    for _ in 0..max_iter {
        let y = m * x;
        // Rayleigh quotient approx
        let den = x.dotc(&x);
        let lambda = if den.re > 0.0 { real_part(x.dotc(&y) / den) } else { 0.0 };

        let norm = y.norm();
        if norm > 0.0 {
            x = y.unscale(norm);
        }
        if (lambda - lambda_old).abs() < tol * lambda.abs().max(1.0) {
            return lambda;
        }
        lambda_old = lambda;
    }
    lambda_old
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn sample_hermitian() -> CMatrix {
        CMatrix::new(
            c(4.0, 0.0), c(1.0, 2.0), c(0.0, -1.0),
            c(1.0, -2.0), c(3.0, 0.0), c(0.5, 0.5),
            c(0.0, 1.0), c(0.5, -0.5), c(2.0, 0.0),
        )
    }

    #[test]
    fn detects_hermitian() {
        let m = sample_hermitian();
        assert!(is_hermitian(&m, HERMITIAN_TOL));

        let mut broken = m;
        broken[(0, 1)] = c(1.0, -2.0);
        assert!(!is_hermitian(&broken, HERMITIAN_TOL));
    }

    #[test]
    fn diagonal_eigenpair() {
        let m = CMatrix::from_diagonal(&CVector::new(c(1.0, 0.0), c(7.0, 0.0), c(3.0, 0.0)));
        let (value, vector) = max_eigenpair(&m).unwrap();
        assert!((value - 7.0).abs() < 1e-12);
        assert!((vector[1].norm() - 1.0).abs() < 1e-12);
        assert!(vector[0].norm() < 1e-12 && vector[2].norm() < 1e-12);
    }

    #[test]
    fn eigenvector_attains_eigenvalue() {
        let m = sample_hermitian();
        let (value, vector) = max_eigenpair(&m).unwrap();
        assert!((vector.norm() - 1.0).abs() < 1e-12);
        assert!((rayleigh_quotient(&m, &vector) - value).abs() < 1e-9);
        let residual = (m * vector - vector * Complex64::new(value, 0.0)).norm();
        assert!(residual < 1e-9, "residual {residual}");
    }

    #[test]
    fn rayleigh_quotient_is_scale_invariant() {
        let m = sample_hermitian();
        let w = CVector::new(c(1.0, 1.0), c(-2.0, 0.5), c(0.0, 3.0));
        let scaled = w * Complex64::new(2.5, -1.0);
        assert!((rayleigh_quotient(&m, &w) - rayleigh_quotient(&m, &scaled)).abs() < 1e-12);
    }

    #[test]
    fn reduction_preserves_quotient() {
        let a = sample_hermitian();
        let b = CMatrix::from_diagonal(&CVector::new(c(2.0, 0.0), c(1.0, 0.0), c(5.0, 0.0)));
        let red = CholeskyReduction::new(&a, &b).unwrap();
        let w = CVector::new(c(0.3, -1.0), c(1.0, 0.0), c(-0.7, 0.2));
        let f = generalized_rayleigh_quotient(&a, &b, &w);
        let g = rayleigh_quotient(&red.d, &red.to_reduced(&w));
        assert!((f - g).abs() < 1e-12 * f.abs().max(1.0));
        assert!((red.from_reduced(&red.to_reduced(&w)) - w).norm() < 1e-12);
        assert!((red.c * red.c_h - b).norm() < 1e-12);
    }

    #[test]
    fn reduction_rejects_indefinite_b() {
        let a = sample_hermitian();
        let b = CMatrix::from_diagonal(&CVector::new(c(1.0, 0.0), c(-1.0, 0.0), c(1.0, 0.0)));
        assert!(CholeskyReduction::new(&a, &b).is_err());
    }

    #[test]
    fn power_iteration_matches_eigen_solver() {
        let m = sample_hermitian();
        let (value, _) = max_eigenpair(&m).unwrap();
        let estimate = dominant_eigenvalue_power_iteration(&m, 10_000, 1e-13);
        assert!((estimate - value).abs() < 1e-6 * value.abs());
    }
}
