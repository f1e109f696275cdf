//! Gaussian draws for matrices and candidate vectors.
//!
//! Real and imaginary parts are independent standard normals.

use num_complex::Complex64;
use rand::Rng;
use rand_distr::StandardNormal;

use super::linalg::{CMatrix, CVector};

/// Which field the Monte Carlo candidates are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    Real,
    Complex,
}

impl CandidateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CandidateKind::Real => "real",
            CandidateKind::Complex => "complex",
        }
    }
}

fn normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.sample::<f64, _>(StandardNormal)
}

pub fn gaussian_complex<R: Rng + ?Sized>(rng: &mut R) -> Complex64 {
    let re = normal(rng);
    let im = normal(rng);
    Complex64::new(re, im)
}

pub fn gaussian_matrix<R: Rng + ?Sized>(rng: &mut R) -> CMatrix {
    CMatrix::from_fn(|_, _| gaussian_complex(rng))
}

pub fn gaussian_vector<R: Rng + ?Sized>(rng: &mut R, kind: CandidateKind) -> CVector {
    CVector::from_fn(|_, _| match kind {
        CandidateKind::Real => Complex64::new(normal(rng), 0.0),
        CandidateKind::Complex => gaussian_complex(rng),
    })
}

/// Gaussian direction normalized to unit Euclidean norm.
///
/// A draw whose norm underflows is discarded and redrawn.
pub fn unit_vector<R: Rng + ?Sized>(rng: &mut R, kind: CandidateKind) -> CVector {
    loop {
        if let Some(w) = gaussian_vector(rng, kind).try_normalize(f64::MIN_POSITIVE) {
            return w;
        }
    }
}
