use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::math::sample::unit_vector;
use crate::model::RatioProblem;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VerifyConfig {
    pub trials: usize,
    /// Ratios are rounded to this many decimals before comparing against 1,
    /// so rounding noise around the optimum does not count as a violation.
    pub round_digits: u32,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self { trials: 1000, round_digits: 6 }
    }
}

/// One Monte Carlo draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trial {
    pub index: usize,
    pub value: f64,
    pub ratio: f64,
    pub rounded: f64,
    pub violation: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Verification {
    pub trials: usize,
    pub violations: usize,
    pub max_ratio: f64,
}

pub fn round_to(x: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (x * scale).round() / scale
}

/// `round(value / bound, digits) > 1`
pub fn is_violation(value: f64, bound: f64, digits: u32) -> bool {
    round_to(value / bound, digits) > 1.0
}

pub fn verify<P, R>(problem: &P, bound: f64, cfg: &VerifyConfig, rng: &mut R) -> Verification
where
    P: RatioProblem + ?Sized,
    R: Rng + ?Sized,
{
    verify_with(problem, bound, cfg, rng, |_| {})
}

/// Draws `cfg.trials` unit-norm candidates and counts those whose objective
/// exceeds `bound`. Every trial is handed to `on_trial`.
pub fn verify_with<P, R, F>(
    problem: &P,
    bound: f64,
    cfg: &VerifyConfig,
    rng: &mut R,
    mut on_trial: F,
) -> Verification
where
    P: RatioProblem + ?Sized,
    R: Rng + ?Sized,
    F: FnMut(&Trial),
{
    let kind = problem.candidate_kind();
    let mut violations = 0;
    let mut max_ratio = f64::NEG_INFINITY;

    for index in 0..cfg.trials {
        let w = unit_vector(rng, kind);
        let value = problem.objective(&w);
        let ratio = value / bound;
        let rounded = round_to(ratio, cfg.round_digits);
        let violation = rounded > 1.0;
        if violation {
            violations += 1;
            tracing::warn!(problem = problem.name(), index, value, bound, ratio, "optimum exceeded");
        }
        max_ratio = max_ratio.max(ratio);
        on_trial(&Trial { index, value, ratio, rounded, violation });
    }

    Verification { trials: cfg.trials, violations, max_ratio }
}
