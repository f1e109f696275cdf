use rand::RngCore;
use serde::Serialize;

use crate::config::{RunConfig, Variant};
use crate::math::linalg::dominant_eigenvalue_power_iteration;
use crate::math::sample::CandidateKind;
use crate::model::generalized::GeneralizedProblem;
use crate::model::shifted::ShiftedProblem;
use crate::model::standard::StandardProblem;
use crate::model::{Diagnostic, RatioProblem};
use crate::verify::{verify_with, Trial, VerifyConfig};

const POWER_MAX_ITER: usize = 10_000;
const POWER_TOL: f64 = 1e-12;

/// Outcome of one solve-and-verify pass.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub problem: String,
    pub candidates: CandidateKind,
    pub eigenvalue: f64,
    pub objective_at_optimum: f64,
    pub bound: f64,
    pub power_iteration: f64,
    pub diagnostics: Vec<Diagnostic>,
    pub trials: usize,
    pub violations: usize,
    pub max_ratio: f64,
}

pub fn run<P: RatioProblem + ?Sized>(
    problem: &P,
    cfg: &VerifyConfig,
    rng: &mut dyn RngCore,
) -> anyhow::Result<RunReport> {
    run_with(problem, cfg, rng, |_| {})
}

/// Solves `problem`, then checks the optimum against `cfg.trials` random
/// unit vectors. `on_trial` sees every draw.
pub fn run_with<P, F>(
    problem: &P,
    cfg: &VerifyConfig,
    rng: &mut dyn RngCore,
    on_trial: F,
) -> anyhow::Result<RunReport>
where
    P: RatioProblem + ?Sized,
    F: FnMut(&Trial),
{
    let optimum = problem.solve()?;
    let bound = problem.bound(&optimum);
    anyhow::ensure!(
        bound.is_finite() && bound > 0.0,
        "{}: optimum {bound} is not positive, ratio test undefined",
        problem.name()
    );

    let power_iteration =
        dominant_eigenvalue_power_iteration(problem.target(), POWER_MAX_ITER, POWER_TOL);
    let diagnostics = problem.diagnostics(&optimum, rng);
    let verification = verify_with(problem, bound, cfg, rng, on_trial);

    tracing::info!(
        problem = problem.name(),
        eigenvalue = optimum.eigenvalue,
        trials = verification.trials,
        violations = verification.violations,
        "run finished"
    );

    Ok(RunReport {
        problem: problem.name().to_string(),
        candidates: problem.candidate_kind(),
        eigenvalue: optimum.eigenvalue,
        objective_at_optimum: optimum.objective,
        bound,
        power_iteration,
        diagnostics,
        trials: verification.trials,
        violations: verification.violations,
        max_ratio: verification.max_ratio,
    })
}

/// Builds a fresh random instance of `variant` and runs it.
pub fn run_variant<F>(
    variant: Variant,
    cfg: &RunConfig,
    rng: &mut dyn RngCore,
    on_trial: F,
) -> anyhow::Result<RunReport>
where
    F: FnMut(&Trial),
{
    let verify_cfg = cfg.verify_config();
    match variant {
        Variant::Ex1 => {
            let problem = StandardProblem::random(rng);
            run_with(&problem, &verify_cfg, rng, on_trial)
        }
        Variant::Ex2 => {
            let problem = GeneralizedProblem::random(rng)?;
            run_with(&problem, &verify_cfg, rng, on_trial)
        }
        Variant::Ex4 => {
            let problem = ShiftedProblem::random(rng, cfg.alpha)?;
            run_with(&problem, &verify_cfg, rng, on_trial)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn every_variant_reports_zero_violations() {
        let cfg = RunConfig::default();
        let mut rng = StdRng::seed_from_u64(2024);
        for variant in Variant::ALL {
            let report = run_variant(variant, &cfg, &mut rng, |_| {}).unwrap();
            assert_eq!(report.problem, variant.name());
            assert_eq!(report.trials, 1000);
            assert_eq!(report.violations, 0, "{report:?}");
            assert!(report.max_ratio <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn sink_sees_every_trial() {
        let cfg = RunConfig { trials: 25, ..RunConfig::default() };
        let mut seen = Vec::new();
        let mut rng = StdRng::seed_from_u64(9);
        run_variant(Variant::Ex2, &cfg, &mut rng, |t| seen.push(t.index)).unwrap();
        assert_eq!(seen, (0..25).collect::<Vec<_>>());
    }
}
