use rritz::math::linalg::{is_hermitian, HERMITIAN_TOL};
use rritz::verify::VerifyConfig;
use rritz::{run, StandardProblem};

// f(w) = w^H M w / w^H w with M = A^H A. The largest eigenvalue of M should
// bound f over every unit vector; count the random vectors that beat it.
fn main() -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();

    let problem = StandardProblem::random(&mut rng);
    anyhow::ensure!(is_hermitian(&problem.m, HERMITIAN_TOL), "M is not Hermitian");

    let report = run(&problem, &VerifyConfig::default(), &mut rng)?;
    println!("the maximum eigenvalue = {:.2}", report.eigenvalue);
    println!("the maximum value of the ratio = {:.2}", report.objective_at_optimum);

    println!("n_violations = 0 means that the theorem is correct");
    println!("n_violations = {}", report.violations);

    Ok(())
}
