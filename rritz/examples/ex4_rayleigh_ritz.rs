use rritz::model::shifted::DEFAULT_ALPHA;
use rritz::verify::VerifyConfig;
use rritz::{run, ShiftedProblem};

// f(w) = (1 + alpha w^H A w) / (1 + alpha w^H B w) with A = u u^H, B = v v^H.
// max f = largest eigenvalue of D = (B + I/alpha)^-1 (A + I/alpha), attained
// at the corresponding eigenvector.
fn main() -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();

    let problem = ShiftedProblem::random(&mut rng, DEFAULT_ALPHA)?;
    let report = run(&problem, &VerifyConfig::default(), &mut rng)?;

    println!("eig_val_max = {:.2}", report.eigenvalue);
    println!("f(eig_vec_max) = {:.2}", report.objective_at_optimum);
    println!("max_f(w) = f(w_opt) = the largest eigenvalue of D");
    println!("====================================");
    println!("w_opt = eigenvector corres. to the largest eigenvalue");
    println!("====================================");

    println!("n_violations = 0 means that the theorem is correct");
    println!("n_violations = {}", report.violations);

    Ok(())
}
