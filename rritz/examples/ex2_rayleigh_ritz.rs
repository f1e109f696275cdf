use rritz::verify::VerifyConfig;
use rritz::{run, GeneralizedProblem};

// f(w) = w^H A w / w^H B w. With B = C C^H and y = C^H w this is
// g(y) = y^H D y / y^H y, D = C^-1 A C^-H, so max f = largest eigenvalue of D.
fn main() -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();

    let problem = GeneralizedProblem::random(&mut rng)?;
    let report = run(&problem, &VerifyConfig::default(), &mut rng)?;

    let diag = |name: &str| {
        report
            .diagnostics
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.value)
            .unwrap_or(f64::NAN)
    };

    println!("f_w = {}", diag("f_w"));
    println!("g_y = {}", diag("g_y"));
    println!("We confirmed that f(w) = g(y).");
    println!("====================================");

    println!("g_y_opt = {:.2}", diag("g_y_opt"));
    println!("f_w_opt = {:.2}", diag("f_w_opt"));
    println!("eig_val_max = {:.2}", report.eigenvalue);
    println!("max_f(w) = max_g(y) = largest eigenvalue of D");
    println!("====================================");

    println!("n_violations = 0 means that the theorem is correct");
    println!("n_violations = {}", report.violations);

    Ok(())
}
