use std::fmt::Write;

use anyhow::Context;

use crate::experiment::RunReport;

/// Human-readable summary, scalars rounded to 2 decimals.
pub fn render_text(report: &RunReport) -> String {
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = writeln!(out, "== {} ({} candidates)", report.problem, report.candidates.as_str());
    let _ = writeln!(out, "eig_val_max = {:.2}", report.eigenvalue);
    let _ = writeln!(out, "f(w_opt) = {:.2}", report.objective_at_optimum);
    let _ = writeln!(out, "power_iteration = {:.2}", report.power_iteration);
    for d in &report.diagnostics {
        let _ = writeln!(out, "{} = {:.2}", d.name, d.value);
    }
    let _ = writeln!(out, "max_ratio = {:.6}", report.max_ratio);
    let _ = writeln!(out, "n_violations = 0 means that the theorem is correct");
    let _ = writeln!(out, "n_violations = {} (of {} trials)", report.violations, report.trials);
    out
}

pub fn to_json(report: &RunReport) -> anyhow::Result<String> {
    serde_json::to_string_pretty(report).context("serialize run report failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::sample::CandidateKind;
    use crate::model::Diagnostic;

    fn sample_report() -> RunReport {
        RunReport {
            problem: "ex2".to_string(),
            candidates: CandidateKind::Complex,
            eigenvalue: 4.256,
            objective_at_optimum: 4.2559999,
            bound: 4.256,
            power_iteration: 4.25600001,
            diagnostics: vec![Diagnostic::new("f_w", 1.5), Diagnostic::new("g_y", 1.5)],
            trials: 3,
            violations: 0,
            max_ratio: 0.75,
        }
    }

    #[test]
    fn text_report() {
        let text = render_text(&sample_report());
        let expected = "\
== ex2 (complex candidates)
eig_val_max = 4.26
f(w_opt) = 4.26
power_iteration = 4.26
f_w = 1.50
g_y = 1.50
max_ratio = 0.750000
n_violations = 0 means that the theorem is correct
n_violations = 0 (of 3 trials)
";
        assert_eq!(text, expected);
    }

    #[test]
    fn json_report() {
        let json = to_json(&sample_report()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["problem"], "ex2");
        assert_eq!(v["candidates"], "complex");
        assert_eq!(v["violations"], 0);
        assert_eq!(v["diagnostics"][1]["name"], "g_y");
    }
}
