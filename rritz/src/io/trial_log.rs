use anyhow::Context;

use crate::experiment::RunReport;
use crate::verify::Trial;

/// Write a per-trial diagnostic log: a `key=value` header followed by CSV rows.
///
/// Returns the path of the created `trials_<run_id>.txt`.
pub fn write_trial_log(
    out_dir: impl AsRef<std::path::Path>,
    run_id: &str,
    report: &RunReport,
    trials: &[Trial],
) -> anyhow::Result<std::path::PathBuf> {
    use std::io::Write;

    anyhow::ensure!(
        trials.len() == report.trials,
        "trial count mismatch: report has {}, log has {}",
        report.trials,
        trials.len()
    );

    std::fs::create_dir_all(out_dir.as_ref()).context("create trial log dir failed")?;
    let path = out_dir.as_ref().join(format!("trials_{}.txt", run_id));
    let mut f = std::fs::File::create(&path)
        .with_context(|| format!("create trial log file failed (path={:?})", path))?;

    writeln!(f, "run_id={}", run_id)?;
    writeln!(f, "problem={}", report.problem)?;
    writeln!(f, "candidates={}", report.candidates.as_str())?;
    writeln!(f, "eigenvalue={:.6}", report.eigenvalue)?;
    writeln!(f, "bound={:.6}", report.bound)?;
    writeln!(f, "trials={}", report.trials)?;
    writeln!(f, "violations={}", report.violations)?;
    writeln!(f)?;

    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(f);
    wtr.write_record(["trial", "value", "ratio", "rounded_ratio", "violation"])?;
    for t in trials {
        wtr.write_record([
            t.index.to_string(),
            format!("{:.6}", t.value),
            format!("{:.6}", t.ratio),
            format!("{:.6}", t.rounded),
            u8::from(t.violation).to_string(),
        ])?;
    }
    wtr.flush().context("flush trial log failed")?;

    Ok(path)
}
