use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use rritz::config::RunConfig;
use rritz::experiment::run_variant;
use rritz::io::report::{render_text, to_json};
use rritz::io::trial_log::write_trial_log;
use rritz::verify::Trial;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cfg = RunConfig::from_env()?;
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(seed = ?cfg.seed, trials = cfg.trials, round_digits = cfg.round_digits, "starting");

    let mut total_violations = 0;
    for &variant in &cfg.variants {
        let mut trials: Vec<Trial> = Vec::new();
        let keep_trials = cfg.trial_log_dir.is_some();
        let report = run_variant(variant, &cfg, &mut rng, |t| {
            if keep_trials {
                trials.push(*t);
            }
        })?;
        total_violations += report.violations;

        if cfg.json {
            println!("{}", to_json(&report)?);
        } else {
            print!("{}", render_text(&report));
        }

        if let Some(dir) = &cfg.trial_log_dir {
            let seed = cfg.seed.map_or_else(|| "unseeded".to_string(), |s| s.to_string());
            let run_id = format!("{}-{}", variant.name(), seed);
            let path = write_trial_log(dir, &run_id, &report, &trials)?;
            tracing::info!(path = %path.display(), "trial log written");
        }
    }

    if total_violations > 0 {
        tracing::warn!(total_violations, "optimum exceeded by random candidates");
    }
    Ok(())
}
