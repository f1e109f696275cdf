use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::model::shifted::DEFAULT_ALPHA;
use crate::verify::VerifyConfig;

/// Which demonstration to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// `w^H M w / w^H w`, `M = A^H A`
    Ex1,
    /// `w^H A w / w^H B w` via Cholesky reduction
    Ex2,
    /// `(1 + alpha w^H A w) / (1 + alpha w^H B w)`, rank-one `A`, `B`
    Ex4,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Ex1, Variant::Ex2, Variant::Ex4];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Ex1 => "ex1",
            Variant::Ex2 => "ex2",
            Variant::Ex4 => "ex4",
        }
    }

    /// `all` selects every variant.
    pub fn parse_selection(s: &str) -> anyhow::Result<Vec<Variant>> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(Self::ALL.to_vec()),
            "ex1" => Ok(vec![Variant::Ex1]),
            "ex2" => Ok(vec![Variant::Ex2]),
            "ex4" => Ok(vec![Variant::Ex4]),
            other => anyhow::bail!("unknown variant '{other}' (expected all, ex1, ex2 or ex4)"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub trials: usize,
    pub round_digits: u32,
    pub alpha: f64,
    /// `None` draws from OS entropy, so repeated runs differ.
    pub seed: Option<u64>,
    pub variants: Vec<Variant>,
    pub json: bool,
    pub trial_log_dir: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        let verify = VerifyConfig::default();
        Self {
            trials: verify.trials,
            round_digits: verify.round_digits,
            alpha: DEFAULT_ALPHA,
            seed: None,
            variants: Variant::ALL.to_vec(),
            json: false,
            trial_log_dir: None,
        }
    }
}

fn env_parse<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(v) => v
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("invalid {key}={v:?}")),
        Err(_) => Ok(None),
    }
}

impl RunConfig {
    /// Defaults overridden by `RRITZ_*` environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut cfg = Self::default();
        if let Some(v) = env_parse("RRITZ_TRIALS")? { cfg.trials = v; }
        if let Some(v) = env_parse("RRITZ_DIGITS")? { cfg.round_digits = v; }
        if let Some(v) = env_parse("RRITZ_ALPHA")? { cfg.alpha = v; }
        if let Some(v) = env_parse("RRITZ_SEED")? { cfg.seed = Some(v); }
        if let Some(v) = env_parse("RRITZ_JSON")? { cfg.json = v; }
        if let Ok(v) = std::env::var("RRITZ_VARIANT") {
            cfg.variants = Variant::parse_selection(&v)?;
        }
        if let Ok(v) = std::env::var("RRITZ_TRIAL_LOG_DIR") {
            if !v.trim().is_empty() { cfg.trial_log_dir = Some(v); }
        }
        cfg.check()?;
        Ok(cfg)
    }

    pub fn check(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.trials >= 1, "trials must be >= 1");
        anyhow::ensure!(self.round_digits <= 15, "round_digits must be <= 15 (f64 precision)");
        anyhow::ensure!(self.alpha.is_finite() && self.alpha > 0.0, "alpha must be positive and finite");
        anyhow::ensure!(!self.variants.is_empty(), "no variant selected");
        Ok(())
    }

    pub fn verify_config(&self) -> VerifyConfig {
        VerifyConfig { trials: self.trials, round_digits: self.round_digits }
    }
}
