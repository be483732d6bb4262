use crate::config::{OutputFormat, RunConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rwmsd")]
#[command(version, about = "2D random walk: mean squared displacement and diffusion coefficient")]
#[command(long_about = "Simulates a Gaussian random walk in the plane, computes the time-averaged \
MSD curve and fits a line in log-log space to estimate the diffusion coefficient")]
pub struct Cli {
    /// Number of walk steps (positive integer, at most 100000000)
    #[arg(value_parser = parse_steps, allow_hyphen_values = true)]
    pub steps: usize,

    /// Random seed (default: drawn from OS entropy and reported)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Standard deviation of each step component
    #[arg(long)]
    pub step_scale: Option<f64>,

    /// Largest time lag in the MSD curve (default: half the trajectory)
    #[arg(long)]
    pub max_lag: Option<usize>,

    /// Number of independent walks averaged into the MSD curve
    #[arg(long)]
    pub walks: Option<usize>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// TOML config file; explicit flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Layer explicit flags on top of `base`.
    pub fn apply(&self, mut base: RunConfig) -> RunConfig {
        if self.seed.is_some() {
            base.seed = self.seed;
        }
        if let Some(step_scale) = self.step_scale {
            base.step_scale = step_scale;
        }
        if self.max_lag.is_some() {
            base.max_lag = self.max_lag;
        }
        if let Some(walks) = self.walks {
            base.walks = walks;
        }
        if let Some(format) = self.format {
            base.format = format;
        }
        if self.out.is_some() {
            base.out = self.out.clone();
        }
        base
    }
}

/// Largest accepted step count; the trajectory alone is 16 bytes per step.
pub const MAX_STEPS: usize = 100_000_000;

fn parse_steps(raw: &str) -> Result<usize, String> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("`{raw}` is not an integer; steps must be a positive integer"))?;
    if value <= 0 {
        return Err(format!("steps must be a positive integer, got {value}"));
    }
    match usize::try_from(value) {
        Ok(steps) if steps <= MAX_STEPS => Ok(steps),
        _ => Err(format!("steps must be at most {MAX_STEPS}, got {value}")),
    }
}
