//! Run configuration, optionally loaded from a TOML file.

use anyhow::{bail, Context};
use clap::ValueEnum;
use rwmsd_core::WalkSpec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary on stdout
    #[default]
    #[value(name = "text")]
    Text,
    /// Full report (trajectory, MSD curve, fit) as one JSON document
    #[value(name = "json")]
    Json,
    /// Trajectory and MSD tables as Parquet plus a JSON manifest
    #[value(name = "parquet")]
    Parquet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Random seed; drawn from OS entropy when absent
    pub seed: Option<u64>,
    /// Standard deviation of each step component
    pub step_scale: f64,
    /// Largest MSD lag (default: half the trajectory length)
    pub max_lag: Option<usize>,
    /// Independent walks averaged into the MSD curve
    pub walks: usize,
    pub format: OutputFormat,
    /// Output file (stdout for text/json when absent)
    pub out: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            step_scale: 1.0,
            max_lag: None,
            walks: 1,
            format: OutputFormat::Text,
            out: None,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.step_scale.is_finite() || self.step_scale <= 0.0 {
            bail!("step_scale must be a positive finite number, got {}", self.step_scale);
        }
        if self.walks == 0 {
            bail!("walks must be at least 1");
        }
        if self.max_lag == Some(0) {
            bail!("max_lag must be at least 1");
        }
        if self.format == OutputFormat::Parquet && self.out.is_none() {
            bail!("parquet output requires --out <PATH>");
        }
        Ok(())
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn walk_spec(&self, num_steps: usize) -> WalkSpec {
        let mut spec = WalkSpec::new(num_steps)
            .with_step_scale(self.step_scale)
            .with_walks(self.walks);
        spec.max_lag = self.max_lag;
        spec
    }
}
