use anyhow::Context;
use arrow::array::{Array, Float64Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rwmsd_core::noise::entropy_seed;
use rwmsd_core::{Analysis, DIMENSION};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub mod cli;
pub mod config;
pub mod report;

pub use cli::Cli;
pub use config::{OutputFormat, RunConfig};
pub use report::{reporter_for, JsonReporter, ParquetReporter, Reporter, TextReporter};

/// Everything needed to reproduce a run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: String,
    pub timestamp: String,
    pub seed: u64,
    pub num_steps: usize,
    pub step_scale: f64,
    pub dimension: usize,
    pub walks: usize,
    /// Largest lag actually present in the MSD curve
    pub max_lag: usize,
    pub commit_hash: Option<String>,
    pub version: String,
}

impl RunManifest {
    pub fn new(analysis: &Analysis) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            seed: analysis.seed,
            num_steps: analysis.spec.num_steps,
            step_scale: analysis.spec.step_scale,
            dimension: DIMENSION,
            walks: analysis.spec.walks,
            max_lag: analysis.msd.max_lag().unwrap_or(0),
            commit_hash: get_git_commit(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Positions as a `(step, x, y)` table.
pub fn write_trajectory_parquet(analysis: &Analysis, path: &Path) -> anyhow::Result<()> {
    let positions = analysis.trajectory.positions();
    let schema = Arc::new(Schema::new(vec![
        Field::new("step", DataType::UInt64, false),
        Field::new("x", DataType::Float64, false),
        Field::new("y", DataType::Float64, false),
    ]));
    let arrays: Vec<Arc<dyn Array>> = vec![
        Arc::new(UInt64Array::from_iter_values(0..positions.len() as u64)),
        Arc::new(Float64Array::from_iter_values(positions.iter().map(|p| p.x))),
        Arc::new(Float64Array::from_iter_values(positions.iter().map(|p| p.y))),
    ];
    write_batch(path, schema, arrays)
}

/// MSD curve as a `(lag, msd, samples, fitted)` table; `fitted` is the log-log line.
pub fn write_msd_parquet(analysis: &Analysis, path: &Path) -> anyhow::Result<()> {
    let points = &analysis.msd.points;
    let schema = Arc::new(Schema::new(vec![
        Field::new("lag", DataType::UInt64, false),
        Field::new("msd", DataType::Float64, false),
        Field::new("samples", DataType::UInt64, false),
        Field::new("fitted", DataType::Float64, false),
    ]));
    let arrays: Vec<Arc<dyn Array>> = vec![
        Arc::new(UInt64Array::from_iter_values(points.iter().map(|p| p.lag as u64))),
        Arc::new(Float64Array::from_iter_values(points.iter().map(|p| p.msd))),
        Arc::new(UInt64Array::from_iter_values(points.iter().map(|p| p.samples as u64))),
        Arc::new(Float64Array::from_iter_values(
            points.iter().map(|p| analysis.fit.predict(p.lag as f64)),
        )),
    ];
    write_batch(path, schema, arrays)
}

fn write_batch(path: &Path, schema: Arc<Schema>, arrays: Vec<Arc<dyn Array>>) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

/// Run the whole pipeline for `steps` and hand the result to the configured reporter.
pub fn run(steps: usize, config: &RunConfig) -> anyhow::Result<Analysis> {
    config.validate()?;

    let seed = match config.seed {
        Some(seed) => seed,
        None => {
            let seed = entropy_seed();
            info!(seed, "no seed given, drew one from OS entropy");
            seed
        }
    };

    let spec = config.walk_spec(steps);
    let analysis = Analysis::run(&spec, seed)
        .with_context(|| format!("random walk analysis failed for {steps} steps"))?;

    let manifest = RunManifest::new(&analysis);
    let mut reporter = reporter_for(config.format, config.out.clone());
    reporter.report(&analysis, &manifest)?;

    Ok(analysis)
}

/// Get git commit hash for reproducibility
fn get_git_commit() -> Option<String> {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
}
