//! Presentation of finished analyses. Computation never writes output itself.

use crate::config::OutputFormat;
use crate::{write_msd_parquet, write_trajectory_parquet, RunManifest};
use anyhow::Context;
use rwmsd_core::{Analysis, MsdCurve};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

pub trait Reporter {
    fn report(&mut self, analysis: &Analysis, manifest: &RunManifest) -> anyhow::Result<()>;
}

pub fn reporter_for(format: OutputFormat, out: Option<PathBuf>) -> Box<dyn Reporter> {
    match format {
        OutputFormat::Text => match out {
            Some(path) => Box::new(FileReporter::new(path)),
            None => Box::new(TextReporter::new(std::io::stdout())),
        },
        OutputFormat::Json => Box::new(JsonReporter::new(out)),
        OutputFormat::Parquet => Box::new(ParquetReporter::new(out.unwrap_or_else(|| {
            PathBuf::from("rwmsd.parquet")
        }))),
    }
}

/// Plain summary, one value per line.
pub struct TextReporter<W: Write> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report(&mut self, analysis: &Analysis, manifest: &RunManifest) -> anyhow::Result<()> {
        let fit = &analysis.fit;
        let end = analysis.trajectory.end();
        writeln!(self.out, "Steps: {}", manifest.num_steps)?;
        writeln!(self.out, "Walks: {}", manifest.walks)?;
        writeln!(self.out, "Seed: {}", manifest.seed)?;
        writeln!(self.out, "End point: ({:.3}, {:.3})", end.x, end.y)?;
        writeln!(self.out, "Lags fitted: {} (max lag {})", fit.points, manifest.max_lag)?;
        writeln!(self.out, "Slope of log-log MSD plot: {:.2}", fit.slope)?;
        writeln!(self.out, "Diffusion Coefficient: {:.4}", fit.diffusion_coefficient)?;
        writeln!(
            self.out,
            "Prefactor Diffusion Coefficient: {:.4}",
            fit.prefactor_diffusion()
        )?;
        self.out.flush()?;
        Ok(())
    }
}

/// Text summary written to a file instead of stdout.
pub struct FileReporter {
    path: PathBuf,
}

impl FileReporter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Reporter for FileReporter {
    fn report(&mut self, analysis: &Analysis, manifest: &RunManifest) -> anyhow::Result<()> {
        let file = std::fs::File::create(&self.path)
            .with_context(|| format!("creating {}", self.path.display()))?;
        TextReporter::new(std::io::BufWriter::new(file)).report(analysis, manifest)?;
        info!(path = %self.path.display(), "wrote text report");
        Ok(())
    }
}

#[derive(Serialize)]
struct FitSummary {
    slope: f64,
    intercept: f64,
    points: usize,
    diffusion_coefficient: f64,
    prefactor_diffusion: f64,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    manifest: &'a RunManifest,
    trajectory: Vec<[f64; 2]>,
    msd: &'a MsdCurve,
    fit: FitSummary,
}

impl<'a> JsonReport<'a> {
    fn new(analysis: &'a Analysis, manifest: &'a RunManifest) -> Self {
        let fit = &analysis.fit;
        Self {
            manifest,
            trajectory: analysis
                .trajectory
                .positions()
                .iter()
                .map(|p| [p.x, p.y])
                .collect(),
            msd: &analysis.msd,
            fit: FitSummary {
                slope: fit.slope,
                intercept: fit.intercept,
                points: fit.points,
                diffusion_coefficient: fit.diffusion_coefficient,
                prefactor_diffusion: fit.prefactor_diffusion(),
            },
        }
    }
}

/// Single JSON document to a file, or to stdout when no path is given.
pub struct JsonReporter {
    out: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(out: Option<PathBuf>) -> Self {
        Self { out }
    }
}

impl Reporter for JsonReporter {
    fn report(&mut self, analysis: &Analysis, manifest: &RunManifest) -> anyhow::Result<()> {
        let report = JsonReport::new(analysis, manifest);
        match &self.out {
            Some(path) => {
                let json = serde_json::to_string_pretty(&report)?;
                std::fs::write(path, json)
                    .with_context(|| format!("writing {}", path.display()))?;
                info!(path = %path.display(), "wrote JSON report");
            }
            None => {
                let stdout = std::io::stdout();
                let mut lock = stdout.lock();
                serde_json::to_writer_pretty(&mut lock, &report)?;
                writeln!(lock)?;
            }
        }
        Ok(())
    }
}

/// Trajectory table at `path`, MSD table next to it, plus the manifest.
pub struct ParquetReporter {
    path: PathBuf,
}

impl ParquetReporter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn msd_path(&self) -> PathBuf {
        self.path.with_extension("msd.parquet")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.path.with_extension("manifest.json")
    }
}

impl Reporter for ParquetReporter {
    fn report(&mut self, analysis: &Analysis, manifest: &RunManifest) -> anyhow::Result<()> {
        let msd_path = self.msd_path();
        let manifest_path = self.manifest_path();

        write_trajectory_parquet(analysis, &self.path)?;
        write_msd_parquet(analysis, &msd_path)?;
        manifest.save_to_file(&manifest_path)?;

        info!(
            trajectory = %self.path.display(),
            msd = %msd_path.display(),
            manifest = %manifest_path.display(),
            "wrote parquet report"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rwmsd_core::WalkSpec;
    use tempfile::TempDir;

    fn sample() -> (Analysis, RunManifest) {
        let analysis = Analysis::run(&WalkSpec::new(200).with_max_lag(20), 42).unwrap();
        let manifest = RunManifest::new(&analysis);
        (analysis, manifest)
    }

    #[test]
    fn text_report_lines() {
        let (analysis, manifest) = sample();
        let mut reporter = TextReporter::new(Vec::new());
        reporter.report(&analysis, &manifest).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();

        assert!(text.contains("Seed: 42"));
        assert!(text.contains(&format!(
            "Slope of log-log MSD plot: {:.2}",
            analysis.fit.slope
        )));
        assert!(text.contains(&format!(
            "Diffusion Coefficient: {:.4}",
            analysis.fit.diffusion_coefficient
        )));
    }

    #[test]
    fn json_report_contents() {
        let (analysis, manifest) = sample();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        JsonReporter::new(Some(path.clone()))
            .report(&analysis, &manifest)
            .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["trajectory"].as_array().unwrap().len(), 201);
        assert_eq!(value["trajectory"][0], serde_json::json!([0.0, 0.0]));
        assert_eq!(value["msd"]["points"].as_array().unwrap().len(), 20);
        assert_eq!(value["manifest"]["seed"], 42);
        assert_eq!(value["manifest"]["max_lag"], 20);
        assert!(value["fit"]["slope"].is_number());
    }

    #[test]
    fn parquet_report_files() {
        let (analysis, manifest) = sample();
        let dir = TempDir::new().unwrap();
        let mut reporter = ParquetReporter::new(dir.path().join("run.parquet"));
        reporter.report(&analysis, &manifest).unwrap();

        assert!(dir.path().join("run.parquet").exists());
        assert_eq!(reporter.msd_path(), dir.path().join("run.msd.parquet"));
        assert!(reporter.msd_path().exists());

        let loaded = RunManifest::load_from_file(&reporter.manifest_path()).unwrap();
        assert_eq!(loaded.run_id, manifest.run_id);
        assert_eq!(loaded.num_steps, 200);
    }
}
