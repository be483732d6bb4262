use crate::ensemble::Ensemble;
use crate::error::{Result, WalkError};
use crate::fit::{fit_log_log, FitResult};
use crate::model::GaussianWalk;
use crate::msd::MsdCurve;
use crate::trajectory::Trajectory;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Parameters of one analysis run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalkSpec {
    pub num_steps: usize,
    pub step_scale: f64,
    /// Largest MSD lag; `None` means half the trajectory length
    pub max_lag: Option<usize>,
    /// Independent walks averaged into the MSD curve
    pub walks: usize,
}

impl WalkSpec {
    pub fn new(num_steps: usize) -> Self {
        Self {
            num_steps,
            step_scale: 1.0,
            max_lag: None,
            walks: 1,
        }
    }

    pub fn with_step_scale(mut self, step_scale: f64) -> Self {
        self.step_scale = step_scale;
        self
    }

    pub fn with_max_lag(mut self, max_lag: usize) -> Self {
        self.max_lag = Some(max_lag);
        self
    }

    pub fn with_walks(mut self, walks: usize) -> Self {
        self.walks = walks;
        self
    }
}

/// Everything a reporter needs: the (first) trajectory, its MSD curve and the fit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Analysis {
    pub seed: u64,
    pub spec: WalkSpec,
    pub trajectory: Trajectory,
    pub msd: MsdCurve,
    pub fit: FitResult,
}

impl Analysis {
    /// Generate → MSD → fit. Any failure aborts the whole run.
    pub fn run(spec: &WalkSpec, seed: u64) -> Result<Self> {
        let walk = GaussianWalk::new(spec.step_scale)?;
        let ensemble = Ensemble::generate(spec.num_steps, &walk, spec.walks, seed)?;
        let msd = ensemble.msd(spec.max_lag)?;
        let fit = fit_log_log(&msd)?;

        let trajectory = ensemble
            .trajectories
            .into_iter()
            .next()
            .ok_or_else(|| WalkError::invalid("ensemble needs at least one walk"))?;

        info!(
            steps = spec.num_steps,
            walks = spec.walks,
            lags = msd.len(),
            slope = fit.slope,
            diffusion = fit.diffusion_coefficient,
            "analysis complete"
        );

        Ok(Self {
            seed,
            spec: spec.clone(),
            trajectory,
            msd,
            fit,
        })
    }
}
