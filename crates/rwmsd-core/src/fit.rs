//! Log-log regression of an MSD curve and the Einstein-relation diffusion estimate.

use crate::error::{Result, WalkError};
use crate::msd::MsdCurve;
use crate::DIMENSION;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const MIN_FIT_POINTS: usize = 2;

/// Least-squares line `ln(msd) = slope · ln(lag) + intercept`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub slope: f64,
    pub intercept: f64,
    /// Number of (lag, msd) points that entered the regression
    pub points: usize,
    /// `slope / (2·d)`
    pub diffusion_coefficient: f64,
}

impl FitResult {
    /// `exp(intercept) / (2·d)`: MSD(τ) = 2d·D·τ read off the fitted line at τ = 1.
    pub fn prefactor_diffusion(&self) -> f64 {
        self.intercept.exp() / (2.0 * DIMENSION as f64)
    }

    /// Fitted MSD at `lag`, for overlaying the line on a log-log plot.
    pub fn predict(&self, lag: f64) -> f64 {
        (self.slope * lag.ln() + self.intercept).exp()
    }
}

/// Ordinary least squares of `ys` on `xs`. `None` when `xs` has no spread.
fn linear_regression(xs: &[f64], ys: &[f64]) -> Option<(f64, f64)> {
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        sxx += dx * dx;
        sxy += dx * (y - mean_y);
    }

    if sxx <= f64::EPSILON * n {
        return None;
    }
    let slope = sxy / sxx;
    Some((slope, mean_y - slope * mean_x))
}

/// Fit the curve in log-log space. Points with lag 0 or a non-positive or
/// non-finite MSD are dropped before fitting.
pub fn fit_log_log(curve: &MsdCurve) -> Result<FitResult> {
    let (log_lags, log_msd): (Vec<f64>, Vec<f64>) = curve
        .iter()
        .filter(|p| p.lag > 0 && p.msd.is_finite() && p.msd > 0.0)
        .map(|p| ((p.lag as f64).ln(), p.msd.ln()))
        .unzip();

    if !curve.is_empty() && curve.iter().all(|p| p.msd <= 0.0) {
        return Err(WalkError::degenerate(
            "all MSD values are zero or negative; logarithm undefined",
        ));
    }

    let dropped = curve.len() - log_lags.len();
    if dropped > 0 {
        warn!(dropped, "excluded MSD points that cannot be log-transformed");
    }

    if log_lags.len() < MIN_FIT_POINTS {
        return Err(WalkError::InsufficientData {
            needed: MIN_FIT_POINTS,
            got: log_lags.len(),
        });
    }

    let (slope, intercept) = linear_regression(&log_lags, &log_msd)
        .ok_or_else(|| WalkError::degenerate("all time lags are identical"))?;

    let fit = FitResult {
        slope,
        intercept,
        points: log_lags.len(),
        diffusion_coefficient: slope / (2.0 * DIMENSION as f64),
    };
    debug!(slope, intercept, points = fit.points, "log-log fit");
    Ok(fit)
}
